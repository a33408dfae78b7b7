use std::collections::HashMap;
use std::ffi::OsString;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::SakeyError;

/// Variable names read by the loader.
pub mod vars {
    pub const GOOGLE_TYPE: &str = "GOOGLE_TYPE";
    pub const GOOGLE_PROJECT_ID: &str = "GOOGLE_PROJECT_ID";
    pub const GOOGLE_PRIVATE_KEY_ID: &str = "GOOGLE_PRIVATE_KEY_ID";
    pub const GOOGLE_PRIVATE_KEY: &str = "GOOGLE_PRIVATE_KEY";
    pub const GOOGLE_CLIENT_EMAIL: &str = "GOOGLE_CLIENT_EMAIL";
    pub const GOOGLE_CLIENT_ID: &str = "GOOGLE_CLIENT_ID";
    pub const GOOGLE_AUTH_URI: &str = "GOOGLE_AUTH_URI";
    pub const GOOGLE_TOKEN_URI: &str = "GOOGLE_TOKEN_URI";
    pub const GOOGLE_AUTH_PROVIDER_CERT_URL: &str = "GOOGLE_AUTH_PROVIDER_CERT_URL";
    pub const GOOGLE_CLIENT_CERT_URL: &str = "GOOGLE_CLIENT_CERT_URL";
    pub const GOOGLE_UNIVERSE_DOMAIN: &str = "GOOGLE_UNIVERSE_DOMAIN";
}

pub const DOTENV_FILE_NAME: &str = ".env";

/// Somewhere to look up configuration variables by name.
pub trait EnvSource {
    fn var_os(&self, key: &str) -> Option<OsString>;

    /// Non-unicode values count as unset.
    fn var(&self, key: &str) -> Option<String> {
        self.var_os(key).and_then(|value| value.into_string().ok())
    }
}

/// The environment of the running process.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var_os(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }
}

impl EnvSource for HashMap<String, String> {
    fn var_os(&self, key: &str) -> Option<OsString> {
        self.get(key).map(OsString::from)
    }
}

/// Loads `<dir>/.env` into the process environment.
///
/// A missing file is fine. Variables that are already set keep their value.
/// Lines that do not parse are skipped with a warning; only failing to read
/// an existing file is an error.
pub fn load_dotenv(dir: &Path) -> Result<(), SakeyError> {
    let path = dir.join(DOTENV_FILE_NAME);
    let entries = match dotenvy::from_path_iter(&path) {
        Ok(entries) => entries,
        Err(e) if e.not_found() => {
            debug!(path = %path.display(), "no dotenv file");
            return Ok(());
        }
        Err(e) => return Err(SakeyError::DotEnv { path, source: e }),
    };

    let mut loaded = 0usize;
    for entry in entries {
        match entry {
            Ok((key, value)) => {
                if std::env::var_os(&key).is_some() {
                    continue;
                }
                // SAFETY: runs during single-threaded startup, before the
                // environment is read anywhere else.
                unsafe { std::env::set_var(&key, &value) };
                loaded += 1;
            }
            Err(dotenvy::Error::LineParse(line, index)) => {
                warn!(path = %path.display(), line = %line.trim_end(), index, "skipping unparsable dotenv line");
            }
            Err(e) => return Err(SakeyError::DotEnv { path, source: e }),
        }
    }

    debug!(path = %path.display(), loaded, "loaded dotenv file");
    Ok(())
}
