use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::contracts::{ServiceAccountEnv, ServiceAccountInfo};
use crate::env::EnvSource;
use crate::error::SakeyError;
use crate::logging::IStageReporter;

pub const OUTPUT_FILE_NAME: &str = "serviceAccountFromEnv.json";
pub const SUCCESS_MESSAGE: &str = "Service account loaded successfully.";

/// Reads every credential variable from `source`.
pub fn assemble<S: EnvSource + ?Sized>(source: &S) -> ServiceAccountEnv {
    ServiceAccountEnv::from_source(source)
}

/// Turns literal `\n` sequences back into newlines.
///
/// PEM keys are usually stored on a single line in env files with their
/// line breaks escaped.
pub fn normalize_private_key(raw: &str) -> String {
    raw.replace("\\n", "\n")
}

pub fn to_json(info: &ServiceAccountInfo) -> Result<String, SakeyError> {
    Ok(serde_json::to_string_pretty(info)?)
}

/// Writes `info` to `dir/serviceAccountFromEnv.json`, replacing any existing file.
///
/// The JSON goes to a temp file next to the target first and is renamed into
/// place, so the target is either the old file or the complete new one. An
/// existing target keeps its permissions; a new one gets the same mode a plain
/// `File::create` would give it. If the target is a symlink, the file it
/// points to is replaced and the link stays.
pub fn write_service_account(info: &ServiceAccountInfo, dir: &Path) -> Result<PathBuf, SakeyError> {
    let path = dir.join(OUTPUT_FILE_NAME);
    let json = to_json(info)?;

    let write_err = |source: std::io::Error| SakeyError::Write {
        path: path.clone(),
        source,
    };

    let target = resolve_symlink(&path);
    let target_dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => dir,
    };

    let mut file = staging_file(target_dir).map_err(write_err)?;
    if let Ok(existing) = fs::metadata(&target) {
        file.as_file().set_permissions(existing.permissions()).map_err(write_err)?;
    }
    file.write_all(json.as_bytes()).map_err(write_err)?;
    file.as_file().sync_all().map_err(write_err)?;
    file.persist(&target).map_err(|e| write_err(e.error))?;

    Ok(path)
}

fn resolve_symlink(path: &Path) -> PathBuf {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => match fs::canonicalize(path) {
            Ok(resolved) => resolved,
            // Dangling link: create the file it names.
            Err(_) => match fs::read_link(path) {
                Ok(link) => path.parent().map(|p| p.join(&link)).unwrap_or(link),
                Err(_) => path.to_path_buf(),
            },
        },
        _ => path.to_path_buf(),
    }
}

#[cfg(unix)]
fn staging_file(dir: &Path) -> std::io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    // 0o666 is masked by the umask at creation, like `File::create`.
    tempfile::Builder::new()
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn staging_file(dir: &Path) -> std::io::Result<NamedTempFile> {
    NamedTempFile::new_in(dir)
}

/// Assembles the credential from `source`, writes it into `dir` and reports
/// the outcome. Stops at the first failure; nothing is written in that case.
pub fn stage<S, R>(source: &S, dir: &Path, reporter: &R) -> Result<PathBuf, SakeyError>
where
    S: EnvSource + ?Sized,
    R: IStageReporter + ?Sized,
{
    let env = assemble(source);

    let missing = env.missing_optional();
    if !missing.is_empty() {
        reporter.report_missing(&missing);
    }

    let info = env.into_info()?;
    let path = write_service_account(&info, dir)?;
    reporter.report_written(&path);
    reporter.report_success();

    Ok(path)
}
