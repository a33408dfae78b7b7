use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SakeyError {
    #[error("{variable} is not set; a service account needs a private key")]
    MissingPrivateKey { variable: &'static str },

    #[error("{variable} is set but is not valid unicode")]
    PrivateKeyNotUnicode { variable: &'static str },

    #[error("could not load {}", path.display())]
    DotEnv {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("could not serialize service account")]
    Serialize(#[from] serde_json::Error),

    #[error("could not write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
