use thiserror::Error;

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Client(#[from] hackernews_client::Error),
    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Cannot access cache file {}: {source}", path.display())]
    CacheIO {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot encode story cache: {0}")]
    SerializeError(#[source] serde_json::Error),
    #[error("Cannot decode story cache: {0}")]
    DeserializeError(#[source] serde_json::Error),
    #[error("Index out of range: {index} (cached stories: {len})")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("Invalid config file {}: {reason}", path.display())]
    ConfigError { path: PathBuf, reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub(crate) fn cache_io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Error {
        let path = path.into();
        move |source| Error::CacheIO { path, source }
    }
}
