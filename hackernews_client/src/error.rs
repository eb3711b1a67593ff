use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[allow(clippy::enum_variant_names)]
#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot decode JSON: {0}")]
    DecodeError(#[from] serde_path_to_error::Error<serde_json::Error>),
    #[error("Network Error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("Cannot parse URL: {0}")]
    UrlError(#[from] url::ParseError),
    #[error("Item {0} does not exist")]
    MissingItem(u64),
}
