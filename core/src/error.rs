use thiserror::Error;

/// Widget error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Count fetch failed: {0}")]
    CountFetch(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("QR encoding failed: {0}")]
    QrEncode(String),
}

pub type Result<T> = std::result::Result<T, Error>;
