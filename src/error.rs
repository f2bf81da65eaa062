use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("either a receipt number or a full URL must be provided")]
    MissingSource,
    #[error("invalid receipt URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("HTTP status code error: {0}")]
    HttpStatusCode(u16),
    #[error("failed to fetch receipt: {0}")]
    Request(#[from] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum ReceiptError {
    #[error("malformed markup: {0}")]
    MalformedMarkup(String),
    #[error(transparent)]
    Load(#[from] LoaderError),
}

pub type Result<T> = std::result::Result<T, ReceiptError>;
