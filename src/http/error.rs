use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed request: {0}")]
    Malformed(String),

    #[error("Request headers exceed {limit} bytes")]
    HeadersTooLarge { limit: usize },

    #[error("Request body of {actual} bytes exceeds {limit} bytes")]
    BodyTooLarge { limit: usize, actual: usize },

    #[error("Unsupported transfer encoding: {0}")]
    UnsupportedEncoding(String),
}

pub type HttpResult<T> = Result<T, HttpError>;
