use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Any failure to read a page. Missing files and unreadable files are not told apart.
    #[error("Page {title} not found: {source}")]
    NotFound {
        title: String,
        #[source]
        source: io::Error,
    },

    #[error("Cannot write page {title}: {source}")]
    Write {
        title: String,
        #[source]
        source: io::Error,
    },

    #[error("Cannot list pages: {0}")]
    List(#[source] io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
