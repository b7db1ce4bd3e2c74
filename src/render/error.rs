use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Cannot read template {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("Template {name}: {message}")]
    Parse { name: String, message: String },

    #[error("No template named {0}")]
    UnknownView(String),

    #[error("Template {name}: {field} is not available for this data")]
    MissingField { name: String, field: String },
}

pub type RenderResult<T> = Result<T, RenderError>;
