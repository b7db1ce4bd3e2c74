use thiserror::Error;

use crate::render::RenderError;

#[derive(Debug, Error)]
pub enum RouterError {
    #[error("Invalid route pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

pub type RouterResult<T> = Result<T, RouterError>;
