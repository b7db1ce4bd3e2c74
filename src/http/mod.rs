//! Minimal HTTP/1.1 request/response layer

mod codec;
mod error;
pub mod form;
mod request;
mod response;

pub use codec::{Limits, parse_request};
pub use error::{HttpError, HttpResult};
pub use request::{Request, Version};
pub use response::{Response, StatusCode};
