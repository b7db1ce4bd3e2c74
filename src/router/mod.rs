//! Request routing: path validation and dispatch to the handlers

mod dispatcher;
mod error;
mod path;

pub use dispatcher::Dispatcher;
pub use error::{RouterError, RouterResult};
pub use path::{Action, PathValidator, ROUTE_PATTERN, Route, ValidationError, ValidationResult};
