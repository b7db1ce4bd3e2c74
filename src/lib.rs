pub mod config;
pub mod handlers;
pub mod http;
pub mod render;
pub mod router;
pub mod server;
pub mod store;

pub use config::{ConfigError, ConfigResult, WikiConfig};
pub use handlers::Handlers;
pub use http::{HttpError, HttpResult, Limits, Request, Response, StatusCode};
pub use render::{RenderError, RenderResult, Renderer, TemplateRenderer, ViewData};
pub use router::{
    Action, Dispatcher, PathValidator, Route, RouterError, RouterResult, ValidationError,
};
pub use server::Server;
pub use store::{Page, PageStore, StoreError, StoreResult};
