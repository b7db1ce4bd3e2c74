use std::sync::Arc;

use tracing::debug;

use super::error::RouterResult;
use super::path::{Action, PathValidator};
use crate::config::WikiConfig;
use crate::handlers::Handlers;
use crate::http::{Request, Response};
use crate::render::{Renderer, TemplateRenderer};
use crate::store::PageStore;

/// Routes requests to the handlers.
///
/// Built once at startup and shared read-only by every connection. The
/// action captured by the validator is the only thing that picks a handler.
#[derive(Clone)]
pub struct Dispatcher {
    validator: PathValidator,
    handlers: Handlers,
}

impl Dispatcher {
    pub fn new(store: PageStore, renderer: Arc<dyn Renderer>) -> RouterResult<Self> {
        Ok(Self {
            validator: PathValidator::new()?,
            handlers: Handlers::new(store, renderer),
        })
    }

    /// Store at `config.data_dir`, templates compiled from `config.template_dir`
    pub fn from_config(config: &WikiConfig) -> RouterResult<Self> {
        let renderer = TemplateRenderer::from_dir(&config.template_dir)?;
        Self::new(PageStore::new(&config.data_dir), Arc::new(renderer))
    }

    pub fn handlers(&self) -> &Handlers {
        &self.handlers
    }

    pub fn dispatch(&self, request: &Request) -> Response {
        if request.path == "/" {
            return self.handlers.index();
        }

        let route = match self.validator.validate(&request.path) {
            Ok(route) => route,
            Err(_) => {
                debug!(path = %request.path, "no route");
                return Response::not_found();
            }
        };

        match route.action {
            Action::View => self.handlers.view(&route.title),
            Action::Edit => self.handlers.edit(&route.title),
            Action::Save => self.handlers.save(&route.title, request),
        }
    }
}
