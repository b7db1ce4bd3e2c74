//! Per-route request handlers
//!
//! Each handler owns the [`Page`] it loads or builds for the duration of one
//! request and answers with a rendered view, a redirect, or an error response.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::http::{Request, Response};
use crate::render::{Renderer, ViewData};
use crate::router::Action;
use crate::store::{Page, PageStore};

/// Shared, read-only state the handlers run against
#[derive(Clone)]
pub struct Handlers {
    store: PageStore,
    renderer: Arc<dyn Renderer>,
}

impl Handlers {
    pub fn new(store: PageStore, renderer: Arc<dyn Renderer>) -> Self {
        Self { store, renderer }
    }

    pub fn store(&self) -> &PageStore {
        &self.store
    }

    fn render(&self, view: &str, data: ViewData<'_>) -> Response {
        match self.renderer.render(view, &data) {
            Ok(bytes) => Response::html(bytes),
            Err(err) => {
                warn!(view, error = %err, "render failed");
                Response::internal_error(&err.to_string())
            }
        }
    }

    /// Show a page, or redirect to its edit form when it cannot be loaded
    pub fn view(&self, title: &str) -> Response {
        match self.store.load(title) {
            Ok(page) => self.render("view", ViewData::Page(&page)),
            Err(err) => {
                debug!(title, error = %err, "view miss, redirecting to edit");
                Response::redirect(&Action::Edit.path_for(title))
            }
        }
    }

    /// Edit form for a page. An unreadable page is edited as a blank draft.
    pub fn edit(&self, title: &str) -> Response {
        let page = self.store.load(title).unwrap_or_else(|err| {
            debug!(title, error = %err, "editing blank draft");
            Page::blank(title)
        });
        self.render("edit", ViewData::Page(&page))
    }

    /// Persist the `body` form field (missing means empty) and redirect to the page
    pub fn save(&self, title: &str, request: &Request) -> Response {
        let body = request.form_value("body").unwrap_or_default();
        let page = Page::new(title, body);
        match self.store.save(&page.title, &page.body) {
            Ok(()) => {
                debug!(title, bytes = page.body.len(), "page saved");
                Response::redirect(&Action::View.path_for(title))
            }
            Err(err) => {
                warn!(title, error = %err, "save failed");
                Response::internal_error(&err.to_string())
            }
        }
    }

    /// List every stored page
    pub fn index(&self) -> Response {
        match self.store.list() {
            Ok(titles) => self.render("index", ViewData::Titles(&titles)),
            Err(err) => {
                warn!(error = %err, "listing pages failed");
                Response::internal_error(&err.to_string())
            }
        }
    }
}
