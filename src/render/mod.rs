//! Rendering of the wiki's HTML views

mod error;
mod template;

pub use error::{RenderError, RenderResult};
pub use template::Template;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::store::Page;

/// Names of the views the handlers render
pub const VIEW_NAMES: [&str; 3] = ["view", "edit", "index"];

/// Data handed to a view
#[derive(Debug, Clone, Copy)]
pub enum ViewData<'a> {
    Page(&'a Page),
    Titles(&'a [String]),
}

/// Turns a named view and its data into response bytes
pub trait Renderer: Send + Sync {
    fn render(&self, view: &str, data: &ViewData<'_>) -> RenderResult<Vec<u8>>;
}

/// Renders from templates compiled once at startup
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    templates: HashMap<String, Template>,
}

impl TemplateRenderer {
    /// Compile templates from `(name, source)` pairs
    pub fn from_sources<'a, I>(sources: I) -> RenderResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut templates = HashMap::new();
        for (name, source) in sources {
            templates.insert(name.to_string(), Template::parse(name, source)?);
        }
        Ok(Self { templates })
    }

    /// Load `<dir>/<view>.html` for every view in [`VIEW_NAMES`]
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> RenderResult<Self> {
        let dir = dir.as_ref();
        let mut sources = Vec::with_capacity(VIEW_NAMES.len());
        for name in VIEW_NAMES {
            let path = dir.join(format!("{}.html", name));
            let source = fs::read_to_string(&path).map_err(|source| RenderError::Io {
                name: path.display().to_string(),
                source,
            })?;
            sources.push((name, source));
        }
        Self::from_sources(sources.iter().map(|(name, source)| (*name, source.as_str())))
    }

    /// The default templates shipped in `tmpl/`
    pub fn builtin() -> RenderResult<Self> {
        Self::from_sources([
            ("view", include_str!("../../tmpl/view.html")),
            ("edit", include_str!("../../tmpl/edit.html")),
            ("index", include_str!("../../tmpl/index.html")),
        ])
    }
}

impl Renderer for TemplateRenderer {
    fn render(&self, view: &str, data: &ViewData<'_>) -> RenderResult<Vec<u8>> {
        let template = self
            .templates
            .get(view)
            .ok_or_else(|| RenderError::UnknownView(view.to_string()))?;
        template.execute(data)
    }
}
