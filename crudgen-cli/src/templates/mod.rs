//! Source template rendering

use crate::error::{CrudGenError, Result};
use handlebars::Handlebars;

pub mod files;
pub use files::*;

/// One of the embedded templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// Per-model query module
    Query,
    /// Per-model controller
    Controller,
    /// Per-model route module
    Routes,
    /// Shared connection pool
    Pool,
}

impl TemplateKind {
    /// Template name used in error messages
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Controller => "controller",
            Self::Routes => "routes",
            Self::Pool => "pool",
        }
    }

    const fn source(self) -> &'static str {
        match self {
            Self::Query => QUERY_JS,
            Self::Controller => CONTROLLER_JS,
            Self::Routes => ROUTES_JS,
            Self::Pool => POOL_JS,
        }
    }
}

/// Handlebars renderer for generated JS sources
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Create a renderer
    #[must_use]
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();

        // Disable HTML escaping since we're generating code
        handlebars.register_escape_fn(handlebars::no_escape);

        Self { handlebars }
    }

    /// Render `kind` with `context`
    ///
    /// # Errors
    ///
    /// Returns [`CrudGenError::Template`] if rendering fails.
    pub fn render(&self, kind: TemplateKind, context: &serde_json::Value) -> Result<String> {
        self.handlebars
            .render_template(kind.source(), context)
            .map_err(|source| CrudGenError::Template {
                name: kind.name(),
                source: Box::new(source),
            })
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}
