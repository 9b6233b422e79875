//! Route registry (`routes/index.js`)
//!
//! ```js
//! import authorsRoutes from './authors.js';
//!
//! function registerRoutes(app, apiV) {
//!   app.use(`/api/${apiV}/authors`, authorsRoutes);
//! }
//!
//! export default registerRoutes;
//! ```

use super::{paired_key, AggregatorSyntax};
use crate::config::ProjectLayout;
use crate::model::ModelDescriptor;
use crate::scaffold::TemplateHelpers;
use once_cell::sync::Lazy;
use regex::Regex;

static IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*import\s+([A-Za-z]\w*)Routes\s+from\s+['"]([^'"]+)['"]\s*;?\s*$"#)
        .expect("valid import pattern")
});

static ANCHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*function\s+registerRoutes\s*\(\s*app\s*,\s*apiV\s*\)\s*\{\s*(\})?\s*$")
        .expect("valid anchor pattern")
});

static ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*app\.use\(\s*`/api/\$\{apiV\}/([A-Za-z]\w*)`\s*,\s*([A-Za-z]\w*)Routes\s*\)\s*;?\s*$")
        .expect("valid entry pattern")
});

static EXPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*export\s+default\s+registerRoutes\s*;?\s*$").expect("valid export pattern")
});

/// Syntax of the route registry aggregator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRegistry {
    /// Specifier prefix of the route modules (`./`)
    routes_dir: String,
}

impl RouteRegistry {
    /// Registry importing route modules from `routes_dir`
    ///
    /// `routes_dir` is an ES specifier prefix ending in `/`.
    #[must_use]
    pub fn new(routes_dir: impl Into<String>) -> Self {
        Self {
            routes_dir: routes_dir.into(),
        }
    }

    /// Registry for a project layout
    #[must_use]
    pub fn for_layout(layout: &ProjectLayout) -> Self {
        Self::new(TemplateHelpers::relative_dir(
            &layout.route_registry,
            &layout.routes_dir,
        ))
    }

    fn specifier(&self, key: &str) -> String {
        format!("{}{key}.js", self.routes_dir)
    }
}

impl Default for RouteRegistry {
    fn default() -> Self {
        Self::for_layout(&ProjectLayout::default())
    }
}

impl AggregatorSyntax for RouteRegistry {
    fn label(&self) -> &'static str {
        "route registry"
    }

    fn key(&self, model: &ModelDescriptor) -> String {
        model.plural_name.clone()
    }

    fn import_line(&self, key: &str) -> String {
        format!("import {key}Routes from '{}';", self.specifier(key))
    }

    fn import_key(&self, line: &str) -> Option<String> {
        let caps = IMPORT.captures(line)?;
        let key = &caps[1];
        (caps[2] == self.specifier(key)).then(|| key.to_string())
    }

    fn anchor_line(&self) -> &'static str {
        "function registerRoutes(app, apiV) {"
    }

    fn anchor_pattern(&self) -> &Regex {
        &ANCHOR
    }

    fn entry_line(&self, key: &str) -> String {
        format!("  app.use(`/api/${{apiV}}/{key}`, {key}Routes);")
    }

    fn entry_key(&self, line: &str) -> Option<String> {
        paired_key(&ENTRY, line)
    }

    fn close_line(&self) -> &'static str {
        "}"
    }

    fn export_line(&self) -> &'static str {
        "export default registerRoutes;"
    }

    fn export_pattern(&self) -> &Regex {
        &EXPORT
    }
}
