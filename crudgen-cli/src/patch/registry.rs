//! Query registry (`db.js`)
//!
//! ```js
//! import author from './queries/author.js';
//!
//! const db = {
//!   author,
//! };
//!
//! export default db;
//! ```

use super::AggregatorSyntax;
use crate::config::ProjectLayout;
use crate::model::ModelDescriptor;
use crate::scaffold::TemplateHelpers;
use once_cell::sync::Lazy;
use regex::Regex;

static IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*import\s+([A-Za-z]\w*)\s+from\s+['"]([^'"]+)['"]\s*;?\s*$"#)
        .expect("valid import pattern")
});

static ANCHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:export\s+)?const\s+db\s*=\s*\{\s*(\}\s*;?)?\s*$").expect("valid anchor pattern")
});

static ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([A-Za-z]\w*)\s*,?\s*$").expect("valid entry pattern"));

static EXPORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*export\s+default\s+db\s*;?\s*$").expect("valid export pattern"));

/// Syntax of the query registry aggregator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRegistry {
    /// Specifier prefix of the query modules (`./queries/`)
    queries_dir: String,
}

impl QueryRegistry {
    /// Registry importing query modules from `queries_dir`
    ///
    /// `queries_dir` is an ES specifier prefix ending in `/`.
    #[must_use]
    pub fn new(queries_dir: impl Into<String>) -> Self {
        Self {
            queries_dir: queries_dir.into(),
        }
    }

    /// Registry for a project layout
    #[must_use]
    pub fn for_layout(layout: &ProjectLayout) -> Self {
        Self::new(TemplateHelpers::relative_dir(
            &layout.db_registry,
            &layout.queries_dir,
        ))
    }

    fn specifier(&self, key: &str) -> String {
        format!("{}{key}.js", self.queries_dir)
    }
}

impl Default for QueryRegistry {
    fn default() -> Self {
        Self::for_layout(&ProjectLayout::default())
    }
}

impl AggregatorSyntax for QueryRegistry {
    fn label(&self) -> &'static str {
        "db registry"
    }

    fn key(&self, model: &ModelDescriptor) -> String {
        model.name.clone()
    }

    fn import_line(&self, key: &str) -> String {
        format!("import {key} from '{}';", self.specifier(key))
    }

    fn import_key(&self, line: &str) -> Option<String> {
        let caps = IMPORT.captures(line)?;
        let key = &caps[1];
        (caps[2] == self.specifier(key)).then(|| key.to_string())
    }

    fn anchor_line(&self) -> &'static str {
        "const db = {"
    }

    fn anchor_pattern(&self) -> &Regex {
        &ANCHOR
    }

    fn entry_line(&self, key: &str) -> String {
        format!("  {key},")
    }

    fn entry_key(&self, line: &str) -> Option<String> {
        ENTRY.captures(line).map(|caps| caps[1].to_string())
    }

    fn close_line(&self) -> &'static str {
        "};"
    }

    fn export_line(&self) -> &'static str {
        "export default db;"
    }

    fn export_pattern(&self) -> &Regex {
        &EXPORT
    }
}
