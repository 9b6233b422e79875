//! Helpers for building template context

use crate::model::FieldDefinition;
use std::path::{Component, Path};

/// Helper functions for template variables
pub struct TemplateHelpers;

impl TemplateHelpers {
    /// ES module specifier importing `to_file` from `from_file`
    ///
    /// Both paths are project-relative.
    ///
    /// ```
    /// use crudgen_cli_lib::TemplateHelpers;
    /// use std::path::Path;
    ///
    /// assert_eq!(
    ///     TemplateHelpers::relative_import(Path::new("src/db/queries/author.js"), Path::new("src/db/pool.js")),
    ///     "../pool.js"
    /// );
    /// ```
    #[must_use]
    pub fn relative_import(from_file: &Path, to_file: &Path) -> String {
        Self::relative_parts(from_file, to_file).join("/")
    }

    /// Specifier prefix for modules in `to_dir`, as seen from `from_file`
    ///
    /// Always ends in `/`, so appending `<name>.js` gives a full specifier
    /// (`./queries/`, `../lib/sql/`).
    #[must_use]
    pub fn relative_dir(from_file: &Path, to_dir: &Path) -> String {
        let mut dir = Self::relative_parts(from_file, to_dir).join("/");
        dir.push('/');
        dir
    }

    fn relative_parts(from_file: &Path, to: &Path) -> Vec<String> {
        let from_dir: Vec<Component<'_>> = from_file
            .parent()
            .map(|p| p.components().collect())
            .unwrap_or_default();
        let to: Vec<Component<'_>> = to.components().collect();

        let common = from_dir
            .iter()
            .zip(&to)
            .take_while(|(a, b)| a == b)
            .count();

        let mut parts: Vec<String> = vec!["..".to_string(); from_dir.len() - common];
        if parts.is_empty() {
            parts.push(".".to_string());
        }
        parts.extend(
            to[common..]
                .iter()
                .map(|c| c.as_os_str().to_string_lossy().into_owned()),
        );
        parts
    }

    /// `name, age`
    #[must_use]
    pub fn column_list(fields: &[FieldDefinition]) -> String {
        fields
            .iter()
            .map(|f| f.column.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `$1, $2`
    #[must_use]
    pub fn placeholder_list(count: usize) -> String {
        (1..=count)
            .map(|i| format!("${i}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `name = $1, age = $2`
    #[must_use]
    pub fn assignment_list(fields: &[FieldDefinition]) -> String {
        fields
            .iter()
            .enumerate()
            .map(|(i, f)| format!("{} = ${}", f.column, i + 1))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
