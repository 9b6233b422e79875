//! Model descriptor derived from command-line input
//!
//! A model name plus `name:type` field specifications are normalized into a
//! [`ModelDescriptor`], which parameterizes both the rendered templates and
//! the aggregator patches.

use crate::error::{CrudGenError, Result};
use convert_case::{Case, Casing};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Names that cannot be used as a model: the model name becomes a JS binding
/// in the db registry, which itself declares `db`
const RESERVED_NAMES: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "db",
    "debugger", "default", "delete", "do", "else", "enum", "eval", "export", "extends",
    "false", "finally", "for", "function", "if", "implements", "import", "in",
    "instanceof", "interface", "let", "new", "null", "package", "private", "protected",
    "public", "return", "static", "super", "switch", "this", "throw", "true", "try",
    "typeof", "var", "void", "while", "with", "yield",
];

/// Field type accepted in `name:type` specifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Short string (default)
    #[default]
    String,
    /// Long text
    Text,
    /// Integer number
    Integer,
    /// Floating point / decimal number
    Float,
    /// Boolean flag
    Boolean,
    /// Calendar date
    Date,
    /// Date with time
    DateTime,
    /// Arbitrary JSON document
    Json,
}

impl FieldType {
    /// Expression coercing the JS value `expr` to this type in a controller
    #[must_use]
    pub fn coerce(self, expr: &str) -> String {
        match self {
            Self::Integer | Self::Float => format!("Number({expr})"),
            Self::Boolean => format!("Boolean({expr})"),
            Self::String | Self::Text | Self::Date | Self::DateTime | Self::Json => {
                expr.to_string()
            }
        }
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ty = match s.to_lowercase().as_str() {
            "string" | "str" => Self::String,
            "text" => Self::Text,
            "int" | "integer" => Self::Integer,
            "float" | "number" | "decimal" => Self::Float,
            "bool" | "boolean" => Self::Boolean,
            "date" => Self::Date,
            "datetime" | "timestamp" => Self::DateTime,
            "json" => Self::Json,
            other => {
                return Err(format!(
                    "unsupported type '{other}' (supported: string, text, int, float, bool, date, datetime, json)"
                ))
            }
        };
        Ok(ty)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Json => "json",
        };
        f.write_str(name)
    }
}

/// A single model field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDefinition {
    /// Field name as given (used as the request-body key)
    pub name: String,
    /// Column name in SQL text
    pub column: String,
    /// Field type
    pub field_type: FieldType,
}

impl FieldDefinition {
    /// Parse `name[:type]`, defaulting the type to `string`
    ///
    /// # Errors
    ///
    /// Returns [`CrudGenError::InvalidField`] for an empty or non-identifier
    /// name, an unknown type, or extra `:` segments.
    pub fn parse(spec: &str) -> Result<Self> {
        let invalid = |reason: String| CrudGenError::InvalidField {
            spec: spec.to_string(),
            reason,
        };

        let mut parts = spec.split(':');
        let name = parts.next().unwrap_or_default().trim();
        let type_str = parts.next().map(str::trim);
        if parts.next().is_some() {
            return Err(invalid("expected 'name' or 'name:type'".to_string()));
        }

        if !is_identifier(name) {
            return Err(invalid(
                "field name must start with a letter and contain only letters, digits or '_'"
                    .to_string(),
            ));
        }

        let field_type = match type_str {
            None | Some("") => FieldType::default(),
            Some(ty) => ty.parse().map_err(invalid)?,
        };

        Ok(Self {
            name: name.to_string(),
            column: name.to_case(Case::Snake),
            field_type,
        })
    }
}

/// Normalized model data shared by templates and patchers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelDescriptor {
    /// Lowercase name (`author`)
    pub name: String,
    /// Capitalized name (`Author`)
    pub display_name: String,
    /// Plural name (`authors`), also the table name and route segment
    pub plural_name: String,
    /// Ordered field list
    pub fields: Vec<FieldDefinition>,
}

impl ModelDescriptor {
    /// Build a descriptor from a raw model name and field specifications
    ///
    /// # Errors
    ///
    /// Fails on an invalid model name, an invalid field, or a field name
    /// given twice.
    pub fn parse<S: AsRef<str>>(raw_name: &str, field_specs: &[S]) -> Result<Self> {
        if raw_name.is_empty() {
            return Err(CrudGenError::InvalidModelName {
                name: raw_name.to_string(),
                reason: "name is empty",
            });
        }
        if !is_identifier(raw_name) {
            return Err(CrudGenError::InvalidModelName {
                name: raw_name.to_string(),
                reason: "must start with a letter and contain only letters, digits or '_'",
            });
        }

        let name = raw_name.to_lowercase();
        if RESERVED_NAMES.contains(&name.as_str()) {
            return Err(CrudGenError::InvalidModelName {
                name: raw_name.to_string(),
                reason: "is a JavaScript reserved word or clashes with the db registry",
            });
        }

        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(field_specs.len());
        for spec in field_specs {
            let field = FieldDefinition::parse(spec.as_ref())?;
            if !seen.insert(field.column.clone()) {
                return Err(CrudGenError::InvalidField {
                    spec: spec.as_ref().to_string(),
                    reason: format!("duplicate field '{}'", field.name),
                });
            }
            fields.push(field);
        }

        let plural_name = format!("{name}s");

        Ok(Self {
            name,
            display_name: capitalize(raw_name),
            plural_name,
            fields,
        })
    }

    /// Same as [`parse`](Self::parse) but rejects an empty field list
    ///
    /// # Errors
    ///
    /// Returns [`CrudGenError::NoFields`] when `field_specs` is empty.
    pub fn parse_with_fields<S: AsRef<str>>(raw_name: &str, field_specs: &[S]) -> Result<Self> {
        if field_specs.is_empty() {
            return Err(CrudGenError::NoFields);
        }
        Self::parse(raw_name, field_specs)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
