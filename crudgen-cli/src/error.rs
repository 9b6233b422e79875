//! Error types for scaffold generation

use std::path::PathBuf;
use thiserror::Error;

/// Generator error type
#[derive(Debug, Error)]
pub enum CrudGenError {
    /// Model name cannot be used as a JS identifier or file name
    #[error("Invalid model name '{name}': {reason}")]
    InvalidModelName {
        /// Raw name as given on the command line
        name: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// Malformed `name:type` field specification
    #[error("Invalid field '{spec}': {reason}")]
    InvalidField {
        /// Raw field specification
        spec: String,
        /// Why it was rejected
        reason: String,
    },

    /// `create` was called without any field
    #[error("At least one field must be specified (e.g. `name:string`)")]
    NoFields,

    /// A per-model file is already on disk
    #[error("File already exists: {}", path.display())]
    FileExists {
        /// Conflicting path
        path: PathBuf,
    },

    /// Template rendering failed
    #[error("Failed to render template '{name}': {source}")]
    Template {
        /// Template name
        name: &'static str,
        /// Underlying handlebars error
        #[source]
        source: Box<handlebars::RenderError>,
    },

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

/// Convenience result alias
pub type Result<T, E = CrudGenError> = std::result::Result<T, E>;
