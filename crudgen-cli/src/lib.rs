//! crudgen CLI library
//!
//! Scaffolds a query module, controller and route module for a data model in
//! an express + node-postgres project, and keeps the project's query registry
//! (`src/db/db.js`) and route registry (`src/routes/index.js`) in sync.

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod commands;
pub mod config;
pub mod confirm;
pub mod error;
pub mod model;
pub mod observability;
pub mod patch;
pub mod scaffold;
pub mod templates;

pub use commands::{CreateCommand, Outcome, RemoveCommand};
pub use config::{CrudGenConfig, ProjectLayout, ProjectPaths};
pub use confirm::{Confirm, FixedAnswer, InteractiveConfirm};
pub use error::CrudGenError;
pub use model::{FieldDefinition, FieldType, ModelDescriptor};
pub use patch::{AggregatorFile, AggregatorSyntax, PatchMode, PatchOutcome, QueryRegistry, RouteRegistry};
pub use scaffold::{GeneratedFile, ScaffoldGenerator, TemplateHelpers};
pub use templates::{TemplateKind, TemplateRenderer};
