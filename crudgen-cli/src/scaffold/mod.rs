//! CRUD scaffold generation

pub mod generator;
pub mod helpers;

pub use generator::{GeneratedFile, ScaffoldGenerator};
pub use helpers::TemplateHelpers;
