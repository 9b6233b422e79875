//! CRUD scaffold generator
//!
//! Renders the three per-model files (query module, controller, route module)
//! and, when a project has none yet, the shared connection pool module. No
//! I/O happens here; callers decide where and whether to write.

use super::helpers::TemplateHelpers;
use crate::config::{ProjectLayout, ProjectPaths};
use crate::error::Result;
use crate::model::ModelDescriptor;
use crate::templates::{TemplateKind, TemplateRenderer};
use std::path::{Path, PathBuf};

/// CRUD scaffold generator
pub struct ScaffoldGenerator {
    /// Model being scaffolded
    model: ModelDescriptor,
    /// Project-relative output paths
    paths: ProjectPaths,
    /// Template renderer
    templates: TemplateRenderer,
}

impl ScaffoldGenerator {
    /// Create a generator for `model` laid out according to `layout`
    #[must_use]
    pub fn new(model: ModelDescriptor, layout: &ProjectLayout) -> Self {
        let paths = ProjectPaths::resolve(Path::new(""), layout, &model);
        Self {
            model,
            paths,
            templates: TemplateRenderer::new(),
        }
    }

    /// Render the query, controller and route files, in that order
    ///
    /// # Errors
    ///
    /// Returns an error if a template fails to render.
    pub fn generate(&self) -> Result<Vec<GeneratedFile>> {
        Ok(vec![
            self.generate_query()?,
            self.generate_controller()?,
            self.generate_routes()?,
        ])
    }

    /// Render the shared pool module
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn generate_pool(&self) -> Result<GeneratedFile> {
        let content = self
            .templates
            .render(TemplateKind::Pool, &serde_json::json!({}))?;

        Ok(GeneratedFile {
            path: self.paths.pool.clone(),
            content,
            description: "Database connection pool".to_string(),
        })
    }

    /// Template variables shared by all per-model templates
    fn model_metadata(&self) -> serde_json::Value {
        let model = &self.model;

        let fields: Vec<_> = model
            .fields
            .iter()
            .map(|f| {
                serde_json::json!({
                    "name": f.name,
                    "column": f.column,
                    "field_type": f.field_type,
                    "coerced": f.field_type.coerce(&format!("body.{}", f.name)),
                })
            })
            .collect();

        serde_json::json!({
            "model_name": model.name,
            "display_name": model.display_name,
            "plural_name": model.plural_name,
            "table_name": model.plural_name,
            "fields": fields,
            "insert_columns": TemplateHelpers::column_list(&model.fields),
            "insert_placeholders": TemplateHelpers::placeholder_list(model.fields.len()),
            "update_assignments": TemplateHelpers::assignment_list(&model.fields),
            "update_id_placeholder": format!("${}", model.fields.len() + 1),
            "pool_import": TemplateHelpers::relative_import(&self.paths.query, &self.paths.pool),
            "db_import": TemplateHelpers::relative_import(&self.paths.controller, &self.paths.db_registry),
            "controller_import": TemplateHelpers::relative_import(&self.paths.routes, &self.paths.controller),
        })
    }

    fn generate_query(&self) -> Result<GeneratedFile> {
        let content = self
            .templates
            .render(TemplateKind::Query, &self.model_metadata())?;

        Ok(GeneratedFile {
            path: self.paths.query.clone(),
            content,
            description: format!("Query module for {}", self.model.plural_name),
        })
    }

    fn generate_controller(&self) -> Result<GeneratedFile> {
        let content = self
            .templates
            .render(TemplateKind::Controller, &self.model_metadata())?;

        Ok(GeneratedFile {
            path: self.paths.controller.clone(),
            content,
            description: format!("Controller for {}", self.model.display_name),
        })
    }

    fn generate_routes(&self) -> Result<GeneratedFile> {
        let content = self
            .templates
            .render(TemplateKind::Routes, &self.model_metadata())?;

        Ok(GeneratedFile {
            path: self.paths.routes.clone(),
            content,
            description: format!("Routes for /{}", self.model.plural_name),
        })
    }
}

/// Represents a generated file
#[derive(Debug)]
pub struct GeneratedFile {
    /// Relative path from project root
    pub path: PathBuf,
    /// File content
    pub content: String,
    /// File description for user feedback
    pub description: String,
}
