//! `create` command
//!
//! Generates the query module, controller and route module for a model, then
//! registers the model in the db registry and the route registry.
//!
//! # Example
//!
//! ```bash
//! crudgen create author name:string age:int
//! ```

use super::{
    display_path, print_diff, print_success, read_optional, write_file, Outcome,
};
use crate::config::{CrudGenConfig, ProjectPaths};
use crate::error::CrudGenError;
use crate::model::ModelDescriptor;
use crate::patch::{patch, AggregatorSyntax, PatchMode, PatchOutcome, QueryRegistry, RouteRegistry};
use crate::scaffold::{GeneratedFile, ScaffoldGenerator};
use anyhow::{Context, Result};
use console::style;
use std::path::{Path, PathBuf};

/// Generate CRUD files for a model
pub struct CreateCommand {
    model: String,
    fields: Vec<String>,
    project_root: PathBuf,
    dry_run: bool,
}

impl CreateCommand {
    /// Create a command for `model` with `name:type` field specifications
    pub fn new(model: String, fields: Vec<String>, project_root: PathBuf) -> Self {
        Self {
            model,
            fields,
            project_root,
            dry_run: false,
        }
    }

    /// Only print what would change
    #[must_use]
    pub const fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The model name or a field specification is invalid, or no field is given
    /// - Any of the three per-model files already exists
    /// - Configuration cannot be loaded
    /// - A file cannot be read or written
    pub fn execute(&self) -> Result<Outcome> {
        let model = ModelDescriptor::parse_with_fields(&self.model, &self.fields)?;
        let config = CrudGenConfig::load(&self.project_root)?;
        let paths = ProjectPaths::resolve(&self.project_root, &config.layout, &model);

        for path in paths.model_files() {
            if path.exists() {
                tracing::debug!(path = %path.display(), "Refusing to overwrite");
                return Err(CrudGenError::FileExists {
                    path: path.to_path_buf(),
                }
                .into());
            }
        }

        println!(
            "\n{} {} {}",
            style("Generating CRUD for").cyan().bold(),
            style(&model.display_name).green().bold(),
            style("...").cyan().bold()
        );

        let generator = ScaffoldGenerator::new(model.clone(), &config.layout);
        let mut files = generator.generate().context("Failed to generate scaffold files")?;
        if !paths.pool.exists() {
            files.push(generator.generate_pool()?);
        }

        let db = Self::plan_patch(
            &QueryRegistry::for_layout(&config.layout),
            &paths.db_registry,
            &model,
        )?;
        let routes = Self::plan_patch(
            &RouteRegistry::for_layout(&config.layout),
            &paths.route_registry,
            &model,
        )?;

        if self.dry_run {
            self.print_plan(&files, &paths, [&db, &routes]);
            return Ok(Outcome::DryRun);
        }

        for file in &files {
            write_file(&self.project_root.join(&file.path), &file.content)?;
            print_success(&format!(
                "Created {} ({})",
                style(file.path.display()).dim(),
                style(&file.description).dim()
            ));
        }

        for plan in [&db, &routes] {
            if plan.outcome.changed {
                write_file(&plan.path, &plan.outcome.content)?;
                print_success(&format!(
                    "Updated {}",
                    style(display_path(&self.project_root, &plan.path)).dim()
                ));
            } else {
                tracing::debug!(path = %plan.path.display(), "Aggregator already up to date");
            }
        }

        println!(
            "\n{} CRUD for model {} generated successfully!",
            style("✨").green().bold(),
            style(&model.display_name).green().bold()
        );

        Ok(Outcome::Completed)
    }

    /// Patch an aggregator in memory; a missing file starts out empty
    fn plan_patch<S: AggregatorSyntax>(
        syntax: &S,
        path: &Path,
        model: &ModelDescriptor,
    ) -> Result<AggregatorPlan> {
        let original = read_optional(path)?;
        if original.is_none() {
            tracing::debug!(file = syntax.label(), path = %path.display(), "Creating aggregator from scratch");
        }
        let original = original.unwrap_or_default();
        let outcome = patch(syntax, &original, model, PatchMode::EnsurePresent);

        Ok(AggregatorPlan {
            path: path.to_path_buf(),
            original,
            outcome,
        })
    }

    fn print_plan(&self, files: &[GeneratedFile], paths: &ProjectPaths, plans: [&AggregatorPlan; 2]) {
        println!("\n{}", style("Dry run, nothing written. Planned changes:").yellow().bold());
        for file in files {
            println!(
                "  {} {} ({})",
                style("+").green(),
                style(file.path.display()).dim(),
                style(&file.description).dim()
            );
        }
        for plan in plans {
            if plan.outcome.changed {
                print_diff(
                    &display_path(&self.project_root, &plan.path),
                    &plan.original,
                    &plan.outcome.content,
                );
            }
        }
        tracing::debug!(?paths, "Dry run finished");
    }
}

/// Pending aggregator update
struct AggregatorPlan {
    path: PathBuf,
    original: String,
    outcome: PatchOutcome,
}
