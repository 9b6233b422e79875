//! `remove` command
//!
//! Deletes a model's generated files and unregisters it from both
//! aggregators. Missing files are reported and skipped.

use super::{
    display_path, print_diff, print_success, print_warning, read_optional, write_file, Outcome,
};
use crate::config::{CrudGenConfig, ProjectPaths};
use crate::confirm::Confirm;
use crate::model::ModelDescriptor;
use crate::patch::{patch, AggregatorSyntax, PatchMode, QueryRegistry, RouteRegistry};
use anyhow::{Context, Result};
use console::style;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Remove generated CRUD files and registrations for a model
pub struct RemoveCommand {
    model: String,
    project_root: PathBuf,
    dry_run: bool,
}

impl RemoveCommand {
    /// Create a command for `model`
    pub const fn new(model: String, project_root: PathBuf) -> Self {
        Self {
            model,
            project_root,
            dry_run: false,
        }
    }

    /// Only print what would change; no confirmation is asked
    #[must_use]
    pub const fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Execute the command, asking `confirm` before touching anything
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The model name is invalid
    /// - Configuration cannot be loaded
    /// - The confirmation cannot be read
    /// - A file exists but cannot be deleted, read or written
    pub fn execute(&self, confirm: &dyn Confirm) -> Result<Outcome> {
        let model = ModelDescriptor::parse::<&str>(&self.model, &[])?;
        let config = CrudGenConfig::load(&self.project_root)?;
        let paths = ProjectPaths::resolve(&self.project_root, &config.layout, &model);
        let queries = QueryRegistry::for_layout(&config.layout);
        let routes = RouteRegistry::for_layout(&config.layout);

        if self.dry_run {
            self.print_plan(&paths, &model, &queries, &routes)?;
            return Ok(Outcome::DryRun);
        }

        let prompt = format!(
            "Are you sure you want to delete model \"{}\" and all related files?",
            model.display_name
        );
        if !confirm.confirm(&prompt)? {
            println!("{}", style("Cancelled.").yellow());
            return Ok(Outcome::Cancelled);
        }

        for path in paths.model_files() {
            match fs::remove_file(path) {
                Ok(()) => {
                    tracing::info!(path = %path.display(), "Deleted file");
                    print_success(&format!("Deleted {}", style(self.display(path)).dim()));
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    tracing::warn!(path = %path.display(), "File not found, skipping");
                    print_warning(&format!("File not found (skipped): {}", self.display(path)));
                }
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("Failed to delete file: {}", path.display()));
                }
            }
        }

        self.unregister(&queries, &paths.db_registry, &model)?;
        self.unregister(&routes, &paths.route_registry, &model)?;

        println!(
            "\n{} Model {} and related files removed.",
            style("✨").green().bold(),
            style(&model.display_name).green().bold()
        );

        Ok(Outcome::Completed)
    }

    fn unregister<S: AggregatorSyntax>(
        &self,
        syntax: &S,
        path: &Path,
        model: &ModelDescriptor,
    ) -> Result<()> {
        let Some(original) = read_optional(path)? else {
            tracing::warn!(file = syntax.label(), path = %path.display(), "Aggregator not found, skipping");
            print_warning(&format!("{} not found (skipped)", self.display(path)));
            return Ok(());
        };

        let outcome = patch(syntax, &original, model, PatchMode::EnsureAbsent);
        if outcome.changed {
            write_file(path, &outcome.content)?;
            print_success(&format!("Updated {}", style(self.display(path)).dim()));
        } else {
            tracing::debug!(file = syntax.label(), model = %model.name, "Nothing registered");
        }
        Ok(())
    }

    fn print_plan(
        &self,
        paths: &ProjectPaths,
        model: &ModelDescriptor,
        queries: &QueryRegistry,
        routes: &RouteRegistry,
    ) -> Result<()> {
        println!("\n{}", style("Dry run, nothing deleted. Planned changes:").yellow().bold());
        for path in paths.model_files() {
            if path.exists() {
                println!("  {} {}", style("-").red(), style(self.display(path)).dim());
            } else {
                print_warning(&format!("File not found (would skip): {}", self.display(path)));
            }
        }

        for (label, path, new) in [
            (
                queries.label(),
                &paths.db_registry,
                read_optional(&paths.db_registry)?
                    .map(|text| (patch(queries, &text, model, PatchMode::EnsureAbsent), text)),
            ),
            (
                routes.label(),
                &paths.route_registry,
                read_optional(&paths.route_registry)?
                    .map(|text| (patch(routes, &text, model, PatchMode::EnsureAbsent), text)),
            ),
        ] {
            match new {
                Some((outcome, original)) if outcome.changed => {
                    print_diff(&self.display(path), &original, &outcome.content);
                }
                Some(_) => tracing::debug!(file = label, "Nothing registered"),
                None => print_warning(&format!("{} not found (would skip)", self.display(path))),
            }
        }
        Ok(())
    }

    fn display(&self, path: &Path) -> String {
        display_path(&self.project_root, path).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CreateCommand;
    use crate::confirm::FixedAnswer;
    use tempfile::tempdir;

    fn create(root: &Path) {
        CreateCommand::new(
            "Author".to_string(),
            vec!["name:string".to_string()],
            root.to_path_buf(),
        )
        .execute()
        .unwrap();
    }

    #[test]
    fn test_declined_touches_nothing() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        create(root);
        let db_before = fs::read_to_string(root.join("src/db/db.js")).unwrap();

        let outcome = RemoveCommand::new("Author".to_string(), root.to_path_buf())
            .execute(&FixedAnswer(false))
            .unwrap();

        assert_eq!(outcome, Outcome::Cancelled);
        assert!(root.join("src/db/queries/author.js").exists());
        assert_eq!(fs::read_to_string(root.join("src/db/db.js")).unwrap(), db_before);
    }

    #[test]
    fn test_missing_files_are_skipped() {
        let temp_dir = tempdir().unwrap();
        let outcome = RemoveCommand::new("ghost".to_string(), temp_dir.path().to_path_buf())
            .execute(&FixedAnswer(true))
            .unwrap();
        assert_eq!(outcome, Outcome::Completed);
        assert!(!temp_dir.path().join("src").exists());
    }

    #[test]
    fn test_unrelated_registry_is_not_rewritten() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        create(root);

        // Hand-maintained CRLF registry without a trailing newline that never
        // registered `author`
        let db = "import book from './queries/book.js';\r\n\r\nconst db = {\r\n  book,\r\n};\r\n\r\nexport default db;";
        fs::write(root.join("src/db/db.js"), db).unwrap();

        RemoveCommand::new("author".to_string(), root.to_path_buf())
            .execute(&FixedAnswer(true))
            .unwrap();

        assert_eq!(fs::read_to_string(root.join("src/db/db.js")).unwrap(), db);
    }

    #[test]
    fn test_dry_run_keeps_files() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        create(root);

        // A dry run never asks, so a "no" answer must not cancel it
        let outcome = RemoveCommand::new("author".to_string(), root.to_path_buf())
            .dry_run(true)
            .execute(&FixedAnswer(false))
            .unwrap();

        assert_eq!(outcome, Outcome::DryRun);
        assert!(root.join("src/routes/authors.js").exists());
        assert!(fs::read_to_string(root.join("src/db/db.js")).unwrap().contains("author,"));
    }
}
