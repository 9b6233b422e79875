//! Project layout configuration
//!
//! The directory convention of the target project is an explicit value rather
//! than hard-coded path joins. Configuration is loaded from multiple sources
//! with clear precedence:
//!
//! 1. Environment variables (highest priority, `CRUDGEN_` prefix, nested keys
//!    separated by `__`, e.g. `CRUDGEN_LAYOUT__ROUTES_DIR=api/routes`)
//! 2. `./crudgen.toml` in the project root
//! 3. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # crudgen.toml
//! [layout]
//! routes_dir = "src/routes"
//! controllers_dir = "src/controllers"
//! queries_dir = "src/db/queries"
//! db_registry = "src/db/db.js"
//! route_registry = "src/routes/index.js"
//! pool = "src/db/pool.js"
//! ```

use crate::error::{CrudGenError, Result};
use crate::model::ModelDescriptor;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the optional configuration file in the project root
pub const CONFIG_FILE: &str = "crudgen.toml";

/// Project-relative locations of generated and patched files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectLayout {
    /// Directory holding per-model route modules
    pub routes_dir: PathBuf,
    /// Directory holding per-model controllers
    pub controllers_dir: PathBuf,
    /// Directory holding per-model query modules
    pub queries_dir: PathBuf,
    /// Query registry aggregator (`db.js`)
    pub db_registry: PathBuf,
    /// Route registry aggregator (`routes/index.js`)
    pub route_registry: PathBuf,
    /// Shared connection pool module
    pub pool: PathBuf,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            routes_dir: PathBuf::from("src/routes"),
            controllers_dir: PathBuf::from("src/controllers"),
            queries_dir: PathBuf::from("src/db/queries"),
            db_registry: PathBuf::from("src/db/db.js"),
            route_registry: PathBuf::from("src/routes/index.js"),
            pool: PathBuf::from("src/db/pool.js"),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrudGenConfig {
    /// File layout of the target project
    pub layout: ProjectLayout,
}

impl CrudGenConfig {
    /// Load configuration for the project rooted at `project_root`
    ///
    /// # Errors
    ///
    /// Returns [`CrudGenError::Config`] if `crudgen.toml` or the environment
    /// contain values of the wrong shape.
    pub fn load(project_root: &Path) -> Result<Self> {
        Self::figment(project_root)
            .extract()
            .map_err(|e| CrudGenError::Config(Box::new(e)))
    }

    /// Provider chain used by [`load`](Self::load)
    #[must_use]
    pub fn figment(project_root: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(project_root.join(CONFIG_FILE)))
            .merge(Env::prefixed("CRUDGEN_").split("__"))
    }
}

/// Absolute paths touched by a create/remove run for one model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    /// `<routes_dir>/<plural>.js`
    pub routes: PathBuf,
    /// `<controllers_dir>/<name>Controller.js`
    pub controller: PathBuf,
    /// `<queries_dir>/<name>.js`
    pub query: PathBuf,
    /// Query registry aggregator
    pub db_registry: PathBuf,
    /// Route registry aggregator
    pub route_registry: PathBuf,
    /// Shared pool module
    pub pool: PathBuf,
}

impl ProjectPaths {
    /// Resolve all paths for `model` under `project_root`
    #[must_use]
    pub fn resolve(project_root: &Path, layout: &ProjectLayout, model: &ModelDescriptor) -> Self {
        let paths = Self {
            routes: project_root
                .join(&layout.routes_dir)
                .join(format!("{}.js", model.plural_name)),
            controller: project_root
                .join(&layout.controllers_dir)
                .join(format!("{}Controller.js", model.name)),
            query: project_root
                .join(&layout.queries_dir)
                .join(format!("{}.js", model.name)),
            db_registry: project_root.join(&layout.db_registry),
            route_registry: project_root.join(&layout.route_registry),
            pool: project_root.join(&layout.pool),
        };
        tracing::debug!(?paths, model = %model.name, "Resolved project paths");
        paths
    }

    /// The three files owned by a single model
    #[must_use]
    pub fn model_files(&self) -> [&Path; 3] {
        [&self.routes, &self.controller, &self.query]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn author() -> ModelDescriptor {
        ModelDescriptor::parse("Author", &["name:string"]).unwrap()
    }

    #[test]
    fn test_default_layout_paths() {
        let paths = ProjectPaths::resolve(Path::new("/proj"), &ProjectLayout::default(), &author());
        assert_eq!(paths.routes, PathBuf::from("/proj/src/routes/authors.js"));
        assert_eq!(paths.controller, PathBuf::from("/proj/src/controllers/authorController.js"));
        assert_eq!(paths.query, PathBuf::from("/proj/src/db/queries/author.js"));
        assert_eq!(paths.db_registry, PathBuf::from("/proj/src/db/db.js"));
        assert_eq!(paths.route_registry, PathBuf::from("/proj/src/routes/index.js"));
        assert_eq!(paths.pool, PathBuf::from("/proj/src/db/pool.js"));
    }

    #[test]
    fn test_custom_layout_paths() {
        let layout = ProjectLayout {
            routes_dir: PathBuf::from("api/routes"),
            ..ProjectLayout::default()
        };
        let paths = ProjectPaths::resolve(Path::new("/proj"), &layout, &author());
        assert_eq!(paths.routes, PathBuf::from("/proj/api/routes/authors.js"));
    }

    #[test]
    fn test_load_defaults_without_file() {
        Jail::expect_with(|jail| {
            let config: CrudGenConfig = CrudGenConfig::figment(jail.directory()).extract()?;
            assert_eq!(config, CrudGenConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_from_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                [layout]
                routes_dir = "lib/routes"
                pool = "lib/pool.js"
                "#,
            )?;

            let config: CrudGenConfig = CrudGenConfig::figment(jail.directory()).extract()?;
            assert_eq!(config.layout.routes_dir, PathBuf::from("lib/routes"));
            assert_eq!(config.layout.pool, PathBuf::from("lib/pool.js"));
            assert_eq!(config.layout.queries_dir, PathBuf::from("src/db/queries"));
            Ok(())
        });
    }
}
