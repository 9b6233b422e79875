//! Integration tests for the create/remove lifecycle

use crudgen_cli_lib::{
    CreateCommand, CrudGenError, FixedAnswer, ModelDescriptor, Outcome, RemoveCommand,
};
use proptest::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn create(root: &Path, model: &str, fields: &[&str]) -> anyhow::Result<Outcome> {
    CreateCommand::new(
        model.to_string(),
        fields.iter().map(ToString::to_string).collect(),
        root.to_path_buf(),
    )
    .execute()
}

fn remove(root: &Path, model: &str, answer: bool) -> anyhow::Result<Outcome> {
    RemoveCommand::new(model.to_string(), root.to_path_buf()).execute(&FixedAnswer(answer))
}

fn read(root: &Path, path: &str) -> String {
    fs::read_to_string(root.join(path)).unwrap()
}

const MODEL_FILES: [&str; 3] = [
    "src/routes/authors.js",
    "src/controllers/authorController.js",
    "src/db/queries/author.js",
];

/// `create author name:string age:int` on an empty project
#[test]
fn test_create_author_example() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    assert_eq!(create(root, "author", &["name:string", "age:int"]).unwrap(), Outcome::Completed);

    for file in MODEL_FILES {
        assert!(root.join(file).exists(), "File should exist: {file}");
    }

    let query = read(root, "src/db/queries/author.js");
    for op in ["getAll", "getById", "create", "update", "delete"] {
        assert!(query.contains(&format!("  {op}: async")), "Query module should expose {op}");
    }

    assert_eq!(
        read(root, "src/db/db.js"),
        "import author from './queries/author.js';\n\nconst db = {\n  author,\n};\n\nexport default db;\n"
    );
    assert_eq!(
        read(root, "src/routes/index.js"),
        "import authorsRoutes from './authors.js';\n\nfunction registerRoutes(app, apiV) {\n  app.use(`/api/${apiV}/authors`, authorsRoutes);\n}\n\nexport default registerRoutes;\n"
    );
}

#[test]
fn test_create_twice_fails() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    create(root, "author", &["name"]).unwrap();
    let db_before = read(root, "src/db/db.js");

    let err = create(root, "author", &["name"]).unwrap_err();
    match err.downcast_ref::<CrudGenError>() {
        Some(CrudGenError::FileExists { path }) => {
            assert!(path.ends_with("src/routes/authors.js"), "unexpected conflict: {}", path.display());
        }
        other => panic!("expected FileExists, got {other:?}"),
    }
    assert_eq!(read(root, "src/db/db.js"), db_before);
}

#[test]
fn test_single_conflicting_file_blocks_create() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("src/db/queries")).unwrap();
    fs::write(root.join("src/db/queries/author.js"), "// hand written\n").unwrap();

    assert!(create(root, "author", &["name"]).is_err());
    assert!(!root.join("src/routes/authors.js").exists());
    assert_eq!(read(root, "src/db/queries/author.js"), "// hand written\n");
}

#[test]
fn test_remove_confirmed() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create(root, "book", &["title"]).unwrap();
    create(root, "author", &["name:string", "age:int"]).unwrap();

    assert_eq!(remove(root, "author", true).unwrap(), Outcome::Completed);

    for file in MODEL_FILES {
        assert!(!root.join(file).exists(), "File should be deleted: {file}");
    }
    assert_eq!(
        read(root, "src/db/db.js"),
        "import book from './queries/book.js';\n\nconst db = {\n  book,\n};\n\nexport default db;\n"
    );
    let routes = read(root, "src/routes/index.js");
    assert!(!routes.contains("authors"));
    assert!(routes.contains("app.use(`/api/${apiV}/books`, booksRoutes);"));
}

#[test]
fn test_remove_declined() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create(root, "author", &["name"]).unwrap();
    let db_before = read(root, "src/db/db.js");
    let routes_before = read(root, "src/routes/index.js");

    assert_eq!(remove(root, "author", false).unwrap(), Outcome::Cancelled);

    for file in MODEL_FILES {
        assert!(root.join(file).exists(), "File should be kept: {file}");
    }
    assert_eq!(read(root, "src/db/db.js"), db_before);
    assert_eq!(read(root, "src/routes/index.js"), routes_before);
}

#[test]
fn test_remove_preserves_hand_written_code() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("src/routes")).unwrap();
    let index = "import express from 'express';\n\nfunction registerRoutes(app, apiV) {\n  app.get('/health', (req, res) => res.send('ok'));\n}\n\nexport default registerRoutes;\n";
    fs::write(root.join("src/routes/index.js"), index).unwrap();

    create(root, "author", &["name"]).unwrap();
    remove(root, "author", true).unwrap();

    assert_eq!(read(root, "src/routes/index.js"), index);
}

#[test]
fn test_crudgen_toml_layout() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(
        root.join("crudgen.toml"),
        "[layout]\nroutes_dir = \"server/routes\"\nroute_registry = \"server/routes/index.js\"\n",
    )
    .unwrap();

    create(root, "author", &["name"]).unwrap();

    assert!(root.join("server/routes/authors.js").exists());
    assert!(root.join("server/routes/index.js").exists());
    assert!(read(root, "server/routes/authors.js").contains("from '../../src/controllers/authorController.js';"));
}

fn model_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,10}".prop_filter("usable model name", |n| {
        ModelDescriptor::parse::<&str>(n, &[]).is_ok()
    })
}

#[test]
fn test_registry_imports_follow_layout() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(
        root.join("crudgen.toml"),
        "[layout]\nqueries_dir = \"src/db/sql\"\nroutes_dir = \"src/api\"\n",
    )
    .unwrap();

    create(root, "author", &["name"]).unwrap();
    assert!(root.join("src/db/sql/author.js").exists());
    assert!(root.join("src/api/authors.js").exists());

    let db = read(root, "src/db/db.js");
    assert!(db.contains("import author from './sql/author.js';"), "{db}");
    let routes = read(root, "src/routes/index.js");
    assert!(routes.contains("import authorsRoutes from '../api/authors.js';"), "{routes}");

    remove(root, "author", true).unwrap();
    assert!(!read(root, "src/db/db.js").contains("author"));
    assert!(!read(root, "src/routes/index.js").contains("authors"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// create → remove → create leaves the aggregators exactly as after the first create
    #[test]
    fn prop_create_remove_create(name in model_name(), others in prop::collection::vec(model_name(), 0..3)) {
        prop_assume!(!others.contains(&name));
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        let mut registered = Vec::new();
        for other in &others {
            if !registered.contains(other) {
                create(root, other, &["title"]).unwrap();
                registered.push(other.clone());
            }
        }

        create(root, &name, &["title"]).unwrap();
        let db_first = read(root, "src/db/db.js");
        let routes_first = read(root, "src/routes/index.js");

        remove(root, &name, true).unwrap();
        let import = format!("import {name} from './queries/{name}.js';");
        prop_assert!(!read(root, "src/db/db.js").contains(&import));

        create(root, &name, &["title"]).unwrap();
        prop_assert_eq!(read(root, "src/db/db.js"), db_first);
        prop_assert_eq!(read(root, "src/routes/index.js"), routes_first);
    }
}
