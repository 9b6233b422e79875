//! End-to-end tests running the `crudgen` binary

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn crudgen(root: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_crudgen"))
        .current_dir(root)
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("run crudgen");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("write stdin");

    child.wait_with_output().expect("wait for crudgen")
}

fn combined(output: &Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

#[test]
fn cli_create_then_remove() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    let output = crudgen(root, &["create", "TestModel", "name:string"], "");
    assert!(output.status.success(), "create failed:\n{}", combined(&output));
    assert!(root.join("src/routes/testmodels.js").exists());
    assert!(root.join("src/controllers/testmodelController.js").exists());
    assert!(root.join("src/db/queries/testmodel.js").exists());

    let output = crudgen(root, &["remove", "TestModel"], "y\n");
    assert!(output.status.success(), "remove failed:\n{}", combined(&output));
    assert!(!root.join("src/routes/testmodels.js").exists());
    assert!(!root.join("src/controllers/testmodelController.js").exists());
    assert!(!root.join("src/db/queries/testmodel.js").exists());
}

#[test]
fn cli_create_without_fields_exits_one() {
    let temp_dir = TempDir::new().unwrap();
    let output = crudgen(temp_dir.path(), &["create", "author"], "");
    assert_eq!(output.status.code(), Some(1));
    assert!(combined(&output).contains("At least one field"));
}

#[test]
fn cli_create_conflict_names_path() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    assert!(crudgen(root, &["create", "author", "name"], "").status.success());
    let output = crudgen(root, &["create", "author", "name"], "");
    assert_eq!(output.status.code(), Some(1));
    assert!(combined(&output).contains("authors.js"), "{}", combined(&output));
}

#[test]
fn cli_remove_declined_exits_zero() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    assert!(crudgen(root, &["create", "author", "name"], "").status.success());

    let output = crudgen(root, &["remove", "author"], "n\n");
    assert!(output.status.success());
    assert!(combined(&output).contains("Cancelled"));
    assert!(root.join("src/db/queries/author.js").exists());
}

#[test]
fn cli_remove_missing_files_warns() {
    let temp_dir = TempDir::new().unwrap();
    let output = crudgen(temp_dir.path(), &["remove", "--yes", "ghost"], "");
    assert!(output.status.success());
    assert!(combined(&output).contains("File not found (skipped)"));
}

#[test]
fn cli_project_dir_flag() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let project = root.join("app");

    let output = crudgen(
        root,
        &["-C", project.to_str().unwrap(), "create", "author", "name"],
        "",
    );
    assert!(output.status.success(), "{}", combined(&output));
    assert!(project.join("src/db/db.js").exists());
}
