//! CLI command implementations

pub mod create;
pub mod remove;

pub use create::CreateCommand;
pub use remove::RemoveCommand;

use anyhow::{Context, Result};
use console::{style, Emoji};
use similar::{ChangeTag, TextDiff};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

static SUCCESS: Emoji = Emoji("✓", "√");
static WARNING: Emoji = Emoji("⚠", "!");

/// How a command finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Files were written or deleted
    Completed,
    /// Nothing was touched; changes were only printed
    DryRun,
    /// The user declined the confirmation
    Cancelled,
}

/// Read `path`, or `None` if it does not exist
fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read file: {}", path.display())),
    }
}

/// Write `content` to `path`, creating parent directories
fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = content.len(), "Wrote file");
    Ok(())
}

/// Project-relative display form of `path`
fn display_path<'a>(root: &Path, path: &'a Path) -> std::borrow::Cow<'a, str> {
    path.strip_prefix(root).unwrap_or(path).to_string_lossy()
}

fn print_success(message: &str) {
    println!("  {} {}", style(SUCCESS).green(), message);
}

fn print_warning(message: &str) {
    println!("  {} {}", style(WARNING).yellow(), style(message).yellow());
}

/// Print a unified diff between `old` and `new` for dry runs
fn print_diff(label: &str, old: &str, new: &str) {
    let diff = TextDiff::from_lines(old, new);

    println!("  {} {}", style("~").cyan(), style(label).bold());
    for hunk in diff.unified_diff().context_radius(2).iter_hunks() {
        println!("    {}", style(hunk.header()).cyan());
        for change in hunk.iter_changes() {
            let line = change.value().trim_end_matches('\n');
            match change.tag() {
                ChangeTag::Delete => println!("    {}", style(format!("-{line}")).red()),
                ChangeTag::Insert => println!("    {}", style(format!("+{line}")).green()),
                ChangeTag::Equal => println!("    {}", style(format!(" {line}")).dim()),
            }
        }
    }
}
