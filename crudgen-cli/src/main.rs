//! crudgen CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use crudgen_cli_lib::{observability, CreateCommand, FixedAnswer, InteractiveConfirm, RemoveCommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "crudgen")]
#[command(version)]
#[command(about = "CRUD generator CLI tool", long_about = None)]
struct Cli {
    /// Project root (default: current directory)
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    project_dir: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate CRUD files for a model
    Create {
        /// Model name (e.g., `author`, `Author`)
        model: String,
        /// Field definitions (e.g., `name:string`, `age:int`); type defaults to string
        #[arg(value_name = "FIELD:TYPE")]
        fields: Vec<String>,
        /// Show what would be written without touching any file
        #[arg(long)]
        dry_run: bool,
    },
    /// Remove generated CRUD files and references for a model
    Remove {
        /// Model name
        model: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
        /// Show what would be deleted without touching any file
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    observability::init(cli.verbose)?;

    let project_root = match cli.project_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    match cli.command {
        Commands::Create {
            model,
            fields,
            dry_run,
        } => {
            CreateCommand::new(model, fields, project_root)
                .dry_run(dry_run)
                .execute()?;
        }
        Commands::Remove {
            model,
            yes,
            dry_run,
        } => {
            let cmd = RemoveCommand::new(model, project_root).dry_run(dry_run);
            if yes {
                cmd.execute(&FixedAnswer(true))?;
            } else {
                cmd.execute(&InteractiveConfirm)?;
            }
        }
    }

    Ok(())
}
