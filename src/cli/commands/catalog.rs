use crate::cli::AppContext;
use crate::survey::Catalog;
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct CatalogCommands {
    #[command(subcommand)]
    pub command: CatalogSubcommands,
}

#[derive(Subcommand)]
pub enum CatalogSubcommands {
    /// Check a catalog file and summarize it
    Validate {
        /// Catalog file
        path: PathBuf,
    },
    /// Print the active catalog as TOML
    Export,
}

/// `load_context` is only called for subcommands that need the active catalog,
/// so a broken configured catalog can still be checked with `validate`.
pub fn catalog_command(args: CatalogCommands, load_context: impl FnOnce() -> Result<AppContext>) -> Result<()> {
    match args.command {
        CatalogSubcommands::Validate { path } => validate(&path),
        CatalogSubcommands::Export => {
            let ctx = load_context()?;
            let content = toml::to_string_pretty(ctx.catalog.as_ref())
                .context("Failed to serialize catalog to TOML")?;
            print!("{}", content);
            Ok(())
        }
    }
}

fn validate(path: &Path) -> Result<()> {
    let catalog = Catalog::load(path)?;

    println!(
        "{} {:?} is valid: {} stakeholders, {} questions",
        "✓".bright_green().bold(),
        path,
        catalog.stakeholders().len(),
        catalog.questions().len()
    );

    for stakeholder in catalog.stakeholders() {
        let count = catalog.questions_for(stakeholder.id).len();
        let line = format!("  {:>3}  {:<28} {} questions", stakeholder.id, stakeholder.name, count);
        if count == 0 {
            println!("{}", line.bright_yellow());
        } else {
            println!("{}", line);
        }
    }

    let unassigned = catalog.unassigned_stakeholders();
    if !unassigned.is_empty() {
        println!(
            "  {}",
            format!("⚠️  {} stakeholder(s) have no questions assigned", unassigned.len())
                .bright_yellow()
                .bold()
        );
    }

    Ok(())
}
