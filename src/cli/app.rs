use super::commands::catalog::CatalogCommands;
use super::commands::settings::SettingsCommands;
use super::commands::submit::SubmitCommands;
use super::commands::take::TakeCommands;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "survey-portal")]
#[command(about = "Collect stakeholder survey answers and submit them to an analytics endpoint")]
pub struct Cli {
    /// Catalog file to use instead of the configured or built-in one
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Submission endpoint URL, overrides environment and config
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List stakeholders in the catalog
    Stakeholders,
    /// List the questions assigned to a stakeholder
    Questions {
        /// Stakeholder id
        stakeholder: u32,
    },
    /// Fill in the survey interactively
    Take(TakeCommands),
    /// Submit a prepared answer sheet
    Submit(SubmitCommands),
    /// Catalog file tools
    Catalog(CatalogCommands),
    /// Application settings management
    Settings(SettingsCommands),
}
