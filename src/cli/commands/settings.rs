use crate::api::constants::ENDPOINT_ENV_VAR;
use crate::config::Config;
use anyhow::Result;
use clap::{Args, Subcommand};
use colored::*;
use std::path::PathBuf;

#[derive(Args)]
pub struct SettingsCommands {
    #[command(subcommand)]
    pub command: SettingsSubcommands,
}

#[derive(Subcommand)]
pub enum SettingsSubcommands {
    /// Show current settings
    Show,
    /// Set the submission endpoint URL
    SetEndpoint {
        /// Absolute http(s) URL
        url: String,
    },
    /// Remove the configured submission endpoint
    ClearEndpoint,
    /// Set the submission request timeout
    SetTimeout {
        /// Timeout in seconds
        secs: u64,
    },
    /// Use a catalog file instead of the built-in catalog
    SetCatalog {
        /// Catalog file
        path: PathBuf,
    },
    /// Go back to the built-in catalog
    ClearCatalog,
}

pub fn settings_command(mut config: Config, args: SettingsCommands) -> Result<()> {
    match args.command {
        SettingsSubcommands::Show => {
            show(&config);
            Ok(())
        }
        SettingsSubcommands::SetEndpoint { url } => {
            config.set_endpoint(url)?;
            done("Submission endpoint saved");
            Ok(())
        }
        SettingsSubcommands::ClearEndpoint => {
            config.clear_endpoint()?;
            done("Submission endpoint cleared");
            Ok(())
        }
        SettingsSubcommands::SetTimeout { secs } => {
            config.set_timeout_secs(secs)?;
            done(&format!("Submission timeout set to {}s", secs));
            Ok(())
        }
        SettingsSubcommands::SetCatalog { path } => {
            // Refuse files that would break every later command
            crate::survey::Catalog::load(&path)?;
            config.set_catalog_path(path)?;
            done("Catalog path saved");
            Ok(())
        }
        SettingsSubcommands::ClearCatalog => {
            config.clear_catalog_path()?;
            done("Using the built-in catalog");
            Ok(())
        }
    }
}

fn show(config: &Config) {
    println!("{}", "Settings".bright_blue().bold());
    if let Some(path) = config.path() {
        println!("  {:<18} {}", "Config file:".dimmed(), path.display());
    }

    match &config.submission.endpoint {
        Some(url) => println!("  {:<18} {}", "Endpoint:".dimmed(), url),
        None => println!("  {:<18} {}", "Endpoint:".dimmed(), "(not set)".bright_yellow()),
    }
    if std::env::var(ENDPOINT_ENV_VAR).is_ok_and(|v| !v.trim().is_empty()) {
        println!(
            "  {}",
            format!("{} is set and takes precedence over the config file", ENDPOINT_ENV_VAR).dimmed()
        );
    }

    println!("  {:<18} {}s", "Timeout:".dimmed(), config.submission.timeout_secs);

    match &config.catalog.path {
        Some(path) => println!("  {:<18} {}", "Catalog:".dimmed(), path.display()),
        None => println!("  {:<18} {}", "Catalog:".dimmed(), "built-in"),
    }
}

fn done(message: &str) {
    println!("{} {}", "✓".bright_green().bold(), message);
}
