use anyhow::Result;
use clap::Parser;
use log::info;

use survey_portal::cli::app::Commands;
use survey_portal::cli::{self, AppContext, Cli};
use survey_portal::config::Config;
use survey_portal::ui::render;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        log::error!("{:#}", err);
        render::print_error(&format!("{:#}", err));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logger to file (truncate on each run)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("survey-portal.log")?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    // Pick up SURVEY_SHEET_API_URL from a local .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    info!("Starting survey-portal");

    let config = Config::load()?;
    let catalog_override = cli.catalog.clone();
    let endpoint_override = cli.endpoint.clone();
    let load_context =
        move |config: Config| AppContext::new(config, catalog_override.as_deref(), endpoint_override.as_deref());

    match cli.command {
        Commands::Settings(args) => cli::commands::settings_command(config, args)?,
        Commands::Catalog(args) => cli::commands::catalog_command(args, || load_context(config))?,
        Commands::Stakeholders => cli::commands::stakeholders_command(&load_context(config)?)?,
        Commands::Questions { stakeholder } => {
            cli::commands::questions_command(&load_context(config)?, stakeholder)?
        }
        Commands::Take(args) => cli::commands::take_command(&load_context(config)?, args).await?,
        Commands::Submit(args) => cli::commands::submit_command(&load_context(config)?, args).await?,
    }

    Ok(())
}
