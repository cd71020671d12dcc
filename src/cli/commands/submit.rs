use crate::cli::AppContext;
use crate::survey::AnswerSheet;
use crate::ui::render;
use anyhow::Result;
use clap::Args;
use colored::*;
use std::path::PathBuf;

#[derive(Args)]
pub struct SubmitCommands {
    /// Answer sheet (.toml or .json)
    #[arg(short, long)]
    pub answers: PathBuf,
    /// Print the payload instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn submit_command(ctx: &AppContext, args: SubmitCommands) -> Result<()> {
    let sheet = AnswerSheet::load(&args.answers)?;

    let mut portal = ctx.portal()?;
    sheet.apply(portal.model_mut())?;

    if let Some(stakeholder) = portal.model().active_stakeholder() {
        println!(
            "{} {} ({}/{} answered)",
            "Answers for".bright_blue().bold(),
            stakeholder.name.bright_white().bold(),
            portal.model().answered_count(),
            portal.model().assigned_questions().len()
        );
    }

    if args.dry_run {
        println!("{}", portal.preview()?);
        println!("{}", "Dry run: nothing was sent.".dimmed());
        return Ok(());
    }

    let receipt = portal.submit().await?;
    render::print_submitted(&receipt);
    Ok(())
}
