//! Interactive survey session
//!
//! Walks the respondent through stakeholder selection and every assigned
//! question, then loops on a small menu until the answers are submitted or
//! the respondent leaves. A failed submission keeps every answer in place.

use crate::api::SubmissionTransport;
use crate::cli::AppContext;
use crate::portal::SurveyPortal;
use crate::survey::{Question, StakeholderId};
use crate::ui::prompts::{self, SessionAction};
use crate::ui::render;
use anyhow::Result;
use clap::Args;
use colored::*;
use is_terminal::IsTerminal;
use log::{info, warn};

#[derive(Args)]
pub struct TakeCommands {
    /// Start directly as this stakeholder
    #[arg(short, long)]
    pub stakeholder: Option<u32>,
    /// Print the payload instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}

enum SessionOutcome {
    Submitted,
    ChangeUser,
    Quit,
}

pub async fn take_command(ctx: &AppContext, args: TakeCommands) -> Result<()> {
    if !std::io::stdin().is_terminal() {
        anyhow::bail!(
            "The interactive survey needs a terminal. Use 'survey-portal submit --answers <FILE>' instead"
        );
    }

    let mut portal = ctx.portal()?;
    if portal.endpoint().is_none() && !args.dry_run {
        println!(
            "{}",
            "⚠️  No submission endpoint configured. You can fill in the survey but submitting will fail."
                .bright_yellow()
        );
    }

    let mut preselected = args.stakeholder.map(StakeholderId);

    loop {
        let id = match preselected.take() {
            Some(id) => id,
            None => prompts::prompt_stakeholder_selection(portal.model().list_stakeholders())?,
        };
        if !begin_session(&mut portal, id) {
            continue;
        }

        let questions: Vec<Question> = portal
            .model()
            .assigned_questions()
            .into_iter()
            .cloned()
            .collect();

        if let Some(stakeholder) = portal.model().active_stakeholder() {
            println!();
            println!(
                "{} {}",
                "Survey for".bright_blue().bold(),
                stakeholder.name.bright_white().bold()
            );
        }

        if questions.is_empty() {
            render::print_no_questions();
            portal.model_mut().reset_session();
            if prompts::prompt_confirmation("Choose another user?", true)? {
                continue;
            }
            break;
        }

        for (index, question) in questions.iter().enumerate() {
            answer_question(&mut portal, question, index + 1, questions.len())?;
        }

        match run_session_menu(&mut portal, &questions, args.dry_run).await? {
            SessionOutcome::Submitted => {
                if !prompts::prompt_confirmation("Start another survey?", true)? {
                    break;
                }
            }
            SessionOutcome::ChangeUser => continue,
            SessionOutcome::Quit => break,
        }
    }

    info!("Interactive session finished");
    Ok(())
}

/// Select `id` for a new session. An unknown id is reported and the caller
/// falls back to the stakeholder picker.
fn begin_session<T: SubmissionTransport>(portal: &mut SurveyPortal<T>, id: StakeholderId) -> bool {
    match portal.model_mut().select_stakeholder(id) {
        Ok(()) => true,
        Err(err) => {
            warn!("Stakeholder selection failed: {}", err);
            render::print_error(&err);
            false
        }
    }
}

fn answer_question<T: SubmissionTransport>(
    portal: &mut SurveyPortal<T>,
    question: &Question,
    position: usize,
    total: usize,
) -> Result<()> {
    render::print_question_header(question, position, total);

    let model = portal.model_mut();
    let response = prompts::prompt_response(model.response(question.id))?;
    model.set_response(question.id, response)?;

    match prompts::prompt_maturity(model.maturity(question.id))? {
        Some(level) => model.set_maturity(question.id, level)?,
        None => model.clear_maturity(question.id)?,
    }

    let notes = prompts::prompt_notes(model.notes(question.id))?;
    model.set_notes(question.id, notes)?;
    Ok(())
}

async fn run_session_menu<T: SubmissionTransport>(
    portal: &mut SurveyPortal<T>,
    questions: &[Question],
    dry_run: bool,
) -> Result<SessionOutcome> {
    loop {
        match prompts::prompt_session_action()? {
            SessionAction::Submit => {
                if dry_run {
                    println!("{}", portal.preview()?);
                    println!("{}", "Dry run: nothing was sent.".dimmed());
                    continue;
                }

                match portal.submit().await {
                    Ok(receipt) => {
                        render::print_submitted(&receipt);
                        return Ok(SessionOutcome::Submitted);
                    }
                    Err(err) => {
                        warn!("Submission failed: {}", err);
                        render::print_error(&err);
                        println!("{}", "Your answers are kept. You can retry.".dimmed());
                    }
                }
            }
            SessionAction::Review => render::print_review(portal.model()),
            SessionAction::EditAnswers => {
                let refs: Vec<&Question> = questions.iter().collect();
                let index = prompts::prompt_question_selection(&refs)?;
                answer_question(portal, &questions[index], index + 1, questions.len())?;
            }
            SessionAction::ChangeUser => {
                if confirm_discard(portal)? {
                    portal.model_mut().reset_session();
                    return Ok(SessionOutcome::ChangeUser);
                }
            }
            SessionAction::Quit => {
                if confirm_discard(portal)? {
                    portal.model_mut().reset_session();
                    return Ok(SessionOutcome::Quit);
                }
            }
        }
    }
}

fn confirm_discard<T: SubmissionTransport>(portal: &SurveyPortal<T>) -> Result<bool> {
    if portal.model().answered_count() == 0 {
        return Ok(true);
    }
    prompts::prompt_confirmation("Discard your unsubmitted answers?", false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SubmissionClient;
    use crate::survey::{Catalog, SurveyModel};
    use std::sync::Arc;
    use std::time::Duration;

    fn portal() -> SurveyPortal<SubmissionClient> {
        let model = SurveyModel::new(Arc::new(Catalog::builtin().unwrap()));
        let client = SubmissionClient::new(Duration::from_secs(1)).unwrap();
        SurveyPortal::new(model, None, client)
    }

    #[test]
    fn test_unknown_preselected_stakeholder_falls_back() {
        let mut portal = portal();
        assert!(!begin_session(&mut portal, StakeholderId(99)));
        assert!(portal.model().active_stakeholder().is_none());

        assert!(begin_session(&mut portal, StakeholderId(4)));
        assert_eq!(portal.model().active_stakeholder().unwrap().id, StakeholderId(4));
    }
}
