use crate::survey::{MaturityLevel, Question, Stakeholder, StakeholderId};
use anyhow::Result;
use dialoguer::{Input, Select};

/// What to do once every question has been visited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Submit,
    Review,
    EditAnswers,
    ChangeUser,
    Quit,
}

impl SessionAction {
    const ALL: [SessionAction; 5] = [
        SessionAction::Submit,
        SessionAction::Review,
        SessionAction::EditAnswers,
        SessionAction::ChangeUser,
        SessionAction::Quit,
    ];

    fn label(self) -> &'static str {
        match self {
            SessionAction::Submit => "Submit answers",
            SessionAction::Review => "Review answers",
            SessionAction::EditAnswers => "Edit answers",
            SessionAction::ChangeUser => "Change user",
            SessionAction::Quit => "Quit",
        }
    }
}

pub fn prompt_stakeholder_selection(stakeholders: &[Stakeholder]) -> Result<StakeholderId> {
    let items: Vec<String> = stakeholders
        .iter()
        .map(|s| format!("{} - {}", s.name, s.role))
        .collect();

    let selection = Select::new()
        .with_prompt("Select your name to begin")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(stakeholders[selection].id)
}

pub fn prompt_response(current: Option<&str>) -> Result<String> {
    text_field("Response", current)
}

pub fn prompt_notes(current: Option<&str>) -> Result<String> {
    text_field("Notes", current)
}

/// Maturity picker. `None` means the respondent left it unanswered.
pub fn prompt_maturity(current: Option<MaturityLevel>) -> Result<Option<u8>> {
    let mut items = vec!["Leave unanswered".to_string()];
    items.extend(
        MaturityLevel::ALL
            .iter()
            .map(|level| format!("{} - {}", level.value(), level.label())),
    );

    let default_index = current.map(|level| level.value() as usize).unwrap_or(0);

    let selection = Select::new()
        .with_prompt("Maturity")
        .items(&items)
        .default(default_index)
        .interact()?;

    Ok(match selection {
        0 => None,
        index => Some(index as u8),
    })
}

/// Pick one question to revisit
pub fn prompt_question_selection(questions: &[&Question]) -> Result<usize> {
    let items: Vec<String> = questions
        .iter()
        .map(|q| format!("[{} / {}] {}", q.topic, q.area, q.text))
        .collect();

    let selection = Select::new()
        .with_prompt("Which question?")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(selection)
}

pub fn prompt_session_action() -> Result<SessionAction> {
    let items: Vec<&str> = SessionAction::ALL.iter().map(|a| a.label()).collect();

    let selection = Select::new()
        .with_prompt("What next?")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(SessionAction::ALL[selection])
}

/// Interactive confirmation prompt using arrow-key navigable selection
///
/// # Arguments
/// * `prompt` - The question to ask the user
/// * `default_yes` - Whether "Yes" should be the default selection (index 0)
pub fn prompt_confirmation(prompt: &str, default_yes: bool) -> Result<bool> {
    let items = vec!["Yes", "No"];
    let default_index = if default_yes { 0 } else { 1 };

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(default_index)
        .interact()?;

    Ok(selection == 0)
}

fn text_field(prompt: &str, current: Option<&str>) -> Result<String> {
    let mut input = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true);

    if let Some(text) = current {
        input = input.with_initial_text(text);
    }

    Ok(input.interact_text()?)
}
