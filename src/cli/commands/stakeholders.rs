//! Read-only catalog listings

use crate::cli::AppContext;
use crate::error::SurveyError;
use crate::survey::StakeholderId;
use crate::ui::render;
use anyhow::Result;

pub fn stakeholders_command(ctx: &AppContext) -> Result<()> {
    let model = ctx.model();
    render::print_stakeholders(model.list_stakeholders());
    Ok(())
}

pub fn questions_command(ctx: &AppContext, stakeholder: u32) -> Result<()> {
    let id = StakeholderId(stakeholder);
    let model = ctx.model();
    let stakeholder = model
        .catalog()
        .stakeholder(id)
        .ok_or(SurveyError::InvalidStakeholder { id })?;

    render::print_question_list(stakeholder, &model.questions_for(id));
    Ok(())
}
