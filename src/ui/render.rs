//! Colored terminal output for catalog listings and survey progress

use crate::api::SubmissionReceipt;
use crate::survey::{Question, Stakeholder, SurveyModel};
use colored::*;

pub fn print_stakeholders(stakeholders: &[Stakeholder]) {
    println!("{}", "Stakeholders".bright_blue().bold());
    for stakeholder in stakeholders {
        println!(
            "  {:>3}  {}  {}",
            stakeholder.id.to_string().dimmed(),
            stakeholder.name.bright_white().bold(),
            format!("({})", stakeholder.role).dimmed()
        );
    }
}

pub fn print_no_questions() {
    println!(
        "  {}",
        "No questions assigned. Contact the survey lead.".bright_red().bold()
    );
}

pub fn print_question_list(stakeholder: &Stakeholder, questions: &[&Question]) {
    println!(
        "{} {}",
        "Survey for".bright_blue().bold(),
        stakeholder.name.bright_white().bold()
    );

    if questions.is_empty() {
        print_no_questions();
        return;
    }

    for question in questions {
        println!(
            "  {:>3}  {} {}",
            question.id.to_string().dimmed(),
            format!("[{} / {}]", question.topic, question.area).cyan(),
            question.text
        );
    }
}

pub fn print_question_header(question: &Question, position: usize, total: usize) {
    println!();
    println!(
        "{} {}",
        format!("({}/{})", position, total).dimmed(),
        format!("[{} / {}]", question.topic, question.area).cyan().bold()
    );
    println!("{}", question.text.italic());
}

pub fn print_review(model: &SurveyModel) {
    let questions = model.assigned_questions();
    println!();
    println!(
        "{} {}/{} answered",
        "Review:".bright_blue().bold(),
        model.answered_count(),
        questions.len()
    );

    for question in questions {
        let response = model.response(question.id).unwrap_or_default();
        let maturity = model
            .maturity(question.id)
            .map(|level| format!("{} - {}", level.value(), level.label()))
            .unwrap_or_else(|| "unanswered".to_string());
        let notes = model.notes(question.id).unwrap_or_default();

        println!(
            "  {} {}",
            format!("[{} / {}]", question.topic, question.area).cyan(),
            question.text
        );
        if response.trim().is_empty() {
            println!("      {} {}", "Response:".dimmed(), "(none)".bright_yellow());
        } else {
            println!("      {} {}", "Response:".dimmed(), response);
        }
        println!("      {} {}", "Maturity:".dimmed(), maturity);
        if !notes.trim().is_empty() {
            println!("      {} {}", "Notes:".dimmed(), notes);
        }
    }
}

pub fn print_submitted(receipt: &SubmissionReceipt) {
    println!(
        "{} Submitted {} answers successfully {}",
        "✓".bright_green().bold(),
        receipt.record_count,
        format!("(ref {})", receipt.correlation_id).dimmed()
    );
}

pub fn print_error(err: &dyn std::fmt::Display) {
    eprintln!("{} {}", "✗".bright_red().bold(), err.to_string().bright_red());
}
