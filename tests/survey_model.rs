//! Behaviour of the survey model against the built-in clinic catalog

use survey_portal::survey::{Catalog, MaturityLevel, QuestionId, StakeholderId, SurveyModel};
use survey_portal::SurveyError;
use chrono::{TimeZone, Utc};
use std::sync::Arc;

fn model() -> SurveyModel {
    SurveyModel::new(Arc::new(Catalog::builtin().expect("built-in catalog is valid")))
}

fn question_ids(model: &SurveyModel, stakeholder: u32) -> Vec<u32> {
    model
        .questions_for(StakeholderId(stakeholder))
        .iter()
        .map(|q| q.id.0)
        .collect()
}

#[test]
fn test_list_stakeholders_in_display_order() {
    let model = model();
    let names: Vec<&str> = model.list_stakeholders().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Dr. Cynthia Schaefer",
            "Yesenia Aguila",
            "Karina Espinoza",
            "Mignon Willis",
            "Zaman Benyameen",
            "Elvie Bayani",
        ]
    );
}

#[test]
fn test_questions_for_matches_assignment_sets() {
    let model = model();

    for stakeholder in model.list_stakeholders() {
        let expected: Vec<u32> = model
            .catalog()
            .questions()
            .iter()
            .filter(|q| q.assigned_to.contains(&stakeholder.id))
            .map(|q| q.id.0)
            .collect();
        assert_eq!(question_ids(&model, stakeholder.id.0), expected);
    }
}

#[test]
fn test_operations_lead_scenario() {
    let mut model = model();
    model.select_stakeholder(StakeholderId(3)).unwrap();
    assert_eq!(model.active_stakeholder().unwrap().role, "Operations Lead / HR");
    assert_eq!(question_ids(&model, 3), vec![5, 6, 9, 10, 11]);

    model.set_response(QuestionId(5), "Quarterly").unwrap();
    let records = model.build_submission().unwrap();

    assert_eq!(records.len(), 5);
    let first = &records[0];
    assert_eq!(first.question_id, QuestionId(5));
    assert_eq!(first.response, "Quarterly");
    assert_eq!(first.maturity, None);
    assert_eq!(first.notes, "");
    assert_eq!(first.stakeholder_name, "Karina Espinoza");

    let json = serde_json::to_value(first).unwrap();
    assert_eq!(json["questionId"], 5);
    assert_eq!(json["response"], "Quarterly");
    assert_eq!(json["maturity"], "");
}

#[test]
fn test_selecting_new_stakeholder_clears_answers() {
    let mut model = model();
    model.select_stakeholder(StakeholderId(5)).unwrap();
    model.set_response(QuestionId(5), "Monthly").unwrap();
    model.set_maturity(QuestionId(5), 3).unwrap();
    model.set_notes(QuestionId(11), "Vendor handles patches").unwrap();

    model.select_stakeholder(StakeholderId(2)).unwrap();
    assert_eq!(model.response(QuestionId(5)), None);
    assert_eq!(model.maturity(QuestionId(5)), None);
    assert_eq!(model.notes(QuestionId(11)), None);
    assert_eq!(model.answered_count(), 0);

    // Reselecting the same stakeholder also starts over
    model.set_response(QuestionId(6), "Screens face away").unwrap();
    model.select_stakeholder(StakeholderId(2)).unwrap();
    assert_eq!(model.response(QuestionId(6)), None);
}

#[test]
fn test_stale_question_rejected_after_switch() {
    let mut model = model();
    model.select_stakeholder(StakeholderId(3)).unwrap();
    model.set_response(QuestionId(10), "Yes, quarterly").unwrap();

    model.select_stakeholder(StakeholderId(1)).unwrap();
    assert_eq!(
        model.set_response(QuestionId(10), "Yes"),
        Err(SurveyError::InvalidQuestionForContext {
            question_id: QuestionId(10),
            stakeholder_id: Some(StakeholderId(1)),
        })
    );
}

#[test]
fn test_unknown_question_rejected() {
    let mut model = model();
    model.select_stakeholder(StakeholderId(1)).unwrap();
    assert!(matches!(
        model.set_notes(QuestionId(404), "?"),
        Err(SurveyError::InvalidQuestionForContext { .. })
    ));
}

#[test]
fn test_set_maturity_rejects_values_outside_range() {
    let mut model = model();
    model.select_stakeholder(StakeholderId(1)).unwrap();

    for level in [0u8, 4, 10, 255] {
        assert_eq!(
            model.set_maturity(QuestionId(1), level),
            Err(SurveyError::InvalidMaturityLevel {
                value: level.to_string()
            })
        );
    }
    assert_eq!(model.maturity(QuestionId(1)), None);

    for level in 1..=3u8 {
        model.set_maturity(QuestionId(1), level).unwrap();
        assert_eq!(model.maturity(QuestionId(1)).map(MaturityLevel::value), Some(level));
    }
}

#[test]
fn test_build_submission_without_stakeholder() {
    let model = model();
    assert_eq!(model.build_submission(), Err(SurveyError::NoActiveStakeholder));
}

#[test]
fn test_build_submission_covers_every_assigned_question() {
    let mut model = model();
    let at = Utc.with_ymd_and_hms(2026, 10, 18, 14, 5, 9).unwrap();

    for stakeholder in model.list_stakeholders().to_vec() {
        model.select_stakeholder(stakeholder.id).unwrap();
        let records = model.build_submission_at(at).unwrap();

        assert_eq!(records.len(), model.questions_for(stakeholder.id).len());
        for record in &records {
            assert_eq!(record.stakeholder_id, stakeholder.id);
            assert_eq!(record.stakeholder_name, stakeholder.name);
            assert_eq!(record.timestamp, at);
        }
    }
}

#[test]
fn test_build_submission_uses_one_timestamp() {
    let mut model = model();
    model.select_stakeholder(StakeholderId(1)).unwrap();
    let records = model.build_submission().unwrap();

    assert_eq!(records.len(), 8);
    assert!(records.iter().all(|r| r.timestamp == records[0].timestamp));
}

#[test]
fn test_build_submission_carries_all_fields() {
    let mut model = model();
    model.select_stakeholder(StakeholderId(2)).unwrap();
    model.set_response(QuestionId(9), "Downtime procedures binder").unwrap();
    model.set_maturity(QuestionId(9), 2).unwrap();
    model.set_notes(QuestionId(9), "Last drill in spring").unwrap();

    let records = model.build_submission().unwrap();
    let record = records.iter().find(|r| r.question_id == QuestionId(9)).unwrap();

    assert_eq!(record.topic, "EPIC");
    assert_eq!(record.area, "Incident Response");
    assert_eq!(
        record.question_text,
        "If Epic/EHR fails, what is the contingency plan to maintain operations?"
    );
    assert_eq!(record.response, "Downtime procedures binder");
    assert_eq!(record.maturity, Some(MaturityLevel::Partial));
    assert_eq!(record.notes, "Last drill in spring");
}

#[test]
fn test_reset_session() {
    let mut model = model();
    model.select_stakeholder(StakeholderId(4)).unwrap();
    model.set_response(QuestionId(1), "Yes").unwrap();

    model.reset_session();
    assert!(model.active_stakeholder().is_none());
    assert!(model.assigned_questions().is_empty());
    assert_eq!(model.response(QuestionId(1)), None);
    assert_eq!(model.build_submission(), Err(SurveyError::NoActiveStakeholder));

    // Resetting an empty session is fine too
    model.reset_session();
}

#[test]
fn test_stakeholder_without_questions() {
    let catalog = Catalog::from_toml_str(
        r#"
        [[stakeholders]]
        id = 1
        name = "Dr. Schaefer"
        role = "Lead"

        [[stakeholders]]
        id = 2
        name = "Front Desk"
        role = "Staff"

        [[questions]]
        id = 1
        assigned_to = [1]
        topic = "GRC"
        area = "Policy"
        text = "Are policies documented?"
        "#,
    )
    .unwrap();
    let mut model = SurveyModel::new(Arc::new(catalog));

    model.select_stakeholder(StakeholderId(2)).unwrap();
    assert!(model.assigned_questions().is_empty());
    assert!(model.build_submission().unwrap().is_empty());
}
