//! Submit flow: endpoint handling, session preservation and the HTTP client
//! against a local endpoint

use async_trait::async_trait;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use survey_portal::api::{SubmissionClient, SubmissionReceipt, SubmissionTransport};
use survey_portal::survey::{Catalog, QuestionId, StakeholderId, SubmissionRecord, SurveyModel};
use survey_portal::{SurveyError, SurveyPortal};

/// Transport that records calls and answers with a fixed result
struct FakeTransport {
    calls: AtomicUsize,
    batches: Mutex<Vec<Vec<SubmissionRecord>>>,
    result: Result<u16, SurveyError>,
}

impl FakeTransport {
    fn accepting() -> Self {
        Self::with_result(Ok(200))
    }

    fn with_result(result: Result<u16, SurveyError>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            batches: Mutex::new(Vec::new()),
            result,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubmissionTransport for FakeTransport {
    async fn send(&self, _endpoint: &str, batch: &[SubmissionRecord]) -> Result<SubmissionReceipt, SurveyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.batches.lock().unwrap().push(batch.to_vec());
        self.result.clone().map(|status| SubmissionReceipt {
            correlation_id: "test".to_string(),
            status,
            record_count: batch.len(),
        })
    }
}

fn answered_model() -> SurveyModel {
    let mut model = SurveyModel::new(Arc::new(Catalog::builtin().unwrap()));
    model.select_stakeholder(StakeholderId(3)).unwrap();
    model.set_response(QuestionId(5), "Quarterly").unwrap();
    model.set_maturity(QuestionId(10), 1).unwrap();
    model
}

fn assert_answers_intact(model: &SurveyModel) {
    assert_eq!(model.active_stakeholder().unwrap().id, StakeholderId(3));
    assert_eq!(model.response(QuestionId(5)), Some("Quarterly"));
    assert!(model.maturity(QuestionId(10)).is_some());
}

#[tokio::test]
async fn test_missing_endpoint_makes_no_call() {
    let mut portal = SurveyPortal::new(answered_model(), None, FakeTransport::accepting());

    assert_eq!(portal.submit().await, Err(SurveyError::MissingEndpointConfiguration));
    assert_eq!(portal.transport().calls(), 0);
    assert_answers_intact(portal.model());
}

#[tokio::test]
async fn test_blank_endpoint_counts_as_missing() {
    let mut portal = SurveyPortal::new(answered_model(), Some("   ".to_string()), FakeTransport::accepting());

    assert_eq!(portal.endpoint(), None);
    assert_eq!(portal.submit().await, Err(SurveyError::MissingEndpointConfiguration));
    assert_eq!(portal.transport().calls(), 0);
}

#[tokio::test]
async fn test_submit_without_stakeholder() {
    let model = SurveyModel::new(Arc::new(Catalog::builtin().unwrap()));
    let mut portal = SurveyPortal::new(model, Some("http://localhost/submit".to_string()), FakeTransport::accepting());

    assert_eq!(portal.submit().await, Err(SurveyError::NoActiveStakeholder));
    assert_eq!(portal.transport().calls(), 0);
}

#[tokio::test]
async fn test_successful_submit_resets_session() {
    let mut portal = SurveyPortal::new(
        answered_model(),
        Some("http://localhost/submit".to_string()),
        FakeTransport::accepting(),
    );

    let receipt = portal.submit().await.unwrap();
    assert_eq!(receipt.record_count, 5);
    assert_eq!(portal.transport().calls(), 1);
    assert!(portal.model().active_stakeholder().is_none());
    assert_eq!(portal.model().response(QuestionId(5)), None);

    let batches = portal.transport().batches.lock().unwrap();
    assert_eq!(batches[0][0].response, "Quarterly");
}

#[tokio::test]
async fn test_failed_submit_keeps_answers_for_retry() {
    let rejected = SurveyError::SubmissionRejected {
        status: 500,
        status_text: "Internal Server Error".to_string(),
    };
    let mut portal = SurveyPortal::new(
        answered_model(),
        Some("http://localhost/submit".to_string()),
        FakeTransport::with_result(Err(rejected.clone())),
    );

    assert_eq!(portal.submit().await, Err(rejected.clone()));
    assert_answers_intact(portal.model());

    // A manual retry sends the same answers again
    assert_eq!(portal.submit().await, Err(rejected));
    assert_eq!(portal.transport().calls(), 2);
    assert_answers_intact(portal.model());
}

#[tokio::test]
async fn test_preview_does_not_send_or_reset() {
    let portal = SurveyPortal::new(
        answered_model(),
        Some("http://localhost/submit".to_string()),
        FakeTransport::accepting(),
    );

    let preview: Value = serde_json::from_str(&portal.preview().unwrap()).unwrap();
    assert_eq!(preview.as_array().unwrap().len(), 5);
    assert_eq!(preview[0]["stakeholderName"], "Karina Espinoza");
    assert_eq!(portal.transport().calls(), 0);
    assert_answers_intact(portal.model());
}

#[derive(Clone)]
struct EndpointState {
    status: StatusCode,
    received: Arc<Mutex<Vec<Value>>>,
}

async fn record_submission(State(state): State<EndpointState>, Json(body): Json<Value>) -> StatusCode {
    state.received.lock().unwrap().push(body);
    state.status
}

/// Start a local endpoint answering every POST with `status`
async fn spawn_endpoint(status: StatusCode) -> (String, Arc<Mutex<Vec<Value>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/submit", post(record_submission))
        .with_state(EndpointState {
            status,
            received: Arc::clone(&received),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/submit", addr), received)
}

fn client() -> SubmissionClient {
    SubmissionClient::new(Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_client_posts_json_batch() {
    let (url, received) = spawn_endpoint(StatusCode::OK).await;
    let mut portal = SurveyPortal::new(answered_model(), Some(url), client());

    let receipt = portal.submit().await.unwrap();
    assert_eq!(receipt.status, 200);
    assert_eq!(receipt.record_count, 5);
    assert!(!receipt.correlation_id.is_empty());
    assert!(portal.model().active_stakeholder().is_none());

    let bodies = received.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    let batch = bodies[0].as_array().unwrap();
    let ids: Vec<u64> = batch.iter().map(|r| r["questionId"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![5, 6, 9, 10, 11]);
    assert_eq!(batch[0]["stakeholderId"], 3);
    assert_eq!(batch[0]["response"], "Quarterly");
    assert_eq!(batch[0]["maturity"], "");
    assert_eq!(batch[3]["maturity"], "1");
    assert!(batch[0]["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_client_surfaces_rejection_status() {
    let (url, received) = spawn_endpoint(StatusCode::SERVICE_UNAVAILABLE).await;
    let mut portal = SurveyPortal::new(answered_model(), Some(url), client());

    assert_eq!(
        portal.submit().await,
        Err(SurveyError::SubmissionRejected {
            status: 503,
            status_text: "Service Unavailable".to_string(),
        })
    );
    assert_eq!(received.lock().unwrap().len(), 1);
    assert_answers_intact(portal.model());
}

#[tokio::test]
async fn test_client_surfaces_transport_failure() {
    // Reserve a port, then close it so nothing is listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut portal = SurveyPortal::new(answered_model(), Some(format!("http://{}/submit", addr)), client());

    let err = portal.submit().await.unwrap_err();
    assert!(matches!(err, SurveyError::SubmissionTransportFailure { .. }));
    assert!(err.is_submission_failure());
    assert_answers_intact(portal.model());
}

#[tokio::test]
async fn test_client_rejects_malformed_endpoint() {
    let mut portal = SurveyPortal::new(answered_model(), Some("not a url".to_string()), client());

    assert!(matches!(
        portal.submit().await,
        Err(SurveyError::SubmissionTransportFailure { .. })
    ));
    assert_answers_intact(portal.model());
}
