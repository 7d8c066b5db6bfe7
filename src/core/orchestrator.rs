use crate::core::{normalizer, request};
use crate::domain::model::{AuditOutcome, ImageUpload, TableMode, TableText};
use crate::domain::ports::VisionModel;
use crate::utils::error::{AuditError, Result};

/// Observable session state. InFlight holds exactly while the single audit
/// request is outstanding; Settled until the next qualifying edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditState {
    Idle,
    Ready,
    InFlight,
    Settled,
}

/// One user session's audit interaction: holds the current table and image,
/// drives the Idle/Ready/InFlight/Settled transitions, and owns the injected
/// model client. `&mut self` on `run_audit` makes the single-in-flight rule
/// structural.
pub struct AuditSession<M: VisionModel> {
    model_client: M,
    model_id: String,
    table: Option<TableText>,
    image: Option<ImageUpload>,
    in_flight: bool,
    last_outcome: Option<AuditOutcome>,
}

impl<M: VisionModel> AuditSession<M> {
    pub fn new(model_client: M, model_id: String) -> Self {
        Self {
            model_client,
            model_id,
            table: None,
            image: None,
            in_flight: false,
            last_outcome: None,
        }
    }

    /// Normalizes and stores the pasted text. Returns the resulting mode;
    /// degradation is advisory, never an error. Any settled outcome is
    /// discarded (Settled → Ready/Idle).
    pub fn set_table_text(&mut self, input: &str) -> TableMode {
        let normalized = normalizer::normalize(input);
        let mode = match &normalized {
            Some(TableText::Structured(_)) => TableMode::Structured,
            Some(TableText::Raw(_)) => TableMode::Degraded,
            None => TableMode::Empty,
        };

        if mode == TableMode::Degraded {
            tracing::warn!("⚠️ Table text is not tab-structured; auditing as plain text");
        }

        self.table = normalized;
        self.last_outcome = None;
        mode
    }

    pub fn set_image(&mut self, image: ImageUpload) {
        self.image = Some(image);
        self.last_outcome = None;
    }

    pub fn clear_table(&mut self) {
        self.table = None;
        self.last_outcome = None;
    }

    pub fn clear_image(&mut self) {
        self.image = None;
        self.last_outcome = None;
    }

    pub fn state(&self) -> AuditState {
        if self.in_flight {
            AuditState::InFlight
        } else if self.last_outcome.is_some() {
            AuditState::Settled
        } else if self.table.is_some() && self.image.is_some() {
            AuditState::Ready
        } else {
            AuditState::Idle
        }
    }

    pub fn last_outcome(&self) -> Option<&AuditOutcome> {
        self.last_outcome.as_ref()
    }

    /// Flattened text of the current table, as it would be embedded in the
    /// request.
    pub fn rendered_table(&self) -> Option<String> {
        self.table.as_ref().map(normalizer::render)
    }

    /// Dispatches one audit request and settles with exactly one of report
    /// or failure. With either input missing, returns an incompleteness
    /// error and dispatches nothing. Remote failures settle the session and
    /// leave it retriable; nothing is retried automatically.
    pub async fn run_audit(&mut self) -> Result<AuditOutcome> {
        let table = self
            .table
            .as_ref()
            .ok_or_else(|| AuditError::IncompleteInputError {
                message: "no table text pasted".to_string(),
            })?;
        let image = self
            .image
            .as_ref()
            .ok_or_else(|| AuditError::IncompleteInputError {
                message: "no image uploaded".to_string(),
            })?;

        let table_text = normalizer::render(table);
        let chat_request = request::build_audit_request(&self.model_id, &table_text, image);

        self.in_flight = true;
        tracing::info!("🚀 Dispatching audit request (model: {})", self.model_id);

        let outcome = match self.model_client.complete(&chat_request).await {
            Ok(text) => {
                tracing::info!("✅ Audit request settled with a report");
                AuditOutcome::Report(text)
            }
            Err(e) => {
                tracing::error!("❌ Audit request failed: {}", e);
                AuditOutcome::Failed(format!("Error while processing the API request: {}", e))
            }
        };

        self.in_flight = false;
        self.last_outcome = Some(outcome.clone());
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::request::ChatRequest;
    use crate::domain::model::MediaType;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Scripted stand-in for the remote model: pops one canned response per
    /// call and records the serialized requests it saw.
    struct ScriptedModel {
        responses: Mutex<VecDeque<Result<String>>>,
        seen_requests: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        fn new(responses: Vec<Result<String>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                seen_requests: Mutex::new(Vec::new()),
            }
        }

        fn request_count(&self) -> usize {
            self.seen_requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl VisionModel for ScriptedModel {
        async fn complete(&self, request: &ChatRequest) -> Result<String> {
            self.seen_requests
                .lock()
                .unwrap()
                .push(serde_json::to_string(request).unwrap());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unscripted call")
        }
    }

    fn sample_image() -> ImageUpload {
        ImageUpload::new(vec![0x89, 0x50, 0x4E, 0x47], MediaType::Png)
    }

    fn session_with(responses: Vec<Result<String>>) -> AuditSession<ScriptedModel> {
        AuditSession::new(ScriptedModel::new(responses), "gpt-4o".to_string())
    }

    #[tokio::test]
    async fn test_idle_blocks_trigger_without_table() {
        let mut session = session_with(vec![]);
        session.set_image(sample_image());
        assert_eq!(session.state(), AuditState::Idle);

        let err = session.run_audit().await.unwrap_err();
        assert!(matches!(err, AuditError::IncompleteInputError { .. }));
        assert!(err.to_string().contains("table"));
        assert_eq!(session.model_client.request_count(), 0);
    }

    #[tokio::test]
    async fn test_idle_blocks_trigger_without_image() {
        let mut session = session_with(vec![]);
        session.set_table_text("Model\tPower\nX100\t5kW");
        assert_eq!(session.state(), AuditState::Idle);

        let err = session.run_audit().await.unwrap_err();
        assert!(err.to_string().contains("image"));
        assert_eq!(session.model_client.request_count(), 0);
    }

    #[tokio::test]
    async fn test_both_inputs_make_session_ready() {
        let mut session = session_with(vec![]);
        session.set_table_text("Model\tPower\nX100\t5kW");
        session.set_image(sample_image());
        assert_eq!(session.state(), AuditState::Ready);
    }

    #[tokio::test]
    async fn test_successful_audit_reports_verbatim() {
        let mut session = session_with(vec![Ok("All values match.".to_string())]);
        let mode = session.set_table_text("Model\tPower\nX100\t5kW");
        assert_eq!(mode, TableMode::Structured);
        session.set_image(sample_image());

        let outcome = session.run_audit().await.unwrap();
        assert_eq!(outcome, AuditOutcome::Report("All values match.".to_string()));
        assert_eq!(session.state(), AuditState::Settled);
        assert_eq!(session.last_outcome(), Some(&outcome));
    }

    #[tokio::test]
    async fn test_settled_outcome_is_exactly_one_of_report_or_failure() {
        let mut ok_session = session_with(vec![Ok("fine".to_string())]);
        ok_session.set_table_text("a\tb\n1\t2");
        ok_session.set_image(sample_image());
        assert!(matches!(
            ok_session.run_audit().await.unwrap(),
            AuditOutcome::Report(_)
        ));

        let mut failed_session = session_with(vec![Err(AuditError::RemoteRejectedError {
            status: 503,
            body: "upstream unavailable".to_string(),
        })]);
        failed_session.set_table_text("a\tb\n1\t2");
        failed_session.set_image(sample_image());
        assert!(matches!(
            failed_session.run_audit().await.unwrap(),
            AuditOutcome::Failed(_)
        ));
    }

    #[tokio::test]
    async fn test_failure_keeps_session_retriable() {
        let mut session = session_with(vec![
            Err(AuditError::RemoteRejectedError {
                status: 503,
                body: "connection reset".to_string(),
            }),
            Ok("All values match.".to_string()),
        ]);
        session.set_table_text("Model\tPower\nX100\t5kW");
        session.set_image(sample_image());

        let first = session.run_audit().await.unwrap();
        match &first {
            AuditOutcome::Failed(message) => {
                assert!(message.contains("503"));
                assert!(message.contains("connection reset"));
            }
            AuditOutcome::Report(_) => panic!("first attempt must fail"),
        }

        // Same inputs, fresh independent request.
        let second = session.run_audit().await.unwrap();
        assert_eq!(second, AuditOutcome::Report("All values match.".to_string()));
        assert_eq!(session.model_client.request_count(), 2);

        let requests = session.model_client.seen_requests.lock().unwrap();
        assert_eq!(requests[0], requests[1]);
    }

    #[tokio::test]
    async fn test_edit_clears_settled_state() {
        let mut session = session_with(vec![Ok("ok".to_string())]);
        session.set_table_text("a\tb\n1\t2");
        session.set_image(sample_image());
        session.run_audit().await.unwrap();
        assert_eq!(session.state(), AuditState::Settled);

        session.set_table_text("a\tb\n3\t4");
        assert_eq!(session.state(), AuditState::Ready);
        assert!(session.last_outcome().is_none());
    }

    #[tokio::test]
    async fn test_clearing_input_returns_to_idle() {
        let mut session = session_with(vec![Ok("ok".to_string())]);
        session.set_table_text("a\tb\n1\t2");
        session.set_image(sample_image());
        session.run_audit().await.unwrap();

        session.clear_image();
        assert_eq!(session.state(), AuditState::Idle);
    }

    #[tokio::test]
    async fn test_degraded_text_still_audits_as_raw() {
        let mut session = session_with(vec![Ok("Cannot compare.".to_string())]);
        let mode = session.set_table_text("see attached");
        assert_eq!(mode, TableMode::Degraded);
        session.set_image(sample_image());

        session.run_audit().await.unwrap();
        let requests = session.model_client.seen_requests.lock().unwrap();
        assert!(requests[0].contains("see attached"));
    }

    #[tokio::test]
    async fn test_empty_table_text_disables_trigger() {
        let mut session = session_with(vec![]);
        let mode = session.set_table_text("   ");
        assert_eq!(mode, TableMode::Empty);
        session.set_image(sample_image());

        assert_eq!(session.state(), AuditState::Idle);
        assert!(session.run_audit().await.is_err());
    }
}
