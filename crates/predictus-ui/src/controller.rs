//! Import workflow controller.
//!
//! Owns the page state and drives one submission at a time through
//! import → findings query → render. UI events arrive through
//! [`Controller::dispatch`] and are handled to completion before the next.

use predictus_client::LookupBackend;
use predictus_core::{FindingsResponse, ImportRequest};
use tracing::{debug, info, warn};

use crate::detail::ClickTarget;
use crate::error::WorkflowError;
use crate::render::{render_findings, render_summary, render_total};
use crate::view::{PageView, Phase};

/// Events the page forwards to the controller.
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// The import form was submitted.
    Submit(ImportRequest),
    /// A click in the findings table body. `row` is the zero-based data row
    /// containing the click target, `None` when the click was outside any row.
    FindingsClick { row: Option<usize> },
    /// The modal's close control.
    CloseDetail,
    /// A click anywhere while the modal is displayed.
    OverlayClick(ClickTarget),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The trigger was disabled; nothing happened.
    Ignored,
    /// Results are on screen.
    Completed { total: u64 },
    /// The error panel shows this error.
    Failed(WorkflowError),
}

pub struct Controller<B> {
    backend: B,
    view: PageView,
    phase: Phase,
}

impl<B: LookupBackend> Controller<B> {
    /// Idle controller with an empty page.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            view: PageView::default(),
            phase: Phase::Idle,
        }
    }

    /// Current state of the page.
    pub fn view(&self) -> &PageView {
        &self.view
    }

    /// Where the import workflow is.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Route a page event to its handler.
    pub async fn dispatch(&mut self, event: UiEvent) {
        match event {
            UiEvent::Submit(request) => {
                self.submit(request).await;
            }
            UiEvent::FindingsClick { row } => {
                self.findings_click(row);
            }
            UiEvent::CloseDetail => self.close_detail(),
            UiEvent::OverlayClick(target) => self.view.detail.overlay_click(target),
        }
    }

    /// Run a full import cycle.
    ///
    /// Failures never escape: they end up in the error panel and are
    /// returned in the outcome. The trigger is re-enabled on every path.
    pub async fn submit(&mut self, request: ImportRequest) -> SubmitOutcome {
        if !self.begin_submission() {
            debug!("submit ignored while a submission is in flight");
            return SubmitOutcome::Ignored;
        }

        let result = self.run_lookup(&request).await;
        let outcome = match result {
            Ok(response) => {
                let total = response.total;
                self.show_results(response);
                SubmitOutcome::Completed { total }
            }
            Err(err) => {
                warn!(error = %err, "import cycle failed");
                self.show_error(&err);
                SubmitOutcome::Failed(err)
            }
        };

        self.end_submission();
        outcome
    }

    /// Open the detail modal for the clicked findings row.
    ///
    /// Returns whether a record was found. Clicks outside any row and rows
    /// past the current findings are ignored.
    pub fn findings_click(&mut self, row: Option<usize>) -> bool {
        let Some(row) = row else {
            return false;
        };
        let Some(record) = self.view.findings.resolve(row) else {
            debug!(row, "click on row with no finding");
            return false;
        };
        self.view.detail.open(record);
        true
    }

    /// Hide the detail card.
    pub fn close_detail(&mut self) {
        self.view.detail.close();
    }

    /// Idle → Submitting. Returns false if the trigger is already disabled.
    pub(crate) fn begin_submission(&mut self) -> bool {
        if self.view.trigger_disabled {
            return false;
        }
        self.view.error.visible = false;
        self.view.result_visible = false;
        self.view.trigger_disabled = true;
        self.view.findings.clear();
        self.phase = Phase::Submitting;
        true
    }

    async fn run_lookup(&self, request: &ImportRequest) -> Result<FindingsResponse, WorkflowError> {
        info!(cpf_cnpj = request.identifier(), "starting import");
        self.backend
            .import(request)
            .await
            .map_err(WorkflowError::at_import)?;
        self.backend
            .findings(request.identifier())
            .await
            .map_err(WorkflowError::at_query)
    }

    fn show_results(&mut self, response: FindingsResponse) {
        self.view.total_line = render_total(response.total);
        self.view.summary = render_summary(&response.resumo);
        self.view.findings = render_findings(response.achados);
        self.view.result_visible = true;
        self.phase = Phase::Success;
        info!(
            total = response.total,
            rows = self.view.findings.len(),
            "results rendered"
        );
    }

    fn show_error(&mut self, err: &WorkflowError) {
        self.view.error.message = err.to_string();
        self.view.error.visible = true;
        self.phase = Phase::Error;
    }

    fn end_submission(&mut self) {
        debug!(phase = ?self.phase, "submission finished");
        self.view.trigger_disabled = false;
        self.phase = Phase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use predictus_client::ClientError;
    use predictus_core::{FindingRecord, ImportAck};
    use serde_json::json;

    use super::*;
    use crate::detail::DetailSlot;
    use crate::error::{IMPORT_FALLBACK, QUERY_FALLBACK};

    enum Reply {
        Ok,
        Reject(Option<&'static str>),
        Garbled,
    }

    impl Reply {
        fn err(&self) -> Option<ClientError> {
            match self {
                Reply::Ok => None,
                Reply::Reject(message) => Some(ClientError::Rejected {
                    status: 400,
                    message: message.map(str::to_string),
                }),
                Reply::Garbled => Some(ClientError::Json(
                    serde_json::from_str::<serde_json::Value>("<html>").unwrap_err(),
                )),
            }
        }
    }

    struct FakeBackend {
        import: Reply,
        query: Reply,
        response: FindingsResponse,
        calls: Mutex<Vec<String>>,
    }

    impl FakeBackend {
        fn answering(response: FindingsResponse) -> Self {
            Self {
                import: Reply::Ok,
                query: Reply::Ok,
                response,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LookupBackend for FakeBackend {
        async fn import(&self, request: &ImportRequest) -> Result<ImportAck, ClientError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("import {}", request.identifier()));
            match self.import.err() {
                Some(err) => Err(err),
                None => Ok(ImportAck {
                    ok: true,
                    mensagem: None,
                }),
            }
        }

        async fn findings(&self, cpf_cnpj: &str) -> Result<FindingsResponse, ClientError> {
            self.calls.lock().unwrap().push(format!("findings {cpf_cnpj}"));
            match self.query.err() {
                Some(err) => Err(err),
                None => Ok(self.response.clone()),
            }
        }
    }

    fn two_findings() -> FindingsResponse {
        serde_json::from_value(json!({
            "total": 2,
            "resumo": [
                {"Classe Processual": "X", "Status": "Ativo", "quantidade": 2, "valor_total": 500}
            ],
            "achados": [
                {
                    "N° Processo": "0001",
                    "Partes Ativas": "Banco A",
                    "Partes Passivas": "Fulano",
                    "Classe Processual": "X",
                    "Valor da Causa": 200
                },
                {
                    "N° Processo": "0002",
                    "Classe Processual": "X",
                    "Valor da Causa": "300"
                }
            ]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn successful_cycle_renders_results() {
        let mut ctl = Controller::new(FakeBackend::answering(two_findings()));
        let outcome = ctl.submit(ImportRequest::new("12345678901")).await;

        assert_eq!(outcome, SubmitOutcome::Completed { total: 2 });
        let view = ctl.view();
        assert!(view.result_visible);
        assert!(!view.error.visible);
        assert!(!view.trigger_disabled);
        assert_eq!(ctl.phase(), Phase::Idle);
        assert_eq!(view.total_line, "2 processos encontrados.");
        assert!(view.summary.visible);
        assert_eq!(view.summary.rows.len(), 1);
        assert_eq!(view.summary.rows[0].cells(), ["X", "Ativo", "2", "R$ 500,00"]);
        assert_eq!(view.findings.len(), 2);
        assert_eq!(view.findings.rows()[1].claim_value, "R$ 300,00");
    }

    #[tokio::test]
    async fn import_then_query_with_same_identifier() {
        let mut ctl = Controller::new(FakeBackend::answering(two_findings()));
        ctl.submit(ImportRequest::new("123.456.789-01").with_field("nome", "Fulano"))
            .await;
        assert_eq!(
            ctl.backend.calls(),
            vec!["import 123.456.789-01", "findings 123.456.789-01"]
        );
    }

    #[tokio::test]
    async fn import_rejection_shows_server_message() {
        let mut backend = FakeBackend::answering(two_findings());
        backend.import = Reply::Reject(Some("CPF inválido"));
        let mut ctl = Controller::new(backend);

        let outcome = ctl.submit(ImportRequest::new("123")).await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed(WorkflowError::Import("CPF inválido".into()))
        );
        let view = ctl.view();
        assert!(view.error.visible);
        assert_eq!(view.error.message, "CPF inválido");
        assert!(!view.result_visible);
        assert!(!view.trigger_disabled);
        assert_eq!(ctl.backend.calls(), vec!["import 123"]);
    }

    #[tokio::test]
    async fn import_rejection_without_message_uses_fallback() {
        let mut backend = FakeBackend::answering(two_findings());
        backend.import = Reply::Reject(None);
        let mut ctl = Controller::new(backend);
        ctl.submit(ImportRequest::new("1")).await;
        assert_eq!(ctl.view().error.message, IMPORT_FALLBACK);
    }

    #[tokio::test]
    async fn query_rejection_is_query_error() {
        let mut backend = FakeBackend::answering(two_findings());
        backend.query = Reply::Reject(None);
        let mut ctl = Controller::new(backend);

        let outcome = ctl.submit(ImportRequest::new("12345678901")).await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed(WorkflowError::Query(QUERY_FALLBACK.into()))
        );
        assert_eq!(ctl.view().error.message, QUERY_FALLBACK);
        assert!(!ctl.view().result_visible);
    }

    #[tokio::test]
    async fn garbled_reply_is_network_error() {
        let mut backend = FakeBackend::answering(two_findings());
        backend.query = Reply::Garbled;
        let mut ctl = Controller::new(backend);

        let outcome = ctl.submit(ImportRequest::new("12345678901")).await;

        assert!(matches!(
            outcome,
            SubmitOutcome::Failed(WorkflowError::Network(_))
        ));
        assert!(ctl.view().error.visible);
        assert!(!ctl.view().error.message.is_empty());
        assert!(!ctl.view().trigger_disabled);
    }

    #[tokio::test]
    async fn empty_summary_hides_summary_but_keeps_findings() {
        let mut response = two_findings();
        response.resumo.clear();
        let mut ctl = Controller::new(FakeBackend::answering(response));

        ctl.submit(ImportRequest::new("12345678901")).await;

        assert!(ctl.view().result_visible);
        assert!(!ctl.view().summary.visible);
        assert_eq!(ctl.view().findings.len(), 2);
    }

    #[tokio::test]
    async fn row_click_opens_matching_record() {
        let mut ctl = Controller::new(FakeBackend::answering(two_findings()));
        ctl.submit(ImportRequest::new("12345678901")).await;

        assert!(ctl.findings_click(Some(0)));
        let detail = &ctl.view().detail;
        assert!(detail.is_visible());
        assert_eq!(detail.get(DetailSlot::ClaimValue), "R$ 200,00");
        assert_eq!(detail.get(DetailSlot::Class), "X");
        assert_eq!(detail.get(DetailSlot::Branch), "");
        assert_eq!(detail.get(DetailSlot::Movement2), "");

        assert!(ctl.findings_click(Some(1)));
        assert_eq!(ctl.view().detail.get(DetailSlot::ClaimValue), "R$ 300,00");
    }

    #[tokio::test]
    async fn clicks_outside_rows_or_past_end_are_ignored() {
        let mut ctl = Controller::new(FakeBackend::answering(two_findings()));
        ctl.submit(ImportRequest::new("12345678901")).await;

        assert!(!ctl.findings_click(None));
        assert!(!ctl.findings_click(Some(2)));
        assert!(!ctl.view().detail.is_visible());
    }

    #[tokio::test]
    async fn every_row_resolves_to_its_record() {
        let achados: Vec<FindingRecord> = (0..7)
            .map(|i| FindingRecord {
                process_number: Some(json!(format!("p{i}"))),
                claim_value: Some(json!(i * 10)),
                ..Default::default()
            })
            .collect();
        let response = FindingsResponse {
            total: 7,
            achados,
            ..Default::default()
        };
        let mut ctl = Controller::new(FakeBackend::answering(response));
        ctl.submit(ImportRequest::new("12345678901")).await;

        for i in 0..7 {
            assert!(ctl.findings_click(Some(i)));
            let expected = predictus_core::format_currency(&json!(i * 10));
            assert_eq!(ctl.view().detail.get(DetailSlot::ClaimValue), expected);
            assert_eq!(ctl.view().findings.rows()[i].process_number, format!("p{i}"));
        }
        assert!(!ctl.findings_click(Some(7)));
    }

    #[tokio::test]
    async fn failed_resubmission_drops_previous_findings() {
        let mut ctl = Controller::new(FakeBackend::answering(two_findings()));
        ctl.submit(ImportRequest::new("12345678901")).await;
        assert_eq!(ctl.view().findings.len(), 2);

        ctl.backend.import = Reply::Reject(Some("Arquivo não enviado."));
        ctl.submit(ImportRequest::new("12345678901")).await;

        assert!(ctl.view().findings.is_empty());
        assert!(!ctl.findings_click(Some(0)));
        assert!(!ctl.view().result_visible);
        assert!(ctl.view().error.visible);
    }

    #[tokio::test]
    async fn success_after_failure_hides_error() {
        let mut backend = FakeBackend::answering(two_findings());
        backend.import = Reply::Reject(Some("CPF inválido"));
        let mut ctl = Controller::new(backend);
        ctl.submit(ImportRequest::new("1")).await;
        assert!(ctl.view().error.visible);

        ctl.backend.import = Reply::Ok;
        ctl.submit(ImportRequest::new("12345678901")).await;
        assert!(!ctl.view().error.visible);
        assert!(ctl.view().result_visible);
    }

    #[tokio::test]
    async fn submit_while_busy_is_ignored() {
        let mut ctl = Controller::new(FakeBackend::answering(two_findings()));
        assert!(ctl.begin_submission());
        assert!(ctl.view().trigger_disabled);
        assert_eq!(ctl.phase(), Phase::Submitting);

        let outcome = ctl.submit(ImportRequest::new("12345678901")).await;

        assert_eq!(outcome, SubmitOutcome::Ignored);
        assert!(ctl.backend.calls().is_empty());
        assert!(ctl.view().trigger_disabled);
    }

    #[tokio::test]
    async fn begin_hides_both_panels() {
        let mut ctl = Controller::new(FakeBackend::answering(two_findings()));
        ctl.submit(ImportRequest::new("12345678901")).await;
        assert!(ctl.view().result_visible);

        assert!(ctl.begin_submission());
        assert!(!ctl.view().result_visible);
        assert!(!ctl.view().error.visible);
        assert!(ctl.view().findings.is_empty());
    }

    #[tokio::test]
    async fn dispatch_routes_modal_events() {
        let mut ctl = Controller::new(FakeBackend::answering(two_findings()));
        ctl.dispatch(UiEvent::Submit(ImportRequest::new("12345678901")))
            .await;
        ctl.dispatch(UiEvent::FindingsClick { row: Some(1) }).await;
        assert!(ctl.view().detail.is_visible());

        ctl.dispatch(UiEvent::OverlayClick(ClickTarget::Content)).await;
        assert!(ctl.view().detail.is_visible());
        ctl.dispatch(UiEvent::OverlayClick(ClickTarget::Overlay)).await;
        assert!(!ctl.view().detail.is_visible());

        ctl.dispatch(UiEvent::FindingsClick { row: Some(0) }).await;
        ctl.dispatch(UiEvent::CloseDetail).await;
        assert!(!ctl.view().detail.is_visible());
    }
}
