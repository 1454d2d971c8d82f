use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use aikenize_core::error::Result;
use aikenize_core::template::{default_snippet, template_or_default};
use aikenize_core::{HistoryRecord, SourceLanguage, TranslationClient};
use tokio::sync::Mutex;

use super::state::{RejectReason, SessionSnapshot, SessionState, SubmitOutcome};
use crate::history_store::HistoryStore;

/// Owns the editing session and drives translations.
///
/// Shared as `Arc<SessionController>`; every operation takes `&self`.
/// Session fields and the history store sit behind separate mutexes, and
/// neither lock is held while the translation request is outstanding, so
/// edits, template loads and history selection keep working during a
/// submit. At most one submit is in flight at a time.
pub struct SessionController {
    client: Arc<dyn TranslationClient>,
    state: Mutex<SessionState>,
    history: Mutex<HistoryStore>,
    translating: AtomicBool,
}

/// Releases the in-flight claim when dropped, including when the submitting
/// future is dropped mid-request.
struct TranslatingGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for TranslatingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl SessionController {
    /// Starts an idle TypeScript session on the default snippet.
    pub fn new(client: Arc<dyn TranslationClient>, history: HistoryStore) -> Self {
        let language = SourceLanguage::default();
        Self {
            client,
            state: Mutex::new(SessionState {
                language,
                snippet: default_snippet(language).to_string(),
                result: None,
            }),
            history: Mutex::new(history),
            translating: AtomicBool::new(false),
        }
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock().await;
        SessionSnapshot {
            language: state.language,
            snippet: state.snippet.clone(),
            result: state.result.clone(),
            is_translating: self.is_translating(),
        }
    }

    pub fn is_translating(&self) -> bool {
        self.translating.load(Ordering::Acquire)
    }

    /// Translates the current snippet.
    ///
    /// The snippet and language are captured when the call starts; edits made
    /// while the request is outstanding do not affect it. The result becomes
    /// current whatever it holds, and a history record is appended only when
    /// it carries code.
    pub async fn submit(&self) -> SubmitOutcome {
        let (snippet, language) = {
            let state = self.state.lock().await;
            if state.snippet.trim().is_empty() {
                return SubmitOutcome::Rejected(RejectReason::BlankSnippet);
            }
            (state.snippet.clone(), state.language)
        };

        if self
            .translating
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("[SessionController] Submit rejected: translation in flight");
            return SubmitOutcome::Rejected(RejectReason::AlreadyTranslating);
        }
        let guard = TranslatingGuard {
            flag: &self.translating,
        };

        tracing::info!(
            "[SessionController] Translating {} snippet ({} bytes)",
            language,
            snippet.len()
        );
        let result = self.client.translate(&snippet, language).await;

        self.state.lock().await.result = Some(result.clone());
        drop(guard);

        if !result.has_code() {
            tracing::info!(
                "[SessionController] Translation finished without code: {}",
                result.errors.as_deref().unwrap_or("no code returned")
            );
            return SubmitOutcome::Completed {
                result,
                recorded: false,
            };
        }

        let record = HistoryRecord::new(language, snippet, result.clone());
        let record_id = record.id.clone();
        let recorded = match self.history.lock().await.append(record).await {
            Ok(()) => {
                tracing::info!("[SessionController] Translation recorded as {}", record_id);
                true
            }
            Err(e) => {
                tracing::error!("[SessionController] Translation not recorded: {}", e);
                false
            }
        };

        SubmitOutcome::Completed { result, recorded }
    }

    /// Switches language and resets the snippet to that language's default.
    /// The current result is kept.
    pub async fn change_language(&self, language: SourceLanguage) {
        let mut state = self.state.lock().await;
        state.language = language;
        state.snippet = default_snippet(language).to_string();
    }

    /// Loads a template (the default snippet for unknown keys) and clears
    /// the current result.
    pub async fn load_template(&self, language: SourceLanguage, key: &str) {
        let mut state = self.state.lock().await;
        state.language = language;
        state.snippet = template_or_default(language, key).to_string();
        state.result = None;
    }

    /// Restores a past translation without calling the client.
    pub async fn select_history(&self, record: &HistoryRecord) {
        let mut state = self.state.lock().await;
        state.language = record.source_language;
        state.snippet = record.snippet.clone();
        state.result = Some(record.result.clone());
    }

    /// Restores the record at `index` (0 is the newest), if there is one.
    pub async fn select_history_at(&self, index: usize) -> Option<HistoryRecord> {
        let record = self.history_record(index).await?;
        self.select_history(&record).await;
        Some(record)
    }

    /// Replaces the snippet with imported text.
    ///
    /// A recognized `extension` also switches the language; anything else
    /// leaves it as it is. Returns the language now in effect.
    pub async fn import_snippet(
        &self,
        text: impl Into<String>,
        extension: Option<&str>,
    ) -> SourceLanguage {
        let mut state = self.state.lock().await;
        state.snippet = text.into();
        if let Some(language) = extension.and_then(SourceLanguage::from_extension) {
            state.language = language;
        }
        state.language
    }

    pub async fn set_snippet(&self, text: impl Into<String>) {
        self.state.lock().await.snippet = text.into();
    }

    /// Current translated code, when there is some to display.
    pub async fn current_code(&self) -> Option<String> {
        self.state
            .lock()
            .await
            .result
            .as_ref()
            .filter(|result| result.has_code())
            .map(|result| result.translated_code.clone())
    }

    pub async fn history(&self) -> Vec<HistoryRecord> {
        self.history.lock().await.records().to_vec()
    }

    pub async fn history_record(&self, index: usize) -> Option<HistoryRecord> {
        self.history.lock().await.get(index).cloned()
    }

    pub async fn clear_history(&self) -> Result<()> {
        self.history.lock().await.clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aikenize_core::history::seed::SEED_RECORD_ID;
    use aikenize_core::template::find_template;
    use aikenize_core::{HistoryLog, HistoryRepository, TranslationResult};
    use aikenize_infrastructure::{InMemoryStore, KeyValueHistoryRepository};
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    /// Client that records calls and can be held open until released.
    struct MockClient {
        calls: AtomicUsize,
        seen: StdMutex<Vec<(String, SourceLanguage)>>,
        response: TranslationResult,
        gate: Option<Arc<Notify>>,
    }

    impl MockClient {
        fn returning(response: TranslationResult) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                seen: StdMutex::new(Vec::new()),
                response,
                gate: None,
            }
        }

        fn gated(response: TranslationResult, gate: Arc<Notify>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::returning(response)
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TranslationClient for MockClient {
        async fn translate(&self, snippet: &str, language: SourceLanguage) -> TranslationResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen
                .lock()
                .unwrap()
                .push((snippet.to_string(), language));
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.response.clone()
        }
    }

    fn repository() -> Arc<dyn HistoryRepository> {
        Arc::new(KeyValueHistoryRepository::new(Arc::new(InMemoryStore::new())))
    }

    async fn controller_with(
        client: Arc<MockClient>,
        repository: Arc<dyn HistoryRepository>,
        seed: bool,
    ) -> Arc<SessionController> {
        let history = HistoryStore::load(repository, seed).await;
        Arc::new(SessionController::new(client, history))
    }

    fn validator_result() -> TranslationResult {
        TranslationResult::success("validator {}", "Mapped to a validator.")
    }

    async fn wait_until_translating(controller: &SessionController) {
        while !controller.is_translating() {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_initial_state() {
        let client = Arc::new(MockClient::returning(validator_result()));
        let controller = controller_with(client, repository(), true).await;

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.language, SourceLanguage::TypeScript);
        assert_eq!(snapshot.snippet, default_snippet(SourceLanguage::TypeScript));
        assert!(snapshot.result.is_none());
        assert!(!snapshot.is_translating);
    }

    #[tokio::test]
    async fn test_blank_snippet_never_calls_client() {
        let client = Arc::new(MockClient::returning(validator_result()));
        let controller = controller_with(client.clone(), repository(), false).await;

        for blank in ["", "   ", "\n\t \n"] {
            controller.set_snippet(blank).await;
            let outcome = controller.submit().await;
            assert_eq!(outcome, SubmitOutcome::Rejected(RejectReason::BlankSnippet));
        }

        assert_eq!(client.calls(), 0);
        assert!(controller.history().await.is_empty());
        assert!(controller.snapshot().await.result.is_none());
    }

    #[tokio::test]
    async fn test_python_submit_records_history_at_front() {
        let client = Arc::new(MockClient::returning(validator_result()));
        let controller = controller_with(client.clone(), repository(), true).await;

        controller.change_language(SourceLanguage::Python).await;
        controller.set_snippet("x = 1").await;
        let outcome = controller.submit().await;

        assert_eq!(
            outcome,
            SubmitOutcome::Completed {
                result: validator_result(),
                recorded: true
            }
        );
        assert_eq!(
            client.seen.lock().unwrap().as_slice(),
            &[("x = 1".to_string(), SourceLanguage::Python)]
        );

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.result, Some(validator_result()));
        assert!(!snapshot.is_translating);

        let history = controller.history().await;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].source_language, SourceLanguage::Python);
        assert_eq!(history[0].snippet, "x = 1");
        assert_eq!(history[0].result, validator_result());
        assert_eq!(history[1].id, SEED_RECORD_ID);
    }

    #[tokio::test]
    async fn test_transport_error_sets_result_without_history() {
        let failure = TranslationResult::failure("Gemini API request failed: connection refused");
        let client = Arc::new(MockClient::returning(failure.clone()));
        let controller = controller_with(client, repository(), true).await;

        let outcome = controller.submit().await;

        assert_eq!(
            outcome,
            SubmitOutcome::Completed {
                result: failure.clone(),
                recorded: false
            }
        );
        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.result, Some(failure));
        assert!(!snapshot.is_translating);
        assert_eq!(controller.history().await.len(), 1);
    }

    #[tokio::test]
    async fn test_double_submit_calls_client_once() {
        let gate = Arc::new(Notify::new());
        let client = Arc::new(MockClient::gated(validator_result(), gate.clone()));
        let controller = controller_with(client.clone(), repository(), false).await;

        let release = async {
            wait_until_translating(&controller).await;
            let second = controller.submit().await;
            gate.notify_one();
            second
        };
        let (first, second) = tokio::join!(controller.submit(), release);

        assert!(matches!(first, SubmitOutcome::Completed { recorded: true, .. }));
        assert_eq!(
            second,
            SubmitOutcome::Rejected(RejectReason::AlreadyTranslating)
        );
        assert_eq!(client.calls(), 1);
        assert_eq!(controller.history().await.len(), 1);
        assert!(!controller.is_translating());
    }

    #[tokio::test]
    async fn test_edits_during_translation_do_not_change_submitted_snippet() {
        let gate = Arc::new(Notify::new());
        let client = Arc::new(MockClient::gated(validator_result(), gate.clone()));
        let controller = controller_with(client.clone(), repository(), false).await;
        controller.set_snippet("const original = 1;").await;

        let task = tokio::spawn({
            let controller = controller.clone();
            async move { controller.submit().await }
        });
        wait_until_translating(&controller).await;

        controller.change_language(SourceLanguage::Python).await;
        controller.set_snippet("edited = 2").await;
        assert!(controller.snapshot().await.is_translating);
        gate.notify_one();
        task.await.unwrap();

        let record = controller.history_record(0).await.unwrap();
        assert_eq!(record.snippet, "const original = 1;");
        assert_eq!(record.source_language, SourceLanguage::TypeScript);

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.snippet, "edited = 2");
        assert_eq!(snapshot.language, SourceLanguage::Python);
    }

    #[tokio::test]
    async fn test_dropped_submit_releases_in_flight_claim() {
        let gate = Arc::new(Notify::new());
        let client = Arc::new(MockClient::gated(validator_result(), gate));
        let controller = controller_with(client.clone(), repository(), false).await;

        let task = tokio::spawn({
            let controller = controller.clone();
            async move { controller.submit().await }
        });
        wait_until_translating(&controller).await;
        task.abort();
        let _ = task.await;

        assert!(!controller.is_translating());
    }

    #[tokio::test]
    async fn test_empty_code_is_not_recorded() {
        let client = Arc::new(MockClient::returning(TranslationResult::success("", "")));
        let controller = controller_with(client, repository(), false).await;

        let outcome = controller.submit().await;

        assert!(matches!(outcome, SubmitOutcome::Completed { recorded: false, .. }));
        assert!(controller.history().await.is_empty());
        assert!(controller.current_code().await.is_none());
    }

    #[tokio::test]
    async fn test_history_is_bounded_through_submits() {
        let client = Arc::new(MockClient::returning(validator_result()));
        let controller = controller_with(client.clone(), repository(), true).await;

        for i in 0..HistoryLog::MAX_ENTRIES + 3 {
            controller.set_snippet(format!("const v = {i};")).await;
            controller.submit().await;
        }

        let history = controller.history().await;
        assert_eq!(history.len(), HistoryLog::MAX_ENTRIES);
        assert_eq!(
            history[0].snippet,
            format!("const v = {};", HistoryLog::MAX_ENTRIES + 2)
        );
        assert!(history.iter().all(|r| r.id != SEED_RECORD_ID));
    }

    #[tokio::test]
    async fn test_change_language_resets_snippet_keeps_result() {
        let client = Arc::new(MockClient::returning(validator_result()));
        let controller = controller_with(client, repository(), false).await;
        controller.submit().await;

        controller.change_language(SourceLanguage::Python).await;

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.language, SourceLanguage::Python);
        assert_eq!(snapshot.snippet, default_snippet(SourceLanguage::Python));
        assert_eq!(snapshot.result, Some(validator_result()));
    }

    #[tokio::test]
    async fn test_load_template_sets_body_and_clears_result() {
        let client = Arc::new(MockClient::returning(validator_result()));
        let controller = controller_with(client, repository(), false).await;
        controller.submit().await;

        controller.load_template(SourceLanguage::Python, "oracle").await;
        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.language, SourceLanguage::Python);
        assert_eq!(
            snapshot.snippet,
            find_template(SourceLanguage::Python, "oracle").unwrap().body
        );
        assert!(snapshot.result.is_none());

        controller.load_template(SourceLanguage::TypeScript, "nope").await;
        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.snippet, default_snippet(SourceLanguage::TypeScript));
    }

    #[tokio::test]
    async fn test_select_history_replays_without_client_call() {
        let client = Arc::new(MockClient::returning(validator_result()));
        let controller = controller_with(client.clone(), repository(), true).await;

        let record = controller.select_history_at(0).await.unwrap();

        assert_eq!(record.id, SEED_RECORD_ID);
        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.language, record.source_language);
        assert_eq!(snapshot.snippet, record.snippet);
        assert_eq!(snapshot.result, Some(record.result));
        assert_eq!(client.calls(), 0);
        assert!(controller.select_history_at(7).await.is_none());
    }

    #[tokio::test]
    async fn test_import_snippet_maps_extensions() {
        let client = Arc::new(MockClient::returning(validator_result()));
        let controller = controller_with(client, repository(), false).await;

        let language = controller.import_snippet("x = 1", Some("PY")).await;
        assert_eq!(language, SourceLanguage::Python);

        let language = controller.import_snippet("let a = 1", Some("js")).await;
        assert_eq!(language, SourceLanguage::TypeScript);

        controller.change_language(SourceLanguage::Python).await;
        let language = controller.import_snippet("fn main() {}", Some("rs")).await;
        assert_eq!(language, SourceLanguage::Python);
        assert_eq!(controller.snapshot().await.snippet, "fn main() {}");

        let language = controller.import_snippet("plain", None).await;
        assert_eq!(language, SourceLanguage::Python);
    }

    #[tokio::test]
    async fn test_history_survives_restart_and_clear_restores_seed() {
        let repository = repository();
        let client = Arc::new(MockClient::returning(validator_result()));

        let controller = controller_with(client.clone(), repository.clone(), true).await;
        controller.submit().await;
        let id = controller.history_record(0).await.unwrap().id;

        let restarted = controller_with(client.clone(), repository.clone(), true).await;
        assert_eq!(restarted.history_record(0).await.unwrap().id, id);

        restarted.clear_history().await.unwrap();
        assert!(restarted.history().await.is_empty());

        let after_clear = controller_with(client, repository, true).await;
        let history = after_clear.history().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, SEED_RECORD_ID);
    }
}
