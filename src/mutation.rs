//! Asynchronous request state around a single question call.
//!
//! [`QuestionMutation`] mirrors a client-side "mutation": it runs the
//! request on the tokio runtime and exposes whether it is idle, pending, or
//! resolved. Only the most recent `mutate` call is tracked. Starting a new
//! call while one is pending does not cancel the earlier request; its
//! outcome is simply ignored and its callbacks never fire.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;

use crate::api::{QuestionApi, QuestionError, QuestionResponse};

/// Observable state of a [`QuestionMutation`].
#[derive(Debug, Clone, Default)]
pub enum MutationState {
    /// No request has been made yet, or the hook was reset.
    #[default]
    Idle,
    /// A request for `question` is in flight.
    Pending { question: String },
    /// The latest request succeeded.
    Success {
        question: String,
        data: QuestionResponse,
    },
    /// The latest request failed.
    Error {
        question: String,
        error: Arc<QuestionError>,
    },
}

impl MutationState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

type SuccessCallback = Box<dyn FnOnce(&QuestionResponse) + Send>;
type ErrorCallback = Box<dyn FnOnce(&QuestionError) + Send>;

/// Per-call completion callbacks for [`QuestionMutation::mutate`].
#[derive(Default)]
pub struct MutateOptions {
    on_success: Option<SuccessCallback>,
    on_error: Option<ErrorCallback>,
}

impl std::fmt::Debug for MutateOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MutateOptions")
            .field("on_success", &self.on_success.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

impl MutateOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with the response when the request succeeds.
    #[must_use]
    pub fn on_success(mut self, f: impl FnOnce(&QuestionResponse) + Send + 'static) -> Self {
        self.on_success = Some(Box::new(f));
        self
    }

    /// Run `f` with the error when the request fails.
    #[must_use]
    pub fn on_error(mut self, f: impl FnOnce(&QuestionError) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }
}

#[derive(Debug, Default)]
struct Tracked {
    state: MutationState,
    /// Incremented on every `mutate`; stale completions compare against it.
    generation: u64,
}

/// Hook wrapping [`QuestionApi::ask`] in observable async state.
#[derive(Debug, Clone)]
pub struct QuestionMutation {
    api: Arc<dyn QuestionApi>,
    tracked: Arc<Mutex<Tracked>>,
}

impl QuestionMutation {
    #[must_use]
    pub fn new(api: Arc<dyn QuestionApi>) -> Self {
        Self {
            api,
            tracked: Arc::new(Mutex::new(Tracked::default())),
        }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> MutationState {
        self.lock().state.clone()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.lock().state.is_pending()
    }

    /// Return to [`MutationState::Idle`]. A request still in flight keeps
    /// running but no longer updates the state.
    pub fn reset(&self) {
        let mut tracked = self.lock();
        tracked.generation += 1;
        tracked.state = MutationState::Idle;
    }

    /// Start a request for `question` in the background.
    ///
    /// Must be called from within a tokio runtime. The returned handle
    /// resolves once the request has settled and callbacks have run.
    pub fn mutate(&self, question: impl Into<String>, options: MutateOptions) -> JoinHandle<()> {
        let question = question.into();
        let generation = self.begin(&question);

        let api = Arc::clone(&self.api);
        let tracked = Arc::clone(&self.tracked);

        tokio::spawn(async move {
            let result = api.ask(&question).await.map_err(Arc::new);

            if !settle(&tracked, generation, &question, &result) {
                tracing::debug!(
                    name: "mutation.superseded",
                    generation,
                    "Ignoring result of superseded question request"
                );
                return;
            }

            match &result {
                Ok(data) => {
                    if let Some(on_success) = options.on_success {
                        on_success(data);
                    }
                }
                Err(err) => {
                    if let Some(on_error) = options.on_error {
                        on_error(err.as_ref());
                    }
                }
            }
        })
    }

    /// Run a request and wait for its outcome.
    pub async fn mutate_async(
        &self,
        question: impl Into<String>,
    ) -> Result<QuestionResponse, Arc<QuestionError>> {
        let question = question.into();
        let generation = self.begin(&question);

        let result = self.api.ask(&question).await.map_err(Arc::new);
        settle(&self.tracked, generation, &question, &result);
        result
    }

    fn begin(&self, question: &str) -> u64 {
        let mut tracked = self.lock();
        tracked.generation += 1;
        tracked.state = MutationState::Pending {
            question: question.to_string(),
        };
        tracked.generation
    }

    fn lock(&self) -> MutexGuard<'_, Tracked> {
        self.tracked.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Record the outcome if `generation` is still the latest call.
fn settle(
    tracked: &Mutex<Tracked>,
    generation: u64,
    question: &str,
    result: &Result<QuestionResponse, Arc<QuestionError>>,
) -> bool {
    let mut tracked = tracked.lock().unwrap_or_else(PoisonError::into_inner);
    if tracked.generation != generation {
        return false;
    }

    tracked.state = match result {
        Ok(data) => MutationState::Success {
            question: question.to_string(),
            data: data.clone(),
        },
        Err(error) => MutationState::Error {
            question: question.to_string(),
            error: Arc::clone(error),
        },
    };
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::{Semaphore, oneshot};

    /// Backend double returning queued outcomes, optionally gated.
    #[derive(Debug, Default)]
    struct ScriptedApi {
        outcomes: Mutex<VecDeque<Result<QuestionResponse, u16>>>,
        gate: Option<Arc<Semaphore>>,
        calls: AtomicUsize,
    }

    impl ScriptedApi {
        fn new(outcomes: Vec<Result<QuestionResponse, u16>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into()),
                ..Self::default()
            }
        }

        fn gated(outcomes: Vec<Result<QuestionResponse, u16>>, gate: Arc<Semaphore>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::new(outcomes)
            }
        }
    }

    #[async_trait::async_trait]
    impl QuestionApi for ScriptedApi {
        async fn ask(&self, _question: &str) -> Result<QuestionResponse, QuestionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let outcome = self.outcomes.lock().unwrap().pop_front();
            if let Some(gate) = &self.gate {
                gate.acquire().await.unwrap().forget();
            }
            match outcome {
                Some(Ok(response)) => Ok(response),
                Some(Err(code)) => Err(QuestionError::Status(
                    reqwest::StatusCode::from_u16(code).unwrap(),
                )),
                None => Err(QuestionError::EmptyQuestion),
            }
        }
    }

    fn answer(text: &str) -> QuestionResponse {
        QuestionResponse {
            answer: text.to_string(),
            sources: vec!["https://example.com/a".to_string()],
        }
    }

    #[tokio::test]
    async fn starts_idle() {
        let mutation = QuestionMutation::new(Arc::new(ScriptedApi::default()));
        assert!(mutation.state().is_idle());
        assert!(!mutation.is_pending());
    }

    #[tokio::test]
    async fn success_runs_callback_and_records_data() {
        let mutation = QuestionMutation::new(Arc::new(ScriptedApi::new(vec![Ok(answer("hi"))])));
        let (tx, rx) = oneshot::channel();

        mutation
            .mutate(
                "q",
                MutateOptions::new().on_success(move |res| {
                    let _ = tx.send(res.answer.clone());
                }),
            )
            .await
            .unwrap();

        assert_eq!(rx.await.unwrap(), "hi");
        match mutation.state() {
            MutationState::Success { question, data } => {
                assert_eq!(question, "q");
                assert_eq!(data, answer("hi"));
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[tokio::test]
    async fn failure_runs_error_callback() {
        let mutation = QuestionMutation::new(Arc::new(ScriptedApi::new(vec![Err(500)])));
        let (tx, rx) = oneshot::channel();

        mutation
            .mutate(
                "q",
                MutateOptions::new()
                    .on_success(|_| panic!("must not succeed"))
                    .on_error(move |err| {
                        let _ = tx.send(err.status().map(|s| s.as_u16()));
                    }),
            )
            .await
            .unwrap();

        assert_eq!(rx.await.unwrap(), Some(500));
        assert!(mutation.state().is_error());
    }

    #[tokio::test]
    async fn pending_until_backend_answers() {
        let gate = Arc::new(Semaphore::new(0));
        let api = ScriptedApi::gated(vec![Ok(answer("late"))], Arc::clone(&gate));
        let mutation = QuestionMutation::new(Arc::new(api));

        let handle = mutation.mutate("q", MutateOptions::new());
        assert!(mutation.is_pending());

        gate.add_permits(1);
        handle.await.unwrap();
        assert!(mutation.state().is_success());
    }

    #[tokio::test]
    async fn second_call_does_not_cancel_first_but_supersedes_it() {
        let gate = Arc::new(Semaphore::new(0));
        let api = Arc::new(ScriptedApi::gated(
            vec![Ok(answer("first")), Ok(answer("second"))],
            Arc::clone(&gate),
        ));
        let mutation = QuestionMutation::new(Arc::clone(&api) as Arc<dyn QuestionApi>);
        let first_fired = Arc::new(AtomicUsize::new(0));
        let second_fired = Arc::new(AtomicUsize::new(0));

        let f = Arc::clone(&first_fired);
        let first = mutation.mutate(
            "one",
            MutateOptions::new().on_success(move |_| {
                f.fetch_add(1, Ordering::SeqCst);
            }),
        );
        let s = Arc::clone(&second_fired);
        let second = mutation.mutate(
            "two",
            MutateOptions::new().on_success(move |_| {
                s.fetch_add(1, Ordering::SeqCst);
            }),
        );

        gate.add_permits(2);
        first.await.unwrap();
        second.await.unwrap();

        assert_eq!(api.calls.load(Ordering::SeqCst), 2);
        assert_eq!(first_fired.load(Ordering::SeqCst), 0);
        assert_eq!(second_fired.load(Ordering::SeqCst), 1);
        match mutation.state() {
            MutationState::Success { question, .. } => assert_eq!(question, "two"),
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[tokio::test]
    async fn mutate_async_returns_outcome() {
        let mutation = QuestionMutation::new(Arc::new(ScriptedApi::new(vec![
            Ok(answer("ok")),
            Err(503),
        ])));

        let ok = mutation.mutate_async("a").await.unwrap();
        assert_eq!(ok.answer, "ok");

        let err = mutation.mutate_async("b").await.unwrap_err();
        assert_eq!(err.status().map(|s| s.as_u16()), Some(503));
        assert!(mutation.state().is_error());
    }

    #[tokio::test]
    async fn reset_discards_in_flight_result() {
        let gate = Arc::new(Semaphore::new(0));
        let api = ScriptedApi::gated(vec![Ok(answer("late"))], Arc::clone(&gate));
        let mutation = QuestionMutation::new(Arc::new(api));

        let handle = mutation.mutate("q", MutateOptions::new());
        mutation.reset();
        gate.add_permits(1);
        handle.await.unwrap();

        assert!(mutation.state().is_idle());
    }
}
