//! End-to-end chat flows through the router.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    routing::post,
};
use jobs_rag_chat::{
    AppState,
    api::{QuestionApi, QuestionClient, QuestionError, QuestionResponse},
    chat::{FAILURE_MESSAGE, Message, Role},
    config::AppConfig,
    server::build_router,
    session::SessionStore,
};
use tokio::sync::Semaphore;
use tower::ServiceExt;

#[derive(Debug)]
struct FakeBackend {
    outcome: Result<QuestionResponse, reqwest::StatusCode>,
    gate: Option<Arc<Semaphore>>,
    calls: AtomicUsize,
}

impl FakeBackend {
    fn answering(answer: &str, sources: &[&str]) -> Self {
        Self {
            outcome: Ok(QuestionResponse {
                answer: answer.to_string(),
                sources: sources.iter().map(ToString::to_string).collect(),
            }),
            gate: None,
            calls: AtomicUsize::new(0),
        }
    }

    fn failing(status: reqwest::StatusCode) -> Self {
        Self {
            outcome: Err(status),
            gate: None,
            calls: AtomicUsize::new(0),
        }
    }

    fn gated(mut self, gate: &Arc<Semaphore>) -> Self {
        self.gate = Some(Arc::clone(gate));
        self
    }
}

#[async_trait::async_trait]
impl QuestionApi for FakeBackend {
    async fn ask(&self, _question: &str) -> Result<QuestionResponse, QuestionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        self.outcome.clone().map_err(QuestionError::Status)
    }
}

fn app(backend: &Arc<FakeBackend>) -> Router {
    app_with(Arc::clone(backend) as Arc<dyn QuestionApi>)
}

fn app_with(api: Arc<dyn QuestionApi>) -> Router {
    build_router(AppState {
        sessions: SessionStore::new(api),
        config: Arc::new(AppConfig::default()),
    })
}

/// Serve `body` with 200 for every `POST /question` on an ephemeral port.
async fn spawn_raw_backend(body: &'static str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let backend = Router::new().route("/question", post(move || async move { body }));
    tokio::spawn(async move {
        axum::serve(listener, backend).await.unwrap();
    });
    format!("http://{addr}")
}

/// An address nothing listens on.
async fn closed_port() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

struct Reply {
    status: StatusCode,
    set_cookie: Option<String>,
    retarget: Option<String>,
    body: String,
}

async fn send(app: &Router, request: Request<Body>) -> Reply {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string());
    let retarget = response
        .headers()
        .get("hx-retarget")
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    Reply {
        status,
        set_cookie,
        retarget,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

async fn get(app: &Router, uri: &str) -> Reply {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_form(app: &Router, uri: &str, fields: &[(&str, &str)]) -> Reply {
    let body = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish();
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// Open the page and pull the session id out of the submit URL.
async fn open_session(app: &Router) -> String {
    let page = get(app, "/").await;
    assert_eq!(page.status, StatusCode::OK);
    let start = page.body.find("/chat/").expect("page links a session") + "/chat/".len();
    let rest = &page.body[start..];
    rest[..rest.find('/').unwrap()].to_string()
}

async fn messages(app: &Router, id: &str) -> Vec<Message> {
    let reply = get(app, &format!("/chat/{id}/messages")).await;
    assert_eq!(reply.status, StatusCode::OK);
    serde_json::from_str(&reply.body).unwrap()
}

async fn wait_for_messages(app: &Router, id: &str, count: usize) -> Vec<Message> {
    for _ in 0..200 {
        let current = messages(app, id).await;
        if current.len() >= count {
            return current;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("transcript never reached {count} messages");
}

#[tokio::test]
async fn page_starts_empty_with_suggestions() {
    let backend = Arc::new(FakeBackend::answering("x", &[]));
    let app = app(&backend);

    let page = get(&app, "/").await;
    assert!(page.body.starts_with("<!DOCTYPE html>"));
    assert!(page.body.contains("data-phase=\"empty\""));
    assert!(page.body.contains("Jobs RAG Assistant"));
    assert!(page.body.contains("Review de empleados en Mercado Libre"));
    assert!(page.body.contains("This AI assistant may produce inaccurate information."));
}

#[tokio::test]
async fn question_is_answered_with_sources() {
    let gate = Arc::new(Semaphore::new(0));
    let backend = Arc::new(
        FakeBackend::answering("El salario promedio es...", &[
            "https://example.com/b",
            "https://example.com/a",
        ])
        .gated(&gate),
    );
    let app = app(&backend);
    let id = open_session(&app).await;

    let panel = post_form(&app, &format!("/chat/{id}/submit"), &[(
        "message",
        "  Salarios en Naranja X ",
    )])
    .await;
    assert_eq!(panel.status, StatusCode::OK);
    assert!(panel.body.contains("data-phase=\"pending\""));
    assert!(panel.body.contains("Thinking..."));

    let pending = messages(&app, &id).await;
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].role, Role::User);
    assert_eq!(pending[0].content, "Salarios en Naranja X");

    gate.add_permits(1);
    let settled = wait_for_messages(&app, &id, 2).await;
    assert_eq!(settled[1].role, Role::Assistant);
    assert_eq!(settled[1].content, "El salario promedio es...");
    assert_eq!(settled[1].sources(), [
        "https://example.com/b",
        "https://example.com/a"
    ]);

    let panel = get(&app, &format!("/chat/{id}")).await;
    assert!(panel.body.contains("data-phase=\"conversing\""));
    assert!(!panel.body.contains("Thinking..."));
    let b = panel.body.find("href=\"https://example.com/b\"").unwrap();
    let a = panel.body.find("href=\"https://example.com/a\"").unwrap();
    assert!(b < a);
}

#[tokio::test]
async fn backend_failure_shows_apology() {
    let backend = Arc::new(FakeBackend::failing(
        reqwest::StatusCode::SERVICE_UNAVAILABLE,
    ));
    let app = app(&backend);
    let id = open_session(&app).await;

    post_form(&app, &format!("/chat/{id}/submit"), &[("message", "hola")]).await;

    let settled = wait_for_messages(&app, &id, 2).await;
    assert_eq!(settled[1].content, FAILURE_MESSAGE);
    assert!(settled[1].sources.is_none());

    let panel = get(&app, &format!("/chat/{id}")).await;
    assert!(panel.body.contains(FAILURE_MESSAGE));
    assert!(!panel.body.contains("Service Unavailable"));
}

async fn assert_apology_without_sources(app: &Router) {
    let id = open_session(app).await;
    post_form(app, &format!("/chat/{id}/submit"), &[("message", "hola")]).await;

    let settled = wait_for_messages(app, &id, 2).await;
    assert_eq!(settled[1].role, Role::Assistant);
    assert_eq!(settled[1].content, FAILURE_MESSAGE);
    assert!(settled[1].sources.is_none());

    let panel = get(app, &format!("/chat/{id}")).await;
    assert!(panel.body.contains("data-phase=\"conversing\""));
    assert!(panel.body.contains(FAILURE_MESSAGE));
}

#[tokio::test]
async fn unreachable_backend_shows_apology() {
    let client = QuestionClient::new(closed_port().await).unwrap();
    let app = app_with(Arc::new(client));
    assert_apology_without_sources(&app).await;
}

#[tokio::test]
async fn undecodable_answer_shows_apology() {
    let base = spawn_raw_backend("<html>not json</html>").await;
    let client = QuestionClient::new(base).unwrap();
    let app = app_with(Arc::new(client));
    assert_apology_without_sources(&app).await;
}

#[tokio::test]
async fn pending_poll_swaps_only_the_transcript() {
    let gate = Arc::new(Semaphore::new(0));
    let backend = Arc::new(FakeBackend::answering("Respuesta", &[]).gated(&gate));
    let app = app(&backend);
    let id = open_session(&app).await;
    let transcript = format!("/chat/{id}/transcript");

    post_form(&app, &format!("/chat/{id}/submit"), &[("message", "hola")]).await;
    post_form(&app, &format!("/chat/{id}/input"), &[("message", "segunda preg")]).await;

    let poll = get(&app, &transcript).await;
    assert_eq!(poll.status, StatusCode::OK);
    assert!(poll.retarget.is_none());
    assert!(poll.body.starts_with("<div id=\"chat-messages\""));
    assert!(poll.body.contains("Thinking..."));
    assert!(!poll.body.contains("<textarea"));

    gate.add_permits(1);
    wait_for_messages(&app, &id, 2).await;

    let settled = get(&app, &transcript).await;
    assert_eq!(settled.retarget.as_deref(), Some("#chat-panel"));
    assert!(settled.body.contains("data-phase=\"conversing\""));
    assert!(settled.body.contains("Respuesta"));
    assert!(settled.body.contains("hx-preserve=\"true\""));
    assert!(settled.body.contains(">segunda preg</textarea>"));
    assert!(!settled.body.contains("Thinking..."));
}

#[tokio::test]
async fn blank_submit_is_a_no_op() {
    let backend = Arc::new(FakeBackend::answering("x", &[]));
    let app = app(&backend);
    let id = open_session(&app).await;

    let panel = post_form(&app, &format!("/chat/{id}/submit"), &[("message", "   ")]).await;
    assert_eq!(panel.status, StatusCode::OK);
    assert!(panel.body.contains("data-phase=\"empty\""));
    assert!(messages(&app, &id).await.is_empty());
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn submit_while_pending_is_ignored() {
    let gate = Arc::new(Semaphore::new(0));
    let backend = Arc::new(FakeBackend::answering("uno", &[]).gated(&gate));
    let app = app(&backend);
    let id = open_session(&app).await;
    let submit = format!("/chat/{id}/submit");

    post_form(&app, &submit, &[("message", "primera")]).await;
    let panel = post_form(&app, &submit, &[("message", "segunda")]).await;
    assert!(panel.body.contains("data-phase=\"pending\""));
    assert_eq!(messages(&app, &id).await.len(), 1);

    gate.add_permits(1);
    let settled = wait_for_messages(&app, &id, 2).await;
    assert_eq!(settled.len(), 2);
    assert_eq!(settled[0].content, "primera");
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn suggestion_fills_input_without_sending() {
    let backend = Arc::new(FakeBackend::answering("x", &[]));
    let app = app(&backend);
    let id = open_session(&app).await;

    let panel = post_form(&app, &format!("/chat/{id}/suggestions/1"), &[]).await;
    assert_eq!(panel.status, StatusCode::OK);
    assert!(panel.body.contains("data-phase=\"empty\""));
    assert!(panel.body.contains(">Salarios en Naranja X</textarea>"));
    assert!(messages(&app, &id).await.is_empty());
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);

    let missing = post_form(&app, &format!("/chat/{id}/suggestions/9"), &[]).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn input_is_synced_to_the_session() {
    let backend = Arc::new(FakeBackend::answering("x", &[]));
    let app = app(&backend);
    let id = open_session(&app).await;

    let reply = post_form(&app, &format!("/chat/{id}/input"), &[("message", "borrador")]).await;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);

    let panel = get(&app, &format!("/chat/{id}")).await;
    assert!(panel.body.contains(">borrador</textarea>"));
}

#[tokio::test]
async fn unknown_session_asks_for_reload() {
    let backend = Arc::new(FakeBackend::answering("x", &[]));
    let app = app(&backend);

    let panel = get(&app, "/chat/does-not-exist").await;
    assert_eq!(panel.status, StatusCode::NOT_FOUND);
    assert!(panel.body.contains("id=\"chat-panel\""));
    assert!(panel.body.contains("Reload the page"));

    let submit = post_form(&app, "/chat/does-not-exist/submit", &[("message", "hola")]).await;
    assert_eq!(submit.status, StatusCode::NOT_FOUND);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);

    let poll = get(&app, "/chat/does-not-exist/transcript").await;
    assert_eq!(poll.status, StatusCode::NOT_FOUND);

    let json = get(&app, "/chat/does-not-exist/messages").await;
    assert_eq!(json.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn theme_toggle_sets_cookie() {
    let backend = Arc::new(FakeBackend::answering("x", &[]));
    let app = app(&backend);

    let dark = post_form(&app, "/theme", &[("dark", "true")]).await;
    assert_eq!(dark.status, StatusCode::OK);
    assert!(dark.set_cookie.unwrap().starts_with("theme=dark"));
    assert!(dark.body.contains("data-theme=\"dark\""));

    let light = post_form(&app, "/theme", &[]).await;
    assert!(light.set_cookie.unwrap().starts_with("theme=light"));

    let request = Request::get("/")
        .header(header::COOKIE, "theme=dark")
        .body(Body::empty())
        .unwrap();
    let page = send(&app, request).await;
    assert!(page.body.contains("class=\"dark\""));
}
