use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use std::sync::Arc;

use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use tracing::info;

use crate::AppState;
use crate::api::{QuestionApi, QuestionClient};
use crate::chat::{ChatPhase, Message};
use crate::config::AppConfig;
use crate::session::{ChatSession, SessionStore};
use crate::theme::Theme;
use crate::ui;

/// Directory served under `/static`.
pub const STATIC_DIR: &str = "static";

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let client = QuestionClient::new(&config.backend.base_url)?;
    info!(
        name: "backend.config.loaded",
        endpoint = %client.endpoint(),
        "Question backend configured"
    );

    let api: Arc<dyn QuestionApi> = Arc::new(client);
    let state = AppState {
        sessions: SessionStore::new(api),
        config: Arc::clone(&config),
    };

    spawn_session_sweeper(&state);

    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/chat/{id}", get(panel_handler))
        .route("/chat/{id}/transcript", get(transcript_handler))
        .route("/chat/{id}/submit", post(submit_handler))
        .route("/chat/{id}/input", post(input_handler))
        .route("/chat/{id}/suggestions/{index}", post(suggestion_handler))
        .route("/chat/{id}/messages", get(messages_handler))
        .route("/theme", post(theme_handler))
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Periodically drop sessions that have been idle past the configured timeout.
fn spawn_session_sweeper(state: &AppState) {
    let sessions = state.sessions.clone();
    let idle_timeout = state.config.session.idle_timeout();
    let mut interval = tokio::time::interval(state.config.session.sweep_interval());

    tokio::spawn(async move {
        loop {
            interval.tick().await;
            let removed = sessions.cleanup_expired_with_timeout(idle_timeout);
            if removed > 0 {
                info!(
                    name: "session.swept",
                    removed,
                    remaining = sessions.len(),
                    "Expired chat sessions removed"
                );
            }
        }
    });
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// Returned for session ids the store no longer knows.
#[derive(Debug)]
struct SessionExpired;

impl IntoResponse for SessionExpired {
    fn into_response(self) -> Response {
        (StatusCode::NOT_FOUND, Html(ui::render_session_expired())).into_response()
    }
}

fn session(state: &AppState, id: &str) -> Result<ChatSession, SessionExpired> {
    state.sessions.get(id).ok_or_else(|| {
        tracing::debug!(name: "chat.session.unknown", session_id = %id, "Unknown session");
        SessionExpired
    })
}

fn panel(state: &AppState, session: &ChatSession) -> Html<String> {
    Html(ui::render_panel(session.snapshot(), &state.config.ui))
}

/// GET / - Start a page session and render the full page.
async fn index_handler(State(state): State<AppState>, jar: CookieJar) -> Html<String> {
    let session = state.sessions.create();
    info!(
        name: "chat.session.created",
        session_id = %session.id(),
        "Chat session created"
    );
    Html(ui::render_page(
        session.snapshot(),
        Theme::from_cookies(&jar),
        &state.config.ui,
    ))
}

/// GET /chat/{id} - Current panel.
async fn panel_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, SessionExpired> {
    let session = session(&state, &id)?;
    Ok(panel(&state, &session))
}

/// GET /chat/{id}/transcript - Poll target of the pending loader.
///
/// While pending only the transcript is returned, so the form is never
/// re-rendered under the user's cursor. Once settled the response is
/// retargeted to the whole panel to re-enable sending.
async fn transcript_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, SessionExpired> {
    let snapshot = session(&state, &id)?.snapshot();
    if snapshot.phase == ChatPhase::Pending {
        return Ok(Html(ui::render_transcript(snapshot, &state.config.ui)).into_response());
    }

    let retarget = format!("#{}", ui::chat::CHAT_PANEL_ID);
    Ok((
        [("HX-Retarget", retarget), ("HX-Reswap", "outerHTML".to_string())],
        Html(ui::render_settled_panel(snapshot, &state.config.ui)),
    )
        .into_response())
}

/// Form body posted by the prompt input.
#[derive(Debug, Deserialize)]
struct MessageForm {
    #[serde(default)]
    message: String,
}

/// POST /chat/{id}/submit - Send the input; a no-op when blank or pending.
async fn submit_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<MessageForm>,
) -> Result<Html<String>, SessionExpired> {
    let session = session(&state, &id)?;
    // The request runs detached; the pending loader polls for its outcome.
    let _ = session.submit(form.message);
    Ok(panel(&state, &session))
}

/// POST /chat/{id}/input - Sync the input buffer.
async fn input_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<MessageForm>,
) -> Result<StatusCode, SessionExpired> {
    session(&state, &id)?.input_changed(form.message);
    Ok(StatusCode::NO_CONTENT)
}

/// POST /chat/{id}/suggestions/{index} - Fill the input with a suggestion.
async fn suggestion_handler(
    State(state): State<AppState>,
    Path((id, index)): Path<(String, usize)>,
) -> Result<Response, SessionExpired> {
    let session = session(&state, &id)?;
    if !session.select_suggestion(index) {
        return Ok((StatusCode::NOT_FOUND, "Unknown suggestion").into_response());
    }
    Ok(panel(&state, &session).into_response())
}

/// GET /chat/{id}/messages - Transcript as JSON.
async fn messages_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Message>>, StatusCode> {
    let session = state.sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(session.snapshot().messages))
}

/// Form body posted by the theme switch. An unchecked box sends nothing.
#[derive(Debug, Deserialize)]
struct ThemeForm {
    #[serde(default)]
    dark: Option<String>,
}

/// POST /theme - Persist the theme and return a fresh toggle.
async fn theme_handler(jar: CookieJar, Form(form): Form<ThemeForm>) -> impl IntoResponse {
    let theme = Theme::from_toggle(form.dark.is_some());
    tracing::debug!(name: "theme.changed", theme = theme.as_str(), "Theme changed");
    (
        jar.add(theme.cookie()),
        Html(ui::render_theme_toggle(theme)),
    )
}
