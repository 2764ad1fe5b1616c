//! # HTTP Adapter
//!
//! The axum-specific layer. Translates routes into `NavCommand`s,
//! resolves the session from a cookie, and renders the selected view as
//! HTML. This is the only module that knows about HTTP.
//!
//! Route map (mirrors the lesson state machine, not the other way
//! around):
//!
//! ```text
//! GET /                         → Goto(Home, 0, 0)
//! GET /lessons                  → Goto(Lesson, 0, 0)
//! GET /lessons/next             → Next
//! GET /lessons/prev             → Prev
//! GET /lessons/{unit}/{lesson}  → Goto(Lesson, unit, lesson)
//! GET /health                   → liveness + catalog counts
//! GET /public/*                 → static assets
//! ```
//!
//! Requests carrying `HX-Request: true` (htmx partial swaps) get the
//! bare lesson fragment; everything else gets full page chrome.
//! Per-request navigation errors never escape as 5xx: the handler falls
//! back to the home view with a client-error status.

pub mod pages;

use std::path::Path as FsPath;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use chrono::{DateTime, Utc};
use log::{debug, info};
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::core::catalog::Catalog;
use crate::core::config::ResolvedConfig;
use crate::core::nav::{self, NavCommand, NavError, NavModel, Page};
use crate::core::session::{self, SessionRegistry};
use crate::core::view::{self, Template};

/// Cookie carrying the opaque session ID.
pub const SESSION_COOKIE: &str = "coursebook_sid";

/// Session cookie lifetime: 30 days.
const SESSION_COOKIE_MAX_AGE: u64 = 86400 * 30;

/// Shared application state passed to axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub registry: Arc<SessionRegistry>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            registry: Arc::new(SessionRegistry::new()),
            started_at: Utc::now(),
        }
    }
}

/// Build the axum router with all routes.
pub fn build_router(state: AppState, public_dir: &FsPath) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/lessons", get(lessons_start))
        .route("/lessons/next", get(lessons_next))
        .route("/lessons/prev", get(lessons_prev))
        .route("/lessons/{unit}/{lesson}", get(lessons_goto))
        .route("/health", get(health))
        .nest_service("/public", ServeDir::new(public_dir))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// Bind and start serving. Returns a handle holding the bound port
/// (useful with port 0 in tests).
pub async fn start(config: &ResolvedConfig, catalog: Arc<Catalog>) -> std::io::Result<ServerHandle> {
    let state = AppState::new(catalog);
    let router = build_router(state, &config.public_dir);

    let addr = format!("{}:{}", config.bind_addr, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;
    info!("Serving on http://{}", local_addr);

    let task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            log::error!("Server error: {}", e);
        }
    });

    Ok(ServerHandle {
        port: local_addr.port(),
        task,
    })
}

/// Handle returned by `start()` — keeps the serve task alive.
pub struct ServerHandle {
    pub port: u16,
    task: JoinHandle<()>,
}

impl ServerHandle {
    /// Wait for the serve task to finish (normally: forever).
    pub async fn wait(self) {
        let _ = self.task.await;
    }
}

// ── Handlers ────────────────────────────────────────────────────────────────

async fn home(State(state): State<AppState>, headers: HeaderMap) -> Response {
    navigate(
        &state,
        &headers,
        NavCommand::Goto { page: Page::Home, unit: 0, lesson: 0 },
    )
}

async fn lessons_start(State(state): State<AppState>, headers: HeaderMap) -> Response {
    navigate(
        &state,
        &headers,
        NavCommand::Goto { page: Page::Lesson, unit: 0, lesson: 0 },
    )
}

async fn lessons_next(State(state): State<AppState>, headers: HeaderMap) -> Response {
    navigate(&state, &headers, NavCommand::Next)
}

async fn lessons_prev(State(state): State<AppState>, headers: HeaderMap) -> Response {
    navigate(&state, &headers, NavCommand::Prev)
}

async fn lessons_goto(
    State(state): State<AppState>,
    Path((unit, lesson)): Path<(usize, usize)>,
    headers: HeaderMap,
) -> Response {
    navigate(
        &state,
        &headers,
        NavCommand::Goto { page: Page::Lesson, unit, lesson },
    )
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "healthy",
        "units": state.catalog.units().len(),
        "lessons": state.catalog.total_lessons(),
        "sessions": state.registry.len(),
        "started_at": state.started_at.to_rfc3339(),
    }))
}

// ── Request plumbing ────────────────────────────────────────────────────────

/// The shared request path: resolve the session, apply the command under
/// the model's lock, select a view, render it with the right status and
/// headers.
fn navigate(state: &AppState, headers: &HeaderMap, command: NavCommand) -> Response {
    let (session_id, issued) = resolve_session_id(headers);
    let fragment = is_fragment_request(headers);

    let model = state.registry.resolve(&session_id);
    let snapshot: NavModel = {
        let mut model = model.lock();
        nav::update(&mut model, &state.catalog, command);
        model.clone()
    };
    debug!(
        "session={} cmd={:?} → page={:?} pos={:?} err={:?}",
        session_id, command, snapshot.page, snapshot.position(), snapshot.error
    );

    let status = match snapshot.error {
        Some(NavError::InvalidPosition { .. }) => StatusCode::BAD_REQUEST,
        Some(NavError::Unavailable) => StatusCode::SERVICE_UNAVAILABLE,
        None => StatusCode::OK,
    };

    let selected = view::select(&snapshot, &state.catalog, fragment);
    let body = match selected.template {
        Template::Home => pages::home(&state.catalog),
        Template::Lesson => {
            let payload = selected.payload.unwrap_or_default();
            if fragment {
                payload
            } else {
                pages::lesson(&payload, &snapshot, &state.catalog)
            }
        }
    };

    let mut response = (status, Html(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("must-revalidate"),
    );
    if issued {
        if let Ok(value) = HeaderValue::from_str(&format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly",
            SESSION_COOKIE, session_id, SESSION_COOKIE_MAX_AGE
        )) {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
    }
    response
}

/// Pull the session ID out of the cookie header, or mint a fresh one.
/// Returns `(id, issued)` where `issued` means a Set-Cookie is owed.
/// Never fails: an unreadable cookie just becomes a new anonymous
/// session.
fn resolve_session_id(headers: &HeaderMap) -> (String, bool) {
    let existing = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(session_cookie_value);

    match existing {
        Some(id) => (id, false),
        None => (session::new_session_id(), true),
    }
}

/// Find our cookie in a `Cookie:` header value.
fn session_cookie_value(raw: &str) -> Option<String> {
    raw.split(';')
        .filter_map(|pair| pair.trim().strip_prefix(SESSION_COOKIE))
        .filter_map(|rest| rest.strip_prefix('='))
        .map(str::to_string)
        .find(|id| !id.is_empty())
}

/// htmx marks partial-swap requests with `HX-Request: true`.
fn is_fragment_request(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.eq_ignore_ascii_case("true"))
}
