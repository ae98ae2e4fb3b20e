use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::sse::{Event, Sse};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use tokio_stream::wrappers::{IntervalStream, WatchStream};
use tokio_stream::StreamExt;

use super::pages::OFFLINE_HTML;
use crate::api::Envelope;
use crate::errors::AppError;
use crate::services::connectivity::ConnectivityStatus;
use crate::session::wants_html;
use crate::state::AppState;

// GET /api/connectivity
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<Envelope<ConnectivityStatus>> {
    Json(Envelope::ok("Connectivity", state.connectivity.status()))
}

// GET /api/connectivity/events (SSE)
pub async fn events_stream(
    State(state): State<Arc<AppState>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>> {
    let status_stream = WatchStream::new(state.connectivity.subscribe()).map(|status| {
        let data = serde_json::to_string(&status).unwrap_or_default();
        Ok::<_, Infallible>(Event::default().data(data).event("connectivity"))
    });

    let keepalive_stream = IntervalStream::new(tokio::time::interval(Duration::from_secs(30)))
        .map(|_| Ok(Event::default().comment("keepalive")));

    Sse::new(status_stream.merge(keepalive_stream))
}

/// Full-screen "no internet" overlay while the upstream is unreachable.
pub async fn offline_guard(State(state): State<Arc<AppState>>, req: Request, next: Next) -> Response {
    if !state.connectivity.is_offline() {
        return next.run(req).await;
    }

    tracing::debug!("offline, blocking {}", req.uri().path());
    if wants_html(&req) {
        (StatusCode::SERVICE_UNAVAILABLE, Html(OFFLINE_HTML)).into_response()
    } else {
        AppError::Offline.into_response()
    }
}
