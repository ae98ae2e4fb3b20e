use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde_json::json;

use crate::state::AppState;

// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "ok": true,
        "upstream": state.api.base_url(),
        "connectivity": state.connectivity.status(),
    }))
}
