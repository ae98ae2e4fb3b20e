use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;

use crate::api::{self, Envelope};
use crate::errors::AppError;
use crate::forms::validation::sanitize_mobile;
use crate::forms::FieldErrors;
use crate::models::{CallRecord, ListQuery, Page, SampleCallRequest};
use crate::session::Session;
use crate::state::AppState;

// POST /api/calls/sample
pub async fn sample_call(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(mut body): Json<SampleCallRequest>,
) -> Result<Json<Envelope<CallRecord>>, AppError> {
    let token = session.require_token()?;

    let mut errors = FieldErrors::new();
    if body.assistant_id.trim().is_empty() {
        errors.insert("assistant_id".to_string(), "Select an assistant".to_string());
    }
    let digits = sanitize_mobile(&body.recipient_phone_number);
    if digits.is_empty() {
        errors.insert(
            "recipient_phone_number".to_string(),
            "Recipient phone number is required".to_string(),
        );
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }
    body.recipient_phone_number = body.recipient_phone_number.trim().to_string();

    let call = api::calls::sample_call(&state.api, &token, &body).await?;
    tracing::info!("sample call {} queued for assistant {}", call.id, call.assistant_id);
    Ok(Json(Envelope::ok("Sample call started", call)))
}

// GET /api/calls
pub async fn list_calls(
    State(state): State<Arc<AppState>>,
    session: Session,
    Query(query): Query<ListQuery>,
) -> Result<Json<Envelope<Page<CallRecord>>>, AppError> {
    let token = session.require_token()?;
    let page = api::calls::list(&state.api, &token, &query).await?;
    Ok(Json(Envelope::ok("Calls fetched", page)))
}

// GET /api/calls/:id
pub async fn get_call(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<Envelope<CallRecord>>, AppError> {
    let token = session.require_token()?;
    let call = api::calls::get(&state.api, &token, &id).await?;
    Ok(Json(Envelope::ok("Call fetched", call)))
}
