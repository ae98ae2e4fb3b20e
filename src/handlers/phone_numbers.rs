use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::phone_numbers::{AvailableQuery, PurchaseRequest};
use crate::api::{self, Envelope};
use crate::errors::AppError;
use crate::forms::FieldErrors;
use crate::models::{AvailableNumber, ListQuery, Page, PhoneNumber};
use crate::session::Session;
use crate::state::AppState;

// GET /api/phone-numbers
pub async fn list_numbers(
    State(state): State<Arc<AppState>>,
    session: Session,
    Query(query): Query<ListQuery>,
) -> Result<Json<Envelope<Page<PhoneNumber>>>, AppError> {
    let token = session.require_token()?;
    let page = api::phone_numbers::list(&state.api, &token, &query).await?;
    Ok(Json(Envelope::ok("Phone numbers fetched", page)))
}

// GET /api/phone-numbers/available
pub async fn search_available(
    State(state): State<Arc<AppState>>,
    session: Session,
    Query(query): Query<AvailableQuery>,
) -> Result<Json<Envelope<Vec<AvailableNumber>>>, AppError> {
    let token = session.require_token()?;
    let numbers = api::phone_numbers::search_available(&state.api, &token, &query).await?;
    Ok(Json(Envelope::ok("Available numbers fetched", numbers)))
}

// POST /api/phone-numbers/purchase
pub async fn purchase(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(body): Json<PurchaseRequest>,
) -> Result<Json<Envelope<PhoneNumber>>, AppError> {
    let token = session.require_token()?;
    if body.number.trim().is_empty() {
        let mut errors = FieldErrors::new();
        errors.insert("number".to_string(), "Phone number is required".to_string());
        return Err(AppError::Validation(errors));
    }

    let number = api::phone_numbers::purchase(&state.api, &token, &body).await?;
    tracing::info!("purchased {} via {}", number.number, number.provider.as_str());
    Ok(Json(Envelope::ok("Phone number purchased", number)))
}

#[derive(Deserialize)]
pub struct AssignRequest {
    pub user_id: String,
}

// POST /api/phone-numbers/:id/assign
pub async fn assign(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
    Json(body): Json<AssignRequest>,
) -> Result<Json<Envelope<PhoneNumber>>, AppError> {
    let token = session.require_token()?;
    if body.user_id.trim().is_empty() {
        let mut errors = FieldErrors::new();
        errors.insert("user_id".to_string(), "Select a user".to_string());
        return Err(AppError::Validation(errors));
    }

    let number = api::phone_numbers::assign(&state.api, &token, &id, &body.user_id).await?;
    Ok(Json(Envelope::ok("Phone number assigned", number)))
}

// POST /api/phone-numbers/:id/unassign
pub async fn unassign(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<Envelope<PhoneNumber>>, AppError> {
    let token = session.require_token()?;
    let number = api::phone_numbers::unassign(&state.api, &token, &id).await?;
    Ok(Json(Envelope::ok("Phone number unassigned", number)))
}

// POST /api/phone-numbers/:id/renew
pub async fn renew(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<Envelope<PhoneNumber>>, AppError> {
    let token = session.require_token()?;
    let number = api::phone_numbers::renew(&state.api, &token, &id).await?;
    Ok(Json(Envelope::ok("Phone number renewed", number)))
}

// DELETE /api/phone-numbers/:id
pub async fn release(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<Envelope<()>>, AppError> {
    let token = session.require_token()?;
    let message = api::phone_numbers::release(&state.api, &token, &id).await?;
    tracing::info!("released phone number {id}");
    Ok(Json(Envelope::ok(message, ())))
}
