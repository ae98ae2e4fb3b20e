use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::{self, Envelope};
use crate::errors::AppError;
use crate::models::{Assistant, AssistantStatus, ListQuery, Page, UpdateAssistantRequest};
use crate::session::Session;
use crate::state::AppState;

// GET /api/assistants
pub async fn list_assistants(
    State(state): State<Arc<AppState>>,
    session: Session,
    Query(query): Query<ListQuery>,
) -> Result<Json<Envelope<Page<Assistant>>>, AppError> {
    let token = session.require_token()?;
    let page = api::assistants::list(&state.api, &token, &query).await?;
    Ok(Json(Envelope::ok("Assistants fetched", page)))
}

// GET /api/assistants/:id
pub async fn get_assistant(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Assistant>>, AppError> {
    let token = session.require_token()?;
    let assistant = api::assistants::get(&state.api, &token, &id).await?;
    Ok(Json(Envelope::ok("Assistant fetched", assistant)))
}

// PUT /api/assistants/:id
pub async fn update_assistant(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
    Json(body): Json<UpdateAssistantRequest>,
) -> Result<Json<Envelope<Assistant>>, AppError> {
    let token = session.require_token()?;
    let assistant =
        api::assistants::update(&state.api, &token, &id, &body.normalized()).await?;
    Ok(Json(Envelope::ok("Assistant updated", assistant)))
}

// DELETE /api/assistants/:id
pub async fn delete_assistant(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<Envelope<()>>, AppError> {
    let token = session.require_token()?;
    let message = api::assistants::delete(&state.api, &token, &id).await?;
    tracing::info!("deleted assistant {id}");
    Ok(Json(Envelope::ok(message, ())))
}

#[derive(Deserialize)]
pub struct StatusRequest {
    pub status: AssistantStatus,
}

// PATCH /api/assistants/:id/status
pub async fn set_status(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
    Json(body): Json<StatusRequest>,
) -> Result<Json<Envelope<Assistant>>, AppError> {
    let token = session.require_token()?;
    let assistant = api::assistants::set_status(&state.api, &token, &id, body.status).await?;
    tracing::info!("assistant {id} is now {}", body.status.as_str());
    Ok(Json(Envelope::ok("Assistant status updated", assistant)))
}
