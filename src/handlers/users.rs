use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::{self, Envelope};
use crate::errors::AppError;
use crate::forms::user::{CreateUserForm, EditUserForm};
use crate::forms::FieldErrors;
use crate::models::{ApprovalStatus, ListQuery, Page, User};
use crate::session::Session;
use crate::state::AppState;

// GET /api/users
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    session: Session,
    Query(query): Query<ListQuery>,
) -> Result<Json<Envelope<Page<User>>>, AppError> {
    let token = session.require_token()?;
    let page = api::users::list(&state.api, &token, &query).await?;
    Ok(Json(Envelope::ok("Users fetched", page)))
}

// GET /api/users/approved
pub async fn approved_users(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<Envelope<Vec<User>>>, AppError> {
    let token = session.require_token()?;
    let users = api::users::approved_with_token(&state.api, &token).await?;
    Ok(Json(Envelope::ok("Approved users fetched", users)))
}

// GET /api/users/:id
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<Envelope<User>>, AppError> {
    let token = session.require_token()?;
    let user = api::users::get(&state.api, &token, &id).await?;
    Ok(Json(Envelope::ok("User fetched", user)))
}

// POST /api/users
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(form): Json<CreateUserForm>,
) -> Result<Json<Envelope<User>>, AppError> {
    let token = session.require_token()?;
    let new_user = form.into_new_user().map_err(AppError::Validation)?;

    let user = api::users::create(&state.api, &token, &new_user).await?;
    tracing::info!("created user {}", user.id);
    Ok(Json(Envelope::ok("User created", user)))
}

// PUT /api/users/:id
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
    Json(form): Json<EditUserForm>,
) -> Result<Json<Envelope<User>>, AppError> {
    let token = session.require_token()?;
    let update = form.into_update().map_err(AppError::Validation)?;

    let user = api::users::update(&state.api, &token, &id, &update).await?;
    Ok(Json(Envelope::ok("User updated", user)))
}

// DELETE /api/users/:id
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<Envelope<()>>, AppError> {
    let token = session.require_token()?;
    let message = api::users::delete(&state.api, &token, &id).await?;
    tracing::info!("deleted user {id}");
    Ok(Json(Envelope::ok(message, ())))
}

#[derive(Deserialize)]
pub struct ApprovalRequest {
    pub approval_status: ApprovalStatus,
}

// PATCH /api/users/:id/approval
pub async fn set_approval(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
    Json(body): Json<ApprovalRequest>,
) -> Result<Json<Envelope<User>>, AppError> {
    let token = session.require_token()?;
    let user = api::users::set_approval(&state.api, &token, &id, body.approval_status).await?;
    tracing::info!("user {id} is now {}", body.approval_status.as_str());
    Ok(Json(Envelope::ok("Approval updated", user)))
}

#[derive(Deserialize)]
pub struct BearerTokenRequest {
    pub bearer_token: String,
}

// PATCH /api/users/:id/bearer-token
pub async fn set_bearer_token(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
    Json(body): Json<BearerTokenRequest>,
) -> Result<Json<Envelope<User>>, AppError> {
    let token = session.require_token()?;
    let bearer = body.bearer_token.trim();
    if bearer.is_empty() {
        let mut errors = FieldErrors::new();
        errors.insert("bearer_token".to_string(), "Bearer token is required".to_string());
        return Err(AppError::Validation(errors));
    }

    let user = api::users::set_bearer_token(&state.api, &token, &id, bearer).await?;
    Ok(Json(Envelope::ok("Bearer token updated", user)))
}

#[derive(Deserialize)]
pub struct MinutesRequest {
    pub minutes: f64,
}

// POST /api/users/:id/minutes
pub async fn add_minutes(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
    Json(body): Json<MinutesRequest>,
) -> Result<Json<Envelope<User>>, AppError> {
    let token = session.require_token()?;
    if !body.minutes.is_finite() || body.minutes <= 0.0 {
        let mut errors = FieldErrors::new();
        errors.insert("minutes".to_string(), "Minutes must be a positive number".to_string());
        return Err(AppError::Validation(errors));
    }

    let user = api::users::add_minutes(&state.api, &token, &id, body.minutes).await?;
    Ok(Json(Envelope::ok("Minutes added", user)))
}
