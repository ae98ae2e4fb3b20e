use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::{self, ApiError, Envelope};
use crate::errors::AppError;
use crate::forms::user::{LoginForm, ProfileForm};
use crate::models::User;
use crate::session::Session;
use crate::state::AppState;

// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> Result<Json<Envelope<User>>, AppError> {
    let credentials = form.into_credentials().map_err(AppError::Validation)?;

    let login = api::auth::login(&state.api, &credentials).await?;
    session.persist(&login);
    tracing::info!("admin {} logged in", login.user.email);

    Ok(Json(Envelope::ok("Login successful", login.user)))
}

// POST /api/auth/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Json<Envelope<()>> {
    if let Some(token) = session.token() {
        if let Err(e) = api::auth::logout(&state.api, &token).await {
            tracing::warn!("logout notification failed: {e}");
        }
    }
    session.clear();
    Json(Envelope::ok("Logged out", ()))
}

#[derive(Serialize)]
pub struct Verification {
    pub valid: bool,
}

// GET /api/auth/verify
pub async fn verify(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Json<Envelope<Verification>> {
    let Some(token) = session.token() else {
        return Json(Envelope::ok("No session", Verification { valid: false }));
    };

    let valid = match api::auth::verify(&state.api, &token).await {
        Ok(valid) => valid,
        Err(ApiError::Unauthorized { .. }) => {
            session.clear();
            false
        }
        Err(e) => {
            tracing::debug!("token verification failed: {e}");
            false
        }
    };

    Json(Envelope::ok(
        if valid { "Session valid" } else { "Session invalid" },
        Verification { valid },
    ))
}

// GET /api/auth/profile
pub async fn profile(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<Envelope<User>>, AppError> {
    let token = session.require_token()?;
    let user = api::auth::profile(&state.api, &token).await?;
    Ok(Json(Envelope::ok("Profile fetched", user)))
}

// PUT /api/auth/profile
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(form): Json<ProfileForm>,
) -> Result<Json<Envelope<User>>, AppError> {
    let token = session.require_token()?;
    let update = form.into_update().map_err(AppError::Validation)?;

    let user = api::auth::update_profile(&state.api, &token, &update).await?;
    session.store_user(&user);
    Ok(Json(Envelope::ok("Profile updated", user)))
}

// GET /api/auth/me (profile from the session cookie, no upstream call)
pub async fn current_user(session: Session) -> Result<Json<Envelope<User>>, AppError> {
    session.require_token()?;
    let user = session
        .user()
        .ok_or_else(|| AppError::NotFound("profile".to_string()))?;
    Ok(Json(Envelope::ok("Current user", user)))
}
