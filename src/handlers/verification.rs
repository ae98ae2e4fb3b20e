use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::api::{self, Envelope};
use crate::errors::AppError;
use crate::forms::validation::{is_valid_email, require};
use crate::forms::FieldErrors;
use crate::session::Session;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SendCodeRequest {
    pub email: String,
}

#[derive(Deserialize)]
pub struct VerifyCodeRequest {
    pub email: String,
    #[serde(default)]
    pub code: String,
}

fn check_email(errors: &mut FieldErrors, email: &str) {
    if !is_valid_email(email.trim()) {
        errors.insert("email".to_string(), "Enter a valid email address".to_string());
    }
    require(errors, "email", email, "Email");
}

// POST /api/verification/send
pub async fn send_code(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(body): Json<SendCodeRequest>,
) -> Result<Json<Envelope<()>>, AppError> {
    let token = session.require_token()?;
    let mut errors = FieldErrors::new();
    check_email(&mut errors, &body.email);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let message = api::verification::send_code(&state.api, &token, body.email.trim()).await?;
    Ok(Json(Envelope::ok(message, ())))
}

// POST /api/verification/verify
pub async fn verify_code(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(body): Json<VerifyCodeRequest>,
) -> Result<Json<Envelope<()>>, AppError> {
    let token = session.require_token()?;
    let mut errors = FieldErrors::new();
    check_email(&mut errors, &body.email);
    require(&mut errors, "code", &body.code, "Verification code");
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let message =
        api::verification::verify_code(&state.api, &token, body.email.trim(), body.code.trim())
            .await?;
    Ok(Json(Envelope::ok(message, ())))
}
