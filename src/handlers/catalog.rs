use axum::Json;
use serde::Deserialize;

use crate::api::Envelope;
use crate::catalog::{self, Catalog};
use crate::forms::validation::{password_strength, PasswordStrength};

// GET /api/catalog
pub async fn get_catalog() -> Json<Envelope<Catalog>> {
    Json(Envelope::ok("Catalog", catalog::catalog()))
}

#[derive(Deserialize)]
pub struct StrengthRequest {
    #[serde(default)]
    pub password: String,
}

// POST /api/forms/password-strength
pub async fn check_password_strength(
    Json(body): Json<StrengthRequest>,
) -> Json<Envelope<PasswordStrength>> {
    Json(Envelope::ok("Password strength", password_strength(&body.password)))
}
