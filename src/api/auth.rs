use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{ApiClient, ApiError, NO_QUERY};
use crate::models::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Payload of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginData {
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub mobile: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

/// Fails unless the upstream answers with `success = true`.
pub async fn login(api: &ApiClient, credentials: &Credentials) -> Result<LoginData, ApiError> {
    api.post("/auth/login", None, credentials).await?.into_data()
}

/// Server-side logout notification. Callers treat failures as non-fatal.
pub async fn logout(api: &ApiClient, token: &str) -> Result<(), ApiError> {
    api.post::<serde_json::Value, _>("/auth/logout", Some(token), &json!({}))
        .await?
        .into_message()
        .map(|_| ())
}

pub async fn verify(api: &ApiClient, token: &str) -> Result<bool, ApiError> {
    #[derive(Deserialize)]
    struct Verified {
        #[serde(default)]
        valid: bool,
    }

    let env = api.get::<Verified, _>("/auth/verify", Some(token), NO_QUERY).await?;
    Ok(env.success && env.data.map(|v| v.valid).unwrap_or(true))
}

pub async fn profile(api: &ApiClient, token: &str) -> Result<User, ApiError> {
    api.get("/auth/profile", Some(token), NO_QUERY).await?.into_data()
}

pub async fn update_profile(
    api: &ApiClient,
    token: &str,
    update: &ProfileUpdate,
) -> Result<User, ApiError> {
    api.put("/auth/profile", Some(token), update).await?.into_data()
}
