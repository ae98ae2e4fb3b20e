use serde_json::json;

use super::{ApiClient, ApiError};

pub async fn send_code(api: &ApiClient, token: &str, email: &str) -> Result<String, ApiError> {
    api.post::<serde_json::Value, _>(
        "/verification/send",
        Some(token),
        &json!({ "email": email }),
    )
    .await?
    .into_message()
}

pub async fn verify_code(
    api: &ApiClient,
    token: &str,
    email: &str,
    code: &str,
) -> Result<String, ApiError> {
    api.post::<serde_json::Value, _>(
        "/verification/verify",
        Some(token),
        &json!({ "email": email, "code": code }),
    )
    .await?
    .into_message()
}
