use serde_json::json;

use super::{ApiClient, ApiError, NO_QUERY};
use crate::models::{
    Assistant, AssistantStatus, CreateAssistantRequest, ListQuery, Page, UpdateAssistantRequest,
};

pub async fn list(
    api: &ApiClient,
    token: &str,
    query: &ListQuery,
) -> Result<Page<Assistant>, ApiError> {
    api.get("/assistants", Some(token), query).await?.into_data()
}

pub async fn get(api: &ApiClient, token: &str, id: &str) -> Result<Assistant, ApiError> {
    api.get(&format!("/assistants/{id}"), Some(token), NO_QUERY).await?.into_data()
}

/// Creates one assistant per selected user.
pub async fn create(
    api: &ApiClient,
    token: &str,
    req: &CreateAssistantRequest,
) -> Result<Vec<Assistant>, ApiError> {
    api.post("/assistants", Some(token), req).await?.into_data()
}

pub async fn update(
    api: &ApiClient,
    token: &str,
    id: &str,
    req: &UpdateAssistantRequest,
) -> Result<Assistant, ApiError> {
    api.put(&format!("/assistants/{id}"), Some(token), req).await?.into_data()
}

pub async fn delete(api: &ApiClient, token: &str, id: &str) -> Result<String, ApiError> {
    api.delete::<serde_json::Value>(&format!("/assistants/{id}"), Some(token))
        .await?
        .into_message()
}

pub async fn set_status(
    api: &ApiClient,
    token: &str,
    id: &str,
    status: AssistantStatus,
) -> Result<Assistant, ApiError> {
    api.patch(
        &format!("/assistants/{id}/status"),
        Some(token),
        &json!({ "status": status }),
    )
    .await?
    .into_data()
}
