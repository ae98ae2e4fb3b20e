use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{ApiClient, ApiError};
use crate::catalog::TelephonyProvider;
use crate::models::{AvailableNumber, ListQuery, Page, PhoneNumber};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvailableQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<TelephonyProvider>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseRequest {
    pub number: String,
    pub provider: TelephonyProvider,
}

pub async fn list(
    api: &ApiClient,
    token: &str,
    query: &ListQuery,
) -> Result<Page<PhoneNumber>, ApiError> {
    api.get("/phone-numbers", Some(token), query).await?.into_data()
}

pub async fn search_available(
    api: &ApiClient,
    token: &str,
    query: &AvailableQuery,
) -> Result<Vec<AvailableNumber>, ApiError> {
    api.get("/phone-numbers/available", Some(token), query)
        .await?
        .into_data()
}

pub async fn purchase(
    api: &ApiClient,
    token: &str,
    req: &PurchaseRequest,
) -> Result<PhoneNumber, ApiError> {
    api.post("/phone-numbers/purchase", Some(token), req).await?.into_data()
}

pub async fn assign(
    api: &ApiClient,
    token: &str,
    id: &str,
    user_id: &str,
) -> Result<PhoneNumber, ApiError> {
    api.post(
        &format!("/phone-numbers/{id}/assign"),
        Some(token),
        &json!({ "user_id": user_id }),
    )
    .await?
    .into_data()
}

pub async fn unassign(api: &ApiClient, token: &str, id: &str) -> Result<PhoneNumber, ApiError> {
    api.post(&format!("/phone-numbers/{id}/unassign"), Some(token), &json!({}))
        .await?
        .into_data()
}

pub async fn renew(api: &ApiClient, token: &str, id: &str) -> Result<PhoneNumber, ApiError> {
    api.post(&format!("/phone-numbers/{id}/renew"), Some(token), &json!({}))
        .await?
        .into_data()
}

pub async fn release(api: &ApiClient, token: &str, id: &str) -> Result<String, ApiError> {
    api.delete::<serde_json::Value>(&format!("/phone-numbers/{id}"), Some(token))
        .await?
        .into_message()
}
