use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{ApiClient, ApiError, NO_QUERY};
use crate::models::{ApprovalStatus, ListQuery, Page, User};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_address: Option<String>,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_address: Option<String>,
}

pub async fn list(api: &ApiClient, token: &str, query: &ListQuery) -> Result<Page<User>, ApiError> {
    api.get("/users", Some(token), query).await?.into_data()
}

pub async fn get(api: &ApiClient, token: &str, id: &str) -> Result<User, ApiError> {
    api.get(&format!("/users/{id}"), Some(token), NO_QUERY).await?.into_data()
}

pub async fn create(api: &ApiClient, token: &str, user: &NewUser) -> Result<User, ApiError> {
    api.post("/users", Some(token), user).await?.into_data()
}

pub async fn update(
    api: &ApiClient,
    token: &str,
    id: &str,
    update: &UserUpdate,
) -> Result<User, ApiError> {
    api.put(&format!("/users/{id}"), Some(token), update).await?.into_data()
}

pub async fn delete(api: &ApiClient, token: &str, id: &str) -> Result<String, ApiError> {
    api.delete::<serde_json::Value>(&format!("/users/{id}"), Some(token))
        .await?
        .into_message()
}

pub async fn set_approval(
    api: &ApiClient,
    token: &str,
    id: &str,
    status: ApprovalStatus,
) -> Result<User, ApiError> {
    api.patch(
        &format!("/users/{id}/approval"),
        Some(token),
        &json!({ "approval_status": status }),
    )
    .await?
    .into_data()
}

pub async fn set_bearer_token(
    api: &ApiClient,
    token: &str,
    id: &str,
    bearer_token: &str,
) -> Result<User, ApiError> {
    api.patch(
        &format!("/users/{id}/bearer-token"),
        Some(token),
        &json!({ "bearer_token": bearer_token }),
    )
    .await?
    .into_data()
}

pub async fn add_minutes(
    api: &ApiClient,
    token: &str,
    id: &str,
    minutes: f64,
) -> Result<User, ApiError> {
    api.post(
        &format!("/users/{id}/minutes"),
        Some(token),
        &json!({ "minutes": minutes }),
    )
    .await?
    .into_data()
}

/// Approved users that carry a provider bearer token; the only users an
/// assistant can be created for.
pub async fn approved_with_token(api: &ApiClient, token: &str) -> Result<Vec<User>, ApiError> {
    let users: Vec<User> = api
        .get("/users/approved-with-token", Some(token), NO_QUERY)
        .await?
        .into_data()?;
    Ok(users
        .into_iter()
        .filter(|u| u.approval_status == ApprovalStatus::Approved && u.has_bearer_token())
        .collect())
}
