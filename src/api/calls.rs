use super::{ApiClient, ApiError, NO_QUERY};
use crate::models::{CallRecord, ListQuery, Page, SampleCallRequest};

pub async fn sample_call(
    api: &ApiClient,
    token: &str,
    req: &SampleCallRequest,
) -> Result<CallRecord, ApiError> {
    api.post("/calls/sample", Some(token), req).await?.into_data()
}

pub async fn get(api: &ApiClient, token: &str, id: &str) -> Result<CallRecord, ApiError> {
    api.get(&format!("/calls/{id}"), Some(token), NO_QUERY).await?.into_data()
}

pub async fn list(
    api: &ApiClient,
    token: &str,
    query: &ListQuery,
) -> Result<Page<CallRecord>, ApiError> {
    api.get("/calls", Some(token), query).await?.into_data()
}
