use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Uniform wrapper every upstream response (and every console response) follows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
}

impl<T> Envelope<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: None,
        }
    }

    /// Unwraps the payload, treating `success = false` or a missing `data`
    /// field as a rejection carrying the server message.
    pub fn into_data(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::Rejected {
                message: self.message,
                errors: self.errors,
            });
        }
        self.data.ok_or_else(|| ApiError::Decode("response envelope has no data".to_string()))
    }

    /// Like `into_data` but for operations whose payload is irrelevant.
    pub fn into_message(self) -> Result<String, ApiError> {
        if !self.success {
            return Err(ApiError::Rejected {
                message: self.message,
                errors: self.errors,
            });
        }
        Ok(self.message)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 401 on a call that carried a session token.
    #[error("{message}")]
    Unauthorized { message: String },

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("{message}")]
    Rejected {
        message: String,
        errors: Option<serde_json::Value>,
    },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Empty query string for `ApiClient::get`.
pub const NO_QUERY: &[(&str, &str)] = &[];

/// Thin pass-through to the upstream REST API. Built once at startup and
/// shared through `AppState`; each call is a single attempt.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.client
    }

    pub async fn get<T, Q>(
        &self,
        path: &str,
        token: Option<&str>,
        query: &Q,
    ) -> Result<Envelope<T>, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let req = self.request(Method::GET, path, token).query(query);
        self.send(Method::GET, path, token.is_some(), req).await
    }

    pub async fn post<T, B>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<Envelope<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let req = self.request(Method::POST, path, token).json(body);
        self.send(Method::POST, path, token.is_some(), req).await
    }

    pub async fn put<T, B>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<Envelope<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let req = self.request(Method::PUT, path, token).json(body);
        self.send(Method::PUT, path, token.is_some(), req).await
    }

    pub async fn patch<T, B>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<Envelope<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let req = self.request(Method::PATCH, path, token).json(body);
        self.send(Method::PATCH, path, token.is_some(), req).await
    }

    pub async fn delete<T>(&self, path: &str, token: Option<&str>) -> Result<Envelope<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let req = self.request(Method::DELETE, path, token);
        self.send(Method::DELETE, path, token.is_some(), req).await
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let req = self.client.request(method, url);
        match token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send<T>(
        &self,
        method: Method,
        path: &str,
        authenticated: bool,
        req: reqwest::RequestBuilder,
    ) -> Result<Envelope<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        tracing::debug!("{method} {path}");

        let resp = req.send().await.map_err(|e| {
            tracing::warn!("{method} {path} failed: {e}");
            ApiError::Transport(e)
        })?;

        let status = resp.status();
        let bytes = resp.bytes().await?;

        if !status.is_success() {
            let message = server_message(&bytes)
                .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));

            // Without a token there is no session to expire; a 401 is an
            // ordinary failure such as bad credentials.
            if status == StatusCode::UNAUTHORIZED && authenticated {
                tracing::warn!("{method} {path} returned 401, session expired");
                return Err(ApiError::Unauthorized { message });
            }

            tracing::warn!("{method} {path} returned {status}: {message}");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn server_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
