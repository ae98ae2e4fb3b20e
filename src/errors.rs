use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::api::ApiError;
use crate::forms::wizard::PatchError;
use crate::forms::FieldErrors;
use crate::session::{SessionExpired, LOGIN_PATH};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Please fix the highlighted fields")]
    Validation(FieldErrors),

    #[error(transparent)]
    Patch(#[from] PatchError),

    #[error("not authenticated")]
    NotAuthenticated,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("No internet connection")]
    Offline,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Api(ApiError::Unauthorized { .. }) => StatusCode::UNAUTHORIZED,
            AppError::Api(ApiError::Status { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::Api(ApiError::Rejected { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Api(ApiError::Transport(_)) => StatusCode::BAD_GATEWAY,
            AppError::Api(ApiError::Decode(_)) => StatusCode::BAD_GATEWAY,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Patch(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Offline => StatusCode::SERVICE_UNAVAILABLE,
        };

        let expired = matches!(
            self,
            AppError::Api(ApiError::Unauthorized { .. }) | AppError::NotAuthenticated
        );

        let errors = match &self {
            AppError::Validation(fields) => serde_json::to_value(fields).ok(),
            AppError::Api(ApiError::Rejected { errors, .. }) => errors.clone(),
            _ => None,
        };

        let mut body = serde_json::json!({
            "success": false,
            "message": self.to_string(),
        });
        if let Some(errors) = errors {
            body["errors"] = errors;
        }
        if expired {
            body["redirect"] = LOGIN_PATH.into();
        }

        let mut res = (status, axum::Json(body)).into_response();
        if expired {
            res.extensions_mut().insert(SessionExpired);
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_is_marked_expired() {
        let res = AppError::Api(ApiError::Unauthorized {
            message: "Token expired".to_string(),
        })
        .into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.extensions().get::<SessionExpired>().is_some());
    }

    #[test]
    fn test_plain_401_keeps_session() {
        let res = AppError::Api(ApiError::Status {
            status: 401,
            message: "Invalid email or password".to_string(),
        })
        .into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.extensions().get::<SessionExpired>().is_none());
    }

    #[test]
    fn test_upstream_status_passes_through() {
        let res = AppError::Api(ApiError::Status {
            status: 404,
            message: "Assistant not found".to_string(),
        })
        .into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert!(res.extensions().get::<SessionExpired>().is_none());
    }

    #[test]
    fn test_validation_is_unprocessable() {
        let mut fields = FieldErrors::new();
        fields.insert("email".to_string(), "Email is required".to_string());
        let res = AppError::Validation(fields).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
