use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ndns_domain::DomainError;
use serde_json::json;
use tracing::error;

pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::ContentTypeError(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            DomainError::UpstreamTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            DomainError::UpstreamTransport { .. }
            | DomainError::UpstreamMalformedResponse { .. }
            | DomainError::DownloadFailure { .. } => StatusCode::BAD_GATEWAY,
            DomainError::ListUnavailable(_) => StatusCode::NOT_FOUND,
            e if e.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self.0, "Request failed");
            "internal error".to_string()
        } else {
            self.0.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
