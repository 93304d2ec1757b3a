//! Error taxonomy shared by both pipelines and its HTTP mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{service} unavailable: {reason}")]
    UpstreamUnavailable { service: &'static str, reason: String },

    #[error("volume {0} is not in the search index")]
    VolumeNotIndexed(String),

    #[error("malformed {service} payload: {detail}")]
    MalformedUpstreamPayload { service: &'static str, detail: String },

    #[error("image metadata unavailable for page {page_id}: {reason}")]
    ImageMetadataUnavailable { page_id: String, reason: String },

    #[error("no page metadata document for volume {0}")]
    VolumeDocumentMissing(String),

    #[error("invalid request: {0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::UpstreamUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::VolumeNotIndexed(_) => StatusCode::NOT_FOUND,
            ServiceError::MalformedUpstreamPayload { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::ImageMetadataUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::VolumeDocumentMissing(_) => StatusCode::NOT_FOUND,
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Transport-level failure of an outbound call.
    pub fn upstream(service: &'static str, err: reqwest::Error) -> Self {
        ServiceError::UpstreamUnavailable {
            service,
            reason: err.to_string(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            ServiceError::Internal(e) => {
                tracing::error!("Internal error: {:#}", e);
                "Internal error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
