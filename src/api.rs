//! The API client capability consumed by the resource controller.
//!
//! Implementations translate each call into exactly one HTTP request and
//! return typed results. `crate::http_utils::HttpClient` talks to a live
//! server; tests substitute an in-memory implementation.

use crate::model::{ListResult, ModelError, ObjectId, ParamSet, RemoteObject};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{Map, Value};

/// Error emitted by an API client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("{} {reason}", .status.as_u16())]
    Response { status: StatusCode, reason: String },
    /// The request never produced a response (connection refused, timeout, ...).
    #[error("{0}")]
    HttpError(#[from] reqwest::Error),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("{0}")]
    ModelError(#[from] ModelError),
    #[error("invalid API url {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Build a response error, deriving the reason phrase from the status.
    pub fn from_status(status: StatusCode) -> Self {
        ApiError::Response {
            status,
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }

    /// Status code and reason when the failure carries an HTTP response.
    pub fn response(&self) -> Option<(StatusCode, &str)> {
        match self {
            ApiError::Response { status, reason } => Some((*status, reason.as_str())),
            _ => None,
        }
    }
}

/// Remote operations available for every resource collection.
///
/// `resource` is the collection name ("devices"). Collection calls map to
/// `<resource>/`, object calls to `<resource>/<id>/`.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// POST a new object to the collection.
    async fn post(&self, resource: &str, body: &Map<String, Value>) -> Result<RemoteObject, ApiError>;

    /// GET the collection, filtered by `filters`.
    async fn get(&self, resource: &str, filters: &ParamSet) -> Result<ListResult, ApiError>;

    /// GET one object.
    async fn get_object(&self, resource: &str, id: &ObjectId) -> Result<RemoteObject, ApiError>;

    /// PUT a full replacement of one object.
    async fn put_object(
        &self,
        resource: &str,
        id: &ObjectId,
        body: &Map<String, Value>,
    ) -> Result<RemoteObject, ApiError>;

    /// DELETE one object.
    async fn delete_object(&self, resource: &str, id: &ObjectId) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_error_display() {
        let error = ApiError::from_status(StatusCode::NOT_FOUND);
        assert_eq!(error.to_string(), "404 Not Found");
        assert_eq!(error.response(), Some((StatusCode::NOT_FOUND, "Not Found")));
    }

    #[test]
    fn test_unstructured_error_has_no_response() {
        let error = ApiError::InvalidUrl("nope".to_string());
        assert!(error.response().is_none());
    }
}
