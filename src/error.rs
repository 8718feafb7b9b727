//! Error types shared by the store, the service and the HTTP handlers.
use std::time::Duration;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::models::MessageResponse;

/// Failures reported by the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying libsql call failed.
    #[error("database error: {0}")]
    Database(#[from] libsql::Error),

    /// The local data directory could not be prepared.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A transaction could not be converted to or from its stored row.
    #[error("could not convert stored transaction: {0}")]
    Codec(String),

    /// The store did not become reachable within the startup window.
    #[error("store connection timed out after {0:?}")]
    Timeout(Duration),
}

/// The errors a request can end in.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed client input: bad date, bad id, bad filter or bad body.
    #[error("{0}")]
    Validation(&'static str),

    /// The requested resource does not exist.
    #[error("{0}")]
    NotFound(&'static str),

    /// The store failed. `context` is the only part the client sees.
    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    pub fn store(context: &'static str, source: StoreError) -> Self {
        AppError::Store { context, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::Validation(message) | AppError::NotFound(message) => *message,
            AppError::Store { context, source } => {
                tracing::error!("{}: {}", context, source);
                *context
            }
        };

        (status, Json(MessageResponse::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let error = AppError::Validation("Invalid ID");
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.to_string(), "Invalid ID");
    }

    #[test]
    fn store_failure_hides_source_from_client() {
        let error = AppError::store("Failed to insert", StoreError::Codec("bad row".into()));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            error.to_string(),
            "Failed to insert: could not convert stored transaction: bad row"
        );

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(
            AppError::NotFound("Not found").status_code(),
            StatusCode::NOT_FOUND
        );
    }
}
