use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::semantic::{EmbeddingError, SemanticError};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Embedding provider error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<SemanticError> for AppError {
    fn from(err: SemanticError) -> Self {
        match err {
            SemanticError::Embedding(EmbeddingError::EmptyInput) => AppError::UnprocessableEntity(
                "Nothing to embed: the résumé has no section long enough to score".to_string(),
            ),
            SemanticError::Embedding(e) => AppError::Embedding(e),
            SemanticError::Similarity(e) => AppError::Internal(e.into()),
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(anyhow::anyhow!("analysis task failed: {err}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::Embedding(e) => {
                tracing::error!("Embedding provider error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "EMBEDDING_ERROR",
                    "The embedding provider could not process the request".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::similarity::SimilarityError;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::UnprocessableEntity("empty".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (
                AppError::Embedding(EmbeddingError::Api {
                    status: 503,
                    message: "down".into(),
                }),
                StatusCode::BAD_GATEWAY,
            ),
            (AppError::Internal(anyhow::anyhow!("boom")), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_semantic_error_mapping() {
        let empty: AppError = SemanticError::Embedding(EmbeddingError::EmptyInput).into();
        assert!(matches!(empty, AppError::UnprocessableEntity(_)));

        let provider: AppError = SemanticError::Embedding(EmbeddingError::DimensionMismatch {
            expected: 1536,
            actual: 8,
        })
        .into();
        assert!(matches!(provider, AppError::Embedding(_)));

        let similarity: AppError =
            SemanticError::Similarity(SimilarityError::LengthMismatch { left: 2, right: 3 }).into();
        assert!(matches!(similarity, AppError::Internal(_)));
    }
}
