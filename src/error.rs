use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::analyzer::AnalyzeError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    InvalidInput(#[from] AnalyzeError),

    #[error("missing required query parameter '{0}'")]
    MissingParameter(&'static str),

    #[error("invalid query string: {0}")]
    InvalidQuery(#[from] QueryRejection),

    #[error("not found")]
    NotFound,

    #[error("Metrics encoding error: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON body returned for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_)
            | AppError::MissingParameter(_)
            | AppError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Metrics(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(event = "internal_error", error = ?self, "Internal error");
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::InvalidInput(AnalyzeError::Empty).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::MissingParameter("name").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Internal("boom".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_invalid_input_body_carries_message() {
        let response =
            AppError::InvalidInput(AnalyzeError::TooLong { length: 7, max: 5 }).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "name is 7 characters long, maximum is 5");
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response = AppError::Internal("secret detail".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "internal server error");
    }

    #[test]
    fn test_internal_error_is_logged_with_event() {
        use tracing_subscriber::layer::SubscriberExt;

        let captured = crate::logging::capture::Captured::default();
        let writer = captured.clone();
        let subscriber =
            tracing_subscriber::registry().with(crate::logging::json_layer(move || writer.clone()));
        tracing::subscriber::with_default(subscriber, || {
            let _ = AppError::Internal("disk full".to_string()).into_response();
            let _ = AppError::NotFound.into_response();
        });

        let lines = captured.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["event"], "internal_error");
        assert_eq!(lines[0]["level"], "ERROR");
        assert!(lines[0]["error"].as_str().unwrap().contains("disk full"));
        assert!(lines[0]["ts"].is_string());
    }

    #[test]
    fn test_missing_parameter_display() {
        assert_eq!(
            AppError::MissingParameter("name").to_string(),
            "missing required query parameter 'name'"
        );
    }
}
