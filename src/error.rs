use ntex::http::StatusCode;
use ntex::web::{HttpResponse, WebResponseError};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl WebResponseError for AppError {
    fn error_response(&self, _: &ntex::web::HttpRequest) -> HttpResponse {
        error!("request failed: {}", self);
        let message = match self {
            AppError::Db(_) => "Database error",
            AppError::Internal(_) => "Internal error",
        };
        HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR)
            .json(&serde_json::json!({ "error": message }))
    }
}
