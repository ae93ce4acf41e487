use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Only the author of a review can change it")]
    Forbidden,

    #[error("A signed-in user is required")]
    Unauthorized,

    #[error("Rating '{field}' must be between 0 and 5, got {value}")]
    InvalidRating { field: &'static str, value: i64 },

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[cfg(feature = "ssr")]
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(feature = "ssr")]
impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::InvalidRating { .. }
            | AppError::InvalidFilter(_)
            | AppError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            AppError::Request(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) | AppError::Io(_) | AppError::Json(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.status_code()).body(self.to_string())
    }
}
