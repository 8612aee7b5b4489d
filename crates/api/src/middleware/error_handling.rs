//! # Error Handling Middleware
//!
//! Maps [`BookingError`] values to HTTP status codes and a JSON body of the
//! form `{"error": "<message>"}`. Server errors carry a generic message; the
//! details only go to the log.
//!
//! | Error | Status |
//! |---|---|
//! | `InvalidInput` | 400 |
//! | `NotFound` | 404 |
//! | `Conflict`, `InvalidTransition` | 409 |
//! | `Upstream` | 502 |
//! | `Internal` | 500 |

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use mentorbook_core::errors::BookingError;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use mentorbook_api::middleware::error_handling::AppError;
/// use mentorbook_core::errors::BookingError;
///
/// async fn handler(duration_minutes: i64) -> Result<Json<i64>, AppError> {
///     if duration_minutes <= 0 {
///         return Err(AppError(BookingError::InvalidInput(
///             "duration_minutes must be positive".to_string(),
///         )));
///     }
///     Ok(Json(duration_minutes))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            BookingError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::Conflict(_) => StatusCode::CONFLICT,
            BookingError::InvalidTransition { .. } => StatusCode::CONFLICT,
            BookingError::Upstream(_) => StatusCode::BAD_GATEWAY,
            BookingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self.0 {
            BookingError::Upstream(_) => {
                error!("Request failed: {:?}", self.0);
                "Upstream service unavailable".to_string()
            }
            BookingError::Internal(_) => {
                error!("Request failed: {:?}", self.0);
                "Internal server error".to_string()
            }
            err => err.to_string(),
        };
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

/// Allows `?` on `BookingResult` inside handlers.
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

/// Store-level `eyre` failures surface as upstream errors.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(BookingError::Upstream(err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(BookingError::InvalidInput(rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError(BookingError::InvalidInput(rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError(BookingError::InvalidInput(rejection.body_text()))
    }
}

/// Maps a BookingError to an HTTP response
pub fn map_error(err: BookingError) -> Response {
    AppError(err).into_response()
}
