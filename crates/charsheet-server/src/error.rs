use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use charsheet_core::CoreError;

/// Private sentinel error type used to carry an explicit HTTP 404 through
/// the `anyhow::Error` chain without touching the `CoreError` enum.
#[derive(Debug)]
struct NotFoundError(String);

impl std::fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for NotFoundError {}

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Construct a 404 Not Found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self(NotFoundError(msg.into()).into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(n) = self.0.downcast_ref::<NotFoundError>() {
            let body = serde_json::json!({ "error": n.0.clone() });
            return (StatusCode::NOT_FOUND, axum::Json(body)).into_response();
        }

        let status = if let Some(e) = self.0.downcast_ref::<CoreError>() {
            match e {
                CoreError::NotLinked(_)
                | CoreError::UnknownMonster(_)
                | CoreError::ItemNotFound(_) => StatusCode::NOT_FOUND,
                CoreError::AlreadyLinked(_) => StatusCode::CONFLICT,
                CoreError::InvalidSheet { .. }
                | CoreError::InvalidCellRef(_)
                | CoreError::InvalidDice(_)
                | CoreError::UnknownAbility(_)
                | CoreError::NotConfigured => StatusCode::BAD_REQUEST,
                CoreError::SchemaMismatch { .. }
                | CoreError::InventoryFull(_)
                | CoreError::WrongTarget { .. }
                | CoreError::ItemNotUsable(_)
                | CoreError::ConflictingItemEffects(_) => StatusCode::UNPROCESSABLE_ENTITY,
                CoreError::DmSheetNotLoaded => StatusCode::SERVICE_UNAVAILABLE,
                CoreError::CellOutOfBounds { .. }
                | CoreError::Sheets(_)
                | CoreError::Io(_)
                | CoreError::Yaml(_)
                | CoreError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
