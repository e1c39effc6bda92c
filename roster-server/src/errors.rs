use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use roster_core::RosterError;
use thiserror::Error;
use tracing::Level;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Errors surfaced to HTTP clients. Storage causes are logged by the handler
/// and never carried in here.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("Status=400, BadRequest: {0}")]
    BadRequest(&'static str),

    #[error("Status=500, InternalServerError")]
    InternalServerError,
}

impl ApiError {
    pub const INVALID_BODY: &'static str = "Invalid request body";
    pub const MISSING_FIELDS: &'static str = "Missing fields";
    pub const INTERNAL: &'static str = "Internal server error";

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Level the error is logged at when it becomes a response. A 500 has
    /// already been logged with its cause by the handler.
    pub fn log_level(&self) -> Option<Level> {
        match self {
            ApiError::BadRequest(_) => Some(Level::WARN),
            ApiError::InternalServerError => None,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ApiError::BadRequest(message) => *message,
            ApiError::InternalServerError => Self::INTERNAL,
        }
    }
}

impl From<RosterError> for ApiError {
    fn from(error: RosterError) -> Self {
        match error {
            RosterError::InvalidBody(_) => ApiError::BadRequest(Self::INVALID_BODY),
            RosterError::MissingFields => ApiError::BadRequest(Self::MISSING_FIELDS),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.log_level().is_some() {
            tracing::warn!("{}", self);
        }

        (
            self.status(),
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
                (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
            ],
            format!("{}\n", self.message()),
        )
            .into_response()
    }
}
