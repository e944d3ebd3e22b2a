use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use crate::logic::validate::{BodyError, ValidationError};
use crate::model::{EntityKind, Id};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: Id },

    #[error("{entity} with dni {national_id} not found")]
    NationalIdNotFound { entity: EntityKind, national_id: i64 },

    /// The path matched a route, but its id segment is not an integer.
    #[error("Not found: {0}")]
    NoSuchResource(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{entity} {id} is still referenced by {by}")]
    Conflict {
        entity: EntityKind,
        id: Id,
        by: &'static str,
    },

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl ApiError {
    pub fn not_found(entity: EntityKind, id: Id) -> Self {
        ApiError::NotFound { entity, id }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. }
            | ApiError::NationalIdNotFound { .. }
            | ApiError::NoSuchResource(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(ValidationError::MalformedBody(rejection.body_text()))
    }
}

impl From<BodyError> for ApiError {
    fn from(err: BodyError) -> Self {
        match err {
            BodyError::Invalid(e) => ApiError::Validation(e),
            BodyError::Store(e) => ApiError::Store(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Store(e) => {
                log::error!("Store failure: {:#}", e);
                "Internal server error".to_string()
            }
            ApiError::Validation(e) => {
                log::warn!("Rejected request: {}", e);
                e.to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorResponse::new(&message))).into_response()
    }
}
