use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::logic::resolve::UrlMap;
use crate::model::{EntityKind, Id};
use crate::store::traits::DeleteOutcome;

/// Everything a handler needs: the store and the URL map used to build and
/// resolve resource links. Built once at start-up and shared by reference.
#[derive(Debug)]
pub struct AppContext<S> {
    pub store: S,
    pub urls: UrlMap,
}

impl<S> AppContext<S> {
    pub fn new(store: S, urls: UrlMap) -> Self {
        Self { store, urls }
    }
}

pub type AppState<S> = Arc<AppContext<S>>;

pub type ApiResult<T> = Result<T, ApiError>;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// 201 with an empty body and the new resource in `Location`.
pub fn created(location: String) -> Response {
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(json!({})),
    )
        .into_response()
}

pub fn empty() -> Json<Value> {
    Json(json!({}))
}

/// `{"<collection key>": [url, ...]}`
pub fn url_list(entity: EntityKind, urls: Vec<String>) -> Json<Value> {
    let mut body = Map::new();
    body.insert(entity.collection_key().to_string(), Value::from(urls));
    Json(Value::Object(body))
}

pub fn delete_response(
    outcome: DeleteOutcome,
    entity: EntityKind,
    id: Id,
) -> ApiResult<Json<Value>> {
    match outcome {
        DeleteOutcome::Deleted => {
            log::info!("Deleted {} {}", entity, id);
            Ok(empty())
        }
        DeleteOutcome::NotFound => Err(ApiError::not_found(entity, id)),
        DeleteOutcome::Referenced { by } => {
            log::warn!("Refused to delete {} {}: still referenced by {}", entity, id, by);
            Err(ApiError::Conflict {
                entity,
                id,
                by: by.collection_key(),
            })
        }
    }
}
