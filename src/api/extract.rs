use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::api::error::ApiError;
use crate::model::Id;

/// The single integer id segment of an item route.
///
/// A segment that is not an `i64` (letters, overflow) names no resource, so
/// it is answered with a JSON 404 like any other missing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemId(pub Id);

#[async_trait]
impl<S> FromRequestParts<S> for ItemId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<Id>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(ItemId(id)),
            Err(rejection) => {
                log::debug!("Unmatched id in {}: {}", parts.uri.path(), rejection);
                Err(ApiError::NoSuchResource(parts.uri.path().to_string()))
            }
        }
    }
}
