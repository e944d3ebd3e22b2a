use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::{Json, Response},
};
use serde::Serialize;
use serde_json::Value;

use crate::api::documents::OwnerDocument;
use crate::api::error::ApiError;
use crate::api::extract::ItemId;
use crate::api::handlers::{created, delete_response, empty, url_list, ApiResult, AppState};
use crate::api::route_table::RouteName;
use crate::logic::validate::{self, ValidationError};
use crate::model::EntityKind;
use crate::store::traits::Store;

#[derive(Debug, Serialize)]
pub struct OwnerSummaryResponse {
    #[serde(rename = "propietarios")]
    pub owners: Vec<OwnerDocument>,
}

/// GET /owners/
pub async fn list_owners<S: Store>(State(ctx): State<AppState<S>>) -> ApiResult<Json<Value>> {
    let owners = ctx.store.list_owners().await?;
    let urls = owners
        .iter()
        .map(|owner| ctx.urls.url_for(RouteName::Owner, owner.id))
        .collect();
    Ok(url_list(EntityKind::Owner, urls))
}

/// GET /owners/summary/
/// Every owner as a full document
pub async fn owner_summary<S: Store>(
    State(ctx): State<AppState<S>>,
) -> ApiResult<Json<OwnerSummaryResponse>> {
    let owners = ctx.store.list_owners().await?;
    Ok(Json(OwnerSummaryResponse {
        owners: owners
            .iter()
            .map(|owner| OwnerDocument::new(owner, &ctx.urls))
            .collect(),
    }))
}

/// GET /owners/by-national-id/{nid}
pub async fn get_owner_by_national_id<S: Store>(
    Path(nid): Path<String>,
    State(ctx): State<AppState<S>>,
) -> ApiResult<Json<OwnerDocument>> {
    let national_id: i64 = nid.trim().parse().map_err(|_| ValidationError::NotAnInteger {
        entity: EntityKind::Owner,
        field: "dni",
    })?;

    let owner = ctx
        .store
        .find_owner_by_national_id(national_id)
        .await?
        .ok_or(ApiError::NationalIdNotFound {
            entity: EntityKind::Owner,
            national_id,
        })?;

    Ok(Json(OwnerDocument::new(&owner, &ctx.urls)))
}

/// GET /owners/{id}
pub async fn get_owner<S: Store>(
    ItemId(id): ItemId,
    State(ctx): State<AppState<S>>,
) -> ApiResult<Json<OwnerDocument>> {
    let owner = ctx
        .store
        .get_owner(id)
        .await?
        .ok_or(ApiError::not_found(EntityKind::Owner, id))?;

    Ok(Json(OwnerDocument::new(&owner, &ctx.urls)))
}

/// POST /owners/
pub async fn create_owner<S: Store>(
    State(ctx): State<AppState<S>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(body) = body?;
    let data = validate::owner_data(&body)?;

    let owner = ctx.store.insert_owner(data).await?;
    log::info!("Created owner {}", owner.id);

    Ok(created(ctx.urls.url_for(RouteName::Owner, owner.id)))
}

/// PUT /owners/{id}
pub async fn replace_owner<S: Store>(
    ItemId(id): ItemId,
    State(ctx): State<AppState<S>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let mut owner = ctx
        .store
        .get_owner(id)
        .await?
        .ok_or(ApiError::not_found(EntityKind::Owner, id))?;

    let Json(body) = body?;
    owner.apply(validate::owner_data(&body)?);

    if !ctx.store.update_owner(&owner).await? {
        return Err(ApiError::not_found(EntityKind::Owner, id));
    }
    log::info!("Replaced owner {}", id);

    Ok(empty())
}

/// DELETE /owners/{id}
pub async fn delete_owner<S: Store>(
    ItemId(id): ItemId,
    State(ctx): State<AppState<S>>,
) -> ApiResult<Json<Value>> {
    let outcome = ctx.store.delete_owner(id).await?;
    delete_response(outcome, EntityKind::Owner, id)
}
