//! Join rows: ownerships (owner ↔ property) and the parking assignments
//! hanging off them. Both are created under their parent's path and carry
//! their other side as a resource URL in the body.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{Json, Response},
};
use serde_json::Value;

use crate::api::documents::{OwnershipDocument, ParkingAssignmentDocument};
use crate::api::error::ApiError;
use crate::api::extract::ItemId;
use crate::api::handlers::{created, delete_response, empty, url_list, ApiResult, AppState};
use crate::api::route_table::RouteName;
use crate::logic::validate;
use crate::model::EntityKind;
use crate::store::traits::Store;

/// GET /ownerships/
pub async fn list_ownerships<S: Store>(
    State(ctx): State<AppState<S>>,
) -> ApiResult<Json<Value>> {
    let ownerships = ctx.store.list_ownerships().await?;
    let urls = ownerships
        .iter()
        .map(|ownership| ctx.urls.url_for(RouteName::Ownership, ownership.id))
        .collect();
    Ok(url_list(EntityKind::Ownership, urls))
}

/// GET /owners/{id}/ownerships/
pub async fn list_owner_ownerships<S: Store>(
    ItemId(owner_id): ItemId,
    State(ctx): State<AppState<S>>,
) -> ApiResult<Json<Value>> {
    if ctx.store.get_owner(owner_id).await?.is_none() {
        return Err(ApiError::not_found(EntityKind::Owner, owner_id));
    }

    let ownerships = ctx.store.list_ownerships_for_owner(owner_id).await?;
    let urls = ownerships
        .iter()
        .map(|ownership| ctx.urls.url_for(RouteName::Ownership, ownership.id))
        .collect();
    Ok(url_list(EntityKind::Ownership, urls))
}

/// GET /ownerships/{id}
pub async fn get_ownership<S: Store>(
    ItemId(id): ItemId,
    State(ctx): State<AppState<S>>,
) -> ApiResult<Json<OwnershipDocument>> {
    let ownership = ctx
        .store
        .get_ownership(id)
        .await?
        .ok_or(ApiError::not_found(EntityKind::Ownership, id))?;

    Ok(Json(OwnershipDocument::new(&ownership, &ctx.urls)))
}

/// POST /owners/{id}/ownerships/
pub async fn create_ownership<S: Store>(
    ItemId(owner_id): ItemId,
    State(ctx): State<AppState<S>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Response> {
    if ctx.store.get_owner(owner_id).await?.is_none() {
        return Err(ApiError::not_found(EntityKind::Owner, owner_id));
    }

    let Json(body) = body?;
    let data = validate::ownership_data(&ctx.store, &ctx.urls, &body).await?;

    let ownership = ctx.store.insert_ownership(owner_id, data).await?;
    log::info!(
        "Created ownership {} of property {} for owner {}",
        ownership.id,
        ownership.property_id,
        owner_id
    );

    Ok(created(ctx.urls.url_for(RouteName::Ownership, ownership.id)))
}

/// PUT /ownerships/{id}
pub async fn replace_ownership<S: Store>(
    ItemId(id): ItemId,
    State(ctx): State<AppState<S>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let mut ownership = ctx
        .store
        .get_ownership(id)
        .await?
        .ok_or(ApiError::not_found(EntityKind::Ownership, id))?;

    let Json(body) = body?;
    ownership.apply(validate::ownership_data(&ctx.store, &ctx.urls, &body).await?);

    if !ctx.store.update_ownership(&ownership).await? {
        return Err(ApiError::not_found(EntityKind::Ownership, id));
    }
    log::info!("Replaced ownership {}", id);

    Ok(empty())
}

/// DELETE /ownerships/{id}
pub async fn delete_ownership<S: Store>(
    ItemId(id): ItemId,
    State(ctx): State<AppState<S>>,
) -> ApiResult<Json<Value>> {
    let outcome = ctx.store.delete_ownership(id).await?;
    delete_response(outcome, EntityKind::Ownership, id)
}

/// GET /parking-assignments/
pub async fn list_parking_assignments<S: Store>(
    State(ctx): State<AppState<S>>,
) -> ApiResult<Json<Value>> {
    let assignments = ctx.store.list_parking_assignments().await?;
    let urls = assignments
        .iter()
        .map(|assignment| ctx.urls.url_for(RouteName::ParkingAssignment, assignment.id))
        .collect();
    Ok(url_list(EntityKind::ParkingAssignment, urls))
}

/// GET /ownerships/{id}/parking-assignments/
pub async fn list_ownership_parking_assignments<S: Store>(
    ItemId(ownership_id): ItemId,
    State(ctx): State<AppState<S>>,
) -> ApiResult<Json<Value>> {
    if ctx.store.get_ownership(ownership_id).await?.is_none() {
        return Err(ApiError::not_found(EntityKind::Ownership, ownership_id));
    }

    let assignments = ctx
        .store
        .list_parking_assignments_for_ownership(ownership_id)
        .await?;
    let urls = assignments
        .iter()
        .map(|assignment| ctx.urls.url_for(RouteName::ParkingAssignment, assignment.id))
        .collect();
    Ok(url_list(EntityKind::ParkingAssignment, urls))
}

/// GET /parking-assignments/{id}
pub async fn get_parking_assignment<S: Store>(
    ItemId(id): ItemId,
    State(ctx): State<AppState<S>>,
) -> ApiResult<Json<ParkingAssignmentDocument>> {
    let assignment = ctx
        .store
        .get_parking_assignment(id)
        .await?
        .ok_or(ApiError::not_found(EntityKind::ParkingAssignment, id))?;

    Ok(Json(ParkingAssignmentDocument::new(&assignment, &ctx.urls)))
}

/// POST /ownerships/{id}/parking-assignments/
pub async fn create_parking_assignment<S: Store>(
    ItemId(ownership_id): ItemId,
    State(ctx): State<AppState<S>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Response> {
    if ctx.store.get_ownership(ownership_id).await?.is_none() {
        return Err(ApiError::not_found(EntityKind::Ownership, ownership_id));
    }

    let Json(body) = body?;
    let data = validate::parking_assignment_data(&ctx.store, &ctx.urls, &body).await?;

    let assignment = ctx
        .store
        .insert_parking_assignment(ownership_id, data)
        .await?;
    log::info!(
        "Created parking assignment {} of spot {} under ownership {}",
        assignment.id,
        assignment.parking_spot_id,
        ownership_id
    );

    Ok(created(
        ctx.urls.url_for(RouteName::ParkingAssignment, assignment.id),
    ))
}

/// PUT /parking-assignments/{id}
pub async fn replace_parking_assignment<S: Store>(
    ItemId(id): ItemId,
    State(ctx): State<AppState<S>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let mut assignment = ctx
        .store
        .get_parking_assignment(id)
        .await?
        .ok_or(ApiError::not_found(EntityKind::ParkingAssignment, id))?;

    let Json(body) = body?;
    assignment.apply(validate::parking_assignment_data(&ctx.store, &ctx.urls, &body).await?);

    if !ctx.store.update_parking_assignment(&assignment).await? {
        return Err(ApiError::not_found(EntityKind::ParkingAssignment, id));
    }
    log::info!("Replaced parking assignment {}", id);

    Ok(empty())
}

/// DELETE /parking-assignments/{id}
pub async fn delete_parking_assignment<S: Store>(
    ItemId(id): ItemId,
    State(ctx): State<AppState<S>>,
) -> ApiResult<Json<Value>> {
    let outcome = ctx.store.delete_parking_assignment(id).await?;
    delete_response(outcome, EntityKind::ParkingAssignment, id)
}
