//! Properties and parking spots. Both carry the same unit fields and differ
//! only in the table they live in and the join rows that point at them.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{Json, Response},
};
use serde_json::Value;

use crate::api::documents::UnitDocument;
use crate::api::error::ApiError;
use crate::api::extract::ItemId;
use crate::api::handlers::{created, delete_response, empty, url_list, ApiResult, AppState};
use crate::api::route_table::RouteName;
use crate::logic::validate;
use crate::model::EntityKind;
use crate::store::traits::Store;

/// GET /properties/
pub async fn list_properties<S: Store>(
    State(ctx): State<AppState<S>>,
) -> ApiResult<Json<Value>> {
    let properties = ctx.store.list_properties().await?;
    let urls = properties
        .iter()
        .map(|property| ctx.urls.url_for(RouteName::Property, property.id))
        .collect();
    Ok(url_list(EntityKind::Property, urls))
}

/// GET /properties/{id}
pub async fn get_property<S: Store>(
    ItemId(id): ItemId,
    State(ctx): State<AppState<S>>,
) -> ApiResult<Json<UnitDocument>> {
    let property = ctx
        .store
        .get_property(id)
        .await?
        .ok_or(ApiError::not_found(EntityKind::Property, id))?;

    Ok(Json(UnitDocument::property(&property, &ctx.urls)))
}

/// POST /properties/
pub async fn create_property<S: Store>(
    State(ctx): State<AppState<S>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(body) = body?;
    let data = validate::unit_data(EntityKind::Property, &body)?;

    let property = ctx.store.insert_property(data).await?;
    log::info!("Created property {}", property.id);

    Ok(created(ctx.urls.url_for(RouteName::Property, property.id)))
}

/// PUT /properties/{id}
pub async fn replace_property<S: Store>(
    ItemId(id): ItemId,
    State(ctx): State<AppState<S>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let mut property = ctx
        .store
        .get_property(id)
        .await?
        .ok_or(ApiError::not_found(EntityKind::Property, id))?;

    let Json(body) = body?;
    property.apply(validate::unit_data(EntityKind::Property, &body)?);

    if !ctx.store.update_property(&property).await? {
        return Err(ApiError::not_found(EntityKind::Property, id));
    }
    log::info!("Replaced property {}", id);

    Ok(empty())
}

/// DELETE /properties/{id}
pub async fn delete_property<S: Store>(
    ItemId(id): ItemId,
    State(ctx): State<AppState<S>>,
) -> ApiResult<Json<Value>> {
    let outcome = ctx.store.delete_property(id).await?;
    delete_response(outcome, EntityKind::Property, id)
}

/// GET /parking-spots/
pub async fn list_parking_spots<S: Store>(
    State(ctx): State<AppState<S>>,
) -> ApiResult<Json<Value>> {
    let spots = ctx.store.list_parking_spots().await?;
    let urls = spots
        .iter()
        .map(|spot| ctx.urls.url_for(RouteName::ParkingSpot, spot.id))
        .collect();
    Ok(url_list(EntityKind::ParkingSpot, urls))
}

/// GET /parking-spots/{id}
pub async fn get_parking_spot<S: Store>(
    ItemId(id): ItemId,
    State(ctx): State<AppState<S>>,
) -> ApiResult<Json<UnitDocument>> {
    let spot = ctx
        .store
        .get_parking_spot(id)
        .await?
        .ok_or(ApiError::not_found(EntityKind::ParkingSpot, id))?;

    Ok(Json(UnitDocument::parking_spot(&spot, &ctx.urls)))
}

/// POST /parking-spots/
pub async fn create_parking_spot<S: Store>(
    State(ctx): State<AppState<S>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(body) = body?;
    let data = validate::unit_data(EntityKind::ParkingSpot, &body)?;

    let spot = ctx.store.insert_parking_spot(data).await?;
    log::info!("Created parking spot {}", spot.id);

    Ok(created(ctx.urls.url_for(RouteName::ParkingSpot, spot.id)))
}

/// PUT /parking-spots/{id}
pub async fn replace_parking_spot<S: Store>(
    ItemId(id): ItemId,
    State(ctx): State<AppState<S>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let mut spot = ctx
        .store
        .get_parking_spot(id)
        .await?
        .ok_or(ApiError::not_found(EntityKind::ParkingSpot, id))?;

    let Json(body) = body?;
    spot.apply(validate::unit_data(EntityKind::ParkingSpot, &body)?);

    if !ctx.store.update_parking_spot(&spot).await? {
        return Err(ApiError::not_found(EntityKind::ParkingSpot, id));
    }
    log::info!("Replaced parking spot {}", id);

    Ok(empty())
}

/// DELETE /parking-spots/{id}
pub async fn delete_parking_spot<S: Store>(
    ItemId(id): ItemId,
    State(ctx): State<AppState<S>>,
) -> ApiResult<Json<Value>> {
    let outcome = ctx.store.delete_parking_spot(id).await?;
    delete_response(outcome, EntityKind::ParkingSpot, id)
}
