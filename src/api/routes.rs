use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use crate::api::handlers::{self, AppState};
use crate::api::route_table::RouteName;
use crate::api::{owner_handlers, ownership_handlers, unit_handlers};
use crate::store::traits::Store;

pub fn create_router<S: Store + 'static>() -> Router<AppState<S>> {
    Router::new()
        // Health check
        .route(RouteName::Health.path(), get(handlers::health_check))
        // Owners
        .route(
            RouteName::Owners.path(),
            get(owner_handlers::list_owners::<S>).post(owner_handlers::create_owner::<S>),
        )
        .route(
            RouteName::OwnerSummary.path(),
            get(owner_handlers::owner_summary::<S>),
        )
        .route(
            RouteName::OwnerByNationalId.path(),
            get(owner_handlers::get_owner_by_national_id::<S>),
        )
        .route(
            RouteName::Owner.path(),
            get(owner_handlers::get_owner::<S>)
                .put(owner_handlers::replace_owner::<S>)
                .delete(owner_handlers::delete_owner::<S>),
        )
        // Ownerships, created under their owner
        .route(
            RouteName::OwnerOwnerships.path(),
            get(ownership_handlers::list_owner_ownerships::<S>)
                .post(ownership_handlers::create_ownership::<S>),
        )
        .route(
            RouteName::Ownerships.path(),
            get(ownership_handlers::list_ownerships::<S>),
        )
        .route(
            RouteName::Ownership.path(),
            get(ownership_handlers::get_ownership::<S>)
                .put(ownership_handlers::replace_ownership::<S>)
                .delete(ownership_handlers::delete_ownership::<S>),
        )
        // Parking assignments, created under their ownership
        .route(
            RouteName::OwnershipParkingAssignments.path(),
            get(ownership_handlers::list_ownership_parking_assignments::<S>)
                .post(ownership_handlers::create_parking_assignment::<S>),
        )
        .route(
            RouteName::ParkingAssignments.path(),
            get(ownership_handlers::list_parking_assignments::<S>),
        )
        .route(
            RouteName::ParkingAssignment.path(),
            get(ownership_handlers::get_parking_assignment::<S>)
                .put(ownership_handlers::replace_parking_assignment::<S>)
                .delete(ownership_handlers::delete_parking_assignment::<S>),
        )
        // Parking spots
        .route(
            RouteName::ParkingSpots.path(),
            get(unit_handlers::list_parking_spots::<S>)
                .post(unit_handlers::create_parking_spot::<S>),
        )
        .route(
            RouteName::ParkingSpot.path(),
            get(unit_handlers::get_parking_spot::<S>)
                .put(unit_handlers::replace_parking_spot::<S>)
                .delete(unit_handlers::delete_parking_spot::<S>),
        )
        // Properties
        .route(
            RouteName::Properties.path(),
            get(unit_handlers::list_properties::<S>).post(unit_handlers::create_property::<S>),
        )
        .route(
            RouteName::Property.path(),
            get(unit_handlers::get_property::<S>)
                .put(unit_handlers::replace_property::<S>)
                .delete(unit_handlers::delete_property::<S>),
        )
        .layer(CorsLayer::permissive())
}
