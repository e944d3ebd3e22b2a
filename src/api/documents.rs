//! JSON documents returned for each entity.
//!
//! Field names follow the wire format existing clients already consume.

use serde::Serialize;

use crate::api::route_table::RouteName;
use crate::logic::resolve::UrlMap;
use crate::model::{Id, Owner, Ownership, ParkingAssignment, ParkingSpot, Property};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnerDocument {
    pub self_url: String,
    pub id: Id,
    #[serde(rename = "nombres")]
    pub name: String,
    #[serde(rename = "dni")]
    pub national_id: i64,
    #[serde(rename = "propietariopropiedades_url")]
    pub ownerships_url: String,
}

/// Shared by properties and parking spots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitDocument {
    pub self_url: String,
    pub id: Id,
    #[serde(rename = "numero")]
    pub number: i64,
    #[serde(rename = "particion")]
    pub partition: String,
    #[serde(rename = "estado")]
    pub status: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnershipDocument {
    pub self_url: String,
    pub id: Id,
    #[serde(rename = "totalp")]
    pub share_total: i64,
    #[serde(rename = "propiedad_url")]
    pub property_url: String,
    #[serde(rename = "propietario_url")]
    pub owner_url: String,
    #[serde(rename = "ppcocheras_url")]
    pub parking_assignments_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParkingAssignmentDocument {
    pub self_url: String,
    pub id: Id,
    #[serde(rename = "pp_url")]
    pub ownership_url: String,
    #[serde(rename = "cochera_url")]
    pub parking_spot_url: String,
}

impl OwnerDocument {
    pub fn new(owner: &Owner, urls: &UrlMap) -> Self {
        Self {
            self_url: urls.url_for(RouteName::Owner, owner.id),
            id: owner.id,
            name: owner.name.clone(),
            national_id: owner.national_id,
            ownerships_url: urls.url_for(RouteName::OwnerOwnerships, owner.id),
        }
    }
}

impl UnitDocument {
    pub fn property(property: &Property, urls: &UrlMap) -> Self {
        Self {
            self_url: urls.url_for(RouteName::Property, property.id),
            id: property.id,
            number: property.number,
            partition: property.partition.clone(),
            status: property.status,
        }
    }

    pub fn parking_spot(spot: &ParkingSpot, urls: &UrlMap) -> Self {
        Self {
            self_url: urls.url_for(RouteName::ParkingSpot, spot.id),
            id: spot.id,
            number: spot.number,
            partition: spot.partition.clone(),
            status: spot.status,
        }
    }
}

impl OwnershipDocument {
    pub fn new(ownership: &Ownership, urls: &UrlMap) -> Self {
        Self {
            self_url: urls.url_for(RouteName::Ownership, ownership.id),
            id: ownership.id,
            share_total: ownership.share_total,
            property_url: urls.url_for(RouteName::Property, ownership.property_id),
            owner_url: urls.url_for(RouteName::Owner, ownership.owner_id),
            parking_assignments_url: urls
                .url_for(RouteName::OwnershipParkingAssignments, ownership.id),
        }
    }
}

impl ParkingAssignmentDocument {
    pub fn new(assignment: &ParkingAssignment, urls: &UrlMap) -> Self {
        Self {
            self_url: urls.url_for(RouteName::ParkingAssignment, assignment.id),
            id: assignment.id,
            ownership_url: urls.url_for(RouteName::Ownership, assignment.ownership_id),
            parking_spot_url: urls.url_for(RouteName::ParkingSpot, assignment.parking_spot_id),
        }
    }
}
