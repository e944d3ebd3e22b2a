use crate::model::{
    EntityKind, Id, Owner, OwnerData, Ownership, OwnershipData, ParkingAssignment,
    ParkingAssignmentData, ParkingSpot, Property, UnitData,
};
use anyhow::Result;

/// Result of deleting a row that other rows may still point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
    /// Nothing was deleted because rows of kind `by` still reference it.
    Referenced { by: EntityKind },
}

#[async_trait::async_trait]
pub trait OwnerStore: Send + Sync {
    async fn get_owner(&self, id: Id) -> Result<Option<Owner>>;
    /// First owner (lowest id) registered under `national_id`.
    async fn find_owner_by_national_id(&self, national_id: i64) -> Result<Option<Owner>>;
    async fn list_owners(&self) -> Result<Vec<Owner>>;
    async fn insert_owner(&self, data: OwnerData) -> Result<Owner>;
    /// Returns false when no owner has `owner.id`.
    async fn update_owner(&self, owner: &Owner) -> Result<bool>;
    async fn delete_owner(&self, id: Id) -> Result<DeleteOutcome>;
}

#[async_trait::async_trait]
pub trait PropertyStore: Send + Sync {
    async fn get_property(&self, id: Id) -> Result<Option<Property>>;
    async fn list_properties(&self) -> Result<Vec<Property>>;
    async fn insert_property(&self, data: UnitData) -> Result<Property>;
    async fn update_property(&self, property: &Property) -> Result<bool>;
    async fn delete_property(&self, id: Id) -> Result<DeleteOutcome>;
}

#[async_trait::async_trait]
pub trait ParkingSpotStore: Send + Sync {
    async fn get_parking_spot(&self, id: Id) -> Result<Option<ParkingSpot>>;
    async fn list_parking_spots(&self) -> Result<Vec<ParkingSpot>>;
    async fn insert_parking_spot(&self, data: UnitData) -> Result<ParkingSpot>;
    async fn update_parking_spot(&self, spot: &ParkingSpot) -> Result<bool>;
    async fn delete_parking_spot(&self, id: Id) -> Result<DeleteOutcome>;
}

#[async_trait::async_trait]
pub trait OwnershipStore: Send + Sync {
    async fn get_ownership(&self, id: Id) -> Result<Option<Ownership>>;
    async fn list_ownerships(&self) -> Result<Vec<Ownership>>;
    async fn list_ownerships_for_owner(&self, owner_id: Id) -> Result<Vec<Ownership>>;
    async fn insert_ownership(&self, owner_id: Id, data: OwnershipData) -> Result<Ownership>;
    async fn update_ownership(&self, ownership: &Ownership) -> Result<bool>;
    async fn delete_ownership(&self, id: Id) -> Result<DeleteOutcome>;
}

#[async_trait::async_trait]
pub trait ParkingAssignmentStore: Send + Sync {
    async fn get_parking_assignment(&self, id: Id) -> Result<Option<ParkingAssignment>>;
    async fn list_parking_assignments(&self) -> Result<Vec<ParkingAssignment>>;
    async fn list_parking_assignments_for_ownership(
        &self,
        ownership_id: Id,
    ) -> Result<Vec<ParkingAssignment>>;
    async fn insert_parking_assignment(
        &self,
        ownership_id: Id,
        data: ParkingAssignmentData,
    ) -> Result<ParkingAssignment>;
    async fn update_parking_assignment(&self, assignment: &ParkingAssignment) -> Result<bool>;
    async fn delete_parking_assignment(&self, id: Id) -> Result<DeleteOutcome>;
}

pub trait Store:
    OwnerStore + PropertyStore + ParkingSpotStore + OwnershipStore + ParkingAssignmentStore + Send + Sync
{
}
