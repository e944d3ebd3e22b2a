use anyhow::{bail, Result};
use parking_lot::RwLock;
use std::collections::BTreeMap;

use crate::model::{
    EntityKind, Id, Owner, OwnerData, Ownership, OwnershipData, ParkingAssignment,
    ParkingAssignmentData, ParkingSpot, Property, UnitData,
};
use crate::store::traits::{
    DeleteOutcome, OwnerStore, OwnershipStore, ParkingAssignmentStore, ParkingSpotStore,
    PropertyStore, Store,
};

/// A table keyed by id, handing out ids the way a serial column does:
/// starting at 1 and never reusing a deleted one.
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<Id, T>,
    last_id: Id,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T: Clone> Table<T> {
    fn next_id(&mut self) -> Id {
        self.last_id += 1;
        self.last_id
    }

    fn get(&self, id: Id) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    fn replace(&mut self, id: Id, row: T) -> bool {
        match self.rows.get_mut(&id) {
            Some(slot) => {
                *slot = row;
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Default)]
struct Tables {
    owners: Table<Owner>,
    properties: Table<Property>,
    parking_spots: Table<ParkingSpot>,
    ownerships: Table<Ownership>,
    parking_assignments: Table<ParkingAssignment>,
}

impl Tables {
    fn check_ownership_refs(&self, owner_id: Id, property_id: Id) -> Result<()> {
        if !self.owners.rows.contains_key(&owner_id) {
            bail!("ownership references missing owner {}", owner_id);
        }
        if !self.properties.rows.contains_key(&property_id) {
            bail!("ownership references missing property {}", property_id);
        }
        Ok(())
    }

    fn check_assignment_refs(&self, ownership_id: Id, parking_spot_id: Id) -> Result<()> {
        if !self.ownerships.rows.contains_key(&ownership_id) {
            bail!("parking assignment references missing ownership {}", ownership_id);
        }
        if !self.parking_spots.rows.contains_key(&parking_spot_id) {
            bail!(
                "parking assignment references missing parking spot {}",
                parking_spot_id
            );
        }
        Ok(())
    }
}

/// Store kept entirely in process memory. Enforces the same foreign keys
/// and delete restrictions as the PostgreSQL schema.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl OwnerStore for MemoryStore {
    async fn get_owner(&self, id: Id) -> Result<Option<Owner>> {
        Ok(self.tables.read().owners.get(id))
    }

    async fn find_owner_by_national_id(&self, national_id: i64) -> Result<Option<Owner>> {
        let tables = self.tables.read();
        Ok(tables
            .owners
            .rows
            .values()
            .find(|owner| owner.national_id == national_id)
            .cloned())
    }

    async fn list_owners(&self) -> Result<Vec<Owner>> {
        Ok(self.tables.read().owners.all())
    }

    async fn insert_owner(&self, data: OwnerData) -> Result<Owner> {
        let mut tables = self.tables.write();
        let owner = Owner::from_data(tables.owners.next_id(), data);
        tables.owners.rows.insert(owner.id, owner.clone());
        Ok(owner)
    }

    async fn update_owner(&self, owner: &Owner) -> Result<bool> {
        Ok(self.tables.write().owners.replace(owner.id, owner.clone()))
    }

    async fn delete_owner(&self, id: Id) -> Result<DeleteOutcome> {
        let mut tables = self.tables.write();
        if !tables.owners.rows.contains_key(&id) {
            return Ok(DeleteOutcome::NotFound);
        }
        if tables.ownerships.rows.values().any(|o| o.owner_id == id) {
            return Ok(DeleteOutcome::Referenced {
                by: EntityKind::Ownership,
            });
        }
        tables.owners.rows.remove(&id);
        Ok(DeleteOutcome::Deleted)
    }
}

#[async_trait::async_trait]
impl PropertyStore for MemoryStore {
    async fn get_property(&self, id: Id) -> Result<Option<Property>> {
        Ok(self.tables.read().properties.get(id))
    }

    async fn list_properties(&self) -> Result<Vec<Property>> {
        Ok(self.tables.read().properties.all())
    }

    async fn insert_property(&self, data: UnitData) -> Result<Property> {
        let mut tables = self.tables.write();
        let property = Property::from_data(tables.properties.next_id(), data);
        tables.properties.rows.insert(property.id, property.clone());
        Ok(property)
    }

    async fn update_property(&self, property: &Property) -> Result<bool> {
        Ok(self
            .tables
            .write()
            .properties
            .replace(property.id, property.clone()))
    }

    async fn delete_property(&self, id: Id) -> Result<DeleteOutcome> {
        let mut tables = self.tables.write();
        if !tables.properties.rows.contains_key(&id) {
            return Ok(DeleteOutcome::NotFound);
        }
        if tables.ownerships.rows.values().any(|o| o.property_id == id) {
            return Ok(DeleteOutcome::Referenced {
                by: EntityKind::Ownership,
            });
        }
        tables.properties.rows.remove(&id);
        Ok(DeleteOutcome::Deleted)
    }
}

#[async_trait::async_trait]
impl ParkingSpotStore for MemoryStore {
    async fn get_parking_spot(&self, id: Id) -> Result<Option<ParkingSpot>> {
        Ok(self.tables.read().parking_spots.get(id))
    }

    async fn list_parking_spots(&self) -> Result<Vec<ParkingSpot>> {
        Ok(self.tables.read().parking_spots.all())
    }

    async fn insert_parking_spot(&self, data: UnitData) -> Result<ParkingSpot> {
        let mut tables = self.tables.write();
        let spot = ParkingSpot::from_data(tables.parking_spots.next_id(), data);
        tables.parking_spots.rows.insert(spot.id, spot.clone());
        Ok(spot)
    }

    async fn update_parking_spot(&self, spot: &ParkingSpot) -> Result<bool> {
        Ok(self
            .tables
            .write()
            .parking_spots
            .replace(spot.id, spot.clone()))
    }

    async fn delete_parking_spot(&self, id: Id) -> Result<DeleteOutcome> {
        let mut tables = self.tables.write();
        if !tables.parking_spots.rows.contains_key(&id) {
            return Ok(DeleteOutcome::NotFound);
        }
        if tables
            .parking_assignments
            .rows
            .values()
            .any(|a| a.parking_spot_id == id)
        {
            return Ok(DeleteOutcome::Referenced {
                by: EntityKind::ParkingAssignment,
            });
        }
        tables.parking_spots.rows.remove(&id);
        Ok(DeleteOutcome::Deleted)
    }
}

#[async_trait::async_trait]
impl OwnershipStore for MemoryStore {
    async fn get_ownership(&self, id: Id) -> Result<Option<Ownership>> {
        Ok(self.tables.read().ownerships.get(id))
    }

    async fn list_ownerships(&self) -> Result<Vec<Ownership>> {
        Ok(self.tables.read().ownerships.all())
    }

    async fn list_ownerships_for_owner(&self, owner_id: Id) -> Result<Vec<Ownership>> {
        let tables = self.tables.read();
        Ok(tables
            .ownerships
            .rows
            .values()
            .filter(|o| o.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn insert_ownership(&self, owner_id: Id, data: OwnershipData) -> Result<Ownership> {
        let mut tables = self.tables.write();
        tables.check_ownership_refs(owner_id, data.property_id)?;
        let ownership = Ownership::from_data(tables.ownerships.next_id(), owner_id, data);
        tables.ownerships.rows.insert(ownership.id, ownership.clone());
        Ok(ownership)
    }

    async fn update_ownership(&self, ownership: &Ownership) -> Result<bool> {
        let mut tables = self.tables.write();
        if !tables.ownerships.rows.contains_key(&ownership.id) {
            return Ok(false);
        }
        tables.check_ownership_refs(ownership.owner_id, ownership.property_id)?;
        Ok(tables.ownerships.replace(ownership.id, ownership.clone()))
    }

    async fn delete_ownership(&self, id: Id) -> Result<DeleteOutcome> {
        let mut tables = self.tables.write();
        if !tables.ownerships.rows.contains_key(&id) {
            return Ok(DeleteOutcome::NotFound);
        }
        if tables
            .parking_assignments
            .rows
            .values()
            .any(|a| a.ownership_id == id)
        {
            return Ok(DeleteOutcome::Referenced {
                by: EntityKind::ParkingAssignment,
            });
        }
        tables.ownerships.rows.remove(&id);
        Ok(DeleteOutcome::Deleted)
    }
}

#[async_trait::async_trait]
impl ParkingAssignmentStore for MemoryStore {
    async fn get_parking_assignment(&self, id: Id) -> Result<Option<ParkingAssignment>> {
        Ok(self.tables.read().parking_assignments.get(id))
    }

    async fn list_parking_assignments(&self) -> Result<Vec<ParkingAssignment>> {
        Ok(self.tables.read().parking_assignments.all())
    }

    async fn list_parking_assignments_for_ownership(
        &self,
        ownership_id: Id,
    ) -> Result<Vec<ParkingAssignment>> {
        let tables = self.tables.read();
        Ok(tables
            .parking_assignments
            .rows
            .values()
            .filter(|a| a.ownership_id == ownership_id)
            .cloned()
            .collect())
    }

    async fn insert_parking_assignment(
        &self,
        ownership_id: Id,
        data: ParkingAssignmentData,
    ) -> Result<ParkingAssignment> {
        let mut tables = self.tables.write();
        tables.check_assignment_refs(ownership_id, data.parking_spot_id)?;
        let assignment =
            ParkingAssignment::from_data(tables.parking_assignments.next_id(), ownership_id, data);
        tables
            .parking_assignments
            .rows
            .insert(assignment.id, assignment.clone());
        Ok(assignment)
    }

    async fn update_parking_assignment(&self, assignment: &ParkingAssignment) -> Result<bool> {
        let mut tables = self.tables.write();
        if !tables.parking_assignments.rows.contains_key(&assignment.id) {
            return Ok(false);
        }
        tables.check_assignment_refs(assignment.ownership_id, assignment.parking_spot_id)?;
        Ok(tables
            .parking_assignments
            .replace(assignment.id, assignment.clone()))
    }

    async fn delete_parking_assignment(&self, id: Id) -> Result<DeleteOutcome> {
        let removed = self.tables.write().parking_assignments.rows.remove(&id);
        Ok(match removed {
            Some(_) => DeleteOutcome::Deleted,
            None => DeleteOutcome::NotFound,
        })
    }
}

impl Store for MemoryStore {}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(number: i64) -> UnitData {
        UnitData {
            number,
            partition: "A".to_string(),
            status: 1,
        }
    }

    #[tokio::test]
    async fn test_ids_start_at_one_and_are_not_reused() {
        let store = MemoryStore::new();
        let first = store
            .insert_owner(OwnerData {
                name: "Ana".to_string(),
                national_id: 123,
            })
            .await
            .unwrap();
        assert_eq!(first.id, 1);

        assert_eq!(store.delete_owner(1).await.unwrap(), DeleteOutcome::Deleted);
        let second = store
            .insert_owner(OwnerData {
                name: "Luis".to_string(),
                national_id: 456,
            })
            .await
            .unwrap();
        assert_eq!(second.id, 2);
        assert_eq!(store.get_owner(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_is_restricted_while_referenced() {
        let store = MemoryStore::new();
        let owner = store
            .insert_owner(OwnerData {
                name: "Ana".to_string(),
                national_id: 123,
            })
            .await
            .unwrap();
        let property = store.insert_property(unit(101)).await.unwrap();
        let ownership = store
            .insert_ownership(
                owner.id,
                OwnershipData {
                    share_total: 50,
                    property_id: property.id,
                },
            )
            .await
            .unwrap();

        assert_eq!(
            store.delete_owner(owner.id).await.unwrap(),
            DeleteOutcome::Referenced {
                by: EntityKind::Ownership
            }
        );
        assert_eq!(
            store.delete_property(property.id).await.unwrap(),
            DeleteOutcome::Referenced {
                by: EntityKind::Ownership
            }
        );

        assert_eq!(
            store.delete_ownership(ownership.id).await.unwrap(),
            DeleteOutcome::Deleted
        );
        assert_eq!(
            store.delete_owner(owner.id).await.unwrap(),
            DeleteOutcome::Deleted
        );
        assert_eq!(
            store.delete_owner(owner.id).await.unwrap(),
            DeleteOutcome::NotFound
        );
    }

    #[tokio::test]
    async fn test_insert_rejects_dangling_foreign_keys() {
        let store = MemoryStore::new();
        let spot = store.insert_parking_spot(unit(7)).await.unwrap();

        let result = store
            .insert_parking_assignment(
                42,
                ParkingAssignmentData {
                    parking_spot_id: spot.id,
                },
            )
            .await;
        assert!(result.is_err());
        assert!(store.list_parking_assignments().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_by_national_id_returns_lowest_id() {
        let store = MemoryStore::new();
        for name in ["Ana", "Bea"] {
            store
                .insert_owner(OwnerData {
                    name: name.to_string(),
                    national_id: 999,
                })
                .await
                .unwrap();
        }

        let found = store.find_owner_by_national_id(999).await.unwrap().unwrap();
        assert_eq!(found.name, "Ana");
        assert!(store.find_owner_by_national_id(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_row_reports_false() {
        let store = MemoryStore::new();
        let ghost = Property::from_data(5, unit(1));
        assert!(!store.update_property(&ghost).await.unwrap());
    }
}
