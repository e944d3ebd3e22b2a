use anyhow::{Context, Result};
use sqlx::{
    postgres::{PgPoolOptions, PgRow},
    PgPool, Row,
};

use crate::model::{
    EntityKind, Id, Owner, OwnerData, Ownership, OwnershipData, ParkingAssignment,
    ParkingAssignmentData, ParkingSpot, Property, UnitData,
};
use crate::store::traits::{
    DeleteOutcome, OwnerStore, OwnershipStore, ParkingAssignmentStore, ParkingSpotStore,
    PropertyStore, Store,
};

/// SQLSTATE raised when a row is still referenced by a foreign key.
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given database URL
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    async fn delete_row(
        &self,
        table: &'static str,
        id: Id,
        dependents: Option<EntityKind>,
    ) -> Result<DeleteOutcome> {
        let sql = format!("DELETE FROM {} WHERE id = $1", table);
        match sqlx::query(&sql).bind(id).execute(&self.pool).await {
            Ok(result) if result.rows_affected() > 0 => Ok(DeleteOutcome::Deleted),
            Ok(_) => Ok(DeleteOutcome::NotFound),
            Err(e) => match dependents {
                Some(by) if is_foreign_key_violation(&e) => Ok(DeleteOutcome::Referenced { by }),
                _ => Err(e).with_context(|| format!("Failed to delete from {}", table)),
            },
        }
    }
}

fn is_foreign_key_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_error) => db_error.code().as_deref() == Some(FOREIGN_KEY_VIOLATION),
        _ => false,
    }
}

fn owner_from_row(row: &PgRow) -> Owner {
    Owner {
        id: row.get("id"),
        name: row.get("name"),
        national_id: row.get("national_id"),
    }
}

fn property_from_row(row: &PgRow) -> Property {
    Property {
        id: row.get("id"),
        number: row.get("unit_number"),
        partition: row.get("partition_code"),
        status: row.get("status_code"),
    }
}

fn parking_spot_from_row(row: &PgRow) -> ParkingSpot {
    ParkingSpot {
        id: row.get("id"),
        number: row.get("unit_number"),
        partition: row.get("partition_code"),
        status: row.get("status_code"),
    }
}

fn ownership_from_row(row: &PgRow) -> Ownership {
    Ownership {
        id: row.get("id"),
        share_total: row.get("share_total"),
        owner_id: row.get("owner_id"),
        property_id: row.get("property_id"),
    }
}

fn parking_assignment_from_row(row: &PgRow) -> ParkingAssignment {
    ParkingAssignment {
        id: row.get("id"),
        ownership_id: row.get("ownership_id"),
        parking_spot_id: row.get("parking_spot_id"),
    }
}

#[async_trait::async_trait]
impl OwnerStore for PostgresStore {
    async fn get_owner(&self, id: Id) -> Result<Option<Owner>> {
        let row = sqlx::query("SELECT id, name, national_id FROM owners WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch owner")?;

        Ok(row.as_ref().map(owner_from_row))
    }

    async fn find_owner_by_national_id(&self, national_id: i64) -> Result<Option<Owner>> {
        let row = sqlx::query(
            "SELECT id, name, national_id FROM owners WHERE national_id = $1 ORDER BY id LIMIT 1",
        )
        .bind(national_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch owner by national id")?;

        Ok(row.as_ref().map(owner_from_row))
    }

    async fn list_owners(&self) -> Result<Vec<Owner>> {
        let rows = sqlx::query("SELECT id, name, national_id FROM owners ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list owners")?;

        Ok(rows.iter().map(owner_from_row).collect())
    }

    async fn insert_owner(&self, data: OwnerData) -> Result<Owner> {
        let row = sqlx::query(
            "INSERT INTO owners (name, national_id) VALUES ($1, $2) RETURNING id, name, national_id",
        )
        .bind(&data.name)
        .bind(data.national_id)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert owner")?;

        Ok(owner_from_row(&row))
    }

    async fn update_owner(&self, owner: &Owner) -> Result<bool> {
        let result = sqlx::query("UPDATE owners SET name = $2, national_id = $3 WHERE id = $1")
            .bind(owner.id)
            .bind(&owner.name)
            .bind(owner.national_id)
            .execute(&self.pool)
            .await
            .context("Failed to update owner")?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_owner(&self, id: Id) -> Result<DeleteOutcome> {
        self.delete_row("owners", id, Some(EntityKind::Ownership))
            .await
    }
}

#[async_trait::async_trait]
impl PropertyStore for PostgresStore {
    async fn get_property(&self, id: Id) -> Result<Option<Property>> {
        let row = sqlx::query(
            "SELECT id, unit_number, partition_code, status_code FROM properties WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch property")?;

        Ok(row.as_ref().map(property_from_row))
    }

    async fn list_properties(&self) -> Result<Vec<Property>> {
        let rows = sqlx::query(
            "SELECT id, unit_number, partition_code, status_code FROM properties ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list properties")?;

        Ok(rows.iter().map(property_from_row).collect())
    }

    async fn insert_property(&self, data: UnitData) -> Result<Property> {
        let row = sqlx::query(
            r#"
            INSERT INTO properties (unit_number, partition_code, status_code)
            VALUES ($1, $2, $3)
            RETURNING id, unit_number, partition_code, status_code
            "#,
        )
        .bind(data.number)
        .bind(&data.partition)
        .bind(data.status)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert property")?;

        Ok(property_from_row(&row))
    }

    async fn update_property(&self, property: &Property) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE properties
            SET unit_number = $2, partition_code = $3, status_code = $4
            WHERE id = $1
            "#,
        )
        .bind(property.id)
        .bind(property.number)
        .bind(&property.partition)
        .bind(property.status)
        .execute(&self.pool)
        .await
        .context("Failed to update property")?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_property(&self, id: Id) -> Result<DeleteOutcome> {
        self.delete_row("properties", id, Some(EntityKind::Ownership))
            .await
    }
}

#[async_trait::async_trait]
impl ParkingSpotStore for PostgresStore {
    async fn get_parking_spot(&self, id: Id) -> Result<Option<ParkingSpot>> {
        let row = sqlx::query(
            "SELECT id, unit_number, partition_code, status_code FROM parking_spots WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch parking spot")?;

        Ok(row.as_ref().map(parking_spot_from_row))
    }

    async fn list_parking_spots(&self) -> Result<Vec<ParkingSpot>> {
        let rows = sqlx::query(
            "SELECT id, unit_number, partition_code, status_code FROM parking_spots ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list parking spots")?;

        Ok(rows.iter().map(parking_spot_from_row).collect())
    }

    async fn insert_parking_spot(&self, data: UnitData) -> Result<ParkingSpot> {
        let row = sqlx::query(
            r#"
            INSERT INTO parking_spots (unit_number, partition_code, status_code)
            VALUES ($1, $2, $3)
            RETURNING id, unit_number, partition_code, status_code
            "#,
        )
        .bind(data.number)
        .bind(&data.partition)
        .bind(data.status)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert parking spot")?;

        Ok(parking_spot_from_row(&row))
    }

    async fn update_parking_spot(&self, spot: &ParkingSpot) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE parking_spots
            SET unit_number = $2, partition_code = $3, status_code = $4
            WHERE id = $1
            "#,
        )
        .bind(spot.id)
        .bind(spot.number)
        .bind(&spot.partition)
        .bind(spot.status)
        .execute(&self.pool)
        .await
        .context("Failed to update parking spot")?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_parking_spot(&self, id: Id) -> Result<DeleteOutcome> {
        self.delete_row("parking_spots", id, Some(EntityKind::ParkingAssignment))
            .await
    }
}

#[async_trait::async_trait]
impl OwnershipStore for PostgresStore {
    async fn get_ownership(&self, id: Id) -> Result<Option<Ownership>> {
        let row = sqlx::query(
            "SELECT id, share_total, owner_id, property_id FROM ownerships WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch ownership")?;

        Ok(row.as_ref().map(ownership_from_row))
    }

    async fn list_ownerships(&self) -> Result<Vec<Ownership>> {
        let rows = sqlx::query(
            "SELECT id, share_total, owner_id, property_id FROM ownerships ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list ownerships")?;

        Ok(rows.iter().map(ownership_from_row).collect())
    }

    async fn list_ownerships_for_owner(&self, owner_id: Id) -> Result<Vec<Ownership>> {
        let rows = sqlx::query(
            r#"
            SELECT id, share_total, owner_id, property_id
            FROM ownerships
            WHERE owner_id = $1
            ORDER BY id
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list ownerships for owner")?;

        Ok(rows.iter().map(ownership_from_row).collect())
    }

    async fn insert_ownership(&self, owner_id: Id, data: OwnershipData) -> Result<Ownership> {
        let row = sqlx::query(
            r#"
            INSERT INTO ownerships (share_total, owner_id, property_id)
            VALUES ($1, $2, $3)
            RETURNING id, share_total, owner_id, property_id
            "#,
        )
        .bind(data.share_total)
        .bind(owner_id)
        .bind(data.property_id)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert ownership")?;

        Ok(ownership_from_row(&row))
    }

    async fn update_ownership(&self, ownership: &Ownership) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE ownerships SET share_total = $2, property_id = $3 WHERE id = $1",
        )
        .bind(ownership.id)
        .bind(ownership.share_total)
        .bind(ownership.property_id)
        .execute(&self.pool)
        .await
        .context("Failed to update ownership")?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_ownership(&self, id: Id) -> Result<DeleteOutcome> {
        self.delete_row("ownerships", id, Some(EntityKind::ParkingAssignment))
            .await
    }
}

#[async_trait::async_trait]
impl ParkingAssignmentStore for PostgresStore {
    async fn get_parking_assignment(&self, id: Id) -> Result<Option<ParkingAssignment>> {
        let row = sqlx::query(
            "SELECT id, ownership_id, parking_spot_id FROM parking_assignments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch parking assignment")?;

        Ok(row.as_ref().map(parking_assignment_from_row))
    }

    async fn list_parking_assignments(&self) -> Result<Vec<ParkingAssignment>> {
        let rows = sqlx::query(
            "SELECT id, ownership_id, parking_spot_id FROM parking_assignments ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list parking assignments")?;

        Ok(rows.iter().map(parking_assignment_from_row).collect())
    }

    async fn list_parking_assignments_for_ownership(
        &self,
        ownership_id: Id,
    ) -> Result<Vec<ParkingAssignment>> {
        let rows = sqlx::query(
            r#"
            SELECT id, ownership_id, parking_spot_id
            FROM parking_assignments
            WHERE ownership_id = $1
            ORDER BY id
            "#,
        )
        .bind(ownership_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list parking assignments for ownership")?;

        Ok(rows.iter().map(parking_assignment_from_row).collect())
    }

    async fn insert_parking_assignment(
        &self,
        ownership_id: Id,
        data: ParkingAssignmentData,
    ) -> Result<ParkingAssignment> {
        let row = sqlx::query(
            r#"
            INSERT INTO parking_assignments (ownership_id, parking_spot_id)
            VALUES ($1, $2)
            RETURNING id, ownership_id, parking_spot_id
            "#,
        )
        .bind(ownership_id)
        .bind(data.parking_spot_id)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert parking assignment")?;

        Ok(parking_assignment_from_row(&row))
    }

    async fn update_parking_assignment(&self, assignment: &ParkingAssignment) -> Result<bool> {
        let result =
            sqlx::query("UPDATE parking_assignments SET parking_spot_id = $2 WHERE id = $1")
                .bind(assignment.id)
                .bind(assignment.parking_spot_id)
                .execute(&self.pool)
                .await
                .context("Failed to update parking assignment")?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_parking_assignment(&self, id: Id) -> Result<DeleteOutcome> {
        self.delete_row("parking_assignments", id, None).await
    }
}

impl Store for PostgresStore {}
