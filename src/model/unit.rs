use crate::model::Id;

/// Fields shared by every numbered unit of the building: apartments,
/// offices and parking spots alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitData {
    pub number: i64,
    pub partition: String,
    /// Opaque status code chosen by the client.
    pub status: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub id: Id,
    pub number: i64,
    pub partition: String,
    pub status: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkingSpot {
    pub id: Id,
    pub number: i64,
    pub partition: String,
    pub status: i64,
}

impl Property {
    pub fn from_data(id: Id, data: UnitData) -> Self {
        Self {
            id,
            number: data.number,
            partition: data.partition,
            status: data.status,
        }
    }

    pub fn apply(&mut self, data: UnitData) {
        self.number = data.number;
        self.partition = data.partition;
        self.status = data.status;
    }
}

impl ParkingSpot {
    pub fn from_data(id: Id, data: UnitData) -> Self {
        Self {
            id,
            number: data.number,
            partition: data.partition,
            status: data.status,
        }
    }

    pub fn apply(&mut self, data: UnitData) {
        self.number = data.number;
        self.partition = data.partition;
        self.status = data.status;
    }
}
