use crate::model::Id;

/// A parking spot assigned under one ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkingAssignment {
    pub id: Id,
    pub ownership_id: Id,
    pub parking_spot_id: Id,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkingAssignmentData {
    pub parking_spot_id: Id,
}

impl ParkingAssignment {
    pub fn from_data(id: Id, ownership_id: Id, data: ParkingAssignmentData) -> Self {
        Self {
            id,
            ownership_id,
            parking_spot_id: data.parking_spot_id,
        }
    }

    pub fn apply(&mut self, data: ParkingAssignmentData) {
        self.parking_spot_id = data.parking_spot_id;
    }
}
