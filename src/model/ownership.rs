use crate::model::Id;

/// One owner's share in one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ownership {
    pub id: Id,
    pub share_total: i64,
    pub owner_id: Id,
    pub property_id: Id,
}

/// Mutable fields of an ownership. The owner is fixed by the path the
/// ownership was created under and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipData {
    pub share_total: i64,
    pub property_id: Id,
}

impl Ownership {
    pub fn from_data(id: Id, owner_id: Id, data: OwnershipData) -> Self {
        Self {
            id,
            share_total: data.share_total,
            owner_id,
            property_id: data.property_id,
        }
    }

    pub fn apply(&mut self, data: OwnershipData) {
        self.share_total = data.share_total;
        self.property_id = data.property_id;
    }
}
