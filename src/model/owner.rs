use crate::model::Id;

/// A person holding shares of one or more properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub id: Id,
    pub name: String,
    pub national_id: i64,
}

/// Mutable fields of an owner, as accepted on create and replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerData {
    pub name: String,
    pub national_id: i64,
}

impl Owner {
    pub fn from_data(id: Id, data: OwnerData) -> Self {
        Self {
            id,
            name: data.name,
            national_id: data.national_id,
        }
    }

    /// Replace every mutable field with `data`.
    pub fn apply(&mut self, data: OwnerData) {
        self.name = data.name;
        self.national_id = data.national_id;
    }
}
