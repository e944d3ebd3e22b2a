use std::fmt;

pub type Id = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Owner,
    Property,
    ParkingSpot,
    Ownership,
    ParkingAssignment,
}

impl EntityKind {
    /// Singular name used in client-facing messages. The front-end matches
    /// on these.
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Owner => "propietario",
            EntityKind::Property => "propiedad",
            EntityKind::ParkingSpot => "cochera",
            EntityKind::Ownership => "propietariopropiedad",
            EntityKind::ParkingAssignment => "ppcochera",
        }
    }

    /// Key wrapping a list of this entity's URLs in list responses.
    pub fn collection_key(self) -> &'static str {
        match self {
            EntityKind::Owner => "propietarios",
            EntityKind::Property => "propiedades",
            EntityKind::ParkingSpot => "cocheras",
            EntityKind::Ownership => "propietariopropiedades",
            EntityKind::ParkingAssignment => "ppcocheras",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
