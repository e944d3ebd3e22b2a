//! Turns request bodies into typed entity fields.
//!
//! Validation never writes. Reference fields are checked against the store
//! so a body that passes here names rows that existed at the time of the
//! check; the foreign keys in the schema catch anything deleted since.

use serde_json::{Map, Value};

use crate::api::route_table::RouteName;
use crate::logic::resolve::{InvalidUrl, UrlMap};
use crate::model::{
    EntityKind, Id, OwnerData, OwnershipData, ParkingAssignmentData, UnitData,
};
use crate::store::traits::Store;

pub const OWNER_NAME_MAX_LEN: usize = 64;
pub const PARTITION_MAX_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid request body: {0}")]
    MalformedBody(String),

    #[error("Invalid {entity}: request body must be a JSON object")]
    NotAnObject { entity: EntityKind },

    #[error("Invalid {entity}: missing {field}")]
    MissingField {
        entity: EntityKind,
        field: &'static str,
    },

    #[error("Invalid {entity}: {field} must be an integer")]
    NotAnInteger {
        entity: EntityKind,
        field: &'static str,
    },

    #[error("Invalid {entity}: {field} must be a string")]
    NotAString {
        entity: EntityKind,
        field: &'static str,
    },

    #[error("Invalid {entity}: {field} must be at most {max} characters")]
    TooLong {
        entity: EntityKind,
        field: &'static str,
        max: usize,
    },

    #[error(transparent)]
    Url(#[from] InvalidUrl),

    /// The URL resolved, but not to an existing row of the expected kind.
    #[error("Invalid {target} URL: {url}")]
    InvalidReference { target: EntityKind, url: String },
}

/// Failure while checking a body whose fields reference other rows.
#[derive(Debug, thiserror::Error)]
pub enum BodyError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Reads fields out of one request body on behalf of one entity kind.
struct Fields<'a> {
    entity: EntityKind,
    body: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    fn new(
        entity: EntityKind,
        body: &'a Value,
        required: &[&'static str],
    ) -> Result<Self, ValidationError> {
        let body = body
            .as_object()
            .ok_or(ValidationError::NotAnObject { entity })?;

        if let Some(&field) = required.iter().find(|field| !body.contains_key(**field)) {
            return Err(ValidationError::MissingField { entity, field });
        }

        Ok(Self { entity, body })
    }

    fn value(&self, field: &'static str) -> Result<&'a Value, ValidationError> {
        self.body.get(field).ok_or(ValidationError::MissingField {
            entity: self.entity,
            field,
        })
    }

    fn integer(&self, field: &'static str) -> Result<i64, ValidationError> {
        coerce_integer(self.value(field)?).ok_or(ValidationError::NotAnInteger {
            entity: self.entity,
            field,
        })
    }

    fn string(&self, field: &'static str, max: usize) -> Result<String, ValidationError> {
        let value = self
            .value(field)?
            .as_str()
            .ok_or(ValidationError::NotAString {
                entity: self.entity,
                field,
            })?;

        if value.chars().count() > max {
            return Err(ValidationError::TooLong {
                entity: self.entity,
                field,
                max,
            });
        }
        Ok(value.to_string())
    }

    fn url(&self, field: &'static str) -> Result<&'a str, ValidationError> {
        self.value(field)?
            .as_str()
            .ok_or(ValidationError::NotAString {
                entity: self.entity,
                field,
            })
    }
}

/// Accept a JSON integer or a string holding one.
pub fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

pub fn owner_data(body: &Value) -> Result<OwnerData, ValidationError> {
    let fields = Fields::new(EntityKind::Owner, body, &["nombre", "dni"])?;
    Ok(OwnerData {
        name: fields.string("nombre", OWNER_NAME_MAX_LEN)?,
        national_id: fields.integer("dni")?,
    })
}

/// Fields of a property or a parking spot; `entity` picks which one the
/// error messages talk about.
pub fn unit_data(entity: EntityKind, body: &Value) -> Result<UnitData, ValidationError> {
    let fields = Fields::new(entity, body, &["numero", "particion", "estado"])?;
    Ok(UnitData {
        number: fields.integer("numero")?,
        partition: fields.string("particion", PARTITION_MAX_LEN)?,
        status: fields.integer("estado")?,
    })
}

pub async fn ownership_data<S: Store>(
    store: &S,
    urls: &UrlMap,
    body: &Value,
) -> Result<OwnershipData, BodyError> {
    let fields = Fields::new(EntityKind::Ownership, body, &["totalp", "propiedad_url"])?;
    let share_total = fields.integer("totalp")?;
    let url = fields.url("propiedad_url")?;

    let property_id = reference_id(urls, url, RouteName::Property, EntityKind::Property)?;
    if store.get_property(property_id).await?.is_none() {
        return Err(ValidationError::InvalidReference {
            target: EntityKind::Property,
            url: url.to_string(),
        }
        .into());
    }

    Ok(OwnershipData {
        share_total,
        property_id,
    })
}

pub async fn parking_assignment_data<S: Store>(
    store: &S,
    urls: &UrlMap,
    body: &Value,
) -> Result<ParkingAssignmentData, BodyError> {
    let fields = Fields::new(EntityKind::ParkingAssignment, body, &["cochera_url"])?;
    let url = fields.url("cochera_url")?;

    let parking_spot_id =
        reference_id(urls, url, RouteName::ParkingSpot, EntityKind::ParkingSpot)?;
    if store.get_parking_spot(parking_spot_id).await?.is_none() {
        return Err(ValidationError::InvalidReference {
            target: EntityKind::ParkingSpot,
            url: url.to_string(),
        }
        .into());
    }

    Ok(ParkingAssignmentData { parking_spot_id })
}

/// Resolve `url` and insist it names an item of `expected`.
fn reference_id(
    urls: &UrlMap,
    url: &str,
    expected: RouteName,
    target: EntityKind,
) -> Result<Id, ValidationError> {
    let resolved = urls.resolve(url)?;
    if resolved.name != expected {
        return Err(ValidationError::InvalidReference {
            target,
            url: url.to_string(),
        });
    }
    resolved
        .param("id")
        .ok_or_else(|| ValidationError::InvalidReference {
            target,
            url: url.to_string(),
        })
}
