use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::{Entity, Id};

/// A real-estate listing. `id_owner` references an `Owner` by convention;
/// the store does not enforce the reference, and readers substitute a
/// default owner when it dangles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id_property: Id,
    pub name: String,
    pub address: String,
    pub price: Decimal,
    pub code_internal: String,
    pub year: i32,
    pub id_owner: Id,
}

impl Entity for Property {
    fn id(&self) -> Id {
        self.id_property
    }
}

/// Image attached to a property. Only enabled images surface in list views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyImage {
    pub id_property_image: Id,
    pub id_property: Id,
    pub file: String,
    pub enabled: bool,
}

impl Entity for PropertyImage {
    fn id(&self) -> Id {
        self.id_property_image
    }
}

/// Historical sale/valuation event tied to a property. Traces model sale
/// history as data; they are not an audit log of this system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyTrace {
    pub id_property_trace: Id,
    pub id_property: Id,
    pub date_sale: DateTime<Utc>,
    pub name: String,
    pub value: Decimal,
    pub tax: Decimal,
}

impl Entity for PropertyTrace {
    fn id(&self) -> Id {
        self.id_property_trace
    }
}

/// Payload for creating or replacing a property. Identity handling follows
/// the same rule as `NewOwner`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProperty {
    pub name: String,
    pub address: String,
    pub price: Decimal,
    #[serde(default)]
    pub code_internal: String,
    pub year: i32,
    pub id_owner: Id,
}

impl NewProperty {
    pub fn into_property(self, id: Id) -> Property {
        Property {
            id_property: id,
            name: self.name,
            address: self.address,
            price: self.price,
            code_internal: self.code_internal,
            year: self.year,
            id_owner: self.id_owner,
        }
    }
}
