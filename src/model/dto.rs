use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::{Id, Owner, Property, PropertyImage, PropertyTrace};

/// List-view projection of a property: the bare entity plus the owner's
/// display name and the first enabled image, filled in by the service layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListItem {
    pub id_property: Id,
    pub name: String,
    pub address: String,
    pub price: Decimal,
    pub code_internal: String,
    pub year: i32,
    pub id_owner: Id,
    pub owner_name: String,
    pub image: Option<String>,
}

impl PropertyListItem {
    pub fn from_property(
        property: Property,
        owner_name: String,
        image: Option<String>,
    ) -> Self {
        Self {
            id_property: property.id_property,
            name: property.name,
            address: property.address,
            price: property.price,
            code_internal: property.code_internal,
            year: property.year,
            id_owner: property.id_owner,
            owner_name,
            image,
        }
    }
}

/// Composite read model for a single property: entity fields plus the
/// embedded owner (a default placeholder when the reference dangles) and
/// the full image and trace lists (empty, never absent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetail {
    pub id_property: Id,
    pub name: String,
    pub address: String,
    pub price: Decimal,
    pub code_internal: String,
    pub year: i32,
    pub owner: Owner,
    pub images: Vec<PropertyImage>,
    pub traces: Vec<PropertyTrace>,
}

impl PropertyDetail {
    pub fn assemble(
        property: Property,
        owner: Option<Owner>,
        images: Vec<PropertyImage>,
        traces: Vec<PropertyTrace>,
    ) -> Self {
        Self {
            id_property: property.id_property,
            name: property.name,
            address: property.address,
            price: property.price,
            code_internal: property.code_internal,
            year: property.year,
            owner: owner.unwrap_or_default(),
            images,
            traces,
        }
    }
}
