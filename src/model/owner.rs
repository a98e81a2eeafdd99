use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Entity, Id};

/// Party holding title to one or more properties.
///
/// The default value doubles as the placeholder substituted when a
/// property's owner reference is dangling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub id_owner: Id,
    pub name: String,
    pub address: String,
    pub photo: String,
    pub birthday: DateTime<Utc>,
}

impl Entity for Owner {
    fn id(&self) -> Id {
        self.id_owner
    }
}

/// Payload for creating or replacing an owner. The identity is never taken
/// from the payload; it is reserved by the store on create and pinned to the
/// path parameter on update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOwner {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub photo: String,
    pub birthday: DateTime<Utc>,
}

impl NewOwner {
    pub fn into_owner(self, id: Id) -> Owner {
        Owner {
            id_owner: id,
            name: self.name,
            address: self.address,
            photo: self.photo,
            birthday: self.birthday,
        }
    }
}
