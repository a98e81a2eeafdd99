use crate::model::{
    Id, Owner, PagedResult, Property, PropertyFilter, PropertyImage, PropertyTrace,
};
use anyhow::Result;

#[async_trait::async_trait]
pub trait OwnerStore: Send + Sync {
    async fn get_owner(&self, id: Id) -> Result<Option<Owner>>;
    async fn list_owners(&self) -> Result<Vec<Owner>>;
    async fn insert_owner(&self, owner: Owner) -> Result<()>;
    async fn replace_owner(&self, owner: Owner) -> Result<bool>;
    async fn delete_owner(&self, id: Id) -> Result<bool>;
    async fn owner_exists(&self, id: Id) -> Result<bool>;
    async fn count_owners(&self) -> Result<i64>;
    /// Atomically reserve the next sequential owner identity.
    async fn next_owner_id(&self) -> Result<Id>;
}

#[async_trait::async_trait]
pub trait PropertyStore: Send + Sync {
    async fn get_property(&self, id: Id) -> Result<Option<Property>>;
    async fn list_properties(&self) -> Result<Vec<Property>>;
    /// One window of the filtered listing plus the total match count,
    /// both computed against the same predicate. Items are ordered by
    /// identity ascending so repeated queries page deterministically.
    async fn list_properties_paged(
        &self,
        filter: &PropertyFilter,
    ) -> Result<PagedResult<Property>>;
    async fn insert_property(&self, property: Property) -> Result<()>;
    async fn replace_property(&self, property: Property) -> Result<bool>;
    async fn delete_property(&self, id: Id) -> Result<bool>;
    async fn property_exists(&self, id: Id) -> Result<bool>;
    async fn count_properties(&self, filter: &PropertyFilter) -> Result<i64>;
    /// Atomically reserve the next sequential property identity.
    async fn next_property_id(&self) -> Result<Id>;
}

#[async_trait::async_trait]
pub trait PropertyImageStore: Send + Sync {
    async fn insert_image(&self, image: PropertyImage) -> Result<()>;
    async fn images_for_property(&self, property_id: Id) -> Result<Vec<PropertyImage>>;
    async fn first_enabled_image(&self, property_id: Id) -> Result<Option<PropertyImage>>;
    async fn next_image_id(&self) -> Result<Id>;
}

#[async_trait::async_trait]
pub trait PropertyTraceStore: Send + Sync {
    async fn insert_trace(&self, trace: PropertyTrace) -> Result<()>;
    async fn traces_for_property(&self, property_id: Id) -> Result<Vec<PropertyTrace>>;
    async fn next_trace_id(&self) -> Result<Id>;
}

pub trait Store:
    OwnerStore + PropertyStore + PropertyImageStore + PropertyTraceStore + Send + Sync
{
}
