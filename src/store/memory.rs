use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI32, Ordering};

use anyhow::Result;
use parking_lot::RwLock;

use crate::model::{
    Entity, Id, Owner, PagedResult, Property, PropertyFilter, PropertyImage, PropertyTrace,
};
use crate::store::traits::{
    OwnerStore, PropertyImageStore, PropertyStore, PropertyTraceStore, Store,
};

/// Identity-keyed CRUD over one entity type, in memory. The `BTreeMap`
/// keeps iteration in identity order, which is the listing sort order.
#[derive(Debug)]
struct Collection<T: Entity> {
    items: RwLock<BTreeMap<Id, T>>,
    // High-water mark for reserved and inserted identities.
    next_id: AtomicI32,
}

impl<T: Entity> Collection<T> {
    fn new() -> Self {
        Self {
            items: RwLock::new(BTreeMap::new()),
            next_id: AtomicI32::new(0),
        }
    }

    fn get(&self, id: Id) -> Option<T> {
        self.items.read().get(&id).cloned()
    }

    fn list(&self) -> Vec<T> {
        self.items.read().values().cloned().collect()
    }

    fn find(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.items
            .read()
            .values()
            .filter(|item| predicate(item))
            .cloned()
            .collect()
    }

    fn insert(&self, item: T) {
        self.next_id.fetch_max(item.id(), Ordering::SeqCst);
        self.items.write().insert(item.id(), item);
    }

    fn replace(&self, item: T) -> bool {
        let mut items = self.items.write();
        if items.contains_key(&item.id()) {
            items.insert(item.id(), item);
            true
        } else {
            false
        }
    }

    fn remove(&self, id: Id) -> bool {
        self.items.write().remove(&id).is_some()
    }

    fn exists(&self, id: Id) -> bool {
        self.items.read().contains_key(&id)
    }

    fn count(&self) -> i64 {
        self.items.read().len() as i64
    }

    fn reserve_id(&self) -> Id {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// In-memory store over the four collections. Backs the unit and
/// integration test suites; behavior matches the Postgres adapter.
#[derive(Debug)]
pub struct MemoryStore {
    owners: Collection<Owner>,
    properties: Collection<Property>,
    images: Collection<PropertyImage>,
    traces: Collection<PropertyTrace>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            owners: Collection::new(),
            properties: Collection::new(),
            images: Collection::new(),
            traces: Collection::new(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl OwnerStore for MemoryStore {
    async fn get_owner(&self, id: Id) -> Result<Option<Owner>> {
        Ok(self.owners.get(id))
    }

    async fn list_owners(&self) -> Result<Vec<Owner>> {
        Ok(self.owners.list())
    }

    async fn insert_owner(&self, owner: Owner) -> Result<()> {
        self.owners.insert(owner);
        Ok(())
    }

    async fn replace_owner(&self, owner: Owner) -> Result<bool> {
        Ok(self.owners.replace(owner))
    }

    async fn delete_owner(&self, id: Id) -> Result<bool> {
        Ok(self.owners.remove(id))
    }

    async fn owner_exists(&self, id: Id) -> Result<bool> {
        Ok(self.owners.exists(id))
    }

    async fn count_owners(&self) -> Result<i64> {
        Ok(self.owners.count())
    }

    async fn next_owner_id(&self) -> Result<Id> {
        Ok(self.owners.reserve_id())
    }
}

#[async_trait::async_trait]
impl PropertyStore for MemoryStore {
    async fn get_property(&self, id: Id) -> Result<Option<Property>> {
        Ok(self.properties.get(id))
    }

    async fn list_properties(&self) -> Result<Vec<Property>> {
        Ok(self.properties.list())
    }

    async fn list_properties_paged(
        &self,
        filter: &PropertyFilter,
    ) -> Result<PagedResult<Property>> {
        // Identity order comes from the BTreeMap; the count and the window
        // share the same predicate.
        let matched = self.properties.find(|p| filter.matches(p));
        let total_count = matched.len() as i64;

        let items = matched
            .into_iter()
            .skip(filter.skip() as usize)
            .take(filter.page_size() as usize)
            .collect();

        Ok(PagedResult::new(
            items,
            total_count,
            filter.page(),
            filter.page_size(),
        ))
    }

    async fn insert_property(&self, property: Property) -> Result<()> {
        self.properties.insert(property);
        Ok(())
    }

    async fn replace_property(&self, property: Property) -> Result<bool> {
        Ok(self.properties.replace(property))
    }

    async fn delete_property(&self, id: Id) -> Result<bool> {
        Ok(self.properties.remove(id))
    }

    async fn property_exists(&self, id: Id) -> Result<bool> {
        Ok(self.properties.exists(id))
    }

    async fn count_properties(&self, filter: &PropertyFilter) -> Result<i64> {
        Ok(self.properties.find(|p| filter.matches(p)).len() as i64)
    }

    async fn next_property_id(&self) -> Result<Id> {
        Ok(self.properties.reserve_id())
    }
}

#[async_trait::async_trait]
impl PropertyImageStore for MemoryStore {
    async fn insert_image(&self, image: PropertyImage) -> Result<()> {
        self.images.insert(image);
        Ok(())
    }

    async fn images_for_property(&self, property_id: Id) -> Result<Vec<PropertyImage>> {
        Ok(self.images.find(|img| img.id_property == property_id))
    }

    async fn first_enabled_image(&self, property_id: Id) -> Result<Option<PropertyImage>> {
        Ok(self
            .images
            .find(|img| img.id_property == property_id && img.enabled)
            .into_iter()
            .next())
    }

    async fn next_image_id(&self) -> Result<Id> {
        Ok(self.images.reserve_id())
    }
}

#[async_trait::async_trait]
impl PropertyTraceStore for MemoryStore {
    async fn insert_trace(&self, trace: PropertyTrace) -> Result<()> {
        self.traces.insert(trace);
        Ok(())
    }

    async fn traces_for_property(&self, property_id: Id) -> Result<Vec<PropertyTrace>> {
        Ok(self.traces.find(|t| t.id_property == property_id))
    }

    async fn next_trace_id(&self) -> Result<Id> {
        Ok(self.traces.reserve_id())
    }
}

impl Store for MemoryStore {}
