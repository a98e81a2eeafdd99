use anyhow::Result;

use crate::model::{
    Id, NewProperty, PagedResult, PropertyDetail, PropertyFilter, PropertyListItem,
};
use crate::store::traits::Store;

/// One page of the filtered listing, with the owner's display name and the
/// first enabled image attached to each item. Owner and image lookups are
/// issued per item, as in the list-view contract; a missing owner yields an
/// empty name rather than an error.
pub async fn list_properties<S: Store>(
    store: &S,
    filter: &PropertyFilter,
) -> Result<PagedResult<PropertyListItem>> {
    let page = store.list_properties_paged(filter).await?;

    let mut items = Vec::with_capacity(page.items.len());
    for property in &page.items {
        let owner = store.get_owner(property.id_owner).await?;
        let image = store.first_enabled_image(property.id_property).await?;

        items.push(PropertyListItem::from_property(
            property.clone(),
            owner.map(|o| o.name).unwrap_or_default(),
            image.map(|img| img.file),
        ));
    }

    Ok(PagedResult::new(
        items,
        page.total_count,
        page.page,
        page.page_size,
    ))
}

/// Composite detail read model: the bare property, then owner, images, and
/// traces as three independent lookups. A dangling owner reference is
/// tolerated (default placeholder); a missing property is `None`.
pub async fn get_property_detail<S: Store>(
    store: &S,
    id: Id,
) -> Result<Option<PropertyDetail>> {
    let Some(property) = store.get_property(id).await? else {
        return Ok(None);
    };

    let owner = store.get_owner(property.id_owner).await?;
    let images = store.images_for_property(id).await?;
    let traces = store.traces_for_property(id).await?;

    Ok(Some(PropertyDetail::assemble(property, owner, images, traces)))
}

/// Insert a new property under an atomically reserved identity and return
/// its list-view projection.
pub async fn create_property<S: Store>(
    store: &S,
    new_property: NewProperty,
) -> Result<PropertyListItem> {
    let id = store.next_property_id().await?;
    let property = new_property.into_property(id);
    store.insert_property(property.clone()).await?;

    let owner = store.get_owner(property.id_owner).await?;
    Ok(PropertyListItem::from_property(
        property,
        owner.map(|o| o.name).unwrap_or_default(),
        None,
    ))
}

/// Full replace of every field from the payload; the identity always comes
/// from the path, regardless of what the payload carries. `None` when the
/// property does not exist.
pub async fn update_property<S: Store>(
    store: &S,
    id: Id,
    new_property: NewProperty,
) -> Result<Option<PropertyListItem>> {
    if store.get_property(id).await?.is_none() {
        return Ok(None);
    }

    let property = new_property.into_property(id);
    store.replace_property(property.clone()).await?;

    let owner = store.get_owner(property.id_owner).await?;
    let image = store.first_enabled_image(id).await?;

    Ok(Some(PropertyListItem::from_property(
        property,
        owner.map(|o| o.name).unwrap_or_default(),
        image.map(|img| img.file),
    )))
}

/// Fetch-then-delete; a missing id is `false`, not an error. Images and
/// traces are left in place (no cascading delete).
pub async fn delete_property<S: Store>(store: &S, id: Id) -> Result<bool> {
    if store.get_property(id).await?.is_none() {
        return Ok(false);
    }
    store.delete_property(id).await
}

pub async fn property_exists<S: Store>(store: &S, id: Id) -> Result<bool> {
    store.property_exists(id).await
}
