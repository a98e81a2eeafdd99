use anyhow::Result;

use crate::model::{Id, NewOwner, Owner};
use crate::store::traits::Store;

pub async fn list_owners<S: Store>(store: &S) -> Result<Vec<Owner>> {
    store.list_owners().await
}

pub async fn get_owner<S: Store>(store: &S, id: Id) -> Result<Option<Owner>> {
    store.get_owner(id).await
}

/// Insert a new owner under an atomically reserved identity.
pub async fn create_owner<S: Store>(store: &S, new_owner: NewOwner) -> Result<Owner> {
    let id = store.next_owner_id().await?;
    let owner = new_owner.into_owner(id);
    store.insert_owner(owner.clone()).await?;
    Ok(owner)
}

/// Full replace; the identity always comes from the path. `None` when the
/// owner does not exist.
pub async fn update_owner<S: Store>(
    store: &S,
    id: Id,
    new_owner: NewOwner,
) -> Result<Option<Owner>> {
    if store.get_owner(id).await?.is_none() {
        return Ok(None);
    }

    let owner = new_owner.into_owner(id);
    store.replace_owner(owner.clone()).await?;
    Ok(Some(owner))
}

/// Fetch-then-delete; a missing id is `false`, not an error. Properties
/// referencing the owner are left untouched (their reference dangles).
pub async fn delete_owner<S: Store>(store: &S, id: Id) -> Result<bool> {
    if store.get_owner(id).await?.is_none() {
        return Ok(false);
    }
    store.delete_owner(id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::traits::OwnerStore;
    use crate::store::MemoryStore;
    use chrono::{TimeZone, Utc};

    fn new_owner(name: &str) -> NewOwner {
        NewOwner {
            name: name.to_string(),
            address: "Av. Roosevelt #34-56, Cali".to_string(),
            photo: "https://example.com/photo.jpg".to_string(),
            birthday: Utc.with_ymd_and_hms(1990, 7, 8, 0, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let store = MemoryStore::new();
        let first = create_owner(&store, new_owner("Ana Martínez")).await.unwrap();
        let second = create_owner(&store, new_owner("Luis Hernández"))
            .await
            .unwrap();

        assert_eq!(first.id_owner, 1);
        assert_eq!(second.id_owner, 2);
        assert_eq!(list_owners(&store).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_existence_and_count_queries() {
        let store = MemoryStore::new();
        assert_eq!(store.count_owners().await.unwrap(), 0);
        assert!(!store.owner_exists(1).await.unwrap());

        create_owner(&store, new_owner("Ana Martínez")).await.unwrap();
        assert_eq!(store.count_owners().await.unwrap(), 1);
        assert!(store.owner_exists(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_pins_path_identity() {
        let store = MemoryStore::new();
        let created = create_owner(&store, new_owner("Ana Martínez")).await.unwrap();

        let updated = update_owner(&store, created.id_owner, new_owner("Ana María Martínez"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id_owner, created.id_owner);
        assert_eq!(updated.name, "Ana María Martínez");
    }

    #[tokio::test]
    async fn test_update_missing_owner_is_none() {
        let store = MemoryStore::new();
        let updated = update_owner(&store, 5, new_owner("Nadie")).await.unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_delete_is_boolean_not_error() {
        let store = MemoryStore::new();
        let created = create_owner(&store, new_owner("Ana Martínez")).await.unwrap();

        assert!(delete_owner(&store, created.id_owner).await.unwrap());
        assert!(!delete_owner(&store, created.id_owner).await.unwrap());
        assert!(get_owner(&store, created.id_owner).await.unwrap().is_none());
    }
}
