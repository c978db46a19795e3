use std::collections::{btree_map::Entry, BTreeMap};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::domain::Contact;
use super::store::ContactStore;
use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// In-memory contact store.
///
/// One reader-writer lock guards the whole map: reads share it, and every
/// mutation holds the write guard across its existence check and the change
/// itself. Keys are kept sorted, so listing is ordered by id.
#[derive(Default)]
pub struct InMemoryContactStore {
    inner: RwLock<BTreeMap<String, Contact>>,
}

impl InMemoryContactStore {
    pub fn new() -> Self { Self::default() }

    fn fresh_id(map: &BTreeMap<String, Contact>) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !map.contains_key(&id) {
                return id;
            }
        }
    }
}

#[async_trait]
impl ContactStore for InMemoryContactStore {
    async fn list(&self, page: Pagination) -> Result<Vec<Contact>, ServiceError> {
        let map = self.inner.read().await;
        let window = page.window(map.len());
        Ok(map.values().skip(window.start).take(window.len()).cloned().collect())
    }

    async fn create(&self, mut contact: Contact) -> Result<Contact, ServiceError> {
        let mut map = self.inner.write().await;
        if !contact.has_id() {
            contact.id = Self::fresh_id(&map);
        }
        match map.entry(contact.id.clone()) {
            Entry::Occupied(_) => Err(ServiceError::contact_exists(&contact.id)),
            Entry::Vacant(slot) => {
                debug!(contact_id = %contact.id, "contact inserted");
                Ok(slot.insert(contact).clone())
            }
        }
    }

    async fn get_by_id(&self, id: &str) -> Result<Contact, ServiceError> {
        let map = self.inner.read().await;
        map.get(id).cloned().ok_or_else(|| ServiceError::contact_not_found(id))
    }

    async fn update(&self, contact: Contact) -> Result<Contact, ServiceError> {
        let mut map = self.inner.write().await;
        let existing = map
            .get_mut(&contact.id)
            .ok_or_else(|| ServiceError::contact_not_found(&contact.id))?;
        *existing = contact;
        Ok(existing.clone())
    }

    async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        let mut map = self.inner.write().await;
        match map.remove(id) {
            Some(_) => Ok(true),
            None => Err(ServiceError::contact_not_found(id)),
        }
    }

    async fn count(&self) -> Result<usize, ServiceError> {
        Ok(self.inner.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use serde_json::json;

    use super::*;

    fn alice() -> Contact {
        Contact::new("").with_field("name", "Alice")
    }

    #[tokio::test]
    async fn create_with_id_then_get_returns_same_record() -> anyhow::Result<()> {
        let store = InMemoryContactStore::new();
        let contact = Contact::new("c-1")
            .with_field("name", "Alice")
            .with_field("email", "alice@example.com");

        let created = store.create(contact.clone()).await?;
        assert_eq!(created, contact);
        assert_eq!(store.get_by_id("c-1").await?, contact);
        Ok(())
    }

    #[tokio::test]
    async fn create_without_id_assigns_unique_ids() -> anyhow::Result<()> {
        let store = InMemoryContactStore::new();
        let mut ids = HashSet::new();
        for _ in 0..50 {
            let created = store.create(alice()).await?;
            assert!(created.has_id());
            assert!(ids.insert(created.id));
        }
        assert_eq!(store.count().await?, 50);
        Ok(())
    }

    #[tokio::test]
    async fn create_duplicate_id_conflicts_and_keeps_original() -> anyhow::Result<()> {
        let store = InMemoryContactStore::new();
        let original = Contact::new("dup").with_field("name", "First");
        store.create(original.clone()).await?;

        let err = store
            .create(Contact::new("dup").with_field("name", "Second"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyExists(_)));
        assert_eq!(store.get_by_id("dup").await?, original);
        assert_eq!(store.count().await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let store = InMemoryContactStore::new();
        let err = store.get_by_id("nope").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_missing_is_not_found_and_inserts_nothing() -> anyhow::Result<()> {
        let store = InMemoryContactStore::new();
        let err = store.update(Contact::new("ghost")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(store.count().await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_the_whole_record() -> anyhow::Result<()> {
        let store = InMemoryContactStore::new();
        store
            .create(Contact::new("c").with_field("name", "Alice").with_field("phone", "123"))
            .await?;

        let replacement = Contact::new("c").with_field("name", "Bob");
        assert_eq!(store.update(replacement.clone()).await?, replacement);

        let stored = store.get_by_id("c").await?;
        assert_eq!(stored.field("name"), Some(&json!("Bob")));
        assert_eq!(stored.field("phone"), None);
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_record() -> anyhow::Result<()> {
        let store = InMemoryContactStore::new();
        let created = store.create(alice()).await?;

        assert!(store.delete(&created.id).await?);
        let err = store.get_by_id(&created.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn delete_missing_is_not_found_and_keeps_size() -> anyhow::Result<()> {
        let store = InMemoryContactStore::new();
        store.create(alice()).await?;

        let err = store.delete("missing").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(store.count().await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn list_on_empty_store_is_empty() -> anyhow::Result<()> {
        let store = InMemoryContactStore::new();
        assert!(store.list(Pagination::new(1, 10)).await?.is_empty());
        assert!(store.list(Pagination::new(7, 10)).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn list_pages_through_fifteen_contacts() -> anyhow::Result<()> {
        let store = InMemoryContactStore::new();
        for _ in 0..15 {
            store.create(alice()).await?;
        }

        assert_eq!(store.list(Pagination::new(1, 10)).await?.len(), 10);
        assert_eq!(store.list(Pagination::new(2, 10)).await?.len(), 5);
        assert!(store.list(Pagination::new(3, 10)).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn list_is_ordered_by_id_and_pages_do_not_overlap() -> anyhow::Result<()> {
        let store = InMemoryContactStore::new();
        for id in ["d", "b", "e", "a", "c"] {
            store.create(Contact::new(id)).await?;
        }

        let ids = |page: Vec<Contact>| page.into_iter().map(|c| c.id).collect::<Vec<_>>();
        assert_eq!(ids(store.list(Pagination::new(1, 2)).await?), ["a", "b"]);
        assert_eq!(ids(store.list(Pagination::new(2, 2)).await?), ["c", "d"]);
        assert_eq!(ids(store.list(Pagination::new(3, 2)).await?), ["e"]);
        Ok(())
    }

    #[tokio::test]
    async fn alice_becomes_bob_then_disappears() -> anyhow::Result<()> {
        let store = InMemoryContactStore::new();

        let created = store.create(alice()).await?;
        assert!(created.has_id());
        assert_eq!(created.field("name"), Some(&json!("Alice")));
        assert_eq!(store.get_by_id(&created.id).await?, created);

        store
            .update(Contact::new(created.id.clone()).with_field("name", "Bob"))
            .await?;
        assert_eq!(store.get_by_id(&created.id).await?.field("name"), Some(&json!("Bob")));

        assert!(store.delete(&created.id).await?);
        assert!(matches!(
            store.get_by_id(&created.id).await,
            Err(ServiceError::NotFound(_))
        ));
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_lose_nothing() -> anyhow::Result<()> {
        let store = Arc::new(InMemoryContactStore::new());
        let n = 200;

        let handles: Vec<_> = (0..n)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store.create(Contact::new("").with_field("seq", i)).await
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            let created = handle.await??;
            assert!(ids.insert(created.id));
        }
        assert_eq!(ids.len(), n);
        assert_eq!(store.count().await?, n);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn readers_never_see_partial_updates() -> anyhow::Result<()> {
        let store = Arc::new(InMemoryContactStore::new());
        store
            .create(Contact::new("x").with_field("a", 0).with_field("b", 0))
            .await?;

        let writer = {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                for i in 1..=200 {
                    store
                        .update(Contact::new("x").with_field("a", i).with_field("b", i))
                        .await?;
                }
                Ok::<_, ServiceError>(())
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    for _ in 0..200 {
                        let c = store.get_by_id("x").await?;
                        assert_eq!(c.field("a"), c.field("b"));
                    }
                    Ok::<_, ServiceError>(())
                })
            })
            .collect();

        writer.await??;
        for reader in readers {
            reader.await??;
        }
        Ok(())
    }
}
