use async_trait::async_trait;

use super::domain::Contact;
use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// Trait abstraction for contact storage.
/// Implementations can be in-memory, database-backed, or remote KV; the HTTP
/// layer only depends on this trait.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// One page of contacts in ascending id order. Out-of-range pages are empty.
    async fn list(&self, page: Pagination) -> Result<Vec<Contact>, ServiceError>;
    /// Insert a contact, assigning a fresh id when `contact.id` is empty.
    async fn create(&self, contact: Contact) -> Result<Contact, ServiceError>;
    async fn get_by_id(&self, id: &str) -> Result<Contact, ServiceError>;
    /// Replace the whole record stored under `contact.id`.
    async fn update(&self, contact: Contact) -> Result<Contact, ServiceError>;
    async fn delete(&self, id: &str) -> Result<bool, ServiceError>;
    async fn count(&self) -> Result<usize, ServiceError>;
}
