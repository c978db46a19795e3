//! Contacts module: domain model, store abstraction and the in-memory store.
//!
//! Handlers only see `ContactStore`; `InMemoryContactStore` is the single
//! implementation shipped today.

pub mod domain;
pub mod memory;
pub mod store;

pub use domain::Contact;
pub use memory::InMemoryContactStore;
pub use store::ContactStore;
