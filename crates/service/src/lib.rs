//! Service layer for the contacts API.
//! - `contacts` holds the record type, the `ContactStore` abstraction and the
//!   lock-guarded in-memory implementation.
//! - `pagination` turns page/limit pairs into slices of a result set.
//! - `errors` is the error type every store operation returns.

pub mod contacts;
pub mod errors;
pub mod pagination;

pub use contacts::{Contact, ContactStore, InMemoryContactStore};
pub use errors::ServiceError;
pub use pagination::Pagination;
