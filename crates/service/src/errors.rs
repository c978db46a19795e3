use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} already exists")]
    AlreadyExists(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("internal storage error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn contact_exists(id: &str) -> Self { Self::AlreadyExists(format!("contact with id '{}'", id)) }

    pub fn contact_not_found(id: &str) -> Self { Self::NotFound(format!("contact with id '{}'", id)) }
}
