//! Domain errors for the retainer control system.

use thiserror::Error;
use uuid::Uuid;

/// Domain-level errors that can occur while editing or loading the model.
///
/// Planning and reconciliation never produce these for "not found" or
/// "not eligible" outcomes; those are represented as `None` results.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Character not found: {0}")]
    CharacterNotFound(u64),

    #[error("Retainer not found: {0}")]
    RetainerNotFound(String),

    #[error("Item list not found: {0}")]
    ItemListNotFound(Uuid),

    #[error("Character group not found: {0}")]
    CharacterGroupNotFound(Uuid),

    #[error("Queued item not found: {0}")]
    QueuedItemNotFound(Uuid),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Item list {id} is still used by {users} character(s) or group(s)")]
    ItemListInUse { id: Uuid, users: usize },

    #[error("Character group {id} still has {characters} assigned character(s)")]
    CharacterGroupInUse { id: Uuid, characters: usize },

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Venture catalog integrity error: {0}")]
    CatalogIntegrity(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for DomainError {
    fn from(err: serde_yaml::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}
