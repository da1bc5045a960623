//! Domain layer for retainer venture planning
//!
//! This module contains the configuration model, the venture catalog and the
//! collaborator contracts the planning services depend on.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{DomainError, DomainResult};
