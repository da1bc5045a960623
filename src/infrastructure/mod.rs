//! Infrastructure layer module
//!
//! This module contains the adapters behind the domain ports:
//! - Configuration management (figment)
//! - Logging infrastructure (tracing)
//! - JSON configuration store
//! - Snapshot and catalog file sources
//! - Notification collection
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod logging;
pub mod notifier;
pub mod sources;
pub mod store;

pub use notifier::CollectingNotifier;
