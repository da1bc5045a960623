//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces the planning services use to reach
//! their collaborators:
//! - CharacterDataSource: live character and retainer facts
//! - InventorySource: own and third-party inventory counts
//! - ExecutionSystem: the venture executor's reassignment toggle
//! - Notifier: user-facing messages
//! - ConfigurationStore: persistence of the configuration model
//!
//! These traits keep the domain independent of the game client and of
//! any particular file format.

pub mod character_data_source;
pub mod configuration_store;
pub mod execution_system;
pub mod inventory_source;

pub use character_data_source::CharacterDataSource;
pub use configuration_store::ConfigurationStore;
pub use execution_system::{ExecutionSystem, Notifier};
pub use inventory_source::InventorySource;
