//! Persistence of the configuration model

pub mod json_store;

pub use json_store::JsonConfigurationStore;
