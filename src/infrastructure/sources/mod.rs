//! File-backed stand-ins for the live game collaborators
//!
//! - `snapshot_file`: exported character/retainer facts, inventory counts and
//!   the executor's reassignment toggle
//! - `catalog_file`: static venture data

pub mod catalog_file;
pub mod snapshot_file;

pub use catalog_file::load_catalog;
pub use snapshot_file::{CharacterRecord, FileSnapshotSource, SnapshotFile};
