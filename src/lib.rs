//! Retainer Control - retainer venture planner
//!
//! Keeps a persistent model of characters, their retainers and user-defined
//! item lists in step with externally reported game facts, and decides which
//! venture each retainer should be sent on next.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): configuration model, venture catalog and ports
//! - **Service Layer** (`services`): reconciliation, venture resolution and planning
//! - **Application Layer** (`application`): load / plan / save orchestration
//! - **Infrastructure Layer** (`infrastructure`): config, logging, file adapters
//! - **CLI Layer** (`cli`): the `arc` command-line interface
//!
//! # Example
//!
//! ```no_run
//! use retainer_control::domain::models::{Configuration, VentureCatalog, QUICK_VENTURE_ID};
//! use retainer_control::services::{AssignmentPlanner, PlannerContext};
//! use std::sync::Arc;
//!
//! fn plan(configuration: &mut Configuration, ctx: &PlannerContext<'_>) -> Option<u32> {
//!     let planner = AssignmentPlanner::new(Arc::new(VentureCatalog::default()), QUICK_VENTURE_ID);
//!     planner
//!         .plan_next(configuration, ctx, 0x0040_0000_1234_5678, "Helper", false)
//!         .venture_id
//! }
//! ```

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use application::{NextVenture, RetainerControl};
pub use domain::models::{
    Character, CharacterGroup, CharacterType, Config, Configuration, ItemList, ListPriority,
    ListType, Retainer, RetainerIdentity, VentureCatalog,
};
pub use domain::ports::{
    CharacterDataSource, ConfigurationStore, ExecutionSystem, InventorySource, Notifier,
};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{AssignmentPlanner, PlanOutcome, PlannerContext, Reconciler};
