pub mod assignment_planner;
pub mod in_progress;
pub mod locked_items;
pub mod notifications;
pub mod reconciler;
pub mod venture_resolver;

pub use assignment_planner::{AssignmentPlanner, PlanOutcome, PlannerContext};
pub use in_progress::InProgressEstimator;
pub use locked_items::{locked_items_report, CharacterLockedItems, LockedItem, UnlockState};
pub use reconciler::Reconciler;
pub use venture_resolver::{Resolution, VentureResolver};
