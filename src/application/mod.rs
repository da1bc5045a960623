pub mod retainer_control;

pub use retainer_control::{NextVenture, RetainerControl};
