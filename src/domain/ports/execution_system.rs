/// Port for the system that actually sends retainers out on ventures.
pub trait ExecutionSystem: Send + Sync {
    /// Whether the execution system wants ventures reassigned at all.
    ///
    /// Queried at the start of every planning request; never cached.
    fn should_reassign(&self) -> bool;
}

/// Port for the user-facing message surface (chat, log window).
pub trait Notifier: Send + Sync {
    /// Show a human-readable message
    fn notify(&self, message: &str);
}
