use std::sync::Mutex;

use tracing::info;

use crate::domain::ports::Notifier;

/// Notifier that keeps messages for the caller to display
///
/// Messages are also logged at info level.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    messages: Mutex<Vec<String>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return every message collected so far
    pub fn take(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(mut messages) => std::mem::take(&mut *messages),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, message: &str) {
        info!(target: "arc::notify", "{message}");
        match self.messages.lock() {
            Ok(mut messages) => messages.push(message.to_string()),
            Err(poisoned) => poisoned.into_inner().push(message.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_drains_messages() {
        let notifier = CollectingNotifier::new();
        notifier.notify("one");
        notifier.notify("two");
        assert_eq!(notifier.take(), vec!["one".to_string(), "two".to_string()]);
        assert!(notifier.take().is_empty());
    }
}
