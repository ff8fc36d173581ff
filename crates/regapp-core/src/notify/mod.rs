//! Notification sinks
//!
//! The store reports every failure through a [`Notifier`]. What "showing" a
//! message means is up to the front end: the CLI prints it, tests record it.

use std::sync::Mutex;

/// Message shown when a failure carries no HTTP response
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// User-facing error sink
pub trait Notifier: Send + Sync {
    /// Show an error message to the user
    fn error(&self, message: &str);
}

/// Notifier that writes to the `log` facade at error level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn error(&self, message: &str) {
        log::error!("{}", message);
    }
}

/// Notifier that keeps every message in memory
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    messages: Mutex<Vec<String>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages received so far, oldest first
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }
}

impl Notifier for MemoryNotifier {
    fn error(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

impl<T: Notifier + ?Sized> Notifier for std::sync::Arc<T> {
    fn error(&self, message: &str) {
        (**self).error(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_memory_notifier_records_in_order() {
        let notifier = MemoryNotifier::new();
        notifier.error("first");
        notifier.error("second");
        assert_eq!(notifier.messages(), vec!["first", "second"]);
    }

    #[test]
    fn test_arc_notifier_shares_messages() {
        let notifier = Arc::new(MemoryNotifier::new());
        let shared: Arc<MemoryNotifier> = Arc::clone(&notifier);
        shared.error(GENERIC_ERROR_MESSAGE);
        assert_eq!(notifier.messages(), vec![GENERIC_ERROR_MESSAGE]);
    }

    #[test]
    fn test_log_notifier_does_not_panic() {
        LogNotifier.error("logged");
    }
}
