//! User-facing status messages.

use std::sync::Mutex;

/// Append-only sink for status text shown to the player.
pub trait Notifier: Send + Sync {
    /// Append one message.
    fn add_message(&self, text: String);
}

/// In-memory message log.
///
/// Every message is also emitted on the `notifier` tracing target.
#[derive(Debug, Default)]
pub struct MessageLog {
    messages: Mutex<Vec<String>>,
}

impl MessageLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all messages, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Number of messages recorded.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        // A poisoned log still holds valid messages
        self.messages.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Notifier for MessageLog {
    fn add_message(&self, text: String) {
        tracing::info!(target: "notifier", message = %text);
        self.lock().push(text);
    }
}
