//! The application message log.
//!
//! [`MessageService`] is the [`MessageSink`] the services report to. It keeps
//! every message in arrival order so a UI (or a test) can display them, and
//! mirrors each one as a `tracing` event.

use crate::framework::MessageSink;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::info;

/// Clonable handle over a shared, append-only list of messages.
#[derive(Clone, Default)]
pub struct MessageService {
    messages: Arc<Mutex<Vec<String>>>,
}

impl MessageService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all messages recorded so far.
    pub fn messages(&self) -> Vec<String> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    // A panic while holding the lock cannot leave a Vec<String> half-written.
    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MessageSink for MessageService {
    fn add_message(&self, message: &str) {
        info!(text = message, "Message");
        self.lock().push(message.to_string());
    }
}
