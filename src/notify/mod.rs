//! Notification channel abstractions.

pub mod telegram;

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Result;

// Re-export for convenience
pub use telegram::TelegramNotifier;

/// Outbound channel for the digest message.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one message to the configured destination.
    async fn send(&self, text: &str) -> Result<()>;
}

/// Notifier that discards messages; stands in for runs that never send.
#[derive(Debug, Default)]
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn send(&self, _text: &str) -> Result<()> {
        Ok(())
    }
}

/// Notifier that records sent messages, for tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    /// Snapshot of everything sent so far.
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().expect("notifier lock poisoned").clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        self.sent
            .lock()
            .expect("notifier lock poisoned")
            .push(text.to_string());
        Ok(())
    }
}
