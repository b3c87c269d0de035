//! External job-source services.

pub mod ashby;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Board, Job};

// Re-export for convenience
pub use ashby::AshbyClient;

/// A source of job postings for a single board.
///
/// The scan pipeline only talks to this trait, so tests can substitute a
/// stub source for the real API client.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Fetch and normalize all current postings for one board.
    async fn fetch_board(&self, board: &Board) -> Result<Vec<Job>>;
}
