//! Seen-state persistence.
//!
//! The seen-state maps each company to the set of job ids already reported,
//! so a posting is only ever notified once. It is read once at run start and
//! written back at most once at run end (never in dry-run or ignore-seen
//! mode).

pub mod local;
pub mod memory;

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

// Re-export for convenience
pub use local::LocalSeenStore;
pub use memory::MemorySeenStore;

/// Previously reported job ids, keyed by company.
pub type SeenState = BTreeMap<String, BTreeSet<String>>;

/// On-disk wrapper for the seen-state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeenFile {
    /// When this state was last written
    pub updated_at: DateTime<Utc>,

    /// The seen job ids per company
    pub boards: SeenState,
}

impl SeenFile {
    pub fn new(boards: SeenState) -> Self {
        Self {
            updated_at: Utc::now(),
            boards,
        }
    }
}

/// Trait for seen-state storage backends.
#[async_trait]
pub trait SeenStore: Send + Sync {
    /// Load persisted state.
    ///
    /// An absent store is empty; a corrupt one is an error, never an
    /// empty fallback.
    async fn load(&self) -> Result<SeenState>;

    /// Persist the whole state, replacing whatever was there.
    async fn save(&self, state: &SeenState) -> Result<()>;
}
