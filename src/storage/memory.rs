//! In-memory seen-state store.
//!
//! Lets pipeline tests observe persistence side effects (or their absence)
//! without touching the filesystem.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::Result;
use crate::storage::{SeenState, SeenStore};

/// Seen-state held in memory, counting every save.
#[derive(Debug, Default)]
pub struct MemorySeenStore {
    state: Mutex<SeenState>,
    saves: AtomicUsize,
}

impl MemorySeenStore {
    /// Create a store preloaded with the given state.
    pub fn with_state(state: SeenState) -> Self {
        Self {
            state: Mutex::new(state),
            saves: AtomicUsize::new(0),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SeenState {
        self.state.lock().expect("seen-state lock poisoned").clone()
    }

    /// Number of times `save` has been called.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SeenStore for MemorySeenStore {
    async fn load(&self) -> Result<SeenState> {
        Ok(self.state())
    }

    async fn save(&self, state: &SeenState) -> Result<()> {
        *self.state.lock().expect("seen-state lock poisoned") = state.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
