//! Job posting data structure.

use serde::{Deserialize, Serialize};

/// A job posting normalized from a board's API payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Job {
    /// Configured board name the posting came from
    pub company: String,

    /// Identifier used for dedup; the board's apply URL when present,
    /// otherwise the posting URL. Stable across runs for the same posting.
    pub job_id: String,

    /// Posting title
    pub title: String,

    /// Team or department (empty when the board doesn't expose one)
    pub team: String,

    /// Location text (empty when the board doesn't expose one)
    pub location: String,

    /// Absolute link to the posting
    pub url: String,
}

/// A failed board fetch, collected across a run without aborting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardError {
    /// Configured board name
    pub company: String,

    /// Human-readable failure description
    pub reason: String,
}
