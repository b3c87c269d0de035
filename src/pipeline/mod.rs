//! Pipeline stages for a scan run.
//!
//! - `diff`: seen-set difference and merge
//! - `digest`: digest message assembly
//! - `scan`: the orchestrating run loop

pub mod diff;
pub mod digest;
pub mod scan;

pub use scan::{RunMode, ScanReport, run_scan};
