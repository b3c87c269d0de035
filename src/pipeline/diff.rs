//! Seen-set difference and merge.
//!
//! `split_new` decides which matched jobs have never been reported;
//! `merge` produces the state to persist afterwards. Both are pure so the
//! dedup contract is testable without any I/O.

use std::collections::HashSet;

use crate::models::Job;
use crate::storage::SeenState;

/// Return the matched jobs whose `(company, job_id)` is not yet in `seen`,
/// preserving match order.
///
/// A job id occurring twice in one batch is reported once.
pub fn split_new(seen: &SeenState, matched: &[Job]) -> Vec<Job> {
    let mut batch_seen: HashSet<(&str, &str)> = HashSet::new();

    matched
        .iter()
        .filter(|job| {
            let known = seen
                .get(&job.company)
                .is_some_and(|ids| ids.contains(&job.job_id));
            !known && batch_seen.insert((job.company.as_str(), job.job_id.as_str()))
        })
        .cloned()
        .collect()
}

/// Return `seen` extended with the keys of `matched`. Idempotent.
pub fn merge(seen: &SeenState, matched: &[Job]) -> SeenState {
    let mut next = seen.clone();
    for job in matched {
        next.entry(job.company.clone())
            .or_default()
            .insert(job.job_id.clone());
    }
    next
}
