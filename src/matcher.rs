//! Keyword and location matching for jobs.

use crate::models::{FiltersConfig, Job};

/// Compiled matching rules: terms are trimmed, lowercased, and deduplicated
/// of empties once at construction.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    include: Vec<String>,
    exclude: Vec<String>,
    locations_include: Vec<String>,
}

impl Matcher {
    /// Compile a matcher from the configured filter rules.
    pub fn new(filters: &FiltersConfig) -> Self {
        Self {
            include: lowered(&filters.include),
            exclude: lowered(&filters.exclude),
            locations_include: lowered(&filters.locations_include),
        }
    }

    /// Decide keep/drop for a single job.
    ///
    /// Case-insensitive substring matching over title, team, and location.
    /// An empty include or location list is no constraint; exclude always
    /// wins over both.
    pub fn matches(&self, job: &Job) -> bool {
        let searchable =
            format!("{} | {} | {}", job.title, job.team, job.location).to_lowercase();
        let location = job.location.to_lowercase();

        if !self.include.is_empty()
            && !self.include.iter().any(|term| searchable.contains(term))
        {
            return false;
        }

        if self.exclude.iter().any(|term| searchable.contains(term)) {
            return false;
        }

        if !self.locations_include.is_empty()
            && !self
                .locations_include
                .iter()
                .any(|term| location.contains(term))
        {
            return false;
        }

        true
    }
}

fn lowered(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|value| value.trim().to_lowercase())
        .filter(|value| !value.is_empty())
        .collect()
}
