//! Scan pipeline: fetch, match, dedupe, notify, persist.

use crate::error::{AppError, Result};
use crate::matcher::Matcher;
use crate::models::{BoardError, BoardList, Job};
use crate::notify::Notifier;
use crate::pipeline::diff;
use crate::pipeline::digest::{DigestGroup, format_digest};
use crate::services::JobSource;
use crate::storage::SeenStore;

/// How a scan run handles delivery and persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Send the digest of new jobs, then persist the updated seen-state.
    Normal,
    /// Print the digest to stdout; send nothing, persist nothing.
    DryRun,
    /// Send a digest of all currently matched jobs; persist nothing.
    IgnoreSeen,
}

/// Summary of one scan run.
#[derive(Debug)]
pub struct ScanReport {
    /// The digest message that was sent or printed
    pub digest: String,
    /// Jobs that passed the filter, across all boards
    pub matched: usize,
    /// Jobs reported in the digest
    pub reported: usize,
    /// Boards that failed to fetch
    pub errors: Vec<BoardError>,
}

/// Run one full scan cycle over all tracked boards.
///
/// Boards are fetched sequentially in list order; a failing board is
/// recorded and skipped, never aborting the run. The digest is always
/// produced, even when every board failed.
pub async fn run_scan(
    boards: &BoardList,
    matcher: &Matcher,
    mode: RunMode,
    source: &dyn JobSource,
    store: &dyn SeenStore,
    notifier: &dyn Notifier,
) -> Result<ScanReport> {
    // Corrupt state must surface before anything is sent, in every mode.
    let seen = store.load().await?;

    let mut groups: Vec<DigestGroup> = Vec::new();
    let mut errors: Vec<BoardError> = Vec::new();
    let mut all_matched: Vec<Job> = Vec::new();

    for board in &boards.boards {
        log::info!("Fetching {} ({})", board.company, board.url);

        let jobs = match source.fetch_board(board).await {
            Ok(jobs) => jobs,
            Err(error) => {
                log::warn!("Board {} failed: {}", board.company, error);
                let reason = match error {
                    AppError::Fetch { message, .. } => message,
                    other => other.to_string(),
                };
                errors.push(BoardError {
                    company: board.company.clone(),
                    reason,
                });
                continue;
            }
        };

        let matched: Vec<Job> = jobs.into_iter().filter(|job| matcher.matches(job)).collect();

        let report_jobs = match mode {
            RunMode::IgnoreSeen => matched.clone(),
            RunMode::Normal | RunMode::DryRun => diff::split_new(&seen, &matched),
        };

        log::info!(
            "{}: {} matched, {} to report",
            board.company,
            matched.len(),
            report_jobs.len()
        );

        all_matched.extend(matched);
        groups.push(DigestGroup {
            company: board.company.clone(),
            jobs: report_jobs,
        });
    }

    let digest = format_digest(&groups, &errors);
    let reported = groups.iter().map(|group| group.jobs.len()).sum();

    match mode {
        RunMode::DryRun => {
            println!("{digest}");
        }
        RunMode::IgnoreSeen => {
            notifier.send(&digest).await?;
        }
        RunMode::Normal => {
            notifier.send(&digest).await?;

            // Persist only after a successful send; a failed send leaves the
            // state untouched so the next run reports the same jobs again.
            let next = diff::merge(&seen, &all_matched);
            if let Err(error) = store.save(&next).await {
                log::error!("Seen-state write failed after send: {}", error);
                return Err(error);
            }
        }
    }

    Ok(ScanReport {
        digest,
        matched: all_matched.len(),
        reported,
        errors,
    })
}
