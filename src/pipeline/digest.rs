//! Digest message assembly.

use crate::models::{BoardError, Job};

/// Jobs to report for one company, in board-list order.
#[derive(Debug, Clone)]
pub struct DigestGroup {
    pub company: String,
    pub jobs: Vec<Job>,
}

/// Fixed line emitted when no group has any job to report.
pub const NO_MATCHES_LINE: &str = "No new matches today.";

/// Build the digest message body.
///
/// Companies appear in the order the groups were collected (the configured
/// board order). Boards with nothing to report get no header. Board errors
/// are appended in their own section whether or not there were matches.
pub fn format_digest(groups: &[DigestGroup], errors: &[BoardError]) -> String {
    let mut lines: Vec<String> = Vec::new();
    let total: usize = groups.iter().map(|group| group.jobs.len()).sum();

    if total == 0 {
        lines.push(NO_MATCHES_LINE.to_string());
    } else {
        let plural = if total == 1 { "" } else { "es" };
        lines.push(format!("🔔 {total} new job match{plural}"));

        for group in groups.iter().filter(|group| !group.jobs.is_empty()) {
            lines.push(String::new());
            lines.push(format!("{} ({})", group.company, group.jobs.len()));
            for job in &group.jobs {
                lines.push(job_line(job));
                lines.push(format!("  {}", job.url));
            }
        }
    }

    if !errors.is_empty() {
        lines.push(String::new());
        lines.push("⚠️ Errors".to_string());
        for error in errors {
            lines.push(format!("- {}: {}", error.company, error.reason));
        }
    }

    lines.join("\n")
}

fn job_line(job: &Job) -> String {
    if job.location.is_empty() {
        format!("- {}", job.title)
    } else {
        format!("- {} — {}", job.title, job.location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(company: &str, id: &str, title: &str, location: &str) -> Job {
        Job {
            company: company.to_string(),
            job_id: id.to_string(),
            title: title.to_string(),
            team: String::new(),
            location: location.to_string(),
            url: format!("https://jobs.ashbyhq.com/{company}/{id}"),
        }
    }

    fn group(company: &str, jobs: Vec<Job>) -> DigestGroup {
        DigestGroup {
            company: company.to_string(),
            jobs,
        }
    }

    #[test]
    fn test_no_matches_line() {
        let digest = format_digest(&[group("Rogo", vec![])], &[]);
        assert_eq!(digest, NO_MATCHES_LINE);
    }

    #[test]
    fn test_job_rendering() {
        let digest = format_digest(
            &[group("Rogo", vec![job("Rogo", "1", "Data Engineer", "Remote")])],
            &[],
        );

        assert!(digest.contains("🔔 1 new job match"));
        assert!(digest.contains("Rogo (1)"));
        assert!(digest.contains("- Data Engineer — Remote"));
        assert!(digest.contains("  https://jobs.ashbyhq.com/Rogo/1"));
    }

    #[test]
    fn test_location_omitted_when_empty() {
        let digest = format_digest(&[group("X", vec![job("X", "1", "SRE", "")])], &[]);
        assert!(digest.contains("- SRE\n"));
        assert!(!digest.contains("- SRE —"));
    }

    #[test]
    fn test_companies_keep_group_order() {
        let digest = format_digest(
            &[
                group("Zeta", vec![job("Zeta", "1", "A", "")]),
                group("Alpha", vec![job("Alpha", "2", "B", "")]),
            ],
            &[],
        );

        let zeta = digest.find("Zeta (1)").unwrap();
        let alpha = digest.find("Alpha (1)").unwrap();
        assert!(zeta < alpha);
    }

    #[test]
    fn test_empty_groups_get_no_header() {
        let digest = format_digest(
            &[
                group("Quiet", vec![]),
                group("Busy", vec![job("Busy", "1", "A", "")]),
            ],
            &[],
        );

        assert!(!digest.contains("Quiet"));
        assert!(digest.contains("Busy (1)"));
    }

    #[test]
    fn test_errors_section_with_matches() {
        let errors = vec![BoardError {
            company: "Broken".to_string(),
            reason: "API request failed (503)".to_string(),
        }];

        let digest = format_digest(&[group("Rogo", vec![job("Rogo", "1", "A", "")])], &errors);

        assert!(digest.contains("Rogo (1)"));
        assert!(digest.contains("⚠️ Errors"));
        assert!(digest.contains("- Broken: API request failed (503)"));
    }

    #[test]
    fn test_errors_section_without_matches() {
        let errors = vec![BoardError {
            company: "Broken".to_string(),
            reason: "timed out".to_string(),
        }];

        let digest = format_digest(&[], &errors);

        assert!(digest.starts_with(NO_MATCHES_LINE));
        assert!(digest.contains("⚠️ Errors"));
        assert!(digest.contains("- Broken: timed out"));
    }

    #[test]
    fn test_plural_header() {
        let digest = format_digest(
            &[group(
                "X",
                vec![job("X", "1", "A", ""), job("X", "2", "B", "")],
            )],
            &[],
        );
        assert!(digest.contains("🔔 2 new job matches"));
    }
}
