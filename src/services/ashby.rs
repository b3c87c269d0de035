//! Ashby job board client.
//!
//! Fetches postings through Ashby's public posting API and normalizes the
//! loosely-structured payload into [`Job`] records. Every field access is
//! best-effort; a posting missing its title or URL is skipped rather than
//! failing the board.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Board, HttpConfig, Job};
use crate::services::JobSource;
use crate::utils::{excerpt, http};

const POSTING_API_BASE: &str = "https://api.ashbyhq.com/posting-api/job-board";

/// Keys probed when a location or department arrives as an object.
const LOCATION_KEYS: [&str; 5] = ["location", "name", "label", "value", "text"];
const DEPARTMENT_KEYS: [&str; 4] = ["name", "label", "value", "text"];

/// Client for Ashby's public posting API.
pub struct AshbyClient {
    client: Client,
}

impl AshbyClient {
    /// Create a new client with the configured user agent and timeout.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        Ok(Self {
            client: http::create_client(config)?,
        })
    }
}

#[async_trait]
impl JobSource for AshbyClient {
    async fn fetch_board(&self, board: &Board) -> Result<Vec<Job>> {
        let slug = extract_board_slug(&board.company, &board.url)?;
        let endpoint = format!("{}/{}", POSTING_API_BASE, slug);

        let response = self
            .client
            .get(&endpoint)
            .send()
            .await
            .map_err(|e| AppError::fetch(&board.company, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::fetch(&board.company, e))?;

        if !status.is_success() {
            return Err(AppError::fetch(
                &board.company,
                format!(
                    "API request failed ({}): {}",
                    status.as_u16(),
                    excerpt(&body, 300)
                ),
            ));
        }

        parse_board_payload(&board.company, &body)
    }
}

/// Extract the board slug from a public board URL (the last path segment).
fn extract_board_slug(company: &str, board_url: &str) -> Result<String> {
    let parsed = Url::parse(board_url)
        .map_err(|e| AppError::fetch(company, format!("invalid board URL {board_url}: {e}")))?;

    parsed
        .path_segments()
        .and_then(|segments| {
            segments
                .filter(|segment| !segment.is_empty())
                .last()
                .map(str::to_string)
        })
        .ok_or_else(|| {
            AppError::fetch(
                company,
                format!("could not parse board slug from URL: {board_url}"),
            )
        })
}

/// Parse a raw API response body into normalized jobs.
///
/// Fails the whole board when the payload isn't JSON, lacks a `jobs` array,
/// or yields zero parseable postings; individual malformed postings are
/// skipped silently.
fn parse_board_payload(company: &str, raw: &str) -> Result<Vec<Job>> {
    let payload: Value = serde_json::from_str(raw)
        .map_err(|e| AppError::fetch(company, format!("invalid JSON payload: {e}")))?;

    let postings = payload
        .get("jobs")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            AppError::fetch(company, "API response did not include a valid 'jobs' list")
        })?;

    let mut jobs = Vec::new();
    for posting in postings {
        let Some(fields) = posting.as_object() else {
            continue;
        };
        if let Some(job) = normalize_posting(company, fields) {
            jobs.push(job);
        }
    }

    if jobs.is_empty() {
        return Err(AppError::fetch(company, "API returned no parseable jobs"));
    }

    Ok(jobs)
}

/// Normalize one posting object, or None if it lacks a title or URL.
fn normalize_posting(company: &str, posting: &Map<String, Value>) -> Option<Job> {
    let title = coerce_text(posting.get("title"), &[]);
    if title.is_empty() {
        return None;
    }

    let job_url = coerce_text(posting.get("jobUrl"), &[]);
    if job_url.is_empty() {
        return None;
    }

    let apply_url = coerce_text(posting.get("applyUrl"), &[]);
    let job_id = if apply_url.is_empty() {
        job_url.clone()
    } else {
        apply_url
    };

    let location = coerce_text(posting.get("location"), &LOCATION_KEYS);

    let mut team = coerce_text(posting.get("team"), &[]);
    if team.is_empty() {
        team = coerce_text(posting.get("department"), &DEPARTMENT_KEYS);
    }

    Some(Job {
        company: company.to_string(),
        job_id,
        title,
        team,
        location,
        url: job_url,
    })
}

/// Coerce a payload value to trimmed text.
///
/// Strings are trimmed; objects are probed for the first non-empty string
/// under `keys`; numbers and booleans are rendered; anything else is empty.
fn coerce_text(value: Option<&Value>, keys: &[&str]) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Object(map)) => keys
            .iter()
            .find_map(|key| {
                map.get(*key)
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
            })
            .unwrap_or_default()
            .to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_board_slug() {
        assert_eq!(
            extract_board_slug("Rogo", "https://jobs.ashbyhq.com/rogo").unwrap(),
            "rogo"
        );
        assert_eq!(
            extract_board_slug("Rogo", "https://jobs.ashbyhq.com/rogo/").unwrap(),
            "rogo"
        );
        assert_eq!(
            extract_board_slug("X", "https://example.com/boards/acme-co").unwrap(),
            "acme-co"
        );
        assert!(extract_board_slug("X", "https://jobs.ashbyhq.com").is_err());
        assert!(extract_board_slug("X", "not a url").is_err());
    }

    #[test]
    fn test_parse_full_payload() {
        let raw = r#"{
            "jobs": [
                {
                    "title": " Data Engineer ",
                    "jobUrl": "https://jobs.ashbyhq.com/rogo/1",
                    "applyUrl": "https://jobs.ashbyhq.com/rogo/1/application",
                    "location": "Remote, UK",
                    "team": "Platform"
                }
            ]
        }"#;

        let jobs = parse_board_payload("Rogo", raw).unwrap();
        assert_eq!(jobs.len(), 1);
        let job = &jobs[0];
        assert_eq!(job.company, "Rogo");
        assert_eq!(job.title, "Data Engineer");
        assert_eq!(job.job_id, "https://jobs.ashbyhq.com/rogo/1/application");
        assert_eq!(job.url, "https://jobs.ashbyhq.com/rogo/1");
        assert_eq!(job.location, "Remote, UK");
        assert_eq!(job.team, "Platform");
    }

    #[test]
    fn test_job_id_falls_back_to_job_url() {
        let raw = r#"{"jobs": [{"title": "SRE", "jobUrl": "https://jobs.ashbyhq.com/x/2"}]}"#;
        let jobs = parse_board_payload("X", raw).unwrap();
        assert_eq!(jobs[0].job_id, "https://jobs.ashbyhq.com/x/2");
    }

    #[test]
    fn test_location_object_coercion() {
        let raw = r#"{
            "jobs": [{
                "title": "SRE",
                "jobUrl": "https://jobs.ashbyhq.com/x/3",
                "location": {"name": "Berlin", "id": 7},
                "department": {"label": "Infrastructure"}
            }]
        }"#;

        let jobs = parse_board_payload("X", raw).unwrap();
        assert_eq!(jobs[0].location, "Berlin");
        assert_eq!(jobs[0].team, "Infrastructure");
    }

    #[test]
    fn test_team_string_beats_department() {
        let raw = r#"{
            "jobs": [{
                "title": "SRE",
                "jobUrl": "https://jobs.ashbyhq.com/x/4",
                "team": "Core",
                "department": {"name": "Infrastructure"}
            }]
        }"#;

        let jobs = parse_board_payload("X", raw).unwrap();
        assert_eq!(jobs[0].team, "Core");
    }

    #[test]
    fn test_untitled_and_unlinked_postings_are_skipped() {
        let raw = r#"{
            "jobs": [
                {"title": "", "jobUrl": "https://jobs.ashbyhq.com/x/5"},
                {"title": "No Link"},
                "not an object",
                {"title": "Kept", "jobUrl": "https://jobs.ashbyhq.com/x/6"}
            ]
        }"#;

        let jobs = parse_board_payload("X", raw).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Kept");
    }

    #[test]
    fn test_missing_jobs_list_fails_board() {
        let err = parse_board_payload("X", r#"{"postings": []}"#).unwrap_err();
        assert!(matches!(err, AppError::Fetch { .. }));
        assert!(err.to_string().contains("'jobs' list"));
    }

    #[test]
    fn test_all_unparseable_fails_board() {
        let raw = r#"{"jobs": [{"title": ""}, 42]}"#;
        let err = parse_board_payload("X", raw).unwrap_err();
        assert!(err.to_string().contains("no parseable jobs"));
    }

    #[test]
    fn test_invalid_json_fails_board() {
        let err = parse_board_payload("X", "<html>maintenance</html>").unwrap_err();
        assert!(matches!(err, AppError::Fetch { company, .. } if company == "X"));
    }

    #[test]
    fn test_coerce_text_number() {
        let value = serde_json::json!(42);
        assert_eq!(coerce_text(Some(&value), &[]), "42");
    }
}
