//! Tracked board list (the scan's seed data).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// One tracked job board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Board {
    /// Display name, used as the digest group header
    pub company: String,

    /// Public board URL (e.g. `https://jobs.ashbyhq.com/rogo`)
    pub url: String,
}

/// Ordered list of tracked boards.
///
/// The order is meaningful: digest groups appear in this order.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BoardList {
    #[serde(default)]
    pub boards: Vec<Board>,
}

impl BoardList {
    /// Load the board list from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("cannot read board list {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Write the board list back to a TOML file.
    ///
    /// The bot rewrites this file on /add and /remove.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Validate that every board has a usable name and an https URL.
    pub fn validate(&self) -> Result<()> {
        if self.boards.is_empty() {
            return Err(AppError::config("no boards defined"));
        }
        for board in &self.boards {
            if board.company.trim().is_empty() {
                return Err(AppError::config(format!(
                    "board with URL {} has an empty company name",
                    board.url
                )));
            }
            let parsed = Url::parse(&board.url).map_err(|e| {
                AppError::config(format!("board {} has an invalid URL: {}", board.company, e))
            })?;
            if parsed.scheme() != "https" {
                return Err(AppError::config(format!(
                    "board {} must use an https URL, got {}",
                    board.company, board.url
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BoardList {
        BoardList {
            boards: vec![
                Board {
                    company: "Notion".to_string(),
                    url: "https://jobs.ashbyhq.com/notion".to_string(),
                },
                Board {
                    company: "Rogo".to_string(),
                    url: "https://jobs.ashbyhq.com/rogo".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_list() {
        assert!(BoardList::default().validate().is_err());
    }

    #[test]
    fn test_validate_rejects_http_url() {
        let mut list = sample();
        list.boards[0].url = "http://jobs.ashbyhq.com/notion".to_string();
        assert!(list.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_company() {
        let mut list = sample();
        list.boards[1].company = "  ".to_string();
        assert!(list.validate().is_err());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("boards.toml");

        let list = sample();
        list.save(&path).unwrap();
        let loaded = BoardList::load(&path).unwrap();

        assert_eq!(loaded, list);
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = BoardList::load(tmp.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
