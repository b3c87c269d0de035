//! Telegram delivery.
//!
//! Sends messages through the Bot API's `sendMessage` endpoint. Telegram
//! caps messages at 4096 characters, so oversized digests are split into
//! chunks on line boundaries where possible.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::NotifyConfig;
use crate::notify::Notifier;
use crate::utils::excerpt;

/// Hard per-message character limit imposed by the Bot API.
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// Telegram Bot API client.
pub struct TelegramNotifier {
    client: Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
    disable_link_previews: bool,
}

impl TelegramNotifier {
    /// Create a notifier bound to one bot token and destination chat.
    pub fn new(
        client: Client,
        config: &NotifyConfig,
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            disable_link_previews: config.disable_link_previews,
        }
    }

    /// Send one or more messages to an explicit chat.
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<()> {
        let endpoint = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);
        let disable_preview = if self.disable_link_previews {
            "true"
        } else {
            "false"
        };

        for part in split_message(text, MAX_MESSAGE_CHARS) {
            let response = self
                .client
                .post(&endpoint)
                .form(&[
                    ("chat_id", chat_id),
                    ("text", part.as_str()),
                    ("disable_web_page_preview", disable_preview),
                ])
                .send()
                .await
                .map_err(|e| AppError::notify(format!("sendMessage request failed: {e}")))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(AppError::notify(format!(
                    "sendMessage failed with HTTP {}: {}",
                    status.as_u16(),
                    excerpt(&body, 500)
                )));
            }
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        self.send_message(&self.chat_id, text).await
    }
}

/// Split text into chunks of at most `max_chars` characters, preferring
/// line boundaries; a single oversized line is hard-wrapped.
fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for line in text.split_inclusive('\n') {
        let line_len = line.chars().count();

        if line_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let mut buf = String::new();
            let mut buf_len = 0usize;
            for ch in line.chars() {
                buf.push(ch);
                buf_len += 1;
                if buf_len == max_chars {
                    chunks.push(std::mem::take(&mut buf));
                    buf_len = 0;
                }
            }
            if !buf.is_empty() {
                chunks.push(buf);
            }
            continue;
        }

        if current_len + line_len > max_chars {
            chunks.push(std::mem::take(&mut current));
            current = line.to_string();
            current_len = line_len;
        } else {
            current.push_str(line);
            current_len += line_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_chunk() {
        assert_eq!(split_message("hello", 10), vec!["hello"]);
    }

    #[test]
    fn test_empty_text_is_one_empty_chunk() {
        assert_eq!(split_message("", 10), vec![""]);
    }

    #[test]
    fn test_exact_limit_is_one_chunk() {
        let text = "a".repeat(10);
        assert_eq!(split_message(&text, 10), vec![text]);
    }

    #[test]
    fn test_splits_on_line_boundaries() {
        let text = "aaaa\nbbbb\ncccc";
        let chunks = split_message(text, 10);
        assert_eq!(chunks, vec!["aaaa\nbbbb\n", "cccc"]);
    }

    #[test]
    fn test_oversized_line_is_hard_wrapped() {
        let text = format!("{}\nshort", "x".repeat(25));
        let chunks = split_message(&text, 10);

        assert_eq!(chunks[0], "x".repeat(10));
        assert_eq!(chunks[1], "x".repeat(10));
        assert_eq!(chunks[2], format!("{}\n", "x".repeat(5)));
        assert_eq!(chunks[3], "short");
    }

    #[test]
    fn test_every_chunk_respects_limit() {
        let text = "line one is fairly long\n".repeat(40);
        for chunk in split_message(&text, 50) {
            assert!(chunk.chars().count() <= 50);
        }
    }

    #[test]
    fn test_chunks_reassemble_to_original() {
        let text = "alpha\nbeta\ngamma\ndelta\n".repeat(10);
        let chunks = split_message(&text, 30);
        assert_eq!(chunks.concat(), text);
    }
}
