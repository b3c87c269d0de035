//! Telegram command bot.
//!
//! Drains pending updates from the Bot API, applies board-management
//! commands from the authorized chat, and replies to each one. The
//! getUpdates offset is persisted between invocations so commands are
//! handled once.

pub mod commands;

use std::env;
use std::path::Path;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{BoardList, Config, telegram_credentials};
use crate::notify::TelegramNotifier;
use crate::utils::{excerpt, http};

use commands::Command;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Update {
    update_id: Option<i64>,
    message: Option<Message>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Message {
    text: Option<String>,
    chat: Option<Chat>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Chat {
    id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OffsetFile {
    offset: i64,
}

/// Process all pending commands, then persist the advanced offset.
pub async fn run_bot(config: &Config) -> Result<()> {
    let (token, chat_id) = telegram_credentials()?;
    let client = http::create_client(&config.http)?;
    let notifier = TelegramNotifier::new(
        client.clone(),
        &config.notify,
        token.clone(),
        chat_id.clone(),
    );

    let offset = load_offset(&config.paths.offset_file).await;
    let updates = get_updates(&client, &config.notify.api_base, &token, offset).await?;
    let mut next_offset = offset;

    // The board list may not exist yet; /add bootstraps it.
    let boards_path = &config.paths.boards_file;
    let mut boards = if boards_path.exists() {
        BoardList::load(boards_path)?
    } else {
        BoardList::default()
    };

    for update in updates {
        let Ok(update) = serde_json::from_value::<Update>(update) else {
            continue;
        };
        if let Some(id) = update.update_id {
            next_offset = next_offset.max(id + 1);
        }

        let Some(message) = update.message else {
            continue;
        };
        let Some(text) = message
            .text
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
        else {
            continue;
        };

        let from_chat = message
            .chat
            .and_then(|chat| chat.id)
            .map(|id| id.to_string())
            .unwrap_or_default();
        if from_chat != chat_id {
            continue;
        }

        log::info!("Handling command: {}", text);
        let reply = match commands::parse_command(&text) {
            Command::Help => commands::HELP_TEXT.to_string(),
            Command::List => commands::format_list_reply(&boards),
            Command::Add(args) => {
                let (reply, changed) = commands::handle_add(&args, &mut boards);
                if changed {
                    boards.save(boards_path)?;
                }
                reply
            }
            Command::Remove(args) => {
                let (reply, changed) = commands::handle_remove(&args, &mut boards);
                if changed {
                    boards.save(boards_path)?;
                }
                reply
            }
            Command::RunAll => trigger_run_all(&client).await,
            Command::Unknown => "❌ Unknown command. Use /help.".to_string(),
            Command::Empty => "❌ Empty command. Use /help.".to_string(),
        };

        notifier.send_message(&chat_id, &reply).await?;
    }

    save_offset(&config.paths.offset_file, next_offset).await?;
    Ok(())
}

/// Fetch pending updates past `offset`.
async fn get_updates(
    client: &Client,
    api_base: &str,
    token: &str,
    offset: i64,
) -> Result<Vec<Value>> {
    let endpoint = format!("{}/bot{}/getUpdates", api_base.trim_end_matches('/'), token);

    let response = client
        .get(&endpoint)
        .query(&[
            ("offset", offset.to_string()),
            ("timeout", "0".to_string()),
            ("allowed_updates", r#"["message"]"#.to_string()),
        ])
        .send()
        .await
        .map_err(|e| AppError::notify(format!("getUpdates request failed: {e}")))?;

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if !status.is_success() {
        return Err(AppError::notify(format!(
            "getUpdates failed with HTTP {}: {}",
            status.as_u16(),
            excerpt(&body, 500)
        )));
    }

    let payload: Value = serde_json::from_str(&body)?;
    if !payload.get("ok").and_then(Value::as_bool).unwrap_or(false) {
        return Err(AppError::notify(format!(
            "getUpdates returned non-ok response: {}",
            excerpt(&body, 500)
        )));
    }

    Ok(payload
        .get("result")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default())
}

/// Trigger the run-now workflow via GitHub's workflow_dispatch API.
///
/// Failures come back as reply text rather than errors: the bot should
/// answer the chat either way.
async fn trigger_run_all(client: &Client) -> String {
    let token = env_trimmed("GH_WORKFLOW_TOKEN");
    let repository = env_trimmed("GITHUB_REPOSITORY");
    let workflow_file = non_empty_or(env_trimmed("RUN_NOW_WORKFLOW_FILE"), "run-now.yml");
    let run_ref = non_empty_or(env_trimmed("RUN_NOW_REF"), "main");

    if token.is_empty() || repository.is_empty() {
        return "❌ /runall is not configured. Missing GH_WORKFLOW_TOKEN or GITHUB_REPOSITORY."
            .to_string();
    }

    let url = format!(
        "https://api.github.com/repos/{repository}/actions/workflows/{workflow_file}/dispatches"
    );
    let body = serde_json::json!({
        "ref": run_ref,
        "inputs": { "ignore_seen": "true" },
    });

    let response = client
        .post(&url)
        .bearer_auth(&token)
        .header("Accept", "application/vnd.github+json")
        .json(&body)
        .send()
        .await;

    match response {
        Ok(response) if response.status().is_success() => "\
🚀 Run requested.
Starting an immediate full scan across all tracked boards.
This run will ignore seen history and send all current matching jobs."
            .to_string(),
        Ok(response) => {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            format!(
                "❌ Failed to trigger run-now workflow ({}): {}",
                status.as_u16(),
                excerpt(&body, 500)
            )
        }
        Err(e) => format!("❌ Failed to trigger run-now workflow: {e}"),
    }
}

fn env_trimmed(name: &str) -> String {
    env::var(name).unwrap_or_default().trim().to_string()
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

/// Read the persisted offset; absent or unreadable means start from zero.
///
/// A lost offset only re-polls already-handled commands.
async fn load_offset(path: &Path) -> i64 {
    match tokio::fs::read(path).await {
        Ok(bytes) => serde_json::from_slice::<OffsetFile>(&bytes)
            .map(|file| file.offset)
            .unwrap_or(0),
        Err(_) => 0,
    }
}

async fn save_offset(path: &Path, offset: i64) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    let bytes = serde_json::to_vec_pretty(&OffsetFile { offset })?;
    tokio::fs::write(path, bytes).await?;
    Ok(())
}
