//! Inbound command parsing and board-list edits.
//!
//! Everything here is pure: commands come in as text, edits apply to an
//! in-memory [`BoardList`], and the caller decides whether to persist.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::{Board, BoardList};

pub const HELP_TEXT: &str = "\
🤖 Scout commands

/list
Show tracked boards

/add <ashby_url>
Add board using slug as name
Example: /add https://jobs.ashbyhq.com/rogo

/add <name> <ashby_url>
Add board with custom name
Example: /add Rogo https://jobs.ashbyhq.com/rogo

/remove <slug-or-name>
Remove a board
Example: /remove rogo

/runall
Trigger an immediate full scan across all tracked boards (ignores seen history for that run)
";

/// A parsed inbound command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    List,
    Add(Vec<String>),
    Remove(Vec<String>),
    RunAll,
    Unknown,
    Empty,
}

/// Tokenize one message into a command.
pub fn parse_command(text: &str) -> Command {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let Some(first) = tokens.first() else {
        return Command::Empty;
    };

    let args = || tokens[1..].iter().map(|s| s.to_string()).collect();
    match first.to_lowercase().as_str() {
        "/help" => Command::Help,
        "/list" => Command::List,
        "/add" => Command::Add(args()),
        "/remove" => Command::Remove(args()),
        "/runall" => Command::RunAll,
        _ => Command::Unknown,
    }
}

fn ashby_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^https://jobs\.ashbyhq\.com/([A-Za-z0-9-]+)/*$")
            .expect("hardcoded pattern is valid")
    })
}

/// Extract the lowercase slug from a public Ashby board URL.
pub fn parse_slug(url: &str) -> Option<String> {
    ashby_url_pattern()
        .captures(url.trim())
        .map(|captures| captures[1].to_lowercase())
}

/// Build the /list reply.
pub fn format_list_reply(boards: &BoardList) -> String {
    if boards.boards.is_empty() {
        return "📋 Tracked boards (0)".to_string();
    }

    let mut lines = vec![format!("📋 Tracked boards ({})", boards.boards.len())];
    for board in &boards.boards {
        lines.push(format!("- {}: {}", board.company, board.url));
    }
    lines.join("\n")
}

/// Apply /add. Returns the reply and whether the list changed.
pub fn handle_add(args: &[String], boards: &mut BoardList) -> (String, bool) {
    let Some(url) = args.last() else {
        return (
            "❌ Usage: /add <ashby_url> or /add <name> <ashby_url>".to_string(),
            false,
        );
    };

    let Some(slug) = parse_slug(url) else {
        return (
            "❌ Invalid Ashby URL. Use https://jobs.ashbyhq.com/<slug>".to_string(),
            false,
        );
    };

    let company = if args.len() == 1 {
        slug.clone()
    } else {
        let name = args[..args.len() - 1].join(" ").trim().to_string();
        if name.is_empty() { slug.clone() } else { name }
    };

    for existing in &boards.boards {
        if parse_slug(&existing.url).as_deref() == Some(slug.as_str()) {
            return (
                format!(
                    "ℹ️ Board already tracked:\n{} — {}",
                    existing.company, existing.url
                ),
                false,
            );
        }
    }

    let url = format!("https://jobs.ashbyhq.com/{slug}");
    boards.boards.push(Board {
        company: company.clone(),
        url: url.clone(),
    });
    boards
        .boards
        .sort_by_key(|board| board.company.to_lowercase());

    (
        format!("✅ Added board\nName: {company}\nURL: {url}\nSlug: {slug}"),
        true,
    )
}

/// Apply /remove. Returns the reply and whether the list changed.
pub fn handle_remove(args: &[String], boards: &mut BoardList) -> (String, bool) {
    let [needle] = args else {
        return ("❌ Usage: /remove <slug-or-name>".to_string(), false);
    };

    let needle_lower = needle.trim().to_lowercase();
    let mut kept = Vec::new();
    let mut removed = Vec::new();

    for board in boards.boards.drain(..) {
        let slug = parse_slug(&board.url).unwrap_or_default();
        if board.company.to_lowercase() == needle_lower || slug == needle_lower {
            removed.push(board);
        } else {
            kept.push(board);
        }
    }
    boards.boards = kept;

    if removed.is_empty() {
        return (
            format!("❌ No tracked board matched: {needle}\nUse /list to see valid names/slugs."),
            false,
        );
    }

    let names: Vec<&str> = removed.iter().map(|board| board.company.as_str()).collect();
    (format!("✅ Removed board: {}", names.join(", ")), true)
}
