pub(crate) mod config;
pub(crate) mod credentials;
pub(crate) mod game;
pub(crate) mod hardware;
pub(crate) mod link;
pub(crate) mod platform;
pub(crate) mod playlog;
pub(crate) mod search;
pub(crate) mod stats;
pub(crate) mod transfer;
pub(crate) mod views;

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use gameloggr_model::{Game, GameStatus, OwnershipStatus};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rusqlite::Connection;
use uuid::Uuid;

use crate::CliError;
use crate::settings::Settings;

/// Open the collection database from `--db` or the configured path.
pub(crate) fn open_store(db: Option<&Path>) -> Result<Connection, CliError> {
    let path = match db {
        Some(p) => p.to_path_buf(),
        None => Settings::load()?.database_path(),
    };
    log::debug!("Opening collection database {}", path.display());
    gameloggr_db::open_database(&path).map_err(|e| {
        CliError::database(format!("Failed to open database {}: {}", path.display(), e))
    })
}

pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {}", e)))
}

// ── Game Resolution ─────────────────────────────────────────────────────────

/// Find the single game the user means by `ident`.
///
/// Tries, in order: a full id, an exact title (case-insensitive), then an
/// id prefix or title substring.
pub(crate) fn resolve_game(conn: &Connection, ident: &str) -> Result<Game, CliError> {
    let ident = ident.trim();
    if let Ok(id) = Uuid::parse_str(ident) {
        return gameloggr_db::find_game(conn, id)?
            .ok_or_else(|| CliError::not_found(format!("No game with id {}", id)));
    }

    let mut exact = gameloggr_db::find_games_by_title(conn, ident)?;
    if exact.len() > 1 {
        return Err(ambiguous(ident, &exact));
    }
    if let Some(game) = exact.pop() {
        return Ok(game);
    }

    let needle = ident.to_lowercase();
    let mut matches: Vec<Game> = gameloggr_db::list_games(
        conn,
        &gameloggr_db::GameFilter {
            include_sub_games: true,
            ..Default::default()
        },
    )?
    .into_iter()
    .filter(|g| {
        g.id.to_string().starts_with(&needle) || g.title.to_lowercase().contains(&needle)
    })
    .collect();

    if matches.len() > 1 {
        return Err(ambiguous(ident, &matches));
    }
    matches.pop().ok_or_else(|| no_match(ident))
}

fn no_match(ident: &str) -> CliError {
    CliError::not_found(format!("No game matches '{}'", ident))
}

fn ambiguous(ident: &str, games: &[Game]) -> CliError {
    let mut msg = format!("'{}' matches {} games; use an id:", ident, games.len());
    for game in games.iter().take(10) {
        msg.push_str(&format!("\n  {}  {}", short_id(game.id), game.title));
    }
    CliError::input(msg)
}

// ── Argument Parsing ────────────────────────────────────────────────────────

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .collect::<String>()
        .to_lowercase()
}

/// Strict status parser for arguments; unknown names are an error.
pub(crate) fn parse_status(s: &str) -> Result<GameStatus, String> {
    let status = GameStatus::from_str_loose(s);
    if status == GameStatus::Backlog && normalize(s) != "backlog" {
        let names: Vec<&str> = GameStatus::ALL.iter().map(|s| s.as_str()).collect();
        return Err(format!("unknown status '{}' (expected one of: {})", s, names.join(", ")));
    }
    Ok(status)
}

pub(crate) fn parse_ownership(s: &str) -> Result<OwnershipStatus, String> {
    let ownership = OwnershipStatus::from_str_loose(s);
    let n = normalize(s);
    if ownership == OwnershipStatus::Owned && n != "incollection" && n != "owned" {
        return Err(format!(
            "unknown ownership '{}' (expected in-collection, sold, or lent-out)",
            s
        ));
    }
    Ok(ownership)
}

/// Parse `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 timestamp.
pub(crate) fn parse_date(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|_| format!("invalid date '{}' (expected YYYY-MM-DD)", s))
}

// ── Formatting ──────────────────────────────────────────────────────────────

pub(crate) fn short_id(id: Uuid) -> String {
    id.to_string()[..8].to_string()
}

pub(crate) fn format_money(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.2}", -value)
    } else {
        format!("${:.2}", value)
    }
}

pub(crate) fn format_hours(hours: f64) -> String {
    if hours == 0.0 {
        "-".to_string()
    } else if hours < 1.0 {
        format!("{:.0}m", hours * 60.0)
    } else {
        format!("{:.1}h", hours)
    }
}

pub(crate) fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Truncate a string to a maximum width in characters, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        format!("{}...", s.chars().take(max - 3).collect::<String>())
    } else {
        s.chars().take(max).collect()
    }
}

pub(crate) fn platform_names(conn: &Connection) -> Result<HashMap<i64, String>, CliError> {
    Ok(gameloggr_db::list_platforms(conn)?
        .into_iter()
        .map(|p| (p.id, p.name))
        .collect())
}

/// One-line summary used by every game listing.
pub(crate) fn log_game_row(game: &Game, platforms: &HashMap<i64, String>) {
    let platform = game
        .platform_id
        .and_then(|id| platforms.get(&id))
        .map(String::as_str)
        .unwrap_or("-");
    let status = format!("{:<11}", game.status.as_str());
    let status = match game.status {
        GameStatus::Completed => status.if_supports_color(Stdout, |t| t.green()).to_string(),
        GameStatus::InProgress => status.if_supports_color(Stdout, |t| t.cyan()).to_string(),
        GameStatus::Dropped => status.if_supports_color(Stdout, |t| t.red()).to_string(),
        _ => status,
    };
    let mut flags = String::new();
    if game.is_collection {
        flags.push_str(" [collection]");
    }
    if game.is_installed {
        flags.push_str(" [installed]");
    }
    log::info!(
        "  {}  {:<40} {:<20} {} {:>7}{}",
        short_id(game.id).if_supports_color(Stdout, |t| t.dimmed()),
        truncate_str(&game.title, 40),
        truncate_str(platform, 20),
        status,
        format_hours(game.total_time_played()),
        flags.if_supports_color(Stdout, |t| t.dimmed()),
    );
}

pub(crate) fn log_game_list(heading: &str, games: &[Game], platforms: &HashMap<i64, String>) {
    log::info!(
        "{} {}",
        heading.if_supports_color(Stdout, |t| t.bold()),
        format!("({})", games.len()).if_supports_color(Stdout, |t| t.dimmed()),
    );
    if games.is_empty() {
        log::info!("  {}", "Nothing here yet.".if_supports_color(Stdout, |t| t.dimmed()));
        return;
    }
    for game in games {
        log_game_row(game, platforms);
    }
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
