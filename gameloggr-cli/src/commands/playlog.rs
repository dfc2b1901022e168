use std::path::Path;

use chrono::Utc;
use gameloggr_model::PlayLogEntry;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::cli_types::LogAction;
use crate::CliError;

use super::{format_date, format_hours, open_store, resolve_game};

pub(crate) fn run(db: Option<&Path>, action: LogAction) -> Result<(), CliError> {
    let conn = open_store(db)?;
    match action {
        LogAction::Add {
            game,
            minutes,
            notes,
            checkpoint,
            title,
            at,
        } => {
            if minutes <= 0.0 {
                return Err(CliError::input("Session length must be positive"));
            }
            let game = resolve_game(&conn, &game)?;
            let entry = PlayLogEntry {
                id: None,
                timestamp: at.unwrap_or_else(Utc::now),
                time_spent: minutes * 60.0,
                notes,
                checkpoint: checkpoint || title.is_some(),
                title,
            };
            let id = gameloggr_db::add_play_log_entry(&conn, game.id, &entry)?;

            let total = game.total_time_played()
                + if game.manually_set_total_time > 0.0 { 0.0 } else { minutes / 60.0 };
            log::info!(
                "{} Logged {} on {} {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                format_hours(minutes / 60.0),
                game.title.if_supports_color(Stdout, |t| t.bold()),
                format!("(entry {}, {} total)", id, format_hours(total))
                    .if_supports_color(Stdout, |t| t.dimmed()),
            );
            Ok(())
        }
        LogAction::List {
            game,
            checkpoints,
            normal,
        } => {
            let game = resolve_game(&conn, &game)?;
            let entries: Vec<&PlayLogEntry> = game
                .play_log
                .iter()
                .filter(|e| !checkpoints || e.checkpoint)
                .filter(|e| !normal || !e.checkpoint)
                .collect();

            log::info!(
                "{} {}",
                game.title.if_supports_color(Stdout, |t| t.bold()),
                format!("({} sessions, {} total)", entries.len(), format_hours(game.total_time_played()))
                    .if_supports_color(Stdout, |t| t.dimmed()),
            );
            if game.manually_set_total_time > 0.0 {
                log::info!(
                    "  {}",
                    "Total time is set by hand and ignores the log."
                        .if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
            for entry in entries {
                let heading = match (&entry.title, entry.checkpoint) {
                    (Some(title), _) => title.if_supports_color(Stdout, |t| t.yellow()).to_string(),
                    (None, true) => "checkpoint".if_supports_color(Stdout, |t| t.yellow()).to_string(),
                    (None, false) => String::new(),
                };
                log::info!(
                    "  {:>4}  {}  {:>6}  {} {}",
                    entry.id.map(|id| id.to_string()).unwrap_or_default(),
                    format_date(&entry.timestamp),
                    format_hours(entry.time_spent / 3600.0),
                    heading,
                    entry.notes,
                );
            }
            Ok(())
        }
        LogAction::Delete { id } => {
            gameloggr_db::delete_play_log_entry(&conn, id)?;
            log::info!("Deleted play log entry {}", id);
            Ok(())
        }
    }
}
