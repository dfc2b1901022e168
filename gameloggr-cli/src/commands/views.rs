//! The backlog, wishlist, graveyard, and collection listings.

use std::path::Path;

use gameloggr_model::GameStatus;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::{format_money, log_game_list, log_game_row, open_store, platform_names};

pub(crate) fn run_backlog(db: Option<&Path>, status: Option<GameStatus>) -> Result<(), CliError> {
    let conn = open_store(db)?;
    let games = gameloggr_db::backlog(&conn, status)?;
    let heading = match status {
        Some(s) => format!("Backlog: {}", s),
        None => "Backlog".to_string(),
    };
    log_game_list(&heading, &games, &platform_names(&conn)?);

    if status.is_none() && !games.is_empty() {
        crate::log_blank();
        for s in GameStatus::ALL {
            let count = games.iter().filter(|g| g.status == s).count();
            if count > 0 {
                log::info!("  {:<12} {:>4}", s.as_str(), count);
            }
        }
    }
    Ok(())
}

pub(crate) fn run_wishlist(db: Option<&Path>) -> Result<(), CliError> {
    let conn = open_store(db)?;
    let games = gameloggr_db::wishlist(&conn)?;
    log_game_list("Wishlist", &games, &platform_names(&conn)?);

    let msrp: f64 = games.iter().map(|g| g.msrp).sum();
    if msrp > 0.0 {
        crate::log_blank();
        log::info!("  Retail value: {}", format_money(msrp));
    }
    Ok(())
}

pub(crate) fn run_graveyard(db: Option<&Path>) -> Result<(), CliError> {
    let conn = open_store(db)?;
    let games = gameloggr_db::graveyard(&conn)?;
    let platforms = platform_names(&conn)?;

    log::info!(
        "{} {}",
        "Graveyard".if_supports_color(Stdout, |t| t.bold()),
        format!("({})", games.len()).if_supports_color(Stdout, |t| t.dimmed()),
    );
    for game in &games {
        log_game_row(game, &platforms);
        log::info!(
            "            {}",
            game.ownership_status.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}

pub(crate) fn run_collection(db: Option<&Path>, search: Option<&str>) -> Result<(), CliError> {
    let conn = open_store(db)?;
    let groups = gameloggr_db::collection_by_platform(&conn, search)?;
    let platforms = platform_names(&conn)?;

    if groups.is_empty() {
        log::info!("No games in the collection.");
        return Ok(());
    }

    let total: usize = groups.iter().map(|(_, games)| games.len()).sum();
    log::info!(
        "{} {}",
        "Collection".if_supports_color(Stdout, |t| t.bold()),
        format!("({} games on {} platforms)", total, groups.len())
            .if_supports_color(Stdout, |t| t.dimmed()),
    );
    for (platform, games) in &groups {
        crate::log_blank();
        log::info!(
            "{} {}",
            platform.name.if_supports_color(Stdout, |t| t.cyan()),
            format!("({})", games.len()).if_supports_color(Stdout, |t| t.dimmed()),
        );
        for game in games {
            log_game_row(game, &platforms);
        }
    }
    Ok(())
}
