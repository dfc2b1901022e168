//! Commands backed by the IGDB API.

use std::path::Path;

use gameloggr_igdb::{Credentials, IgdbClient, IgdbError, IgdbGame};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::spinner;

use super::{open_store, runtime, short_id};

fn load_client() -> Result<IgdbClient, CliError> {
    let creds = Credentials::load().map_err(|e| {
        CliError::config(format!("{}. Run 'gameloggr credentials set' first.", e))
    })?;
    IgdbClient::new(creds).map_err(|e| CliError::igdb(e.to_string()))
}

/// Search failures that a later retry might fix are reported and treated
/// as an empty result; anything else aborts the command.
fn degrade<T: Default>(result: Result<T, IgdbError>, what: &str) -> Result<T, CliError> {
    match result {
        Ok(v) => Ok(v),
        Err(e) if e.is_transient() => {
            log::warn!("{} failed: {}", what, e);
            Ok(T::default())
        }
        Err(e) => Err(CliError::igdb(e.to_string())),
    }
}

pub(crate) fn run_search(
    db: Option<&Path>,
    query: &str,
    add: Option<usize>,
    platform: Option<i64>,
    wishlist: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(CliError::input("Search query is empty"));
    }

    let client = load_client()?;
    let rt = runtime()?;
    let pb = spinner::start(format!("Searching IGDB for '{}'...", query), quiet);
    let result = rt.block_on(client.search_games(query));
    pb.finish_and_clear();
    let games = degrade(result, "IGDB search")?;

    if games.is_empty() {
        log::info!("No results for '{}'", query);
        return Ok(());
    }

    let Some(n) = add else {
        log_results(&games);
        crate::log_blank();
        log::info!(
            "{}",
            "Add one with: gameloggr search <query> --add N [--platform ID] [--wishlist]"
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
        return Ok(());
    };

    let picked = n
        .checked_sub(1)
        .and_then(|i| games.get(i))
        .ok_or_else(|| CliError::input(format!("Pick a result between 1 and {}", games.len())))?;

    let conn = open_store(db)?;
    if let Some(id) = platform {
        if gameloggr_db::find_platform(&conn, id)?.is_none() {
            let known = picked
                .platforms
                .iter()
                .flatten()
                .find(|p| p.id == id)
                .ok_or_else(|| {
                    CliError::not_found(format!(
                        "Platform {} is not in the collection or listed for {}",
                        id, picked.name
                    ))
                })?;
            gameloggr_db::upsert_platform(&conn, &known.to_platform())?;
            log::debug!("Saved platform {} ({})", known.name, known.id);
        }
    }

    if !gameloggr_db::find_games_by_title(&conn, &picked.name)?.is_empty() {
        log::warn!("A game titled '{}' is already in the collection", picked.name);
    }

    let mut game = picked.to_new_game(platform);
    game.is_wishlisted = wishlist;
    gameloggr_db::insert_game(&conn, &game)?;

    log::info!(
        "{} Added {} to the {} {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        game.title.if_supports_color(Stdout, |t| t.bold()),
        if wishlist { "wishlist" } else { "collection" },
        format!("({})", short_id(game.id)).if_supports_color(Stdout, |t| t.dimmed()),
    );
    Ok(())
}

fn log_results(games: &[IgdbGame]) {
    for (i, game) in games.iter().enumerate() {
        let year = game
            .release_year()
            .map(|y| format!(" ({})", y))
            .unwrap_or_default();
        log::info!(
            "  {:>2}. {}{}",
            i + 1,
            game.name.if_supports_color(Stdout, |t| t.bold()),
            year,
        );
        let platforms: Vec<String> = game
            .platforms
            .iter()
            .flatten()
            .map(|p| format!("{} [{}]", p.name, p.id))
            .collect();
        if !platforms.is_empty() {
            log::info!(
                "      {}",
                platforms.join(", ").if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        let developers = game.developers();
        if !developers.is_empty() {
            log::info!(
                "      {}",
                developers.join(", ").if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
    }
}

pub(crate) fn run_platforms(
    db: Option<&Path>,
    filter: Option<&str>,
    save: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let client = load_client()?;
    let rt = runtime()?;
    let pb = spinner::start("Fetching IGDB platforms...", quiet);
    let result = rt.block_on(client.fetch_all_platforms());
    pb.finish_and_clear();
    let mut platforms = degrade(result, "Fetching platforms")?;

    if let Some(text) = filter {
        let needle = text.to_lowercase();
        platforms.retain(|p| p.name.to_lowercase().contains(&needle));
    }

    log::info!(
        "{} {}",
        "IGDB Platforms".if_supports_color(Stdout, |t| t.bold()),
        format!("({})", platforms.len()).if_supports_color(Stdout, |t| t.dimmed()),
    );
    for platform in &platforms {
        log::info!(
            "  {:>6}  {}",
            platform.id.if_supports_color(Stdout, |t| t.dimmed()),
            platform.name,
        );
    }

    if save && !platforms.is_empty() {
        let conn = open_store(db)?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| CliError::database(e.to_string()))?;
        for platform in &platforms {
            gameloggr_db::upsert_platform(&tx, &platform.to_platform())?;
        }
        tx.commit().map_err(|e| CliError::database(e.to_string()))?;
        crate::log_blank();
        log::info!(
            "{} Saved {} platform(s) to the collection",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            platforms.len(),
        );
    }
    Ok(())
}
