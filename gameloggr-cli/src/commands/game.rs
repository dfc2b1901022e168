use std::path::Path;

use chrono::Utc;
use gameloggr_db::GameFilter;
use gameloggr_model::{check_rating, split_list, Game};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rusqlite::Connection;

use crate::cli_types::{GameAction, GameFields};
use crate::CliError;

use super::{
    format_date, format_hours, format_money, log_game_list, open_store, platform_names,
    resolve_game, short_id,
};

pub(crate) fn run(db: Option<&Path>, action: GameAction) -> Result<(), CliError> {
    let conn = open_store(db)?;
    match action {
        GameAction::Add { title, fields } => run_add(&conn, title, &fields),
        GameAction::Show { game } => run_show(&conn, &game),
        GameAction::List {
            platform,
            hardware,
            status,
            search,
            all,
        } => {
            let filter = GameFilter {
                platform_id: platform,
                hardware,
                status,
                title_contains: search,
                include_sub_games: all,
                ..Default::default()
            };
            let games = gameloggr_db::list_games(&conn, &filter)?;
            log_game_list("Games", &games, &platform_names(&conn)?);
            Ok(())
        }
        GameAction::Edit {
            game,
            title,
            fields,
        } => run_edit(&conn, &game, title, &fields),
        GameAction::Delete { game, confirm } => run_delete(&conn, &game, confirm),
        GameAction::Status { game, status } => {
            let game = resolve_game(&conn, &game)?;
            let updated = gameloggr_db::set_game_status(&conn, game.id, status, Utc::now())?;
            log::info!(
                "{} {} is now {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                updated.title.if_supports_color(Stdout, |t| t.bold()),
                updated.status,
            );
            Ok(())
        }
        GameAction::Install { game, hardware } => {
            let game = resolve_game(&conn, &game)?;
            gameloggr_db::install_game(&conn, game.id, &hardware)?;
            let usage = gameloggr_db::hardware_usage(&conn, &hardware, None)?;
            log::info!(
                "{} Installed {} on {} ({:.1} GB free)",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                game.title.if_supports_color(Stdout, |t| t.bold()),
                hardware,
                usage.available_storage_gb(),
            );
            Ok(())
        }
        GameAction::Uninstall { game } => {
            let game = resolve_game(&conn, &game)?;
            gameloggr_db::uninstall_game(&conn, game.id)?;
            log::info!("Uninstalled {}", game.title);
            Ok(())
        }
        GameAction::MoveToCollection { game } => {
            let game = resolve_game(&conn, &game)?;
            if !game.is_wishlisted {
                log::info!("{} is already in the collection", game.title);
                return Ok(());
            }
            gameloggr_db::move_to_collection(&conn, game.id)?;
            log::info!("Moved {} from the wishlist to the collection", game.title);
            Ok(())
        }
        GameAction::AddSub { collection, game } => {
            let parent = resolve_game(&conn, &collection)?;
            let child = resolve_game(&conn, &game)?;
            gameloggr_db::add_sub_game(&conn, parent.id, child.id)?;
            log::info!("Added {} to collection {}", child.title, parent.title);
            Ok(())
        }
        GameAction::UnmarkCollection { game } => {
            let game = resolve_game(&conn, &game)?;
            let released = gameloggr_db::sub_games(&conn, game.id)?.len();
            gameloggr_db::unmark_collection(&conn, game.id)?;
            log::info!(
                "{} is no longer a collection ({} sub-game(s) released)",
                game.title,
                released,
            );
            Ok(())
        }
    }
}

fn run_add(conn: &Connection, title: String, fields: &GameFields) -> Result<(), CliError> {
    let mut game = Game::new(title);
    apply_fields(conn, &mut game, fields)?;
    gameloggr_db::insert_game(conn, &game)?;

    log::info!(
        "{} Added {} {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        game.title.if_supports_color(Stdout, |t| t.bold()),
        format!("({})", short_id(game.id)).if_supports_color(Stdout, |t| t.dimmed()),
    );
    if game.is_wishlisted {
        log::info!("  On the wishlist");
    }
    Ok(())
}

fn run_edit(
    conn: &Connection,
    ident: &str,
    title: Option<String>,
    fields: &GameFields,
) -> Result<(), CliError> {
    let mut game = resolve_game(conn, ident)?;
    if let Some(title) = title {
        game.title = title;
    }
    apply_fields(conn, &mut game, fields)?;
    gameloggr_db::update_game(conn, &game)?;
    log::info!("Updated {}", game.title.if_supports_color(Stdout, |t| t.bold()));
    Ok(())
}

fn run_delete(conn: &Connection, ident: &str, confirm: bool) -> Result<(), CliError> {
    let game = resolve_game(conn, ident)?;

    if !confirm {
        log::warn!(
            "This will permanently delete {} and its {} play session(s).",
            game.title,
            game.play_log.len(),
        );
        log::info!("Re-run with --confirm to proceed:");
        log::info!("  gameloggr game delete {} --confirm", short_id(game.id));
        return Ok(());
    }

    gameloggr_db::delete_game(conn, game.id)?;
    log::info!("Deleted {}", game.title);
    Ok(())
}

/// Copy every field the user supplied onto `game`.
fn apply_fields(conn: &Connection, game: &mut Game, fields: &GameFields) -> Result<(), CliError> {
    if let Some(id) = fields.platform {
        if gameloggr_db::find_platform(conn, id)?.is_none() {
            return Err(CliError::not_found(format!(
                "Platform {} is not in the collection. Add it with 'gameloggr platform add' \
                 or 'gameloggr platforms --save'",
                id
            )));
        }
        game.platform_id = Some(id);
    }
    if let Some(rating) = fields.rating {
        game.star_rating = check_rating(rating).map_err(|e| CliError::input(e.to_string()))?;
    }
    if let Some(hours) = fields.hours {
        if hours < 0.0 {
            return Err(CliError::input("Hours played cannot be negative"));
        }
        game.manually_set_total_time = hours;
    }

    let set = |target: &mut f64, value: Option<f64>| {
        if let Some(v) = value {
            *target = v;
        }
    };
    set(&mut game.purchase_price, fields.price);
    set(&mut game.msrp, fields.msrp);
    set(&mut game.game_size_mb, fields.size_mb);
    set(&mut game.user_hltb_main, fields.hltb_main);
    set(&mut game.user_hltb_extra, fields.hltb_extra);
    set(&mut game.user_hltb_completionist, fields.hltb_completionist);

    let flag = |target: &mut bool, value: Option<bool>| {
        if let Some(v) = value {
            *target = v;
        }
    };
    flag(&mut game.is_digital, fields.digital);
    flag(&mut game.is_wishlisted, fields.wishlist);
    flag(&mut game.has_case, fields.has_case);
    flag(&mut game.has_manual, fields.has_manual);
    flag(&mut game.has_inserts, fields.has_inserts);
    flag(&mut game.is_sealed, fields.sealed);

    if let Some(date) = fields.purchased {
        game.purchase_date = date;
    }
    if let Some(date) = fields.released {
        game.release_date = Some(date);
    }
    if let Some(ownership) = fields.ownership {
        game.ownership_status = ownership;
    }
    if let Some(ref cover) = fields.cover {
        game.cover_art_url = Some(cover.clone()).filter(|c| !c.is_empty());
    }
    if let Some(ref genres) = fields.genres {
        game.genres = split_list(genres);
    }
    if let Some(ref developers) = fields.developers {
        game.developers = split_list(developers);
    }
    if let Some(ref publishers) = fields.publishers {
        game.publishers = split_list(publishers);
    }
    Ok(())
}

fn run_show(conn: &Connection, ident: &str) -> Result<(), CliError> {
    let game = resolve_game(conn, ident)?;
    let platforms = platform_names(conn)?;

    log::info!("{}", game.title.if_supports_color(Stdout, |t| t.bold()));
    log::info!("  {}", game.id.if_supports_color(Stdout, |t| t.dimmed()));
    crate::log_blank();

    let platform = game
        .platform_id
        .and_then(|id| platforms.get(&id).cloned())
        .unwrap_or_else(|| "-".to_string());
    log::info!("  Platform:     {}", platform);
    log::info!("  Status:       {}", game.status);
    if let Some(date) = game.start_date {
        log::info!("  Started:      {}", format_date(&date));
    }
    if let Some(date) = game.completion_date {
        log::info!("  Completed:    {}", format_date(&date));
    }
    log::info!("  Time played:  {}", format_hours(game.total_time_played()));
    if game.star_rating > 0.0 {
        log::info!("  Rating:       {:.1} / 5", game.star_rating);
    }
    if game.is_wishlisted {
        log::info!("  {}", "On the wishlist".if_supports_color(Stdout, |t| t.yellow()));
    }
    crate::log_blank();

    log::info!(
        "  Purchased:    {} for {} (MSRP {}){}",
        format_date(&game.purchase_date),
        format_money(game.purchase_price),
        format_money(game.msrp),
        if game.is_digital { ", digital" } else { "" },
    );
    log::info!("  Ownership:    {}", game.ownership_status);
    if !game.is_digital {
        log::info!("  Condition:    {}", game.collectors_grade().label());
    }
    if game.is_installed {
        log::info!(
            "  Installed on: {} ({:.1} GB)",
            game.linked_hardware.as_deref().unwrap_or("-"),
            game.game_size_gb(),
        );
    }
    if let Some(date) = game.release_date {
        log::info!("  Released:     {}", format_date(&date));
    }
    if !game.genres.is_empty() {
        log::info!("  Genres:       {}", game.genres.join(", "));
    }
    if !game.developers.is_empty() {
        log::info!("  Developers:   {}", game.developers.join(", "));
    }
    if !game.publishers.is_empty() {
        log::info!("  Publishers:   {}", game.publishers.join(", "));
    }

    let hltb = [
        ("Main", game.hltb_main, game.user_hltb_main),
        ("Main + Extras", game.hltb_extra, game.user_hltb_extra),
        ("Completionist", game.hltb_completionist, game.user_hltb_completionist),
    ];
    if hltb.iter().any(|(_, reference, user)| *reference > 0.0 || *user > 0.0) {
        crate::log_blank();
        log::info!("  {}", "Time to beat (reference / yours)".if_supports_color(Stdout, |t| t.bold()));
        for (label, reference, user) in hltb {
            log::info!(
                "    {:<14} {:>7} / {:<7}",
                label,
                format_hours(reference),
                format_hours(user)
            );
        }
    }

    if game.is_collection {
        let children = gameloggr_db::sub_games(conn, game.id)?;
        crate::log_blank();
        log::info!("  {}", "Collection contents".if_supports_color(Stdout, |t| t.bold()));
        for child in &children {
            log::info!("    {}  {} ({})", short_id(child.id), child.title, child.status);
        }
    }
    if let Some(parent) = game.parent_collection_id {
        if let Some(parent) = gameloggr_db::find_game(conn, parent)? {
            log::info!("  Part of:      {}", parent.title);
        }
    }

    if !game.play_log.is_empty() {
        crate::log_blank();
        log::info!(
            "  {} {}",
            "Play log".if_supports_color(Stdout, |t| t.bold()),
            format!("({} sessions)", game.play_log.len()).if_supports_color(Stdout, |t| t.dimmed()),
        );
        for entry in game.play_log.iter().take(5) {
            let marker = if entry.checkpoint { "\u{2691}" } else { " " };
            log::info!(
                "    {:>4} {} {} {:>6}  {}",
                entry.id.map(|id| id.to_string()).unwrap_or_default(),
                marker,
                format_date(&entry.timestamp),
                format_hours(entry.time_spent / 3600.0),
                entry.title.as_deref().unwrap_or(&entry.notes),
            );
        }
    }

    if !game.helpful_links.is_empty() {
        crate::log_blank();
        log::info!("  {}", "Links".if_supports_color(Stdout, |t| t.bold()));
        for link in &game.helpful_links {
            log::info!(
                "    {:>4}  {} {}",
                link.id.map(|id| id.to_string()).unwrap_or_default(),
                link.name,
                link.url.if_supports_color(Stdout, |t| t.cyan()),
            );
        }
    }

    Ok(())
}
