use std::path::Path;

use gameloggr_model::RankedGame;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::{format_hours, format_money, open_store, truncate_str};

pub(crate) fn run_stats(db: Option<&Path>) -> Result<(), CliError> {
    let conn = open_store(db)?;
    let stats = gameloggr_db::load_collection(&conn)?.stats();

    log::info!("{}", "Collection Statistics".if_supports_color(Stdout, |t| t.bold()));
    crate::log_blank();
    log::info!("  Games:            {:>10}", stats.games);
    log::info!("  Hardware:         {:>10}", stats.hardware);
    log::info!("  Five-star games:  {:>10}", stats.five_star_games);
    log::info!("  Hours played:     {:>10.1}", stats.total_time_played);
    crate::log_blank();

    log::info!("  {}", "Value".if_supports_color(Stdout, |t| t.bold()));
    log::info!("  {:<12} {:>12} {:>12} {:>12}", "", "Paid", "MSRP", "Saved");
    let rows = [
        ("Games", stats.games_purchase_total, stats.games_msrp_total, stats.games_savings()),
        (
            "Hardware",
            stats.hardware_purchase_total,
            stats.hardware_msrp_total,
            stats.hardware_savings(),
        ),
        (
            "Total",
            stats.combined_purchase_total(),
            stats.combined_msrp_total(),
            stats.combined_savings(),
        ),
    ];
    for (label, paid, msrp, saved) in rows {
        log::info!(
            "  {:<12} {:>12} {:>12} {:>12}",
            label,
            format_money(paid),
            format_money(msrp),
            format_money(saved),
        );
    }

    if !stats.by_status.is_empty() {
        crate::log_blank();
        log::info!("  {}", "By status".if_supports_color(Stdout, |t| t.bold()));
        for entry in &stats.by_status {
            log::info!("    {:<14} {:>6}", entry.status.as_str(), entry.count);
        }
    }

    if !stats.value_by_platform.is_empty() {
        crate::log_blank();
        log::info!("  {}", "Value by platform".if_supports_color(Stdout, |t| t.bold()));
        for entry in &stats.value_by_platform {
            log::info!(
                "    {:<30} {:>12}",
                truncate_str(&entry.platform_name, 30),
                format_money(entry.value),
            );
        }
    }

    log_ranked("Most played", &stats.top_played, true);
    log_ranked("Top rated", &stats.top_rated, false);
    log_ranked("Recently completed", &stats.recently_completed, false);
    log_ranked("Recently purchased", &stats.recently_purchased, false);
    log_ranked("Oldest in backlog", &stats.oldest_backlog, false);

    Ok(())
}

fn log_ranked(heading: &str, games: &[RankedGame], show_hours: bool) {
    if games.is_empty() {
        return;
    }
    crate::log_blank();
    log::info!("  {}", heading.if_supports_color(Stdout, |t| t.bold()));
    for (i, game) in games.iter().enumerate() {
        if show_hours {
            log::info!(
                "    {}. {:<40} {:>8}",
                i + 1,
                truncate_str(&game.title, 40),
                format_hours(game.hours),
            );
        } else {
            log::info!("    {}. {}", i + 1, game.title);
        }
    }
}
