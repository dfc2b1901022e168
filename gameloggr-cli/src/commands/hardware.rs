use std::path::Path;

use chrono::Utc;
use gameloggr_db::GameFilter;
use gameloggr_model::{Hardware, HardwareUsage};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::cli_types::HardwareAction;
use crate::CliError;

use super::{format_date, format_money, open_store, platform_names, short_id};

pub(crate) fn run(db: Option<&Path>, action: HardwareAction) -> Result<(), CliError> {
    let conn = open_store(db)?;
    match action {
        HardwareAction::Add {
            name,
            platform,
            serial,
            price,
            msrp,
            purchased,
            released,
            internal_gb,
            external_gb,
        } => {
            if internal_gb < 0.0 || external_gb < 0.0 {
                return Err(CliError::input("Storage sizes cannot be negative"));
            }
            if let Some(id) = platform {
                if gameloggr_db::find_platform(&conn, id)?.is_none() {
                    return Err(CliError::not_found(format!(
                        "Platform {} is not in the collection",
                        id
                    )));
                }
            }
            let hardware = Hardware {
                name,
                platform_id: platform,
                serial_number: serial,
                purchase_price: price,
                purchase_date: purchased.unwrap_or_else(Utc::now),
                msrp,
                release_date: released,
                internal_storage_gb: internal_gb,
                external_storage_gb: external_gb,
            };
            gameloggr_db::upsert_hardware(&conn, &hardware)?;
            log::info!(
                "{} Saved {} ({:.0} GB storage)",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                hardware.name.if_supports_color(Stdout, |t| t.bold()),
                hardware.total_storage_gb(),
            );
        }
        HardwareAction::List => {
            let hardware = gameloggr_db::list_hardware(&conn)?;
            let platforms = platform_names(&conn)?;
            log::info!(
                "{} {}",
                "Hardware".if_supports_color(Stdout, |t| t.bold()),
                format!("({})", hardware.len()).if_supports_color(Stdout, |t| t.dimmed()),
            );
            for hw in &hardware {
                let usage = gameloggr_db::hardware_usage(&conn, &hw.name, None)?;
                let platform = hw
                    .platform_id
                    .and_then(|id| platforms.get(&id))
                    .map(String::as_str)
                    .unwrap_or("-");
                log::info!(
                    "  {:<30} {:<20} {}",
                    hw.name,
                    platform,
                    storage_summary(&usage),
                );
            }
        }
        HardwareAction::Show { name } => {
            let hw = gameloggr_db::find_hardware(&conn, &name)?
                .ok_or_else(|| CliError::not_found(format!("No hardware named '{}'", name)))?;
            let usage = gameloggr_db::hardware_usage(&conn, &name, None)?;
            let platforms = platform_names(&conn)?;

            log::info!("{}", hw.name.if_supports_color(Stdout, |t| t.bold()));
            if let Some(platform) = hw.platform_id.and_then(|id| platforms.get(&id)) {
                log::info!("  Platform:   {}", platform);
            }
            if let Some(ref serial) = hw.serial_number {
                log::info!("  Serial:     {}", serial);
            }
            log::info!(
                "  Purchased:  {} for {} (MSRP {})",
                format_date(&hw.purchase_date),
                format_money(hw.purchase_price),
                format_money(hw.msrp),
            );
            if let Some(date) = hw.release_date {
                log::info!("  Released:   {}", format_date(&date));
            }
            log::info!(
                "  Storage:    {:.0} GB internal + {:.0} GB external",
                hw.internal_storage_gb,
                hw.external_storage_gb,
            );
            log::info!("  Usage:      {}", storage_summary(&usage));

            let installed = gameloggr_db::list_games(
                &conn,
                &GameFilter {
                    hardware: Some(name),
                    include_sub_games: true,
                    ..Default::default()
                },
            )?;
            let installed: Vec<_> = installed.into_iter().filter(|g| g.is_installed).collect();
            if !installed.is_empty() {
                crate::log_blank();
                log::info!("  {}", "Installed games".if_supports_color(Stdout, |t| t.bold()));
                for game in installed {
                    log::info!(
                        "    {}  {:<40} {:>8.1} GB",
                        short_id(game.id).if_supports_color(Stdout, |t| t.dimmed()),
                        game.title,
                        game.game_size_gb(),
                    );
                }
            }
        }
        HardwareAction::Delete { name, confirm } => {
            let usage = gameloggr_db::hardware_usage(&conn, &name, None)?;
            if !confirm {
                log::warn!(
                    "This will delete '{}' and uninstall {} game(s) from it.",
                    name,
                    usage.installed_games,
                );
                log::info!("Re-run with --confirm to proceed.");
                return Ok(());
            }
            gameloggr_db::delete_hardware(&conn, &name)?;
            log::info!("Deleted {}", name);
        }
    }
    Ok(())
}

fn storage_summary(usage: &HardwareUsage) -> String {
    if usage.total_storage_gb <= 0.0 {
        return format!("{} installed, no storage recorded", usage.installed_games);
    }
    let pct = usage.used_storage_gb / usage.total_storage_gb * 100.0;
    let text = format!(
        "{:.1} / {:.0} GB used ({:.0}%), {} installed",
        usage.used_storage_gb, usage.total_storage_gb, pct, usage.installed_games,
    );
    if pct >= 90.0 {
        text.if_supports_color(Stdout, |t| t.red()).to_string()
    } else {
        text
    }
}
