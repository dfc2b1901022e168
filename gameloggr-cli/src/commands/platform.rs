use std::path::Path;

use gameloggr_db::GameFilter;
use gameloggr_model::Platform;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::cli_types::PlatformAction;
use crate::CliError;

use super::open_store;

pub(crate) fn run(db: Option<&Path>, action: PlatformAction) -> Result<(), CliError> {
    let conn = open_store(db)?;
    match action {
        PlatformAction::List => {
            let platforms = gameloggr_db::list_platforms(&conn)?;
            log::info!(
                "{} {}",
                "Platforms".if_supports_color(Stdout, |t| t.bold()),
                format!("({})", platforms.len()).if_supports_color(Stdout, |t| t.dimmed()),
            );
            if platforms.is_empty() {
                log::info!("  Add one with 'gameloggr platform add' or 'gameloggr platforms --save'.");
            }
            for platform in platforms {
                let games = gameloggr_db::list_games(
                    &conn,
                    &GameFilter {
                        platform_id: Some(platform.id),
                        wishlisted: Some(false),
                        ..Default::default()
                    },
                )?;
                log::info!(
                    "  {:>6}  {:<40} {:>4} game(s)",
                    platform.id.if_supports_color(Stdout, |t| t.dimmed()),
                    platform.name,
                    games.len(),
                );
            }
        }
        PlatformAction::Add { id, name, logo } => {
            gameloggr_db::upsert_platform(
                &conn,
                &Platform {
                    id,
                    name: name.clone(),
                    logo_url: logo,
                },
            )?;
            log::info!("Saved platform {} ({})", name, id);
        }
    }
    Ok(())
}
