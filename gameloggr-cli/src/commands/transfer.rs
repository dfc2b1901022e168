use std::path::{Path, PathBuf};

use chrono::Utc;
use gameloggr_transfer::LogProgress;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::settings::Settings;
use crate::CliError;

use super::open_store;

pub(crate) fn run_export(db: Option<&Path>, output: Option<PathBuf>) -> Result<(), CliError> {
    let conn = open_store(db)?;
    let now = Utc::now();

    let path = match output {
        Some(p) => p,
        None => Settings::load()?
            .export_dir()
            .join(gameloggr_transfer::export_file_name(now)),
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let envelope = gameloggr_transfer::export_collection(&conn, now)
        .map_err(|e| CliError::transfer(format!("Export failed: {}", e)))?;
    let data = gameloggr_transfer::encode_envelope(&envelope)
        .map_err(|e| CliError::transfer(format!("Export failed: {}", e)))?;
    std::fs::write(&path, data)?;

    log::info!(
        "{} Exported {} games, {} platforms, {} hardware",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        envelope.games.len(),
        envelope.platforms.len(),
        envelope.hardware.len(),
    );
    log::info!("  {}", path.display().if_supports_color(Stdout, |t| t.cyan()));
    Ok(())
}

pub(crate) fn run_import(db: Option<&Path>, file: &Path, replace: bool) -> Result<(), CliError> {
    let data = std::fs::read(file)
        .map_err(|e| CliError::transfer(format!("Failed to read {}: {}", file.display(), e)))?;

    // Decode before touching the store so a bad file never clears anything
    let envelope = gameloggr_transfer::decode_envelope(&data)
        .map_err(|e| CliError::transfer(format!("{}: {}", file.display(), e)))?;

    let conn = open_store(db)?;
    if replace {
        let counts = gameloggr_db::collection_counts(&conn)?;
        if counts.games > 0 {
            log::warn!(
                "Replacing {} existing games, {} platforms, {} hardware",
                counts.games,
                counts.platforms,
                counts.hardware,
            );
        }
    }

    log::info!(
        "Importing {} (exported {})",
        file.display().if_supports_color(Stdout, |t| t.cyan()),
        envelope.export_date.format("%Y-%m-%d %H:%M"),
    );
    let result = gameloggr_transfer::import_envelope(&conn, &envelope, replace, &LogProgress)
        .map_err(|e| CliError::transfer(format!("Import failed: {}", e)))?;

    crate::log_blank();
    log::info!(
        "{} {} new item(s)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        result.total_items(),
    );
    log::info!("  Games:     {:>6}", result.games_imported);
    log::info!("  Platforms: {:>6}", result.platforms_imported);
    log::info!("  Hardware:  {:>6}", result.hardware_imported);
    let skipped = envelope.games.len().saturating_sub(result.games_imported);
    if skipped > 0 {
        log::info!(
            "  {}",
            format!("{} game(s) already in the collection were kept", skipped)
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}
