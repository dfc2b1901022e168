use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::settings::{Settings, settings_path};
use crate::CliError;

/// Show current settings and where the database lives.
pub(crate) fn run_config_show(db: Option<&Path>) -> Result<(), CliError> {
    let settings = Settings::load()?;

    log::info!("{}", "GameLoggr Configuration".if_supports_color(Stdout, |t| t.bold()));
    crate::log_blank();

    match settings_path() {
        Some(p) if p.exists() => log::info!(
            "  Settings file: {} {}",
            p.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        ),
        Some(p) => log::info!(
            "  Settings file: {} {}",
            p.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        ),
        None => log::info!(
            "  Settings file: {}",
            "could not determine path".if_supports_color(Stdout, |t| t.red()),
        ),
    }

    let (db_path, source) = match db {
        Some(p) => (p.to_path_buf(), "--db"),
        None if settings.database_path.is_some() => (settings.database_path(), "settings"),
        None => (settings.database_path(), "default"),
    };
    log::info!(
        "  Database:      {} {}",
        db_path.display(),
        format!("({})", source).if_supports_color(Stdout, |t| t.dimmed()),
    );
    if db_path.exists() {
        let conn = gameloggr_db::open_database(&db_path)
            .map_err(|e| CliError::database(format!("Failed to open database: {}", e)))?;
        let counts = gameloggr_db::collection_counts(&conn)?;
        log::info!(
            "                 {} games ({} wishlisted), {} platforms, {} hardware, {} sessions, {} links",
            counts.games,
            counts.wishlisted,
            counts.platforms,
            counts.hardware,
            counts.play_log_entries,
            counts.helpful_links,
        );
    } else {
        log::info!(
            "                 {}",
            "(not created yet)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let export_source = if settings.export_dir.is_some() {
        "(settings)"
    } else {
        "(default)"
    };
    log::info!(
        "  Export dir:    {} {}",
        settings.export_dir().display(),
        export_source.if_supports_color(Stdout, |t| t.dimmed()),
    );
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    match settings_path() {
        Some(path) => log::info!("{}", path.display()),
        None => {
            return Err(CliError::config("Could not determine config directory"));
        }
    }

    Ok(())
}

pub(crate) fn run_config_set_db(path: PathBuf) -> Result<(), CliError> {
    let path = absolute(path)?;
    let mut settings = Settings::load()?;
    settings.database_path = Some(path.clone());
    let saved = settings.save()?;
    log::info!(
        "{} Database path set to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    log::debug!("Settings written to {}", saved.display());
    Ok(())
}

pub(crate) fn run_config_set_export_dir(path: PathBuf) -> Result<(), CliError> {
    let path = absolute(path)?;
    let mut settings = Settings::load()?;
    settings.export_dir = Some(path.clone());
    let saved = settings.save()?;
    log::info!(
        "{} Export directory set to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    log::debug!("Settings written to {}", saved.display());
    Ok(())
}

fn absolute(path: PathBuf) -> Result<PathBuf, CliError> {
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
