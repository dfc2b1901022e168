use std::io::Write;

use gameloggr_igdb::{CredentialSource, Credentials, IgdbClient};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::spinner;

use super::runtime;

pub(crate) fn mask_value(s: &str) -> String {
    if s.chars().count() <= 2 {
        "****".to_string()
    } else {
        format!("{}****", s.chars().take(2).collect::<String>())
    }
}

/// Show current credentials and their sources.
pub(crate) fn run_credentials_show() -> Result<(), CliError> {
    let path = gameloggr_igdb::config_path();
    let sources = gameloggr_igdb::credential_sources();

    log::info!("{}", "IGDB Credentials".if_supports_color(Stdout, |t| t.bold()));
    crate::log_blank();

    match &path {
        Some(p) if p.exists() => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Config file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
    crate::log_blank();

    // Credentials::load() fails when either field is missing, so resolve per field
    let creds = Credentials::load().ok();
    let value = |source: &CredentialSource, from_creds: Option<&str>, is_secret: bool| {
        let raw = match source {
            CredentialSource::Missing => None,
            CredentialSource::EnvVar(var) => std::env::var(var).ok(),
            CredentialSource::ConfigFile => from_creds.map(str::to_string),
        };
        raw.map(|v| if is_secret { mask_value(&v) } else { v })
    };

    let fields = [
        (
            "client_id",
            &sources.client_id,
            value(
                &sources.client_id,
                creds.as_ref().map(|c| c.client_id.as_str()),
                false,
            ),
        ),
        (
            "client_secret",
            &sources.client_secret,
            value(
                &sources.client_secret,
                creds.as_ref().map(|c| c.client_secret.as_str()),
                true,
            ),
        ),
    ];

    for (name, source, value) in fields {
        let source_str = format!("({})", source);
        match value {
            Some(v) => log::info!(
                "  {} {} {}",
                format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                v,
                source_str.if_supports_color(Stdout, |t| t.dimmed()),
            ),
            None => log::info!(
                "  {} {} {}",
                format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                "not set".if_supports_color(Stdout, |t| t.yellow()),
                source_str.if_supports_color(Stdout, |t| t.dimmed()),
            ),
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String, CliError> {
    loop {
        print!("  {}: ", label);
        std::io::stdout().flush()?;

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input)? == 0 {
            return Err(CliError::input(format!("No value given for {}", label)));
        }
        let trimmed = input.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
        println!(
            "    {}",
            "This field is required.".if_supports_color(Stdout, |t| t.yellow()),
        );
    }
}

/// Save credentials, prompting for any value not given on the command line.
pub(crate) fn run_credentials_set(
    client_id: Option<String>,
    client_secret: Option<String>,
) -> Result<(), CliError> {
    if client_id.is_none() || client_secret.is_none() {
        println!(
            "{}",
            "IGDB Credential Setup".if_supports_color(Stdout, |t| t.bold()),
        );
        println!(
            "  {}",
            "Create an application at https://dev.twitch.tv/console to get these."
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    let client_id = match client_id {
        Some(v) => v,
        None => prompt("client_id")?,
    };
    let client_secret = match client_secret {
        Some(v) => v,
        None => prompt("client_secret")?,
    };

    let path = gameloggr_igdb::save_to_file(&Credentials::new(client_id, client_secret))
        .map_err(|e| CliError::config(format!("Failed to save credentials: {}", e)))?;

    log::info!(
        "{} Credentials saved to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    let sources = gameloggr_igdb::credential_sources();
    if matches!(sources.client_id, CredentialSource::EnvVar(_))
        || matches!(sources.client_secret, CredentialSource::EnvVar(_))
    {
        log::warn!("Environment variables are set and take priority over the saved file.");
    }
    Ok(())
}

pub(crate) fn run_credentials_clear() -> Result<(), CliError> {
    match gameloggr_igdb::remove_from_file()
        .map_err(|e| CliError::config(format!("Failed to remove credentials: {}", e)))?
    {
        Some(path) => log::info!("Removed {}", path.display()),
        None => log::info!("No saved credentials to remove."),
    }
    if gameloggr_igdb::has_credentials() {
        log::warn!("Credentials are still available from environment variables.");
    }
    Ok(())
}

/// Test credentials by requesting a token from Twitch.
pub(crate) fn run_credentials_test(quiet: bool) -> Result<(), CliError> {
    let creds = match Credentials::load() {
        Ok(c) => c,
        Err(e) => {
            log::warn!(
                "{} Failed to load credentials: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e,
            );
            log::warn!("Run 'gameloggr credentials set' to configure credentials.");
            return Ok(());
        }
    };

    log::info!("Testing credentials against IGDB...");
    let client = IgdbClient::new(creds).map_err(|e| CliError::igdb(e.to_string()))?;
    let rt = runtime()?;

    let pb = spinner::start("Connecting...", quiet);
    let result = rt.block_on(client.access_token());
    pb.finish_and_clear();

    match result {
        Ok(_) => log::info!(
            "{} Credentials are valid!",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        ),
        Err(e) => log::warn!(
            "{} Credential validation failed: {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            e,
        ),
    }
    Ok(())
}

/// Print the credentials file path.
pub(crate) fn run_credentials_path() -> Result<(), CliError> {
    match gameloggr_igdb::config_path() {
        Some(path) => log::info!("{}", path.display()),
        None => {
            return Err(CliError::config("Could not determine config directory"));
        }
    }

    Ok(())
}
