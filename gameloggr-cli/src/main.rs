//! gameloggr CLI
//!
//! Command-line interface for cataloging a video game collection.

mod cli_types;
mod commands;
mod error;
mod settings;
mod spinner;

use std::io::Write;
use std::path::Path;

use clap::Parser;
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cli_types::*;
pub(crate) use error::CliError;

/// Environment variable that overrides the log filter (env_logger syntax).
const LOG_ENV: &str = "GAMELOGGR_LOG";

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logger(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("error: failed to set up logging: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let db = cli.db.as_deref();
    let quiet = cli.quiet;

    match cli.command {
        Commands::Game { action } => commands::game::run(db, action),
        Commands::Log { action } => commands::playlog::run(db, action),
        Commands::Link { action } => commands::link::run(db, action),
        Commands::Platform { action } => commands::platform::run(db, action),
        Commands::Hardware { action } => commands::hardware::run(db, action),
        Commands::Backlog { status } => commands::views::run_backlog(db, status),
        Commands::Wishlist => commands::views::run_wishlist(db),
        Commands::Graveyard => commands::views::run_graveyard(db),
        Commands::Collection { search } => commands::views::run_collection(db, search.as_deref()),
        Commands::Export { output } => commands::transfer::run_export(db, output),
        Commands::Import { file, replace } => commands::transfer::run_import(db, &file, replace),
        Commands::Search {
            query,
            add,
            platform,
            wishlist,
        } => commands::search::run_search(db, &query, add, platform, wishlist, quiet),
        Commands::Platforms { filter, save } => {
            commands::search::run_platforms(db, filter.as_deref(), save, quiet)
        }
        Commands::Stats => commands::stats::run_stats(db),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(db),
            ConfigAction::Path => commands::config::run_config_path(),
            ConfigAction::SetDb { path } => commands::config::run_config_set_db(path),
            ConfigAction::SetExportDir { path } => commands::config::run_config_set_export_dir(path),
        },
        Commands::Credentials { action } => match action {
            CredentialsAction::Show => commands::credentials::run_credentials_show(),
            CredentialsAction::Set {
                client_id,
                client_secret,
            } => commands::credentials::run_credentials_set(client_id, client_secret),
            CredentialsAction::Clear => commands::credentials::run_credentials_clear(),
            CredentialsAction::Test => commands::credentials::run_credentials_test(quiet),
            CredentialsAction::Path => commands::credentials::run_credentials_path(),
        },
    }
}

/// Print an empty line through the logger so it also reaches the log file.
pub(crate) fn log_blank() {
    log::info!("");
}

/// Install the global logger.
///
/// Normal output is info level without decoration. `--verbose` adds debug
/// messages with timestamps and targets, `--quiet` keeps only warnings and
/// errors. `GAMELOGGR_LOG` can override either.
fn init_logger(quiet: bool, verbose: bool, logfile: Option<&Path>) -> Result<(), CliError> {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_env(LOG_ENV);

    builder.format(move |buf, record| {
        if verbose {
            write!(
                buf,
                "{} {} ",
                chrono::Local::now()
                    .format("%H:%M:%S%.3f")
                    .if_supports_color(Stdout, |t| t.dimmed()),
                record.target().if_supports_color(Stdout, |t| t.dimmed()),
            )?;
        }
        match record.level() {
            Level::Error => write!(buf, "{} ", "error:".if_supports_color(Stdout, |t| t.red()))?,
            Level::Warn => write!(
                buf,
                "{} ",
                "warning:".if_supports_color(Stdout, |t| t.yellow())
            )?,
            _ => {}
        }
        writeln!(buf, "{}", record.args())
    });

    match logfile {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            builder.target(env_logger::Target::Pipe(Box::new(Tee {
                stdout: std::io::stdout(),
                file: strip_ansi_escapes::Writer::new(file),
            })));
        }
        None => {
            builder.target(env_logger::Target::Stdout);
        }
    }

    builder
        .try_init()
        .map_err(|e| CliError::config(format!("Logger already initialized: {e}")))
}

/// Writes everything to stdout and a second, ANSI-stripped sink.
struct Tee<F: Write> {
    stdout: std::io::Stdout,
    file: F,
}

impl<F: Write> Write for Tee<F> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.stdout.write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.stdout.flush()?;
        self.file.flush()
    }
}
