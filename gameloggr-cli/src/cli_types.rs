//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use gameloggr_model::{GameStatus, OwnershipStatus};

use crate::commands::{parse_date, parse_ownership, parse_status};

#[derive(Parser)]
#[command(name = "gameloggr")]
#[command(about = "Track a video game collection, backlog, and play sessions", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    /// Path to the collection database (overrides the configured path)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Add, edit, and inspect games
    Game {
        #[command(subcommand)]
        action: GameAction,
    },

    /// Record and review play sessions
    Log {
        #[command(subcommand)]
        action: LogAction,
    },

    /// Manage helpful links attached to a game
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Manage platforms in the local collection
    Platform {
        #[command(subcommand)]
        action: PlatformAction,
    },

    /// Manage consoles and other hardware
    Hardware {
        #[command(subcommand)]
        action: HardwareAction,
    },

    /// Show games that are owned but not completed
    Backlog {
        /// Only show games with this status (e.g., in-progress, on-hold)
        #[arg(long, value_parser = parse_status)]
        status: Option<GameStatus>,
    },

    /// Show wishlisted games
    Wishlist,

    /// Show games that were sold or lent out
    Graveyard,

    /// Show the collection grouped by platform
    Collection {
        /// Only show games whose title contains this text
        #[arg(long)]
        search: Option<String>,
    },

    /// Export the whole collection to a JSON file
    Export {
        /// Output file (defaults to a timestamped file in the export directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import a JSON export into the collection
    Import {
        /// Export file to read
        file: PathBuf,

        /// Clear the collection before importing
        #[arg(long)]
        replace: bool,
    },

    /// Search IGDB for games
    Search {
        /// Game title to search for
        query: String,

        /// Add the Nth result (1-based) to the collection
        #[arg(long)]
        add: Option<usize>,

        /// IGDB platform id to assign to the added game
        #[arg(long, requires = "add")]
        platform: Option<i64>,

        /// Add to the wishlist instead of the collection
        #[arg(long, requires = "add")]
        wishlist: bool,
    },

    /// List platforms known to IGDB
    Platforms {
        /// Only show platforms whose name contains this text
        #[arg(long)]
        filter: Option<String>,

        /// Save the listed platforms into the local collection
        #[arg(long)]
        save: bool,
    },

    /// Show collection statistics
    Stats,

    /// Manage application settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Manage IGDB API credentials
    Credentials {
        #[command(subcommand)]
        action: CredentialsAction,
    },
}

// ── Games ───────────────────────────────────────────────────────────────────

#[derive(Subcommand)]
pub(crate) enum GameAction {
    /// Add a game by hand
    Add {
        /// Game title
        title: String,

        #[command(flatten)]
        fields: GameFields,
    },

    /// Show everything recorded for a game
    Show {
        /// Game id, id prefix, or title
        game: String,
    },

    /// List games with optional filters
    List {
        /// Only games on this platform id
        #[arg(long)]
        platform: Option<i64>,

        /// Only games linked to this hardware
        #[arg(long)]
        hardware: Option<String>,

        /// Only games with this status
        #[arg(long, value_parser = parse_status)]
        status: Option<GameStatus>,

        /// Only games whose title contains this text
        #[arg(long)]
        search: Option<String>,

        /// Include sub-games of collections
        #[arg(long)]
        all: bool,
    },

    /// Change a game's details
    Edit {
        /// Game id, id prefix, or title
        game: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        #[command(flatten)]
        fields: GameFields,
    },

    /// Delete a game and its play log
    Delete {
        /// Game id, id prefix, or title
        game: String,

        /// Confirm the deletion (required; without this, shows preview only)
        #[arg(long)]
        confirm: bool,
    },

    /// Set a game's status (stamps start and completion dates)
    Status {
        /// Game id, id prefix, or title
        game: String,

        /// New status: backlog, in-progress, completed, on-hold, dropped
        #[arg(value_parser = parse_status)]
        status: GameStatus,
    },

    /// Mark a game installed on a piece of hardware
    Install {
        /// Game id, id prefix, or title
        game: String,

        /// Hardware name
        hardware: String,
    },

    /// Clear a game's installation
    Uninstall {
        /// Game id, id prefix, or title
        game: String,
    },

    /// Move a wishlisted game into the collection
    MoveToCollection {
        /// Game id, id prefix, or title
        game: String,
    },

    /// Attach a game to a collection
    AddSub {
        /// The collection game
        collection: String,

        /// The game to attach
        game: String,
    },

    /// Turn a collection back into a plain game
    UnmarkCollection {
        /// Game id, id prefix, or title
        game: String,
    },
}

/// Editable game fields shared by `game add` and `game edit`.
#[derive(Args, Clone, Default)]
pub(crate) struct GameFields {
    /// IGDB platform id
    #[arg(long)]
    pub platform: Option<i64>,

    /// Price paid
    #[arg(long)]
    pub price: Option<f64>,

    /// Retail price
    #[arg(long)]
    pub msrp: Option<f64>,

    /// Purchase date (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_parser = parse_date)]
    pub purchased: Option<DateTime<Utc>>,

    /// Release date (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_parser = parse_date)]
    pub released: Option<DateTime<Utc>>,

    /// Digital copy
    #[arg(long)]
    pub digital: Option<bool>,

    /// Wishlisted
    #[arg(long)]
    pub wishlist: Option<bool>,

    /// Star rating, 0 to 5
    #[arg(long)]
    pub rating: Option<f64>,

    /// Ownership: in-collection, sold, lent-out
    #[arg(long, value_parser = parse_ownership)]
    pub ownership: Option<OwnershipStatus>,

    /// Install size in MB
    #[arg(long)]
    pub size_mb: Option<f64>,

    /// Comma-separated genres
    #[arg(long)]
    pub genres: Option<String>,

    /// Comma-separated developers
    #[arg(long)]
    pub developers: Option<String>,

    /// Comma-separated publishers
    #[arg(long)]
    pub publishers: Option<String>,

    /// Cover art URL
    #[arg(long)]
    pub cover: Option<String>,

    /// Has the original case
    #[arg(long)]
    pub has_case: Option<bool>,

    /// Has the manual
    #[arg(long)]
    pub has_manual: Option<bool>,

    /// Has the inserts
    #[arg(long)]
    pub has_inserts: Option<bool>,

    /// Still sealed
    #[arg(long)]
    pub sealed: Option<bool>,

    /// Total hours played, overriding the play log sum (0 clears)
    #[arg(long)]
    pub hours: Option<f64>,

    /// Your own main-story time to beat, in hours
    #[arg(long)]
    pub hltb_main: Option<f64>,

    /// Your own main + extras time to beat, in hours
    #[arg(long)]
    pub hltb_extra: Option<f64>,

    /// Your own completionist time to beat, in hours
    #[arg(long)]
    pub hltb_completionist: Option<f64>,
}

// ── Play Log & Links ────────────────────────────────────────────────────────

#[derive(Subcommand)]
pub(crate) enum LogAction {
    /// Record a play session
    Add {
        /// Game id, id prefix, or title
        game: String,

        /// Session length in minutes
        #[arg(long)]
        minutes: f64,

        /// Session notes
        #[arg(long, default_value = "")]
        notes: String,

        /// Mark this session as a checkpoint
        #[arg(long)]
        checkpoint: bool,

        /// Checkpoint title
        #[arg(long)]
        title: Option<String>,

        /// When the session happened (defaults to now)
        #[arg(long, value_parser = parse_date)]
        at: Option<DateTime<Utc>>,
    },

    /// List a game's play sessions, newest first
    List {
        /// Game id, id prefix, or title
        game: String,

        /// Only checkpoints
        #[arg(long, conflicts_with = "normal")]
        checkpoints: bool,

        /// Only sessions that are not checkpoints
        #[arg(long)]
        normal: bool,
    },

    /// Delete a play session by its id
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub(crate) enum LinkAction {
    /// Attach a link to a game
    Add {
        /// Game id, id prefix, or title
        game: String,

        /// Link name
        name: String,

        /// Link URL
        url: String,
    },

    /// Delete a link by its id
    Delete { id: i64 },
}

// ── Platforms & Hardware ────────────────────────────────────────────────────

#[derive(Subcommand)]
pub(crate) enum PlatformAction {
    /// List platforms in the local collection
    List,

    /// Add or rename a platform
    Add {
        /// IGDB platform id
        id: i64,

        /// Platform name
        name: String,

        /// Logo URL
        #[arg(long)]
        logo: Option<String>,
    },
}

#[derive(Subcommand)]
pub(crate) enum HardwareAction {
    /// Add or update a piece of hardware
    Add {
        /// Hardware name (unique)
        name: String,

        /// IGDB platform id
        #[arg(long)]
        platform: Option<i64>,

        /// Serial number
        #[arg(long)]
        serial: Option<String>,

        /// Price paid
        #[arg(long, default_value = "0")]
        price: f64,

        /// Retail price
        #[arg(long, default_value = "0")]
        msrp: f64,

        /// Purchase date (defaults to today)
        #[arg(long, value_parser = parse_date)]
        purchased: Option<DateTime<Utc>>,

        /// Release date
        #[arg(long, value_parser = parse_date)]
        released: Option<DateTime<Utc>>,

        /// Internal storage in GB
        #[arg(long, default_value = "0")]
        internal_gb: f64,

        /// External storage in GB
        #[arg(long, default_value = "0")]
        external_gb: f64,
    },

    /// List hardware with storage usage
    List,

    /// Show one piece of hardware and the games installed on it
    Show { name: String },

    /// Delete a piece of hardware (installed games are uninstalled)
    Delete {
        name: String,

        /// Confirm the deletion (required; without this, shows preview only)
        #[arg(long)]
        confirm: bool,
    },
}

// ── Settings ────────────────────────────────────────────────────────────────

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current settings
    Show,

    /// Print the settings file path
    Path,

    /// Set the collection database path
    SetDb { path: PathBuf },

    /// Set the default directory for exports
    SetExportDir { path: PathBuf },
}

#[derive(Subcommand)]
pub(crate) enum CredentialsAction {
    /// Show current credentials and their sources
    Show,

    /// Save credentials to the config file (prompts for missing values)
    Set {
        #[arg(long)]
        client_id: Option<String>,

        #[arg(long)]
        client_secret: Option<String>,
    },

    /// Delete the saved credentials file
    Clear,

    /// Test credentials against IGDB
    Test,

    /// Print the credentials file path
    Path,
}
