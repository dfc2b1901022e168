//! SQLite schema creation and migration.

use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Migration error: expected version {expected}, found {found}")]
    VersionMismatch { expected: i32, found: i32 },
}

/// Current schema version. Increment when adding migrations.
pub const CURRENT_VERSION: i32 = 2;

/// Create all tables and indexes if they don't exist.
///
/// This is idempotent and safe to call on an existing database.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    set_schema_version(conn, CURRENT_VERSION)?;
    Ok(())
}

/// Open or create a collection database at the given path.
pub fn open_database(path: &std::path::Path) -> Result<Connection, SchemaError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;

    let version = get_schema_version(&conn)?;
    if version == 0 {
        create_schema(&conn)?;
    } else if version != CURRENT_VERSION {
        migrate(&conn, version)?;
    }

    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Get the current schema version, or 0 if no schema exists.
pub fn get_schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Record a schema version.
fn set_schema_version(conn: &Connection, version: i32) -> Result<(), SchemaError> {
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Run migrations from `from_version` up to `CURRENT_VERSION`.
pub fn migrate(conn: &Connection, from_version: i32) -> Result<(), SchemaError> {
    if from_version > CURRENT_VERSION {
        return Err(SchemaError::VersionMismatch {
            expected: CURRENT_VERSION,
            found: from_version,
        });
    }

    let mut version = from_version;
    while version < CURRENT_VERSION {
        if version == 1 {
            // Reference time-to-beat values from the metadata source
            conn.execute_batch(
                "ALTER TABLE games ADD COLUMN hltb_main REAL NOT NULL DEFAULT 0;
                 ALTER TABLE games ADD COLUMN hltb_extra REAL NOT NULL DEFAULT 0;
                 ALTER TABLE games ADD COLUMN hltb_completionist REAL NOT NULL DEFAULT 0;",
            )?;
        }
        version += 1;
        set_schema_version(conn, version)?;
    }

    Ok(())
}

const SCHEMA_SQL: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Platforms, keyed by IGDB platform id
CREATE TABLE IF NOT EXISTS platforms (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    logo_url TEXT
);

-- Consoles and devices, keyed by name
CREATE TABLE IF NOT EXISTS hardware (
    name TEXT PRIMARY KEY,
    platform_id INTEGER REFERENCES platforms(id) ON DELETE SET NULL,
    serial_number TEXT,
    purchase_price REAL NOT NULL DEFAULT 0,
    purchase_date TEXT NOT NULL,
    msrp REAL NOT NULL DEFAULT 0,
    release_date TEXT,
    internal_storage_gb REAL NOT NULL DEFAULT 0,
    external_storage_gb REAL NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS games (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    cover_art_url TEXT,
    platform_id INTEGER REFERENCES platforms(id) ON DELETE SET NULL,
    purchase_date TEXT NOT NULL,
    is_digital BOOLEAN NOT NULL DEFAULT 0,
    purchase_price REAL NOT NULL DEFAULT 0,
    msrp REAL NOT NULL DEFAULT 0,
    status TEXT NOT NULL DEFAULT 'Backlog',
    start_date TEXT,
    completion_date TEXT,
    hltb_main REAL NOT NULL DEFAULT 0,
    hltb_extra REAL NOT NULL DEFAULT 0,
    hltb_completionist REAL NOT NULL DEFAULT 0,
    user_hltb_main REAL NOT NULL DEFAULT 0,
    user_hltb_extra REAL NOT NULL DEFAULT 0,
    user_hltb_completionist REAL NOT NULL DEFAULT 0,
    manually_set_total_time REAL NOT NULL DEFAULT 0,
    star_rating REAL NOT NULL DEFAULT 0,
    is_wishlisted BOOLEAN NOT NULL DEFAULT 0,
    ownership_status TEXT NOT NULL DEFAULT 'In Collection',
    has_case BOOLEAN NOT NULL DEFAULT 0,
    has_manual BOOLEAN NOT NULL DEFAULT 0,
    has_inserts BOOLEAN NOT NULL DEFAULT 0,
    is_sealed BOOLEAN NOT NULL DEFAULT 0,
    is_installed BOOLEAN NOT NULL DEFAULT 0,
    game_size_mb REAL NOT NULL DEFAULT 0,
    linked_hardware TEXT REFERENCES hardware(name) ON DELETE SET NULL,
    release_date TEXT,
    genres TEXT NOT NULL DEFAULT '',
    developers TEXT NOT NULL DEFAULT '',
    publishers TEXT NOT NULL DEFAULT '',
    is_sub_game BOOLEAN NOT NULL DEFAULT 0,
    parent_collection_id TEXT REFERENCES games(id) ON DELETE SET NULL,
    is_collection BOOLEAN NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
CREATE INDEX IF NOT EXISTS idx_games_platform ON games(platform_id);
CREATE INDEX IF NOT EXISTS idx_games_hardware ON games(linked_hardware);
CREATE INDEX IF NOT EXISTS idx_games_parent ON games(parent_collection_id);
CREATE INDEX IF NOT EXISTS idx_games_title ON games(title COLLATE NOCASE);

-- Play sessions; time_spent is in seconds
CREATE TABLE IF NOT EXISTS play_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    game_id TEXT NOT NULL REFERENCES games(id) ON DELETE CASCADE,
    timestamp TEXT NOT NULL,
    time_spent REAL NOT NULL DEFAULT 0,
    notes TEXT NOT NULL DEFAULT '',
    checkpoint BOOLEAN NOT NULL DEFAULT 0,
    title TEXT
);
CREATE INDEX IF NOT EXISTS idx_play_log_game ON play_log(game_id);

CREATE TABLE IF NOT EXISTS helpful_links (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    game_id TEXT NOT NULL REFERENCES games(id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    url TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_helpful_links_game ON helpful_links(game_id);
"#;
