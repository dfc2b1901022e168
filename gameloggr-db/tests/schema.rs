use gameloggr_db::open_memory;
use gameloggr_db::schema::{create_schema, get_schema_version, migrate, open_database, CURRENT_VERSION};

#[test]
fn create_schema_in_memory() {
    let conn = open_memory().unwrap();
    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(version, CURRENT_VERSION);
}

#[test]
fn schema_is_idempotent() {
    let conn = open_memory().unwrap();
    create_schema(&conn).unwrap();
}

#[test]
fn foreign_keys_enabled() {
    let conn = open_memory().unwrap();
    let fk: i32 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(fk, 1);
}

#[test]
fn all_tables_exist() {
    let conn = open_memory().unwrap();
    let tables = [
        "schema_version",
        "platforms",
        "hardware",
        "games",
        "play_log",
        "helpful_links",
    ];
    for table in tables {
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert!(exists, "table {table} should exist");
    }
}

#[test]
fn open_database_creates_file_and_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("collection.db");
    {
        let conn = open_database(&path).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
    }
    assert!(path.exists());

    // Reopening an up-to-date database leaves the version alone
    let conn = open_database(&path).unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
}

#[test]
fn migrate_from_v1_adds_reference_time_columns() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE schema_version (
             version INTEGER NOT NULL,
             applied_at TEXT NOT NULL DEFAULT (datetime('now'))
         );
         INSERT INTO schema_version (version) VALUES (1);
         CREATE TABLE games (id TEXT PRIMARY KEY, title TEXT NOT NULL);",
    )
    .unwrap();

    migrate(&conn, 1).unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);

    conn.execute("INSERT INTO games (id, title) VALUES ('g1', 'Okami')", [])
        .unwrap();
    let hltb: f64 = conn
        .query_row("SELECT hltb_main FROM games WHERE id = 'g1'", [], |r| r.get(0))
        .unwrap();
    assert_eq!(hltb, 0.0);
}

#[test]
fn migrate_rejects_newer_database() {
    let conn = open_memory().unwrap();
    assert!(migrate(&conn, CURRENT_VERSION + 1).is_err());
}
