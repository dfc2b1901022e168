//! Read queries for the collection database.
//!
//! Provides lookups by id, filtered game listings (backlog, wishlist,
//! graveyard, search), storage usage, and whole-collection loading.

use std::collections::BTreeMap;

use gameloggr_model::*;
use rusqlite::types::{ToSql, Type};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::operations::OperationError;

const GAME_COLUMNS: &str = "id, title, cover_art_url, platform_id, purchase_date, is_digital,
    purchase_price, msrp, status, start_date, completion_date,
    hltb_main, hltb_extra, hltb_completionist,
    user_hltb_main, user_hltb_extra, user_hltb_completionist,
    manually_set_total_time, star_rating, is_wishlisted, ownership_status,
    has_case, has_manual, has_inserts, is_sealed, is_installed, game_size_mb,
    linked_hardware, release_date, genres, developers, publishers,
    is_sub_game, parent_collection_id, is_collection";

const HARDWARE_COLUMNS: &str = "name, platform_id, serial_number, purchase_price,
    purchase_date, msrp, release_date, internal_storage_gb, external_storage_gb";

// ── Game Lookups ────────────────────────────────────────────────────────────

/// Find a game by id, including its play log and links.
pub fn find_game(conn: &Connection, id: Uuid) -> Result<Option<Game>, OperationError> {
    let sql = format!("SELECT {GAME_COLUMNS} FROM games WHERE id = ?1");
    let result = conn.query_row(&sql, params![id.to_string()], row_to_game);
    match result {
        Ok(mut game) => {
            load_children(conn, &mut game)?;
            Ok(Some(game))
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Find games whose title matches exactly (case-insensitive).
pub fn find_games_by_title(conn: &Connection, title: &str) -> Result<Vec<Game>, OperationError> {
    let sql = format!("SELECT {GAME_COLUMNS} FROM games WHERE title = ?1 COLLATE NOCASE");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![title], row_to_game)?;
    let mut games = rows.collect::<Result<Vec<_>, _>>()?;
    for game in &mut games {
        load_children(conn, game)?;
    }
    Ok(games)
}

/// Filter for [`list_games`]. Unset fields don't constrain the result.
#[derive(Debug, Clone, Default)]
pub struct GameFilter {
    pub wishlisted: Option<bool>,
    pub status: Option<GameStatus>,
    /// Skip games with this status.
    pub exclude_status: Option<GameStatus>,
    /// `Some(true)` keeps only games still owned; `Some(false)` only sold/lent ones.
    pub owned: Option<bool>,
    pub include_sub_games: bool,
    pub platform_id: Option<i64>,
    pub hardware: Option<String>,
    /// Case-insensitive substring match on the title.
    pub title_contains: Option<String>,
}

/// List games matching a filter, ordered by title.
pub fn list_games(conn: &Connection, filter: &GameFilter) -> Result<Vec<Game>, OperationError> {
    let mut conditions: Vec<String> = Vec::new();
    let mut values: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(wishlisted) = filter.wishlisted {
        values.push(Box::new(wishlisted));
        conditions.push(format!("is_wishlisted = ?{}", values.len()));
    }
    if let Some(status) = filter.status {
        values.push(Box::new(status.as_str()));
        conditions.push(format!("status = ?{}", values.len()));
    }
    if let Some(status) = filter.exclude_status {
        values.push(Box::new(status.as_str()));
        conditions.push(format!("status != ?{}", values.len()));
    }
    if let Some(owned) = filter.owned {
        values.push(Box::new(OwnershipStatus::Owned.as_str()));
        let op = if owned { "=" } else { "!=" };
        conditions.push(format!("ownership_status {op} ?{}", values.len()));
    }
    if !filter.include_sub_games {
        conditions.push("is_sub_game = 0".to_string());
    }
    if let Some(platform_id) = filter.platform_id {
        values.push(Box::new(platform_id));
        conditions.push(format!("platform_id = ?{}", values.len()));
    }
    if let Some(ref hardware) = filter.hardware {
        values.push(Box::new(hardware.clone()));
        conditions.push(format!("linked_hardware = ?{}", values.len()));
    }
    if let Some(ref text) = filter.title_contains {
        values.push(Box::new(format!("%{}%", text.to_lowercase())));
        conditions.push(format!("LOWER(title) LIKE ?{}", values.len()));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    let sql = format!("SELECT {GAME_COLUMNS} FROM games {where_clause} ORDER BY title COLLATE NOCASE");

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn ToSql> = values.iter().map(|v| v.as_ref()).collect();
    let rows = stmt.query_map(params.as_slice(), row_to_game)?;
    let mut games = rows.collect::<Result<Vec<_>, _>>()?;
    for game in &mut games {
        load_children(conn, game)?;
    }
    Ok(games)
}

/// Non-wishlisted top-level games that aren't completed, whatever their
/// ownership, optionally narrowed to one status.
pub fn backlog(
    conn: &Connection,
    status: Option<GameStatus>,
) -> Result<Vec<Game>, OperationError> {
    list_games(
        conn,
        &GameFilter {
            wishlisted: Some(false),
            exclude_status: Some(GameStatus::Completed),
            status,
            ..Default::default()
        },
    )
}

pub fn wishlist(conn: &Connection) -> Result<Vec<Game>, OperationError> {
    list_games(
        conn,
        &GameFilter {
            wishlisted: Some(true),
            include_sub_games: true,
            ..Default::default()
        },
    )
}

/// Games that have left the collection (sold or lent out).
pub fn graveyard(conn: &Connection) -> Result<Vec<Game>, OperationError> {
    list_games(
        conn,
        &GameFilter {
            owned: Some(false),
            include_sub_games: true,
            ..Default::default()
        },
    )
}

/// Owned, non-wishlisted top-level games grouped by platform name.
///
/// Games without a platform are left out. Groups are sorted by platform
/// name and games by title.
pub fn collection_by_platform(
    conn: &Connection,
    title_contains: Option<&str>,
) -> Result<Vec<(Platform, Vec<Game>)>, OperationError> {
    let games = list_games(
        conn,
        &GameFilter {
            wishlisted: Some(false),
            owned: Some(true),
            title_contains: title_contains.map(str::to_string),
            ..Default::default()
        },
    )?;

    let platforms: BTreeMap<i64, Platform> = list_platforms(conn)?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    let mut groups: BTreeMap<(String, i64), (Platform, Vec<Game>)> = BTreeMap::new();
    for game in games {
        let Some(platform) = game.platform_id.and_then(|id| platforms.get(&id)) else {
            continue;
        };
        groups
            .entry((platform.name.clone(), platform.id))
            .or_insert_with(|| (platform.clone(), Vec::new()))
            .1
            .push(game);
    }
    Ok(groups.into_values().collect())
}

/// Sub-games attached to a collection.
pub fn sub_games(conn: &Connection, parent: Uuid) -> Result<Vec<Game>, OperationError> {
    let sql = format!(
        "SELECT {GAME_COLUMNS} FROM games WHERE parent_collection_id = ?1 ORDER BY title COLLATE NOCASE"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![parent.to_string()], row_to_game)?;
    let mut games = rows.collect::<Result<Vec<_>, _>>()?;
    for game in &mut games {
        load_children(conn, game)?;
    }
    Ok(games)
}

// ── Play Log & Links ────────────────────────────────────────────────────────

/// Play log for a game, newest first.
pub fn play_log_for_game(
    conn: &Connection,
    game_id: Uuid,
) -> Result<Vec<PlayLogEntry>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, timestamp, time_spent, notes, checkpoint, title
         FROM play_log WHERE game_id = ?1 ORDER BY timestamp DESC, id DESC",
    )?;
    let rows = stmt.query_map(params![game_id.to_string()], |row| {
        Ok(PlayLogEntry {
            id: Some(row.get(0)?),
            timestamp: row.get(1)?,
            time_spent: row.get(2)?,
            notes: row.get(3)?,
            checkpoint: row.get(4)?,
            title: row.get(5)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn links_for_game(
    conn: &Connection,
    game_id: Uuid,
) -> Result<Vec<HelpfulLink>, OperationError> {
    let mut stmt =
        conn.prepare("SELECT id, name, url FROM helpful_links WHERE game_id = ?1 ORDER BY id")?;
    let rows = stmt.query_map(params![game_id.to_string()], |row| {
        Ok(HelpfulLink {
            id: Some(row.get(0)?),
            name: row.get(1)?,
            url: row.get(2)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

fn load_children(conn: &Connection, game: &mut Game) -> Result<(), OperationError> {
    game.play_log = play_log_for_game(conn, game.id)?;
    game.helpful_links = links_for_game(conn, game.id)?;
    Ok(())
}

// ── Platform & Hardware Queries ─────────────────────────────────────────────

/// List all platforms by name.
pub fn list_platforms(conn: &Connection) -> Result<Vec<Platform>, OperationError> {
    let mut stmt = conn.prepare("SELECT id, name, logo_url FROM platforms ORDER BY name")?;
    let rows = stmt.query_map([], row_to_platform)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn find_platform(conn: &Connection, id: i64) -> Result<Option<Platform>, OperationError> {
    let result = conn.query_row(
        "SELECT id, name, logo_url FROM platforms WHERE id = ?1",
        params![id],
        row_to_platform,
    );
    match result {
        Ok(platform) => Ok(Some(platform)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// List all hardware by name.
pub fn list_hardware(conn: &Connection) -> Result<Vec<Hardware>, OperationError> {
    let sql = format!("SELECT {HARDWARE_COLUMNS} FROM hardware ORDER BY name");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], row_to_hardware)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn find_hardware(conn: &Connection, name: &str) -> Result<Option<Hardware>, OperationError> {
    let sql = format!("SELECT {HARDWARE_COLUMNS} FROM hardware WHERE name = ?1");
    let result = conn.query_row(&sql, params![name], row_to_hardware);
    match result {
        Ok(hw) => Ok(Some(hw)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Storage usage for a piece of hardware, optionally ignoring one game
/// (used when re-checking a game that is already installed there).
pub fn hardware_usage(
    conn: &Connection,
    name: &str,
    exclude: Option<Uuid>,
) -> Result<HardwareUsage, OperationError> {
    let hardware =
        find_hardware(conn, name)?.ok_or_else(|| OperationError::not_found("hardware", name))?;
    let games = list_games(
        conn,
        &GameFilter {
            hardware: Some(name.to_string()),
            include_sub_games: true,
            ..Default::default()
        },
    )?;
    Ok(HardwareUsage::compute(
        &hardware,
        games.iter().filter(|g| Some(g.id) != exclude),
    ))
}

// ── Whole Collection ────────────────────────────────────────────────────────

/// Every game, platform, and hardware item in the store.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    pub games: Vec<Game>,
    pub platforms: Vec<Platform>,
    pub hardware: Vec<Hardware>,
}

impl Collection {
    pub fn stats(&self) -> CollectionStats {
        CollectionStats::compute(&self.games, &self.hardware, &self.platforms)
    }
}

pub fn load_collection(conn: &Connection) -> Result<Collection, OperationError> {
    Ok(Collection {
        games: list_games(
            conn,
            &GameFilter {
                include_sub_games: true,
                ..Default::default()
            },
        )?,
        platforms: list_platforms(conn)?,
        hardware: list_hardware(conn)?,
    })
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Row counts for the collection database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionCounts {
    pub games: i64,
    pub wishlisted: i64,
    pub platforms: i64,
    pub hardware: i64,
    pub play_log_entries: i64,
    pub helpful_links: i64,
}

pub fn collection_counts(conn: &Connection) -> Result<CollectionCounts, OperationError> {
    let games: i64 = conn.query_row("SELECT COUNT(*) FROM games", [], |r| r.get(0))?;
    let wishlisted: i64 = conn.query_row(
        "SELECT COUNT(*) FROM games WHERE is_wishlisted = 1",
        [],
        |r| r.get(0),
    )?;
    let platforms: i64 = conn.query_row("SELECT COUNT(*) FROM platforms", [], |r| r.get(0))?;
    let hardware: i64 = conn.query_row("SELECT COUNT(*) FROM hardware", [], |r| r.get(0))?;
    let play_log_entries: i64 = conn.query_row("SELECT COUNT(*) FROM play_log", [], |r| r.get(0))?;
    let helpful_links: i64 =
        conn.query_row("SELECT COUNT(*) FROM helpful_links", [], |r| r.get(0))?;

    Ok(CollectionCounts {
        games,
        wishlisted,
        platforms,
        hardware,
        play_log_entries,
        helpful_links,
    })
}

// ── Row Mapping ─────────────────────────────────────────────────────────────

fn parse_uuid(idx: usize, value: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn row_to_game(row: &rusqlite::Row<'_>) -> rusqlite::Result<Game> {
    let id: String = row.get(0)?;
    let status: String = row.get(8)?;
    let ownership: String = row.get(20)?;
    let genres: String = row.get(29)?;
    let developers: String = row.get(30)?;
    let publishers: String = row.get(31)?;
    let parent: Option<String> = row.get(33)?;

    Ok(Game {
        id: parse_uuid(0, &id)?,
        title: row.get(1)?,
        cover_art_url: row.get(2)?,
        platform_id: row.get(3)?,
        purchase_date: row.get(4)?,
        is_digital: row.get(5)?,
        purchase_price: row.get(6)?,
        msrp: row.get(7)?,
        status: GameStatus::from_str_loose(&status),
        start_date: row.get(9)?,
        completion_date: row.get(10)?,
        hltb_main: row.get(11)?,
        hltb_extra: row.get(12)?,
        hltb_completionist: row.get(13)?,
        user_hltb_main: row.get(14)?,
        user_hltb_extra: row.get(15)?,
        user_hltb_completionist: row.get(16)?,
        manually_set_total_time: row.get(17)?,
        star_rating: row.get(18)?,
        is_wishlisted: row.get(19)?,
        ownership_status: OwnershipStatus::from_str_loose(&ownership),
        has_case: row.get(21)?,
        has_manual: row.get(22)?,
        has_inserts: row.get(23)?,
        is_sealed: row.get(24)?,
        is_installed: row.get(25)?,
        game_size_mb: row.get(26)?,
        linked_hardware: row.get(27)?,
        release_date: row.get(28)?,
        genres: split_list(&genres),
        developers: split_list(&developers),
        publishers: split_list(&publishers),
        is_sub_game: row.get(32)?,
        parent_collection_id: parent.as_deref().map(|p| parse_uuid(33, p)).transpose()?,
        is_collection: row.get(34)?,
        play_log: Vec::new(),
        helpful_links: Vec::new(),
    })
}

fn row_to_platform(row: &rusqlite::Row<'_>) -> rusqlite::Result<Platform> {
    Ok(Platform {
        id: row.get(0)?,
        name: row.get(1)?,
        logo_url: row.get(2)?,
    })
}

fn row_to_hardware(row: &rusqlite::Row<'_>) -> rusqlite::Result<Hardware> {
    Ok(Hardware {
        name: row.get(0)?,
        platform_id: row.get(1)?,
        serial_number: row.get(2)?,
        purchase_price: row.get(3)?,
        purchase_date: row.get(4)?,
        msrp: row.get(5)?,
        release_date: row.get(6)?,
        internal_storage_gb: row.get(7)?,
        external_storage_gb: row.get(8)?,
    })
}
