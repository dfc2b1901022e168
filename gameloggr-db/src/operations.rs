//! CRUD operations for all collection entity types.

use chrono::{DateTime, Utc};
use gameloggr_model::*;
use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;
use uuid::Uuid;

use crate::queries::{find_game, find_hardware, hardware_usage, sub_games};

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
    #[error("{0}")]
    Rule(#[from] ModelError),
}

impl OperationError {
    pub(crate) fn not_found(entity_type: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }
}

// ── Platform Operations ─────────────────────────────────────────────────────

/// Insert or update a platform.
pub fn upsert_platform(conn: &Connection, platform: &Platform) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO platforms (id, name, logo_url)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(id) DO UPDATE SET
             name = excluded.name,
             logo_url = COALESCE(excluded.logo_url, platforms.logo_url)",
        params![platform.id, platform.name, platform.logo_url],
    )?;
    Ok(())
}

/// Insert a platform unless one with the same id exists. Returns true if inserted.
pub fn insert_platform_if_absent(
    conn: &Connection,
    platform: &Platform,
) -> Result<bool, OperationError> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO platforms (id, name, logo_url) VALUES (?1, ?2, ?3)",
        params![platform.id, platform.name, platform.logo_url],
    )?;
    Ok(inserted > 0)
}

// ── Hardware Operations ─────────────────────────────────────────────────────

/// Insert hardware unless an item with the same name exists. Returns true if inserted.
pub fn insert_hardware_if_absent(
    conn: &Connection,
    hardware: &Hardware,
) -> Result<bool, OperationError> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO hardware (name, platform_id, serial_number, purchase_price,
             purchase_date, msrp, release_date, internal_storage_gb, external_storage_gb)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            hardware.name,
            hardware.platform_id,
            hardware.serial_number,
            hardware.purchase_price,
            hardware.purchase_date,
            hardware.msrp,
            hardware.release_date,
            hardware.internal_storage_gb,
            hardware.external_storage_gb,
        ],
    )?;
    Ok(inserted > 0)
}

/// Insert or update hardware by name.
///
/// Shrinking existing hardware below the space its installed games take is
/// rejected.
pub fn upsert_hardware(conn: &Connection, hardware: &Hardware) -> Result<(), OperationError> {
    if find_hardware(conn, &hardware.name)?.is_some() {
        let usage = hardware_usage(conn, &hardware.name, None)?;
        check_capacity(&usage, hardware.total_storage_gb())?;
    }
    conn.execute(
        "INSERT INTO hardware (name, platform_id, serial_number, purchase_price,
             purchase_date, msrp, release_date, internal_storage_gb, external_storage_gb)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
         ON CONFLICT(name) DO UPDATE SET
             platform_id = excluded.platform_id,
             serial_number = excluded.serial_number,
             purchase_price = excluded.purchase_price,
             purchase_date = excluded.purchase_date,
             msrp = excluded.msrp,
             release_date = excluded.release_date,
             internal_storage_gb = excluded.internal_storage_gb,
             external_storage_gb = excluded.external_storage_gb",
        params![
            hardware.name,
            hardware.platform_id,
            hardware.serial_number,
            hardware.purchase_price,
            hardware.purchase_date,
            hardware.msrp,
            hardware.release_date,
            hardware.internal_storage_gb,
            hardware.external_storage_gb,
        ],
    )?;
    Ok(())
}

/// Delete hardware. Games installed on it are marked uninstalled.
pub fn delete_hardware(conn: &Connection, name: &str) -> Result<(), OperationError> {
    conn.execute(
        "UPDATE games SET is_installed = 0, linked_hardware = NULL, updated_at = datetime('now')
         WHERE linked_hardware = ?1",
        params![name],
    )?;
    let deleted = conn.execute("DELETE FROM hardware WHERE name = ?1", params![name])?;
    if deleted == 0 {
        return Err(OperationError::not_found("hardware", name));
    }
    Ok(())
}

// ── Game Operations ─────────────────────────────────────────────────────────

/// Insert a new game together with its play log and helpful links.
pub fn insert_game(conn: &Connection, game: &Game) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO games (id, title, cover_art_url, platform_id, purchase_date, is_digital,
             purchase_price, msrp, status, start_date, completion_date,
             hltb_main, hltb_extra, hltb_completionist,
             user_hltb_main, user_hltb_extra, user_hltb_completionist,
             manually_set_total_time, star_rating, is_wishlisted, ownership_status,
             has_case, has_manual, has_inserts, is_sealed, is_installed, game_size_mb,
             linked_hardware, release_date, genres, developers, publishers,
             is_sub_game, parent_collection_id, is_collection)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17,
             ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28, ?29, ?30, ?31, ?32,
             ?33, ?34, ?35)",
        params![
            game.id.to_string(),
            game.title,
            game.cover_art_url,
            game.platform_id,
            game.purchase_date,
            game.is_digital,
            game.purchase_price,
            game.msrp,
            game.status.as_str(),
            game.start_date,
            game.completion_date,
            game.hltb_main,
            game.hltb_extra,
            game.hltb_completionist,
            game.user_hltb_main,
            game.user_hltb_extra,
            game.user_hltb_completionist,
            game.manually_set_total_time,
            game.star_rating,
            game.is_wishlisted,
            game.ownership_status.as_str(),
            game.has_case,
            game.has_manual,
            game.has_inserts,
            game.is_sealed,
            game.is_installed,
            game.game_size_mb,
            game.linked_hardware,
            game.release_date,
            join_list(&game.genres),
            join_list(&game.developers),
            join_list(&game.publishers),
            game.is_sub_game,
            game.parent_collection_id.map(|id| id.to_string()),
            game.is_collection,
        ],
    )?;

    for entry in &game.play_log {
        add_play_log_entry(conn, game.id, entry)?;
    }
    for link in &game.helpful_links {
        add_helpful_link(conn, game.id, link)?;
    }
    Ok(())
}

/// Update a game's own fields. The play log and links are left untouched.
///
/// An installed game whose size or hardware changes must still fit.
pub fn update_game(conn: &Connection, game: &Game) -> Result<(), OperationError> {
    if let (true, Some(hardware)) = (game.is_installed, game.linked_hardware.as_deref()) {
        let stored: Option<(bool, Option<String>, f64)> = conn
            .query_row(
                "SELECT is_installed, linked_hardware, game_size_mb FROM games WHERE id = ?1",
                params![game.id.to_string()],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;
        let unchanged = matches!(
            &stored,
            Some((true, Some(name), size)) if name == hardware && *size == game.game_size_mb
        );
        if stored.is_some() && !unchanged {
            let usage = hardware_usage(conn, hardware, Some(game.id))?;
            check_install_fits(&usage, game)?;
        }
    }
    let updated = conn.execute(
        "UPDATE games SET
             title = ?2, cover_art_url = ?3, platform_id = ?4, purchase_date = ?5,
             is_digital = ?6, purchase_price = ?7, msrp = ?8, status = ?9,
             start_date = ?10, completion_date = ?11,
             hltb_main = ?12, hltb_extra = ?13, hltb_completionist = ?14,
             user_hltb_main = ?15, user_hltb_extra = ?16, user_hltb_completionist = ?17,
             manually_set_total_time = ?18, star_rating = ?19, is_wishlisted = ?20,
             ownership_status = ?21, has_case = ?22, has_manual = ?23, has_inserts = ?24,
             is_sealed = ?25, is_installed = ?26, game_size_mb = ?27, linked_hardware = ?28,
             release_date = ?29, genres = ?30, developers = ?31, publishers = ?32,
             is_sub_game = ?33, parent_collection_id = ?34, is_collection = ?35,
             updated_at = datetime('now')
         WHERE id = ?1",
        params![
            game.id.to_string(),
            game.title,
            game.cover_art_url,
            game.platform_id,
            game.purchase_date,
            game.is_digital,
            game.purchase_price,
            game.msrp,
            game.status.as_str(),
            game.start_date,
            game.completion_date,
            game.hltb_main,
            game.hltb_extra,
            game.hltb_completionist,
            game.user_hltb_main,
            game.user_hltb_extra,
            game.user_hltb_completionist,
            game.manually_set_total_time,
            game.star_rating,
            game.is_wishlisted,
            game.ownership_status.as_str(),
            game.has_case,
            game.has_manual,
            game.has_inserts,
            game.is_sealed,
            game.is_installed,
            game.game_size_mb,
            game.linked_hardware,
            game.release_date,
            join_list(&game.genres),
            join_list(&game.developers),
            join_list(&game.publishers),
            game.is_sub_game,
            game.parent_collection_id.map(|id| id.to_string()),
            game.is_collection,
        ],
    )?;
    if updated == 0 {
        return Err(OperationError::not_found("game", game.id));
    }
    Ok(())
}

/// Delete a game. Its play log and links go with it; sub-games are released.
pub fn delete_game(conn: &Connection, id: Uuid) -> Result<(), OperationError> {
    release_sub_games(conn, id)?;
    let deleted = conn.execute("DELETE FROM games WHERE id = ?1", params![id.to_string()])?;
    if deleted == 0 {
        return Err(OperationError::not_found("game", id));
    }
    Ok(())
}

/// Change a game's status.
///
/// Starting a game stamps its start date and completing it stamps the
/// completion date, unless those are already set. A collection can only be
/// completed once all of its sub-games are.
pub fn set_game_status(
    conn: &Connection,
    id: Uuid,
    status: GameStatus,
    now: DateTime<Utc>,
) -> Result<Game, OperationError> {
    let mut game = find_game(conn, id)?.ok_or_else(|| OperationError::not_found("game", id))?;

    if status == GameStatus::Completed && game.is_collection {
        let children = sub_games(conn, id)?;
        check_can_complete(&game, &children)?;
    }

    match status {
        GameStatus::InProgress if game.start_date.is_none() => game.start_date = Some(now),
        GameStatus::Completed => {
            if game.start_date.is_none() {
                game.start_date = Some(now);
            }
            if game.completion_date.is_none() {
                game.completion_date = Some(now);
            }
        }
        _ => {}
    }
    game.status = status;

    update_game(conn, &game)?;
    Ok(game)
}

/// Mark a game installed on a piece of hardware, checking free space first.
pub fn install_game(
    conn: &Connection,
    id: Uuid,
    hardware_name: &str,
) -> Result<Game, OperationError> {
    let mut game = find_game(conn, id)?.ok_or_else(|| OperationError::not_found("game", id))?;
    if find_hardware(conn, hardware_name)?.is_none() {
        return Err(OperationError::not_found("hardware", hardware_name));
    }

    let usage = hardware_usage(conn, hardware_name, Some(id))?;
    check_install_fits(&usage, &game)?;

    game.is_installed = true;
    game.linked_hardware = Some(hardware_name.to_string());
    update_game(conn, &game)?;
    Ok(game)
}

/// Clear a game's installation and hardware link.
pub fn uninstall_game(conn: &Connection, id: Uuid) -> Result<(), OperationError> {
    let updated = conn.execute(
        "UPDATE games SET is_installed = 0, linked_hardware = NULL, updated_at = datetime('now')
         WHERE id = ?1",
        params![id.to_string()],
    )?;
    if updated == 0 {
        return Err(OperationError::not_found("game", id));
    }
    Ok(())
}

/// Move a wishlisted game into the collection.
pub fn move_to_collection(conn: &Connection, id: Uuid) -> Result<(), OperationError> {
    let updated = conn.execute(
        "UPDATE games SET is_wishlisted = 0, updated_at = datetime('now') WHERE id = ?1",
        params![id.to_string()],
    )?;
    if updated == 0 {
        return Err(OperationError::not_found("game", id));
    }
    Ok(())
}

// ── Collections ─────────────────────────────────────────────────────────────

/// Attach `child` to `parent`, turning the parent into a collection.
pub fn add_sub_game(conn: &Connection, parent: Uuid, child: Uuid) -> Result<(), OperationError> {
    if parent == child {
        return Err(ModelError::SelfParent.into());
    }
    if find_game(conn, parent)?.is_none() {
        return Err(OperationError::not_found("game", parent));
    }

    let updated = conn.execute(
        "UPDATE games SET is_sub_game = 1, is_collection = 0, parent_collection_id = ?2,
             updated_at = datetime('now')
         WHERE id = ?1",
        params![child.to_string(), parent.to_string()],
    )?;
    if updated == 0 {
        return Err(OperationError::not_found("game", child));
    }

    conn.execute(
        "UPDATE games SET is_collection = 1, is_sub_game = 0, parent_collection_id = NULL,
             updated_at = datetime('now')
         WHERE id = ?1",
        params![parent.to_string()],
    )?;
    Ok(())
}

/// Turn a collection back into a plain game, releasing its sub-games.
pub fn unmark_collection(conn: &Connection, id: Uuid) -> Result<(), OperationError> {
    release_sub_games(conn, id)?;
    let updated = conn.execute(
        "UPDATE games SET is_collection = 0, updated_at = datetime('now') WHERE id = ?1",
        params![id.to_string()],
    )?;
    if updated == 0 {
        return Err(OperationError::not_found("game", id));
    }
    Ok(())
}

fn release_sub_games(conn: &Connection, parent: Uuid) -> Result<usize, OperationError> {
    let released = conn.execute(
        "UPDATE games SET is_sub_game = 0, parent_collection_id = NULL, updated_at = datetime('now')
         WHERE parent_collection_id = ?1",
        params![parent.to_string()],
    )?;
    Ok(released)
}

// ── Play Log & Links ────────────────────────────────────────────────────────

/// Append a play session to a game. Returns the new row id.
pub fn add_play_log_entry(
    conn: &Connection,
    game_id: Uuid,
    entry: &PlayLogEntry,
) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO play_log (game_id, timestamp, time_spent, notes, checkpoint, title)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            game_id.to_string(),
            entry.timestamp,
            entry.time_spent,
            entry.notes,
            entry.checkpoint,
            entry.title,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn delete_play_log_entry(conn: &Connection, id: i64) -> Result<(), OperationError> {
    let deleted = conn.execute("DELETE FROM play_log WHERE id = ?1", params![id])?;
    if deleted == 0 {
        return Err(OperationError::not_found("play log entry", id));
    }
    Ok(())
}

/// Attach a helpful link to a game. Returns the new row id.
pub fn add_helpful_link(
    conn: &Connection,
    game_id: Uuid,
    link: &HelpfulLink,
) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO helpful_links (game_id, name, url) VALUES (?1, ?2, ?3)",
        params![game_id.to_string(), link.name, link.url],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn delete_helpful_link(conn: &Connection, id: i64) -> Result<(), OperationError> {
    let deleted = conn.execute("DELETE FROM helpful_links WHERE id = ?1", params![id])?;
    if deleted == 0 {
        return Err(OperationError::not_found("helpful link", id));
    }
    Ok(())
}

// ── Bulk ────────────────────────────────────────────────────────────────────

/// Remove every game, hardware item, and platform.
pub fn clear_all(conn: &Connection) -> Result<(), OperationError> {
    conn.execute_batch(
        "DELETE FROM helpful_links;
         DELETE FROM play_log;
         UPDATE games SET parent_collection_id = NULL;
         DELETE FROM games;
         DELETE FROM hardware;
         DELETE FROM platforms;",
    )?;
    Ok(())
}
