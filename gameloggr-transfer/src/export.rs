//! Serialize the whole collection into an export document.

use chrono::{DateTime, Utc};
use gameloggr_db::load_collection;
use gameloggr_model::{join_list, Game, Hardware, Platform};
use rusqlite::Connection;

use crate::envelope::*;
use crate::error::TransferError;

/// Read every game, platform, and hardware item into an envelope.
pub fn export_collection(
    conn: &Connection,
    now: DateTime<Utc>,
) -> Result<ExportEnvelope, TransferError> {
    let collection = load_collection(conn)?;
    log::debug!(
        "Exporting {} games, {} platforms, {} hardware",
        collection.games.len(),
        collection.platforms.len(),
        collection.hardware.len(),
    );

    Ok(ExportEnvelope {
        version: CURRENT_VERSION.to_string(),
        export_date: now,
        games: collection.games.iter().map(export_game).collect(),
        platforms: collection.platforms.iter().map(export_platform).collect(),
        hardware: collection.hardware.iter().map(export_hardware).collect(),
    })
}

/// Export the collection as pretty-printed JSON.
pub fn export_json(conn: &Connection, now: DateTime<Utc>) -> Result<Vec<u8>, TransferError> {
    let envelope = export_collection(conn, now)?;
    encode_envelope(&envelope)
}

/// Serialize an envelope as pretty-printed JSON.
pub fn encode_envelope(envelope: &ExportEnvelope) -> Result<Vec<u8>, TransferError> {
    serde_json::to_vec_pretty(envelope).map_err(TransferError::Encode)
}

/// Default file name for an export taken at `now`.
pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("GameLoggr-Export-{}.json", now.format("%Y-%m-%d-%H-%M-%S"))
}

pub fn export_game(game: &Game) -> ExportedGame {
    ExportedGame {
        id: game.id,
        title: game.title.clone(),
        cover_art_url: game.cover_art_url.clone(),
        release_date: game.release_date,
        purchase_date: game.purchase_date,
        start_date: game.start_date,
        completion_date: game.completion_date,
        is_digital: game.is_digital,
        purchase_price: game.purchase_price,
        msrp: game.msrp,
        status: game.status.as_str().to_string(),
        star_rating: game.star_rating,
        is_wishlisted: game.is_wishlisted,
        ownership_status: game.ownership_status.as_str().to_string(),
        is_installed: game.is_installed,
        game_size_mb: game.game_size_mb,
        total_time_played: game.total_time_played(),
        manually_set_total_time: game.manually_set_total_time,
        has_case: game.has_case,
        has_manual: game.has_manual,
        has_inserts: game.has_inserts,
        is_sealed: game.is_sealed,
        collectors_grade: game.collectors_grade().label().to_string(),
        hltb_main: game.hltb_main,
        hltb_extra: game.hltb_extra,
        hltb_completionist: game.hltb_completionist,
        user_hltb_main: game.user_hltb_main,
        user_hltb_extra: game.user_hltb_extra,
        user_hltb_completionist: game.user_hltb_completionist,
        genres_string: join_list(&game.genres),
        developers_string: join_list(&game.developers),
        publishers_string: join_list(&game.publishers),
        is_sub_game: game.is_sub_game,
        is_collection: game.is_collection,
        parent_collection_id: game.parent_collection_id,
        platform_id: game.platform_id,
        linked_hardware_id: game.linked_hardware.clone(),
        play_log_entries: game
            .play_log
            .iter()
            .map(|e| ExportedPlayLogEntry {
                timestamp: e.timestamp,
                time_spent: e.time_spent,
                notes: e.notes.clone(),
                checkpoint: e.checkpoint,
                title: e.title.clone(),
            })
            .collect(),
        helpful_links: game
            .helpful_links
            .iter()
            .map(|l| ExportedHelpfulLink {
                name: l.name.clone(),
                url_string: l.url.clone(),
            })
            .collect(),
    }
}

fn export_platform(platform: &Platform) -> ExportedPlatform {
    ExportedPlatform {
        id: platform.id,
        name: platform.name.clone(),
        logo_url: platform.logo_url.clone(),
    }
}

fn export_hardware(hw: &Hardware) -> ExportedHardware {
    ExportedHardware {
        id: hw.name.clone(),
        name: hw.name.clone(),
        serial_number: hw.serial_number.clone(),
        purchase_price: hw.purchase_price,
        purchase_date: hw.purchase_date,
        msrp: hw.msrp,
        release_date: hw.release_date,
        platform_id: hw.platform_id,
        internal_storage_gb: hw.internal_storage_gb,
        external_storage_gb: hw.external_storage_gb,
    }
}
