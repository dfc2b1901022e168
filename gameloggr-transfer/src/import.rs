//! Merge an export document back into the store.
//!
//! Records are matched by natural key: platform id, hardware name, and game
//! id. Existing platforms and hardware are never modified. Existing games are
//! only replaced when the caller asks for it.

use gameloggr_db::{
    clear_all, delete_game, find_game, find_hardware, find_platform, insert_game,
    insert_hardware_if_absent, insert_platform_if_absent,
};
use gameloggr_model::*;
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::envelope::*;
use crate::error::TransferError;
use crate::progress::{ImportStage, ItemOutcome, TransferProgress};

/// Counts of newly created records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportResult {
    pub games_imported: usize,
    pub platforms_imported: usize,
    pub hardware_imported: usize,
}

impl ImportResult {
    pub fn total_items(&self) -> usize {
        self.games_imported + self.platforms_imported + self.hardware_imported
    }
}

/// Decode an export document without touching the store.
pub fn decode_envelope(data: &[u8]) -> Result<ExportEnvelope, TransferError> {
    let envelope: ExportEnvelope = serde_json::from_slice(data).map_err(TransferError::Decode)?;
    if !envelope.is_supported_version() {
        return Err(TransferError::UnsupportedVersion(envelope.version));
    }
    Ok(envelope)
}

/// Decode `data` and merge it into the store.
///
/// With `replace_existing`, everything in the store is cleared first.
/// Without it, games whose id already exists are skipped. The merge runs in
/// a single transaction: a failure leaves the store as it was.
pub fn import_data(
    conn: &Connection,
    data: &[u8],
    replace_existing: bool,
    progress: &dyn TransferProgress,
) -> Result<ImportResult, TransferError> {
    let envelope = decode_envelope(data)?;
    import_envelope(conn, &envelope, replace_existing, progress)
}

/// Merge an already decoded envelope into the store.
pub fn import_envelope(
    conn: &Connection,
    envelope: &ExportEnvelope,
    replace_existing: bool,
    progress: &dyn TransferProgress,
) -> Result<ImportResult, TransferError> {
    let mut result = ImportResult::default();
    let tx = conn.unchecked_transaction()?;

    if replace_existing {
        progress.on_stage(ImportStage::Clearing, 0);
        clear_all(&tx)?;
    }

    // ── Platforms ──
    let total = envelope.platforms.len();
    progress.on_stage(ImportStage::Platforms, total);
    for (i, exported) in envelope.platforms.iter().enumerate() {
        let platform = Platform {
            id: exported.id,
            name: exported.name.clone(),
            logo_url: exported.logo_url.clone(),
        };
        let outcome = if insert_platform_if_absent(&tx, &platform)? {
            result.platforms_imported += 1;
            ItemOutcome::Added
        } else {
            ItemOutcome::Kept
        };
        progress.on_item(ImportStage::Platforms, i + 1, total, &exported.name, outcome);
    }

    // ── Hardware ──
    let total = envelope.hardware.len();
    progress.on_stage(ImportStage::Hardware, total);
    for (i, exported) in envelope.hardware.iter().enumerate() {
        let hardware = Hardware {
            name: exported.name.clone(),
            platform_id: existing_platform(&tx, exported.platform_id)?,
            serial_number: exported.serial_number.clone(),
            purchase_price: exported.purchase_price,
            purchase_date: exported.purchase_date,
            msrp: exported.msrp,
            release_date: exported.release_date,
            internal_storage_gb: exported.internal_storage_gb,
            external_storage_gb: exported.external_storage_gb,
        };
        let outcome = if insert_hardware_if_absent(&tx, &hardware)? {
            result.hardware_imported += 1;
            ItemOutcome::Added
        } else {
            ItemOutcome::Kept
        };
        progress.on_item(ImportStage::Hardware, i + 1, total, &exported.name, outcome);
    }

    // ── Games ──
    let total = envelope.games.len();
    progress.on_stage(ImportStage::Games, total);
    let mut pending_parents: Vec<(Uuid, Uuid)> = Vec::new();
    for (i, exported) in envelope.games.iter().enumerate() {
        let exists = find_game(&tx, exported.id)?.is_some();
        if exists && !replace_existing {
            progress.on_item(ImportStage::Games, i + 1, total, &exported.title, ItemOutcome::Kept);
            continue;
        }
        if exists {
            delete_game(&tx, exported.id)?;
        }

        let mut game = import_game(exported);
        game.platform_id = existing_platform(&tx, exported.platform_id)?;
        game.linked_hardware = existing_hardware(&tx, exported.linked_hardware_id.as_deref())?;
        if game.linked_hardware.is_none() {
            game.is_installed = false;
        }
        // Parents may appear later in the document
        match game.parent_collection_id.take() {
            Some(parent) => pending_parents.push((game.id, parent)),
            None => game.is_sub_game = false,
        }

        insert_game(&tx, &game)?;
        result.games_imported += 1;
        progress.on_item(ImportStage::Games, i + 1, total, &exported.title, ItemOutcome::Added);
    }

    // ── Collection links ──
    let total = pending_parents.len();
    progress.on_stage(ImportStage::CollectionLinks, total);
    for (i, (child, parent)) in pending_parents.into_iter().enumerate() {
        let label = child.to_string();
        if find_game(&tx, parent)?.is_some() {
            tx.execute(
                "UPDATE games SET parent_collection_id = ?2 WHERE id = ?1",
                params![label, parent.to_string()],
            )?;
            progress.on_item(ImportStage::CollectionLinks, i + 1, total, &label, ItemOutcome::Added);
        } else {
            log::warn!("Game {child} refers to missing collection {parent}; link dropped");
            tx.execute("UPDATE games SET is_sub_game = 0 WHERE id = ?1", params![label])?;
            progress.on_item(
                ImportStage::CollectionLinks,
                i + 1,
                total,
                &label,
                ItemOutcome::Unlinked,
            );
        }
    }

    tx.commit()?;

    progress.on_complete(&result);
    Ok(result)
}

/// Build a game from its exported form. Links to other records are left
/// for the caller to resolve.
pub fn import_game(exported: &ExportedGame) -> Game {
    let mut game = Game::with_id(exported.id, exported.title.clone());
    game.cover_art_url = exported.cover_art_url.clone();
    game.platform_id = exported.platform_id;
    game.purchase_date = exported.purchase_date;
    game.is_digital = exported.is_digital;
    game.purchase_price = exported.purchase_price;
    game.msrp = exported.msrp;
    game.status = GameStatus::from_str_loose(&exported.status);
    game.start_date = exported.start_date;
    game.completion_date = exported.completion_date;
    game.hltb_main = exported.hltb_main;
    game.hltb_extra = exported.hltb_extra;
    game.hltb_completionist = exported.hltb_completionist;
    game.user_hltb_main = exported.user_hltb_main;
    game.user_hltb_extra = exported.user_hltb_extra;
    game.user_hltb_completionist = exported.user_hltb_completionist;
    game.manually_set_total_time = exported.manually_set_total_time;
    game.star_rating = exported.star_rating.clamp(0.0, 5.0);
    game.is_wishlisted = exported.is_wishlisted;
    game.ownership_status = OwnershipStatus::from_str_loose(&exported.ownership_status);
    game.has_case = exported.has_case;
    game.has_manual = exported.has_manual;
    game.has_inserts = exported.has_inserts;
    game.is_sealed = exported.is_sealed;
    game.is_installed = exported.is_installed;
    game.game_size_mb = exported.game_size_mb;
    game.linked_hardware = exported.linked_hardware_id.clone();
    game.release_date = exported.release_date;
    game.genres = split_list(&exported.genres_string);
    game.developers = split_list(&exported.developers_string);
    game.publishers = split_list(&exported.publishers_string);
    game.is_sub_game = exported.is_sub_game;
    game.parent_collection_id = exported.parent_collection_id;
    game.is_collection = exported.is_collection;
    game.play_log = exported
        .play_log_entries
        .iter()
        .map(|e| PlayLogEntry {
            id: None,
            timestamp: e.timestamp,
            time_spent: e.time_spent,
            notes: e.notes.clone(),
            checkpoint: e.checkpoint,
            title: e.title.clone(),
        })
        .collect();
    game.helpful_links = exported
        .helpful_links
        .iter()
        .map(|l| HelpfulLink::new(l.name.clone(), l.url_string.clone()))
        .collect();
    game
}

fn existing_platform(conn: &Connection, id: Option<i64>) -> Result<Option<i64>, TransferError> {
    match id {
        Some(id) if find_platform(conn, id)?.is_some() => Ok(Some(id)),
        Some(id) => {
            log::warn!("Platform {id} not found; link dropped");
            Ok(None)
        }
        None => Ok(None),
    }
}

fn existing_hardware(
    conn: &Connection,
    name: Option<&str>,
) -> Result<Option<String>, TransferError> {
    match name {
        Some(name) if find_hardware(conn, name)?.is_some() => Ok(Some(name.to_string())),
        Some(name) => {
            log::warn!("Hardware '{name}' not found; link dropped");
            Ok(None)
        }
        None => Ok(None),
    }
}
