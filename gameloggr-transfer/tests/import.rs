use std::cell::RefCell;

use chrono::{DateTime, TimeZone, Utc};
use gameloggr_db::*;
use gameloggr_model::*;
use gameloggr_transfer::*;
use uuid::Uuid;

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

fn export_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 20, 18, 42, 10).unwrap()
}

/// A small collection: one platform, one console, a collection with a
/// sub-game, a completed game, and a wishlist entry.
fn seeded_db() -> rusqlite::Connection {
    let conn = open_memory().unwrap();
    upsert_platform(&conn, &Platform::new(130, "Nintendo Switch")).unwrap();
    upsert_platform(&conn, &Platform::new(167, "PlayStation 5")).unwrap();

    let mut hw = Hardware::new("Switch OLED");
    hw.platform_id = Some(130);
    hw.purchase_date = at(2023, 12, 25);
    hw.purchase_price = 349.99;
    hw.msrp = 349.99;
    hw.internal_storage_gb = 64.0;
    hw.external_storage_gb = 256.0;
    upsert_hardware(&conn, &hw).unwrap();

    let mut collection = Game::new("Super Mario 3D All-Stars");
    collection.platform_id = Some(130);
    collection.purchase_date = at(2020, 9, 18);
    collection.is_collection = true;
    insert_game(&conn, &collection).unwrap();

    let mut sub = Game::new("Super Mario Galaxy");
    sub.platform_id = Some(130);
    sub.purchase_date = at(2020, 9, 18);
    insert_game(&conn, &sub).unwrap();
    add_sub_game(&conn, collection.id, sub.id).unwrap();

    let mut completed = Game::new("Hades");
    completed.platform_id = Some(130);
    completed.purchase_date = at(2021, 1, 5);
    completed.status = GameStatus::Completed;
    completed.start_date = Some(at(2021, 1, 6));
    completed.completion_date = Some(at(2021, 2, 14));
    completed.star_rating = 5.0;
    completed.is_digital = true;
    completed.is_installed = true;
    completed.game_size_mb = 15000.0;
    completed.linked_hardware = Some("Switch OLED".to_string());
    completed.genres = vec!["Roguelike".to_string(), "Action".to_string()];
    completed.play_log = vec![PlayLogEntry {
        id: None,
        timestamp: at(2021, 2, 14),
        time_spent: 7200.0,
        notes: "Escaped".to_string(),
        checkpoint: true,
        title: Some("Ending".to_string()),
    }];
    completed.helpful_links = vec![HelpfulLink::new("Wiki", "https://hades.fandom.com")];
    insert_game(&conn, &completed).unwrap();

    let mut wished = Game::new("Astro Bot");
    wished.platform_id = Some(167);
    wished.purchase_date = at(2024, 9, 6);
    wished.is_wishlisted = true;
    wished.msrp = 59.99;
    insert_game(&conn, &wished).unwrap();

    conn
}

/// Play log and link row ids are store-local; compare everything else.
fn without_row_ids(mut games: Vec<Game>) -> Vec<Game> {
    for game in &mut games {
        for entry in &mut game.play_log {
            entry.id = None;
        }
        for link in &mut game.helpful_links {
            link.id = None;
        }
    }
    games
}

#[test]
fn round_trip_into_empty_store_is_equivalent() {
    let source = seeded_db();
    let data = export_json(&source, export_time()).unwrap();

    let target = open_memory().unwrap();
    let result = import_data(&target, &data, false, &SilentProgress).unwrap();
    assert_eq!(
        result,
        ImportResult {
            games_imported: 4,
            platforms_imported: 2,
            hardware_imported: 1,
        }
    );
    assert_eq!(result.total_items(), 7);

    let before = load_collection(&source).unwrap();
    let after = load_collection(&target).unwrap();
    assert_eq!(without_row_ids(after.games), without_row_ids(before.games));
    assert_eq!(after.platforms, before.platforms);
    assert_eq!(after.hardware, before.hardware);
}

#[test]
fn reimport_creates_no_duplicates() {
    let conn = seeded_db();
    let data = export_json(&conn, export_time()).unwrap();
    let counts_before = collection_counts(&conn).unwrap();

    let result = import_data(&conn, &data, false, &SilentProgress).unwrap();
    assert_eq!(result.total_items(), 0);
    assert_eq!(collection_counts(&conn).unwrap(), counts_before);
}

#[test]
fn merge_never_overwrites_existing_game() {
    let conn = seeded_db();
    let hades = find_games_by_title(&conn, "Hades").unwrap().remove(0);

    let mut envelope = export_collection(&conn, export_time()).unwrap();
    let exported = envelope.games.iter_mut().find(|g| g.id == hades.id).unwrap();
    exported.title = "Hades II".to_string();
    exported.star_rating = 1.0;

    import_envelope(&conn, &envelope, false, &SilentProgress).unwrap();

    let stored = find_game(&conn, hades.id).unwrap().unwrap();
    assert_eq!(stored.title, "Hades");
    assert_eq!(stored.star_rating, 5.0);
}

#[test]
fn replace_clears_store_first() {
    let conn = seeded_db();
    let hades = find_games_by_title(&conn, "Hades").unwrap().remove(0);

    let mut envelope = export_collection(&conn, export_time()).unwrap();
    envelope.games.retain(|g| g.id == hades.id);
    envelope.games[0].title = "Hades (Replaced)".to_string();

    let result = import_envelope(&conn, &envelope, true, &SilentProgress).unwrap();
    assert_eq!(result.games_imported, 1);

    let counts = collection_counts(&conn).unwrap();
    assert_eq!(counts.games, 1);
    assert_eq!(counts.platforms, 2);
    assert_eq!(counts.hardware, 1);
    assert_eq!(counts.play_log_entries, 1);

    let stored = find_game(&conn, hades.id).unwrap().unwrap();
    assert_eq!(stored.title, "Hades (Replaced)");
    assert_eq!(stored.linked_hardware.as_deref(), Some("Switch OLED"));
}

#[test]
fn existing_platform_and_hardware_are_kept() {
    let conn = seeded_db();
    let mut envelope = export_collection(&conn, export_time()).unwrap();
    envelope.platforms[0].name = "Renamed".to_string();
    envelope.hardware[0].purchase_price = 1.0;

    let result = import_envelope(&conn, &envelope, false, &SilentProgress).unwrap();
    assert_eq!(result.platforms_imported, 0);
    assert_eq!(result.hardware_imported, 0);
    assert_eq!(find_platform(&conn, 130).unwrap().unwrap().name, "Nintendo Switch");
    assert_eq!(
        find_hardware(&conn, "Switch OLED").unwrap().unwrap().purchase_price,
        349.99
    );
}

#[test]
fn decode_failure_leaves_store_untouched() {
    let conn = seeded_db();
    let counts_before = collection_counts(&conn).unwrap();

    let err = import_data(&conn, b"{\"version\": \"1.0\", \"games\": [", true, &SilentProgress);
    assert!(matches!(err, Err(TransferError::Decode(_))));
    assert_eq!(collection_counts(&conn).unwrap(), counts_before);
}

#[test]
fn unsupported_version_leaves_store_untouched() {
    let conn = seeded_db();
    let counts_before = collection_counts(&conn).unwrap();

    let mut envelope = export_collection(&conn, export_time()).unwrap();
    envelope.version = "9.0".to_string();
    let data = serde_json::to_vec(&envelope).unwrap();

    let err = import_data(&conn, &data, true, &SilentProgress);
    assert!(matches!(err, Err(TransferError::UnsupportedVersion(_))));
    assert_eq!(collection_counts(&conn).unwrap(), counts_before);
}

#[test]
fn dangling_links_are_dropped() {
    let orphan_parent = Uuid::new_v4();
    let mut game = Game::new("Metroid Prime Remastered");
    game.purchase_date = at(2023, 2, 8);
    game.is_sub_game = true;
    game.parent_collection_id = Some(orphan_parent);
    game.platform_id = Some(130);
    game.linked_hardware = Some("Switch Lite".to_string());
    game.is_installed = true;
    game.game_size_mb = 7000.0;

    let envelope = ExportEnvelope {
        version: CURRENT_VERSION.to_string(),
        export_date: export_time(),
        games: vec![export_game(&game)],
        platforms: Vec::new(),
        hardware: Vec::new(),
    };

    let conn = open_memory().unwrap();
    import_envelope(&conn, &envelope, false, &SilentProgress).unwrap();

    let stored = find_game(&conn, game.id).unwrap().unwrap();
    assert_eq!(stored.platform_id, None);
    assert_eq!(stored.linked_hardware, None);
    assert_eq!(stored.parent_collection_id, None);
    assert!(!stored.is_installed);
    assert!(!stored.is_sub_game);

    // Still reachable from the normal listings
    let listed = list_games(&conn, &GameFilter::default()).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(backlog(&conn, None).unwrap().len(), 1);
}

#[test]
fn sub_game_without_parent_id_is_released() {
    let mut game = Game::new("Super Mario Sunshine");
    game.purchase_date = at(2020, 9, 18);
    game.is_sub_game = true;

    let envelope = ExportEnvelope {
        version: CURRENT_VERSION.to_string(),
        export_date: export_time(),
        games: vec![export_game(&game)],
        platforms: Vec::new(),
        hardware: Vec::new(),
    };

    let conn = open_memory().unwrap();
    import_envelope(&conn, &envelope, false, &SilentProgress).unwrap();
    assert!(!find_game(&conn, game.id).unwrap().unwrap().is_sub_game);
}

/// Records every progress callback for inspection.
#[derive(Default)]
struct RecordingProgress {
    stages: RefCell<Vec<(ImportStage, usize)>>,
    items: RefCell<Vec<(ImportStage, String, ItemOutcome)>>,
    completed: RefCell<Option<ImportResult>>,
}

impl TransferProgress for RecordingProgress {
    fn on_stage(&self, stage: ImportStage, total: usize) {
        self.stages.borrow_mut().push((stage, total));
    }

    fn on_item(
        &self,
        stage: ImportStage,
        _current: usize,
        _total: usize,
        label: &str,
        outcome: ItemOutcome,
    ) {
        self.items.borrow_mut().push((stage, label.to_string(), outcome));
    }

    fn on_complete(&self, result: &ImportResult) {
        *self.completed.borrow_mut() = Some(*result);
    }
}

#[test]
fn progress_reports_each_stage_and_record() {
    let conn = seeded_db();
    let data = export_json(&conn, export_time()).unwrap();

    let progress = RecordingProgress::default();
    let result = import_data(&conn, &data, false, &progress).unwrap();

    assert_eq!(
        *progress.stages.borrow(),
        vec![
            (ImportStage::Platforms, 2),
            (ImportStage::Hardware, 1),
            (ImportStage::Games, 4),
            (ImportStage::CollectionLinks, 0),
        ]
    );
    let items = progress.items.borrow();
    assert_eq!(items.len(), 7);
    assert!(items.iter().all(|(_, _, outcome)| *outcome == ItemOutcome::Kept));
    assert!(items.contains(&(
        ImportStage::Hardware,
        "Switch OLED".to_string(),
        ItemOutcome::Kept
    )));
    assert_eq!(*progress.completed.borrow(), Some(result));
}

#[test]
fn progress_reports_dropped_collection_link() {
    let mut game = Game::new("F-Zero GX");
    game.purchase_date = at(2003, 7, 25);
    game.is_sub_game = true;
    game.parent_collection_id = Some(Uuid::new_v4());
    let envelope = ExportEnvelope {
        version: CURRENT_VERSION.to_string(),
        export_date: export_time(),
        games: vec![export_game(&game)],
        platforms: Vec::new(),
        hardware: Vec::new(),
    };

    let conn = open_memory().unwrap();
    let progress = RecordingProgress::default();
    import_envelope(&conn, &envelope, true, &progress).unwrap();

    assert_eq!(progress.stages.borrow()[0], (ImportStage::Clearing, 0));
    assert!(progress.items.borrow().contains(&(
        ImportStage::CollectionLinks,
        game.id.to_string(),
        ItemOutcome::Unlinked
    )));
}

#[test]
fn parent_listed_after_child_is_linked() {
    let mut parent = Game::new("Metroid Prime Trilogy");
    parent.purchase_date = at(2009, 8, 24);
    parent.is_collection = true;

    let mut child = Game::new("Metroid Prime 2: Echoes");
    child.purchase_date = at(2009, 8, 24);
    child.is_sub_game = true;
    child.parent_collection_id = Some(parent.id);

    let envelope = ExportEnvelope {
        version: CURRENT_VERSION.to_string(),
        export_date: export_time(),
        games: vec![export_game(&child), export_game(&parent)],
        platforms: Vec::new(),
        hardware: Vec::new(),
    };

    let conn = open_memory().unwrap();
    import_envelope(&conn, &envelope, false, &SilentProgress).unwrap();

    let subs = sub_games(&conn, parent.id).unwrap();
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0].id, child.id);
}

#[test]
fn unknown_enum_values_fall_back_to_defaults() {
    let mut exported = export_game(&Game::new("Pikmin 4"));
    exported.status = "Speedrunning".to_string();
    exported.ownership_status = "Borrowed".to_string();
    exported.star_rating = 11.0;

    let game = import_game(&exported);
    assert_eq!(game.status, GameStatus::Backlog);
    assert_eq!(game.ownership_status, OwnershipStatus::Owned);
    assert_eq!(game.star_rating, 5.0);
}

#[test]
fn export_uses_current_version_and_date() {
    let conn = seeded_db();
    let envelope = export_collection(&conn, export_time()).unwrap();
    assert_eq!(envelope.version, CURRENT_VERSION);
    assert_eq!(envelope.export_date, export_time());

    let text = String::from_utf8(export_json(&conn, export_time()).unwrap()).unwrap();
    assert!(text.contains("\"exportDate\": \"2025-07-20T18:42:10Z\""));
}
