use chrono::{TimeZone, Utc};
use gameloggr_model::*;

fn session(seconds: f64) -> PlayLogEntry {
    PlayLogEntry::new(Utc.with_ymd_and_hms(2025, 7, 10, 20, 0, 0).unwrap(), seconds, "")
}

#[test]
fn total_time_sums_play_log_in_hours() {
    let mut game = Game::new("Chrono Trigger");
    game.play_log = vec![session(3600.0), session(1800.0), session(5400.0)];
    assert!((game.total_time_played() - 3.0).abs() < f64::EPSILON);
}

#[test]
fn manual_total_time_overrides_play_log() {
    let mut game = Game::new("Chrono Trigger");
    game.play_log = vec![session(3600.0)];
    game.manually_set_total_time = 42.5;
    assert_eq!(game.total_time_played(), 42.5);
}

#[test]
fn zero_manual_time_is_treated_as_unset() {
    let mut game = Game::new("Okami");
    game.play_log = vec![session(7200.0)];
    game.manually_set_total_time = 0.0;
    assert_eq!(game.total_time_played(), 2.0);
}

#[test]
fn empty_play_log_is_zero_hours() {
    let game = Game::new("Okami");
    assert_eq!(game.total_time_played(), 0.0);
}

#[test]
fn collectors_grade_precedence() {
    let mut game = Game::new("EarthBound");
    assert_eq!(game.collectors_grade(), CollectorsGrade::Loose);

    game.has_case = true;
    assert_eq!(game.collectors_grade(), CollectorsGrade::InCase);

    game.has_manual = true;
    assert_eq!(game.collectors_grade(), CollectorsGrade::CompleteInBox);

    game.has_inserts = true;
    assert_eq!(game.collectors_grade(), CollectorsGrade::CompleteInBoxPlus);
    assert_eq!(game.collectors_grade().label(), "CIB+");

    // Sealed wins over everything else
    game.is_sealed = true;
    assert_eq!(game.collectors_grade(), CollectorsGrade::Sealed);
}

#[test]
fn inserts_without_manual_is_only_in_case() {
    let mut game = Game::new("Metroid");
    game.has_case = true;
    game.has_inserts = true;
    assert_eq!(game.collectors_grade(), CollectorsGrade::InCase);
}

#[test]
fn status_labels_round_trip() {
    for status in GameStatus::ALL {
        assert_eq!(GameStatus::from_str_loose(status.as_str()), status);
    }
    assert_eq!(GameStatus::InProgress.as_str(), "In Progress");
}

#[test]
fn status_accepts_cli_spellings_and_defaults_to_backlog() {
    assert_eq!(GameStatus::from_str_loose("in-progress"), GameStatus::InProgress);
    assert_eq!(GameStatus::from_str_loose("ON_HOLD"), GameStatus::OnHold);
    assert_eq!(GameStatus::from_str_loose("something else"), GameStatus::Backlog);
}

#[test]
fn ownership_labels() {
    assert_eq!(OwnershipStatus::Owned.as_str(), "In Collection");
    assert_eq!(OwnershipStatus::from_str_loose("Lent Out"), OwnershipStatus::LentOut);
    assert_eq!(OwnershipStatus::from_str_loose("sold"), OwnershipStatus::Sold);
    assert_eq!(OwnershipStatus::from_str_loose("???"), OwnershipStatus::Owned);
}

#[test]
fn backlog_and_collection_membership() {
    let mut game = Game::new("Persona 5");
    assert!(game.is_backlog());
    assert!(game.is_in_collection());

    game.status = GameStatus::Completed;
    assert!(!game.is_backlog());

    game.status = GameStatus::OnHold;
    game.is_wishlisted = true;
    assert!(!game.is_backlog());
    assert!(!game.is_in_collection());

    game.is_wishlisted = false;
    game.ownership_status = OwnershipStatus::Sold;
    assert!(game.is_backlog());
    assert!(!game.is_in_collection());
}

#[test]
fn split_list_trims_and_drops_empty() {
    assert_eq!(
        split_list("Role-playing (RPG), Adventure,,"),
        vec!["Role-playing (RPG)".to_string(), "Adventure".to_string()]
    );
    assert!(split_list("").is_empty());
    assert_eq!(join_list(&["A".into(), "B".into()]), "A,B");
}

#[test]
fn checkpoints_filter() {
    let mut game = Game::new("Hades");
    let mut boss = session(600.0);
    boss.checkpoint = true;
    game.play_log = vec![session(60.0), boss];
    assert_eq!(game.checkpoints().count(), 1);
}
