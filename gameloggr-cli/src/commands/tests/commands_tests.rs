use chrono::{Datelike, Timelike};
use gameloggr_model::{Game, GameStatus, OwnershipStatus};
use rusqlite::Connection;
use uuid::Uuid;

use super::*;

fn store_with(titles: &[&str]) -> (Connection, Vec<Game>) {
    let conn = gameloggr_db::open_memory().unwrap();
    let games: Vec<Game> = titles.iter().map(|t| Game::new(*t)).collect();
    for game in &games {
        gameloggr_db::insert_game(&conn, game).unwrap();
    }
    (conn, games)
}

// ── Argument parsing ────────────────────────────────────────────────────────

#[test]
fn parse_status_accepts_names_and_aliases() {
    assert_eq!(parse_status("backlog").unwrap(), GameStatus::Backlog);
    assert_eq!(parse_status("In Progress").unwrap(), GameStatus::InProgress);
    assert_eq!(parse_status("on-hold").unwrap(), GameStatus::OnHold);
    assert_eq!(parse_status("done").unwrap(), GameStatus::Completed);
}

#[test]
fn parse_status_rejects_unknown() {
    let err = parse_status("finished-ish").unwrap_err();
    assert!(err.contains("unknown status"));
    assert!(err.contains("Backlog"));
}

#[test]
fn parse_ownership_strict() {
    assert_eq!(parse_ownership("owned").unwrap(), OwnershipStatus::Owned);
    assert_eq!(parse_ownership("in-collection").unwrap(), OwnershipStatus::Owned);
    assert_eq!(parse_ownership("Sold").unwrap(), OwnershipStatus::Sold);
    assert_eq!(parse_ownership("lent_out").unwrap(), OwnershipStatus::LentOut);
    assert!(parse_ownership("stolen").is_err());
}

#[test]
fn parse_date_plain_day_is_midnight_utc() {
    let date = parse_date("2024-03-15").unwrap();
    assert_eq!((date.year(), date.month(), date.day()), (2024, 3, 15));
    assert_eq!((date.hour(), date.minute(), date.second()), (0, 0, 0));
}

#[test]
fn parse_date_rfc3339_is_converted_to_utc() {
    let date = parse_date("2024-03-15T10:00:00+02:00").unwrap();
    assert_eq!(date.hour(), 8);
    assert!(parse_date("15/03/2024").is_err());
}

// ── Formatting ──────────────────────────────────────────────────────────────

#[test]
fn money_and_hours() {
    assert_eq!(format_money(59.99), "$59.99");
    assert_eq!(format_money(-5.0), "-$5.00");
    assert_eq!(format_hours(0.0), "-");
    assert_eq!(format_hours(0.5), "30m");
    assert_eq!(format_hours(12.3), "12.3h");
}

#[test]
fn truncate_is_char_safe() {
    assert_eq!(truncate_str("Hades", 10), "Hades");
    assert_eq!(truncate_str("The Legend of Zelda", 10), "The Leg...");
    assert_eq!(truncate_str("ポケットモンスター", 5), "ポケ...");
    assert_eq!(truncate_str("abcdef", 2), "ab");
}

#[test]
fn short_id_is_first_block() {
    let id = Uuid::parse_str("0191a2b3-c4d5-7e6f-8a9b-0c1d2e3f4a5b").unwrap();
    assert_eq!(short_id(id), "0191a2b3");
}

// ── Game resolution ─────────────────────────────────────────────────────────

#[test]
fn resolve_by_full_id() {
    let (conn, games) = store_with(&["Hades", "Hades II"]);
    let found = resolve_game(&conn, &games[1].id.to_string()).unwrap();
    assert_eq!(found.id, games[1].id);
}

#[test]
fn resolve_unknown_full_id_is_not_found() {
    let (conn, _) = store_with(&["Hades"]);
    let err = resolve_game(&conn, &Uuid::new_v4().to_string()).unwrap_err();
    assert!(matches!(err, CliError::NotFound(_)));
}

#[test]
fn exact_title_wins_over_substring() {
    let (conn, games) = store_with(&["Hades", "Hades II"]);
    let found = resolve_game(&conn, "hades").unwrap();
    assert_eq!(found.id, games[0].id);
}

#[test]
fn resolve_by_id_prefix_and_substring() {
    let (conn, games) = store_with(&["Celeste", "Outer Wilds"]);
    let prefix = short_id(games[1].id);
    assert_eq!(resolve_game(&conn, &prefix).unwrap().id, games[1].id);
    assert_eq!(resolve_game(&conn, "wild").unwrap().id, games[1].id);
}

#[test]
fn ambiguous_substring_lists_candidates() {
    let (conn, _) = store_with(&["Persona 4 Golden", "Persona 5 Royal"]);
    match resolve_game(&conn, "persona") {
        Err(CliError::Input(msg)) => {
            assert!(msg.contains("matches 2 games"));
            assert!(msg.contains("Persona 4 Golden"));
            assert!(msg.contains("Persona 5 Royal"));
        }
        other => panic!("expected ambiguous input error, got {:?}", other.map(|g| g.title)),
    }
}

#[test]
fn no_match_is_not_found() {
    let (conn, _) = store_with(&["Celeste"]);
    let err = resolve_game(&conn, "Balatro").unwrap_err();
    assert!(matches!(err, CliError::NotFound(_)));
}
