use chrono::{TimeZone, Utc};
use gameloggr_model::*;

fn game(title: &str, platform: Option<i64>, price: f64, msrp: f64) -> Game {
    let mut g = Game::new(title);
    g.platform_id = platform;
    g.purchase_price = price;
    g.msrp = msrp;
    g
}

fn platforms() -> Vec<Platform> {
    vec![Platform::new(130, "Nintendo Switch"), Platform::new(167, "PlayStation 5")]
}

#[test]
fn empty_collection() {
    let stats = CollectionStats::compute(&[], &[], &[]);
    assert_eq!(stats.games, 0);
    assert!(stats.value_by_platform.is_empty());
    assert!(stats.top_played.is_empty());
    assert_eq!(stats.combined_savings(), 0.0);
}

#[test]
fn wishlisted_games_are_excluded() {
    let mut wished = game("Silksong", Some(130), 20.0, 20.0);
    wished.is_wishlisted = true;
    let games = vec![game("Hades", Some(130), 25.0, 30.0), wished];

    let stats = CollectionStats::compute(&games, &[], &platforms());
    assert_eq!(stats.games, 1);
    assert_eq!(stats.games_purchase_total, 25.0);
    assert_eq!(stats.games_savings(), 5.0);
}

#[test]
fn value_by_platform_hides_zero_and_sorts_descending() {
    let games = vec![
        game("Hades", Some(130), 25.0, 30.0),
        game("Zelda", Some(130), 60.0, 70.0),
        game("Astro Bot", Some(167), 100.0, 70.0),
        game("Free Game", None, 0.0, 0.0),
    ];
    let stats = CollectionStats::compute(&games, &[], &platforms());
    assert_eq!(
        stats.value_by_platform,
        vec![
            PlatformValue { platform_name: "PlayStation 5".into(), value: 100.0 },
            PlatformValue { platform_name: "Nintendo Switch".into(), value: 85.0 },
        ]
    );
}

#[test]
fn games_without_platform_group_under_no_platform() {
    let games = vec![game("Mystery Cart", None, 15.0, 0.0)];
    let stats = CollectionStats::compute(&games, &[], &[]);
    assert_eq!(stats.value_by_platform[0].platform_name, NO_PLATFORM);
}

#[test]
fn hardware_and_combined_totals() {
    let mut hw = Hardware::new("PS5");
    hw.purchase_price = 450.0;
    hw.msrp = 500.0;
    let games = vec![game("Astro Bot", Some(167), 60.0, 70.0)];

    let stats = CollectionStats::compute(&games, &[hw], &platforms());
    assert_eq!(stats.hardware, 1);
    assert_eq!(stats.hardware_savings(), 50.0);
    assert_eq!(stats.combined_purchase_total(), 510.0);
    assert_eq!(stats.combined_msrp_total(), 570.0);
    assert_eq!(stats.combined_savings(), 60.0);
}

#[test]
fn ranked_lists() {
    let mut a = game("A", None, 0.0, 0.0);
    a.manually_set_total_time = 10.0;
    a.status = GameStatus::Completed;
    a.completion_date = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    a.purchase_date = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();

    let mut b = game("B", None, 0.0, 0.0);
    b.manually_set_total_time = 30.0;
    b.status = GameStatus::Completed;
    b.completion_date = Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    b.purchase_date = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
    b.star_rating = 5.0;

    let mut c = game("C", None, 0.0, 0.0);
    c.status = GameStatus::InProgress;
    c.purchase_date = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap();

    let stats = CollectionStats::compute(&[a, b, c], &[], &[]);

    let titles = |list: &[RankedGame]| list.iter().map(|g| g.title.clone()).collect::<Vec<_>>();
    assert_eq!(titles(&stats.top_played), vec!["B", "A"]);
    assert_eq!(titles(&stats.top_rated), vec!["B"]);
    assert_eq!(titles(&stats.recently_completed), vec!["B", "A"]);
    assert_eq!(titles(&stats.recently_purchased), vec!["B", "A", "C"]);
    assert_eq!(titles(&stats.oldest_backlog), vec!["C"]);
    assert_eq!(stats.five_star_games, 1);
    assert_eq!(stats.total_time_played, 40.0);
    assert_eq!(
        stats.by_status,
        vec![
            StatusCount { status: GameStatus::InProgress, count: 1 },
            StatusCount { status: GameStatus::Completed, count: 2 },
        ]
    );
}

#[test]
fn ranked_lists_cap_at_five() {
    let games: Vec<Game> = (0..8)
        .map(|i| {
            let mut g = game(&format!("Game {i}"), None, 0.0, 0.0);
            g.manually_set_total_time = i as f64 + 1.0;
            g
        })
        .collect();
    let stats = CollectionStats::compute(&games, &[], &[]);
    assert_eq!(stats.top_played.len(), 5);
    assert_eq!(stats.top_played[0].title, "Game 7");
}

#[test]
fn top_rated_orders_by_completion_with_unfinished_last() {
    let completed = |title: &str, year: i32| {
        let mut g = game(title, None, 0.0, 0.0);
        g.star_rating = 5.0;
        g.status = GameStatus::Completed;
        g.completion_date = Some(Utc.with_ymd_and_hms(year, 6, 1, 0, 0, 0).unwrap());
        g
    };

    let mut unfinished = game("Unfinished", None, 0.0, 0.0);
    unfinished.star_rating = 5.0;
    let mut four_star = completed("Four Star", 2025);
    four_star.star_rating = 4.5;
    let mut wished = completed("Wished", 2025);
    wished.is_wishlisted = true;

    let games = vec![
        unfinished,
        completed("Old", 2018),
        four_star,
        completed("Newest", 2024),
        wished,
        completed("Middle", 2021),
        completed("Oldest", 2015),
        completed("Older", 2017),
    ];
    let stats = CollectionStats::compute(&games, &[], &[]);

    let titles: Vec<&str> = stats.top_rated.iter().map(|g| g.title.as_str()).collect();
    assert_eq!(titles, vec!["Newest", "Middle", "Old", "Older", "Oldest"]);
    assert_eq!(stats.five_star_games, 6);

    let few = CollectionStats::compute(&games[..2], &[], &[]);
    let titles: Vec<&str> = few.top_rated.iter().map(|g| g.title.as_str()).collect();
    assert_eq!(titles, vec!["Old", "Unfinished"]);
}
