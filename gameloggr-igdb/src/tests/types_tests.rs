use super::*;

fn search_result() -> IgdbGame {
    serde_json::from_str(
        r#"{
            "id": 119388,
            "name": "The Legend of Zelda: Tears of the Kingdom",
            "cover": { "id": 1, "url": "//images.igdb.com/igdb/image/upload/t_thumb/co5vmg.jpg" },
            "first_release_date": 1683849600,
            "genres": [ { "id": 12, "name": "Role-playing (RPG)" }, { "id": 31, "name": "Adventure" } ],
            "platforms": [ { "id": 130, "name": "Nintendo Switch",
                             "platform_logo": { "url": "//images.igdb.com/igdb/image/upload/t_thumb/pl6b.jpg" } } ],
            "involved_companies": [
                { "id": 1, "developer": true, "publisher": false, "company": { "id": 1, "name": "Nintendo EPD" } },
                { "id": 2, "developer": false, "publisher": true, "company": { "id": 2, "name": "Nintendo" } }
            ]
        }"#,
    )
    .unwrap()
}

#[test]
fn high_res_url_rewrites_size_token() {
    assert_eq!(
        high_res_url("//images.igdb.com/igdb/image/upload/t_thumb/co5vmg.jpg"),
        "https://images.igdb.com/igdb/image/upload/t_1080p/co5vmg.jpg"
    );
    assert_eq!(
        high_res_url("//images.igdb.com/igdb/image/upload/t_cover_big/co5vmg.jpg"),
        "https://images.igdb.com/igdb/image/upload/t_1080p/co5vmg.jpg"
    );
}

#[test]
fn high_res_url_keeps_absolute_urls() {
    assert_eq!(
        high_res_url("https://images.igdb.com/igdb/image/upload/t_thumb/x.jpg"),
        "https://images.igdb.com/igdb/image/upload/t_1080p/x.jpg"
    );
}

#[test]
fn image_without_url_has_no_high_res() {
    assert_eq!(IgdbImage { url: None }.high_res_url(), None);
}

#[test]
fn minimal_game_deserializes() {
    let game: IgdbGame = serde_json::from_str(r#"{ "id": 7, "name": "Tetris" }"#).unwrap();
    assert!(game.cover.is_none());
    assert!(game.genre_names().is_empty());
    assert_eq!(game.release_year(), None);
}

#[test]
fn companies_split_by_role() {
    let game = search_result();
    assert_eq!(game.developers(), vec!["Nintendo EPD"]);
    assert_eq!(game.publishers(), vec!["Nintendo"]);
    assert_eq!(game.platform_names(), vec!["Nintendo Switch"]);
    assert_eq!(game.release_year(), Some(2023));
}

#[test]
fn to_new_game_fills_metadata() {
    let game = search_result().to_new_game(Some(130));
    assert_eq!(game.title, "The Legend of Zelda: Tears of the Kingdom");
    assert_eq!(game.status, GameStatus::Backlog);
    assert_eq!(game.platform_id, Some(130));
    assert_eq!(
        game.cover_art_url.as_deref(),
        Some("https://images.igdb.com/igdb/image/upload/t_1080p/co5vmg.jpg")
    );
    assert_eq!(
        game.release_date,
        DateTime::from_timestamp(1683849600, 0)
    );
    assert_eq!(game.genres, vec!["Role-playing (RPG)", "Adventure"]);
    assert_eq!(game.developers, vec!["Nintendo EPD"]);
    assert_eq!(game.publishers, vec!["Nintendo"]);
    assert!(!game.is_wishlisted);
}

#[test]
fn platform_converts_with_logo() {
    let platform = search_result().platforms.unwrap().remove(0).to_platform();
    assert_eq!(platform.id, 130);
    assert_eq!(
        platform.logo_url.as_deref(),
        Some("https://images.igdb.com/igdb/image/upload/t_1080p/pl6b.jpg")
    );
}
