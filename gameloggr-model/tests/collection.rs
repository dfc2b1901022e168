use gameloggr_model::*;

fn switch() -> Hardware {
    let mut hw = Hardware::new("Switch OLED");
    hw.internal_storage_gb = 64.0;
    hw.external_storage_gb = 0.0;
    hw
}

fn installed(title: &str, size_mb: f64, hardware: &str) -> Game {
    let mut game = Game::new(title);
    game.is_installed = true;
    game.game_size_mb = size_mb;
    game.linked_hardware = Some(hardware.to_string());
    game
}

#[test]
fn usage_counts_only_installed_linked_games() {
    let hw = switch();
    let mut not_installed = installed("Zelda", 15_000.0, "Switch OLED");
    not_installed.is_installed = false;
    let games = vec![
        installed("Mario Odyssey", 5_700.0, "Switch OLED"),
        installed("Metroid Dread", 4_300.0, "Switch OLED"),
        installed("Halo", 50_000.0, "Xbox"),
        not_installed,
    ];

    let usage = HardwareUsage::compute(&hw, &games);
    assert_eq!(usage.total_storage_gb, 64.0);
    assert!((usage.used_storage_gb - 10.0).abs() < 1e-9);
    assert!((usage.available_storage_gb() - 54.0).abs() < 1e-9);
    assert_eq!(usage.installed_games, 2);
}

#[test]
fn total_storage_includes_external() {
    let mut hw = switch();
    hw.external_storage_gb = 256.0;
    assert_eq!(hw.total_storage_gb(), 320.0);
}

#[test]
fn install_rejected_when_storage_is_short() {
    let hw = switch();
    let games = vec![installed("Xenoblade 3", 60_000.0, "Switch OLED")];
    let usage = HardwareUsage::compute(&hw, &games);

    let mut next = Game::new("Tears of the Kingdom");
    next.game_size_mb = 16_300.0;
    let err = check_install_fits(&usage, &next).unwrap_err();
    match err {
        ModelError::InsufficientStorage { hardware, .. } => assert_eq!(hardware, "Switch OLED"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn install_allowed_when_it_exactly_fits() {
    let hw = switch();
    let usage = HardwareUsage::compute(&hw, &[]);
    let mut game = Game::new("Big Game");
    game.game_size_mb = 64_000.0;
    assert!(check_install_fits(&usage, &game).is_ok());
}

#[test]
fn collection_needs_all_sub_games_completed() {
    let mut collection = Game::new("Mega Man Legacy Collection");
    collection.is_collection = true;

    let mut mm1 = Game::new("Mega Man");
    mm1.status = GameStatus::Completed;
    let mm2 = Game::new("Mega Man 2");

    let err = check_can_complete(&collection, &[mm1.clone(), mm2]).unwrap_err();
    assert_eq!(
        err,
        ModelError::IncompleteCollection {
            title: "Mega Man Legacy Collection".into(),
            remaining: 1,
        }
    );

    assert!(check_can_complete(&collection, &[mm1]).is_ok());
    assert!(check_can_complete(&collection, &[]).is_ok());
}

#[test]
fn rating_bounds() {
    assert_eq!(check_rating(4.5), Ok(4.5));
    assert!(check_rating(5.5).is_err());
    assert!(check_rating(-1.0).is_err());
}

#[test]
fn resizing_hardware_must_keep_installed_games() {
    let hw = switch();
    let games = vec![installed("Xenoblade 3", 60_000.0, "Switch OLED")];
    let usage = HardwareUsage::compute(&hw, &games);

    assert!(check_capacity(&usage, 60.0).is_ok());
    assert!(check_capacity(&usage, 128.0).is_ok());
    match check_capacity(&usage, 32.0).unwrap_err() {
        ModelError::StorageOverCommitted {
            hardware,
            used_gb,
            capacity_gb,
        } => {
            assert_eq!(hardware, "Switch OLED");
            assert!((used_gb - 60.0).abs() < 1e-9);
            assert_eq!(capacity_gb, 32.0);
        }
        other => panic!("unexpected error: {other}"),
    }
}
