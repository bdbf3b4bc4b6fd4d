use valentine::entities::*;

#[test]
fn entity_clone_and_eq() {
    // Enums derive PartialEq — equality comparisons must work
    assert_eq!(HeartKind::Pink, HeartKind::Pink);
    assert_ne!(HeartKind::Pink, HeartKind::Broken);
    assert_eq!(PowerUpKind::Rose, PowerUpKind::Rose);
    assert_ne!(PowerUpKind::Rose, PowerUpKind::Magnet);
    assert_eq!(GamePhase::Playing, GamePhase::Playing);
    assert_ne!(GamePhase::Won, GamePhase::Lost);

    // Clone must produce an equal value
    let kind = HeartKind::Gift;
    assert_eq!(kind.clone(), HeartKind::Gift);
}

#[test]
fn game_session_clone_is_independent() {
    let original = GameSession {
        phase: GamePhase::Playing,
        countdown: 0,
        time_left: 60,
        hearts: Vec::new(),
        pickups: Vec::new(),
        active_power_up: None,
        score: 0,
        combo: 0,
        last_catch_at: None,
        player_x: 40.0,
        next_id: 0,
        next_second_at: 1000,
        next_spawn_at: 1000,
        next_pickup_at: 1000,
        report_at: None,
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player_x = 92.0;
    cloned.score = 999;
    cloned.hearts.push(Heart { id: 1, x: 50.0, y: 5.0, kind: HeartKind::Pink });

    assert!((original.player_x - 40.0).abs() < 1e-4);
    assert_eq!(original.score, 0);
    assert!(original.hearts.is_empty());
}

#[test]
fn app_state_clone_is_independent() {
    let original = AppState {
        screen: Screen::Proposal,
        last_final_score: 0,
    };
    let mut cloned = original.clone();
    cloned.last_final_score = 120;
    cloned.screen = Screen::No { return_at: 3500 };

    assert_eq!(original.last_final_score, 0);
    assert!(matches!(original.screen, Screen::Proposal));
}
