use valentine::compute;
use valentine::entities::*;
use valentine::screen::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

/// An app sitting on the gameover screen with a given final score.
fn gameover_app(final_score: u32, retry_at: u64) -> AppState {
    AppState {
        screen: Screen::GameOver { retry_at },
        last_final_score: final_score,
    }
}

/// An app whose session has finished and is ready to report.
fn reporting_app(phase: GamePhase, score: u32, report_at: u64) -> AppState {
    let mut session = compute::new_session(0);
    session.phase = phase;
    session.score = score;
    session.report_at = Some(report_at);
    AppState {
        screen: Screen::Game(session),
        last_final_score: 0,
    }
}

// ── proposal ──────────────────────────────────────────────────────────────────

#[test]
fn app_starts_on_the_proposal() {
    let app = init_app();
    assert!(matches!(app.screen, Screen::Proposal));
    assert_eq!(app.last_final_score, 0);
}

#[test]
fn yes_starts_a_fresh_game() {
    let app = choose_yes(&init_app(), 500);
    match &app.screen {
        Screen::Game(session) => {
            assert_eq!(session.phase, GamePhase::Countdown);
            assert_eq!(session.countdown, 3);
            assert_eq!(session.score, 0);
        }
        other => panic!("expected game screen, got {:?}", other),
    }
}

#[test]
fn no_shows_the_interstitial() {
    let app = choose_no(&init_app(), 500);
    match app.screen {
        Screen::No { return_at } => assert_eq!(return_at, 500 + NO_SCREEN_MS),
        other => panic!("expected no-screen, got {:?}", other),
    }
}

#[test]
fn selections_only_work_on_the_proposal() {
    let app = choose_no(&init_app(), 0);
    let app2 = choose_yes(&app, 100);
    assert!(matches!(app2.screen, Screen::No { .. }));
}

// ── no-screen auto-return ─────────────────────────────────────────────────────

#[test]
fn no_screen_holds_until_its_deadline() {
    let app = choose_no(&init_app(), 0); // returns at 3500
    let app2 = app_tick(&app, 3499, &mut seeded_rng());
    assert!(matches!(app2.screen, Screen::No { .. }));
}

#[test]
fn no_screen_returns_without_input() {
    let app = choose_no(&init_app(), 0);
    let app2 = app_tick(&app, 3500, &mut seeded_rng());
    assert!(matches!(app2.screen, Screen::Proposal));
}

// ── game screen ───────────────────────────────────────────────────────────────

#[test]
fn game_screen_ticks_its_session() {
    let app = choose_yes(&init_app(), 0);
    let app2 = app_tick(&app, 1000, &mut seeded_rng());
    match &app2.screen {
        Screen::Game(session) => assert_eq!(session.countdown, 2),
        other => panic!("expected game screen, got {:?}", other),
    }
}

#[test]
fn basket_moves_only_on_the_game_screen() {
    let app = init_app();
    let app2 = player_left(&app);
    assert!(matches!(app2.screen, Screen::Proposal));

    let mut session = compute::new_session(0);
    session.phase = GamePhase::Playing;
    let app = AppState {
        screen: Screen::Game(session),
        last_final_score: 0,
    };
    let app2 = player_left(&app);
    match &app2.screen {
        Screen::Game(session) => assert!((session.player_x - 35.0).abs() < 1e-4),
        other => panic!("expected game screen, got {:?}", other),
    }
}

#[test]
fn session_outcome_moves_to_gameover() {
    let app = reporting_app(GamePhase::Lost, 80, 500);
    let app2 = app_tick(&app, 500, &mut seeded_rng());
    match app2.screen {
        Screen::GameOver { retry_at } => assert_eq!(retry_at, 500 + RETRY_PROMPT_DELAY_MS),
        other => panic!("expected gameover, got {:?}", other),
    }
    assert_eq!(app2.last_final_score, 80);
}

#[test]
fn won_session_reports_its_real_score() {
    let app = reporting_app(GamePhase::Won, 115, 500);
    let app2 = app_tick(&app, 500, &mut seeded_rng());
    assert!(matches!(app2.screen, Screen::GameOver { .. }));
    assert_eq!(app2.last_final_score, 115);
}

#[test]
fn game_screen_holds_until_the_report() {
    let app = reporting_app(GamePhase::Lost, 80, 500);
    let app2 = app_tick(&app, 499, &mut seeded_rng());
    assert!(matches!(app2.screen, Screen::Game(_)));
}

// ── gameover & retry ──────────────────────────────────────────────────────────

#[test]
fn retry_starts_clean() {
    let app = gameover_app(80, 1500);
    let app2 = retry(&app, 2000);
    match &app2.screen {
        Screen::Game(session) => {
            assert_eq!(session.phase, GamePhase::Countdown);
            assert_eq!(session.score, 0);
            assert_eq!(session.time_left, 60);
            assert!(session.hearts.is_empty());
            assert!(session.pickups.is_empty());
            assert!(session.active_power_up.is_none());
        }
        other => panic!("expected fresh game, got {:?}", other),
    }
    assert_eq!(app2.last_final_score, 0); // previous outcome wiped
}

#[test]
fn retry_waits_for_the_prompt() {
    let app = gameover_app(80, 1500);
    let app2 = retry(&app, 1499);
    assert!(matches!(app2.screen, Screen::GameOver { .. }));
}

#[test]
fn no_retry_from_the_celebration() {
    let app = gameover_app(120, 1500);
    let app2 = retry(&app, 5000);
    assert!(matches!(app2.screen, Screen::GameOver { .. }));
    assert_eq!(app2.last_final_score, 120);
}

// ── end to end ────────────────────────────────────────────────────────────────

#[test]
fn full_loss_round_trip() {
    // proposal → game; countdown runs down; the 60 s clock expires with a
    // low score; the outcome reports; a retry produces an untouched session.
    let mut rng = seeded_rng();
    let mut app = choose_yes(&init_app(), 0);

    let mut now = 0u64;
    // Countdown: 3 s. Play: 60 s. Dwell: 2 s. Tick every 50 ms while
    // holding the basket against the left wall, where hearts almost never
    // land — the session must run out of time well short of 100.
    while now <= 66_000 {
        app = player_left(&app);
        app = app_tick(&app, now, &mut rng);
        now += 50;
        if matches!(app.screen, Screen::GameOver { .. }) {
            break;
        }
    }
    let final_score = app.last_final_score;
    assert!(matches!(app.screen, Screen::GameOver { .. }));
    assert!(final_score < 100);

    let app = retry(&app, now + RETRY_PROMPT_DELAY_MS);
    match &app.screen {
        Screen::Game(session) => {
            assert_eq!(session.phase, GamePhase::Countdown);
            assert_eq!(session.score, 0);
            assert!(session.hearts.is_empty());
        }
        other => panic!("expected fresh game after retry, got {:?}", other),
    }
}
