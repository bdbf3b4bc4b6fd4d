/// Application-level screen flow: proposal → (no → proposal) | game →
/// gameover → (celebration | retry → game).
///
/// Same shape as the session logic: pure functions from `&AppState` (plus
/// the millisecond clock) to a new `AppState`.  The game session lives
/// inside `Screen::Game`, so leaving the game screen drops the session and
/// every deadline it owns with it.

use rand::Rng;

use crate::compute;
use crate::entities::{AppState, Screen};

/// How long the "are you sure?" interstitial stays up.
pub const NO_SCREEN_MS: u64 = 3500;
/// Delay before the gameover screen starts accepting a retry.
pub const RETRY_PROMPT_DELAY_MS: u64 = 1500;

pub fn init_app() -> AppState {
    AppState {
        screen: Screen::Proposal,
        last_final_score: 0,
    }
}

// ── Menu selections ──────────────────────────────────────────────────────────

/// "Yes!" on the proposal — straight into a fresh game.
pub fn choose_yes(app: &AppState, now_ms: u64) -> AppState {
    match app.screen {
        Screen::Proposal => AppState {
            screen: Screen::Game(compute::new_session(now_ms)),
            ..app.clone()
        },
        _ => app.clone(),
    }
}

/// "No…" on the proposal — guilt-trip interstitial, then back.
pub fn choose_no(app: &AppState, now_ms: u64) -> AppState {
    match app.screen {
        Screen::Proposal => AppState {
            screen: Screen::No {
                return_at: now_ms + NO_SCREEN_MS,
            },
            ..app.clone()
        },
        _ => app.clone(),
    }
}

/// Enter on the gameover screen.  Only honored on the retry variant (a
/// filled love meter is celebrated, not replayed) and only once the prompt
/// is showing.  Starts a completely fresh session with the stored score
/// wiped, so nothing leaks from the previous attempt.
pub fn retry(app: &AppState, now_ms: u64) -> AppState {
    match app.screen {
        Screen::GameOver { retry_at }
            if app.last_final_score < compute::WIN_SCORE && now_ms >= retry_at =>
        {
            AppState {
                screen: Screen::Game(compute::new_session(now_ms)),
                last_final_score: 0,
            }
        }
        _ => app.clone(),
    }
}

// ── Basket movement (game screen only) ───────────────────────────────────────

pub fn player_left(app: &AppState) -> AppState {
    match &app.screen {
        Screen::Game(session) => AppState {
            screen: Screen::Game(compute::move_left(session)),
            ..app.clone()
        },
        _ => app.clone(),
    }
}

pub fn player_right(app: &AppState) -> AppState {
    match &app.screen {
        Screen::Game(session) => AppState {
            screen: Screen::Game(compute::move_right(session)),
            ..app.clone()
        },
        _ => app.clone(),
    }
}

// ── Per-frame update ─────────────────────────────────────────────────────────

/// Advance whichever screen is up.  The no-screen auto-returns on its
/// deadline; the game screen ticks its session and, once the session
/// reports an outcome, stores the final score and moves to gameover.
pub fn app_tick(app: &AppState, now_ms: u64, rng: &mut impl Rng) -> AppState {
    match &app.screen {
        Screen::No { return_at } if now_ms >= *return_at => AppState {
            screen: Screen::Proposal,
            ..app.clone()
        },
        Screen::Game(session) => {
            let session = compute::tick(session, now_ms, rng);
            match compute::session_outcome(&session, now_ms) {
                Some((_, final_score)) => AppState {
                    screen: Screen::GameOver {
                        retry_at: now_ms + RETRY_PROMPT_DELAY_MS,
                    },
                    last_final_score: final_score,
                },
                None => AppState {
                    screen: Screen::Game(session),
                    ..app.clone()
                },
            }
        }
        _ => app.clone(),
    }
}
