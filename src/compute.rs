/// Pure game-session logic.
///
/// Every public function takes an immutable reference to the current
/// `GameSession` (plus the host's millisecond clock and, where spawning
/// happens, an RNG handle) and returns a brand-new `GameSession`.  Side
/// effects are limited to the injected RNG; the core never reads the wall
/// clock itself.

use rand::Rng;

use crate::entities::{
    ActivePowerUp, GamePhase, GameSession, Heart, HeartKind, Pickup, PowerUpKind,
};

// ── Playfield constants ──────────────────────────────────────────────────────

/// Basket travel limits (columns).
pub const PLAYER_MIN_X: f32 = 5.0;
pub const PLAYER_MAX_X: f32 = 92.0;
/// Columns moved per left/right press.
pub const PLAYER_STEP: f32 = 5.0;

/// Vertical band in which the basket can catch an entity.
pub const CATCH_BAND_TOP: f32 = 22.0;
pub const CATCH_BAND_BOTTOM: f32 = 24.0;
/// Entities at or below this row are gone.
pub const FLOOR_Y: f32 = 26.0;
/// New entities appear just above the visible area.
pub const SPAWN_Y: f32 = -2.0;

pub const CATCH_RADIUS: f32 = 6.0;
pub const MAGNET_CATCH_RADIUS: f32 = 10.0;
pub const PICKUP_CATCH_RADIUS: f32 = 8.0;

/// Fraction of the horizontal distance the magnet closes per tick.
const MAGNET_PULL: f32 = 0.08;
/// Fall-speed multiplier while a rose is active.
const ROSE_SLOW_FACTOR: f32 = 0.4;
/// Pickup fall speed, plain and under a rose.
const PICKUP_SPEED: f32 = 0.5;
const PICKUP_SLOW_SPEED: f32 = 0.2;

// ── Session constants ────────────────────────────────────────────────────────

pub const COUNTDOWN_START: u32 = 3;
pub const GAME_SECONDS: u32 = 60;
pub const WIN_SCORE: u32 = 100;
/// Combo dies after this long without a positive catch.
pub const COMBO_WINDOW_MS: u64 = 2000;
/// Dwell on the won/lost view before reporting the outcome upward.
pub const OUTCOME_DELAY_MS: u64 = 2000;
/// Pickup roll cadence and spawn chance per roll.
const PICKUP_INTERVAL_MS: u64 = 3000;
const PICKUP_CHANCE: f64 = 0.15;

// ── Difficulty tables ────────────────────────────────────────────────────────

/// Heart spawn cadence tightens as the clock runs down.
fn spawn_interval_ms(time_left: u32) -> u64 {
    if time_left > 40 {
        800
    } else if time_left > 20 {
        600
    } else {
        400
    }
}

/// Base fall speed (rows per 50 ms tick) for the same three phases.
fn fall_speed(time_left: u32) -> f32 {
    if time_left > 40 {
        0.4
    } else if time_left > 20 {
        0.6
    } else {
        0.8
    }
}

/// Points awarded (or taken) per heart kind.
pub fn heart_points(kind: &HeartKind) -> i32 {
    match kind {
        HeartKind::Pink => 5,
        HeartKind::Sparkle => 10,
        HeartKind::Gift => 25,
        HeartKind::Broken => -10,
    }
}

pub fn power_up_duration_ms(kind: &PowerUpKind) -> u64 {
    match kind {
        PowerUpKind::Rose => 5000,
        PowerUpKind::Letter => 8000,
        PowerUpKind::Magnet => 6000,
    }
}

/// Weighted heart-kind draw.  Rare kinds get more common as time pressure
/// rises; the broken heart shows up alongside them.
fn roll_heart_kind(time_left: u32, rng: &mut impl Rng) -> HeartKind {
    let r: f32 = rng.gen();
    if time_left > 40 {
        if r < 0.85 {
            HeartKind::Pink
        } else if r < 0.95 {
            HeartKind::Sparkle
        } else if r < 0.98 {
            HeartKind::Gift
        } else {
            HeartKind::Broken
        }
    } else if time_left > 20 {
        if r < 0.70 {
            HeartKind::Pink
        } else if r < 0.85 {
            HeartKind::Sparkle
        } else if r < 0.92 {
            HeartKind::Gift
        } else {
            HeartKind::Broken
        }
    } else {
        if r < 0.50 {
            HeartKind::Pink
        } else if r < 0.70 {
            HeartKind::Sparkle
        } else if r < 0.85 {
            HeartKind::Gift
        } else {
            HeartKind::Broken
        }
    }
}

fn roll_pickup_kind(rng: &mut impl Rng) -> PowerUpKind {
    match rng.gen_range(0..3) {
        0 => PowerUpKind::Rose,
        1 => PowerUpKind::Letter,
        _ => PowerUpKind::Magnet,
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh session starting its countdown at `now_ms`.
pub fn new_session(now_ms: u64) -> GameSession {
    GameSession {
        phase: GamePhase::Countdown,
        countdown: COUNTDOWN_START,
        time_left: GAME_SECONDS,
        hearts: Vec::new(),
        pickups: Vec::new(),
        active_power_up: None,
        score: 0,
        combo: 0,
        last_catch_at: None,
        player_x: 40.0,
        next_id: 0,
        next_second_at: now_ms + 1000,
        // Armed for real when the countdown finishes.
        next_spawn_at: u64::MAX,
        next_pickup_at: u64::MAX,
        report_at: None,
    }
}

// ── Input-driven transitions (pure) ──────────────────────────────────────────

/// Move the basket left one step.  Ignored outside the playing phase;
/// clamped so an out-of-range move is simply not applied.
pub fn move_left(state: &GameSession) -> GameSession {
    if state.phase != GamePhase::Playing {
        return state.clone();
    }
    GameSession {
        player_x: (state.player_x - PLAYER_STEP).max(PLAYER_MIN_X),
        ..state.clone()
    }
}

pub fn move_right(state: &GameSession) -> GameSession {
    if state.phase != GamePhase::Playing {
        return state.clone();
    }
    GameSession {
        player_x: (state.player_x + PLAYER_STEP).min(PLAYER_MAX_X),
        ..state.clone()
    }
}

// ── Per-tick update (nearly pure — RNG is injected) ──────────────────────────

/// Advance the session by one 50 ms tick.  All randomness comes through
/// `rng` so callers control determinism (useful for tests with a seeded
/// RNG); all timing comes through `now_ms`.
pub fn tick(state: &GameSession, now_ms: u64, rng: &mut impl Rng) -> GameSession {
    match state.phase {
        GamePhase::Countdown => tick_countdown(state, now_ms),
        GamePhase::Playing => tick_playing(state, now_ms, rng),
        // Terminal phases just wait for the report deadline.
        GamePhase::Won | GamePhase::Lost => state.clone(),
    }
}

/// The won/lost outcome once the post-game dwell has elapsed, along with
/// the final score.  `None` while the session is still live (or still
/// showing its won/lost view).
pub fn session_outcome(state: &GameSession, now_ms: u64) -> Option<(GamePhase, u32)> {
    match (&state.phase, state.report_at) {
        (GamePhase::Won, Some(at)) if now_ms >= at => Some((GamePhase::Won, state.score)),
        (GamePhase::Lost, Some(at)) if now_ms >= at => Some((GamePhase::Lost, state.score)),
        _ => None,
    }
}

fn tick_countdown(state: &GameSession, now_ms: u64) -> GameSession {
    if now_ms < state.next_second_at {
        return state.clone();
    }
    let countdown = state.countdown.saturating_sub(1);
    if countdown == 0 {
        // 3…2…1…0 — go.
        GameSession {
            phase: GamePhase::Playing,
            countdown,
            time_left: GAME_SECONDS,
            next_second_at: state.next_second_at + 1000,
            next_spawn_at: now_ms + spawn_interval_ms(GAME_SECONDS),
            next_pickup_at: now_ms + PICKUP_INTERVAL_MS,
            ..state.clone()
        }
    } else {
        GameSession {
            countdown,
            next_second_at: state.next_second_at + 1000,
            ..state.clone()
        }
    }
}

fn tick_playing(state: &GameSession, now_ms: u64, rng: &mut impl Rng) -> GameSession {
    // ── 1. One-second game clock ─────────────────────────────────────────────
    let (time_left, next_second_at) = if now_ms >= state.next_second_at {
        (state.time_left.saturating_sub(1), state.next_second_at + 1000)
    } else {
        (state.time_left, state.next_second_at)
    };

    if time_left == 0 {
        let phase = if state.score >= WIN_SCORE {
            GamePhase::Won
        } else {
            GamePhase::Lost
        };
        return GameSession {
            phase,
            time_left,
            next_second_at,
            report_at: Some(now_ms + OUTCOME_DELAY_MS),
            ..state.clone()
        };
    }

    // ── 2. Power-up expiry and combo window ──────────────────────────────────
    let active = state
        .active_power_up
        .clone()
        .filter(|p| now_ms <= p.expires_at);

    let mut combo = match state.last_catch_at {
        Some(t) if now_ms.saturating_sub(t) > COMBO_WINDOW_MS => 0,
        _ => state.combo,
    };

    // Snapshot of the modifier for this whole tick: a pickup caught below
    // replaces it only once every entity has been evaluated.
    let rose = matches!(&active, Some(p) if p.kind == PowerUpKind::Rose);
    let letter = matches!(&active, Some(p) if p.kind == PowerUpKind::Letter);
    let magnet = matches!(&active, Some(p) if p.kind == PowerUpKind::Magnet);

    let speed = if rose {
        fall_speed(time_left) * ROSE_SLOW_FACTOR
    } else {
        fall_speed(time_left)
    };
    let catch_radius = if magnet { MAGNET_CATCH_RADIUS } else { CATCH_RADIUS };

    // ── 3. Move hearts, detect catches ───────────────────────────────────────
    let mut score = state.score as i64;
    let mut last_catch_at = state.last_catch_at;

    let mut hearts: Vec<Heart> = Vec::new();
    for heart in &state.hearts {
        let points = heart_points(&heart.kind);
        let x = if magnet && points > 0 {
            heart.x + (state.player_x - heart.x) * MAGNET_PULL
        } else {
            heart.x
        };
        let y = heart.y + speed;

        let in_band = (CATCH_BAND_TOP..=CATCH_BAND_BOTTOM).contains(&y);
        if in_band && (x - state.player_x).abs() < catch_radius {
            if points > 0 {
                combo += 1;
                let bonus = (combo / 3) * 5;
                let base = if letter { points * 2 } else { points };
                score += i64::from(base) + i64::from(bonus);
                last_catch_at = Some(now_ms);
            } else {
                combo = 0;
                score += i64::from(points);
            }
        } else if y < FLOOR_Y {
            hearts.push(Heart { x, y, ..heart.clone() });
        }
        // Caught or past the floor: gone either way.
    }

    // ── 4. Move pickups, detect catches ──────────────────────────────────────
    let pickup_speed = if rose { PICKUP_SLOW_SPEED } else { PICKUP_SPEED };
    let mut caught_pickup: Option<PowerUpKind> = None;

    let mut pickups: Vec<Pickup> = Vec::new();
    for pickup in &state.pickups {
        let y = pickup.y + pickup_speed;
        let in_band = (CATCH_BAND_TOP..=CATCH_BAND_BOTTOM).contains(&y);
        if in_band && (pickup.x - state.player_x).abs() < PICKUP_CATCH_RADIUS {
            caught_pickup = Some(pickup.kind.clone());
        } else if y < FLOOR_Y {
            pickups.push(Pickup { y, ..pickup.clone() });
        }
    }

    // ── 5. Spawn new entities ────────────────────────────────────────────────
    let mut next_id = state.next_id;

    let next_spawn_at = if now_ms >= state.next_spawn_at {
        hearts.push(Heart {
            id: next_id,
            x: rng.gen_range(10.0_f32..90.0),
            y: SPAWN_Y,
            kind: roll_heart_kind(time_left, rng),
        });
        next_id += 1;
        now_ms + spawn_interval_ms(time_left)
    } else {
        state.next_spawn_at
    };

    let next_pickup_at = if now_ms >= state.next_pickup_at {
        if rng.gen_bool(PICKUP_CHANCE) {
            pickups.push(Pickup {
                id: next_id,
                x: rng.gen_range(15.0_f32..85.0),
                y: SPAWN_Y,
                kind: roll_pickup_kind(rng),
            });
            next_id += 1;
        }
        now_ms + PICKUP_INTERVAL_MS
    } else {
        state.next_pickup_at
    };

    // ── 6. Resolve modifier and score ────────────────────────────────────────
    let active_power_up = match caught_pickup {
        // Replaces any previous effect — no stacking.
        Some(kind) => Some(ActivePowerUp {
            expires_at: now_ms + power_up_duration_ms(&kind),
            kind,
        }),
        None => active,
    };

    let score = score.max(0) as u32;

    // Filling the love meter wins on the spot, clock be damned.
    let (phase, report_at) = if score >= WIN_SCORE {
        (GamePhase::Won, Some(now_ms + OUTCOME_DELAY_MS))
    } else {
        (GamePhase::Playing, None)
    };

    GameSession {
        phase,
        countdown: state.countdown,
        time_left,
        hearts,
        pickups,
        active_power_up,
        score,
        combo,
        last_catch_at,
        player_x: state.player_x,
        next_id,
        next_second_at,
        next_spawn_at,
        next_pickup_at,
        report_at,
    }
}
