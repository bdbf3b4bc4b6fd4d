/// All game entity types — pure data, no logic.

#[derive(Clone, Debug, PartialEq)]
pub enum HeartKind {
    /// Common heart, +5 points.
    Pink,
    /// Sparkling heart, +10 points.
    Sparkle,
    /// Gift heart, +25 points — rare.
    Gift,
    /// Broken heart, −10 points and breaks the combo.
    Broken,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PowerUpKind {
    /// Slow motion: everything falls at 40% speed for 5 s.
    Rose,
    /// Love letter: positive catches score double for 8 s.
    Letter,
    /// Magnet: pulls good hearts toward the basket and widens
    /// the catch radius to 10 for 6 s.
    Magnet,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GamePhase {
    Countdown,
    Playing,
    Won,
    Lost,
}

// ── Falling entities ──────────────────────────────────────────────────────────

/// A scorable heart falling through the play area.
/// Positions are fractional: x spans 0–100 columns, y starts above the
/// visible area (negative) and the floor sits at y = 26.
#[derive(Clone, Debug)]
pub struct Heart {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub kind: HeartKind,
}

/// A falling power-up item; grants a temporary modifier instead of points.
#[derive(Clone, Debug)]
pub struct Pickup {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub kind: PowerUpKind,
}

/// The single in-effect modifier. Catching another pickup replaces it.
#[derive(Clone, Debug)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    /// Millisecond timestamp after which the effect ends.
    pub expires_at: u64,
}

// ── One game session ──────────────────────────────────────────────────────────

/// The entire state of one mini-game session.  Cloneable so pure update
/// functions can return a new copy without mutating the original.
///
/// All `*_at` fields are deadlines on the host's millisecond clock; they
/// live inside the session so that dropping the session cancels every
/// timer it owns.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub phase: GamePhase,
    /// Countdown display value, 3 → 0.
    pub countdown: u32,
    /// Seconds remaining, 60 → 0.
    pub time_left: u32,
    pub hearts: Vec<Heart>,
    pub pickups: Vec<Pickup>,
    pub active_power_up: Option<ActivePowerUp>,
    /// Never negative — clamped at 0 on every update.
    pub score: u32,
    /// Consecutive positive catches; 0 after a broken heart or a 2 s lull.
    pub combo: u32,
    /// When the last positive catch happened, if any.
    pub last_catch_at: Option<u64>,
    /// Basket center, clamped to [5, 92].
    pub player_x: f32,
    /// Next fresh entity id.
    pub next_id: u64,
    /// When the 1-second clock (countdown / time_left) next fires.
    pub next_second_at: u64,
    /// When the next heart spawns (playing only).
    pub next_spawn_at: u64,
    /// When the next pickup roll happens (playing only).
    pub next_pickup_at: u64,
    /// Set on entering Won/Lost: when to report the outcome upward.
    pub report_at: Option<u64>,
}

// ── Application state ─────────────────────────────────────────────────────────

/// Top-level view of the application.  The game session is owned by its
/// screen variant, so exactly one session exists while the game is up and
/// none of its timers can outlive it.
#[derive(Clone, Debug)]
pub enum Screen {
    Proposal,
    /// The "are you sure?" interstitial; auto-returns to the proposal.
    No { return_at: u64 },
    Game(GameSession),
    /// Celebration when the stored score reached 100, retry offer otherwise.
    GameOver { retry_at: u64 },
}

#[derive(Clone, Debug)]
pub struct AppState {
    pub screen: Screen,
    /// Final score of the most recent session; 0 before any session ends.
    pub last_final_score: u32,
}
