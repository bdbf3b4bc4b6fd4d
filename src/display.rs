/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// application state.  No game logic is performed; this module only
/// translates state into terminal commands.  Background animations
/// (falling hearts, rain, fireworks) are derived from the frame counter
/// alone, so they carry no state of their own.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use valentine::compute;
use valentine::entities::{
    AppState, GamePhase, GameSession, Heart, HeartKind, Pickup, PowerUpKind, Screen,
};

// ── Valentine palette ─────────────────────────────────────────────────────────

const C_HOT_PINK: Color = Color::Rgb { r: 255, g: 105, b: 180 };
const C_DEEP_PINK: Color = Color::Rgb { r: 255, g: 20, b: 147 };
const C_CRIMSON: Color = Color::Rgb { r: 220, g: 20, b: 60 };
const C_GOLD: Color = Color::Rgb { r: 255, g: 215, b: 0 };
const C_PURPLE: Color = Color::Rgb { r: 156, g: 39, b: 176 };
const C_LAVENDER: Color = Color::Rgb { r: 230, g: 230, b: 250 };
const C_RAIN: Color = Color::Rgb { r: 74, g: 74, b: 106 };
const C_SEPIA: Color = Color::Rgb { r: 205, g: 133, b: 63 };
const C_BROKEN: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;

// Rows 0–2 are the HUD; the play area's world-y 0 starts below it.
const AREA_TOP: i32 = 3;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame of whichever screen is up.
pub fn render<W: Write>(
    out: &mut W,
    app: &AppState,
    menu_cursor: usize,
    frame: u64,
    now_ms: u64,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let (width, height) = terminal::size()?;

    match &app.screen {
        Screen::Proposal => draw_proposal(out, width, height, menu_cursor, frame)?,
        Screen::No { .. } => draw_no_screen(out, width, height, frame)?,
        Screen::Game(session) => draw_game(out, width, height, session, now_ms)?,
        Screen::GameOver { retry_at } => {
            if app.last_final_score >= compute::WIN_SCORE {
                draw_celebration(out, width, height, app.last_final_score, frame)?;
            } else {
                draw_retry(out, width, height, app.last_final_score, now_ms >= *retry_at)?;
            }
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Small helpers ─────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    width: u16,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (width / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_at<W: Write>(
    out: &mut W,
    width: u16,
    height: u16,
    col: i32,
    row: i32,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    if col < 0 || row < 0 || col >= width as i32 || row >= height as i32 {
        return Ok(());
    }
    out.queue(cursor::MoveTo(col as u16, row as u16))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Background animations (frame-derived, stateless) ──────────────────────────

/// Gentle rain of decorative hearts behind the proposal card.
fn draw_heart_drift<W: Write>(
    out: &mut W,
    width: u16,
    height: u16,
    frame: u64,
) -> std::io::Result<()> {
    let glyphs = ["♥", "♡", "❣"];
    let colors = [C_HOT_PINK, C_DEEP_PINK, C_CRIMSON, C_PURPLE];
    for i in 0..15u64 {
        let speed = 2 + i % 3;
        let col = ((i * 13 + 7) % 94 + 2) as i32;
        let row = ((frame * speed / 8 + i * 5) % 34) as i32 - 2;
        draw_at(
            out,
            width,
            height,
            col,
            row,
            glyphs[(i % 3) as usize],
            colors[(i % 4) as usize],
        )?;
    }
    Ok(())
}

fn draw_rain<W: Write>(out: &mut W, width: u16, height: u16, frame: u64) -> std::io::Result<()> {
    let drops = ["│", "┃", "╽", "┆"];
    for i in 0..30u64 {
        let col = ((i * 7 + 3) % 100) as i32;
        let row = ((frame * 4 / 5 + i * 11) % 32) as i32 - 2;
        draw_at(out, width, height, col, row, drops[(i % 4) as usize], C_RAIN)?;
    }
    Ok(())
}

fn draw_fireworks<W: Write>(
    out: &mut W,
    width: u16,
    height: u16,
    frame: u64,
) -> std::io::Result<()> {
    let sparks = ["✦", "✧", "✶", "✹"];
    for i in 0..8u64 {
        let col = (10 + i * 10) as i32;
        let row = (4 + (i * 37) % 10) as i32;
        let spark = sparks[((frame / 6 + i) % 4) as usize];
        draw_at(out, width, height, col, row, spark, C_GOLD)?;
    }
    Ok(())
}

// ── Proposal screen ───────────────────────────────────────────────────────────

fn draw_proposal<W: Write>(
    out: &mut W,
    width: u16,
    height: u16,
    menu_cursor: usize,
    frame: u64,
) -> std::io::Result<()> {
    draw_heart_drift(out, width, height, frame)?;

    let cy = height / 2;
    let top = cy.saturating_sub(6);

    // Double-bordered card, inner width 42
    let card_top = "╔══════════════════════════════════════════╗";
    let card_side = "║                                          ║";
    let card_bottom = "╚══════════════════════════════════════════╝";
    draw_centered(out, width, top, card_top, C_DEEP_PINK)?;
    for i in 1..=8u16 {
        draw_centered(out, width, top + i, card_side, C_DEEP_PINK)?;
    }
    draw_centered(out, width, top + 9, card_bottom, C_DEEP_PINK)?;

    draw_centered(out, width, top + 2, "Will you be my Valentine?", C_CRIMSON)?;
    draw_centered(out, width, top + 4, "♥ ♡ ❣ ♡ ♥", C_HOT_PINK)?;

    // Two-option menu
    let options = ["Yes! ♥", "No… "];
    for (i, label) in options.iter().enumerate() {
        let row = top + 6 + i as u16;
        let (marker, color) = if i == menu_cursor {
            ("▸ ", C_DEEP_PINK)
        } else {
            ("  ", C_PURPLE)
        };
        draw_centered(out, width, row, &format!("{}{}", marker, label), color)?;
    }

    // Floating corner hearts
    draw_at(out, width, height, 3, 2, "♥", C_HOT_PINK)?;
    draw_at(out, width, height, width as i32 - 4, 2, "♡", C_DEEP_PINK)?;
    draw_at(out, width, height, 5, height as i32 - 3, "❣", C_CRIMSON)?;
    draw_at(out, width, height, width as i32 - 6, height as i32 - 3, "♥", C_HOT_PINK)?;

    draw_centered(out, width, top + 12, "↑ ↓ : Choose   ENTER : Select   Q : Quit", C_HINT)?;
    Ok(())
}

// ── "No" interstitial ─────────────────────────────────────────────────────────

fn draw_no_screen<W: Write>(
    out: &mut W,
    width: u16,
    height: u16,
    frame: u64,
) -> std::io::Result<()> {
    draw_rain(out, width, height, frame)?;

    let cy = height / 2;
    let top = cy.saturating_sub(5);

    draw_centered(out, width, top, "Are you sure?", C_SEPIA)?;
    draw_centered(out, width, top + 2, "✗ ✗ ✗", C_BROKEN)?;

    // A sad little face, blinking a tear every other beat
    let tear = if (frame / 10) % 2 == 0 { "◦" } else { " " };
    draw_centered(out, width, top + 4, "╭──────────╮", C_SEPIA)?;
    draw_centered(out, width, top + 5, &format!("│ {}◠‸◠    │", tear), C_SEPIA)?;
    draw_centered(out, width, top + 6, "│    つ    │", C_SEPIA)?;
    draw_centered(out, width, top + 7, "╰──────────╯", C_SEPIA)?;

    draw_centered(out, width, top + 9, "Please… think about it…", C_SEPIA)?;
    draw_centered(out, width, top + 11, "Returning to proposal…", C_HINT)?;
    Ok(())
}

// ── Game screens ──────────────────────────────────────────────────────────────

fn draw_game<W: Write>(
    out: &mut W,
    width: u16,
    height: u16,
    session: &GameSession,
    now_ms: u64,
) -> std::io::Result<()> {
    match session.phase {
        GamePhase::Countdown => draw_countdown(out, width, height, session),
        GamePhase::Playing => draw_playing(out, width, height, session, now_ms),
        GamePhase::Won => draw_won(out, width, height),
        GamePhase::Lost => draw_lost(out, width, height, session.score),
    }
}

fn draw_countdown<W: Write>(
    out: &mut W,
    width: u16,
    height: u16,
    session: &GameSession,
) -> std::io::Result<()> {
    let cy = height / 2;
    draw_centered(out, width, cy.saturating_sub(4), "Get Ready!", C_DEEP_PINK)?;
    let digit = format!("  {}  ", session.countdown);
    draw_centered(out, width, cy.saturating_sub(1), &digit, C_CRIMSON)?;
    draw_centered(out, width, cy + 2, "Catch hearts with ← → arrow keys!", C_PURPLE)?;
    draw_centered(out, width, cy + 4, "♥ = 5   ✦ = 10   ❣ = 25   ✗ = −10", C_HOT_PINK)?;
    Ok(())
}

fn heart_glyph(kind: &HeartKind) -> (&'static str, Color) {
    match kind {
        HeartKind::Pink => ("♥", C_HOT_PINK),
        HeartKind::Sparkle => ("✦", C_GOLD),
        HeartKind::Gift => ("❣", C_DEEP_PINK),
        HeartKind::Broken => ("✗", C_BROKEN),
    }
}

fn pickup_glyph(kind: &PowerUpKind) -> (&'static str, Color) {
    match kind {
        PowerUpKind::Rose => ("✿", C_CRIMSON),
        PowerUpKind::Letter => ("✉", C_LAVENDER),
        PowerUpKind::Magnet => ("◉", Color::Cyan),
    }
}

fn power_up_label(kind: &PowerUpKind) -> &'static str {
    match kind {
        PowerUpKind::Rose => "SLOW-MO",
        PowerUpKind::Letter => "DOUBLE",
        PowerUpKind::Magnet => "MAGNET",
    }
}

fn draw_playing<W: Write>(
    out: &mut W,
    width: u16,
    height: u16,
    session: &GameSession,
    now_ms: u64,
) -> std::io::Result<()> {
    // ── HUD row 0: clock, score, combo, active modifier ──────────────────────
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_CRIMSON))?;
    out.queue(Print(format!("Time: {:>2}s", session.time_left)))?;

    out.queue(cursor::MoveTo(14, 0))?;
    out.queue(style::SetForegroundColor(C_HOT_PINK))?;
    out.queue(Print(format!("Score: {:>3}", session.score)))?;

    if session.combo >= 3 {
        out.queue(cursor::MoveTo(28, 0))?;
        out.queue(style::SetForegroundColor(C_GOLD))?;
        out.queue(Print(format!("Combo x{}!", session.combo)))?;
    }

    if let Some(power) = &session.active_power_up {
        let secs_left = power.expires_at.saturating_sub(now_ms) / 1000 + 1;
        let label = format!("{} {}s", power_up_label(&power.kind), secs_left);
        let col = width.saturating_sub(label.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(col, 0))?;
        out.queue(style::SetForegroundColor(pickup_glyph(&power.kind).1))?;
        out.queue(Print(&label))?;
    }

    // ── HUD row 1: love meter ────────────────────────────────────────────────
    let filled = (session.score.min(compute::WIN_SCORE) as usize) / 2;
    out.queue(cursor::MoveTo(1, 1))?;
    out.queue(style::SetForegroundColor(C_PURPLE))?;
    out.queue(Print("Love "))?;
    out.queue(style::SetForegroundColor(C_DEEP_PINK))?;
    out.queue(Print("█".repeat(filled)))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("░".repeat(50 - filled)))?;
    out.queue(style::SetForegroundColor(C_PURPLE))?;
    out.queue(Print(format!(" {:>3}%", session.score.min(compute::WIN_SCORE))))?;

    // ── Falling entities ─────────────────────────────────────────────────────
    for heart in &session.hearts {
        draw_heart(out, width, height, heart)?;
    }
    for pickup in &session.pickups {
        draw_pickup(out, width, height, pickup)?;
    }

    // ── Basket ───────────────────────────────────────────────────────────────
    let basket_row = compute::CATCH_BAND_TOP as i32 + AREA_TOP;
    let basket_col = session.player_x.round() as i32 - 2;
    draw_at(out, width, height, basket_col, basket_row, "[♥♥]", C_DEEP_PINK)?;

    // ── Floor & hint ─────────────────────────────────────────────────────────
    let floor_row = compute::FLOOR_Y as i32 + AREA_TOP;
    if floor_row < height as i32 {
        out.queue(cursor::MoveTo(0, floor_row as u16))?;
        out.queue(style::SetForegroundColor(C_HOT_PINK))?;
        out.queue(Print("═".repeat(width.min(100) as usize)))?;
    }
    draw_at(out, width, height, 1, floor_row + 1, "← → : Move basket   Q : Quit", C_HINT)?;
    Ok(())
}

fn draw_heart<W: Write>(
    out: &mut W,
    width: u16,
    height: u16,
    heart: &Heart,
) -> std::io::Result<()> {
    let (glyph, color) = heart_glyph(&heart.kind);
    draw_at(
        out,
        width,
        height,
        heart.x.round() as i32,
        heart.y.round() as i32 + AREA_TOP,
        glyph,
        color,
    )
}

fn draw_pickup<W: Write>(
    out: &mut W,
    width: u16,
    height: u16,
    pickup: &Pickup,
) -> std::io::Result<()> {
    let (glyph, color) = pickup_glyph(&pickup.kind);
    draw_at(
        out,
        width,
        height,
        pickup.x.round() as i32,
        pickup.y.round() as i32 + AREA_TOP,
        glyph,
        color,
    )
}

fn draw_won<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let cy = height / 2;
    draw_centered(out, width, cy.saturating_sub(3), "★ YOU WON! ★", C_DEEP_PINK)?;
    draw_centered(out, width, cy.saturating_sub(1), "Love meter filled to 100%! ♥", C_CRIMSON)?;
    draw_centered(out, width, cy + 1, "✶ ✦ ✧ ✦ ✶", C_GOLD)?;
    draw_centered(out, width, cy + 3, "Celebrating your victory…", C_PURPLE)?;
    Ok(())
}

fn draw_lost<W: Write>(out: &mut W, width: u16, height: u16, score: u32) -> std::io::Result<()> {
    let cy = height / 2;
    draw_centered(out, width, cy.saturating_sub(3), "Time's up!", C_SEPIA)?;
    draw_centered(
        out,
        width,
        cy.saturating_sub(1),
        &format!("You collected {} love points", score),
        C_SEPIA,
    )?;
    draw_centered(out, width, cy + 1, "Need 100 to win…", C_HINT)?;
    Ok(())
}

// ── Gameover screens ──────────────────────────────────────────────────────────

fn draw_celebration<W: Write>(
    out: &mut W,
    width: u16,
    height: u16,
    score: u32,
    frame: u64,
) -> std::io::Result<()> {
    draw_fireworks(out, width, height, frame)?;

    let cy = height / 2;
    let top = cy.saturating_sub(5);

    draw_centered(out, width, top, "★ YAYYY! I'M SO HAPPY! ★", C_DEEP_PINK)?;

    draw_centered(out, width, top + 2, "╔══════════════════════════════════════╗", C_GOLD)?;
    for i in 3..=6u16 {
        draw_centered(out, width, top + i, "║                                      ║", C_GOLD)?;
    }
    draw_centered(out, width, top + 7, "╚══════════════════════════════════════╝", C_GOLD)?;

    draw_centered(out, width, top + 3, "You filled the Love Meter to 100%! ♥", C_CRIMSON)?;
    draw_centered(out, width, top + 4, &format!("Final Score: {} love points", score), C_HOT_PINK)?;
    draw_centered(out, width, top + 6, "Best Valentine ever! ★", C_PURPLE)?;

    draw_centered(out, width, top + 9, "♥ ♡ ❣ ♡ ♥", C_HOT_PINK)?;
    draw_centered(out, width, top + 11, "Q : Exit with love ♥", C_HINT)?;
    Ok(())
}

fn draw_retry<W: Write>(
    out: &mut W,
    width: u16,
    height: u16,
    score: u32,
    show_prompt: bool,
) -> std::io::Result<()> {
    let cy = height / 2;
    draw_centered(out, width, cy.saturating_sub(4), "Time's Up!", C_SEPIA)?;
    draw_centered(
        out,
        width,
        cy.saturating_sub(2),
        &format!("You collected {} love points", score),
        C_SEPIA,
    )?;
    draw_centered(out, width, cy.saturating_sub(1), "Need 100 points to win…", C_HINT)?;
    draw_centered(out, width, cy + 1, "✗ ✗ ✗", C_BROKEN)?;
    if show_prompt {
        draw_centered(out, width, cy + 3, "Press ENTER to try again", C_SEPIA)?;
    }
    draw_centered(out, width, cy + 5, "Q : Quit", C_HINT)?;
    Ok(())
}
