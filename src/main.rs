mod display;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use valentine::entities::Screen;
use valentine::screen::{
    app_tick, choose_no, choose_yes, init_app, player_left, player_right, retry,
};

/// One simulation tick per frame.
const FRAME: Duration = Duration::from_millis(50);

// ── Main loop ─────────────────────────────────────────────────────────────────

/// Runs the whole experience; returns when the user quits.
///
/// Every frame: drain pending key events (non-blocking), apply their
/// transitions, tick the app state machine with the current clock, render.
/// All timing the core sees is the millisecond counter derived from
/// `start`, so the core never touches the wall clock.
fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let start = Instant::now();
    let mut rng = thread_rng();

    let mut app = init_app();
    // Proposal menu cursor: 0 = yes, 1 = no.  Pure input state, so it
    // lives here rather than in the app state machine.
    let mut menu_cursor: usize = 0;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        let now_ms = start.elapsed().as_millis() as u64;
        frame += 1;

        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            if kind == KeyEventKind::Release {
                continue;
            }
            match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(());
                }
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(());
                }
                KeyCode::Up if matches!(app.screen, Screen::Proposal) => {
                    menu_cursor = 0;
                }
                KeyCode::Down if matches!(app.screen, Screen::Proposal) => {
                    menu_cursor = 1;
                }
                KeyCode::Enter => {
                    if matches!(app.screen, Screen::Proposal) {
                        app = if menu_cursor == 0 {
                            choose_yes(&app, now_ms)
                        } else {
                            choose_no(&app, now_ms)
                        };
                        menu_cursor = 0;
                    } else if matches!(app.screen, Screen::GameOver { .. }) {
                        app = retry(&app, now_ms);
                    }
                }
                KeyCode::Left => {
                    app = player_left(&app);
                }
                KeyCode::Right => {
                    app = player_right(&app);
                }
                _ => {}
            }
        }

        app = app_tick(&app, now_ms, &mut rng);

        display::render(out, &app, menu_cursor, frame, now_ms)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the frame loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
