mod config;
mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};

use space_invaders::input::{HeldKeys, Key};
use space_invaders::view::Scene;
use space_invaders::{Command, Session};

use config::Args;

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Up | KeyCode::Char(' ') => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        _ => None,
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Drives the engine at a fixed tick cadence until the player quits.
///
/// Per tick: drain terminal events into the held-key spans, deliver one
/// command per held key, then the tick itself. All commands go through the
/// one `Session`, so the engine sees a single ordered stream.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    args: &Args,
    keys_report_release: bool,
) -> Result<()> {
    let mut session = Session::new();
    let mut scene = Scene::new();
    let hold_window = (!keys_report_release).then_some(args.hold_window);
    let mut held = HeldKeys::new(hold_window);
    let frame = args.tick_duration();

    scene.apply(session.state());

    loop {
        let frame_start = Instant::now();
        let tick = session.ticks();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    if is_quit(code, modifiers) {
                        return Ok(());
                    }
                    if let Some(key) = map_key(code) {
                        held.press(key, tick);
                    }
                }
                KeyEventKind::Release => {
                    if let Some(key) = map_key(code) {
                        held.release(key);
                    }
                }
            }
        }

        // ── Held keys first, then the tick ────────────────────────────────────
        for command in held.commands(tick) {
            scene.apply(session.dispatch(command));
        }
        scene.apply(session.tick());

        if tick % args.render_every == 0 {
            display::render(out, &scene, terminal::size()?)?;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Headless run ──────────────────────────────────────────────────────────────

/// Plays `ticks` ticks with a scripted player (sweeping the field while
/// firing) and prints the final state as JSON.
fn run_headless(ticks: u64) -> Result<()> {
    let mut session = Session::new();
    for _ in 0..ticks {
        let t = session.ticks();
        let h = if (t / 150) % 2 == 0 { 1.0 } else { -1.0 };
        session.dispatch(Command::Move { h, v: 0.0 });
        session.dispatch(Command::Shoot { special: false });
        if session.tick().is_over() {
            break;
        }
    }

    let state = session.state();
    log::info!(
        "headless run ended after {} ticks: level {}, {} points, {} lives",
        session.ticks(),
        state.level,
        state.points,
        state.lives
    );
    let json = serde_json::to_string_pretty(state).context("serializing final state")?;
    println!("{json}");
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(args: &Args) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    args.validate()?;
    init_logging(&args)?;

    if let Some(ticks) = args.headless {
        return run_headless(ticks);
    }

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // kitty-protocol terminals support this; others fall back to the
    // hold window.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    log::info!("keyboard enhancement: {keyboard_enhanced}");

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &rx, &args, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
