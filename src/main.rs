//! Irate Avians entry point
//!
//! Terminal setup and teardown, the 30 FPS driving loop, and the plumbing
//! between crossterm mouse events and the sim's polled pointer state.

use std::env;
use std::io::{self, stdout};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers, MouseButton,
        MouseEventKind,
    },
    execute, terminal,
};
use glam::Vec2;

use irate_avians::consts::{FRAME_RATE, TIME_STEP};
use irate_avians::draw::DrawSurface;
use irate_avians::level::Level;
use irate_avians::render::TerminalSurface;
use irate_avians::sim::{tick, Arena, PointerState};

/// Raw mode, alternate screen, mouse capture, hidden cursor; all undone on
/// drop so the shell comes back intact on every exit path.
struct TerminalSession;

impl TerminalSession {
    fn open() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;
        Ok(Self)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            cursor::Show,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = env::args().nth(1) else {
        eprintln!("usage: irate-avians <level-file>");
        return ExitCode::FAILURE;
    };

    let level = match Level::load(&path) {
        Ok(level) => level,
        Err(err) => {
            eprintln!("{path}: {err}");
            return ExitCode::FAILURE;
        }
    };
    log::info!(
        "loaded {path}: {}x{} field, {} targets, {} throws",
        level.width,
        level.height,
        level.targets.len(),
        level.throws
    );

    match run(&level) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("terminal error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(level: &Level) -> io::Result<()> {
    let _session = TerminalSession::open()?;
    let (cols, rows) = terminal::size()?;

    let mut surface = TerminalSurface::new(stdout(), cols, rows);
    let mut arena = Arena::new(level);
    arena.configure_surface(&mut surface);

    let frame = Duration::from_millis(1000 / u64::from(FRAME_RATE));
    let mut pointer = PointerState::default();

    loop {
        let frame_start = Instant::now();

        if !pump_events(&mut pointer, cols, rows, level)? {
            log::info!("quit by player");
            return Ok(());
        }

        if let Some(outcome) = arena.outcome() {
            log::info!("game over: {outcome:?}");
            arena.draw_outcome(&mut surface, outcome);
            surface.present()?;
            wait_for_key()?;
            return Ok(());
        }

        tick(&mut arena, &pointer, TIME_STEP);
        arena.draw(&mut surface);
        surface.present()?;

        if let Some(rest) = frame.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(rest);
        }
    }
}

/// Drain every pending event into the polled pointer state. Returns false
/// when the player asked to quit.
fn pump_events(
    pointer: &mut PointerState,
    cols: u16,
    rows: u16,
    level: &Level,
) -> io::Result<bool> {
    while event::poll(Duration::ZERO)? {
        match event::read()? {
            Event::Key(key) => {
                let ctrl_c = key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL);
                if ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    return Ok(false);
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left)
                | MouseEventKind::Drag(MouseButton::Left) => {
                    pointer.pressed = true;
                    pointer.pos = cell_to_world(mouse.column, mouse.row, cols, rows, level);
                }
                MouseEventKind::Up(_) => {
                    pointer.pressed = false;
                }
                _ => {}
            },
            _ => {}
        }
    }
    Ok(true)
}

/// Terminal cell (row-down) to world position (y-up), at the cell center.
fn cell_to_world(col: u16, row: u16, cols: u16, rows: u16, level: &Level) -> Vec2 {
    Vec2::new(
        (f32::from(col) + 0.5) / f32::from(cols.max(1)) * level.width,
        (1.0 - (f32::from(row) + 0.5) / f32::from(rows.max(1))) * level.height,
    )
}

/// Block on the outcome screen until any key or click.
fn wait_for_key() -> io::Result<()> {
    loop {
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(_) => return Ok(()),
                Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                    return Ok(())
                }
                _ => {}
            }
        }
    }
}
