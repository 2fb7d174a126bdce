//! Terminal platform layer
//!
//! Handles:
//! - Raw mode / alternate screen setup and teardown
//! - Mapping key and mouse events to simulation commands
//! - Fixed-cadence tick pacing
//!
//! Everything runs on one thread. Input drained between ticks is applied
//! immediately and in arrival order, so a flap is visible to the very next
//! `update()` and render.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEventKind,
};
use crossterm::{cursor, execute, terminal};

use crate::renderer::{self, PixelBuf};
use crate::sim::{Command, GameState};

/// What the driver should do with a terminal event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Resize { cols: u16, rows: u16 },
    Quit,
}

/// Map a terminal event to an input, ignoring everything else
pub fn map_event(event: &Event) -> Option<Input> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
            KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => {
                Some(Input::Command(Command::Flap))
            }
            KeyCode::Char('q') | KeyCode::Esc => Some(Input::Quit),
            _ => None,
        },
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(Input::Command(Command::Flap)),
            _ => None,
        },
        Event::Resize(cols, rows) => Some(Input::Resize {
            cols: *cols,
            rows: *rows,
        }),
        _ => None,
    }
}

/// Restores the terminal on drop, including on early `?` returns
struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    fn enter(mut out: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
            EnableMouseCapture,
        )?;
        Ok(Self { out })
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        let restored = execute!(
            self.out,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        )
        .and_then(|_| terminal::disable_raw_mode());
        if let Err(e) = restored {
            log::error!("Failed to restore terminal: {}", e);
        }
    }
}

/// Run the game in the current terminal until the player quits
pub fn run(state: &mut GameState) -> io::Result<()> {
    let mut guard = TerminalGuard::enter(io::stdout())?;

    let (cols, rows) = terminal::size()?;
    let mut buf = PixelBuf::for_terminal(cols, rows);
    let frame_dur = state.config().tick_interval();
    log::info!("Terminal {}x{}, tick every {:?}", cols, rows, frame_dur);

    loop {
        let frame_start = Instant::now();

        while event::poll(Duration::ZERO)? {
            match map_event(&event::read()?) {
                Some(Input::Command(command)) => state.apply(command),
                Some(Input::Resize { cols, rows }) => {
                    buf.resize(cols as usize, rows as usize * 2);
                }
                Some(Input::Quit) => {
                    log::info!("Quit (best {})", state.best);
                    return Ok(());
                }
                None => {}
            }
        }

        state.apply(Command::Tick);

        renderer::draw(&mut buf, &state.snapshot(), state.config());
        buf.render(&mut guard.out)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_dur {
            std::thread::sleep(frame_dur - elapsed);
        } else {
            log::warn!("Frame took {:?}, over the {:?} budget", elapsed, frame_dur);
        }
    }
}
