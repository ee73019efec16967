//! Rendering layer.
//!
//! The core never talks to the terminal directly: animators call through
//! the `Display` trait, whose terminal implementation translates cell
//! updates into crossterm commands.  No game logic lives here.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use crate::entities::EntityKind;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_PLAYER: Color = Color::White;
const C_SAUCER: Color = Color::Green;
const C_BULLET: Color = Color::Cyan;
const C_STATUS: Color = Color::DarkGrey;

// ── Capability trait ──────────────────────────────────────────────────────────

/// Draw/clear primitives keyed by board position.  `text` arrives
/// pre-padded (one space each side of the glyph), so drawing a moving
/// entity at its new cell also blanks the cell it vacated.
pub trait Display {
    fn draw(&mut self, row: i32, col: i32, kind: EntityKind, text: &str) -> io::Result<()>;
    fn clear(&mut self, row: i32, col: i32, width: i32) -> io::Result<()>;
    /// Rewrite the status line on the bottom row.
    fn status(&mut self, text: &str) -> io::Result<()>;
}

// ── Terminal implementation ───────────────────────────────────────────────────

/// Crossterm-backed display writing to stdout.  Each call queues its
/// commands and flushes; callers serialize access through the render lock.
pub struct TermDisplay {
    out: io::BufWriter<Stdout>,
    rows: u16,
}

impl TermDisplay {
    pub fn new(rows: u16) -> Self {
        TermDisplay {
            out: io::BufWriter::new(io::stdout()),
            rows,
        }
    }

    fn color_for(kind: EntityKind) -> Color {
        match kind {
            EntityKind::Player => C_PLAYER,
            EntityKind::Saucer => C_SAUCER,
            EntityKind::Bullet => C_BULLET,
        }
    }

    /// Park the cursor on the bottom-right corner so it never sits on a
    /// glyph, then flush.
    fn park_and_flush(&mut self) -> io::Result<()> {
        self.out.queue(style::ResetColor)?;
        self.out
            .queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}

impl Display for TermDisplay {
    fn draw(&mut self, row: i32, col: i32, kind: EntityKind, text: &str) -> io::Result<()> {
        self.out
            .queue(cursor::MoveTo(col.max(0) as u16, row.max(0) as u16))?;
        self.out
            .queue(style::SetForegroundColor(Self::color_for(kind)))?;
        self.out.queue(Print(text))?;
        self.park_and_flush()
    }

    fn clear(&mut self, row: i32, col: i32, width: i32) -> io::Result<()> {
        self.out
            .queue(cursor::MoveTo(col.max(0) as u16, row.max(0) as u16))?;
        self.out.queue(Print(" ".repeat(width.max(0) as usize)))?;
        self.park_and_flush()
    }

    fn status(&mut self, text: &str) -> io::Result<()> {
        self.out
            .queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.queue(style::SetForegroundColor(C_STATUS))?;
        self.out.queue(Print(text))?;
        self.park_and_flush()
    }
}

// ── Test double ───────────────────────────────────────────────────────────────

/// A display that discards everything; lets the animator layer run
/// headless in tests.
#[derive(Default)]
pub struct NullDisplay;

impl Display for NullDisplay {
    fn draw(&mut self, _row: i32, _col: i32, _kind: EntityKind, _text: &str) -> io::Result<()> {
        Ok(())
    }

    fn clear(&mut self, _row: i32, _col: i32, _width: i32) -> io::Result<()> {
        Ok(())
    }

    fn status(&mut self, _text: &str) -> io::Result<()> {
        Ok(())
    }
}
