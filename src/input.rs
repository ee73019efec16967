//! Input layer.
//!
//! The game loop consumes abstract `Key` tokens through the `InputSource`
//! trait.  The terminal implementation dedicates a thread to blocking
//! `event::read()` calls and forwards events over a channel, so the
//! consumer can poll with a timeout and never blocks on raw I/O.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// The four keys the game understands; everything else is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Quit,
    Left,
    Right,
    Fire,
}

/// One-token-at-a-time key source with a bounded wait.
pub trait InputSource {
    /// Wait up to `timeout` for the next recognised key.  `None` means
    /// the timeout elapsed (or only unrecognised keys arrived).
    fn poll(&mut self, timeout: Duration) -> Option<Key>;
}

// ── Terminal implementation ───────────────────────────────────────────────────

pub struct TerminalInput {
    rx: mpsc::Receiver<Event>,
}

impl TerminalInput {
    /// Spawn the reader thread.  It exits on its own once the receiver is
    /// dropped at shutdown.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel::<Event>();
        thread::spawn(move || loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped, program exiting
                    }
                }
                Err(_) => break,
            }
        });
        TerminalInput { rx }
    }

    fn translate(ev: Event) -> Option<Key> {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            modifiers,
            ..
        }) = ev
        else {
            return None;
        };
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(Key::Quit),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Key::Quit),
            KeyCode::Char(',') => Some(Key::Left),
            KeyCode::Char('.') => Some(Key::Right),
            KeyCode::Char(' ') => Some(Key::Fire),
            _ => None,
        }
    }
}

impl Default for TerminalInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self, timeout: Duration) -> Option<Key> {
        match self.rx.recv_timeout(timeout) {
            Ok(ev) => Self::translate(ev),
            Err(_) => None,
        }
    }
}
