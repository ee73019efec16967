//! Game-logic layer: every state transition on the shared table.
//!
//! Each public function acquires exactly the locks its concern needs and
//! releases them before returning (guards are scoped, so this holds on
//! every exit path).  No terminal I/O happens here; functions that have a
//! visual consequence return a small step value the animator renders.
//! Randomness comes through an injected `Rng` handle so tests can seed it.

use std::time::Duration;

use rand::Rng;

use crate::entities::{GameTable, NUMLOSE};
use crate::input::{InputSource, Key};

/// How long the input loop waits for one key before re-checking the
/// loss condition, in milliseconds.
pub const INPUT_POLL_MS: u64 = 50;

// ── Collision detection ───────────────────────────────────────────────────────

/// A resolved saucer–bullet overlap, reported with both entities'
/// pre-reset positions so the caller can blank the glyphs immediately
/// (the slots themselves are already parked at (0,0) when this returns).
#[derive(Clone, Copy, Debug)]
pub struct Hit {
    pub saucer_slot: usize,
    pub bullet_slot: usize,
    pub saucer_row: i32,
    pub saucer_col: i32,
    pub saucer_len: i32,
    pub bullet_row: i32,
    pub bullet_col: i32,
    pub bullet_len: i32,
}

/// Scan saucer×bullet pairs in ascending (saucer, bullet) slot order and
/// resolve the FIRST overlap found: the bullet dies, the saucer dies with
/// a fresh respawn countdown, the score goes up by one.  At most one pair
/// is resolved per invocation; because every animator runs this scan once
/// per tick, simultaneous overlaps still resolve within a few ticks.
pub fn collision_scan(table: &GameTable, rng: &mut impl Rng) -> Option<Hit> {
    let _scan = table.scan.lock();

    for (si, saucer_slot) in table.saucers.iter().enumerate() {
        let mut saucer = saucer_slot.lock();
        if !saucer.alive {
            continue;
        }
        for (bi, bullet_slot) in table.bullets.iter().enumerate() {
            let mut bullet = bullet_slot.lock();
            if !bullet.alive {
                continue;
            }
            let hit = bullet.row == saucer.row
                && bullet.col >= saucer.col - 1
                && bullet.col <= saucer.col + saucer.length() - 1;
            if !hit {
                continue;
            }

            let report = Hit {
                saucer_slot: si,
                bullet_slot: bi,
                saucer_row: saucer.row,
                saucer_col: saucer.col,
                saucer_len: saucer.length(),
                bullet_row: bullet.row,
                bullet_col: bullet.col,
                bullet_len: bullet.length(),
            };

            bullet.alive = false;
            bullet.row = 0;
            bullet.col = 0;
            saucer.kill(rng);
            *table.score.lock() += 1;

            return Some(report);
        }
    }
    None
}

// ── Firing ────────────────────────────────────────────────────────────────────

/// Claim the first dead bullet slot in index order and launch it from the
/// player's current column.  Returns the slot index, or `None` when every
/// slot is in flight (pool exhaustion is a normal condition, not an error).
pub fn fire_bullet(table: &GameTable) -> Option<usize> {
    let _fire = table.fire.lock();
    let col = table.player.lock().col;

    for (i, slot) in table.bullets.iter().enumerate() {
        let mut bullet = slot.lock();
        if !bullet.alive {
            bullet.alive = true;
            bullet.row = table.fire_row();
            bullet.col = col;
            return Some(i);
        }
    }
    None
}

// ── Player movement ───────────────────────────────────────────────────────────

pub fn move_player_left(table: &GameTable) {
    let mut player = table.player.lock();
    if player.col > 0 {
        player.col -= 1;
    }
}

pub fn move_player_right(table: &GameTable) {
    let mut player = table.player.lock();
    // the post-move position must keep col + length strictly inside the board
    if player.col + 1 + player.length() < table.cols {
        player.col += 1;
    }
}

// ── Per-kind tick steps ───────────────────────────────────────────────────────

/// Outcome of one saucer tick; positions are where to draw or blank.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaucerStep {
    /// Alive: draw the glyph here (the slot has already advanced a column).
    Flying { row: i32, col: i32, len: i32 },
    /// Reached the right edge this tick: blank the glyph here.
    Escaped { row: i32, col: i32, len: i32 },
    /// Dead and counting down (revival happens internally at zero);
    /// blank here, which is a visual no-op after the first dead tick.
    Waiting { row: i32, col: i32, len: i32 },
}

/// Advance saucer `slot` by one tick.
pub fn step_saucer(table: &GameTable, slot: usize, rng: &mut impl Rng) -> SaucerStep {
    let mut saucer = table.saucers[slot].lock();

    if saucer.alive {
        let (row, col, len) = (saucer.row, saucer.col, saucer.length());
        saucer.col += 1;
        if saucer.col + len >= table.cols {
            *table.escaped.lock() += 1;
            saucer.kill(rng);
            SaucerStep::Escaped { row, col, len }
        } else {
            SaucerStep::Flying { row, col, len }
        }
    } else {
        let step = SaucerStep::Waiting {
            row: saucer.row,
            col: saucer.col,
            len: saucer.length(),
        };
        saucer.respawn_countdown = saucer.respawn_countdown.saturating_sub(1);
        if saucer.respawn_countdown == 0 {
            saucer.revive(rng);
        }
        step
    }
}

/// Outcome of one bullet tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletStep {
    /// In flight: blank the old cell, draw one row up.
    Flying { row: i32, col: i32, len: i32 },
    /// Reached the top this tick: blank the old cell and the one above it.
    Expired { row: i32, col: i32, len: i32 },
    /// Dead slot: idempotent blank.
    Idle { row: i32, col: i32, len: i32 },
}

/// Advance bullet `slot` by one tick.  `row`/`col` in the returned step
/// are the pre-move position; a flying bullet is drawn at `row - 1`.
pub fn step_bullet(table: &GameTable, slot: usize) -> BulletStep {
    let mut bullet = table.bullets[slot].lock();
    let (row, col, len) = (bullet.row, bullet.col, bullet.length());

    if bullet.alive {
        bullet.row -= 1;
        if bullet.row <= 0 {
            bullet.alive = false;
            bullet.row = 0;
            bullet.col = 0;
            BulletStep::Expired { row, col, len }
        } else {
            BulletStep::Flying { row, col, len }
        }
    } else {
        BulletStep::Idle { row, col, len }
    }
}

// ── Status & termination ──────────────────────────────────────────────────────

/// True once enough saucers have escaped to end the game.
pub fn lost(table: &GameTable) -> bool {
    *table.escaped.lock() >= NUMLOSE
}

/// The status line the player animator redraws every tick.
pub fn status_text(table: &GameTable) -> String {
    let score = *table.score.lock();
    let escaped = *table.escaped.lock();
    format!(
        "Score: {score}   Escaped: {escaped}/{NUMLOSE}   'Q' quit  ',' left  '.' right  SPACE fire"
    )
}

// ── Input dispatch (the game loop) ────────────────────────────────────────────

/// The sole consumer of user input.  Blocks in short polls so the loss
/// condition is noticed even when no key arrives; exits on `Q` or when
/// `NUMLOSE` saucers have escaped.  Holds no lock while waiting.
pub fn run_input_loop(table: &GameTable, input: &mut dyn InputSource) {
    let poll = Duration::from_millis(INPUT_POLL_MS);
    loop {
        if lost(table) {
            log::info!("{} saucers escaped, game over", NUMLOSE);
            return;
        }
        match input.poll(poll) {
            Some(Key::Quit) => return,
            Some(Key::Left) => move_player_left(table),
            Some(Key::Right) => move_player_right(table),
            Some(Key::Fire) => {
                fire_bullet(table);
            }
            None => {}
        }
    }
}
