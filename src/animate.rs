//! Animator layer: one free-running thread per entity.
//!
//! Every worker follows the same shape — check the stop flag, run the
//! global collision pass, sleep its private delay, then act on its own
//! slot and render the outcome.  The display mutex is the render lock
//! and is always the innermost lock taken.

use std::io;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::compute::{self, BulletStep, SaucerStep};
use crate::display::Display;
use crate::entities::{EntityKind, GameTable, MAXBLS, MAXSCR, TUNIT_MS};
use crate::GameError;

/// Glyphs are drawn with one space of padding each side, so a moving
/// entity blanks the cell it vacated with its own draw.
fn padded(label: &str) -> String {
    format!(" {label} ")
}

fn sleep_ticks(delay: u32) {
    thread::sleep(Duration::from_millis(u64::from(delay) * TUNIT_MS));
}

/// A failed draw must not kill a worker; log it and keep animating.
fn log_render(result: io::Result<()>) {
    if let Err(err) = result {
        log::warn!("render failed: {err}");
    }
}

// ── Spawning ──────────────────────────────────────────────────────────────────

/// Spawn one named worker per entity: the player, every saucer slot and
/// every bullet slot.  Any spawn failure is fatal: the partial set is
/// stopped and joined before the error is returned.
pub fn spawn_animators<D>(
    table: Arc<GameTable>,
    display: Arc<Mutex<D>>,
) -> Result<Vec<JoinHandle<()>>, GameError>
where
    D: Display + Send + 'static,
{
    // Workers are seeded from the process identity, offset per slot, so a
    // run is randomized per process but distinct across workers.
    let pid = u64::from(std::process::id());
    let mut handles = Vec::with_capacity(1 + MAXSCR + MAXBLS);

    let result: Result<(), GameError> = (|| {
        {
            let table = Arc::clone(&table);
            let display = Arc::clone(&display);
            let mut rng = StdRng::seed_from_u64(pid);
            handles.push(spawn_one("player".to_string(), move || {
                player_loop(&table, &display, &mut rng)
            })?);
        }
        for slot in 0..MAXSCR {
            let table = Arc::clone(&table);
            let display = Arc::clone(&display);
            let mut rng = StdRng::seed_from_u64(pid.wrapping_add(1 + slot as u64));
            handles.push(spawn_one(format!("saucer-{slot}"), move || {
                saucer_loop(&table, &display, slot, &mut rng)
            })?);
        }
        for slot in 0..MAXBLS {
            let table = Arc::clone(&table);
            let display = Arc::clone(&display);
            let mut rng = StdRng::seed_from_u64(pid.wrapping_add(100 + slot as u64));
            handles.push(spawn_one(format!("bullet-{slot}"), move || {
                bullet_loop(&table, &display, slot, &mut rng)
            })?);
        }
        Ok(())
    })();

    if let Err(err) = result {
        table.stop.store(true, Ordering::Relaxed);
        for handle in handles {
            let _ = handle.join();
        }
        return Err(err);
    }

    log::info!("spawned {} animator threads", handles.len());
    Ok(handles)
}

fn spawn_one<F>(name: String, body: F) -> Result<JoinHandle<()>, GameError>
where
    F: FnOnce() + Send + 'static,
{
    thread::Builder::new()
        .name(name.clone())
        .spawn(body)
        .map_err(|source| GameError::Spawn { name, source })
}

// ── Shared collision pass ─────────────────────────────────────────────────────

/// Every animator re-runs the global scan at the top of its own tick.
/// On a hit the dying glyphs are blanked here, at their pre-reset
/// positions; the slots themselves are already parked at (0,0).
fn collision_pass<D: Display>(table: &GameTable, display: &Mutex<D>, rng: &mut StdRng) {
    if let Some(hit) = compute::collision_scan(table, rng) {
        log::debug!(
            "bullet {} shot saucer {} at row {}",
            hit.bullet_slot,
            hit.saucer_slot,
            hit.saucer_row
        );
        let mut d = display.lock();
        log_render(d.clear(hit.saucer_row, hit.saucer_col, hit.saucer_len));
        log_render(d.clear(hit.bullet_row, hit.bullet_col, hit.bullet_len));
    }
}

// ── Per-kind loops ────────────────────────────────────────────────────────────

fn player_loop<D: Display>(table: &GameTable, display: &Mutex<D>, rng: &mut StdRng) {
    let text = padded(EntityKind::Player.label());
    while !table.stop.load(Ordering::Relaxed) {
        collision_pass(table, display, rng);
        sleep_ticks(table.player.lock().tick_delay);

        // Build the status text before touching the display: status_text
        // takes the score and escaped locks, and render must stay innermost.
        let status = compute::status_text(table);
        log_render(display.lock().status(&status));

        // Redraw under the move lock so the glyph never lands on a stale
        // column; render lock innermost.
        let player = table.player.lock();
        log_render(
            display
                .lock()
                .draw(player.row, player.col, player.kind, &text),
        );
    }
}

fn saucer_loop<D: Display>(table: &GameTable, display: &Mutex<D>, slot: usize, rng: &mut StdRng) {
    let text = padded(EntityKind::Saucer.label());
    while !table.stop.load(Ordering::Relaxed) {
        collision_pass(table, display, rng);
        sleep_ticks(table.saucers[slot].lock().tick_delay);

        match compute::step_saucer(table, slot, rng) {
            SaucerStep::Flying { row, col, .. } => {
                log_render(display.lock().draw(row, col, EntityKind::Saucer, &text));
            }
            SaucerStep::Escaped { row, col, len } => {
                log::debug!("saucer {slot} escaped on row {row}");
                log_render(display.lock().clear(row, col, len));
            }
            SaucerStep::Waiting { row, col, len } => {
                log_render(display.lock().clear(row, col, len));
            }
        }
    }
}

fn bullet_loop<D: Display>(table: &GameTable, display: &Mutex<D>, slot: usize, rng: &mut StdRng) {
    let text = padded(EntityKind::Bullet.label());
    while !table.stop.load(Ordering::Relaxed) {
        collision_pass(table, display, rng);
        sleep_ticks(table.bullets[slot].lock().tick_delay);

        match compute::step_bullet(table, slot) {
            BulletStep::Flying { row, col, len } => {
                let mut d = display.lock();
                log_render(d.clear(row, col, len));
                log_render(d.draw(row - 1, col, EntityKind::Bullet, &text));
            }
            BulletStep::Expired { row, col, len } => {
                let mut d = display.lock();
                log_render(d.clear(row, col, len));
                log_render(d.clear((row - 1).max(0), col, len));
            }
            BulletStep::Idle { row, col, len } => {
                log_render(display.lock().clear(row, col, len));
            }
        }
    }
}
