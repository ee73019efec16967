//! Entity model and the shared game table.
//!
//! Pure data plus the lock layout.  One `Mutex<Entity>` per slot, one
//! `Mutex` per process-wide counter, and two zero-sized concern locks
//! (`fire`, `scan`) that serialize the multi-slot operations.  All game
//! logic lives in `compute`.

use std::sync::atomic::AtomicBool;

use parking_lot::Mutex;
use rand::Rng;

// ── Fixed pool sizes and timing ───────────────────────────────────────────────

/// Number of saucer slots.
pub const MAXSCR: usize = 10;
/// Number of bullet slots (the reusable fire pool).
pub const MAXBLS: usize = 10;
/// Escaped saucers that end the game.
pub const NUMLOSE: u32 = 10;
/// Bottom-most row a saucer may occupy; saucer rows fall in [1, ROWSCRS].
pub const ROWSCRS: i32 = 10;
/// One timing unit in milliseconds; every `tick_delay` is a multiple of this.
pub const TUNIT_MS: u64 = 20;
/// Player animator delay, in timing units.
pub const PLAYER_DELAY: u32 = 5;
/// Bullet animator delay, in timing units.
pub const BULLET_DELAY: u32 = 5;

// ── Entity ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Saucer,
    Bullet,
}

impl EntityKind {
    /// The fixed display glyph for this kind.
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Player => "|",
            EntityKind::Saucer => "<--->",
            EntityKind::Bullet => "^",
        }
    }
}

/// One simulated object.  Slot roles are fixed at startup; an entity is
/// never destroyed, only toggled alive/dead and repositioned.
#[derive(Clone, Debug)]
pub struct Entity {
    pub kind: EntityKind,
    pub alive: bool,
    /// Ticks remaining before a dead saucer revives; unused otherwise.
    pub respawn_countdown: u32,
    pub row: i32,
    pub col: i32,
    /// Private sleep interval, in timing units.
    pub tick_delay: u32,
}

impl Entity {
    /// Draw/clear width: glyph plus one space of padding each side.
    pub fn length(&self) -> i32 {
        self.kind.label().chars().count() as i32 + 2
    }

    /// The always-alive player, centred on its fixed bottom row.
    pub fn player(rows: i32, cols: i32) -> Self {
        Entity {
            kind: EntityKind::Player,
            alive: true,
            respawn_countdown: 0,
            row: rows - 2,
            col: cols / 2,
            tick_delay: PLAYER_DELAY,
        }
    }

    /// An alive saucer on a random row with a random speed and column.
    pub fn saucer(rng: &mut impl Rng, cols: i32) -> Self {
        let mut e = Entity {
            kind: EntityKind::Saucer,
            alive: true,
            respawn_countdown: 0,
            row: rng.gen_range(1..=ROWSCRS),
            col: 0,
            tick_delay: rng.gen_range(1..=20),
        };
        // leave room for the padded glyph at spawn
        e.col = rng.gen_range(0..(cols - e.length()).max(1));
        e
    }

    /// A dead bullet slot, ready for allocation by a fire request.
    pub fn bullet() -> Self {
        Entity {
            kind: EntityKind::Bullet,
            alive: false,
            respawn_countdown: 0,
            row: 0,
            col: 0,
            tick_delay: BULLET_DELAY,
        }
    }

    /// Kill a saucer: fresh respawn countdown and speed, parked at (0,0).
    /// The row is re-randomized on revival, not here.
    pub fn kill(&mut self, rng: &mut impl Rng) {
        self.alive = false;
        self.respawn_countdown = rng.gen_range(1..=100);
        self.tick_delay = rng.gen_range(1..=20);
        self.row = 0;
        self.col = 0;
    }

    /// Revive a dead saucer on a fresh random row at the left edge.
    pub fn revive(&mut self, rng: &mut impl Rng) {
        self.alive = true;
        self.row = rng.gen_range(1..=ROWSCRS);
        self.col = 0;
    }
}

// ── Shared table ──────────────────────────────────────────────────────────────

/// The single shared mutable resource: every entity slot plus the two
/// process-wide counters, each behind its own narrowly-scoped lock.
///
/// Lock order (outermost first): `fire`/`scan` → entity mutex →
/// `score`/`escaped` → the render lock held by the animator layer.
/// Animators run the collision scan *before* locking their own slot, so
/// the ordering is acyclic and no deadlock is possible.
pub struct GameTable {
    /// Board extents captured once at startup.
    pub rows: i32,
    pub cols: i32,
    /// Slot 0 of the table.  This mutex doubles as the player-move lock.
    pub player: Mutex<Entity>,
    pub saucers: Vec<Mutex<Entity>>,
    pub bullets: Vec<Mutex<Entity>>,
    pub score: Mutex<u32>,
    pub escaped: Mutex<u32>,
    /// Serializes bullet-slot allocation.
    pub fire: Mutex<()>,
    /// Serializes collision scans.
    pub scan: Mutex<()>,
    /// Cooperative shutdown signal, checked at the top of every animator
    /// iteration.
    pub stop: AtomicBool,
}

impl GameTable {
    /// Allocate the whole table: one player, `MAXSCR` alive saucers with
    /// randomized rows/speeds, `MAXBLS` dead bullet slots.
    pub fn new(rows: i32, cols: i32, rng: &mut impl Rng) -> Self {
        GameTable {
            rows,
            cols,
            player: Mutex::new(Entity::player(rows, cols)),
            saucers: (0..MAXSCR)
                .map(|_| Mutex::new(Entity::saucer(rng, cols)))
                .collect(),
            bullets: (0..MAXBLS).map(|_| Mutex::new(Entity::bullet())).collect(),
            score: Mutex::new(0),
            escaped: Mutex::new(0),
            fire: Mutex::new(()),
            scan: Mutex::new(()),
            stop: AtomicBool::new(false),
        }
    }

    /// Row a freshly fired bullet starts on.
    pub fn fire_row(&self) -> i32 {
        self.rows - 3
    }
}
