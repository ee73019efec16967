//! A multi-threaded terminal saucer shooter.
//!
//! One player, a fixed pool of rightward-drifting saucers and a fixed
//! pool of player-fired bullets, each driven by its own free-running
//! animator thread over a single shared entity table.  Coordination is
//! a handful of narrowly-scoped locks plus a cooperative stop flag; the
//! terminal itself sits behind the `Display` and `InputSource` traits.

use std::io;

use thiserror::Error;

pub mod animate;
pub mod compute;
pub mod display;
pub mod entities;
pub mod input;

/// The crate's (deliberately small) error taxonomy.  Everything fatal is
/// either terminal I/O at startup/teardown or a failed worker spawn;
/// runtime conditions like bullet-pool exhaustion are not errors.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to start {name} animator: {source}")]
    Spawn { name: String, source: io::Error },
}
