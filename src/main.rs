//! Binary entry point: terminal mode setup/teardown and wiring.
//!
//! Everything interesting happens in the library; this file only owns
//! the raw-mode/alternate-screen bracket, spawns the animators, runs the
//! input loop on the main thread and reports the final score.

use std::io::stdout;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use crossterm::{cursor, terminal, ExecutableCommand};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;

use saucer::animate::spawn_animators;
use saucer::compute::{self, run_input_loop};
use saucer::display::{Display, TermDisplay};
use saucer::entities::GameTable;
use saucer::input::TerminalInput;
use saucer::GameError;

fn main() {
    env_logger::init();

    match run() {
        Ok(score) => println!("Final score: {score}"),
        Err(err) => {
            eprintln!("saucer: {err}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<u32, GameError> {
    let (cols, rows) = terminal::size()?;

    terminal::enable_raw_mode()?;
    stdout().execute(terminal::EnterAlternateScreen)?;
    stdout().execute(cursor::Hide)?;
    stdout().execute(terminal::Clear(terminal::ClearType::All))?;

    let result = play(rows, cols);

    // Always restore the terminal, even on a fatal startup error
    let _ = stdout().execute(cursor::Show);
    let _ = stdout().execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn play(rows: u16, cols: u16) -> Result<u32, GameError> {
    // Seeded from the process identity: randomized per run, stable
    // within one process for debugging.
    let mut rng = StdRng::seed_from_u64(u64::from(std::process::id()));

    let table = Arc::new(GameTable::new(i32::from(rows), i32::from(cols), &mut rng));
    let display = Arc::new(Mutex::new(TermDisplay::new(rows)));
    display.lock().status(&compute::status_text(&table))?;

    let workers = spawn_animators(Arc::clone(&table), Arc::clone(&display))?;

    // Main thread is the sole input consumer; exits on 'Q' or when
    // enough saucers have escaped.
    let mut input = TerminalInput::new();
    run_input_loop(&table, &mut input);

    // Cooperative shutdown: every worker checks the flag at the top of
    // its iteration, so all locks are released before the join returns.
    table.stop.store(true, Ordering::Relaxed);
    for worker in workers {
        let _ = worker.join();
    }
    log::info!("all animators stopped");

    let score = *table.score.lock();
    Ok(score)
}
