//! Dirt Blitz entry point
//!
//! Headless autoplay: a simple bot plays one session end to end so the full
//! loop - countdown, spawning, hits, power-ups, persistence - can be
//! watched through the log output.

use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use dirt_blitz::MiniGame;
use dirt_blitz::consts::ENERGY_FULL;
use dirt_blitz::progress::FileStore;
use dirt_blitz::sim::{FieldBounds, Phase};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let store = FileStore::new("dirt-blitz-progress.json");
    let game = MiniGame::new(FieldBounds::new(800.0, 600.0), Box::new(store), seed);

    let opening = game.progression();
    log::info!(
        "mounted at level {} (best so far {})",
        opening.level,
        opening.high_score
    );

    game.start();

    // Aim at the oldest blob a few times a second; burn the meter when full.
    loop {
        thread::sleep(Duration::from_millis(150));
        let s = game.snapshot();
        match s.phase {
            Phase::Playing => {
                if s.energy >= ENERGY_FULL {
                    game.activate_power_up();
                } else if let Some(d) = s.dirt.first() {
                    game.handle_pointer(d.pos.x, d.pos.y);
                }
            }
            Phase::LevelComplete | Phase::GameOver | Phase::Idle => break,
        }
    }

    let s = game.snapshot();
    let record = game.progression();
    println!(
        "{} - score {} of {} with the {}; last {}, best {}, next level {}",
        match s.phase {
            Phase::LevelComplete => "level complete",
            Phase::GameOver => "time up",
            _ => "stopped",
        },
        s.score,
        s.target_score,
        s.tool().label(),
        record.last_score,
        record.high_score,
        record.level
    );

    game.dispose();
}
