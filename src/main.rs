//! Headless demo driver
//!
//! Runs the simulation with a scripted input sequence at a fixed 60 Hz,
//! draining scene commands and events the way an embedding host would, and
//! prints a run summary. Useful for profiling and for eyeballing world-gen
//! with `RUST_LOG=debug`.

use rail_rush::sim::{GameEvent, GameState, TickInput, tick};
use rail_rush::{HighScoreStore, JsonFileStore};

const DT: f32 = 1.0 / 60.0;
const MAX_FRAMES: u32 = 60 * 120;

fn scripted_input(frame: u32) -> TickInput {
    TickInput {
        start: frame == 0,
        lane_left: frame % 173 == 50,
        lane_right: frame % 211 == 90,
        jump: frame % 47 == 20,
        duck: frame % 89 == 60,
        ..Default::default()
    }
}

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);

    let mut store = JsonFileStore::open("rail-rush-scores.json");
    let mut state = GameState::new(seed);
    state.best_score = store.get();

    let mut spawned = 0usize;
    let mut removed = 0usize;

    for frame in 0..MAX_FRAMES {
        tick(&mut state, &scripted_input(frame), DT);

        for command in state.take_scene_commands() {
            match command {
                rail_rush::sim::SceneCommand::Spawn { .. } => spawned += 1,
                rail_rush::sim::SceneCommand::Hide { .. }
                | rail_rush::sim::SceneCommand::Remove { .. } => removed += 1,
            }
        }

        for event in state.take_events() {
            if let GameEvent::GameOver {
                score,
                coins,
                is_new_high,
                ..
            } = event
            {
                if is_new_high {
                    store.set(score);
                }
                let hud = state.hud();
                println!(
                    "run over after {frame} frames: score {score} (hud {}), {coins} coins{}",
                    hud.score,
                    if is_new_high { ", new best!" } else { "" }
                );
                println!("scene traffic: {spawned} spawns, {removed} hides/removes");
                return;
            }
        }
    }

    let hud = state.hud();
    println!(
        "survived {MAX_FRAMES} frames: score {}, {} coins, distance {:.0}",
        hud.score, hud.coins, state.session.distance
    );
    println!("scene traffic: {spawned} spawns, {removed} hides/removes");
}
