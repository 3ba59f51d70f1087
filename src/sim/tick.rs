//! Frame step and run state machine
//!
//! One `tick` per rendered frame: the run phase gates whether physics runs,
//! then the frame proceeds player physics → collision grading → chaser →
//! world streaming → scoring, pushing scene commands and events for the
//! host to drain afterwards.

use super::chaser;
use super::collision::{self, Impact};
use super::physics;
use super::state::{AudioCue, GameEvent, GameOverReason, GameState, RunPhase, SceneCommand};
use super::track;
use crate::consts::*;

/// Input intents for a single frame; edge-triggered, consumed on read
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub lane_left: bool,
    pub lane_right: bool,
    pub jump: bool,
    pub duck: bool,
    /// Toggles between running and paused
    pub pause: bool,
    /// Starts a run from the menu or game-over screen
    pub start: bool,
    /// Quits to the menu from any state
    pub quit: bool,
}

/// Advance the simulation by one frame. `dt` is clamped so a stalled frame
/// source (tab suspension) cannot tunnel the player through obstacles.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = dt.clamp(0.0, MAX_DT);

    if input.quit {
        if state.session.phase != RunPhase::Menu {
            log::info!("quit to menu");
            state.session.phase = RunPhase::Menu;
            state.events.push(GameEvent::MusicStop);
        }
        return;
    }

    if input.start
        && matches!(state.session.phase, RunPhase::Menu | RunPhase::GameOver)
    {
        start_run(state);
        return;
    }

    if input.pause {
        match state.session.phase {
            RunPhase::Running => {
                state.session.phase = RunPhase::Paused;
                return;
            }
            RunPhase::Paused => state.session.phase = RunPhase::Running,
            _ => {}
        }
    }

    match state.session.phase {
        RunPhase::Running => run_frame(state, input, dt),
        RunPhase::Caught => caught_frame(state, dt),
        RunPhase::Menu | RunPhase::Paused | RunPhase::GameOver => {}
    }
}

/// Reset everything and begin a new run
pub fn start_run(state: &mut GameState) {
    // Tear down the old world's visuals
    let mut stale = Vec::new();
    for chunk in state.chunks.drain(..) {
        stale.extend(chunk.handles);
    }
    stale.extend(state.obstacles.drain(..).map(|o| o.id));
    stale.extend(state.coins.drain(..).map(|c| c.id));
    for id in stale {
        state.scene.push(SceneCommand::Remove { id });
    }

    state.world_offset = 0.0;
    state.run_time = 0.0;
    state.caught_timer = 0.0;
    state.player = Default::default();
    state.chaser = Default::default();

    let generation = state.session.generation + 1;
    state.session = Default::default();
    state.session.generation = generation;
    state.session.phase = RunPhase::Running;

    track::seed_world(state);
    state.events.push(GameEvent::MusicStart);
    log::info!("run {generation} started (seed {})", state.seed);
}

fn run_frame(state: &mut GameState, input: &TickInput, dt: f32) {
    state.run_time += dt;
    let move_dist = state.player.speed * dt;

    physics::step_player(state, input, dt);

    match collision::check_player_collision(state) {
        Some(Impact::Catch) => enter_caught(state),
        Some(Impact::Stumble) => apply_stumble(state),
        None => {}
    }
    collision::collect_coins(state);

    chaser::step_chaser(state, dt);

    state.world_offset += move_dist;
    track::stream(state);

    // Score accrues only while still running; a catch this frame froze it
    if state.session.phase == RunPhase::Running {
        state.session.distance += move_dist;
        state.session.score += move_dist * SCORE_PER_UNIT;
    }
}

fn caught_frame(state: &mut GameState, dt: f32) {
    state.run_time += dt;
    // The chaser closes the last gap for the capture framing
    chaser::step_chaser(state, dt);

    state.caught_timer -= dt;
    if state.caught_timer <= 0.0 {
        finish_game_over(state);
    }
}

fn apply_stumble(state: &mut GameState) {
    state.player.invuln_timer = STUMBLE_INVULN;
    state.player.speed *= STUMBLE_SPEED_FACTOR;
    state.player.vy = STUMBLE_POP_VY;
    state.push_cue(AudioCue::Crash);
    log::debug!(
        "stumble at distance {:.1}, speed now {:.1}",
        state.session.distance,
        state.player.speed
    );
}

fn enter_caught(state: &mut GameState) {
    state.session.phase = RunPhase::Caught;
    state.player.speed = 0.0;
    state.player.target_speed = 0.0;
    state.caught_timer = CAUGHT_TO_GAMEOVER;
    state.events.push(GameEvent::MusicStop);
    state.push_cue(AudioCue::Crash);
    log::info!(
        "caught at distance {:.1} with score {}",
        state.session.distance,
        state.session.score.floor()
    );
}

fn finish_game_over(state: &mut GameState) {
    state.session.phase = RunPhase::GameOver;
    let score = state.session.score.floor() as u64;
    let is_new_high = score > state.best_score;
    if is_new_high {
        state.best_score = score;
    }
    state.events.push(GameEvent::GameOver {
        reason: GameOverReason::Caught,
        score,
        coins: state.session.coins,
        is_new_high,
    });
    log::info!(
        "game over: score {score}, coins {}, new high: {is_new_high}",
        state.session.coins
    );
}
