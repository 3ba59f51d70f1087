//! Collision and pickup detection
//!
//! Broad-phase tests the player against every live obstacle, classifies
//! hits by obstacle kind, and grades them into stumble vs catch based on
//! how close the chaser is. Coin pickup is independent of obstacle checks.

use super::physics::ramp_surface_height;
use super::state::{AudioCue, GameState, MoveState, ObstacleKind, SceneCommand};
use crate::consts::*;

/// Severity of an obstacle hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    /// Recoverable: speed loss plus an invulnerability window
    Stumble,
    /// Terminal: the chaser was close enough to grab the player
    Catch,
}

/// Test the player against all obstacles; returns the graded hit, if any.
/// No hits are registered while post-stumble invulnerability is active.
pub fn check_player_collision(state: &GameState) -> Option<Impact> {
    let player = &state.player;
    if player.is_invulnerable() {
        return None;
    }
    let real_z = state.player_real_z();

    for obstacle in &state.obstacles {
        if (obstacle.z - real_z).abs() > obstacle.depth / 2.0 + BROAD_Z_PAD {
            continue;
        }
        if (obstacle.x - player.x).abs() > obstacle.width / 2.0 + BROAD_X_PAD {
            continue;
        }
        let hit = match obstacle.kind {
            // Struck the face rather than cleared the top
            ObstacleKind::Train => player.y < obstacle.height - SOLID_CLEARANCE,
            // The ramp's "face" is its incline: only being below the local
            // surface (a mid-ramp side entry) counts as a hit
            ObstacleKind::Ramp => {
                player.y < ramp_surface_height(obstacle.z, real_z) - SOLID_CLEARANCE
            }
            ObstacleKind::BarrierLow => player.y < LOW_BARRIER_TRIP_Y,
            ObstacleKind::BarrierHigh => {
                player.y > HIGH_BARRIER_BONK_Y && player.move_state != MoveState::Roll
            }
        };
        if hit {
            return Some(if state.chaser.distance < CATCH_DISTANCE {
                Impact::Catch
            } else {
                Impact::Stumble
            });
        }
    }
    None
}

/// Collect every coin within the pickup window. Already-collected coins are
/// skipped, so pickup is idempotent.
pub fn collect_coins(state: &mut GameState) {
    let real_z = state.player_real_z();
    let px = state.player.x;
    let py = state.player.y;

    let mut picked = Vec::new();
    for coin in &mut state.coins {
        if coin.collected {
            continue;
        }
        if (coin.z - real_z).abs() < COIN_PICKUP_Z
            && (coin.x - px).abs() < COIN_PICKUP_X
            && (py - coin.y).abs() < COIN_PICKUP_Y
        {
            coin.collected = true;
            picked.push(coin.id);
        }
    }

    for id in picked {
        state.scene.push(SceneCommand::Hide { id });
        state.push_cue(AudioCue::Coin);
        state.session.coins += 1;
        state.session.score += COIN_SCORE;
    }
}
