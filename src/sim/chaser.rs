//! Chaser pursuit AI
//!
//! The chaser never collides with anything; it just eases a following
//! distance and a lateral offset toward targets driven by the player's
//! status, which reads as "catching up" whenever the player falters.

use super::state::{GameState, RunPhase};
use crate::consts::*;
use crate::ease_exp;

/// Following distance the chaser is currently working toward
pub fn target_distance(state: &GameState) -> f32 {
    if matches!(state.session.phase, RunPhase::Caught | RunPhase::GameOver) {
        CHASE_DIST_CAUGHT
    } else if state.player.is_invulnerable() {
        CHASE_DIST_INVULN
    } else {
        CHASE_DIST_DEFAULT
    }
}

/// Advance the chaser by one frame
pub fn step_chaser(state: &mut GameState, dt: f32) {
    let target = target_distance(state);
    state.chaser.distance = ease_exp(state.chaser.distance, target, CHASE_DIST_RATE, dt);
    state.chaser.x = ease_exp(state.chaser.x, state.player.x, CHASE_X_RATE, dt);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_targets_by_status() {
        let mut state = GameState::new(1);
        state.session.phase = RunPhase::Running;
        assert_eq!(target_distance(&state), CHASE_DIST_DEFAULT);

        state.player.invuln_timer = 0.5;
        assert_eq!(target_distance(&state), CHASE_DIST_INVULN);

        state.session.phase = RunPhase::Caught;
        assert_eq!(target_distance(&state), CHASE_DIST_CAUGHT);
    }

    #[test]
    fn test_distance_shrinks_while_player_is_down() {
        let mut state = GameState::new(1);
        state.session.phase = RunPhase::Running;
        state.player.invuln_timer = 10.0;

        let start = state.chaser.distance;
        for _ in 0..20 {
            step_chaser(&mut state, 0.05);
        }
        assert!(state.chaser.distance < start);
        assert!(state.chaser.distance > CHASE_DIST_INVULN);
    }

    #[test]
    fn test_lateral_tracking_converges_on_player() {
        let mut state = GameState::new(1);
        state.player.x = 2.0;
        for _ in 0..200 {
            step_chaser(&mut state, 0.05);
        }
        assert!((state.chaser.x - 2.0).abs() < 0.01);
    }

    #[test]
    fn test_chaser_converges_once_caught() {
        let mut state = GameState::new(1);
        state.session.phase = RunPhase::Caught;
        for _ in 0..200 {
            step_chaser(&mut state, 0.05);
        }
        assert!((state.chaser.distance - CHASE_DIST_CAUGHT).abs() < 0.01);
    }
}
