//! Player physics
//!
//! Per-frame integration of the player: lane-change smoothing, ground-height
//! resolution against solid obstacles (ramp inclines, train roofs), gravity,
//! the run/jump/roll movement machine, and speed progression.

use super::state::{AudioCue, GameState, MoveState, ObstacleKind};
use super::tick::TickInput;
use crate::consts::*;
use crate::{ease_exp, move_toward};

/// Height of a ramp's surface at the given player-relative z, valid inside
/// the ramp's longitudinal window (linear incline from 0 at the near edge
/// to the full ramp height at the far edge)
#[inline]
pub fn ramp_surface_height(ramp_z: f32, real_z: f32) -> f32 {
    let near = ramp_z + RAMP_HALF_DEPTH;
    let progress = ((near - real_z) / (RAMP_HALF_DEPTH * 2.0)).clamp(0.0, 1.0);
    progress * RAMP_HEIGHT
}

/// Resolve the ground height under the player for this frame: the maximum
/// candidate over all solid obstacles near the target lane, or the track
/// floor at 0
pub fn resolve_ground_height(state: &GameState) -> f32 {
    let real_z = state.player_real_z();
    let target_x = state.target_lane_x();
    let mut ground = 0.0f32;

    for obstacle in &state.obstacles {
        if !obstacle.kind.is_solid() {
            continue;
        }
        if (obstacle.x - target_x).abs() >= GROUND_QUERY_HALF_WIDTH {
            continue;
        }
        let candidate = match obstacle.kind {
            ObstacleKind::Ramp => {
                if (obstacle.z - real_z).abs() > RAMP_HALF_DEPTH {
                    continue;
                }
                ramp_surface_height(obstacle.z, real_z)
            }
            ObstacleKind::Train => {
                let half = obstacle.depth / 2.0 + BROAD_Z_PAD;
                // A train roof only carries a player who arrived high enough
                // (via a ramp or a jump); lower players hit its face instead
                if (obstacle.z - real_z).abs() > half || state.player.y < TRAIN_MOUNT_HEIGHT {
                    continue;
                }
                TRAIN_HEIGHT
            }
            _ => continue,
        };
        ground = ground.max(candidate);
    }
    ground
}

/// Advance the player by one frame
pub fn step_player(state: &mut GameState, input: &TickInput, dt: f32) {
    // Lane intents, clamped silently at the outer lanes
    if input.lane_left && state.player.lane > 0 {
        state.player.lane -= 1;
        state.push_cue(AudioCue::Swipe);
    }
    if input.lane_right && state.player.lane + 1 < NUM_LANES {
        state.player.lane += 1;
        state.push_cue(AudioCue::Swipe);
    }
    let target_x = state.target_lane_x();
    state.player.x = ease_exp(state.player.x, target_x, LANE_SMOOTH_RATE, dt);

    state.player.ground_y = resolve_ground_height(state);

    // Gravity, then landing
    state.player.vy -= GRAVITY * dt;
    state.player.y += state.player.vy * dt;
    if state.player.y < state.player.ground_y {
        state.player.y = state.player.ground_y;
        state.player.vy = 0.0;
        if state.player.move_state == MoveState::Jump {
            state.player.move_state = MoveState::Run;
        }
    }

    // Roll runs on a fixed timer
    if state.player.move_state == MoveState::Roll {
        state.player.roll_timer -= dt;
        if state.player.roll_timer <= 0.0 {
            state.player.move_state = MoveState::Run;
        }
    }

    // Jump/duck intents apply after integration so the impulse carries into
    // the next frame untouched
    if input.jump && state.player.y <= state.player.ground_y + JUMP_GROUND_SLACK {
        state.player.move_state = MoveState::Jump;
        state.player.vy = JUMP_SPEED;
        state.push_cue(AudioCue::Jump);
    }
    if input.duck && state.player.move_state != MoveState::Roll {
        state.player.move_state = MoveState::Roll;
        state.player.roll_timer = ROLL_DURATION;
        if state.player.y > state.player.ground_y + ROLL_DIVE_HEIGHT {
            // Airborne duck snaps the player down fast
            state.player.vy = ROLL_DIVE_SPEED;
        }
        state.push_cue(AudioCue::Roll);
    }

    if state.player.invuln_timer > 0.0 {
        state.player.invuln_timer = (state.player.invuln_timer - dt).max(0.0);
    }

    // Speed progression: ease toward a target that itself creeps upward
    state.player.speed = move_toward(
        state.player.speed,
        state.player.target_speed,
        SPEED_EASE_RATE * dt,
    );
    state.player.target_speed =
        (state.player.target_speed + TARGET_SPEED_CREEP * dt).min(MAX_SPEED);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Obstacle;
    use proptest::prelude::*;

    fn push_obstacle(state: &mut GameState, kind: ObstacleKind, x: f32, z: f32, depth: f32) {
        let id = state.next_entity_id();
        let height = match kind {
            ObstacleKind::BarrierLow => BARRIER_LOW_HEIGHT,
            ObstacleKind::BarrierHigh => BARRIER_HIGH_HEIGHT,
            _ => TRAIN_HEIGHT,
        };
        state.obstacles.push(Obstacle {
            id,
            kind,
            x,
            z,
            width: 2.0,
            height,
            depth,
        });
    }

    #[test]
    fn test_jump_sets_state_and_impulse() {
        let mut state = GameState::new(1);
        state.session.phase = crate::sim::state::RunPhase::Running;
        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        step_player(&mut state, &input, 1.0 / 60.0);
        assert_eq!(state.player.move_state, MoveState::Jump);
        assert_eq!(state.player.vy, JUMP_SPEED);
    }

    #[test]
    fn test_jump_rejected_while_airborne() {
        let mut state = GameState::new(1);
        state.player.y = 1.0;
        state.player.vy = 6.0;
        state.player.move_state = MoveState::Jump;
        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        step_player(&mut state, &input, 1.0 / 60.0);
        assert_ne!(state.player.vy, JUMP_SPEED);
    }

    #[test]
    fn test_landing_reverts_jump_to_run() {
        let mut state = GameState::new(1);
        state.player.y = 0.1;
        state.player.vy = -8.0;
        state.player.move_state = MoveState::Jump;
        step_player(&mut state, &TickInput::default(), 1.0 / 60.0);
        assert_eq!(state.player.y, 0.0);
        assert_eq!(state.player.vy, 0.0);
        assert_eq!(state.player.move_state, MoveState::Run);
    }

    #[test]
    fn test_airborne_duck_dives() {
        let mut state = GameState::new(1);
        state.player.y = 2.0;
        state.player.vy = 0.0;
        state.player.move_state = MoveState::Jump;
        let input = TickInput {
            duck: true,
            ..Default::default()
        };
        step_player(&mut state, &input, 1.0 / 60.0);
        assert_eq!(state.player.move_state, MoveState::Roll);
        assert_eq!(state.player.vy, ROLL_DIVE_SPEED);
    }

    #[test]
    fn test_roll_expires_to_run() {
        let mut state = GameState::new(1);
        state.player.move_state = MoveState::Roll;
        state.player.roll_timer = ROLL_DURATION;
        let dt = 0.05;
        let steps = (ROLL_DURATION / dt).ceil() as usize;
        for _ in 0..steps {
            step_player(&mut state, &TickInput::default(), dt);
        }
        assert_eq!(state.player.move_state, MoveState::Run);
    }

    #[test]
    fn test_lane_clamped_at_edges() {
        let mut state = GameState::new(1);
        state.player.lane = 0;
        let input = TickInput {
            lane_left: true,
            ..Default::default()
        };
        step_player(&mut state, &input, 1.0 / 60.0);
        assert_eq!(state.player.lane, 0);

        state.player.lane = 2;
        let input = TickInput {
            lane_right: true,
            ..Default::default()
        };
        step_player(&mut state, &input, 1.0 / 60.0);
        assert_eq!(state.player.lane, 2);
    }

    #[test]
    fn test_train_never_lifts_low_player() {
        let mut state = GameState::new(1);
        push_obstacle(&mut state, ObstacleKind::Train, 0.0, -5.0, 12.0);
        state.world_offset = 5.0; // player real z = -5, dead center of the train
        state.player.y = 2.9;
        assert_eq!(resolve_ground_height(&state), 0.0);

        state.player.y = 3.0;
        assert_eq!(resolve_ground_height(&state), TRAIN_HEIGHT);
    }

    #[test]
    fn test_ramp_incline_endpoints() {
        let mut state = GameState::new(1);
        push_obstacle(&mut state, ObstacleKind::Ramp, 0.0, -10.0, RAMP_HALF_DEPTH * 2.0);

        // Near edge: z = -6
        state.world_offset = 6.0;
        assert!(resolve_ground_height(&state).abs() < 1e-5);
        // Center: half height
        state.world_offset = 10.0;
        assert!((resolve_ground_height(&state) - RAMP_HEIGHT / 2.0).abs() < 1e-5);
        // Far edge: full height
        state.world_offset = 14.0;
        assert!((resolve_ground_height(&state) - RAMP_HEIGHT).abs() < 1e-5);
    }

    #[test]
    fn test_ground_uses_target_lane_not_current_x() {
        let mut state = GameState::new(1);
        push_obstacle(&mut state, ObstacleKind::Ramp, crate::lane_x(0), -10.0, 8.0);
        state.world_offset = 10.0;
        state.player.lane = 0;
        state.player.x = 1.8; // still sliding over from the right
        assert!(resolve_ground_height(&state) > 0.0);
    }

    #[test]
    fn test_speed_progression_capped() {
        let mut state = GameState::new(1);
        state.player.speed = MAX_SPEED - 0.01;
        state.player.target_speed = MAX_SPEED;
        for _ in 0..10_000 {
            step_player(&mut state, &TickInput::default(), 0.05);
        }
        assert!(state.player.speed <= MAX_SPEED);
        assert_eq!(state.player.target_speed, MAX_SPEED);
    }

    proptest! {
        /// Ramp ground height is exactly the clamped linear incline and
        /// grows monotonically as the player advances (real z decreasing)
        #[test]
        fn prop_ramp_monotonic(ramp_z in -200.0f32..0.0, offset in 0.0f32..8.0) {
            let mut state = GameState::new(1);
            state.obstacles.push(Obstacle {
                id: 1,
                kind: ObstacleKind::Ramp,
                x: 0.0,
                z: ramp_z,
                width: RAMP_WIDTH,
                height: RAMP_HEIGHT,
                depth: RAMP_HALF_DEPTH * 2.0,
            });

            let real_z = ramp_z + RAMP_HALF_DEPTH - offset;
            state.world_offset = -real_z;
            let h = resolve_ground_height(&state);
            let expected = ((ramp_z + RAMP_HALF_DEPTH - real_z) / (RAMP_HALF_DEPTH * 2.0))
                .clamp(0.0, 1.0)
                * RAMP_HEIGHT;
            prop_assert!((h - expected).abs() < 1e-4);

            // A step further along the ramp is never lower
            let deeper = (real_z - 0.25).max(ramp_z - RAMP_HALF_DEPTH);
            state.world_offset = -deeper;
            prop_assert!(resolve_ground_height(&state) + 1e-4 >= h);
        }
    }
}
