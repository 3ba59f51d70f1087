//! Character poses and per-frame transforms for the scene collaborator
//!
//! Poses are pure functions of (movement state, phase time): nothing here
//! accumulates, so a rig can always be reposed from scratch for any frame.

use std::f32::consts::{PI, TAU};

use glam::{Quat, Vec3};

use super::state::{GameState, MoveState, RunPhase, Transform};
use crate::consts::*;

/// Fixed-shape pose for a humanoid rig
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterPose {
    /// Arm swing angle (radians, mirrored between arms)
    pub arm_swing: f32,
    /// Leg swing angle (radians, mirrored between legs)
    pub leg_swing: f32,
    /// 0 = upright, 1 = fully tucked (rolling)
    pub crouch: f32,
    /// Forward lean (radians)
    pub lean: f32,
    /// Whether the rig should be drawn this frame
    pub visible: bool,
}

/// Whether a blinking (invulnerable) rig is on a visible half of the cycle
#[inline]
pub fn blink_visible(invuln_timer: f32, run_time: f32) -> bool {
    invuln_timer <= 0.0 || (run_time / BLINK_PERIOD) as u32 % 2 == 0
}

/// Pose a running/jumping/rolling character at the given stride phase
pub fn character_pose(move_state: MoveState, phase: f32, visible: bool) -> CharacterPose {
    match move_state {
        MoveState::Run => {
            let swing = (phase * TAU).sin();
            CharacterPose {
                arm_swing: swing * 0.9,
                leg_swing: swing * 1.1,
                crouch: 0.0,
                lean: 0.15,
                visible,
            }
        }
        MoveState::Jump => CharacterPose {
            arm_swing: -1.2,
            leg_swing: 0.6,
            crouch: 0.1,
            lean: 0.0,
            visible,
        },
        MoveState::Roll => CharacterPose {
            arm_swing: 0.0,
            leg_swing: 0.0,
            crouch: 1.0,
            lean: 0.6,
            visible,
        },
    }
}

/// Stride phase in [0, 1), advanced by distance so animation speed follows
/// forward speed
#[inline]
fn stride_phase(state: &GameState) -> f32 {
    (state.world_offset * 0.35).fract()
}

/// Player rig pose for this frame
pub fn player_pose(state: &GameState) -> CharacterPose {
    let visible = blink_visible(state.player.invuln_timer, state.run_time);
    character_pose(state.player.move_state, stride_phase(state), visible)
}

/// Chaser rig pose for this frame (always a runner, never blinks)
pub fn chaser_pose(state: &GameState) -> CharacterPose {
    character_pose(MoveState::Run, (stride_phase(state) + 0.4).fract(), true)
}

/// Player rig transform
pub fn player_transform(state: &GameState) -> Transform {
    Transform::from_xyz(state.player.x, state.player.y, state.player_real_z())
        .with_rotation(Quat::from_rotation_y(PI))
}

/// Chaser rig transform; the chaser trails the player by its following
/// distance
pub fn chaser_transform(state: &GameState) -> Transform {
    Transform::from_xyz(
        state.chaser.x,
        0.0,
        state.player_real_z() + state.chaser.distance,
    )
    .with_rotation(Quat::from_rotation_y(PI))
}

/// Camera transform: trailing shoulder view while running, a fixed
/// cinematic framing once the player is caught
pub fn camera_transform(state: &GameState) -> Transform {
    let real_z = state.player_real_z();
    match state.session.phase {
        RunPhase::Caught | RunPhase::GameOver => {
            // Low front framing looking back at the capture
            Transform::from_xyz(state.player.x, 1.8, real_z - 6.0)
                .with_rotation(Quat::from_rotation_y(PI))
        }
        _ => Transform::from_xyz(state.player.x * 0.4, 4.5, real_z + 9.0)
            .with_rotation(Quat::from_rotation_x(-0.18)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_is_pure() {
        let a = character_pose(MoveState::Run, 0.37, true);
        let b = character_pose(MoveState::Run, 0.37, true);
        assert_eq!(a, b);
    }

    #[test]
    fn test_roll_tucks() {
        let pose = character_pose(MoveState::Roll, 0.0, true);
        assert_eq!(pose.crouch, 1.0);
    }

    #[test]
    fn test_blink_toggles_on_period() {
        // Healthy player is always visible
        assert!(blink_visible(0.0, 0.33));
        // Invulnerable player toggles every BLINK_PERIOD
        assert!(blink_visible(0.5, 0.0));
        assert!(!blink_visible(0.5, BLINK_PERIOD * 1.5));
        assert!(blink_visible(0.5, BLINK_PERIOD * 2.5));
    }

    #[test]
    fn test_chaser_sits_behind_player() {
        let state = GameState::new(1);
        let player = player_transform(&state);
        let chaser = chaser_transform(&state);
        assert!(chaser.translation.z > player.translation.z);
    }

    #[test]
    fn test_camera_swaps_to_cinematic_when_caught() {
        let mut state = GameState::new(1);
        state.session.phase = RunPhase::Running;
        let running = camera_transform(&state);
        state.session.phase = RunPhase::Caught;
        let caught = camera_transform(&state);
        assert_ne!(running, caught);
        // Cinematic camera sits ahead of the player, looking back
        assert!(caught.translation.z < state.player_real_z());
    }
}
