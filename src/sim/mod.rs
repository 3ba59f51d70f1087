//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Clamped variable timestep, driven only through `tick`
//! - Seeded RNG only
//! - Stable iteration order (entities in spawn order)
//! - No rendering or platform dependencies; visuals leave as scene commands

pub mod chaser;
pub mod collision;
pub mod physics;
pub mod pose;
pub mod state;
pub mod tick;
pub mod track;

pub use collision::Impact;
pub use pose::{
    CharacterPose, camera_transform, chaser_pose, chaser_transform, character_pose,
    player_pose, player_transform,
};
pub use state::{
    AudioCue, Chunk, Coin, GameEvent, GameOverReason, GameState, GeometryKind, HudFrame,
    MaterialTag, MoveState, Obstacle, ObstacleKind, RunPhase, SceneCommand, Transform,
};
pub use tick::{TickInput, start_run, tick};
