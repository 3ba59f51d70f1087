//! Rail Rush - an endless 3-lane runner simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (streaming track, player physics,
//!   collisions, chaser pursuit, run state machine)
//! - `highscores`: Persisted best-score store
//!
//! Rendering, audio synthesis and raw input capture live in the host; the
//! simulation talks to them through `SceneCommand` / `GameEvent` queues and
//! the `TickInput` intent struct.

pub mod highscores;
pub mod sim;

pub use highscores::{HighScoreStore, JsonFileStore, MemoryStore};

/// Game configuration constants
pub mod consts {
    /// Number of lanes
    pub const NUM_LANES: u8 = 3;
    /// Lateral distance between lane centers
    pub const LANE_WIDTH: f32 = 2.0;

    /// Length of one track chunk along z
    pub const CHUNK_LENGTH: f32 = 30.0;
    /// Chunks pre-seeded at the start of a run
    pub const START_CHUNKS: usize = 6;
    /// First chunks of a run carry no flanking buildings
    pub const OPEN_START_CHUNKS: usize = 4;
    /// Obstacle/coin patterns begin at this chunk index
    pub const FIRST_PATTERN_CHUNK: usize = 3;
    /// A chunk is recycled once its start passes this far behind the camera
    pub const CHUNK_CULL_Z: f32 = 40.0;
    /// Obstacles and coins are culled this far behind the player
    pub const CULL_MARGIN: f32 = 30.0;
    /// Probability that a recycled chunk is a tunnel
    pub const TUNNEL_CHANCE: f32 = 0.10;

    /// Downward acceleration
    pub const GRAVITY: f32 = 40.0;
    /// Vertical launch speed of a jump
    pub const JUMP_SPEED: f32 = 13.0;
    /// Jump is allowed while within this height of the ground
    pub const JUMP_GROUND_SLACK: f32 = 0.2;
    /// Duration of a roll
    pub const ROLL_DURATION: f32 = 0.8;
    /// Ducking while airborne by more than this snaps the player down
    pub const ROLL_DIVE_HEIGHT: f32 = 1.0;
    /// Downward speed of the airborne duck snap
    pub const ROLL_DIVE_SPEED: f32 = -20.0;
    /// Exponential smoothing rate of lane changes (per second)
    pub const LANE_SMOOTH_RATE: f32 = 18.0;

    /// Forward speed at the start of a run
    pub const START_SPEED: f32 = 12.0;
    /// Current speed approaches target speed at this rate (units/s^2)
    pub const SPEED_EASE_RATE: f32 = 0.5;
    /// Target speed creeps upward at this rate (units/s^2)
    pub const TARGET_SPEED_CREEP: f32 = 0.05;
    /// Hard cap on target speed
    pub const MAX_SPEED: f32 = 40.0;

    /// Train roof height
    pub const TRAIN_HEIGHT: f32 = 3.5;
    /// Train body width
    pub const TRAIN_WIDTH: f32 = 2.2;
    /// Minimum altitude at which a train roof counts as ground
    pub const TRAIN_MOUNT_HEIGHT: f32 = 3.0;
    /// Ramp peak height (meets the train roof)
    pub const RAMP_HEIGHT: f32 = 3.5;
    /// Ramp extends this far either side of its center
    pub const RAMP_HALF_DEPTH: f32 = 4.0;
    /// Ramp width
    pub const RAMP_WIDTH: f32 = 2.0;
    /// Barrier width
    pub const BARRIER_WIDTH: f32 = 2.0;
    /// Barrier depth along z
    pub const BARRIER_DEPTH: f32 = 0.6;
    /// Height of a low (jumpable) barrier
    pub const BARRIER_LOW_HEIGHT: f32 = 1.0;
    /// Height of a high (duck-under) barrier
    pub const BARRIER_HIGH_HEIGHT: f32 = 3.0;

    /// Solid obstacles are cleared once the player is within this of their top
    pub const SOLID_CLEARANCE: f32 = 0.5;
    /// Low barriers trip the player below this height
    pub const LOW_BARRIER_TRIP_Y: f32 = 1.0;
    /// High barriers bonk the player above this height (unless rolling)
    pub const HIGH_BARRIER_BONK_Y: f32 = 1.5;
    /// Lateral window for ground-height candidates around the target lane
    pub const GROUND_QUERY_HALF_WIDTH: f32 = 1.0;
    /// Broad-phase padding along z
    pub const BROAD_Z_PAD: f32 = 0.5;
    /// Broad-phase padding along x
    pub const BROAD_X_PAD: f32 = 0.2;

    /// Coin pickup window along z
    pub const COIN_PICKUP_Z: f32 = 1.2;
    /// Coin pickup window along x
    pub const COIN_PICKUP_X: f32 = 0.8;
    /// Coin pickup window along y
    pub const COIN_PICKUP_Y: f32 = 1.5;
    /// Height of a coin floating over the track floor
    pub const COIN_GROUND_Y: f32 = 1.0;
    /// Height of a coin floating over a train roof
    pub const COIN_TRAIN_Y: f32 = 3.8;
    /// Longitudinal spacing within a coin line
    pub const COIN_SPACING: f32 = 3.0;
    /// Score bonus per coin
    pub const COIN_SCORE: f32 = 50.0;
    /// Score gained per unit of distance
    pub const SCORE_PER_UNIT: f32 = 2.0;

    /// Invulnerability window after a stumble
    pub const STUMBLE_INVULN: f32 = 1.0;
    /// Speed retained after a stumble
    pub const STUMBLE_SPEED_FACTOR: f32 = 0.7;
    /// Upward velocity bump on a stumble
    pub const STUMBLE_POP_VY: f32 = 5.0;
    /// A hit with the chaser closer than this ends the run
    pub const CATCH_DISTANCE: f32 = 2.0;
    /// Visibility toggle period while invulnerable
    pub const BLINK_PERIOD: f32 = 0.1;

    /// Chaser following distance while the player is healthy
    pub const CHASE_DIST_DEFAULT: f32 = 4.5;
    /// Chaser following distance while the player is invulnerable
    pub const CHASE_DIST_INVULN: f32 = 1.5;
    /// Chaser following distance once the player is caught
    pub const CHASE_DIST_CAUGHT: f32 = 0.8;
    /// Exponential smoothing rate of the following distance (per second)
    pub const CHASE_DIST_RATE: f32 = 3.0;
    /// Exponential smoothing rate of the chaser's lateral x (per second)
    pub const CHASE_X_RATE: f32 = 5.0;

    /// Delay between being caught and the game-over transition
    pub const CAUGHT_TO_GAMEOVER: f32 = 1.5;
    /// Largest simulation step; bigger frame deltas are clamped to this
    pub const MAX_DT: f32 = 0.05;
}

/// World x of a lane center (lanes 0..2, center lane at x = 0)
#[inline]
pub fn lane_x(lane: u8) -> f32 {
    (lane as f32 - 1.0) * consts::LANE_WIDTH
}

/// Exponential smoothing toward a target: frame-rate independent easing
#[inline]
pub fn ease_exp(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    current + (target - current) * (1.0 - (-rate * dt).exp())
}

/// Move toward a target by at most `max_delta`
#[inline]
pub fn move_toward(current: f32, target: f32, max_delta: f32) -> f32 {
    current + (target - current).clamp(-max_delta, max_delta)
}
