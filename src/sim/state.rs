//! Game state and core simulation types
//!
//! Everything the frame step mutates lives here: the streamed world
//! (chunks, obstacles, coins), the player and chaser, the run session,
//! and the outgoing command/event queues the host drains.

use std::collections::VecDeque;

use glam::{Quat, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::lane_x;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Title screen, nothing simulates
    Menu,
    /// Active gameplay
    Running,
    /// Frozen mid-run, reversible
    Paused,
    /// Chaser got the player; cinematic delay before game over
    Caught,
    /// Run ended, waiting for restart
    GameOver,
}

/// Player movement state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveState {
    Run,
    Jump,
    Roll,
}

/// Obstacle varieties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    /// Landable train car; roof doubles as ground
    Train,
    /// Incline that lifts the player to train-roof height
    Ramp,
    /// Jump over it or trip
    BarrierLow,
    /// Duck under it or bonk
    BarrierHigh,
}

impl ObstacleKind {
    /// Solid obstacles can be stood on; barriers are pass/fail hazards
    pub fn is_solid(&self) -> bool {
        matches!(self, ObstacleKind::Train | ObstacleKind::Ramp)
    }
}

/// An obstacle entity, positioned in its spawn frame
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Lateral center
    pub x: f32,
    /// Longitudinal center (spawn frame)
    pub z: f32,
    pub width: f32,
    pub height: f32,
    /// Extent along z
    pub depth: f32,
}

/// A collectible coin
#[derive(Debug, Clone)]
pub struct Coin {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Collected coins stay registered (hidden) so they are never re-awarded
    pub collected: bool,
}

/// A fixed-length slice of track
#[derive(Debug, Clone)]
pub struct Chunk {
    /// Longitudinal start position (spawn frame)
    pub z: f32,
    pub has_buildings: bool,
    pub is_tunnel: bool,
    /// Scene handles owned by this chunk, removed together on cull
    pub handles: Vec<u32>,
}

/// The player, a single mutable instance advanced once per frame
#[derive(Debug, Clone)]
pub struct PlayerState {
    /// Active lane index, 0..2
    pub lane: u8,
    /// Lateral position, smoothed toward the lane center
    pub x: f32,
    /// Vertical position (0 = track floor)
    pub y: f32,
    /// Vertical velocity
    pub vy: f32,
    /// Ground height resolved against solid obstacles this frame
    pub ground_y: f32,
    pub move_state: MoveState,
    /// Time left in the current roll
    pub roll_timer: f32,
    /// Time left on post-stumble invulnerability
    pub invuln_timer: f32,
    /// Current forward speed
    pub speed: f32,
    /// Speed being eased toward; creeps upward over the run
    pub target_speed: f32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            lane: 1,
            x: 0.0,
            y: 0.0,
            vy: 0.0,
            ground_y: 0.0,
            move_state: MoveState::Run,
            roll_timer: 0.0,
            invuln_timer: 0.0,
            speed: START_SPEED,
            target_speed: START_SPEED,
        }
    }
}

impl PlayerState {
    /// Whether post-stumble invulnerability is active
    pub fn is_invulnerable(&self) -> bool {
        self.invuln_timer > 0.0
    }
}

/// The pursuing antagonist
#[derive(Debug, Clone)]
pub struct ChaserState {
    /// Smoothed following distance behind the player (z offset, positive)
    pub distance: f32,
    /// Lateral position, smoothed toward the player
    pub x: f32,
}

impl Default for ChaserState {
    fn default() -> Self {
        Self {
            distance: CHASE_DIST_DEFAULT,
            x: 0.0,
        }
    }
}

/// Per-run bookkeeping, reset by `start_run`
#[derive(Debug, Clone)]
pub struct RunSession {
    /// Raw score; floored for display
    pub score: f32,
    /// Distance traveled this run
    pub distance: f32,
    /// Coins collected this run
    pub coins: u32,
    pub phase: RunPhase,
    /// Bumped on every `start_run`; guards deferred callbacks against
    /// acting on a stale run
    pub generation: u64,
}

impl Default for RunSession {
    fn default() -> Self {
        Self {
            score: 0.0,
            distance: 0.0,
            coins: 0,
            phase: RunPhase::Menu,
            generation: 0,
        }
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    Caught,
}

/// Symbolic audio cue names; purely observational for the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    Jump,
    Roll,
    Swipe,
    Coin,
    Crash,
}

/// Geometry classes the scene collaborator knows how to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Floor,
    Rails,
    Building,
    TunnelArch,
    TunnelLight,
    Train,
    Ramp,
    Barrier,
    Coin,
}

/// Material tags for spawned geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialTag {
    Concrete,
    Steel,
    Brick,
    TunnelStone,
    WarmLight,
    TrainPaint,
    Wood,
    Hazard,
    Gold,
}

/// A transform handed to the scene collaborator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub fn from_xyz(x: f32, y: f32, z: f32) -> Self {
        Self {
            translation: Vec3::new(x, y, z),
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Creation/removal requests for the scene collaborator
#[derive(Debug, Clone)]
pub enum SceneCommand {
    Spawn {
        id: u32,
        geometry: GeometryKind,
        transform: Transform,
        material: MaterialTag,
    },
    /// Keep the handle but stop drawing it (collected coins)
    Hide { id: u32 },
    Remove { id: u32 },
}

/// Notifications for the host (audio, HUD, music)
#[derive(Debug, Clone)]
pub enum GameEvent {
    Audio(AudioCue),
    MusicStart,
    MusicStop,
    GameOver {
        reason: GameOverReason,
        score: u64,
        coins: u32,
        is_new_high: bool,
    },
}

/// Per-frame HUD payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudFrame {
    pub score: u64,
    pub coins: u32,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG driving pattern/tunnel selection
    pub rng: Pcg32,
    /// Cumulative longitudinal distance traveled; entity z-coordinates are
    /// compared against `-world_offset` to get player-relative positions
    pub world_offset: f32,
    /// Ordered chunk queue, front = furthest behind the player
    pub chunks: VecDeque<Chunk>,
    pub obstacles: Vec<Obstacle>,
    pub coins: Vec<Coin>,
    pub player: PlayerState,
    pub chaser: ChaserState,
    pub session: RunSession,
    /// Seconds simulated since the run started (drives pose/blink phase)
    pub run_time: f32,
    /// Countdown from catch to game over
    pub caught_timer: f32,
    /// Best score loaded from the store at startup
    pub best_score: u64,
    /// Scene commands produced this frame, drained by the host
    pub scene: Vec<SceneCommand>,
    /// Events produced this frame, drained by the host
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a state in the menu phase with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            world_offset: 0.0,
            chunks: VecDeque::new(),
            obstacles: Vec::new(),
            coins: Vec::new(),
            player: PlayerState::default(),
            chaser: ChaserState::default(),
            session: RunSession::default(),
            run_time: 0.0,
            caught_timer: 0.0,
            best_score: 0,
            scene: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity/scene-handle ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Player-relative longitudinal coordinate
    #[inline]
    pub fn player_real_z(&self) -> f32 {
        -self.world_offset
    }

    /// Lane center the player is steering toward
    #[inline]
    pub fn target_lane_x(&self) -> f32 {
        lane_x(self.player.lane)
    }

    /// HUD payload for this frame
    pub fn hud(&self) -> HudFrame {
        HudFrame {
            score: self.session.score.floor() as u64,
            coins: self.session.coins,
        }
    }

    pub fn push_cue(&mut self, cue: AudioCue) {
        self.events.push(GameEvent::Audio(cue));
    }

    /// Drain this frame's scene commands (host side)
    pub fn take_scene_commands(&mut self) -> Vec<SceneCommand> {
        std::mem::take(&mut self.scene)
    }

    /// Drain this frame's events (host side)
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
