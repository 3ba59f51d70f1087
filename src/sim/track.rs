//! Track generation and streaming
//!
//! Keeps the world populated exactly one cull-cycle ahead of the player:
//! fixed-length chunks tile the track indefinitely, and each non-tunnel
//! chunk gets one of four weighted obstacle/coin patterns.

use glam::Vec3;
use rand::Rng;

use super::state::{
    Chunk, Coin, GameState, GeometryKind, MaterialTag, Obstacle, ObstacleKind, SceneCommand,
    Transform,
};
use crate::consts::*;
use crate::lane_x;

/// Pre-seed the starting stretch of track: 6 chunks, the first 4 without
/// buildings, patterns from chunk 3 on
pub fn seed_world(state: &mut GameState) {
    for i in 0..START_CHUNKS {
        let z = -(i as f32) * CHUNK_LENGTH;
        spawn_chunk(state, z, i >= OPEN_START_CHUNKS, false);
        if i >= FIRST_PATTERN_CHUNK {
            spawn_pattern(state, z - CHUNK_LENGTH / 2.0);
        }
    }
    log::info!(
        "seeded {} chunks, {} obstacles, {} coins",
        state.chunks.len(),
        state.obstacles.len(),
        state.coins.len()
    );
}

/// Advance the streaming loop: recycle chunks that fell behind the camera
/// and cull obstacles/coins that fell behind the player
pub fn stream(state: &mut GameState) {
    loop {
        let recycle = state
            .chunks
            .front()
            .is_some_and(|c| c.z + state.world_offset > CHUNK_CULL_Z);
        if !recycle {
            break;
        }
        let Some(culled) = state.chunks.pop_front() else {
            break;
        };
        for id in culled.handles {
            state.scene.push(SceneCommand::Remove { id });
        }

        let new_z = state.chunks.back().map_or(culled.z, |c| c.z) - CHUNK_LENGTH;
        let is_tunnel = state.rng.random::<f32>() < TUNNEL_CHANCE;
        spawn_chunk(state, new_z, !is_tunnel, is_tunnel);
        if !is_tunnel {
            spawn_pattern(state, new_z - CHUNK_LENGTH / 2.0);
        }
        log::debug!("recycled chunk to z={new_z} (tunnel: {is_tunnel})");
    }

    // Entities with z past this line are behind the player by the cull margin
    let behind = -state.world_offset + CULL_MARGIN;

    let mut removed = Vec::new();
    state.obstacles.retain(|o| {
        if o.z > behind {
            removed.push(o.id);
            false
        } else {
            true
        }
    });
    state.coins.retain(|c| {
        if c.z > behind {
            removed.push(c.id);
            false
        } else {
            true
        }
    });
    for id in removed {
        state.scene.push(SceneCommand::Remove { id });
    }
}

/// Emit one chunk's worth of track: floor, rails for all 3 lanes, optional
/// flanking buildings, and the tunnel shell + dim light for tunnel chunks
pub fn spawn_chunk(state: &mut GameState, z: f32, has_buildings: bool, is_tunnel: bool) {
    let center_z = z - CHUNK_LENGTH / 2.0;
    let mut handles = Vec::new();

    let floor = state.next_entity_id();
    state.scene.push(SceneCommand::Spawn {
        id: floor,
        geometry: GeometryKind::Floor,
        transform: Transform::from_xyz(0.0, 0.0, center_z)
            .with_scale(Vec3::new(8.0, 0.1, CHUNK_LENGTH)),
        material: MaterialTag::Concrete,
    });
    handles.push(floor);

    for lane in 0..NUM_LANES {
        let rails = state.next_entity_id();
        state.scene.push(SceneCommand::Spawn {
            id: rails,
            geometry: GeometryKind::Rails,
            transform: Transform::from_xyz(lane_x(lane), 0.05, center_z)
                .with_scale(Vec3::new(1.4, 0.1, CHUNK_LENGTH)),
            material: MaterialTag::Steel,
        });
        handles.push(rails);
    }

    if has_buildings && !is_tunnel {
        for side in [-1.0f32, 1.0] {
            let height = state.rng.random_range(8.0..20.0);
            let building = state.next_entity_id();
            state.scene.push(SceneCommand::Spawn {
                id: building,
                geometry: GeometryKind::Building,
                transform: Transform::from_xyz(side * 6.0, height / 2.0, center_z)
                    .with_scale(Vec3::new(4.0, height, CHUNK_LENGTH)),
                material: MaterialTag::Brick,
            });
            handles.push(building);
        }
    }

    if is_tunnel {
        let arch = state.next_entity_id();
        state.scene.push(SceneCommand::Spawn {
            id: arch,
            geometry: GeometryKind::TunnelArch,
            transform: Transform::from_xyz(0.0, 0.0, center_z)
                .with_scale(Vec3::new(8.0, 6.0, CHUNK_LENGTH)),
            material: MaterialTag::TunnelStone,
        });
        handles.push(arch);

        let light = state.next_entity_id();
        state.scene.push(SceneCommand::Spawn {
            id: light,
            geometry: GeometryKind::TunnelLight,
            transform: Transform::from_xyz(0.0, 4.5, center_z),
            material: MaterialTag::WarmLight,
        });
        handles.push(light);
    }

    state.chunks.push_back(Chunk {
        z,
        has_buildings,
        is_tunnel,
        handles,
    });
}

/// Author one obstacle/coin arrangement centered on `z`
///
/// One uniform roll and one uniform lane, then exactly one of four
/// generators at cumulative thresholds 0.25 / 0.45 / 0.65 / 1.0.
pub fn spawn_pattern(state: &mut GameState, z: f32) {
    let roll = state.rng.random::<f32>();
    let lane = state.rng.random_range(0..NUM_LANES);

    if roll < 0.25 {
        // Single train with coins offset one lane over
        spawn_train(state, lane, z, 12.0);
        spawn_coin_line(state, (lane + 1) % NUM_LANES, z, 5, COIN_GROUND_Y);
    } else if roll < 0.45 {
        // Long train, coins along its roof
        spawn_train(state, lane, z, 24.0);
        spawn_coin_line(state, lane, z, 8, COIN_TRAIN_Y);
    } else if roll < 0.65 {
        // Ramp launching the player onto a train roof
        spawn_ramp(state, lane, z + 6.0);
        spawn_train(state, lane, z - 8.0, 12.0);
    } else {
        // Barrier gauntlet with a short coin line
        let high = state.rng.random::<f32>() < 0.5;
        spawn_barrier(state, lane, z + 5.0, high);
        spawn_barrier(state, (lane + 1) % NUM_LANES, z - 5.0, false);
        spawn_coin_line(state, lane, z - 5.0, 3, COIN_GROUND_Y);
    }
}

fn spawn_obstacle(state: &mut GameState, kind: ObstacleKind, lane: u8, z: f32, size: Vec3) {
    let id = state.next_entity_id();
    let x = lane_x(lane);
    let (geometry, material) = match kind {
        ObstacleKind::Train => (GeometryKind::Train, MaterialTag::TrainPaint),
        ObstacleKind::Ramp => (GeometryKind::Ramp, MaterialTag::Wood),
        ObstacleKind::BarrierLow | ObstacleKind::BarrierHigh => {
            (GeometryKind::Barrier, MaterialTag::Hazard)
        }
    };
    state.scene.push(SceneCommand::Spawn {
        id,
        geometry,
        transform: Transform::from_xyz(x, size.y / 2.0, z).with_scale(size),
        material,
    });
    state.obstacles.push(Obstacle {
        id,
        kind,
        x,
        z,
        width: size.x,
        height: size.y,
        depth: size.z,
    });
}

fn spawn_train(state: &mut GameState, lane: u8, z: f32, length: f32) {
    spawn_obstacle(
        state,
        ObstacleKind::Train,
        lane,
        z,
        Vec3::new(TRAIN_WIDTH, TRAIN_HEIGHT, length),
    );
}

fn spawn_ramp(state: &mut GameState, lane: u8, z: f32) {
    spawn_obstacle(
        state,
        ObstacleKind::Ramp,
        lane,
        z,
        Vec3::new(RAMP_WIDTH, RAMP_HEIGHT, RAMP_HALF_DEPTH * 2.0),
    );
}

fn spawn_barrier(state: &mut GameState, lane: u8, z: f32, high: bool) {
    let (kind, height) = if high {
        (ObstacleKind::BarrierHigh, BARRIER_HIGH_HEIGHT)
    } else {
        (ObstacleKind::BarrierLow, BARRIER_LOW_HEIGHT)
    };
    spawn_obstacle(
        state,
        kind,
        lane,
        z,
        Vec3::new(BARRIER_WIDTH, height, BARRIER_DEPTH),
    );
}

fn spawn_coin_line(state: &mut GameState, lane: u8, z_center: f32, count: u32, y: f32) {
    let x = lane_x(lane);
    let half_span = (count - 1) as f32 * COIN_SPACING / 2.0;
    for i in 0..count {
        let z = z_center + half_span - i as f32 * COIN_SPACING;
        let id = state.next_entity_id();
        state.scene.push(SceneCommand::Spawn {
            id,
            geometry: GeometryKind::Coin,
            transform: Transform::from_xyz(x, y, z),
            material: MaterialTag::Gold,
        });
        state.coins.push(Coin {
            id,
            x,
            y,
            z,
            collected: false,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_world_layout() {
        let mut state = GameState::new(7);
        seed_world(&mut state);

        assert_eq!(state.chunks.len(), START_CHUNKS);
        for (i, chunk) in state.chunks.iter().enumerate() {
            assert_eq!(chunk.z, -(i as f32) * CHUNK_LENGTH);
            assert_eq!(chunk.has_buildings, i >= OPEN_START_CHUNKS);
            assert!(!chunk.is_tunnel);
        }
        // Chunks 3..6 carry patterns; every pattern places at least one obstacle
        assert!(!state.obstacles.is_empty());
    }

    #[test]
    fn test_chunk_queue_invariant_under_streaming() {
        let mut state = GameState::new(99);
        seed_world(&mut state);

        for _ in 0..600 {
            state.world_offset += 1.7;
            stream(&mut state);

            assert_eq!(state.chunks.len(), START_CHUNKS);
            let zs: Vec<f32> = state.chunks.iter().map(|c| c.z).collect();
            for pair in zs.windows(2) {
                assert_eq!(pair[0] - pair[1], CHUNK_LENGTH);
            }
            // At least one chunk stays in front of the recycle line
            assert!(zs[0] + state.world_offset <= CHUNK_CULL_Z);
        }
    }

    #[test]
    fn test_tunnel_chunks_spawn_shell_and_no_buildings() {
        let mut state = GameState::new(5);
        spawn_chunk(&mut state, 0.0, true, true);

        let chunk = state.chunks.back().unwrap();
        assert!(chunk.is_tunnel);
        let spawned: Vec<GeometryKind> = state
            .scene
            .iter()
            .filter_map(|c| match c {
                SceneCommand::Spawn { geometry, .. } => Some(*geometry),
                _ => None,
            })
            .collect();
        assert!(spawned.contains(&GeometryKind::TunnelArch));
        assert!(spawned.contains(&GeometryKind::TunnelLight));
        assert!(!spawned.contains(&GeometryKind::Building));
    }

    #[test]
    fn test_obstacle_cull_emits_removals() {
        let mut state = GameState::new(1);
        spawn_barrier(&mut state, 1, 10.0, false);
        let id = state.obstacles[0].id;
        state.scene.clear();

        // Player far ahead: obstacle z (10) > -offset + 30
        state.world_offset = 25.0;
        stream(&mut state);

        assert!(state.obstacles.is_empty());
        assert!(state.scene.iter().any(
            |c| matches!(c, SceneCommand::Remove { id: removed } if *removed == id)
        ));
    }

    #[test]
    fn test_coin_line_spacing_and_height() {
        let mut state = GameState::new(1);
        spawn_coin_line(&mut state, 2, -15.0, 5, COIN_GROUND_Y);

        assert_eq!(state.coins.len(), 5);
        for coin in &state.coins {
            assert_eq!(coin.x, lane_x(2));
            assert_eq!(coin.y, COIN_GROUND_Y);
            assert!(!coin.collected);
        }
        // Centered on z_center, descending by the fixed spacing
        assert_eq!(state.coins[0].z, -15.0 + 2.0 * COIN_SPACING);
        assert_eq!(state.coins[4].z, -15.0 - 2.0 * COIN_SPACING);
    }

    #[test]
    fn test_ramp_train_pairing_geometry() {
        let mut state = GameState::new(1);
        spawn_ramp(&mut state, 0, -9.0);
        spawn_train(&mut state, 0, -23.0, 12.0);

        let ramp = &state.obstacles[0];
        let train = &state.obstacles[1];
        // Ramp peak meets the train roof
        assert_eq!(ramp.height, train.height);
        // Same lane, ramp encountered first (larger z)
        assert_eq!(ramp.x, train.x);
        assert!(ramp.z > train.z);
    }
}
