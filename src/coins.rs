//! Collectible coin spawning and pickup
//!
//! Coins land on road shoulders or beside building walls via bounded
//! rejection sampling. Collected coins are flagged, never removed, so the
//! total count stays stable for the session.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::buildings::position_intersects_any;
use crate::city::within_lake_exclusion;
use crate::types::Vec2;
use crate::world::{WorldError, WorldState};

/// Probability a coin goes on a road rather than beside a building.
const ROAD_PLACEMENT_PROB: f64 = 0.4;
/// Shoulder offset range as a fraction of the road half-width.
const SHOULDER_RATIO: f32 = 0.6;
/// Base outward offset from a building wall.
const WALL_OFFSET: f32 = 0.35;
/// Extra random outward jitter on top of `WALL_OFFSET`.
const WALL_JITTER: f32 = 0.25;
/// Footprint query radius when rejecting coins inside buildings.
const COIN_QUERY_RADIUS: f32 = 0.2;
/// Coins may spill slightly past the generation area.
const AREA_SLACK: f32 = 1.05;

/// A collectible coin on the ground plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub position: Vec2,
    pub collected: bool,
}

/// Spawn `count` coins, replacing any previous set. Returns the number
/// actually placed; running out of attempts is soft under-placement, not an
/// error.
pub fn spawn(world: &mut WorldState, count: usize, area_radius: f32) -> Result<usize, WorldError> {
    if !area_radius.is_finite() || area_radius <= 0.0 {
        return Err(WorldError::InvalidRadius {
            what: "area radius",
            value: area_radius,
        });
    }

    world.clear_coins();
    let mut rng = ChaCha8Rng::seed_from_u64(world.seeds().coins);

    let mut placed = 0;
    let mut attempts = 0;
    let max_attempts = count * 50 + 500;
    while placed < count && attempts < max_attempts {
        attempts += 1;

        let candidate = if rng.gen_bool(ROAD_PLACEMENT_PROB) {
            match road_candidate(world, &mut rng) {
                Some(p) => p,
                None => continue,
            }
        } else {
            match building_candidate(world, &mut rng) {
                Some(p) => p,
                None => continue,
            }
        };

        if position_intersects_any(world.buildings(), candidate.x, candidate.z, COIN_QUERY_RADIUS)
        {
            continue;
        }
        if candidate.length() > area_radius * AREA_SLACK {
            continue;
        }
        if within_lake_exclusion(world.ponds(), candidate) {
            continue;
        }

        world.push_coin(Coin {
            position: candidate,
            collected: false,
        });
        placed += 1;
    }

    Ok(placed)
}

/// A length-weighted random point along a random road, nudged onto the
/// shoulder.
fn road_candidate(world: &WorldState, rng: &mut ChaCha8Rng) -> Option<Vec2> {
    let roads = world.roads();
    if roads.is_empty() {
        return None;
    }
    let road = &roads[rng.gen_range(0..roads.len())];
    let total = road.length();
    let along = if total > f32::EPSILON {
        rng.gen_range(0.0..total)
    } else {
        0.0
    };
    let (point, tangent) = road.point_at_distance(along);
    let shoulder = rng.gen_range(-1.0..1.0) * road.half_width * SHOULDER_RATIO;
    Some(point + tangent.perp() * shoulder)
}

/// A point just outside one of the four walls of a random building.
fn building_candidate(world: &WorldState, rng: &mut ChaCha8Rng) -> Option<Vec2> {
    let buildings = world.buildings();
    if buildings.is_empty() {
        return None;
    }
    let b = &buildings[rng.gen_range(0..buildings.len())];
    let outward = WALL_OFFSET + rng.gen_range(0.0..WALL_JITTER);
    let half_w = b.width * 0.5;
    let half_d = b.depth * 0.5;
    let slide_w = if half_w > f32::EPSILON {
        rng.gen_range(-half_w..half_w)
    } else {
        0.0
    };
    let slide_d = if half_d > f32::EPSILON {
        rng.gen_range(-half_d..half_d)
    } else {
        0.0
    };
    let p = match rng.gen_range(0..4u8) {
        0 => Vec2::new(b.x + half_w + outward, b.z + slide_d),
        1 => Vec2::new(b.x - half_w - outward, b.z + slide_d),
        2 => Vec2::new(b.x + slide_w, b.z + half_d + outward),
        _ => Vec2::new(b.x + slide_w, b.z - half_d - outward),
    };
    Some(p)
}

/// Mark every uncollected coin within `radius` of (x, z) as collected.
/// Returns how many transitioned this call; already-collected coins never
/// re-count.
pub fn collect_at(coins: &mut [Coin], x: f32, z: f32, radius: f32) -> usize {
    let p = Vec2::new(x, z);
    let mut collected = 0;
    for coin in coins.iter_mut() {
        if !coin.collected && coin.position.distance(p) <= radius {
            coin.collected = true;
            collected += 1;
        }
    }
    collected
}
