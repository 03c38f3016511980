//! City layout generation
//!
//! A deterministic arterial road template plus rejection-sampled building,
//! street-light and tree placement around a lake. Under-placement when the
//! attempt budget runs out is expected and surfaced through `CityReport`,
//! never an error.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::buildings::{Building, BuildingStyle, WINDOW_TINT};
use crate::roads::Road;
use crate::types::Vec2;
use crate::water::Pond;
use crate::world::{WorldError, WorldState};

/// Clearance kept between a building footprint and a road edge.
pub const SAFETY_MARGIN: f32 = 0.6;
/// Buffer added to a pond radius for every placement exclusion test.
pub const LAKE_CLEARANCE: f32 = 5.0;
/// Clearance kept between a tree and a road edge.
const TREE_ROAD_CLEARANCE: f32 = 1.0;
/// Footprint query radius used when rejecting trees inside buildings.
const TREE_QUERY_RADIUS: f32 = 0.5;
/// Historical lake placement, top-left corner of the default 40-unit area.
const DEFAULT_LAKE_CENTER: Vec2 = Vec2 { x: -25.0, z: 25.0 };

/// High-frequency positional jitter applied per attempt so rejection sampling
/// does not leave perfectly radial streaks.
const JITTER_AMPLITUDE: f64 = 0.4;

/// A lamp post anchored at ground level along an arterial road.
///
/// `y` is stored as 0.0 at placement; the renderer re-bases the post on
/// `height()`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StreetLight {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Parameters for one city generation pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CityParams {
    /// Number of houses to attempt to place (must be at least 1).
    pub house_count: usize,
    /// Radius of the generated area; the road template spans it.
    pub area_radius: f32,
    /// Lake center override; `None` keeps the historical corner placement.
    pub lake_center: Option<Vec2>,
    /// Number of trees to attempt to place.
    pub tree_count: usize,
    /// Also reject candidates overlapping an already-placed building.
    /// Off by default: the original generator only enforced road and lake
    /// exclusions.
    pub reject_building_overlap: bool,
}

impl Default for CityParams {
    fn default() -> Self {
        Self {
            house_count: 30,
            area_radius: 40.0,
            lake_center: None,
            tree_count: 40,
            reject_building_overlap: false,
        }
    }
}

/// Placed-vs-requested accounting for one generation pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityReport {
    pub houses_requested: usize,
    pub houses_placed: usize,
    pub building_attempts: usize,
    pub street_lights_placed: usize,
    pub trees_requested: usize,
    pub trees_placed: usize,
}

/// Lake radius for a given area radius.
pub fn lake_radius(area_radius: f32) -> f32 {
    4.0f32.max(area_radius * 0.25)
}

/// True iff the point falls inside any pond's placement exclusion zone.
pub fn within_lake_exclusion(ponds: &[Pond], p: Vec2) -> bool {
    ponds
        .iter()
        .any(|pond| pond.center.distance(p) < pond.radius + LAKE_CLEARANCE)
}

/// The fixed seven-road template spanning `[-area_radius, area_radius]`:
/// a cross, two diagonals, an offset vertical arterial, and two narrower
/// village diagonals. Deterministic in `area_radius` alone.
pub fn arterial_road_template(area_radius: f32) -> Vec<Road> {
    let r = area_radius;
    let road = |a: Vec2, b: Vec2, half_width: f32, is_main: bool| Road {
        points: vec![a, b],
        half_width,
        is_main,
    };
    vec![
        road(Vec2::new(0.0, -r), Vec2::new(0.0, r), 3.0, true),
        road(Vec2::new(-r, 0.0), Vec2::new(r, 0.0), 3.0, true),
        road(Vec2::new(-r, r), Vec2::new(r, -r), 3.2, true),
        road(Vec2::new(-r, -r), Vec2::new(r, r), 3.2, true),
        road(Vec2::new(r * 0.3, -r), Vec2::new(r * 0.3, r), 3.0, true),
        road(
            Vec2::new(-r * 0.5, -r * 0.5),
            Vec2::new(r * 0.5, r * 0.5),
            2.0,
            false,
        ),
        road(
            Vec2::new(-r * 0.5, r * 0.5),
            Vec2::new(r * 0.5, -r * 0.5),
            2.0,
            false,
        ),
    ]
}

/// Generate a city into `world`: roads, buildings, the lake, street lights
/// and trees. Clears any previous city first, so regeneration with identical
/// state and parameters reproduces the layout bit for bit.
pub fn generate(world: &mut WorldState, params: &CityParams) -> Result<CityReport, WorldError> {
    if params.house_count == 0 {
        return Err(WorldError::InvalidHouseCount);
    }
    if !params.area_radius.is_finite() || params.area_radius <= 0.0 {
        return Err(WorldError::InvalidRadius {
            what: "area radius",
            value: params.area_radius,
        });
    }

    let r = params.area_radius;
    let lake_center = params.lake_center.unwrap_or(DEFAULT_LAKE_CENTER);
    let lake_r = lake_radius(r);

    world.clear_city();

    let template = arterial_road_template(r);
    for road in &template {
        world.add_road(road.clone())?;
    }

    let mut rng = ChaCha8Rng::seed_from_u64(world.seeds().city);
    let mut report = CityReport {
        houses_requested: params.house_count,
        trees_requested: params.tree_count,
        ..CityReport::default()
    };

    // Buildings: rejection sampling over an annulus, biased nowhere, jittered
    // by attempt index.
    let max_attempts = params.house_count * 10 + 500;
    while report.houses_placed < params.house_count && report.building_attempts < max_attempts {
        report.building_attempts += 1;
        let attempt = report.building_attempts as f64;

        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let radial = rng.gen_range(r * 0.05..r * 0.9);
        let mut x = radial * angle.cos();
        let mut z = radial * angle.sin();
        x += ((attempt * 7.3).sin() * JITTER_AMPLITUDE) as f32;
        z += ((attempt * 11.1).cos() * JITTER_AMPLITUDE) as f32;

        let width: f32 = rng.gen_range(1.0..3.0);
        let depth: f32 = rng.gen_range(1.0..3.0) * 0.9;
        let tier_roll: f32 = rng.gen_range(0.0..1.0);
        let (height, style) = if tier_roll < 0.12 {
            (rng.gen_range(6.0..8.0), BuildingStyle::Metal)
        } else if tier_roll < 0.60 {
            (rng.gen_range(3.0..4.0), BuildingStyle::Brick)
        } else {
            (rng.gen_range(2.0..2.5), BuildingStyle::Plain)
        };

        let p = Vec2::new(x, z);
        let half_extent = width.max(depth) * 0.5;

        if p.distance(lake_center) < lake_r + LAKE_CLEARANCE {
            continue;
        }
        if template
            .iter()
            .any(|road| road.distance_to(p) <= road.half_width + half_extent + SAFETY_MARGIN)
        {
            continue;
        }
        if params.reject_building_overlap
            && world.buildings().iter().any(|b| {
                (b.x - x).abs() <= (b.width + width) * 0.5 + SAFETY_MARGIN
                    && (b.z - z).abs() <= (b.depth + depth) * 0.5 + SAFETY_MARGIN
            })
        {
            continue;
        }

        world.add_building(Building {
            x,
            z,
            width,
            height,
            depth,
            window_tint: WINDOW_TINT,
            style,
        });
        report.houses_placed += 1;
    }

    world.add_pond(lake_center, lake_r)?;

    // Street lights along the offset vertical arterial, skipping the lake.
    let light_x = r * 0.3;
    for frac in [-0.9f32, -0.3, 0.3, 0.9] {
        let z = frac * r;
        if Vec2::new(light_x, z).distance(lake_center) > lake_r + LAKE_CLEARANCE {
            world.add_street_light(StreetLight {
                x: light_x,
                y: 0.0,
                z,
            });
            report.street_lights_placed += 1;
        }
    }

    // Trees: same rejection idea, wider annulus, cleared of roads, lake and
    // buildings.
    let mut tree_attempts = 0;
    let max_tree_attempts = params.tree_count * 10 + 200;
    while report.trees_placed < params.tree_count && tree_attempts < max_tree_attempts {
        tree_attempts += 1;

        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let radial = rng.gen_range(r * 0.1..r * 0.95);
        let p = Vec2::new(radial * angle.cos(), radial * angle.sin());

        if p.distance(lake_center) < lake_r + LAKE_CLEARANCE {
            continue;
        }
        if world
            .roads()
            .iter()
            .any(|road| road.distance_to(p) <= road.half_width + TREE_ROAD_CLEARANCE)
        {
            continue;
        }
        if crate::buildings::position_intersects_any(world.buildings(), p.x, p.z, TREE_QUERY_RADIUS)
        {
            continue;
        }

        world.add_tree(p);
        report.trees_placed += 1;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generated_world() -> (WorldState, CityReport) {
        let mut world = WorldState::default();
        let report = generate(&mut world, &CityParams::default()).unwrap();
        (world, report)
    }

    #[test]
    fn template_has_seven_roads_five_main() {
        let template = arterial_road_template(40.0);
        assert_eq!(template.len(), 7);
        assert_eq!(template.iter().filter(|r| r.is_main).count(), 5);
        for road in &template {
            assert!(road.validate().is_ok());
        }
    }

    #[test]
    fn rejects_invalid_parameters() {
        let mut world = WorldState::default();
        let bad_houses = CityParams {
            house_count: 0,
            ..CityParams::default()
        };
        assert!(generate(&mut world, &bad_houses).is_err());

        let bad_radius = CityParams {
            area_radius: -5.0,
            ..CityParams::default()
        };
        assert!(generate(&mut world, &bad_radius).is_err());
    }

    #[test]
    fn buildings_clear_every_template_road() {
        let (world, _) = generated_world();
        let template = arterial_road_template(40.0);
        for b in world.buildings() {
            let p = Vec2::new(b.x, b.z);
            for road in &template {
                assert!(
                    road.distance_to(p) > road.half_width + b.half_extent() + SAFETY_MARGIN,
                    "building at ({}, {}) clips a road",
                    b.x,
                    b.z
                );
            }
        }
    }

    #[test]
    fn buildings_avoid_the_lake() {
        let (world, _) = generated_world();
        let lake = world.ponds()[0];
        for b in world.buildings() {
            assert!(lake.center.distance(Vec2::new(b.x, b.z)) >= lake.radius + LAKE_CLEARANCE);
        }
    }

    #[test]
    fn building_heights_follow_the_tiers() {
        let (world, _) = generated_world();
        for b in world.buildings() {
            assert!(b.height >= 2.0 && b.height <= 8.0);
            match b.style {
                BuildingStyle::Metal => assert!(b.height >= 6.0),
                BuildingStyle::Brick => assert!(b.height >= 3.0 && b.height <= 4.0),
                BuildingStyle::Plain => assert!(b.height <= 2.5),
            }
        }
    }

    #[test]
    fn report_accounts_for_placement() {
        let (world, report) = generated_world();
        assert_eq!(report.houses_requested, 30);
        assert!(report.houses_placed <= report.houses_requested);
        assert_eq!(report.houses_placed, world.buildings().len());
        assert!(report.building_attempts <= 30 * 10 + 500);
        assert!(report.street_lights_placed <= 4);
        assert_eq!(report.trees_placed, world.trees().len());
    }

    #[test]
    fn lake_radius_scales_with_area() {
        assert_eq!(lake_radius(40.0), 10.0);
        assert_eq!(lake_radius(8.0), 4.0);
    }

    #[test]
    fn street_lights_sit_on_the_offset_arterial() {
        let (world, _) = generated_world();
        let lake = world.ponds()[0];
        for light in world.street_lights() {
            assert!((light.x - 12.0).abs() < 1e-6);
            assert_eq!(light.y, 0.0);
            assert!(
                Vec2::new(light.x, light.z).distance(lake.center) > lake.radius + LAKE_CLEARANCE
            );
        }
    }

    #[test]
    fn trees_keep_clear_of_roads_and_buildings() {
        let (world, _) = generated_world();
        for tree in world.trees() {
            for road in world.roads() {
                assert!(road.distance_to(*tree) > road.half_width + 1.0);
            }
            assert!(!crate::buildings::position_intersects_any(
                world.buildings(),
                tree.x,
                tree.z,
                0.5
            ));
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let (world_a, report_a) = generated_world();
        let (world_b, report_b) = generated_world();
        assert_eq!(report_a, report_b);
        assert_eq!(world_a.buildings(), world_b.buildings());
        assert_eq!(world_a.roads(), world_b.roads());
        assert_eq!(world_a.trees(), world_b.trees());
    }

    #[test]
    fn regeneration_replaces_rather_than_accumulates() {
        let mut world = WorldState::default();
        let first = generate(&mut world, &CityParams::default()).unwrap();
        let buildings_first = world.buildings().to_vec();
        let second = generate(&mut world, &CityParams::default()).unwrap();
        assert_eq!(first, second);
        assert_eq!(world.buildings(), buildings_first.as_slice());
        assert_eq!(world.ponds().len(), 1);
    }

    #[test]
    fn overlap_rejection_spaces_buildings_apart() {
        let mut world = WorldState::default();
        let params = CityParams {
            reject_building_overlap: true,
            ..CityParams::default()
        };
        generate(&mut world, &params).unwrap();
        let buildings = world.buildings();
        for (i, a) in buildings.iter().enumerate() {
            for b in &buildings[i + 1..] {
                let apart_x = (a.x - b.x).abs() > (a.width + b.width) * 0.5 + SAFETY_MARGIN;
                let apart_z = (a.z - b.z).abs() > (a.depth + b.depth) * 0.5 + SAFETY_MARGIN;
                assert!(apart_x || apart_z, "buildings overlap");
            }
        }
    }

    #[test]
    fn caller_hinted_lake_center_is_respected() {
        let mut world = WorldState::default();
        let params = CityParams {
            lake_center: Some(Vec2::new(10.0, -10.0)),
            ..CityParams::default()
        };
        generate(&mut world, &params).unwrap();
        assert_eq!(world.ponds()[0].center, Vec2::new(10.0, -10.0));
    }
}
