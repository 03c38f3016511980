//! World state container
//!
//! One explicit value owns every registry of the generated village, replacing
//! the original demo's file-local globals: multiple worlds can coexist, tests
//! stay independent, and regeneration is just another method call. There is a
//! single writer during generation; every query afterwards is `&self` and
//! side-effect free.

use crate::buildings::{self, Building};
use crate::city::{self, CityParams, CityReport, StreetLight};
use crate::coins::{self, Coin};
use crate::heightfield::{self, Mountain};
use crate::roads::{self, Road};
use crate::seeds::GenerationSeeds;
use crate::types::Vec2;
use crate::water::Pond;

/// Validation failures for generator configuration. Partial placement is
/// deliberately *not* here; it is reported through counts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WorldError {
    /// A radius-like quantity was zero, negative, or not finite.
    InvalidRadius { what: &'static str, value: f32 },
    /// City generation was asked for zero houses.
    InvalidHouseCount,
    /// A road polyline had fewer than two points.
    RoadTooShort { points: usize },
}

impl std::fmt::Display for WorldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorldError::InvalidRadius { what, value } => {
                write!(f, "{} must be positive and finite (got {})", what, value)
            }
            WorldError::InvalidHouseCount => write!(f, "house count must be at least 1"),
            WorldError::RoadTooShort { points } => {
                write!(f, "a road polyline needs at least 2 points (got {})", points)
            }
        }
    }
}

impl std::error::Error for WorldError {}

/// All state of the current generated village.
#[derive(Clone, Debug, Default)]
pub struct WorldState {
    seeds: GenerationSeeds,
    mountains: Vec<Mountain>,
    ponds: Vec<Pond>,
    roads: Vec<Road>,
    buildings: Vec<Building>,
    street_lights: Vec<StreetLight>,
    trees: Vec<Vec2>,
    coins: Vec<Coin>,
}

impl WorldState {
    /// An empty world with the given seeds. `Default` uses the historical
    /// fixed seeds.
    pub fn new(seeds: GenerationSeeds) -> Self {
        Self {
            seeds,
            ..Self::default()
        }
    }

    pub fn seeds(&self) -> GenerationSeeds {
        self.seeds
    }

    // ------------------------------------------------------------------
    // Terrain
    // ------------------------------------------------------------------

    /// Base terrain height (hills + mountains) before pond carving.
    pub fn base_height(&self, x: f32, z: f32) -> f32 {
        heightfield::base_height(&self.mountains, x, z)
    }

    /// Terrain height with pond basins carved in. Well-defined for any
    /// coordinates and any (possibly empty) registry state.
    pub fn height(&self, x: f32, z: f32) -> f32 {
        heightfield::height(&self.mountains, &self.ponds, x, z)
    }

    pub fn add_mountain(
        &mut self,
        center: Vec2,
        radius: f32,
        peak_height: f32,
    ) -> Result<(), WorldError> {
        self.mountains.push(Mountain::new(center, radius, peak_height)?);
        Ok(())
    }

    pub fn clear_mountains(&mut self) {
        self.mountains.clear();
    }

    pub fn mountains(&self) -> &[Mountain] {
        &self.mountains
    }

    // ------------------------------------------------------------------
    // Water
    // ------------------------------------------------------------------

    pub fn add_pond(&mut self, center: Vec2, radius: f32) -> Result<(), WorldError> {
        self.ponds.push(Pond::new(center, radius)?);
        Ok(())
    }

    pub fn clear_ponds(&mut self) {
        self.ponds.clear();
    }

    pub fn ponds(&self) -> &[Pond] {
        &self.ponds
    }

    // ------------------------------------------------------------------
    // Roads
    // ------------------------------------------------------------------

    pub fn add_road(&mut self, road: Road) -> Result<(), WorldError> {
        road.validate()?;
        self.roads.push(road);
        Ok(())
    }

    pub fn clear_roads(&mut self) {
        self.roads.clear();
    }

    pub fn roads(&self) -> &[Road] {
        &self.roads
    }

    /// Distance from a point to the nearest road centerline; `INFINITY` when
    /// the network is empty.
    pub fn distance_to_nearest_road(&self, x: f32, z: f32) -> f32 {
        roads::distance_to_nearest_road(&self.roads, Vec2::new(x, z))
    }

    // ------------------------------------------------------------------
    // Buildings
    // ------------------------------------------------------------------

    pub fn add_building(&mut self, building: Building) {
        self.buildings.push(building);
    }

    pub fn clear_buildings(&mut self) {
        self.buildings.clear();
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    /// Collision query for player movement and placement: expanded-box test
    /// against every footprint. `false` on an empty registry.
    pub fn is_position_inside_building(&self, x: f32, z: f32, radius: f32) -> bool {
        buildings::position_intersects_any(&self.buildings, x, z, radius)
    }

    // ------------------------------------------------------------------
    // Street lights and trees
    // ------------------------------------------------------------------

    pub fn add_street_light(&mut self, light: StreetLight) {
        self.street_lights.push(light);
    }

    pub fn clear_street_lights(&mut self) {
        self.street_lights.clear();
    }

    pub fn street_lights(&self) -> &[StreetLight] {
        &self.street_lights
    }

    pub fn add_tree(&mut self, position: Vec2) {
        self.trees.push(position);
    }

    pub fn clear_trees(&mut self) {
        self.trees.clear();
    }

    pub fn trees(&self) -> &[Vec2] {
        &self.trees
    }

    // ------------------------------------------------------------------
    // City generation
    // ------------------------------------------------------------------

    /// Generate a fresh city (roads, buildings, lake, lights, trees) from the
    /// stored city seed. See `city::generate`.
    pub fn generate_city(&mut self, params: &CityParams) -> Result<CityReport, WorldError> {
        city::generate(self, params)
    }

    /// Remove everything the city generator and coin spawner produce.
    /// Mountains are scene terrain, not city state, and survive.
    pub fn clear_city(&mut self) {
        self.buildings.clear();
        self.roads.clear();
        self.street_lights.clear();
        self.trees.clear();
        self.ponds.clear();
        self.coins.clear();
    }

    // ------------------------------------------------------------------
    // Coins
    // ------------------------------------------------------------------

    /// Spawn coins from the stored coin seed, replacing any previous set.
    /// Returns the number actually placed.
    pub fn spawn_coins(&mut self, count: usize, area_radius: f32) -> Result<usize, WorldError> {
        coins::spawn(self, count, area_radius)
    }

    pub fn clear_coins(&mut self) {
        self.coins.clear();
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    pub(crate) fn push_coin(&mut self, coin: Coin) {
        self.coins.push(coin);
    }

    /// Collect every uncollected coin within `radius` of (x, z); returns how
    /// many transitioned this call.
    pub fn collect_coins_at(&mut self, x: f32, z: f32, radius: f32) -> usize {
        coins::collect_at(&mut self.coins, x, z, radius)
    }

    pub fn total_coin_count(&self) -> usize {
        self.coins.len()
    }

    pub fn collected_coin_count(&self) -> usize {
        self.coins.iter().filter(|c| c.collected).count()
    }

    /// Positions of the coins still on the ground, in spawn order.
    pub fn uncollected_coin_positions(&self) -> Vec<Vec2> {
        self.coins
            .iter()
            .filter(|c| !c.collected)
            .map(|c| c.position)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_world_queries_are_well_defined() {
        let world = WorldState::default();
        assert!(world.height(3.0, -7.0).is_finite());
        assert_eq!(world.height(3.0, -7.0), world.base_height(3.0, -7.0));
        assert!(!world.is_position_inside_building(0.0, 0.0, 1.0));
        assert_eq!(world.distance_to_nearest_road(0.0, 0.0), f32::INFINITY);
        assert!(world.buildings().is_empty());
        assert_eq!(world.total_coin_count(), 0);
    }

    #[test]
    fn clear_city_empties_every_accessor() {
        let mut world = WorldState::default();
        world.generate_city(&CityParams::default()).unwrap();
        world.spawn_coins(20, 40.0).unwrap();
        world.clear_city();
        assert!(world.buildings().is_empty());
        assert!(world.roads().is_empty());
        assert!(world.street_lights().is_empty());
        assert!(world.trees().is_empty());
        assert!(world.ponds().is_empty());
        assert!(world.coins().is_empty());
    }

    #[test]
    fn clear_city_keeps_mountains() {
        let mut world = WorldState::default();
        world.add_mountain(Vec2::new(5.0, 5.0), 6.0, 3.5).unwrap();
        world.generate_city(&CityParams::default()).unwrap();
        world.clear_city();
        assert_eq!(world.mountains().len(), 1);
    }

    #[test]
    fn mountain_and_pond_validation_fails_fast() {
        let mut world = WorldState::default();
        assert!(world.add_mountain(Vec2::ZERO, -1.0, 2.0).is_err());
        assert!(world.add_pond(Vec2::ZERO, 0.0).is_err());
        assert!(world.mountains().is_empty());
        assert!(world.ponds().is_empty());
    }

    #[test]
    fn pond_carving_lowers_height_inside_the_lake() {
        let mut world = WorldState::default();
        world.generate_city(&CityParams::default()).unwrap();
        let lake = world.ponds()[0];
        let carved = world.height(lake.center.x, lake.center.z);
        let base = world.base_height(lake.center.x, lake.center.z);
        assert!((carved - (base - lake.max_depth())).abs() < 1e-5);
    }

    #[test]
    fn worlds_with_different_seeds_differ() {
        let mut world_a = WorldState::new(GenerationSeeds::from_master(1));
        let mut world_b = WorldState::new(GenerationSeeds::from_master(2));
        world_a.generate_city(&CityParams::default()).unwrap();
        world_b.generate_city(&CityParams::default()).unwrap();
        assert_ne!(world_a.buildings(), world_b.buildings());
    }
}
