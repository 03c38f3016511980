//! JSON layout export
//!
//! Serializes the generated lists in one snapshot so an out-of-process
//! renderer can consume them. Not a persistence format: worlds are always
//! regenerated from seeds and parameters.

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;

use serde::Serialize;

use crate::buildings::Building;
use crate::city::{CityReport, StreetLight};
use crate::roads::Road;
use crate::types::Vec2;
use crate::water::Pond;
use crate::world::WorldState;

/// One-shot snapshot of everything the generator produced.
#[derive(Serialize)]
pub struct LayoutSnapshot<'a> {
    pub master_seed: u64,
    pub city_seed: u64,
    pub coin_seed: u64,
    pub buildings: &'a [Building],
    pub roads: &'a [Road],
    pub ponds: &'a [Pond],
    pub street_lights: &'a [StreetLight],
    pub trees: &'a [Vec2],
    pub uncollected_coins: Vec<Vec2>,
    pub report: Option<&'a CityReport>,
}

impl<'a> LayoutSnapshot<'a> {
    pub fn from_world(world: &'a WorldState, report: Option<&'a CityReport>) -> Self {
        let seeds = world.seeds();
        Self {
            master_seed: seeds.master,
            city_seed: seeds.city,
            coin_seed: seeds.coins,
            buildings: world.buildings(),
            roads: world.roads(),
            ponds: world.ponds(),
            street_lights: world.street_lights(),
            trees: world.trees(),
            uncollected_coins: world.uncollected_coin_positions(),
            report,
        }
    }
}

/// Write the layout snapshot as pretty-printed JSON.
pub fn export_layout_json(
    world: &WorldState,
    report: Option<&CityReport>,
    filename: &str,
) -> Result<(), Box<dyn Error>> {
    let snapshot = LayoutSnapshot::from_world(world, report);
    let file = BufWriter::new(File::create(filename)?);
    serde_json::to_writer_pretty(file, &snapshot)?;
    println!("Exported layout JSON to {}", filename);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::{self, CityParams};

    #[test]
    fn snapshot_serializes_every_generated_list() {
        let mut world = WorldState::default();
        let report = city::generate(&mut world, &CityParams::default()).unwrap();
        world.spawn_coins(30, 40.0).unwrap();

        let snapshot = LayoutSnapshot::from_world(&world, Some(&report));
        let json = serde_json::to_string(&snapshot).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(
            value["buildings"].as_array().unwrap().len(),
            world.buildings().len()
        );
        assert_eq!(value["roads"].as_array().unwrap().len(), world.roads().len());
        assert_eq!(
            value["uncollected_coins"].as_array().unwrap().len(),
            world.total_coin_count()
        );
        assert_eq!(value["city_seed"].as_u64().unwrap(), world.seeds().city);
    }
}
