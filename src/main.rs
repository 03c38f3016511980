use clap::Parser;

use village_generator::ascii::{self, AsciiMode};
use village_generator::city::CityParams;
use village_generator::export;
use village_generator::heightfield;
use village_generator::map_export::{self, MapExportConfig};
use village_generator::seeds::GenerationSeeds;
use village_generator::types::Vec2;
use village_generator::world::WorldState;

#[derive(Parser, Debug)]
#[command(name = "village_generator")]
#[command(about = "Generate a procedural village: terrain, roads, buildings, lake, coins")]
struct Args {
    /// Number of houses to place
    #[arg(long, default_value = "30")]
    houses: usize,

    /// Radius of the generated area in world units
    #[arg(long, default_value = "40.0")]
    area_radius: f32,

    /// Number of trees to place
    #[arg(long, default_value = "40")]
    trees: usize,

    /// Number of coins to spawn
    #[arg(long, default_value = "60")]
    coins: usize,

    /// Master seed (omit for the fixed historical layout)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Lake center x override (needs --lake-z too)
    #[arg(long)]
    lake_x: Option<f32>,

    /// Lake center z override (needs --lake-x too)
    #[arg(long)]
    lake_z: Option<f32>,

    /// Also reject building candidates overlapping placed buildings
    #[arg(long)]
    reject_overlap: bool,

    /// Skip the default mountain layout (flat rolling hills only)
    #[arg(long)]
    no_mountains: bool,

    /// Print the ASCII layout map to stdout
    #[arg(long)]
    print_map: bool,

    /// Export a text world file (ASCII maps + statistics)
    #[arg(long)]
    export_ascii: Option<String>,

    /// Export a PNG visual map
    #[arg(long)]
    export_map: Option<String>,

    /// PNG map size in pixels
    #[arg(long, default_value = "512")]
    map_size: u32,

    /// Export the generated layout as JSON
    #[arg(long)]
    export_json: Option<String>,
}

fn main() {
    let args = Args::parse();

    let seeds = match args.seed {
        Some(master) => GenerationSeeds::from_master(master),
        None => GenerationSeeds::default(),
    };
    let mut world = WorldState::new(seeds);
    println!("Generating village with {}", seeds);

    if !args.no_mountains {
        for m in heightfield::default_mountain_layout() {
            if let Err(e) = world.add_mountain(m.center, m.radius, m.peak_height) {
                eprintln!("error installing terrain: {}", e);
                std::process::exit(1);
            }
        }
        println!("Installed {} mountain domes", world.mountains().len());
    }

    let lake_center = match (args.lake_x, args.lake_z) {
        (Some(x), Some(z)) => Some(Vec2::new(x, z)),
        _ => None,
    };
    let params = CityParams {
        house_count: args.houses,
        area_radius: args.area_radius,
        lake_center,
        tree_count: args.trees,
        reject_building_overlap: args.reject_overlap,
    };

    println!("Generating city layout...");
    let report = match world.generate_city(&params) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };
    println!(
        "Placed {}/{} houses in {} attempts",
        report.houses_placed, report.houses_requested, report.building_attempts
    );
    println!(
        "Roads: {} | street lights: {} | trees: {}/{}",
        world.roads().len(),
        report.street_lights_placed,
        report.trees_placed,
        report.trees_requested
    );

    let lake = world.ponds()[0];
    println!(
        "Lake at ({:.1}, {:.1}), radius {:.1}, basin floor {:.2}",
        lake.center.x,
        lake.center.z,
        lake.radius,
        lake.basin_floor(world.mountains())
    );

    println!("Spawning coins...");
    let coins_placed = match world.spawn_coins(args.coins, args.area_radius) {
        Ok(placed) => placed,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };
    println!("Placed {}/{} coins", coins_placed, args.coins);

    if args.print_map {
        ascii::print_ascii_map(&world, AsciiMode::Layout, 96, 48, args.area_radius * 1.1);
    }

    if let Some(path) = &args.export_ascii {
        if let Err(e) = ascii::export_world_file(&world, &params, Some(&report), path) {
            eprintln!("error exporting world file: {}", e);
            std::process::exit(1);
        }
        println!("Exported world file to {}", path);
    }

    if let Some(path) = &args.export_map {
        let config = MapExportConfig {
            image_size: args.map_size,
            ..MapExportConfig::default()
        };
        if let Err(e) = map_export::export_visual_map(&world, args.area_radius, path, &config) {
            eprintln!("error exporting map: {}", e);
            std::process::exit(1);
        }
    }

    if let Some(path) = &args.export_json {
        if let Err(e) = export::export_layout_json(&world, Some(&report), path) {
            eprintln!("error exporting layout: {}", e);
            std::process::exit(1);
        }
    }
}
