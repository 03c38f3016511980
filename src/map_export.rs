//! Top-down PNG export of the generated village
//!
//! A stand-in for the excluded real-time renderer: terrain shading comes
//! straight from the analytic height model, features are overlaid on top.
//! Terrain sampling is pure, so pixel rows are computed in parallel.

use std::error::Error;

use image::{ImageBuffer, Rgb, RgbImage};
use rayon::prelude::*;

use crate::buildings::BuildingStyle;
use crate::types::Vec2;
use crate::world::WorldState;

/// Height range mapped onto the terrain color ramp.
const RAMP_MIN: f32 = -3.5;
const RAMP_MAX: f32 = 4.5;

/// Configuration for PNG map export.
#[derive(Clone, Copy, Debug)]
pub struct MapExportConfig {
    /// Output image is `image_size` x `image_size` pixels.
    pub image_size: u32,
    /// World extent drawn, as a multiple of the area radius.
    pub extent_scale: f32,
}

impl Default for MapExportConfig {
    fn default() -> Self {
        Self {
            image_size: 512,
            extent_scale: 1.1,
        }
    }
}

/// Export a shaded top-down map of the world.
pub fn export_visual_map(
    world: &WorldState,
    area_radius: f32,
    filename: &str,
    config: &MapExportConfig,
) -> Result<(), Box<dyn Error>> {
    let size = config.image_size;
    let extent = area_radius * config.extent_scale;

    // Terrain, water and roads: per-pixel pure queries, parallel by row.
    let rows: Vec<Vec<[u8; 3]>> = (0..size)
        .into_par_iter()
        .map(|py| {
            (0..size)
                .map(|px| {
                    let (x, z) = pixel_to_world(px, py, size, extent);
                    base_color(world, x, z)
                })
                .collect()
        })
        .collect();

    let mut img: RgbImage = ImageBuffer::new(size, size);
    for (py, row) in rows.iter().enumerate() {
        for (px, color) in row.iter().enumerate() {
            img.put_pixel(px as u32, py as u32, Rgb(*color));
        }
    }

    // Feature overlays on top of the base layer.
    for b in world.buildings() {
        let color = match b.style {
            BuildingStyle::Plain => [160, 130, 100],
            BuildingStyle::Brick => [150, 70, 50],
            BuildingStyle::Metal => [140, 145, 155],
        };
        fill_world_rect(
            &mut img,
            size,
            extent,
            b.x - b.width * 0.5,
            b.z - b.depth * 0.5,
            b.x + b.width * 0.5,
            b.z + b.depth * 0.5,
            color,
        );
    }
    for tree in world.trees() {
        stamp_dot(&mut img, size, extent, *tree, 2, [20, 90, 30]);
    }
    for light in world.street_lights() {
        stamp_dot(&mut img, size, extent, Vec2::new(light.x, light.z), 1, [250, 250, 230]);
    }
    for coin in world.uncollected_coin_positions() {
        stamp_dot(&mut img, size, extent, coin, 1, [240, 200, 40]);
    }

    img.save(filename)?;
    println!("Exported visual map to {}", filename);
    Ok(())
}

fn pixel_to_world(px: u32, py: u32, size: u32, extent: f32) -> (f32, f32) {
    let x = -extent + (px as f32 + 0.5) / size as f32 * extent * 2.0;
    let z = -extent + (py as f32 + 0.5) / size as f32 * extent * 2.0;
    (x, z)
}

fn world_to_pixel(p: Vec2, size: u32, extent: f32) -> (i64, i64) {
    let px = ((p.x + extent) / (extent * 2.0) * size as f32) as i64;
    let py = ((p.z + extent) / (extent * 2.0) * size as f32) as i64;
    (px, py)
}

fn base_color(world: &WorldState, x: f32, z: f32) -> [u8; 3] {
    let p = Vec2::new(x, z);

    for pond in world.ponds() {
        let dist = pond.center.distance(p);
        if dist < pond.radius {
            // deeper toward the center
            let t = 1.0 - dist / pond.radius;
            return lerp_color([70, 130, 180], [25, 60, 110], t);
        }
    }

    for road in world.roads() {
        if road.distance_to(p) <= road.half_width {
            return if road.is_main {
                [60, 60, 65]
            } else {
                [90, 85, 80]
            };
        }
    }

    let h = world.height(x, z);
    let t = ((h - RAMP_MIN) / (RAMP_MAX - RAMP_MIN)).clamp(0.0, 1.0);
    let green = lerp_color([30, 70, 25], [120, 160, 80], t);
    if h > 2.5 {
        // rocky blend on the high domes
        let rock_t = ((h - 2.5) / 2.0).clamp(0.0, 1.0);
        lerp_color(green, [130, 125, 115], rock_t)
    } else {
        green
    }
}

fn lerp_color(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    [
        (a[0] as f32 + (b[0] as f32 - a[0] as f32) * t) as u8,
        (a[1] as f32 + (b[1] as f32 - a[1] as f32) * t) as u8,
        (a[2] as f32 + (b[2] as f32 - a[2] as f32) * t) as u8,
    ]
}

#[allow(clippy::too_many_arguments)]
fn fill_world_rect(
    img: &mut RgbImage,
    size: u32,
    extent: f32,
    min_x: f32,
    min_z: f32,
    max_x: f32,
    max_z: f32,
    color: [u8; 3],
) {
    let (px0, py0) = world_to_pixel(Vec2::new(min_x, min_z), size, extent);
    let (px1, py1) = world_to_pixel(Vec2::new(max_x, max_z), size, extent);
    for py in px_range(py0, py1, size) {
        for px in px_range(px0, px1, size) {
            img.put_pixel(px, py, Rgb(color));
        }
    }
}

fn stamp_dot(img: &mut RgbImage, size: u32, extent: f32, p: Vec2, radius: i64, color: [u8; 3]) {
    let (cx, cy) = world_to_pixel(p, size, extent);
    for py in px_range(cy - radius, cy + radius, size) {
        for px in px_range(cx - radius, cx + radius, size) {
            img.put_pixel(px, py, Rgb(color));
        }
    }
}

fn px_range(a: i64, b: i64, size: u32) -> std::ops::RangeInclusive<u32> {
    if b < 0 || a >= size as i64 {
        // entirely off-image
        return 1..=0;
    }
    let lo = a.clamp(0, size as i64 - 1) as u32;
    let hi = b.clamp(0, size as i64 - 1) as u32;
    lo..=hi
}
