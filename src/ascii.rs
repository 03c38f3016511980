//! ASCII rendering and export for village maps
//!
//! Renders the generated world as character grids (feature layout or raw
//! elevation) and exports a timestamped text world file with statistics.

use std::fs::File;
use std::io::{self, Write};

use chrono::Local;

use crate::city::{CityParams, CityReport};
use crate::types::Vec2;
use crate::world::WorldState;

/// ASCII rendering modes
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AsciiMode {
    /// Generated features over the terrain
    Layout,
    /// Elevation gradient only
    Elevation,
}

impl AsciiMode {
    pub fn name(&self) -> &'static str {
        match self {
            AsciiMode::Layout => "Layout",
            AsciiMode::Elevation => "Elevation",
        }
    }

    pub fn all() -> &'static [AsciiMode] {
        &[AsciiMode::Layout, AsciiMode::Elevation]
    }
}

/// Get ASCII character for an elevation value
pub fn elevation_char(height: f32) -> char {
    if height < -2.0 {
        '_'
    } else if height < -0.5 {
        ','
    } else if height < 0.5 {
        '.'
    } else if height < 1.5 {
        '-'
    } else if height < 2.5 {
        '='
    } else if height < 3.5 {
        '^'
    } else {
        'A'
    }
}

/// Render the world as an ASCII grid covering `[-extent, extent]` on both
/// axes. Columns map to x, rows to z.
pub fn render_ascii_map(
    world: &WorldState,
    mode: AsciiMode,
    columns: usize,
    rows: usize,
    extent: f32,
) -> String {
    let mut grid = vec![vec![' '; columns]; rows];

    for (row, line) in grid.iter_mut().enumerate() {
        for (col, cell) in line.iter_mut().enumerate() {
            let (x, z) = cell_center(col, row, columns, rows, extent);
            *cell = match mode {
                AsciiMode::Elevation => elevation_char(world.height(x, z)),
                AsciiMode::Layout => base_layout_char(world, x, z),
            };
        }
    }

    if mode == AsciiMode::Layout {
        // Stamp point features so none fall between cell centers.
        for tree in world.trees() {
            stamp(&mut grid, *tree, columns, rows, extent, 'T');
        }
        for light in world.street_lights() {
            stamp(&mut grid, Vec2::new(light.x, light.z), columns, rows, extent, '!');
        }
        for p in world.uncollected_coin_positions() {
            stamp(&mut grid, p, columns, rows, extent, 'o');
        }
    }

    let mut out = String::with_capacity(rows * (columns + 1));
    for line in &grid {
        out.extend(line.iter());
        out.push('\n');
    }
    out
}

fn cell_center(col: usize, row: usize, columns: usize, rows: usize, extent: f32) -> (f32, f32) {
    let x = -extent + (col as f32 + 0.5) / columns as f32 * extent * 2.0;
    let z = -extent + (row as f32 + 0.5) / rows as f32 * extent * 2.0;
    (x, z)
}

fn base_layout_char(world: &WorldState, x: f32, z: f32) -> char {
    let p = Vec2::new(x, z);
    if world.ponds().iter().any(|pond| pond.contains(p)) {
        return '~';
    }
    if world.is_position_inside_building(x, z, 0.0) {
        return 'H';
    }
    for road in world.roads() {
        if road.distance_to(p) <= road.half_width {
            return if road.is_main { '#' } else { '+' };
        }
    }
    elevation_char(world.height(x, z))
}

fn stamp(grid: &mut [Vec<char>], p: Vec2, columns: usize, rows: usize, extent: f32, ch: char) {
    let col = ((p.x + extent) / (extent * 2.0) * columns as f32) as isize;
    let row = ((p.z + extent) / (extent * 2.0) * rows as f32) as isize;
    if col >= 0 && (col as usize) < columns && row >= 0 && (row as usize) < rows {
        grid[row as usize][col as usize] = ch;
    }
}

pub fn layout_legend() -> String {
    let mut s = String::new();
    s.push_str("Legend:\n");
    s.push_str("  ~  water (pond/lake)\n");
    s.push_str("  #  main road\n");
    s.push_str("  +  side road\n");
    s.push_str("  H  building\n");
    s.push_str("  T  tree\n");
    s.push_str("  !  street light\n");
    s.push_str("  o  coin (uncollected)\n");
    s
}

pub fn elevation_legend() -> String {
    let mut s = String::new();
    s.push_str("Elevation:\n");
    s.push_str("  _  basin floor (< -2.0)\n");
    s.push_str("  ,  low (-2.0 to -0.5)\n");
    s.push_str("  .  plain (-0.5 to 0.5)\n");
    s.push_str("  -  raised (0.5 to 1.5)\n");
    s.push_str("  =  high (1.5 to 2.5)\n");
    s.push_str("  ^  slope (2.5 to 3.5)\n");
    s.push_str("  A  peak (> 3.5)\n");
    s
}

/// Print an ASCII map to stdout.
pub fn print_ascii_map(world: &WorldState, mode: AsciiMode, columns: usize, rows: usize, extent: f32) {
    print!("{}", render_ascii_map(world, mode, columns, rows, extent));
}

/// Export the world as a text file: header, both map layers, legends and
/// statistics.
pub fn export_world_file(
    world: &WorldState,
    params: &CityParams,
    report: Option<&CityReport>,
    path: &str,
) -> io::Result<()> {
    const COLUMNS: usize = 96;
    const ROWS: usize = 48;
    let extent = params.area_radius * 1.1;

    let mut file = File::create(path)?;

    writeln!(file, "=== VILLAGE GENERATOR WORLD FILE ===")?;
    writeln!(file, "Seeds: {}", world.seeds())?;
    writeln!(
        file,
        "Area radius: {} | houses: {} | trees: {}",
        params.area_radius, params.house_count, params.tree_count
    )?;
    writeln!(file, "Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(file)?;

    writeln!(file, "=== MAP (Layout View) ===")?;
    write!(
        file,
        "{}",
        render_ascii_map(world, AsciiMode::Layout, COLUMNS, ROWS, extent)
    )?;
    writeln!(file)?;
    write!(file, "{}", layout_legend())?;
    writeln!(file)?;

    writeln!(file, "=== MAP (Elevation View) ===")?;
    write!(
        file,
        "{}",
        render_ascii_map(world, AsciiMode::Elevation, COLUMNS, ROWS, extent)
    )?;
    writeln!(file)?;
    write!(file, "{}", elevation_legend())?;
    writeln!(file)?;

    writeln!(file, "=== STATISTICS ===")?;
    writeln!(file, "Roads: {}", world.roads().len())?;
    writeln!(file, "Buildings: {}", world.buildings().len())?;
    writeln!(file, "Street lights: {}", world.street_lights().len())?;
    writeln!(file, "Trees: {}", world.trees().len())?;
    writeln!(file, "Ponds: {}", world.ponds().len())?;
    writeln!(
        file,
        "Coins: {} total, {} collected",
        world.total_coin_count(),
        world.collected_coin_count()
    )?;
    if let Some(report) = report {
        writeln!(
            file,
            "Houses placed: {}/{} in {} attempts",
            report.houses_placed, report.houses_requested, report.building_attempts
        )?;
        writeln!(
            file,
            "Trees placed: {}/{}",
            report.trees_placed, report.trees_requested
        )?;
    }

    let (min_h, max_h) = sampled_height_range(world, COLUMNS, ROWS, extent);
    writeln!(file, "Height range (sampled): {:.2} to {:.2}", min_h, max_h)?;

    Ok(())
}

fn sampled_height_range(
    world: &WorldState,
    columns: usize,
    rows: usize,
    extent: f32,
) -> (f32, f32) {
    let mut min_h = f32::MAX;
    let mut max_h = f32::MIN;
    for row in 0..rows {
        for col in 0..columns {
            let (x, z) = cell_center(col, row, columns, rows, extent);
            let h = world.height(x, z);
            min_h = min_h.min(h);
            max_h = max_h.max(h);
        }
    }
    (min_h, max_h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city;

    fn generated_world() -> WorldState {
        let mut world = WorldState::default();
        city::generate(&mut world, &CityParams::default()).unwrap();
        world.spawn_coins(40, 40.0).unwrap();
        world
    }

    #[test]
    fn layout_map_shows_the_generated_features() {
        let world = generated_world();
        let map = render_ascii_map(&world, AsciiMode::Layout, 96, 48, 44.0);
        assert!(map.contains('~'), "lake missing from layout map");
        assert!(map.contains('#'), "main roads missing from layout map");
        assert!(map.contains('H'), "buildings missing from layout map");
        assert!(map.contains('o'), "coins missing from layout map");
    }

    #[test]
    fn map_has_requested_dimensions() {
        let world = WorldState::default();
        let map = render_ascii_map(&world, AsciiMode::Elevation, 40, 20, 30.0);
        let lines: Vec<&str> = map.lines().collect();
        assert_eq!(lines.len(), 20);
        assert!(lines.iter().all(|l| l.chars().count() == 40));
    }

    #[test]
    fn elevation_chars_cover_the_gradient() {
        assert_eq!(elevation_char(-3.0), '_');
        assert_eq!(elevation_char(0.0), '.');
        assert_eq!(elevation_char(4.0), 'A');
    }

    #[test]
    fn collected_coins_disappear_from_the_map() {
        let mut world = generated_world();
        for p in world.uncollected_coin_positions() {
            world.collect_coins_at(p.x, p.z, 1.0);
        }
        let map = render_ascii_map(&world, AsciiMode::Layout, 96, 48, 44.0);
        assert!(!map.contains('o'));
    }
}
