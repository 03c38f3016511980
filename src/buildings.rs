//! Building footprints and the collision query
//!
//! The collision test is an expanded axis-aligned box check, not a true
//! circle-vs-rectangle test. Player movement and coin placement are tuned to
//! its slightly aggressive corner rejection, so it is preserved exactly.

use serde::{Deserialize, Serialize};

/// Window tint shared by generated buildings (warm lamplight).
pub const WINDOW_TINT: [f32; 3] = [0.95, 0.90, 0.55];

/// Facade variant the renderer picks a texture from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BuildingStyle {
    /// Untextured flat walls
    #[default]
    Plain,
    /// Brick texture
    Brick,
    /// Metal/curtain-wall texture
    Metal,
}

/// An axis-aligned building centered at (x, z) on the ground plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub x: f32,
    pub z: f32,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub window_tint: [f32; 3],
    pub style: BuildingStyle,
}

impl Building {
    /// Largest half-dimension of the footprint, used for road clearance.
    pub fn half_extent(&self) -> f32 {
        self.width.max(self.depth) * 0.5
    }

    /// Expanded-box overlap test against a disc at (x, z).
    pub fn intersects_position(&self, x: f32, z: f32, radius: f32) -> bool {
        (x - self.x).abs() <= self.width * 0.5 + radius
            && (z - self.z).abs() <= self.depth * 0.5 + radius
    }
}

/// True iff the query disc overlaps any building footprint (expanded-box
/// approximation). Empty input is simply `false`; there is no implicit
/// bootstrap layout.
pub fn position_intersects_any(buildings: &[Building], x: f32, z: f32, radius: f32) -> bool {
    buildings.iter().any(|b| b.intersects_position(x, z, radius))
}

/// The two fixed demo buildings the original scene fell back to when queried
/// before generation. Explicit now: callers that want the demo layout install
/// it; queries on an empty registry stay empty.
pub fn default_building_layout() -> Vec<Building> {
    vec![
        Building {
            x: -4.0,
            z: -4.0,
            width: 2.0,
            height: 3.0,
            depth: 2.0,
            window_tint: WINDOW_TINT,
            style: BuildingStyle::Brick,
        },
        Building {
            x: 6.0,
            z: 4.0,
            width: 1.8,
            height: 2.5,
            depth: 1.8,
            window_tint: WINDOW_TINT,
            style: BuildingStyle::Plain,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_building(x: f32, z: f32) -> Building {
        Building {
            x,
            z,
            width: 2.0,
            height: 3.0,
            depth: 2.0,
            window_tint: WINDOW_TINT,
            style: BuildingStyle::Plain,
        }
    }

    #[test]
    fn center_with_zero_radius_is_inside() {
        let b = unit_building(5.0, -3.0);
        assert!(position_intersects_any(&[b], 5.0, -3.0, 0.0));
    }

    #[test]
    fn far_point_is_outside() {
        let b = unit_building(0.0, 0.0);
        let far = b.width * 0.5 + b.depth * 0.5 + 10.0;
        assert!(!position_intersects_any(&[b], far, far, 0.0));
    }

    #[test]
    fn radius_expands_the_footprint() {
        let b = unit_building(0.0, 0.0);
        // just outside the bare footprint on the x axis
        assert!(!b.intersects_position(1.3, 0.0, 0.0));
        assert!(b.intersects_position(1.3, 0.0, 0.5));
    }

    #[test]
    fn box_test_over_approximates_at_corners() {
        let b = unit_building(0.0, 0.0);
        // a true circle test would miss this diagonal corner point
        assert!(b.intersects_position(1.4, 1.4, 0.5));
    }

    #[test]
    fn empty_registry_reports_no_collision() {
        assert!(!position_intersects_any(&[], 0.0, 0.0, 100.0));
    }

    #[test]
    fn default_layout_is_the_two_demo_buildings() {
        let layout = default_building_layout();
        assert_eq!(layout.len(), 2);
        assert_eq!(layout[0].x, -4.0);
        assert_eq!(layout[1].width, 1.8);
    }
}
