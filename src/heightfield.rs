//! Analytic terrain-height model
//!
//! Elevation is a pure function of (x, z): gentle sin/cos rolling hills, plus
//! additive quadratic mountain domes, minus pond-carved basins. Nothing is
//! gridded or cached, so placement code can query exact elevations before any
//! mesh exists.

use serde::{Deserialize, Serialize};

use crate::types::Vec2;
use crate::water::Pond;
use crate::world::WorldError;

/// Amplitude of the base rolling hills.
pub const HILL_AMPLITUDE: f32 = 0.5;
/// Spatial frequency of the base rolling hills.
pub const HILL_FREQUENCY: f32 = 0.2;

/// A dome-shaped mountain contribution to the height field.
///
/// Contribution is `peak_height * (1 - dist/radius)^2` inside the radius and
/// exactly zero outside; overlapping domes add independently.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mountain {
    pub center: Vec2,
    pub radius: f32,
    pub peak_height: f32,
}

impl Mountain {
    /// Create a mountain dome, rejecting non-positive or non-finite radii.
    pub fn new(center: Vec2, radius: f32, peak_height: f32) -> Result<Self, WorldError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(WorldError::InvalidRadius {
                what: "mountain radius",
                value: radius,
            });
        }
        Ok(Self {
            center,
            radius,
            peak_height,
        })
    }

    /// Height this dome adds at the given ground point.
    pub fn contribution(&self, p: Vec2) -> f32 {
        let dist = self.center.distance(p);
        if dist >= self.radius {
            return 0.0;
        }
        let t = 1.0 - dist / self.radius;
        self.peak_height * t * t
    }
}

/// Base terrain height: rolling hills plus every mountain dome, before any
/// pond carving.
pub fn base_height(mountains: &[Mountain], x: f32, z: f32) -> f32 {
    let hills = HILL_AMPLITUDE * (x * HILL_FREQUENCY).sin() * (z * HILL_FREQUENCY).cos();
    let p = Vec2::new(x, z);
    hills + mountains.iter().map(|m| m.contribution(p)).sum::<f32>()
}

/// Terrain height with pond basins carved in.
///
/// Each basin is computed relative to the *base* height at its pond's center
/// and applied with `min`, so basins only ever lower terrain and overlapping
/// basins keep the deepest floor.
pub fn height(mountains: &[Mountain], ponds: &[Pond], x: f32, z: f32) -> f32 {
    let p = Vec2::new(x, z);
    let mut result = base_height(mountains, x, z);
    for pond in ponds {
        let dist = pond.center.distance(p);
        if dist >= pond.radius {
            continue;
        }
        let t = 1.0 - dist / pond.radius;
        let depressed =
            base_height(mountains, pond.center.x, pond.center.z) - pond.max_depth() * t * t;
        result = result.min(depressed);
    }
    result
}

/// The five mountain domes the original demo scene installed at attach time.
///
/// Exposed as an explicit layout so callers opt in; the library never
/// self-installs terrain.
pub fn default_mountain_layout() -> Vec<Mountain> {
    vec![
        // central ridge
        Mountain {
            center: Vec2::new(5.0, 5.0),
            radius: 6.0,
            peak_height: 3.5,
        },
        Mountain {
            center: Vec2::new(-8.0, 3.0),
            radius: 4.5,
            peak_height: 2.2,
        },
        // distant peaks
        Mountain {
            center: Vec2::new(12.0, -4.0),
            radius: 7.0,
            peak_height: 4.0,
        },
        Mountain {
            center: Vec2::new(-14.0, 10.0),
            radius: 6.5,
            peak_height: 3.2,
        },
        // smaller hill cluster
        Mountain {
            center: Vec2::new(0.0, -10.0),
            radius: 3.5,
            peak_height: 1.8,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_hill_value(x: f32, z: f32) -> f32 {
        HILL_AMPLITUDE * (x * HILL_FREQUENCY).sin() * (z * HILL_FREQUENCY).cos()
    }

    #[test]
    fn mountain_center_adds_exactly_its_peak() {
        let m = Mountain::new(Vec2::new(10.0, -6.0), 5.0, 3.0).unwrap();
        let h = base_height(&[m], 10.0, -6.0);
        assert!((h - (flat_hill_value(10.0, -6.0) + 3.0)).abs() < 1e-5);
    }

    #[test]
    fn mountain_contribution_is_zero_outside_radius() {
        let m = Mountain::new(Vec2::ZERO, 4.0, 2.0).unwrap();
        assert_eq!(m.contribution(Vec2::new(4.0, 0.0)), 0.0);
        assert_eq!(m.contribution(Vec2::new(10.0, 10.0)), 0.0);
    }

    #[test]
    fn overlapping_mountains_sum() {
        let a = Mountain::new(Vec2::ZERO, 6.0, 2.0).unwrap();
        let b = Mountain::new(Vec2::ZERO, 6.0, 1.5).unwrap();
        let h = base_height(&[a, b], 0.0, 0.0);
        assert!((h - (flat_hill_value(0.0, 0.0) + 3.5)).abs() < 1e-5);
    }

    #[test]
    fn rejects_non_positive_radius() {
        assert!(Mountain::new(Vec2::ZERO, 0.0, 1.0).is_err());
        assert!(Mountain::new(Vec2::ZERO, -3.0, 1.0).is_err());
    }

    #[test]
    fn basin_never_raises_terrain() {
        let pond = Pond::new(Vec2::new(2.0, 2.0), 8.0).unwrap();
        let ponds = [pond];
        for i in -20..20 {
            for j in -20..20 {
                let x = i as f32 * 0.5;
                let z = j as f32 * 0.5;
                let carved = height(&[], &ponds, x, z);
                let base = base_height(&[], x, z);
                assert!(carved <= base + 1e-6, "basin raised terrain at ({x}, {z})");
            }
        }
    }

    #[test]
    fn basin_depth_is_bounded() {
        let pond = Pond::new(Vec2::new(0.0, 0.0), 40.0).unwrap();
        let ponds = [pond];
        for i in -40..40 {
            let x = i as f32;
            let carved = height(&[], &ponds, x, 0.0);
            let base = base_height(&[], x, 0.0);
            assert!(carved >= base - crate::water::MAX_BASIN_DEPTH - 2.0 * HILL_AMPLITUDE);
        }
    }

    #[test]
    fn overlapping_basins_keep_the_deepest() {
        let big = Pond::new(Vec2::ZERO, 10.0).unwrap();
        let small = Pond::new(Vec2::ZERO, 4.0).unwrap();
        let both = height(&[], &[big, small], 0.0, 0.0);
        let big_only = height(&[], &[big], 0.0, 0.0);
        assert!((both - big_only).abs() < 1e-6);
    }

    #[test]
    fn height_outside_all_ponds_equals_base() {
        let pond = Pond::new(Vec2::new(-25.0, 25.0), 10.0).unwrap();
        let h = height(&[], &[pond], 20.0, -20.0);
        assert_eq!(h, base_height(&[], 20.0, -20.0));
    }

    #[test]
    fn default_layout_has_five_domes() {
        let layout = default_mountain_layout();
        assert_eq!(layout.len(), 5);
        assert!(layout.iter().all(|m| m.radius > 0.0));
    }
}
