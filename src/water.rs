//! Circular water bodies (ponds and the generated lake)
//!
//! A pond both renders as a water disc and carves a basin into the height
//! field; the carving math itself lives in `heightfield`.

use serde::{Deserialize, Serialize};

use crate::heightfield::{self, Mountain};
use crate::types::Vec2;
use crate::world::WorldError;

/// Deepest basin any pond may carve, in world units.
pub const MAX_BASIN_DEPTH: f32 = 3.0;
/// Basin depth as a fraction of pond radius, clamped by `MAX_BASIN_DEPTH`.
pub const BASIN_DEPTH_RATIO: f32 = 0.35;

/// A circular water body on the ground plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pond {
    pub center: Vec2,
    pub radius: f32,
}

impl Pond {
    /// Create a pond, rejecting non-positive or non-finite radii.
    pub fn new(center: Vec2, radius: f32) -> Result<Self, WorldError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(WorldError::InvalidRadius {
                what: "pond radius",
                value: radius,
            });
        }
        Ok(Self { center, radius })
    }

    /// Maximum depth of the basin this pond carves.
    pub fn max_depth(&self) -> f32 {
        MAX_BASIN_DEPTH.min(self.radius * BASIN_DEPTH_RATIO)
    }

    /// The deepest elevation the basin reaches, at the pond center.
    ///
    /// Computed against the *base* height (pre-carving) so neighboring basins
    /// never compound; callers use this to set a water line below the
    /// surrounding land.
    pub fn basin_floor(&self, mountains: &[Mountain]) -> f32 {
        heightfield::base_height(mountains, self.center.x, self.center.z) - self.max_depth()
    }

    /// Whether the ground point lies inside the water disc.
    pub fn contains(&self, p: Vec2) -> bool {
        self.center.distance(p) < self.radius
    }
}
