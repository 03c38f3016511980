//! Road polylines and distance queries
//!
//! The point-to-segment distance here is the one geometric primitive every
//! placement pass (buildings, trees, coins) leans on, so it is exact: project,
//! clamp, measure.

use serde::{Deserialize, Serialize};

use crate::types::Vec2;
use crate::world::WorldError;

/// A road: an immutable polyline on the ground plane with a half-width.
///
/// Main roads are the arterial template; side roads only differ in rendering,
/// not in how placement treats them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Road {
    pub points: Vec<Vec2>,
    pub half_width: f32,
    pub is_main: bool,
}

impl Road {
    /// Create a road, validating the polyline and half-width.
    pub fn new(points: Vec<Vec2>, half_width: f32, is_main: bool) -> Result<Self, WorldError> {
        let road = Self {
            points,
            half_width,
            is_main,
        };
        road.validate()?;
        Ok(road)
    }

    /// Convenience constructor for a straight two-point road.
    pub fn segment(a: Vec2, b: Vec2, half_width: f32, is_main: bool) -> Result<Self, WorldError> {
        Self::new(vec![a, b], half_width, is_main)
    }

    pub fn validate(&self) -> Result<(), WorldError> {
        if self.points.len() < 2 {
            return Err(WorldError::RoadTooShort {
                points: self.points.len(),
            });
        }
        if !self.half_width.is_finite() || self.half_width <= 0.0 {
            return Err(WorldError::InvalidRadius {
                what: "road half-width",
                value: self.half_width,
            });
        }
        Ok(())
    }

    /// Total polyline length. Degenerate segments contribute zero.
    pub fn length(&self) -> f32 {
        self.points
            .windows(2)
            .map(|w| w[0].distance(w[1]))
            .sum()
    }

    /// Minimum distance from a point to this road's centerline.
    pub fn distance_to(&self, p: Vec2) -> f32 {
        match self.points.len() {
            0 => f32::INFINITY,
            1 => p.distance(self.points[0]),
            _ => self
                .points
                .windows(2)
                .map(|w| point_segment_distance(p, w[0], w[1]))
                .fold(f32::INFINITY, f32::min),
        }
    }

    /// Point and unit tangent at the given arc-length distance along the
    /// polyline. Clamps to the endpoints; a fully degenerate road yields its
    /// first point and an arbitrary fixed tangent.
    pub fn point_at_distance(&self, distance: f32) -> (Vec2, Vec2) {
        let origin = self.points.first().copied().unwrap_or(Vec2::ZERO);
        let fallback = (origin, Vec2::new(1.0, 0.0));
        let mut remaining = distance.max(0.0);
        let mut last = fallback;
        for w in self.points.windows(2) {
            let seg = w[1] - w[0];
            let seg_len = seg.length();
            if seg_len <= f32::EPSILON {
                continue;
            }
            let tangent = seg * (1.0 / seg_len);
            if remaining <= seg_len {
                return (w[0] + tangent * remaining, tangent);
            }
            remaining -= seg_len;
            last = (w[1], tangent);
        }
        last
    }
}

/// Exact distance from point `p` to segment `ab`.
///
/// A degenerate segment (`a == b`) degrades to the distance to `a`, with no
/// division by zero.
pub fn point_segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let v = b - a;
    let w = p - a;
    let c1 = w.dot(&v);
    if c1 <= 0.0 {
        return p.distance(a);
    }
    let c2 = v.dot(&v);
    if c2 <= 0.0 {
        return p.distance(a);
    }
    let t = (c1 / c2).clamp(0.0, 1.0);
    p.distance(a + v * t)
}

/// Distance from a point to the nearest road in the network.
///
/// `INFINITY` on an empty network, so threshold comparisons stay total.
pub fn distance_to_nearest_road(roads: &[Road], p: Vec2) -> f32 {
    roads
        .iter()
        .map(|r| r.distance_to(p))
        .fold(f32::INFINITY, f32::min)
}
