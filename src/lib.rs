//! Village generation library
//!
//! Procedural village world model: analytic terrain heights, a deterministic
//! city layout generator, collectible spawning, and the geometric queries a
//! rendering/movement layer consumes.

pub mod ascii;
pub mod buildings;
pub mod city;
pub mod coins;
pub mod export;
pub mod heightfield;
pub mod map_export;
pub mod roads;
pub mod seeds;
pub mod types;
pub mod water;
pub mod world;
