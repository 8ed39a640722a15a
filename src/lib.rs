//! Procedural height fields shaped by droplet-based hydraulic erosion.
//!
//! [generate_terrain] builds a fractal Perlin height field, trims its edges and rains droplets
//! on it one at a time. Each droplet follows the slope of the current field, picking up sediment
//! where it speeds downhill and dropping it where it slows. The finished [HeightGrid] is a plain
//! square array; drawing it is left to the caller.

pub mod config;
pub mod erosion;
pub mod error;
pub mod grid;
pub mod noise;
pub mod rand;
pub mod terrain;
pub mod util;

pub use config::{ErosionParams, NoiseConfig, RainConfig, TerrainConfig};
pub use error::ConfigError;
pub use grid::HeightGrid;
pub use terrain::{generate_terrain, Terrain};
