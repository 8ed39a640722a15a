use std::time::Instant;

use crate::config::{TerrainConfig, TRIM_LEADING, TRIM_TRAILING};
use crate::erosion::{ErosionEngine, ErosionStats};
use crate::error::ConfigError;
use crate::grid::HeightGrid;
use crate::noise::FractalComposer;

#[derive(Debug, Clone)]
pub struct Terrain {
    pub config: TerrainConfig,
    /// The trimmed noise field, before any droplet fell on it.
    pub initial: HeightGrid,
    /// The eroded height field. Values are not clamped, so erosion may push them outside the
    /// \[0, 255\] range the noise started in.
    pub heights: HeightGrid,
    pub stats: ErosionStats,
}

impl Terrain {
    /// Per-cell change made by erosion, `heights - initial`.
    pub fn erosion_delta(&self) -> HeightGrid {
        HeightGrid::from_fn(self.heights.size(), |row, col| {
            self.heights[(row, col)] - self.initial[(row, col)]
        })
    }
}

pub fn generate_terrain(config: TerrainConfig) -> Result<Terrain, ConfigError> {
    let now = Instant::now();

    config.validate()?;

    let noise = FractalComposer::new(&config.noise)?.compose();

    // The outermost samples carry interpolation artifacts from the lattice boundary.
    let initial = noise.crop(TRIM_LEADING, TRIM_TRAILING);

    let mut heights = initial.clone();
    let stats = ErosionEngine::new(config.rain, config.erosion).run(&mut heights);

    log::info!(
        "generated {}x{} terrain with {} droplets in {:.4?}",
        heights.size(),
        heights.size(),
        stats.droplets,
        now.elapsed(),
    );

    Ok(Terrain {
        config,
        initial,
        heights,
        stats,
    })
}
