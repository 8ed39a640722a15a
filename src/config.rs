use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Samples removed from the leading edge of each axis before erosion.
pub const TRIM_LEADING: usize = 1;
/// Samples removed from the trailing edge of each axis before erosion.
pub const TRIM_TRAILING: usize = 2;

/// The smallest noise resolution that still leaves a 2x2 working grid after the edge trim.
pub const MIN_RESOLUTION: usize = TRIM_LEADING + TRIM_TRAILING + 1;

/// Parameters for the fractal noise that produces the initial height field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Number of samples along each axis of a noise layer, minus one.
    pub resolution: usize,
    /// Lattice size of the first octave.
    pub scale: usize,
    pub octaves: u32,
    /// Lattice growth per octave.
    pub lacunarity: usize,
    /// Weight decay per octave.
    pub persistence: f32,
    pub seed: u64,
    /// Attenuation applied to lattice-aligned rows and columns.
    pub burn: f32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            resolution: 256,
            scale: 1,
            octaves: 4,
            lacunarity: 2,
            persistence: 0.8,
            seed: 5,
            burn: 0.5,
        }
    }
}

impl NoiseConfig {
    /// The lattice size used by [octave], `scale * lacunarity^octave`.
    pub fn lattice(&self, octave: u32) -> Result<usize, ConfigError> {
        self.lacunarity
            .checked_pow(octave)
            .and_then(|f| f.checked_mul(self.scale))
            .ok_or(ConfigError::LatticeOverflow { octave })
    }

    /// The weight of [octave] in the fractal sum.
    pub fn weight(&self, octave: u32) -> f32 {
        self.persistence.powi(octave as i32)
    }

    /// Check that every octave's lattice evenly divides the resolution.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.octaves == 0 {
            return Err(ConfigError::NoOctaves);
        }

        for octave in 0..self.octaves {
            check_lattice(self.lattice(octave)?, self.resolution)?;
        }

        Ok(())
    }
}

pub(crate) fn check_lattice(lattice: usize, resolution: usize) -> Result<(), ConfigError> {
    if lattice == 0 {
        return Err(ConfigError::ZeroLattice);
    }

    if resolution == 0 || resolution % lattice != 0 {
        return Err(ConfigError::LatticeMismatch {
            lattice,
            resolution,
        });
    }

    Ok(())
}

/// Parameters for spawning droplets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainConfig {
    /// Number of droplets to simulate, one after another.
    pub drops: usize,
    /// Maximum number of steps a droplet may take.
    pub move_cap: u32,
    pub initial_water: f32,
    /// Initial velocity as `[column, row]`.
    pub initial_velocity: [f32; 2],
    pub seed: u64,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            drops: 50_000,
            move_cap: 250,
            initial_water: 1.0,
            initial_velocity: [0.0, 0.0],
            seed: 874_923,
        }
    }
}

impl RainConfig {
    /// Water lost by a droplet on each step, so it would run dry exactly at the step cap.
    pub fn evaporation(&self) -> f32 {
        self.initial_water / self.move_cap as f32
    }
}

/// Physical constants of the droplet simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErosionParams {
    pub gravity: f32,
    /// Fraction of the previous velocity kept on each step, in \[0, 1\].
    pub momentum: f32,
    /// A droplet with this much water or less is dead.
    pub water_cutoff: f32,
    pub erosion_rate: f32,
    pub capacity_multiplier: f32,
    pub deposition_rate: f32,
    /// Radius of the erosion kernel in cells.
    pub radius: u32,
    /// Lower bound on the slope term of the sediment capacity, so flat moves still carry some.
    pub min_slope_capacity: f32,
}

impl Default for ErosionParams {
    fn default() -> Self {
        Self {
            gravity: 20.0,
            momentum: 0.2,
            water_cutoff: 0.001,
            erosion_rate: 0.9,
            capacity_multiplier: 10.0,
            deposition_rate: 0.02,
            radius: 4,
            min_slope_capacity: 0.01,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub noise: NoiseConfig,
    pub rain: RainConfig,
    pub erosion: ErosionParams,
}

impl TerrainConfig {
    /// Reject configurations that can't produce a grid. Nothing else is cross-checked.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.noise.resolution < MIN_RESOLUTION {
            return Err(ConfigError::ResolutionTooSmall {
                resolution: self.noise.resolution,
                minimum: MIN_RESOLUTION,
            });
        }

        self.noise.validate()
    }

    /// The side length of the grid handed to the erosion stage.
    pub fn working_resolution(&self) -> usize {
        (self.noise.resolution + 1).saturating_sub(TRIM_LEADING + TRIM_TRAILING)
    }
}
