pub mod droplet;
pub use droplet::{Death, Droplet, Step};

pub mod engine;
pub use engine::{ErosionEngine, ErosionStats};

pub mod gradient;
pub use gradient::{gradient_at, GradientField};

pub mod kernel;
pub use kernel::{KernelTap, RadiusKernel, Scatter};

use crate::config::{ErosionParams, RainConfig};
use crate::grid::HeightGrid;

/// Rain [rain] droplets onto [grid] with the given physics.
pub fn erode(grid: &mut HeightGrid, rain: &RainConfig, params: &ErosionParams) -> ErosionStats {
    ErosionEngine::new(*rain, *params).run(grid)
}
