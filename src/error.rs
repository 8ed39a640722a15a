//! Configuration errors.
//!
//! Every error here is raised before a grid or a droplet exists. Failures inside a droplet's
//! lifetime are never errors; they end the droplet (see [`crate::erosion::Death`]).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A noise layer was asked for a lattice with no cells.
    #[error("lattice size must be at least 1")]
    ZeroLattice,

    /// The lattice does not evenly divide the resolution, so samples can't be assigned to cells.
    #[error("lattice size {lattice} does not divide resolution {resolution}")]
    LatticeMismatch { lattice: usize, resolution: usize },

    /// The resolution leaves too few samples to take a gradient after the edge trim.
    #[error("resolution {resolution} is below the minimum of {minimum}")]
    ResolutionTooSmall { resolution: usize, minimum: usize },

    #[error("at least one octave is required")]
    NoOctaves,

    /// `scale * lacunarity^octave` does not fit in a usize.
    #[error("lattice size of octave {octave} overflows")]
    LatticeOverflow { octave: u32 },
}
