use nannou::glam::Vec2;

use crate::config::check_lattice;
use crate::error::ConfigError;
use crate::grid::HeightGrid;
use crate::noise::{NOISE_MAX, NOISE_MIN};
use crate::rand::{random_angle, seeded_rng};
use crate::util::fade;

/// Attenuation applied to lattice-aligned samples unless configured otherwise.
pub const DEFAULT_BURN: f32 = 0.5;

/// A single layer of 2D gradient (Perlin) noise.
///
/// The layer covers a `lattice x lattice` grid of cells sampled at `resolution + 1` points per
/// axis, so each cell spans `resolution / lattice` samples and the outermost samples land
/// exactly on the lattice boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseField {
    lattice: usize,
    resolution: usize,
    seed: u64,
    burn: f32,
}

impl NoiseField {
    pub fn new(lattice: usize, resolution: usize, seed: u64) -> Result<Self, ConfigError> {
        check_lattice(lattice, resolution)?;

        Ok(Self {
            lattice,
            resolution,
            seed,
            burn: DEFAULT_BURN,
        })
    }

    pub fn with_burn(self, burn: f32) -> Self {
        Self { burn, ..self }
    }

    pub fn lattice(&self) -> usize {
        self.lattice
    }

    /// Number of samples per lattice cell along one axis.
    pub fn cell_span(&self) -> usize {
        self.resolution / self.lattice
    }

    /// Generate the `(resolution + 1)²` layer, normalized into \[0, 255\].
    pub fn generate(&self) -> HeightGrid {
        let gradients = self.gradients();
        let nodes = self.lattice + 1;
        let span = self.cell_span();

        let mut noise = HeightGrid::from_fn(self.resolution + 1, |row, col| {
            let p = Vec2::new(col as f32 / span as f32, row as f32 / span as f32);

            // Near and far corner of the sample's cell on each axis. A sample on an interior
            // lattice line gets the line's node as both corners, so that node counts twice and
            // the burn brings it back to a single share. Samples on the outer boundary only
            // count once and come out attenuated.
            let (x0, x1) = (self.near_node(col), self.far_node(col));
            let (y0, y1) = (self.near_node(row), self.far_node(row));

            let mut value = 0.0;

            for (nx, ny) in [(x0, y0), (x1, y0), (x0, y1), (x1, y1)] {
                let d = p - Vec2::new(nx as f32, ny as f32);
                let influence = fade(1.0 - d.x.abs()) * fade(1.0 - d.y.abs());

                value += influence * d.dot(gradients[ny * nodes + nx]);
            }

            if row % span == 0 || col % span == 0 {
                value *= self.burn;
            }

            value
        });

        noise.normalize(NOISE_MIN, NOISE_MAX);
        noise
    }

    /// The node at or before sample [i], clamped into the last cell.
    fn near_node(&self, i: usize) -> usize {
        (i / self.cell_span()).min(self.lattice - 1)
    }

    /// The node at or after sample [i], never the first node.
    fn far_node(&self, i: usize) -> usize {
        i.div_ceil(self.cell_span()).max(1)
    }

    /// One random unit gradient per lattice node, row-major.
    fn gradients(&self) -> Vec<Vec2> {
        let mut rand = seeded_rng(self.seed);
        let nodes = self.lattice + 1;

        (0..nodes * nodes)
            .map(|_| {
                let t = random_angle(&mut rand);
                Vec2::new(t.cos(), t.sin())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_shape_and_range() {
        for (lattice, resolution) in [(1, 4), (2, 16), (4, 16), (8, 32), (3, 27)] {
            let noise = NoiseField::new(lattice, resolution, 7).unwrap().generate();

            assert_eq!(noise.size(), resolution + 1);

            let (min, max) = noise.minmax().unwrap();
            assert!(min >= NOISE_MIN && max <= NOISE_MAX);
            assert_eq!(min, NOISE_MIN);
            assert_eq!(max, NOISE_MAX);
        }
    }

    #[test]
    fn rejects_mismatched_lattice() {
        assert_eq!(
            NoiseField::new(3, 16, 1),
            Err(ConfigError::LatticeMismatch {
                lattice: 3,
                resolution: 16
            })
        );
        assert_eq!(NoiseField::new(0, 16, 1), Err(ConfigError::ZeroLattice));
    }

    #[test]
    fn same_seed_same_layer() {
        let a = NoiseField::new(4, 32, 99).unwrap().generate();
        let b = NoiseField::new(4, 32, 99).unwrap().generate();
        let c = NoiseField::new(4, 32, 100).unwrap().generate();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    /// Mean absolute second difference along rows, at [columns], skipping lattice rows.
    fn roughness(noise: &HeightGrid, span: usize, columns: impl Iterator<Item = usize>) -> f32 {
        let columns: Vec<usize> = columns.collect();
        let mut sum = 0.0;
        let mut count = 0;

        for row in (1..noise.size() - 1).filter(|r| r % span != 0) {
            for c in columns.iter().copied() {
                sum += (noise[(row, c - 1)] - 2.0 * noise[(row, c)] + noise[(row, c + 1)]).abs();
                count += 1;
            }
        }

        sum / count as f32
    }

    #[test]
    fn burn_removes_interior_lattice_seams() {
        let field = NoiseField::new(2, 32, 7).unwrap();
        let span = field.cell_span();

        // Columns whose neighbours are neither the lattice line nor the burned outer edge.
        let elsewhere = move || (2..31).filter(move |c: &usize| c.abs_diff(span) > 1);

        let noise = field.generate();
        let at_line = roughness(&noise, span, std::iter::once(span));
        let around = roughness(&noise, span, elsewhere());

        assert!(at_line < 2.0 * around, "seam: {at_line} vs {around}");

        // Without the burn the doubled line stands out as a ridge or trench.
        let unburned = field.with_burn(1.0).generate();
        let at_line = roughness(&unburned, span, std::iter::once(span));
        let around = roughness(&unburned, span, elsewhere());

        assert!(at_line > 3.0 * around, "no seam: {at_line} vs {around}");
    }

    #[test]
    fn interior_line_counts_its_node_twice() {
        let field = NoiseField::new(2, 8, 3).unwrap();

        assert_eq!((field.near_node(4), field.far_node(4)), (1, 1));
        assert_eq!((field.near_node(0), field.far_node(0)), (0, 1));
        assert_eq!((field.near_node(5), field.far_node(5)), (1, 2));
        assert_eq!((field.near_node(8), field.far_node(8)), (1, 2));
    }
}
