use itertools::iproduct;

use std::f32::consts::PI;

use crate::grid::HeightGrid;

/// Cone-weighted neighbourhood used to spread an erosion amount around a cell.
///
/// For every offset `(x, y)` with `1 <= x, y <= radius` inside the circle of [radius], the cells
/// at `+(x, y)` and `-(x, y)` each lose `(radius - d) * amount / norm`, where `d` is the offset's
/// length and `norm = 4πr²/3`. The centre cell is untouched. The weights are not area-integrated,
/// so a full neighbourhood does not remove exactly [amount].
#[derive(Debug, Clone, PartialEq)]
pub struct RadiusKernel {
    radius: u32,
    norm: f32,
    taps: Vec<KernelTap>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelTap {
    pub d_row: i64,
    pub d_col: i64,
    /// `radius - distance`, before normalization.
    pub falloff: f32,
}

/// Where the mass of one scatter went.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scatter {
    /// Elevation subtracted from cells on the grid.
    pub removed: f64,
    /// Elevation that would have been subtracted from cells off the grid.
    pub lost: f64,
}

impl RadiusKernel {
    pub fn new(radius: u32) -> Self {
        let r = radius as f32;

        let taps = iproduct!(1..=radius as i64, 1..=radius as i64)
            .filter_map(|(x, y)| {
                let distance = ((x * x + y * y) as f32).sqrt();

                (distance <= r).then(|| KernelTap {
                    d_row: x,
                    d_col: y,
                    falloff: r - distance,
                })
            })
            .collect();

        Self {
            radius,
            norm: 4.0 * (PI * r * r) / 3.0,
            taps,
        }
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// The cone-volume normalization constant.
    pub fn norm(&self) -> f32 {
        self.norm
    }

    /// One entry per quadrant offset; each is applied at `+offset` and `-offset`.
    pub fn taps(&self) -> &[KernelTap] {
        &self.taps
    }

    /// Sum of the normalized weights over both mirrored offsets. A scatter of `amount` fully
    /// inside the grid removes `amount * total_weight()`.
    pub fn total_weight(&self) -> f32 {
        self.taps.iter().map(|t| 2.0 * t.falloff / self.norm).sum()
    }

    /// Subtract [amount] from the neighbourhood of `(row, col)`. Cells off the grid are skipped
    /// and their share is reported as lost.
    pub fn scatter(&self, grid: &mut HeightGrid, row: i64, col: i64, amount: f32) -> Scatter {
        let mut scatter = Scatter::default();

        for tap in self.taps.iter() {
            let delta = tap.falloff * amount / self.norm;

            for (r, c) in [
                (row + tap.d_row, col + tap.d_col),
                (row - tap.d_row, col - tap.d_col),
            ] {
                match grid.get_mut(r, c) {
                    Some(h) => {
                        *h -= delta;
                        scatter.removed += delta as f64;
                    }
                    None => scatter.lost += delta as f64,
                }
            }
        }

        scatter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taps_cover_quadrant_inside_circle() {
        let kernel = RadiusKernel::new(3);
        let offsets: Vec<(i64, i64)> = kernel.taps().iter().map(|t| (t.d_row, t.d_col)).collect();

        // (1, 3) and (3, 1) fall just outside the circle.
        assert_eq!(offsets, vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
        assert!((kernel.norm() - 12.0 * PI).abs() < 1e-4);
    }

    #[test]
    fn zero_radius_is_empty() {
        let kernel = RadiusKernel::new(0);
        let mut grid = HeightGrid::from_fn(4, |_, _| 1.0);

        assert!(kernel.taps().is_empty());
        assert_eq!(kernel.total_weight(), 0.0);
        assert_eq!(kernel.scatter(&mut grid, 1, 1, 5.0), Scatter::default());
        assert_eq!(grid.sum(), 16.0);
    }

    #[test]
    fn interior_scatter_removes_full_weight() {
        let kernel = RadiusKernel::new(4);
        let mut grid = HeightGrid::from_fn(21, |_, _| 100.0);
        let before = grid.sum();

        let scatter = kernel.scatter(&mut grid, 10, 10, 2.0);
        let expected = 2.0 * kernel.total_weight() as f64;

        assert_eq!(scatter.lost, 0.0);
        assert!((scatter.removed - expected).abs() < 1e-4);
        assert!((before - grid.sum() - expected).abs() < 1e-3);
        assert_eq!(grid[(10, 10)], 100.0);
        assert!(grid[(11, 11)] < grid[(13, 13)]);
        assert_eq!(grid[(11, 9)], 100.0);
    }

    #[test]
    fn corner_scatter_loses_mirrored_half() {
        let kernel = RadiusKernel::new(3);
        let mut grid = HeightGrid::from_fn(10, |_, _| 50.0);
        let before = grid.sum();

        let scatter = kernel.scatter(&mut grid, 0, 0, 1.0);
        let half = kernel.total_weight() as f64 / 2.0;

        assert!((scatter.removed - half).abs() < 1e-5);
        assert!((scatter.lost - half).abs() < 1e-5);
        assert!((before - grid.sum() - half).abs() < 1e-3);
    }
}
