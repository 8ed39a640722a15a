use crate::grid::HeightGrid;

/// Kernel half-width in standard deviations.
const TRUNCATE: f32 = 4.0;

/// Gaussian blur of [grid] with standard deviation [sigma], in cells.
///
/// The kernel is separable and applied along rows, then columns. Samples past an edge are
/// mirrored back into the grid (`d c b a | a b c d | d c b a`).
pub fn gaussian_blur(grid: &HeightGrid, sigma: f32) -> HeightGrid {
    if sigma <= 0.0 || grid.size() == 0 {
        return grid.clone();
    }

    let weights = gaussian_weights(sigma);
    let radius = (weights.len() / 2) as i64;
    let size = grid.size();

    let rows = HeightGrid::from_fn(size, |row, col| {
        convolve(&weights, radius, |k| {
            grid[(row, reflect(col as i64 + k, size))]
        })
    });

    HeightGrid::from_fn(size, |row, col| {
        convolve(&weights, radius, |k| {
            rows[(reflect(row as i64 + k, size), col)]
        })
    })
}

fn gaussian_weights(sigma: f32) -> Vec<f32> {
    let radius = (TRUNCATE * sigma + 0.5) as i64;

    let mut weights: Vec<f32> = (-radius..=radius)
        .map(|x| (-0.5 * (x * x) as f32 / (sigma * sigma)).exp())
        .collect();

    let total: f32 = weights.iter().sum();

    for w in weights.iter_mut() {
        *w /= total;
    }

    weights
}

fn convolve(weights: &[f32], radius: i64, sample: impl Fn(i64) -> f32) -> f32 {
    weights
        .iter()
        .zip(-radius..=radius)
        .map(|(w, k)| w * sample(k))
        .sum()
}

/// Fold an out-of-range index back into `0..size` by mirroring at the edges.
fn reflect(i: i64, size: usize) -> usize {
    let n = size as i64;
    let m = i.rem_euclid(2 * n);

    if m < n {
        m as usize
    } else {
        (2 * n - 1 - m) as usize
    }
}
