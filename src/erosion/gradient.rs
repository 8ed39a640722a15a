use nannou::glam::Vec2;

use crate::grid::HeightGrid;

/// Finite-difference slope of [grid] at `(row, col)`, as `(d/dcol, d/drow)`.
///
/// Interior cells use a central difference, edge cells a one-sided difference. Returns `None`
/// off the grid, or when the grid is too small along an axis to take a difference.
pub fn gradient_at(grid: &HeightGrid, row: i64, col: i64) -> Option<Vec2> {
    grid.index_of(row, col)?;

    let size = grid.size();

    if size < 2 {
        return None;
    }

    let (row, col) = (row as usize, col as usize);

    let dx = axis_difference(size, col, |c| grid[(row, c)]);
    let dy = axis_difference(size, row, |r| grid[(r, col)]);

    Some(Vec2::new(dx, dy))
}

fn axis_difference(size: usize, i: usize, h: impl Fn(usize) -> f32) -> f32 {
    if i == 0 {
        h(1) - h(0)
    } else if i == size - 1 {
        h(size - 1) - h(size - 2)
    } else {
        (h(i + 1) - h(i - 1)) / 2.0
    }
}

/// The full gradient of a grid, one array per axis.
///
/// The erosion engine samples [gradient_at] on the live grid instead, which gives the same
/// numbers for the touched cell without recomputing the whole field after every write.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientField {
    /// Slope along the rows, `d/drow`.
    pub d_row: HeightGrid,
    /// Slope along the columns, `d/dcol`.
    pub d_col: HeightGrid,
}

impl GradientField {
    pub fn compute(grid: &HeightGrid) -> Self {
        let size = grid.size();
        let mut d_row = HeightGrid::new(size);
        let mut d_col = HeightGrid::new(size);

        if size < 2 {
            return Self { d_row, d_col };
        }

        let last = size - 1;

        for row in 0..size {
            d_col[(row, 0)] = grid[(row, 1)] - grid[(row, 0)];
            d_col[(row, last)] = grid[(row, last)] - grid[(row, last - 1)];

            for col in 1..last {
                d_col[(row, col)] = (grid[(row, col + 1)] - grid[(row, col - 1)]) / 2.0;
            }
        }

        for col in 0..size {
            d_row[(0, col)] = grid[(1, col)] - grid[(0, col)];
            d_row[(last, col)] = grid[(last, col)] - grid[(last - 1, col)];

            for row in 1..last {
                d_row[(row, col)] = (grid[(row + 1, col)] - grid[(row - 1, col)]) / 2.0;
            }
        }

        Self { d_row, d_col }
    }

    pub fn at(&self, row: i64, col: i64) -> Option<Vec2> {
        Some(Vec2::new(
            self.d_col.get(row, col)?,
            self.d_row.get(row, col)?,
        ))
    }
}
