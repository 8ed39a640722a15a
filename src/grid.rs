use std::ops::{Index, IndexMut};

use crate::util::{minmax, normalize_range};

/// A square grid of elevation samples, stored row-major.
///
/// Cells are addressed as `(row, col)`. The signed accessors ([HeightGrid::get],
/// [HeightGrid::get_mut]) return `None` for anything off the grid so callers can treat a
/// missing cell as "fell off the map" without panicking.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightGrid {
    size: usize,
    data: Vec<f32>,
}

impl HeightGrid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            data: vec![0f32; size * size],
        }
    }

    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut data = Vec::with_capacity(size * size);

        for row in 0..size {
            for col in 0..size {
                data.push(f(row, col));
            }
        }

        Self { size, data }
    }

    /// Number of samples along each axis.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn values(&self) -> &[f32] {
        &self.data
    }

    pub fn values_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// The flat index of `(row, col)`, or `None` when it lies off the grid.
    pub fn index_of(&self, row: i64, col: i64) -> Option<usize> {
        let size = self.size as i64;

        if row < 0 || col < 0 || row >= size || col >= size {
            return None;
        }

        Some(row as usize * self.size + col as usize)
    }

    pub fn get(&self, row: i64, col: i64) -> Option<f32> {
        self.index_of(row, col).map(|i| self.data[i])
    }

    pub fn get_mut(&mut self, row: i64, col: i64) -> Option<&mut f32> {
        self.index_of(row, col).map(move |i| &mut self.data[i])
    }

    /// Total elevation of the grid, accumulated in double precision.
    pub fn sum(&self) -> f64 {
        self.data.iter().map(|h| *h as f64).sum()
    }

    pub fn minmax(&self) -> Option<(f32, f32)> {
        minmax(&self.data)
    }

    /// Linearly rescale the samples so they span \[out_min, out_max\].
    pub fn normalize(&mut self, out_min: f32, out_max: f32) {
        normalize_range(&mut self.data, out_min, out_max);
    }

    /// Copy of the grid with [leading] samples removed from the start and [trailing] samples
    /// removed from the end of each axis.
    pub fn crop(&self, leading: usize, trailing: usize) -> HeightGrid {
        let size = self.size.saturating_sub(leading + trailing);

        HeightGrid::from_fn(size, |row, col| self[(row + leading, col + leading)])
    }
}

impl Index<(usize, usize)> for HeightGrid {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        assert!(row < self.size && col < self.size);
        &self.data[row * self.size + col]
    }
}

impl IndexMut<(usize, usize)> for HeightGrid {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        assert!(row < self.size && col < self.size);
        &mut self.data[row * self.size + col]
    }
}
