use nannou::glam::Vec2;

use crate::config::{ErosionParams, RainConfig};
use crate::erosion::gradient_at;
use crate::erosion::kernel::{RadiusKernel, Scatter};
use crate::grid::HeightGrid;
use crate::util::round_index;

/// A single water droplet walking downhill across the grid.
///
/// Positions and velocities are `(column, row)` vectors in grid units. The droplet's cell is its
/// position rounded to the nearest sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Droplet {
    pub position: Vec2,
    pub velocity: Vec2,
    pub speed: f32,
    pub water: f32,
    pub sediment: f32,
}

/// Why a droplet stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Death {
    /// The next cell was off the grid.
    OffMap,
    /// The water ran at or below the cutoff.
    Evaporated,
    /// The velocity cancelled out, leaving no direction to move in.
    Stalled,
    /// The droplet survived every step it was allowed.
    StepCap,
}

/// What a single step did to the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Sediment was picked up and [amount] was scattered around the previous cell.
    Eroded { amount: f32, scatter: Scatter },
    /// Excess sediment was dropped on the previous cell.
    Deposited { amount: f32 },
    Died(Death),
}

impl Droplet {
    pub fn spawn(position: Vec2, rain: &RainConfig) -> Self {
        let velocity = Vec2::from(rain.initial_velocity);

        Self {
            position,
            velocity,
            speed: velocity.length(),
            water: rain.initial_water,
            sediment: 0.0,
        }
    }

    /// The `(row, col)` of the sample nearest the droplet.
    pub fn cell(&self) -> (i64, i64) {
        cell_of(self.position)
    }

    /// Advance the droplet by one cell-length, eroding or depositing on the cell it leaves.
    ///
    /// A step that kills the droplet leaves the grid untouched.
    pub fn step(
        &mut self,
        grid: &mut HeightGrid,
        kernel: &RadiusKernel,
        params: &ErosionParams,
        evaporation: f32,
    ) -> Step {
        let (row, col) = self.cell();

        let Some(gradient) = gradient_at(grid, row, col) else {
            return Step::Died(Death::OffMap);
        };

        let momentum = params.momentum;
        self.velocity = self.velocity * momentum - gradient * (1.0 - momentum);

        let norm = self.velocity.length();

        if norm == 0.0 || !norm.is_finite() {
            return Step::Died(Death::Stalled);
        }

        let next = self.position + self.velocity / norm;
        let (next_row, next_col) = cell_of(next);

        let (Some(height), Some(next_height)) =
            (grid.get(row, col), grid.get(next_row, next_col))
        else {
            return Step::Died(Death::OffMap);
        };

        if self.water <= params.water_cutoff {
            return Step::Died(Death::Evaporated);
        }

        let dh = next_height - height;
        let capacity = params.min_slope_capacity.max(-dh)
            * self.speed
            * self.water
            * params.capacity_multiplier;

        let step = if self.sediment > capacity {
            let amount = (self.sediment - capacity) * params.deposition_rate;

            self.sediment -= amount;
            self.speed = 0.0;

            if let Some(h) = grid.get_mut(row, col) {
                *h += amount;
            }

            Step::Deposited { amount }
        } else {
            // Uphill this goes negative and the kernel fills instead.
            let amount = ((capacity - self.sediment) * params.erosion_rate).min(-dh);

            self.sediment += amount;
            self.speed = (self.speed * self.speed - dh * params.gravity).abs().sqrt();

            let scatter = kernel.scatter(grid, row, col, amount);

            Step::Eroded { amount, scatter }
        };

        self.water -= evaporation;
        self.position = next;

        step
    }
}

fn cell_of(p: Vec2) -> (i64, i64) {
    (round_index(p.y), round_index(p.x))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rain() -> RainConfig {
        RainConfig {
            drops: 1,
            move_cap: 10,
            initial_water: 1.0,
            initial_velocity: [0.0, 0.0],
            seed: 0,
        }
    }

    /// Heights fall by [drop] per column, so droplets run towards increasing columns.
    fn ramp(size: usize, drop: f32) -> HeightGrid {
        HeightGrid::from_fn(size, |_, c| 100.0 - drop * c as f32)
    }

    #[test]
    fn flat_ground_stalls_without_writing() {
        let mut grid = HeightGrid::from_fn(8, |_, _| 10.0);
        let before = grid.clone();
        let mut droplet = Droplet::spawn(Vec2::new(3.0, 3.0), &rain());

        let step = droplet.step(
            &mut grid,
            &RadiusKernel::new(2),
            &ErosionParams::default(),
            0.1,
        );

        assert_eq!(step, Step::Died(Death::Stalled));
        assert_eq!(grid, before);
    }

    #[test]
    fn moves_one_cell_downhill() {
        let mut grid = ramp(16, 1.0);
        let mut droplet = Droplet::spawn(Vec2::new(4.0, 8.0), &rain());
        let params = ErosionParams::default();

        let step = droplet.step(&mut grid, &RadiusKernel::new(2), &params, 0.1);

        // Zero initial speed means zero capacity, so the first step erodes nothing.
        assert_eq!(
            step,
            Step::Eroded {
                amount: 0.0,
                scatter: Scatter::default()
            }
        );
        assert_eq!(droplet.cell(), (8, 5));
        assert!((droplet.water - 0.9).abs() < 1e-6);
        assert!((droplet.speed - params.gravity.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn erosion_is_capped_by_height_drop() {
        let mut grid = ramp(16, 0.5);
        let mut droplet = Droplet::spawn(Vec2::new(4.0, 8.0), &rain());
        droplet.speed = 10.0;

        let params = ErosionParams::default();
        let kernel = RadiusKernel::new(2);
        let before = grid.sum();

        let Step::Eroded { amount, scatter } = droplet.step(&mut grid, &kernel, &params, 0.1)
        else {
            panic!("expected erosion");
        };

        assert_eq!(amount, 0.5);
        assert_eq!(droplet.sediment, 0.5);
        assert_eq!(scatter.lost, 0.0);
        assert!((before - grid.sum() - 0.5 * kernel.total_weight() as f64).abs() < 1e-3);
    }

    #[test]
    fn overloaded_droplet_deposits_on_its_cell() {
        let mut grid = ramp(16, 1.0);
        let mut droplet = Droplet::spawn(Vec2::new(4.0, 8.0), &rain());
        droplet.speed = 1.0;
        droplet.sediment = 100.0;

        let params = ErosionParams::default();
        let before = grid.clone();

        let step = droplet.step(&mut grid, &RadiusKernel::new(2), &params, 0.1);

        // capacity = 1 (slope) * 1 (speed) * 1 (water) * 10
        let amount = (100.0 - 10.0) * params.deposition_rate;

        assert_eq!(step, Step::Deposited { amount });
        assert_eq!(droplet.speed, 0.0);
        assert_eq!(droplet.sediment, 100.0 - amount);
        assert_eq!(grid[(8, 4)], before[(8, 4)] + amount);

        let changed = grid
            .values()
            .iter()
            .zip(before.values())
            .filter(|(a, b)| a != b)
            .count();
        assert_eq!(changed, 1);
    }

    #[test]
    fn walking_off_the_edge_kills() {
        let mut grid = ramp(8, 1.0);
        let mut droplet = Droplet::spawn(Vec2::new(7.0, 3.0), &rain());

        let step = droplet.step(
            &mut grid,
            &RadiusKernel::new(2),
            &ErosionParams::default(),
            0.1,
        );

        assert_eq!(step, Step::Died(Death::OffMap));
        assert_eq!(droplet.position, Vec2::new(7.0, 3.0));
    }

    #[test]
    fn dry_droplet_evaporates() {
        let mut grid = ramp(8, 1.0);
        let mut droplet = Droplet::spawn(Vec2::new(2.0, 3.0), &rain());
        droplet.water = 0.001;

        let step = droplet.step(
            &mut grid,
            &RadiusKernel::new(2),
            &ErosionParams::default(),
            0.1,
        );

        assert_eq!(step, Step::Died(Death::Evaporated));
    }
}
