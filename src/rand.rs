use nannou::glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use std::f32::consts::PI;

const PI2: f32 = PI * 2.0;

/// The RNG behind every random stream in the crate. ChaCha output is identical across
/// platforms, so a seed always reproduces the same terrain.
pub type TerrainRng = ChaCha8Rng;

pub fn seeded_rng(seed: u64) -> TerrainRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Returns a random angle in \[0, 2π).
pub fn random_angle(rand: &mut TerrainRng) -> f32 {
    rand.gen::<f32>() * PI2
}

/// Returns a random point in the square `[0, span)²`, as `(column, row)`. The row is drawn first.
pub fn random_point_in_square(rand: &mut TerrainRng, span: f32) -> Vec2 {
    let row = span * rand.gen::<f32>();
    let col = span * rand.gen::<f32>();
    Vec2::new(col, row)
}
