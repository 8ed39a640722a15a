pub mod fractal;
pub use fractal::FractalComposer;

pub mod perlin;
pub use perlin::NoiseField;

/// Lower bound of a normalized noise layer.
pub const NOISE_MIN: f32 = 0.0;
/// Upper bound of a normalized noise layer.
pub const NOISE_MAX: f32 = 255.0;
