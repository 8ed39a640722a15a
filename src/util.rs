use itertools::{Itertools, MinMaxResult};

pub mod blur;
pub use blur::*;

/// Returns the min and max values of an f32 slice.
pub fn minmax(arr: &[f32]) -> Option<(f32, f32)> {
    match arr.iter().copied().minmax() {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(e) => Some((e, e)),
        MinMaxResult::MinMax(min, max) => Some((min, max)),
    }
}

/// Normalize a slice of f32 into the range \[out_min, out_max\] using the min and max elements.
///
/// A constant slice has no range to stretch, so every element becomes [out_min].
pub fn normalize_range(arr: &mut [f32], out_min: f32, out_max: f32) {
    let Some((min, max)) = minmax(arr) else {
        return;
    };

    let span = max - min;

    for e in arr.iter_mut() {
        *e = if span > 0.0 {
            out_min + (out_max - out_min) * (*e - min) / span
        } else {
            out_min
        };
    }
}

/// Quintic smoothstep, `6t^5 - 15t^4 + 10t^3`.
pub fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Round to the nearest integer, with ties going to the even neighbour.
pub fn round_index(v: f32) -> i64 {
    v.round_ties_even() as i64
}
