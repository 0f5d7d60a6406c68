//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Floor a f64 and clamp it to the i32 range, returning 0 for NaN values.
#[must_use]
pub fn floor_f64_to_i32(value: f64) -> i32 {
    if value.is_nan() {
        return 0;
    }
    let min = cast::<i32, f64>(i32::MIN).unwrap_or(f64::MIN);
    let max = cast::<i32, f64>(i32::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).floor();
    cast::<f64, i32>(clamped).unwrap_or(0)
}

/// Floor a f64 into a slice index below `len`, returning 0 for non-finite values.
#[must_use]
pub fn floor_f64_to_index(value: f64, len: usize) -> usize {
    if !value.is_finite() || len == 0 {
        return 0;
    }
    let idx = cast::<f64, usize>(value.max(0.0).floor()).unwrap_or(0);
    idx.min(len - 1)
}
