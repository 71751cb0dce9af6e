//! Approximate float comparison

/// Default tolerance for [`is_close`]
pub const DEFAULT_TOLERANCE: f32 = 0.0001;

/// Whether `a` and `b` agree within `tolerance`, relative to the larger
/// magnitude, with `tolerance` doubling as an absolute floor near zero.
///
/// Infinities are only close to themselves; NaN is close to nothing.
pub fn is_close(a: f32, b: f32, tolerance: f32) -> bool {
    if !a.is_finite() || !b.is_finite() {
        return a == b;
    }
    (a - b).abs() <= (tolerance * a.abs().max(b.abs())).max(tolerance)
}
