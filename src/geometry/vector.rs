//! Vector helpers behind `GeometrySnapshot`.
//!
//! Everything here is pure arithmetic over `glam::Vec3` except `sample_vector`, which
//! draws from a caller-supplied RNG. No process-wide random state is touched.

use glam::Vec3;
use rand::Rng;

/// Cross product `a × b` via the determinant expansion.
///
/// Result is perpendicular to both inputs, has length `|a||b| sin θ`, and follows the
/// right-hand rule (x × y = z).
#[inline]
pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    Vec3::new(
        a.y * b.z - a.z * b.y,
        a.z * b.x - a.x * b.z,
        a.x * b.y - a.y * b.x,
    )
}

/// Sample a raw vector with every coordinate uniform in `[-range, range]`.
///
/// Draw order is x, y, z. `range` must be finite and non-negative; callers validate it
/// (see `validate_inputs`). With `range == 0` the result is the zero vector.
///
/// Coordinates are drawn from `[-1, 1]` and multiplied by `range`, so the width of the
/// interval never overflows even for `range == f32::MAX`.
pub fn sample_vector<R: Rng + ?Sized>(range: f32, rng: &mut R) -> Vec3 {
    let x = rng.gen_range(-1.0f32..=1.0);
    let y = rng.gen_range(-1.0f32..=1.0);
    let z = rng.gen_range(-1.0f32..=1.0);
    Vec3::new(x, y, z) * range
}

/// Normalize `raw` and multiply by `scale`.
///
/// Returns `None` if `raw` is the zero vector or has a non-finite component.
///
/// `raw` is first divided by its largest absolute component, so the squared length
/// can neither underflow for tiny inputs nor overflow for huge ones.
#[inline]
pub fn scaled_direction(raw: Vec3, scale: f32) -> Option<Vec3> {
    let m = raw.abs().max_element();
    if m == 0.0 || !m.is_finite() {
        return None;
    }
    (raw / m).try_normalize().map(|dir| dir * scale)
}

/// Angle between two vectors in radians, in `[0, π]`.
///
/// Zero-length inputs yield `0.0`.
#[inline]
pub fn angle_between(a: Vec3, b: Vec3) -> f32 {
    let denom = a.length() * b.length();
    if denom == 0.0 {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos()
}
