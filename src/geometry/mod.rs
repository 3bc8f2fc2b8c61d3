//! Vector geometry: two random directions, their parallelogram, and their cross product.
//!
//! This module is renderer-agnostic and has no side effects besides drawing from the
//! RNG it is handed. The output is a single immutable `GeometrySnapshot`; recomputing
//! means calling `generate` again and replacing the old value.
//!
//! Layout of the parallelogram (all relative to the object origin):
//! ```text
//!        b ---------- sum
//!       /            /
//!      /            /
//!  origin -------- a
//! ```
//! `sum_to_a` and `sum_to_b` are the two edges closing the parallelogram from `sum`.

pub mod vector;

use std::fmt;

use rand::Rng;

pub use glam::Vec3 as Vector3;
pub use vector::{angle_between, cross, sample_vector, scaled_direction};

/// Names the base vector an error refers to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VectorName {
    A,
    B,
}

impl fmt::Display for VectorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorName::A => f.write_str("vector_a"),
            VectorName::B => f.write_str("vector_b"),
        }
    }
}

/// Errors produced while generating a snapshot.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The raw sample had zero (or non-finite) length and has no direction.
    #[error("{which} sampled as a zero-length vector and cannot be normalized")]
    DegenerateVector { which: VectorName },

    #[error("range must be finite and non-negative, got {0}")]
    InvalidRange(f32),

    #[error("scale must be finite with magnitude at most {max:e}, got {0}", max = MAX_SCALE)]
    InvalidScale(f32),
}

/// Largest accepted `|scale|`. The cross product grows with `scale²` and must stay
/// finite in `f32`.
pub const MAX_SCALE: f32 = 1.0e19;

/// Check `range` and `scale` against the domain `generate` accepts.
///
/// `range` may be any finite value `>= 0`. `scale` may have either sign but its
/// magnitude is capped at `MAX_SCALE`.
pub fn validate_inputs(range: f32, scale: f32) -> Result<(), GeometryError> {
    if !range.is_finite() || range < 0.0 {
        return Err(GeometryError::InvalidRange(range));
    }
    if !scale.is_finite() || scale.abs() > MAX_SCALE {
        return Err(GeometryError::InvalidScale(scale));
    }
    Ok(())
}

/// Immutable bundle of the two base vectors and everything derived from them.
///
/// Invariants (hold for every constructed value):
/// - `cross == vector::cross(vector_a, vector_b)`
/// - `sum + sum_to_a == vector_a`, `sum + sum_to_b == vector_b` (up to add/sub rounding)
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeometrySnapshot {
    vector_a: Vector3,
    vector_b: Vector3,
    sum: Vector3,
    sum_to_a: Vector3,
    sum_to_b: Vector3,
    cross: Vector3,
}

impl GeometrySnapshot {
    /// Derive a snapshot from caller-chosen base vectors.
    pub fn from_vectors(vector_a: Vector3, vector_b: Vector3) -> Self {
        let sum = vector_a + vector_b;
        Self {
            vector_a,
            vector_b,
            sum,
            sum_to_a: vector_a - sum,
            sum_to_b: vector_b - sum,
            cross: cross(vector_a, vector_b),
        }
    }

    #[inline]
    pub fn vector_a(&self) -> Vector3 {
        self.vector_a
    }

    #[inline]
    pub fn vector_b(&self) -> Vector3 {
        self.vector_b
    }

    /// `vector_a + vector_b`, the far corner of the parallelogram.
    #[inline]
    pub fn sum(&self) -> Vector3 {
        self.sum
    }

    /// Edge from `sum` back to `vector_a` (equal to `-vector_b`).
    #[inline]
    pub fn sum_to_a(&self) -> Vector3 {
        self.sum_to_a
    }

    /// Edge from `sum` back to `vector_b` (equal to `-vector_a`).
    #[inline]
    pub fn sum_to_b(&self) -> Vector3 {
        self.sum_to_b
    }

    #[inline]
    pub fn cross(&self) -> Vector3 {
        self.cross
    }

    /// Angle between the base vectors in radians.
    #[inline]
    pub fn angle(&self) -> f32 {
        angle_between(self.vector_a, self.vector_b)
    }

    /// Area of the parallelogram, i.e. `|cross|`.
    ///
    /// Computed on the max-component-scaled vector so it stays finite whenever `cross`
    /// is finite.
    pub fn area(&self) -> f32 {
        let m = self.cross.abs().max_element();
        if m == 0.0 || !m.is_finite() {
            return self.cross.length();
        }
        (self.cross / m).length() * m
    }

    /// Snapshot with the base vectors swapped. Its cross product is negated.
    pub fn swapped(&self) -> Self {
        Self::from_vectors(self.vector_b, self.vector_a)
    }
}

/// Generate a snapshot from two random directions.
///
/// Each coordinate of each raw vector is uniform in `[-range, range]`; raw vectors are
/// normalized and multiplied by `scale`. Vector A is drawn before vector B.
///
/// Fails with `DegenerateVector` instead of substituting a fallback axis when a raw
/// sample has no direction (always the case for `range == 0`).
pub fn generate<R: Rng + ?Sized>(
    range: f32,
    scale: f32,
    rng: &mut R,
) -> Result<GeometrySnapshot, GeometryError> {
    validate_inputs(range, scale)?;

    let raw_a = sample_vector(range, rng);
    let raw_b = sample_vector(range, rng);

    let vector_a = scaled_direction(raw_a, scale)
        .ok_or(GeometryError::DegenerateVector { which: VectorName::A })?;
    let vector_b = scaled_direction(raw_b, scale)
        .ok_or(GeometryError::DegenerateVector { which: VectorName::B })?;

    let snapshot = GeometrySnapshot::from_vectors(vector_a, vector_b);
    log::debug!(
        "geometry: a={:?} b={:?} cross={:?} angle={:.3}rad",
        snapshot.vector_a,
        snapshot.vector_b,
        snapshot.cross,
        snapshot.angle()
    );
    Ok(snapshot)
}
