//! `crossview` library crate root.
//!
//! Generates two random 3D directions, the parallelogram they span and their cross
//! product (`geometry`), and shows them in a wgpu viewport (`render`).
//!
//! The geometry side is pure and takes its RNG as an argument:
//! ```
//! use rand::SeedableRng;
//! let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(7);
//! let snapshot = crossview::generate(1.0, 5.0, &mut rng).unwrap();
//! assert!(snapshot.cross().dot(snapshot.vector_a()).abs() < 1e-3);
//! ```
//!
//! The binary target stays thin and calls `run_app`.

pub mod config;
pub mod geometry;
pub mod render;
pub mod scene;

pub use config::GeometryConfig;
pub use geometry::{GeometryError, GeometrySnapshot, Vector3, generate};

/// Run the viewer with the default window configuration.
///
/// Note: This function does **not** initialize logging; callers can decide their own
/// logging setup.
pub fn run_app(geometry: GeometryConfig) -> anyhow::Result<()> {
    render::app::run(geometry)
}
