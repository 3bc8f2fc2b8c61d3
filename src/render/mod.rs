//! Rendering host.
//!
//! Owns the window/event-loop integration and the GPU renderers. Geometry is never
//! computed here: the host receives a `GeometrySnapshot`, turns it into scene data via
//! `crate::scene`, and draws it every frame.
//!
//! Entrypoint: `render::app::run(...)`.

pub mod app;

/// Common GPU types used across render submodules.
pub mod gpu;

/// Shared uniform-buffer pipeline setup.
pub mod pipeline;

/// Vertex/uniform types and buffer upload helpers.
pub mod primitives;

/// Frame timing.
pub mod util;

/// Lit parallelogram renderer.
pub mod quad_renderer;

/// Debug ray renderer.
pub mod line_renderer;

/// The cross product viewer state.
pub mod viewer;
