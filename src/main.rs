//! Thin binary wrapper: logging setup plus the default viewer.
//!
//! Run:
//! - `RUST_LOG=info cargo run`
//!
//! Keys: `R` / `Space` regenerate, `Escape` quits.

use crossview::GeometryConfig;

fn main() -> anyhow::Result<()> {
    // Keep logging setup in the binary so the library remains unopinionated.
    env_logger::init();

    crossview::run_app(GeometryConfig::new(1.0))
}
