//! bar-morph: categorical bar-chart layout engine.
//!
//! The crate turns categories and series into two parallel geometry grids,
//! stacked and grouped, and morphs every bar between them (and across data
//! or size changes) with a coalescing per-bar transition state machine.
//! Painting is left to a [`render::Renderer`] adapter polling snapshots.

pub mod animation;
pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ChartController, ChartControllerConfig};
pub use error::{ChartError, ChartResult};
