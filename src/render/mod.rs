mod frame;
mod null_renderer;
mod palette;
mod primitives;

pub use frame::{BarFrame, FrameSnapshot};
pub use null_renderer::NullRenderer;
pub use palette::{DEFAULT_SERIES_COLORS, OrdinalPalette};
pub use primitives::Color;

use crate::error::ChartResult;

/// Contract implemented by any rendering adapter.
///
/// Adapters receive a fully materialized `FrameSnapshot` so painting code
/// stays isolated from layout and transition logic.
pub trait Renderer {
    fn render(&mut self, frame: &FrameSnapshot) -> ChartResult<()>;
}
