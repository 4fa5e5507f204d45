use serde::{Deserialize, Serialize};

use crate::core::{AxisTick, BarGeometry, ChartMode, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// One bar as seen by a renderer for a single frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarFrame {
    pub category_index: usize,
    pub category_label: String,
    pub series_key: String,
    pub geometry: BarGeometry,
    pub color: Color,
}

/// Backend-agnostic, read-only state of the chart at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub viewport: Viewport,
    pub mode: ChartMode,
    pub time_ms: f64,
    pub animating: bool,
    pub bars: Vec<BarFrame>,
    pub ticks: Vec<AxisTick>,
}

impl FrameSnapshot {
    #[must_use]
    pub fn new(viewport: Viewport, mode: ChartMode, time_ms: f64) -> Self {
        Self {
            viewport,
            mode,
            time_ms,
            animating: false,
            bars: Vec::new(),
            ticks: Vec::new(),
        }
    }

    #[must_use]
    pub fn bar(&self, category_index: usize, series_key: &str) -> Option<&BarFrame> {
        self.bars
            .iter()
            .find(|bar| bar.category_index == category_index && bar.series_key == series_key)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for bar in &self.bars {
            if !bar.geometry.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "bar `{}`/{} has non-finite geometry",
                    bar.series_key, bar.category_index
                )));
            }
            if bar.geometry.width < 0.0 || bar.geometry.height < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "bar `{}`/{} has negative extent",
                    bar.series_key, bar.category_index
                )));
            }
            bar.color.validate()?;
        }
        for tick in &self.ticks {
            if !tick.value.is_finite() || !tick.position_y.is_finite() {
                return Err(ChartError::InvalidData(
                    "axis tick must be finite".to_owned(),
                ));
            }
        }

        Ok(())
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}
