use serde::{Deserialize, Serialize};

use crate::animation::{Easing, TransitionConfig};
use crate::core::scale::{DEFAULT_CATEGORY_PADDING, DEFAULT_HEADROOM_RATIO, DEFAULT_SERIES_PADDING};
use crate::core::{ChartMode, PlotMargins, ScaleTuning, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Default number of value-axis sections (ticks are sections + 1).
pub const DEFAULT_TICK_SECTIONS: usize = 4;

/// Public controller bootstrap configuration.
///
/// This type is serializable so host applications can keep chart setup in
/// their own settings files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartControllerConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub mode: ChartMode,
    #[serde(default)]
    pub margins: PlotMargins,
    #[serde(default = "default_category_padding")]
    pub category_padding: f64,
    #[serde(default = "default_series_padding")]
    pub series_padding: f64,
    #[serde(default = "default_headroom_ratio")]
    pub headroom_ratio: f64,
    #[serde(default = "default_tick_sections")]
    pub tick_sections: usize,
    #[serde(default)]
    pub transition: TransitionConfig,
    /// Series colors in slot order; empty selects the built-in scheme.
    #[serde(default)]
    pub palette: Vec<Color>,
}

impl ChartControllerConfig {
    /// Creates a config with default paddings, transition and palette.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            mode: ChartMode::default(),
            margins: PlotMargins::default(),
            category_padding: default_category_padding(),
            series_padding: default_series_padding(),
            headroom_ratio: default_headroom_ratio(),
            tick_sections: default_tick_sections(),
            transition: TransitionConfig::default(),
            palette: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: ChartMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_margins(mut self, margins: PlotMargins) -> Self {
        self.margins = margins;
        self
    }

    /// Sets category and grouped-series band padding fractions.
    #[must_use]
    pub fn with_padding(mut self, category_padding: f64, series_padding: f64) -> Self {
        self.category_padding = category_padding;
        self.series_padding = series_padding;
        self
    }

    #[must_use]
    pub fn with_headroom_ratio(mut self, headroom_ratio: f64) -> Self {
        self.headroom_ratio = headroom_ratio;
        self
    }

    #[must_use]
    pub fn with_tick_sections(mut self, tick_sections: usize) -> Self {
        self.tick_sections = tick_sections;
        self
    }

    #[must_use]
    pub fn with_transition(mut self, duration_ms: f64, easing: Easing) -> Self {
        self.transition = TransitionConfig {
            duration_ms,
            easing,
        };
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn scale_tuning(&self) -> ScaleTuning {
        ScaleTuning {
            category_padding: self.category_padding,
            series_padding: self.series_padding,
            headroom_ratio: self.headroom_ratio,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        for (name, value) in [
            ("margins.top", self.margins.top),
            ("margins.right", self.margins.right),
            ("margins.bottom", self.margins.bottom),
            ("margins.left", self.margins.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "`{name}` must be finite and >= 0"
                )));
            }
        }
        for (name, value) in [
            ("category_padding", self.category_padding),
            ("series_padding", self.series_padding),
        ] {
            if !value.is_finite() || !(0.0..1.0).contains(&value) {
                return Err(ChartError::InvalidConfig(format!(
                    "`{name}` must be finite and in [0, 1)"
                )));
            }
        }
        if !self.headroom_ratio.is_finite() || self.headroom_ratio < 1.0 {
            return Err(ChartError::InvalidConfig(
                "`headroom_ratio` must be finite and >= 1".to_owned(),
            ));
        }
        if self.tick_sections == 0 {
            return Err(ChartError::InvalidConfig(
                "`tick_sections` must be > 0".to_owned(),
            ));
        }
        if !self.transition.duration_ms.is_finite() || self.transition.duration_ms < 0.0 {
            return Err(ChartError::InvalidConfig(
                "transition duration must be finite and >= 0".to_owned(),
            ));
        }
        for color in &self.palette {
            color.validate()?;
        }
        Ok(())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_category_padding() -> f64 {
    DEFAULT_CATEGORY_PADDING
}

fn default_series_padding() -> f64 {
    DEFAULT_SERIES_PADDING
}

fn default_headroom_ratio() -> f64 {
    DEFAULT_HEADROOM_RATIO
}

fn default_tick_sections() -> usize {
    DEFAULT_TICK_SECTIONS
}
