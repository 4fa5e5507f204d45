use serde::{Deserialize, Serialize};

/// Default padding fraction between category bands.
pub const DEFAULT_CATEGORY_PADDING: f64 = 0.18;
/// Default padding fraction between series sub-bands in grouped mode.
pub const DEFAULT_SERIES_PADDING: f64 = 0.08;
/// Default multiplicative headroom above the tallest bar.
pub const DEFAULT_HEADROOM_RATIO: f64 = 1.05;

/// Maps discrete ordinal positions to contiguous, evenly spaced bands.
///
/// Bands are centered inside the range. `padding_inner` is the fraction of one
/// step left empty between adjacent bands; `padding_outer` is the space before
/// the first and after the last band, in steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    count: usize,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    #[must_use]
    pub fn new(count: usize, range: (f64, f64), padding_inner: f64, padding_outer: f64) -> Self {
        let padding_inner = sanitize_ratio(padding_inner, 0.0, 1.0);
        let padding_outer = if padding_outer.is_finite() {
            padding_outer.max(0.0)
        } else {
            0.0
        };
        let (range_start, range_end) = range;
        let span = (range_end - range_start).max(0.0);
        if count == 0 || span <= 0.0 || !span.is_finite() {
            return Self {
                count,
                start: if range_start.is_finite() { range_start } else { 0.0 },
                step: 0.0,
                bandwidth: 0.0,
            };
        }

        let n = count as f64;
        let space = (n - padding_inner + 2.0 * padding_outer).max(1.0);
        let step = span / space;
        let start = range_start + (span - step * (n - padding_inner)) * 0.5;
        Self {
            count,
            start,
            step,
            bandwidth: step * (1.0 - padding_inner),
        }
    }

    /// Band scale with the same inner and outer padding.
    #[must_use]
    pub fn with_padding(count: usize, range: (f64, f64), padding: f64) -> Self {
        Self::new(count, range, padding, padding)
    }

    #[must_use]
    pub fn count(self) -> usize {
        self.count
    }

    #[must_use]
    pub fn bandwidth(self) -> f64 {
        self.bandwidth
    }

    #[must_use]
    pub fn step(self) -> f64 {
        self.step
    }

    /// Start of band `index`, `None` outside the domain.
    #[must_use]
    pub fn position(self, index: usize) -> Option<f64> {
        (index < self.count).then(|| self.start + self.step * index as f64)
    }
}

/// Linear, inverted mapping of `[0, y_max]` onto `[inner_height, 0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueScale {
    y_max: f64,
    inner_height: f64,
}

impl ValueScale {
    /// `y_max` is clamped to `[1, f64::MAX]`; NaN becomes one.
    #[must_use]
    pub fn new(y_max: f64, inner_height: f64) -> Self {
        let y_max = if y_max.is_nan() {
            1.0
        } else {
            y_max.clamp(1.0, f64::MAX)
        };
        let inner_height = if inner_height.is_finite() {
            inner_height.max(0.0)
        } else {
            0.0
        };
        Self { y_max, inner_height }
    }

    /// Builds the scale from data maxima, adding headroom and rounding up.
    #[must_use]
    pub fn from_maxima(
        max_stacked_value: f64,
        max_single_value: f64,
        headroom_ratio: f64,
        inner_height: f64,
    ) -> Self {
        Self::new(
            nice_y_max(max_stacked_value, max_single_value, headroom_ratio),
            inner_height,
        )
    }

    #[must_use]
    pub fn y_max(self) -> f64 {
        self.y_max
    }

    #[must_use]
    pub fn inner_height(self) -> f64 {
        self.inner_height
    }

    /// Values outside `[0, y_max]` map to the plot edges.
    #[must_use]
    pub fn value_to_pixel(self, value: f64) -> f64 {
        let fraction = (value / self.y_max).clamp(0.0, 1.0);
        let fraction = if fraction.is_nan() { 0.0 } else { fraction };
        self.inner_height - fraction * self.inner_height
    }

    #[must_use]
    pub fn pixel_to_value(self, pixel: f64) -> f64 {
        if self.inner_height <= 0.0 {
            return 0.0;
        }
        (self.inner_height - pixel) / self.inner_height * self.y_max
    }

    /// Reference values at each of `sections + 1` evenly spaced stops from 0 to `y_max`.
    #[must_use]
    pub fn ticks(self, sections: usize) -> Vec<AxisTick> {
        let sections = sections.max(1);
        (0..=sections)
            .map(|section| {
                let value = self.y_max * (section as f64 / sections as f64);
                AxisTick {
                    value,
                    position_y: self.value_to_pixel(value),
                }
            })
            .collect()
    }
}

/// Horizontal reference line for a value axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: f64,
    pub position_y: f64,
}

/// `ceil(max(stacked, single) * headroom)`, in `[1, f64::MAX]`.
///
/// Overflowing peaks saturate at `f64::MAX`; only NaN peaks fall back to one.
#[must_use]
pub fn nice_y_max(max_stacked_value: f64, max_single_value: f64, headroom_ratio: f64) -> f64 {
    let headroom_ratio = if headroom_ratio.is_finite() && headroom_ratio > 0.0 {
        headroom_ratio
    } else {
        DEFAULT_HEADROOM_RATIO
    };
    let peak = max_stacked_value.max(max_single_value);
    if peak.is_nan() {
        return 1.0;
    }
    (peak.max(0.0) * headroom_ratio).ceil().clamp(1.0, f64::MAX)
}

/// Padding and headroom inputs for scale computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleTuning {
    pub category_padding: f64,
    pub series_padding: f64,
    pub headroom_ratio: f64,
}

impl Default for ScaleTuning {
    fn default() -> Self {
        Self {
            category_padding: DEFAULT_CATEGORY_PADDING,
            series_padding: DEFAULT_SERIES_PADDING,
            headroom_ratio: DEFAULT_HEADROOM_RATIO,
        }
    }
}

/// Category, value and per-category series scales for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartScales {
    pub category: BandScale,
    pub value: ValueScale,
    pub series: BandScale,
    pub inner_width: f64,
    pub inner_height: f64,
}

impl ChartScales {
    /// Derives all scales from plot size and data maxima.
    ///
    /// Pure: equal inputs always give equal scales.
    #[must_use]
    pub fn compute(
        category_count: usize,
        series_count: usize,
        inner_width: f64,
        inner_height: f64,
        max_stacked_value: f64,
        max_single_value: f64,
        tuning: ScaleTuning,
    ) -> Self {
        let inner_width = if inner_width.is_finite() { inner_width.max(0.0) } else { 0.0 };
        let inner_height = if inner_height.is_finite() {
            inner_height.max(0.0)
        } else {
            0.0
        };
        let category = category_scale(category_count, inner_width, tuning.category_padding);
        let value = ValueScale::from_maxima(
            max_stacked_value,
            max_single_value,
            tuning.headroom_ratio,
            inner_height,
        );
        let series = series_inner_scale(series_count, category.bandwidth(), tuning.series_padding);
        Self {
            category,
            value,
            series,
            inner_width,
            inner_height,
        }
    }
}

#[must_use]
pub fn category_scale(category_count: usize, inner_width: f64, padding: f64) -> BandScale {
    BandScale::with_padding(category_count, (0.0, inner_width), padding)
}

/// Sub-bands inside one category band, used by grouped layout.
#[must_use]
pub fn series_inner_scale(series_count: usize, bandwidth: f64, padding: f64) -> BandScale {
    BandScale::with_padding(series_count, (0.0, bandwidth), padding)
}

fn sanitize_ratio(value: f64, min: f64, max: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        min
    }
}
