use serde::{Deserialize, Serialize};

/// Container size in caller pixel units.
///
/// Zero-sized containers are valid and produce all-zero geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Replaces negative or non-finite extents with zero.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let clean = |value: f64| if value.is_finite() { value.max(0.0) } else { 0.0 };
        Self {
            width: clean(self.width),
            height: clean(self.height),
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Space reserved around the plot area for axes and labels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlotMargins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl PlotMargins {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Returns the plot area size left inside `viewport`, never negative.
    #[must_use]
    pub fn inner_size(self, viewport: Viewport) -> (f64, f64) {
        let width = (viewport.width - self.left - self.right).max(0.0);
        let height = (viewport.height - self.top - self.bottom).max(0.0);
        (width, height)
    }
}

/// One discrete position along the horizontal axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub index: usize,
    pub label: String,
}

/// One named sequence of values aligned positionally with the categories.
///
/// `None` marks a missing value, which is laid out as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub key: String,
    pub values: Vec<Option<f64>>,
}

impl Series {
    #[must_use]
    pub fn new(key: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            key: key.into(),
            values: values.into_iter().map(Some).collect(),
        }
    }

    #[must_use]
    pub fn with_gaps(key: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            key: key.into(),
            values,
        }
    }
}

/// Categories plus series as supplied by the host for one update cycle.
///
/// Serializes as `{ "categories": [label], "series": [{ "key", "values" }] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ChartDataInput", into = "ChartDataInput")]
pub struct ChartData {
    categories: Vec<Category>,
    series: Vec<Series>,
}

impl ChartData {
    #[must_use]
    pub fn new<L>(categories: impl IntoIterator<Item = L>, series: Vec<Series>) -> Self
    where
        L: Into<String>,
    {
        let categories = categories
            .into_iter()
            .enumerate()
            .map(|(index, label)| Category {
                index,
                label: label.into(),
            })
            .collect();
        Self { categories, series }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            categories: Vec::new(),
            series: Vec::new(),
        }
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    #[must_use]
    pub fn series_keys(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|series| series.key.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChartDataInput {
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    series: Vec<Series>,
}

impl From<ChartDataInput> for ChartData {
    fn from(input: ChartDataInput) -> Self {
        Self::new(input.categories, input.series)
    }
}

impl From<ChartData> for ChartDataInput {
    fn from(data: ChartData) -> Self {
        Self {
            categories: data
                .categories
                .into_iter()
                .map(|category| category.label)
                .collect(),
            series: data.series,
        }
    }
}

/// Cumulative value interval one series occupies within a category.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StackedSegment {
    pub y0: f64,
    pub y1: f64,
}

impl StackedSegment {
    #[must_use]
    pub fn value(self) -> f64 {
        self.y1 - self.y0
    }
}

/// Axis-aligned bar rectangle in container pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BarGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BarGeometry {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Component-wise interpolation; `progress` is the eased fraction.
    #[must_use]
    pub fn lerp(self, target: Self, progress: f64) -> Self {
        let mix = |from: f64, to: f64| from + (to - from) * progress;
        Self {
            x: mix(self.x, target.x),
            y: mix(self.y, target.y),
            width: mix(self.width, target.width),
            height: mix(self.height, target.height),
        }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }
}

/// Stable identity of one bar across updates and mode switches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BarId {
    pub category_index: usize,
    pub series_key: String,
}

impl BarId {
    #[must_use]
    pub fn new(category_index: usize, series_key: impl Into<String>) -> Self {
        Self {
            category_index,
            series_key: series_key.into(),
        }
    }
}

/// Layout selected by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    #[default]
    Stacked,
    Grouped,
}

impl ChartMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Stacked => Self::Grouped,
            Self::Grouped => Self::Stacked,
        }
    }
}
