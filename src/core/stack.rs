use indexmap::IndexMap;

use crate::core::data::NormalizedData;
use crate::core::types::StackedSegment;

/// Cumulative segments for stacked layout plus the maxima scales need.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StackedLayers {
    /// Series key to one segment per category, in declaration order.
    pub segments: IndexMap<String, Vec<StackedSegment>>,
    /// Running total per category after the last series.
    pub category_totals: Vec<f64>,
    pub max_stacked_value: f64,
    pub max_single_value: f64,
}

impl StackedLayers {
    #[must_use]
    pub fn segment(&self, category_index: usize, series_key: &str) -> Option<StackedSegment> {
        self.segments
            .get(series_key)
            .and_then(|segments| segments.get(category_index))
            .copied()
    }

    #[must_use]
    pub fn category_total(&self, category_index: usize) -> Option<f64> {
        self.category_totals.get(category_index).copied()
    }
}

/// Stacks series on top of each other in declaration order.
///
/// Input values are expected to be normalized (finite, non-negative); any
/// value that slips through negative is clamped to zero here as well.
/// Running totals saturate at `f64::MAX`.
#[must_use]
pub fn accumulate_stacks(data: &NormalizedData) -> StackedLayers {
    let category_count = data.category_count();
    let mut category_totals = vec![0.0_f64; category_count];
    let mut segments = IndexMap::with_capacity(data.series.len());
    let mut max_single_value = 0.0_f64;

    for series in &data.series {
        let mut series_segments = Vec::with_capacity(category_count);
        for (category_index, running_total) in category_totals.iter_mut().enumerate() {
            let value = series
                .values
                .get(category_index)
                .copied()
                .filter(|value| value.is_finite())
                .unwrap_or(0.0)
                .max(0.0);
            let y0 = *running_total;
            let y1 = (y0 + value).min(f64::MAX);
            *running_total = y1;
            max_single_value = max_single_value.max(value);
            series_segments.push(StackedSegment { y0, y1 });
        }
        segments.insert(series.key.clone(), series_segments);
    }

    let max_stacked_value = category_totals.iter().copied().fold(0.0_f64, f64::max);
    StackedLayers {
        segments,
        category_totals,
        max_stacked_value,
        max_single_value,
    }
}
