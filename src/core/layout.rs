use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::trace;

use crate::core::data::NormalizedData;
use crate::core::scale::{ChartScales, ScaleTuning};
use crate::core::stack::{StackedLayers, accumulate_stacks};
use crate::core::types::{BarGeometry, ChartMode, PlotMargins, Viewport};

/// Geometry for every bar of one layout, keyed by series then category index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutGrid {
    bars: IndexMap<String, Vec<BarGeometry>>,
}

impl LayoutGrid {
    #[must_use]
    pub fn get(&self, category_index: usize, series_key: &str) -> Option<BarGeometry> {
        self.bars
            .get(series_key)
            .and_then(|bars| bars.get(category_index))
            .copied()
    }

    /// Bars of one series ordered by category index.
    #[must_use]
    pub fn series(&self, series_key: &str) -> Option<&[BarGeometry]> {
        self.bars.get(series_key).map(Vec::as_slice)
    }

    /// Iterates `(category_index, series_key, geometry)` in series declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str, BarGeometry)> + '_ {
        self.bars.iter().flat_map(|(key, bars)| {
            bars.iter()
                .enumerate()
                .map(move |(category_index, geometry)| (category_index, key.as_str(), *geometry))
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Scales, stacks and both geometry grids for one data/size combination.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLayout {
    pub scales: ChartScales,
    pub stacks: StackedLayers,
    pub stacked: LayoutGrid,
    pub grouped: LayoutGrid,
    pub margins: PlotMargins,
}

impl ResolvedLayout {
    #[must_use]
    pub fn grid(&self, mode: ChartMode) -> &LayoutGrid {
        match mode {
            ChartMode::Stacked => &self.stacked,
            ChartMode::Grouped => &self.grouped,
        }
    }
}

/// Runs scale computation, stacking and grid resolution for `data`.
#[must_use]
pub fn resolve_layout(
    data: &NormalizedData,
    viewport: Viewport,
    margins: PlotMargins,
    tuning: ScaleTuning,
) -> ResolvedLayout {
    let stacks = accumulate_stacks(data);
    let (inner_width, inner_height) = margins.inner_size(viewport.sanitized());
    let scales = ChartScales::compute(
        data.category_count(),
        data.series.len(),
        inner_width,
        inner_height,
        stacks.max_stacked_value,
        stacks.max_single_value,
        tuning,
    );
    let (stacked, grouped) = resolve_grids(data, &stacks, scales, margins);
    trace!(
        categories = data.category_count(),
        series = data.series.len(),
        y_max = scales.value.y_max(),
        bandwidth = scales.category.bandwidth(),
        "resolved layout grids"
    );

    ResolvedLayout {
        scales,
        stacks,
        stacked,
        grouped,
        margins,
    }
}

/// Builds the stacked and grouped grids from precomputed scales and stacks.
#[must_use]
pub fn resolve_grids(
    data: &NormalizedData,
    stacks: &StackedLayers,
    scales: ChartScales,
    margins: PlotMargins,
) -> (LayoutGrid, LayoutGrid) {
    let category_count = data.category_count();
    let value_scale = scales.value;
    let origin_x = margins.left;
    let origin_y = margins.top;

    let series_offsets: SmallVec<[f64; 8]> = (0..data.series.len())
        .map(|series_index| scales.series.position(series_index).unwrap_or(0.0))
        .collect();

    let mut stacked = IndexMap::with_capacity(data.series.len());
    let mut grouped = IndexMap::with_capacity(data.series.len());

    for (series_index, series) in data.series.iter().enumerate() {
        let mut stacked_bars = Vec::with_capacity(category_count);
        let mut grouped_bars = Vec::with_capacity(category_count);

        for category_index in 0..category_count {
            let band_x = scales.category.position(category_index).unwrap_or(0.0);

            let segment = stacks
                .segment(category_index, &series.key)
                .unwrap_or_default();
            let top = value_scale.value_to_pixel(segment.y1);
            let bottom = value_scale.value_to_pixel(segment.y0);
            stacked_bars.push(BarGeometry::new(
                origin_x + band_x,
                origin_y + top,
                scales.category.bandwidth(),
                (bottom - top).max(0.0),
            ));

            let raw = series
                .values
                .get(category_index)
                .copied()
                .unwrap_or(0.0)
                .max(0.0);
            let raw_y = value_scale.value_to_pixel(raw);
            grouped_bars.push(BarGeometry::new(
                origin_x + band_x + series_offsets[series_index],
                origin_y + raw_y,
                scales.series.bandwidth(),
                (scales.inner_height - raw_y).max(0.0),
            ));
        }

        stacked.insert(series.key.clone(), stacked_bars);
        grouped.insert(series.key.clone(), grouped_bars);
    }

    (LayoutGrid { bars: stacked }, LayoutGrid { bars: grouped })
}
