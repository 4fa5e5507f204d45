pub mod data;
pub mod layout;
pub mod scale;
pub mod stack;
pub mod types;

pub use data::{DataDiagnostic, NormalizedData, NormalizedSeries, normalize};
pub use layout::{LayoutGrid, ResolvedLayout, resolve_grids, resolve_layout};
pub use scale::{AxisTick, BandScale, ChartScales, ScaleTuning, ValueScale};
pub use stack::{StackedLayers, accumulate_stacks};
pub use types::{
    BarGeometry, BarId, Category, ChartData, ChartMode, PlotMargins, Series, StackedSegment,
    Viewport,
};
