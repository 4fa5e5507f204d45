use crate::error::ChartResult;
use crate::render::{BarFrame, FrameSnapshot, Renderer};

use super::{ChartController, FrameClock};

impl<C: FrameClock> ChartController<C> {
    /// Materializes every current bar plus axis ticks at `now_ms`.
    ///
    /// Bars are listed series by series in declaration order, categories
    /// ascending inside each series (stacking draw order).
    #[must_use]
    pub fn snapshot(&self, now_ms: f64) -> FrameSnapshot {
        let mut frame = FrameSnapshot::new(self.viewport, self.mode, now_ms);
        frame.animating = self.animator.is_animating(now_ms);
        frame.ticks = self.ticks();
        frame
            .bars
            .reserve(self.data.series.len() * self.data.category_count());

        for series in &self.data.series {
            let color = self.palette.color(&series.key);
            for category in &self.data.categories {
                let Some(geometry) = self.animator.geometry(category.index, &series.key, now_ms)
                else {
                    continue;
                };
                frame.bars.push(BarFrame {
                    category_index: category.index,
                    category_label: category.label.clone(),
                    series_key: series.key.clone(),
                    geometry,
                    color,
                });
            }
        }

        frame
    }

    /// Hands the snapshot at `now_ms` to `renderer`.
    pub fn render<R: Renderer>(&self, renderer: &mut R, now_ms: f64) -> ChartResult<()> {
        renderer.render(&self.snapshot(now_ms))
    }

    /// Snapshot at `now_ms` as pretty JSON, for debugging and fixtures.
    pub fn snapshot_json(&self, now_ms: f64) -> ChartResult<String> {
        self.snapshot(now_ms).to_json_pretty()
    }
}
