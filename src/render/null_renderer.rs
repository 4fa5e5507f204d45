use crate::error::ChartResult;
use crate::render::{FrameSnapshot, Renderer};

/// No-op renderer used by tests and headless controller usage.
///
/// It still validates snapshots so tests catch invalid geometry before a real
/// backend is attached.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_bar_count: usize,
    pub last_tick_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &FrameSnapshot) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_bar_count = frame.bars.len();
        self.last_tick_count = frame.ticks.len();
        Ok(())
    }
}
