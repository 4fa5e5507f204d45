use tracing::{debug, trace, warn};

use crate::animation::{BarPhase, RetargetSummary, TransitionAnimator};
use crate::core::{
    AxisTick, BarGeometry, ChartData, ChartMode, ChartScales, DataDiagnostic, NormalizedData,
    ResolvedLayout, Viewport, normalize, resolve_layout,
};
use crate::error::ChartResult;
use crate::render::{Color, OrdinalPalette};

use super::{ChartControllerConfig, FrameClock, FrameScheduler, FrameSubscription, MonotonicClock};

/// Orchestration facade consumed by host views.
///
/// `ChartController` owns the normalized data, the resolved stacked and
/// grouped grids, and the per-bar transition state. Setters retarget the
/// animator; reads are pure functions of the stored state and a timestamp.
///
/// All calls are expected from one logical thread (the host UI thread).
pub struct ChartController<C: FrameClock = MonotonicClock> {
    pub(super) config: ChartControllerConfig,
    pub(super) clock: C,
    pub(super) viewport: Viewport,
    pub(super) mode: ChartMode,
    pub(super) data: NormalizedData,
    pub(super) layout: ResolvedLayout,
    pub(super) animator: TransitionAnimator,
    pub(super) palette: OrdinalPalette,
    pub(super) diagnostics: Vec<DataDiagnostic>,
    scheduler: Option<Box<dyn FrameScheduler>>,
    subscription: Option<FrameSubscription>,
    disposed: bool,
}

impl ChartController<MonotonicClock> {
    /// Creates a controller driven by the process monotonic clock.
    pub fn with_system_clock(config: ChartControllerConfig) -> ChartResult<Self> {
        Self::new(config, MonotonicClock::new())
    }
}

impl<C: FrameClock> ChartController<C> {
    pub fn new(config: ChartControllerConfig, clock: C) -> ChartResult<Self> {
        config.validate()?;

        let viewport = config.viewport;
        let data = NormalizedData::default();
        let layout = resolve_layout(&data, viewport, config.margins, config.scale_tuning());
        let animator = TransitionAnimator::new(config.transition);
        let palette = OrdinalPalette::new(config.palette.clone());

        Ok(Self {
            mode: config.mode,
            config,
            clock,
            viewport,
            data,
            layout,
            animator,
            palette,
            diagnostics: Vec::new(),
            scheduler: None,
            subscription: None,
            disposed: false,
        })
    }

    /// Installs the host's frame-callback hook.
    ///
    /// Any subscription held with a previous scheduler is cancelled first.
    pub fn attach_frame_scheduler(&mut self, scheduler: Box<dyn FrameScheduler>) {
        self.release_frames();
        self.scheduler = Some(scheduler);
        let now_ms = self.clock.now_ms();
        self.ensure_frames(now_ms);
    }

    /// Replaces chart data and morphs every bar towards the new layout.
    ///
    /// Shape problems never fail the update; they are repaired and reported
    /// through [`Self::diagnostics`] and `tracing` warnings.
    pub fn set_data(&mut self, data: ChartData) {
        if self.ignore_after_dispose("set_data") {
            return;
        }
        let (normalized, diagnostics) = normalize(&data);
        debug!(
            categories = normalized.category_count(),
            series = normalized.series.len(),
            diagnostics = diagnostics.len(),
            "set chart data"
        );
        self.palette
            .register(normalized.series.iter().map(|series| series.key.as_str()));
        self.data = normalized;
        self.diagnostics = diagnostics;
        self.recompute_layout();
        self.retarget();
    }

    /// Switches layout; both grids already exist so only a retarget runs.
    pub fn set_mode(&mut self, mode: ChartMode) {
        if self.ignore_after_dispose("set_mode") {
            return;
        }
        if mode == self.mode {
            trace!(?mode, "mode unchanged");
            return;
        }
        debug!(from = ?self.mode, to = ?mode, "set chart mode");
        self.mode = mode;
        self.retarget();
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.mode.toggled());
    }

    /// Resizes the container; negative or non-finite extents become zero.
    pub fn set_dimensions(&mut self, width: f64, height: f64) {
        if self.ignore_after_dispose("set_dimensions") {
            return;
        }
        let requested = Viewport::new(width, height);
        let viewport = requested.sanitized();
        if viewport != requested {
            warn!(width, height, "invalid chart dimensions clamped to zero");
        }
        if viewport == self.viewport {
            trace!(width, height, "dimensions unchanged");
            return;
        }
        debug!(
            width = viewport.width,
            height = viewport.height,
            "set chart dimensions"
        );
        self.viewport = viewport;
        self.recompute_layout();
        self.retarget();
    }

    /// Currently rendered geometry of one bar at `now_ms`.
    ///
    /// Returns `None` for identities absent from the current data, even when
    /// the animator still remembers them.
    #[must_use]
    pub fn geometry(
        &self,
        category_index: usize,
        series_key: &str,
        now_ms: f64,
    ) -> Option<BarGeometry> {
        if !self.contains_bar(category_index, series_key) {
            return None;
        }
        self.animator.geometry(category_index, series_key, now_ms)
    }

    /// Target geometry of one bar in the active mode.
    #[must_use]
    pub fn target_geometry(&self, category_index: usize, series_key: &str) -> Option<BarGeometry> {
        self.layout.grid(self.mode).get(category_index, series_key)
    }

    #[must_use]
    pub fn bar_phase(
        &self,
        category_index: usize,
        series_key: &str,
        now_ms: f64,
    ) -> Option<BarPhase> {
        if !self.contains_bar(category_index, series_key) {
            return None;
        }
        self.animator.phase(category_index, series_key, now_ms)
    }

    /// Current time on the controller's clock.
    ///
    /// Transitions are stamped with this clock, so hosts without their own
    /// frame timestamps should sample `geometry`/`snapshot` with it.
    #[must_use]
    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    #[must_use]
    pub fn is_animating(&self, now_ms: f64) -> bool {
        self.animator.is_animating(now_ms)
    }

    /// Frame-callback hook; returns whether more frames are needed.
    ///
    /// Settles finished transitions and releases the frame subscription once
    /// every bar is idle.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if self.disposed {
            return false;
        }
        let settled = self.animator.settle(now_ms);
        if settled > 0 {
            trace!(settled, "settled finished transitions");
        }
        let animating = self.animator.is_animating(now_ms);
        if !animating {
            self.release_frames();
        }
        animating
    }

    /// Releases the frame subscription and stops accepting updates.
    ///
    /// Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.release_frames();
        self.scheduler = None;
        self.disposed = true;
        debug!("chart controller disposed");
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    #[must_use]
    pub fn has_frame_subscription(&self) -> bool {
        self.subscription.is_some()
    }

    #[must_use]
    pub fn mode(&self) -> ChartMode {
        self.mode
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn config(&self) -> &ChartControllerConfig {
        &self.config
    }

    #[must_use]
    pub fn data(&self) -> &NormalizedData {
        &self.data
    }

    #[must_use]
    pub fn layout(&self) -> &ResolvedLayout {
        &self.layout
    }

    #[must_use]
    pub fn scales(&self) -> ChartScales {
        self.layout.scales
    }

    #[must_use]
    pub fn animator(&self) -> &TransitionAnimator {
        &self.animator
    }

    /// Diagnostics produced by the most recent `set_data`.
    #[must_use]
    pub fn diagnostics(&self) -> &[DataDiagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub fn series_color(&self, series_key: &str) -> Color {
        self.palette.color(series_key)
    }

    /// Value-axis reference lines in container pixels.
    #[must_use]
    pub fn ticks(&self) -> Vec<AxisTick> {
        let offset = self.layout.margins.top;
        self.layout
            .scales
            .value
            .ticks(self.config.tick_sections)
            .into_iter()
            .map(|tick| AxisTick {
                value: tick.value,
                position_y: tick.position_y + offset,
            })
            .collect()
    }

    pub(super) fn contains_bar(&self, category_index: usize, series_key: &str) -> bool {
        category_index < self.data.category_count() && self.data.series_index(series_key).is_some()
    }

    fn recompute_layout(&mut self) {
        self.layout = resolve_layout(
            &self.data,
            self.viewport,
            self.config.margins,
            self.config.scale_tuning(),
        );
    }

    fn retarget(&mut self) -> RetargetSummary {
        let now_ms = self.clock.now_ms();
        let summary = self.animator.retarget(self.layout.grid(self.mode), now_ms);
        self.ensure_frames(now_ms);
        summary
    }

    fn ensure_frames(&mut self, now_ms: f64) {
        if self.disposed || self.subscription.is_some() || !self.animator.is_animating(now_ms) {
            return;
        }
        if let Some(scheduler) = self.scheduler.as_mut() {
            self.subscription = Some(scheduler.request_frames());
            trace!("requested frame callbacks");
        }
    }

    fn release_frames(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            if let Some(scheduler) = self.scheduler.as_mut() {
                scheduler.cancel_frames(subscription);
            }
            trace!("released frame callbacks");
        }
    }

    fn ignore_after_dispose(&self, operation: &'static str) -> bool {
        if self.disposed {
            debug!(operation, "ignoring update on disposed chart controller");
        }
        self.disposed
    }
}
