use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::animation::Easing;
use crate::core::{BarGeometry, LayoutGrid};

/// Default morph duration in milliseconds.
pub const DEFAULT_TRANSITION_MS: f64 = 600.0;

/// Duration and curve shared by every bar of one morph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionConfig {
    pub duration_ms: f64,
    #[serde(default)]
    pub easing: Easing,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_TRANSITION_MS,
            easing: Easing::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarPhase {
    Idle,
    Animating,
}

/// Interpolation state of one bar.
///
/// The rendered geometry is never stored; it is derived from `start`,
/// `target` and the clock so reads stay side-effect free.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimatedBarState {
    pub start: BarGeometry,
    pub target: BarGeometry,
    pub start_ms: f64,
    pub duration_ms: f64,
    pub easing: Easing,
}

impl AnimatedBarState {
    /// State resting at `geometry`.
    #[must_use]
    pub fn at_rest(geometry: BarGeometry, now_ms: f64, config: TransitionConfig) -> Self {
        Self {
            start: geometry,
            target: geometry,
            start_ms: now_ms,
            duration_ms: config.duration_ms,
            easing: config.easing,
        }
    }

    /// Linear time fraction in `[0, 1]`.
    #[must_use]
    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 || !self.duration_ms.is_finite() {
            return 1.0;
        }
        let t = (now_ms - self.start_ms) / self.duration_ms;
        if t.is_finite() { t.clamp(0.0, 1.0) } else { 1.0 }
    }

    #[must_use]
    pub fn geometry_at(&self, now_ms: f64) -> BarGeometry {
        let t = self.progress(now_ms);
        if t >= 1.0 {
            return self.target;
        }
        self.start.lerp(self.target, self.easing.apply(t))
    }

    #[must_use]
    pub fn phase(&self, now_ms: f64) -> BarPhase {
        if self.start != self.target && self.progress(now_ms) < 1.0 {
            BarPhase::Animating
        } else {
            BarPhase::Idle
        }
    }
}

/// Counters describing one retarget pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RetargetSummary {
    /// Identities seen for the first time, placed directly at their target.
    pub created: usize,
    /// Existing identities given a new start and target.
    pub restarted: usize,
    /// Restarted identities that were still mid-flight.
    pub interrupted: usize,
}

/// Per-bar transition state machine keyed by `(category_index, series_key)`.
///
/// A retarget overwrites each bar's start with its current interpolated
/// geometry, so overlapping triggers coalesce: only the latest target is ever
/// reached and nothing is queued.
#[derive(Debug, Clone, Default)]
pub struct TransitionAnimator {
    config: TransitionConfig,
    bars: IndexMap<String, IndexMap<usize, AnimatedBarState>>,
    generation: u64,
}

impl TransitionAnimator {
    #[must_use]
    pub fn new(config: TransitionConfig) -> Self {
        Self {
            config,
            bars: IndexMap::new(),
            generation: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> TransitionConfig {
        self.config
    }

    /// Number of retarget passes so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Starts a synchronized morph of every bar in `grid` towards its entry.
    ///
    /// Bars absent from `grid` keep their state untouched.
    pub fn retarget(&mut self, grid: &LayoutGrid, now_ms: f64) -> RetargetSummary {
        let config = self.config;
        let mut summary = RetargetSummary::default();

        for (category_index, series_key, target) in grid.iter() {
            let by_category = match self.bars.get_index_of(series_key) {
                Some(index) => &mut self.bars[index],
                None => self.bars.entry(series_key.to_owned()).or_default(),
            };

            match by_category.entry(category_index) {
                Entry::Occupied(mut occupied) => {
                    let state = occupied.get_mut();
                    if state.phase(now_ms) == BarPhase::Animating {
                        summary.interrupted += 1;
                    }
                    let current = state.geometry_at(now_ms);
                    *state = AnimatedBarState {
                        start: current,
                        target,
                        start_ms: now_ms,
                        duration_ms: config.duration_ms,
                        easing: config.easing,
                    };
                    summary.restarted += 1;
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(AnimatedBarState::at_rest(target, now_ms, config));
                    summary.created += 1;
                }
            }
        }

        self.generation += 1;
        trace!(
            generation = self.generation,
            created = summary.created,
            restarted = summary.restarted,
            interrupted = summary.interrupted,
            "retargeted bar transitions"
        );
        summary
    }

    #[must_use]
    pub fn state(&self, category_index: usize, series_key: &str) -> Option<&AnimatedBarState> {
        self.bars.get(series_key)?.get(&category_index)
    }

    #[must_use]
    pub fn geometry(
        &self,
        category_index: usize,
        series_key: &str,
        now_ms: f64,
    ) -> Option<BarGeometry> {
        self.state(category_index, series_key)
            .map(|state| state.geometry_at(now_ms))
    }

    #[must_use]
    pub fn phase(&self, category_index: usize, series_key: &str, now_ms: f64) -> Option<BarPhase> {
        self.state(category_index, series_key)
            .map(|state| state.phase(now_ms))
    }

    #[must_use]
    pub fn is_animating(&self, now_ms: f64) -> bool {
        self.bars
            .values()
            .flat_map(IndexMap::values)
            .any(|state| state.phase(now_ms) == BarPhase::Animating)
    }

    /// Collapses finished transitions to rest at their target.
    ///
    /// Returns how many bars were settled. Rendered geometry does not change.
    pub fn settle(&mut self, now_ms: f64) -> usize {
        let mut settled = 0;
        for state in self.bars.values_mut().flat_map(IndexMap::values_mut) {
            if state.start != state.target && state.progress(now_ms) >= 1.0 {
                state.start = state.target;
                settled += 1;
            }
        }
        settled
    }

    /// Number of tracked bar identities, including ones absent from current data.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.values().map(IndexMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
