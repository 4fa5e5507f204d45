mod animator;
mod easing;

pub use animator::{
    AnimatedBarState, BarPhase, DEFAULT_TRANSITION_MS, RetargetSummary, TransitionAnimator,
    TransitionConfig,
};
pub use easing::Easing;
