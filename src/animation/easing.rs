use serde::{Deserialize, Serialize};

/// Progress curve applied to normalized transition time.
///
/// Every curve is monotonic on `[0, 1]` with `ease(0) == 0` and `ease(1) == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    QuadOut,
    #[default]
    CubicOut,
    SineOut,
}

impl Easing {
    /// Eased progress for `t`, clamped to `[0, 1]`.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        if !t.is_finite() {
            return 1.0;
        }
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::QuadOut => t * (2.0 - t),
            Self::CubicOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::SineOut => (t * std::f64::consts::FRAC_PI_2).sin(),
        }
    }
}
