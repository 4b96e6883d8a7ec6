use serde::{Deserialize, Serialize};

/// How a sliding caption covers its starting offset over the animation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideCurve {
    /// Constant speed.
    #[default]
    Linear,
    /// Fast start, slowing as the caption reaches its rest position.
    Decelerate,
    /// Like `Decelerate`, with a longer, softer landing.
    Settle,
}

impl SlideCurve {
    /// Share of the starting offset still left at progress `t` (clamped to `[0, 1]`).
    ///
    /// Always 1 at `t = 0`, 0 at `t = 1`, and non-increasing in between.
    pub fn remaining(self, t: f64) -> f64 {
        let left = 1.0 - t.clamp(0.0, 1.0);
        match self {
            Self::Linear => left,
            Self::Decelerate => left * left,
            Self::Settle => left * left * left,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/slide.rs"]
mod tests;
