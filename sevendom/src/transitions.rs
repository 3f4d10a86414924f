use std::time::Duration;

/// Easing function for slides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Apply easing to progress (0.0 to 1.0).
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Timing for a content slide. The default matches the original's "slow"
/// reveal: 600ms with a gentle curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideSettings {
    pub duration: Duration,
    pub easing: Easing,
}

impl SlideSettings {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }

    pub fn instant() -> Self {
        Self {
            duration: Duration::ZERO,
            easing: Easing::Linear,
        }
    }
}

impl Default for SlideSettings {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(600),
            easing: Easing::EaseInOut,
        }
    }
}

/// Linear interpolation between two heights.
pub(crate) fn lerp_u16(from: u16, to: u16, t: f32) -> u16 {
    let from = from as f32;
    let to = to as f32;
    (from + (to - from) * t).round() as u16
}
