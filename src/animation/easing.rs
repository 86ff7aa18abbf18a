//! Easing curves.
//!
//! An easing maps normalized time `t ∈ [0, 1]` to interpolation progress.
//! The names follow the common `power<N>.<in|out|inOut>` convention used by
//! web animation libraries so product configs can be authored by designers.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ease {
    /// Linear progress.
    #[serde(rename = "none")]
    None,
    #[serde(rename = "power1.in")]
    Power1In,
    #[serde(rename = "power1.out")]
    Power1Out,
    #[default]
    #[serde(rename = "power1.inOut")]
    Power1InOut,
    #[serde(rename = "power2.inOut")]
    Power2InOut,
    #[serde(rename = "sine.inOut")]
    SineInOut,
}

impl Ease {
    /// Progress for normalized time `t`. Input is clamped to `[0, 1]`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::None => t,
            Ease::Power1In => t * t,
            Ease::Power1Out => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::Power1InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Ease::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Ease::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}
