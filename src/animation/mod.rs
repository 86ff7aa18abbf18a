//! Frame-driven animation.
//!
//! Everything in here advances through an `update(dt)` call made once per
//! frame by the owning [`crate::context::Configurator`]. Nothing blocks and
//! nothing runs on another thread; cancelling a motion takes effect before
//! the call that cancels it returns.
//!
//! - `easing`: easing curves
//! - `tween`: `Tween` and the single-slot `Timeline`
//! - `spin`: per-part spin-up / spin-down
//! - `glow`: emissive highlight flashes
//! - `insertion`: two-position slides for trays and boxes
//! - `camera`: camera position / orbit target choreography
//! - `lighting`: named lights and their opening fades

use cgmath::Vector3;
use serde::{Deserialize, Serialize};

pub mod camera;
pub mod easing;
pub mod glow;
pub mod insertion;
pub mod lighting;
pub mod spin;
pub mod tween;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> Vector3<f32> {
        match self {
            Axis::X => Vector3::unit_x(),
            Axis::Y => Vector3::unit_y(),
            Axis::Z => Vector3::unit_z(),
        }
    }
}
