//! Camera choreography.
//!
//! The camera position and the orbit target each have their own single-slot
//! [`Timeline`]. Any new framing clears the relevant timeline synchronously
//! before the new motion is added; the last trigger wins.

use cgmath::Vector3;

use crate::{
    animation::{
        easing::Ease,
        tween::{Timeline, Tween},
    },
    config::CameraConfig,
};

/// What [`CameraRig::check_and_reposition_if_overhead`] decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reposition {
    /// The camera is low enough; nothing moved.
    NotOverhead,
    /// A motion toward the default view was already in flight.
    AlreadyHeadingHome,
    /// A motion elsewhere was cancelled and replaced.
    Retargeted,
    /// The camera was idle and now heads to the default view.
    Started,
}

#[derive(Debug)]
pub struct CameraRig {
    pub position: Vector3<f32>,
    pub target: Vector3<f32>,
    position_timeline: Timeline<Vector3<f32>>,
    target_timeline: Timeline<Vector3<f32>>,
    config: CameraConfig,
}

impl CameraRig {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            position: config.start_position.into(),
            target: Vector3::new(0.0, 0.0, 0.0),
            position_timeline: Timeline::new("camera position"),
            target_timeline: Timeline::new("camera target"),
            config,
        }
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Clear both timelines. Pending motions are killed, not finished.
    pub fn clear(&mut self) {
        self.position_timeline.clear();
        self.target_timeline.clear();
    }

    pub fn move_position(&mut self, to: Vector3<f32>, duration: f32, ease: Ease) {
        self.position_timeline
            .to(Tween::new(self.position, to, duration, ease));
    }

    pub fn move_target(&mut self, to: Vector3<f32>, duration: f32, ease: Ease) {
        self.target_timeline
            .to(Tween::new(self.target, to, duration, ease));
    }

    /// Move both the camera and its look-at point.
    pub fn frame_for(&mut self, position: Vector3<f32>, look_at: Vector3<f32>, duration: f32) {
        let ease = self.config.ease;
        self.move_position(position, duration, ease);
        self.move_target(look_at, duration, ease);
    }

    /// Swing the look-at point back to the origin.
    pub fn reset_target(&mut self) {
        let duration = self.config.reset_target_duration;
        self.move_target(Vector3::new(0.0, 0.0, 0.0), duration, self.config.ease);
    }

    /// The camera looking down onto the model hides the parts being
    /// animated, so bring it back under to the default view.
    pub fn check_and_reposition_if_overhead(&mut self) -> Reposition {
        let decision = if self.position.y > self.config.overhead_threshold {
            let home: Vector3<f32> = self.config.default_view.into();
            match self.position_timeline.active_target() {
                Some(target) if target == home => {
                    log::debug!("Camera is already heading to the default view");
                    Reposition::AlreadyHeadingHome
                }
                Some(target) => {
                    log::debug!("Camera is tweening to {:?}, retargeting", target);
                    self.move_position(home, self.config.reposition_duration, self.config.ease);
                    Reposition::Retargeted
                }
                None => {
                    log::debug!("Camera is idle, moving to the default view");
                    self.move_position(home, self.config.reposition_duration, self.config.ease);
                    Reposition::Started
                }
            }
        } else {
            Reposition::NotOverhead
        };
        self.reset_target();
        decision
    }

    /// Fly in from the start pose to the default view.
    pub fn play_opening(&mut self) {
        self.position = self.config.start_position.into();
        self.position_timeline.to(Tween::new(
            self.position,
            self.config.default_view.into(),
            self.config.opening_duration,
            self.config.opening_ease,
        ));
    }

    pub fn update(&mut self, dt: f32) {
        self.position_timeline.tick(dt, &mut self.position);
        self.target_timeline.tick(dt, &mut self.target);
    }

    /// Destination of the position motion in flight, if any.
    pub fn position_in_flight(&self) -> Option<Vector3<f32>> {
        self.position_timeline.active_target()
    }

    pub fn target_in_flight(&self) -> Option<Vector3<f32>> {
        self.target_timeline.active_target()
    }

    pub fn is_idle(&self) -> bool {
        self.position_timeline.is_empty() && self.target_timeline.is_empty()
    }
}
