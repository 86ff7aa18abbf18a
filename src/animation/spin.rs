//! Continuous rotation with eased spin-up and spin-down.
//!
//! Every part has at most one [`SpinTimeline`]. Toggling an idle or
//! decelerating part ramps its angular velocity up to the target speed,
//! toggling a spinning part ramps it back down to zero. Ramps always start
//! from the velocity the part currently has, so re-toggling mid-ramp never
//! produces a jump.

use std::{collections::HashMap, f32::consts::TAU, fmt};

use cgmath::Rad;
use serde::{Deserialize, Serialize};

use crate::{
    animation::{Axis, easing::Ease, tween::Tween},
    data_structures::scene_graph::{NodeId, SceneGraph},
};

/// Externally visible spin state, also used as the button state class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpinState {
    #[default]
    Idle,
    Spinning,
    Decelerating,
}

impl SpinState {
    pub const ALL: [SpinState; 3] = [SpinState::Idle, SpinState::Spinning, SpinState::Decelerating];

    pub fn class_name(self) -> &'static str {
        match self {
            SpinState::Idle => "idle",
            SpinState::Spinning => "spinning",
            SpinState::Decelerating => "decelerating",
        }
    }
}

impl fmt::Display for SpinState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpinParams {
    pub axis: Axis,
    /// `1.0` or `-1.0`.
    pub direction: f32,
    /// Seconds to reach full speed.
    pub accel_time: f32,
    /// Seconds to come to rest.
    pub decel_time: f32,
    /// Revolutions per second at full speed.
    pub target_speed: f32,
}

impl Default for SpinParams {
    fn default() -> Self {
        Self {
            axis: Axis::Y,
            direction: 1.0,
            accel_time: 1.0,
            decel_time: 1.0,
            target_speed: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Accelerating,
    Spinning,
    Decelerating,
}

#[derive(Clone, Debug)]
pub struct SpinTimeline {
    node: NodeId,
    action: String,
    params: SpinParams,
    ease: Ease,
    phase: Phase,
    /// Radians per second, signed.
    velocity: f32,
    ramp: Option<Tween<f32>>,
}

impl SpinTimeline {
    pub fn new(node: NodeId, action: &str, ease: Ease) -> Self {
        Self {
            node,
            action: action.to_string(),
            params: SpinParams::default(),
            ease,
            phase: Phase::Idle,
            velocity: 0.0,
            ramp: None,
        }
    }

    pub fn state(&self) -> SpinState {
        match self.phase {
            Phase::Idle => SpinState::Idle,
            Phase::Accelerating | Phase::Spinning => SpinState::Spinning,
            Phase::Decelerating => SpinState::Decelerating,
        }
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    /// Flip between spinning up and spinning down. Returns the state to report.
    pub fn toggle(&mut self, params: SpinParams, action: &str) -> SpinState {
        // the previous ramp is dropped before the new rate is applied
        if let Some(mut ramp) = self.ramp.take() {
            ramp.kill();
        }
        self.action = action.to_string();
        match self.phase {
            Phase::Idle | Phase::Decelerating => {
                self.params = params;
                let target = params.target_speed * TAU * params.direction;
                self.ramp = Some(Tween::new(self.velocity, target, params.accel_time, self.ease));
                self.phase = Phase::Accelerating;
            }
            Phase::Accelerating | Phase::Spinning => {
                self.params.decel_time = params.decel_time;
                self.ramp = Some(Tween::new(self.velocity, 0.0, params.decel_time, self.ease));
                self.phase = Phase::Decelerating;
            }
        }
        self.state()
    }

    /// Advance by `dt` seconds. Returns the rotation to apply and the state
    /// reached if the timeline came to rest this frame.
    fn advance(&mut self, dt: f32) -> (Rad<f32>, Option<SpinState>) {
        if self.phase == Phase::Idle {
            return (Rad(0.0), None);
        }
        let mut transition = None;
        if let Some(ramp) = self.ramp.as_mut() {
            self.velocity = ramp.advance(dt);
            if ramp.is_finished() {
                self.ramp = None;
                match self.phase {
                    Phase::Accelerating => self.phase = Phase::Spinning,
                    Phase::Decelerating => {
                        self.phase = Phase::Idle;
                        self.velocity = 0.0;
                        transition = Some(SpinState::Idle);
                    }
                    Phase::Idle | Phase::Spinning => (),
                }
            }
        }
        (Rad(self.velocity * dt), transition)
    }
}

/// Owner of all spin timelines, one per part.
#[derive(Debug, Default)]
pub struct SpinController {
    timelines: HashMap<String, SpinTimeline>,
    ease: Ease,
}

impl SpinController {
    pub fn new(ease: Ease) -> Self {
        Self {
            timelines: HashMap::new(),
            ease,
        }
    }

    /// Toggle the spin of `part`. `on_state_change` receives
    /// `(part, action, state)` with the state to show for `action`.
    pub fn toggle_spin(
        &mut self,
        part: &str,
        node: NodeId,
        action: &str,
        params: SpinParams,
        on_state_change: &mut dyn FnMut(&str, &str, SpinState),
    ) -> SpinState {
        let ease = self.ease;
        let timeline = self
            .timelines
            .entry(part.to_string())
            .or_insert_with(|| SpinTimeline::new(node, action, ease));
        let state = timeline.toggle(params, action);
        log::debug!("{} spin toggled to {}", part, state);
        on_state_change(part, action, state);
        state
    }

    /// Apply one frame of rotation to every spinning part.
    pub fn update(
        &mut self,
        dt: f32,
        scene: &mut SceneGraph,
        on_state_change: &mut dyn FnMut(&str, &str, SpinState),
    ) {
        for (part, timeline) in self.timelines.iter_mut() {
            let (angle, transition) = timeline.advance(dt);
            if angle.0 != 0.0 {
                match scene.node_mut(timeline.node) {
                    Some(node) => node.local.rotate_local(timeline.params.axis, angle),
                    None => log::warn!("Spinning part {} has no scene node", part),
                }
            }
            if let Some(state) = transition {
                on_state_change(part, &timeline.action, state);
            }
        }
    }

    pub fn timeline(&self, part: &str) -> Option<&SpinTimeline> {
        self.timelines.get(part)
    }

    pub fn state(&self, part: &str) -> SpinState {
        self.timelines
            .get(part)
            .map(SpinTimeline::state)
            .unwrap_or_default()
    }

    pub fn active_count(&self) -> usize {
        self.timelines.values().filter(|t| t.is_active()).count()
    }
}
