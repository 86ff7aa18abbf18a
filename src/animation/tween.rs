//! Duration-bounded interpolation.
//!
//! A [`Tween`] interpolates one value from `from` to `to` after an optional
//! delay. A [`Timeline`] is a single slot for tweens that write the same
//! property: adding a motion always clears the previous one first, so two
//! writers never race on one transform.

use cgmath::Vector3;

use crate::animation::easing::Ease;

/// Values that can be interpolated linearly.
pub trait Lerp: Copy {
    fn lerp(self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for Vector3<f32> {
    fn lerp(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

#[derive(Clone, Debug)]
pub struct Tween<T: Lerp> {
    from: T,
    to: T,
    duration: f32,
    delay: f32,
    ease: Ease,
    elapsed: f32,
    killed: bool,
}

impl<T: Lerp> Tween<T> {
    /// Create a tween. `duration` is in seconds; negative values are treated as zero.
    pub fn new(from: T, to: T, duration: f32, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            delay: 0.0,
            ease,
            elapsed: 0.0,
            killed: false,
        }
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    /// Advance by `dt` seconds and return the current value.
    pub fn advance(&mut self, dt: f32) -> T {
        if !self.killed {
            self.elapsed += dt.max(0.0);
        }
        self.value()
    }

    pub fn value(&self) -> T {
        self.from.lerp(self.to, self.ease.apply(self.progress()))
    }

    /// Linear progress in `[0, 1]`, excluding the delay.
    pub fn progress(&self) -> f32 {
        let running = self.elapsed - self.delay;
        if running < 0.0 {
            return 0.0;
        }
        if self.duration <= f32::EPSILON {
            return 1.0;
        }
        (running / self.duration).min(1.0)
    }

    /// True while the playhead is inside the motion (past the delay, before the end).
    pub fn is_active(&self) -> bool {
        !self.killed && self.elapsed >= self.delay && !self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed - self.delay >= self.duration
    }

    /// Stop the tween in place. A killed tween never writes again.
    pub fn kill(&mut self) {
        self.killed = true;
    }

    pub fn is_killed(&self) -> bool {
        self.killed
    }

    pub fn target(&self) -> T {
        self.to
    }
}

/// Single-slot sequence of motions for one property.
#[derive(Clone, Debug)]
pub struct Timeline<T: Lerp> {
    label: &'static str,
    current: Option<Tween<T>>,
}

impl<T: Lerp> Timeline<T> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            current: None,
        }
    }

    /// Kill and drop the pending motion, if any.
    pub fn clear(&mut self) {
        if let Some(mut tween) = self.current.take() {
            tween.kill();
            log::debug!("{} timeline cleared", self.label);
        }
    }

    /// Replace whatever is pending with `tween`.
    pub fn to(&mut self, tween: Tween<T>) {
        self.clear();
        self.current = Some(tween);
    }

    /// Advance the pending motion and write its value into `value`.
    pub fn tick(&mut self, dt: f32, value: &mut T) {
        let Some(tween) = self.current.as_mut() else {
            return;
        };
        let next = tween.advance(dt);
        if tween.elapsed >= tween.delay {
            *value = next;
        }
        if tween.is_finished() {
            self.current = None;
        }
    }

    /// Destination of the motion currently in flight.
    pub fn active_target(&self) -> Option<T> {
        self.current
            .as_ref()
            .filter(|tween| tween.is_active())
            .map(Tween::target)
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}
