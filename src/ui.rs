//! UI surface and button state reflection.
//!
//! The coordinator never touches a widget toolkit directly. Whatever hosts
//! the buttons implements [`UiSurface`]: the DOM on the web, a test double
//! in tests, or [`HeadlessUi`] when there are no buttons at all.

use std::collections::HashMap;

use crate::animation::spin::SpinState;

/// Buttons tagged with an action name, each with a state indicator.
pub trait UiSurface {
    /// Is there an affordance tagged with `action`?
    fn has_affordance(&self, action: &str) -> bool;

    /// Synthesize a click on the affordance tagged with `action`. Its
    /// listener is expected to enqueue the action on the command queue.
    /// Returns `false` if no such affordance exists.
    fn click(&mut self, action: &str) -> bool;

    /// Replace the state class of the affordance's indicator with `state`.
    /// Returns `false` if the affordance or its indicator is missing.
    fn set_state_class(&mut self, action: &str, state: SpinState) -> bool;
}

/// A UI without any affordances. Every dispatch falls back to the handler map.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeadlessUi;

impl UiSurface for HeadlessUi {
    fn has_affordance(&self, _: &str) -> bool {
        false
    }

    fn click(&mut self, _: &str) -> bool {
        false
    }

    fn set_state_class(&mut self, _: &str, _: SpinState) -> bool {
        false
    }
}

/// Mirrors part states onto their buttons and remembers what it last showed.
#[derive(Debug, Default)]
pub struct ButtonStateReflector {
    shown: HashMap<String, SpinState>,
}

impl ButtonStateReflector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reflect(&mut self, ui: &mut dyn UiSurface, state: SpinState, action: &str) {
        self.shown.insert(action.to_string(), state);
        if !ui.set_state_class(action, state) {
            log::trace!("No indicator for {}, skipping {}", action, state);
        }
    }

    /// Last state reflected for `action`.
    pub fn state(&self, action: &str) -> Option<SpinState> {
        self.shown.get(action).copied()
    }
}
