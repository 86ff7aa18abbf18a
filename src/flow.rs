//! Command flow and frame timing.
//!
//! Triggers reach the coordinator in two steps. The [`ActionDispatcher`]
//! resolves an action name (UI affordance first, then the handler map) and
//! the resolved [`ActionCommand`] lands on the [`CommandQueue`]. The
//! [`crate::context::Configurator`] drains the queue and runs the handlers.
//! Splitting the two keeps a synthesized click, whose listener enqueues
//! while the dispatcher is still on the stack, from re-entering a handler.
//!
//! # Lifecycle
//!
//! Each frame:
//! 1. UI listeners and inbound messages push commands
//! 2. `Configurator::update(dt)` drains the queue
//! 3. every timeline advances by `dt` and writes into the scene

use std::{cell::RefCell, collections::HashMap, collections::VecDeque, rc::Rc};

use instant::{Duration, Instant};
use serde_json::Value;

use crate::{config::ActionConfig, ui::UiSurface};

/// Who asked for an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerSource {
    /// A click on a UI affordance, real or synthesized.
    Ui,
    /// The inbound message channel.
    Message,
    /// A direct call on the control surface.
    Direct,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActionCommand {
    pub action: String,
    pub payload: Option<Value>,
    pub source: TriggerSource,
}

impl ActionCommand {
    pub fn new(action: &str, payload: Option<Value>, source: TriggerSource) -> Self {
        Self {
            action: action.to_string(),
            payload,
            source,
        }
    }
}

/// FIFO of resolved commands. Clones share the same queue, so UI listeners
/// can hold one while the coordinator owns another.
#[derive(Clone, Debug, Default)]
pub struct CommandQueue {
    inner: Rc<RefCell<VecDeque<ActionCommand>>>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, command: ActionCommand) {
        self.inner.borrow_mut().push_back(command);
    }

    pub fn pop(&self) -> Option<ActionCommand> {
        self.inner.borrow_mut().pop_front()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

/// Maps action names to their handlers.
#[derive(Debug, Default)]
pub struct ActionDispatcher {
    order: Vec<String>,
    handlers: HashMap<String, ActionConfig>,
}

impl ActionDispatcher {
    pub fn new(actions: &[ActionConfig]) -> Self {
        let mut dispatcher = Self::default();
        for action in actions {
            let name = action.name().to_string();
            if dispatcher.handlers.contains_key(&name) {
                log::warn!("Action {} is defined twice, keeping the first definition", name);
                continue;
            }
            dispatcher.order.push(name.clone());
            dispatcher.handlers.insert(name, action.clone());
        }
        dispatcher
    }

    /// Resolve `name` and enqueue it. Returns `false` if nothing handles it,
    /// in which case the queue is left untouched.
    pub fn dispatch(
        &self,
        ui: &mut dyn UiSurface,
        queue: &CommandQueue,
        name: &str,
        payload: Option<Value>,
        source: TriggerSource,
    ) -> bool {
        if name.is_empty() {
            log::warn!("No action name provided for trigger_action.");
            return false;
        }
        if ui.has_affordance(name) && ui.click(name) {
            log::debug!("Action {} delegated to its UI affordance", name);
            return true;
        }
        if !self.handlers.contains_key(name) {
            log::warn!("No handler found for action \"{}\".", name);
            return false;
        }
        queue.push(ActionCommand::new(name, payload, source));
        true
    }

    pub fn handler(&self, name: &str) -> Option<&ActionConfig> {
        self.handlers.get(name)
    }

    /// Action names in definition order.
    pub fn available_actions(&self) -> Vec<String> {
        self.order.clone()
    }
}

/// Measures the time between frames.
#[derive(Debug)]
pub struct FrameClock {
    last_time: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_time: Instant::now(),
        }
    }

    /// Time since the previous call (or since construction).
    pub fn tick(&mut self) -> Duration {
        let dt = self.last_time.elapsed();
        self.last_time = Instant::now();
        dt
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
