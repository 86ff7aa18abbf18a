use instant::Duration;
use serde_json::Value;

use crate::{
    animation::{
        camera::CameraRig,
        glow::GlowEffect,
        insertion::{InsertionState, TransformAnimator},
        lighting::LightRig,
        spin::{SpinController, SpinState},
    },
    config::{ActionConfig, ConfiguratorConfig, InsertionAction, SpinAction},
    data_structures::scene_graph::SceneGraph,
    error::{Error, Result},
    flow::{ActionCommand, ActionDispatcher, CommandQueue, TriggerSource},
    message::parse_message,
    registry::PartRegistry,
    ui::{ButtonStateReflector, HeadlessUi, UiSurface},
};

/// One configurator session: owns the scene and every piece of animation
/// state for it. Create one per loaded model.
pub struct Configurator {
    config: ConfiguratorConfig,
    scene: Option<SceneGraph>,
    registry: PartRegistry,
    spins: SpinController,
    glow: GlowEffect,
    insertions: TransformAnimator,
    pub camera: CameraRig,
    pub lights: LightRig,
    dispatcher: ActionDispatcher,
    queue: CommandQueue,
    reflector: ButtonStateReflector,
    ui: Box<dyn UiSurface>,
}

impl std::fmt::Debug for Configurator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configurator")
            .field("ready", &self.is_ready())
            .field("parts", &self.registry.len())
            .field("pending", &self.queue.len())
            .finish()
    }
}

impl Configurator {
    /// `queue` must be the queue the UI's click listeners push to.
    pub fn new(config: ConfiguratorConfig, ui: Box<dyn UiSurface>, queue: CommandQueue) -> Self {
        Self {
            registry: PartRegistry::new(),
            spins: SpinController::new(config.spin_ease),
            glow: GlowEffect::new(config.glow.into()),
            insertions: TransformAnimator::new(),
            camera: CameraRig::new(config.camera.clone()),
            lights: LightRig::new(&config.lights),
            dispatcher: ActionDispatcher::new(&config.actions),
            reflector: ButtonStateReflector::new(),
            scene: None,
            queue,
            ui,
            config,
        }
    }

    /// A session without any UI affordances.
    pub fn headless(config: ConfiguratorConfig) -> Self {
        Self::new(config, Box::new(HeadlessUi), CommandQueue::new())
    }

    /// Take ownership of the loaded scene, bind parts and start the opening.
    /// Returns the bindings that could not be resolved.
    pub fn attach_scene(&mut self, scene: SceneGraph) -> Vec<Error> {
        let (registry, missing) = PartRegistry::bind(&scene, &self.config.parts);
        for error in &missing {
            log::warn!("{}", error);
        }
        self.registry = registry;
        self.spins = SpinController::new(self.config.spin_ease);
        self.glow = GlowEffect::new(self.config.glow.into());
        self.insertions = TransformAnimator::new();
        self.reflector = ButtonStateReflector::new();
        for action in &self.config.actions {
            let ActionConfig::Insertion(insertion) = action else {
                continue;
            };
            let Some(part) = self.registry.get_mut(&insertion.part) else {
                continue;
            };
            part.insertion = Some(InsertionState::Inserted);
            let node = part.node;
            self.insertions
                .register(&scene, &insertion.part, node, insertion.params());
        }
        log::info!(
            "Scene attached with {} nodes, {} parts bound",
            scene.len(),
            self.registry.len()
        );
        self.scene = Some(scene);
        self.play_opening();
        missing
    }

    pub fn is_ready(&self) -> bool {
        self.scene.is_some()
    }

    /// Camera fly-in and light fade-in.
    pub fn play_opening(&mut self) {
        self.lights.play_opening();
        self.camera.play_opening();
    }

    /// Resolve and run `name`. Returns `false` for unknown actions and while
    /// no scene is attached; in both cases nothing is mutated.
    pub fn trigger_action(&mut self, name: &str, payload: Option<Value>) -> bool {
        self.trigger(name, payload, TriggerSource::Direct)
    }

    /// Entry point for the inbound message channel.
    pub fn handle_message(&mut self, data: &Value) -> bool {
        match parse_message(data, &self.config.message_type) {
            Some(message) => self.trigger(&message.action, message.payload, TriggerSource::Message),
            None => false,
        }
    }

    /// Entry point for UI click listeners.
    pub fn on_ui_click(&mut self, action: &str) {
        self.queue
            .push(ActionCommand::new(action, None, TriggerSource::Ui));
        self.process_commands();
    }

    fn trigger(&mut self, name: &str, payload: Option<Value>, source: TriggerSource) -> bool {
        if !self.is_ready() {
            log::warn!("Action \"{}\" ignored: {}", name, Error::NotReady);
            return false;
        }
        let resolved =
            self.dispatcher
                .dispatch(self.ui.as_mut(), &self.queue, name, payload, source);
        if resolved {
            self.process_commands();
        }
        resolved
    }

    pub fn available_actions(&self) -> Vec<String> {
        self.dispatcher.available_actions()
    }

    /// Run every queued command in order.
    pub fn process_commands(&mut self) {
        while let Some(command) = self.queue.pop() {
            if let Err(e) = self.run_action(&command) {
                log::warn!("Action \"{}\" failed: {}", command.action, e);
            }
        }
    }

    fn run_action(&mut self, command: &ActionCommand) -> Result<()> {
        if !self.is_ready() {
            return Err(Error::NotReady);
        }
        let action = self
            .dispatcher
            .handler(&command.action)
            .cloned()
            .ok_or_else(|| Error::UnknownAction(command.action.clone()))?;
        log::debug!("Running {} from {:?}", command.action, command.source);
        match action {
            ActionConfig::Spin(spin) => self.run_spin(&spin),
            ActionConfig::Insertion(insertion) => self.run_insertion(&insertion),
        }
    }

    fn run_spin(&mut self, action: &SpinAction) -> Result<()> {
        let Self {
            scene,
            registry,
            spins,
            glow,
            reflector,
            ui,
            ..
        } = self;
        let scene = scene.as_mut().ok_or(Error::NotReady)?;
        for binding in &action.parts {
            let node = match registry.node(&binding.part) {
                Ok(node) => node,
                Err(e) => {
                    log::warn!("{} skips {}: {}", action.name, binding.part, e);
                    continue;
                }
            };
            glow.animate_glow(scene, node);
            spins.toggle_spin(
                &binding.part,
                node,
                &action.name,
                binding.params(),
                &mut |part, action, state| {
                    if let Some(part) = registry.get_mut(part) {
                        part.spin = state;
                    }
                    reflector.reflect(ui.as_mut(), state, action);
                },
            );
        }
        self.camera.check_and_reposition_if_overhead();
        Ok(())
    }

    fn run_insertion(&mut self, action: &InsertionAction) -> Result<()> {
        let scene = self.scene.as_mut().ok_or(Error::NotReady)?;
        let node = self.registry.node(&action.part)?;
        self.camera.clear();
        self.glow.animate_glow(scene, node);
        let next = self.insertions.toggle_insertion(scene, &action.part)?;
        if let Some(part) = self.registry.get_mut(&action.part) {
            part.insertion = Some(next);
        }
        let (shot, shown) = match next {
            InsertionState::Ejected => (action.eject_camera, SpinState::Spinning),
            InsertionState::Inserted => (action.insert_camera, SpinState::Idle),
        };
        match shot.target {
            Some(target) => self
                .camera
                .frame_for(shot.position.into(), target.into(), shot.duration),
            None => {
                let ease = self.camera.config().ease;
                self.camera
                    .move_position(shot.position.into(), shot.duration, ease);
                self.camera.reset_target();
            }
        }
        self.reflector.reflect(self.ui.as_mut(), shown, &action.name);
        Ok(())
    }

    /// Advance every animation by `dt`. Call once per frame.
    pub fn update(&mut self, dt: Duration) {
        self.process_commands();
        let dt = dt.as_secs_f32();
        self.camera.update(dt);
        self.lights.update(dt);
        let Self {
            scene,
            registry,
            spins,
            glow,
            insertions,
            reflector,
            ui,
            ..
        } = self;
        let Some(scene) = scene.as_mut() else {
            return;
        };
        spins.update(dt, scene, &mut |part, action, state| {
            if let Some(part) = registry.get_mut(part) {
                part.spin = state;
            }
            reflector.reflect(ui.as_mut(), state, action);
        });
        insertions.update(dt, scene);
        glow.update(dt, scene);
    }

    pub fn config(&self) -> &ConfiguratorConfig {
        &self.config
    }

    pub fn scene(&self) -> Option<&SceneGraph> {
        self.scene.as_ref()
    }

    pub fn registry(&self) -> &PartRegistry {
        &self.registry
    }

    pub fn spins(&self) -> &SpinController {
        &self.spins
    }

    pub fn glow(&self) -> &GlowEffect {
        &self.glow
    }

    pub fn insertions(&self) -> &TransformAnimator {
        &self.insertions
    }

    pub fn reflector(&self) -> &ButtonStateReflector {
        &self.reflector
    }

    pub fn queue(&self) -> &CommandQueue {
        &self.queue
    }
}
