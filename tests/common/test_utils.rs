use std::{cell::RefCell, collections::HashMap, collections::HashSet, rc::Rc};

use flow_configurator::{
    Configurator, Duration,
    animation::spin::SpinState,
    config::ConfiguratorConfig,
    data_structures::{
        instance::Instance,
        scene_graph::{Material, SceneGraph},
    },
    flow::{ActionCommand, CommandQueue, TriggerSource},
    registry::normalize_node_name,
    ui::UiSurface,
};

/// What the fake page saw.
#[derive(Default)]
pub(crate) struct UiLog {
    pub affordances: HashSet<String>,
    pub classes: HashMap<String, SpinState>,
    pub clicks: Vec<String>,
}

/// A page with buttons whose click listeners push onto the command queue,
/// the same way the DOM bindings wire them.
pub(crate) struct RecordingUi {
    log: Rc<RefCell<UiLog>>,
    queue: CommandQueue,
}

impl RecordingUi {
    pub fn new(actions: &[&str], queue: CommandQueue) -> (Self, Rc<RefCell<UiLog>>) {
        let log = Rc::new(RefCell::new(UiLog {
            affordances: actions.iter().map(|a| a.to_string()).collect(),
            ..Default::default()
        }));
        (
            Self {
                log: log.clone(),
                queue,
            },
            log,
        )
    }
}

impl UiSurface for RecordingUi {
    fn has_affordance(&self, action: &str) -> bool {
        self.log.borrow().affordances.contains(action)
    }

    fn click(&mut self, action: &str) -> bool {
        if !self.has_affordance(action) {
            return false;
        }
        self.log.borrow_mut().clicks.push(action.to_string());
        self.queue
            .push(ActionCommand::new(action, None, TriggerSource::Ui));
        true
    }

    fn set_state_class(&mut self, action: &str, state: SpinState) -> bool {
        if !self.has_affordance(action) {
            return false;
        }
        self.log
            .borrow_mut()
            .classes
            .insert(action.to_string(), state);
        true
    }
}

/// A scene containing every node the stock config binds, each with two mesh
/// children that share one material.
pub(crate) fn fixture_scene(config: &ConfiguratorConfig) -> SceneGraph {
    let mut scene = SceneGraph::new();
    let shared = scene.add_material(Material {
        name: Some("plastic".to_string()),
        color: [0.5, 0.25, 1.0],
        ..Default::default()
    });
    let root = scene.add_node(None, "model_root", Instance::default());
    for binding in &config.parts {
        let node = scene.add_node(
            Some(root),
            &normalize_node_name(&binding.node),
            Instance::default(),
        );
        scene.add_mesh(Some(node), &format!("{}_mesh_a", binding.name), Instance::default(), shared);
        scene.add_mesh(Some(node), &format!("{}_mesh_b", binding.name), Instance::default(), shared);
    }
    scene
}

pub(crate) fn ready_headless() -> Configurator {
    let config = ConfiguratorConfig::default();
    let scene = fixture_scene(&config);
    let mut configurator = Configurator::headless(config);
    let missing = configurator.attach_scene(scene);
    assert!(missing.is_empty(), "{:?}", missing);
    configurator
}

pub(crate) fn ready_with_ui(actions: &[&str]) -> (Configurator, Rc<RefCell<UiLog>>) {
    let config = ConfiguratorConfig::default();
    let scene = fixture_scene(&config);
    let queue = CommandQueue::new();
    let (ui, log) = RecordingUi::new(actions, queue.clone());
    let mut configurator = Configurator::new(config, Box::new(ui), queue);
    configurator.attach_scene(scene);
    (configurator, log)
}

/// Run at least `seconds` worth of 60 fps frames.
pub(crate) fn run_for(configurator: &mut Configurator, seconds: f32) {
    // a couple of extra frames absorb f32 drift in the accumulated time
    let frames = (seconds * 60.0).ceil() as u32 + 2;
    for _ in 0..frames {
        configurator.update(Duration::from_secs_f32(1.0 / 60.0));
    }
}

pub(crate) fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}
