//! Browser bindings.
//!
//! Buttons are looked up by their `data-model-action` attribute; each one
//! holds a `.circle` element whose class shows the part state. Clicks are
//! pushed onto the shared [`CommandQueue`] and run on the next frame (or
//! right away when the click was synthesized by `triggerAction`).

use std::{cell::RefCell, rc::Rc};

use serde_json::Value;
use wasm_bindgen::{JsCast, prelude::*};

use crate::{
    animation::spin::SpinState,
    config::ConfiguratorConfig,
    context::Configurator,
    flow::{ActionCommand, CommandQueue, FrameClock, TriggerSource},
    registry::normalize_node_name,
    resources::scene_from_gltf_slice,
    ui::UiSurface,
};

/// Default name of the global control object.
const CONTROLS_GLOBAL: &str = "Dyson3DControls";
const INDICATOR: &str = ".circle";

fn selector(action: &str) -> String {
    format!("[data-model-action=\"{}\"]", action)
}

struct DomUi {
    document: web_sys::Document,
}

impl DomUi {
    fn element(&self, action: &str) -> Option<web_sys::Element> {
        self.document.query_selector(&selector(action)).ok().flatten()
    }
}

impl UiSurface for DomUi {
    fn has_affordance(&self, action: &str) -> bool {
        self.element(action).is_some()
    }

    fn click(&mut self, action: &str) -> bool {
        // dispatched as a plain event so SVG buttons click too
        let Some(element) = self.element(action) else {
            return false;
        };
        match web_sys::Event::new("click") {
            Ok(event) => element.dispatch_event(&event).is_ok(),
            Err(_) => false,
        }
    }

    fn set_state_class(&mut self, action: &str, state: SpinState) -> bool {
        let Some(indicator) = self
            .element(action)
            .and_then(|button| button.query_selector(INDICATOR).ok().flatten())
        else {
            return false;
        };
        let classes = indicator.class_list();
        for other in SpinState::ALL {
            let _ = classes.remove_1(other.class_name());
        }
        classes.add_1(state.class_name()).is_ok()
    }
}

fn js_to_json(value: &JsValue) -> Value {
    if value.is_undefined() || value.is_null() {
        return Value::Null;
    }
    if let Some(text) = value.as_string() {
        return Value::String(text);
    }
    js_sys::JSON::stringify(value)
        .ok()
        .map(String::from)
        .and_then(|text| serde_json::from_str(&text).ok())
        .unwrap_or(Value::Null)
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct WebConfigurator {
    inner: Rc<RefCell<Configurator>>,
    clock: FrameClock,
    _listeners: Vec<Closure<dyn FnMut(web_sys::Event)>>,
}

#[wasm_bindgen]
impl WebConfigurator {
    /// Create a session bound to the page's buttons. Without `config_json`
    /// the stock product configuration is used.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WebConfigurator, JsValue> {
        crate::init_logging();
        let config = match config_json {
            Some(json) => ConfiguratorConfig::from_json(&json).map_err(js_error)?,
            None => ConfiguratorConfig::default(),
        };
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("No document"))?;

        let queue = CommandQueue::new();
        let mut listeners = Vec::new();
        for action in config.actions.iter().map(|a| a.name().to_string()) {
            let Some(element) = document.query_selector(&selector(&action))? else {
                continue;
            };
            let queue = queue.clone();
            let listener = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
                queue.push(ActionCommand::new(&action, None, TriggerSource::Ui));
            });
            element.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())?;
            listeners.push(listener);
        }

        let configurator = Configurator::new(config, Box::new(DomUi { document }), queue);
        Ok(Self {
            inner: Rc::new(RefCell::new(configurator)),
            clock: FrameClock::new(),
            _listeners: listeners,
        })
    }

    /// Attach the model from `.glb`/`.gltf` bytes fetched by the page.
    #[wasm_bindgen(js_name = loadModel)]
    pub fn load_model(&self, bytes: &[u8]) -> Result<(), JsValue> {
        let scale = self.inner.borrow().config().model.scale;
        let scene = scene_from_gltf_slice(bytes, scale).map_err(js_error)?;
        self.inner.borrow_mut().attach_scene(scene);
        Ok(())
    }

    #[wasm_bindgen(js_name = triggerAction)]
    pub fn trigger_action(&self, name: String, payload: JsValue) -> bool {
        trigger(&self.inner, &name, &payload)
    }

    #[wasm_bindgen(js_name = availableActions)]
    pub fn available_actions(&self) -> js_sys::Array {
        actions_array(&self.inner)
    }

    /// Advance all animations by the time since the previous call.
    pub fn tick(&mut self) {
        let dt = self.clock.tick();
        self.inner.borrow_mut().update(dt);
    }

    /// Listen for `message` events on the window.
    #[wasm_bindgen(js_name = installMessageListener)]
    pub fn install_message_listener(&self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let inner = self.inner.clone();
        let listener = Closure::<dyn FnMut(web_sys::MessageEvent)>::new(
            move |event: web_sys::MessageEvent| {
                let data = js_to_json(&event.data());
                match inner.try_borrow_mut() {
                    Ok(mut configurator) => {
                        configurator.handle_message(&data);
                    }
                    Err(_) => log::warn!("Configurator busy, dropping message"),
                }
            },
        );
        window.add_event_listener_with_callback("message", listener.as_ref().unchecked_ref())?;
        // lives as long as the page
        listener.forget();
        Ok(())
    }

    /// Publish `{triggerAction, availableActions}` on `window[name]`.
    #[wasm_bindgen(js_name = installGlobalControls)]
    pub fn install_global_controls(&self, name: Option<String>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let controls = js_sys::Object::new();

        let inner = self.inner.clone();
        let trigger_fn = Closure::<dyn FnMut(String, JsValue) -> bool>::new(
            move |name: String, payload: JsValue| trigger(&inner, &name, &payload),
        );
        js_sys::Reflect::set(&controls, &"triggerAction".into(), trigger_fn.as_ref())?;
        trigger_fn.forget();

        let inner = self.inner.clone();
        let actions_fn =
            Closure::<dyn FnMut() -> js_sys::Array>::new(move || actions_array(&inner));
        js_sys::Reflect::set(&controls, &"availableActions".into(), actions_fn.as_ref())?;
        actions_fn.forget();

        let name = name.unwrap_or_else(|| CONTROLS_GLOBAL.to_string());
        js_sys::Reflect::set(&window, &name.into(), &controls)?;
        Ok(())
    }

    /// Column-major world matrix of the node called `name`.
    #[wasm_bindgen(js_name = nodeMatrix)]
    pub fn node_matrix(&self, name: &str) -> Option<Vec<f32>> {
        let configurator = self.inner.borrow();
        let scene = configurator.scene()?;
        let id = scene
            .find_by_name(&normalize_node_name(name))
            .or_else(|| scene.find_by_name(name))?;
        let matrix: [[f32; 4]; 4] = scene.world_transform(id)?.to_matrix().into();
        Some(matrix.iter().flatten().copied().collect())
    }

    /// Camera position followed by the orbit target.
    #[wasm_bindgen(js_name = cameraPose)]
    pub fn camera_pose(&self) -> Vec<f32> {
        let configurator = self.inner.borrow();
        let camera = &configurator.camera;
        vec![
            camera.position.x,
            camera.position.y,
            camera.position.z,
            camera.target.x,
            camera.target.y,
            camera.target.z,
        ]
    }

    #[wasm_bindgen(js_name = lightIntensity)]
    pub fn light_intensity(&self, name: &str) -> Option<f32> {
        self.inner.borrow().lights.light(name).map(|light| light.intensity)
    }

    /// Emissive intensity of the mesh called `name`.
    #[wasm_bindgen(js_name = emissiveIntensity)]
    pub fn emissive_intensity(&self, name: &str) -> Option<f32> {
        let configurator = self.inner.borrow();
        let scene = configurator.scene()?;
        let id = scene.find_by_name(&normalize_node_name(name))?;
        scene.material(id).map(|material| material.emissive_intensity)
    }
}

fn trigger(inner: &Rc<RefCell<Configurator>>, name: &str, payload: &JsValue) -> bool {
    let payload = match js_to_json(payload) {
        Value::Null => None,
        value => Some(value),
    };
    match inner.try_borrow_mut() {
        Ok(mut configurator) => configurator.trigger_action(name, payload),
        Err(_) => {
            log::warn!("Configurator busy, dropping action {}", name);
            false
        }
    }
}

fn actions_array(inner: &Rc<RefCell<Configurator>>) -> js_sys::Array {
    inner
        .borrow()
        .available_actions()
        .into_iter()
        .map(JsValue::from)
        .collect()
}
