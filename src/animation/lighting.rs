//! Named lights with animatable intensity.

use std::collections::{BTreeMap, HashMap};

use crate::{
    animation::{easing::Ease, tween::Tween},
    config::LightConfig,
};

#[derive(Clone, Debug, PartialEq)]
pub struct Light {
    pub color: [f32; 3],
    pub intensity: f32,
}

#[derive(Debug, Default)]
pub struct LightRig {
    lights: BTreeMap<String, Light>,
    fades: HashMap<String, Tween<f32>>,
    openings: Vec<LightConfig>,
}

impl LightRig {
    pub fn new(configs: &[LightConfig]) -> Self {
        let lights = configs
            .iter()
            .map(|config| {
                (
                    config.name.clone(),
                    Light {
                        color: config.color,
                        intensity: config.intensity,
                    },
                )
            })
            .collect();
        Self {
            lights,
            fades: HashMap::new(),
            openings: configs.to_vec(),
        }
    }

    pub fn light(&self, name: &str) -> Option<&Light> {
        self.lights.get(name)
    }

    pub fn light_mut(&mut self, name: &str) -> Option<&mut Light> {
        self.lights.get_mut(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.lights.keys().map(String::as_str)
    }

    /// Fade `name` to `intensity`, replacing any fade already running on it.
    pub fn fade_to(&mut self, name: &str, intensity: f32, duration: f32, delay: f32) -> bool {
        let Some(light) = self.lights.get(name) else {
            log::warn!("No light named {} in the rig", name);
            return false;
        };
        let tween =
            Tween::new(light.intensity, intensity, duration, Ease::Power1Out).with_delay(delay);
        self.fades.insert(name.to_string(), tween);
        true
    }

    /// Run every configured opening fade.
    pub fn play_opening(&mut self) {
        let openings: Vec<_> = self
            .openings
            .iter()
            .filter_map(|config| config.opening.map(|fade| (config.name.clone(), fade)))
            .collect();
        for (name, fade) in openings {
            self.fade_to(&name, fade.intensity, fade.duration, fade.delay);
        }
    }

    pub fn update(&mut self, dt: f32) {
        let lights = &mut self.lights;
        self.fades.retain(|name, tween| {
            let value = tween.advance(dt);
            let Some(light) = lights.get_mut(name) else {
                return false;
            };
            if tween.progress() > 0.0 {
                light.intensity = value;
            }
            !tween.is_finished()
        });
    }

    pub fn is_fading(&self) -> bool {
        !self.fades.is_empty()
    }
}
