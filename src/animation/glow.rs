//! Transient emissive highlight on every mesh below a part.

use std::collections::HashMap;

use crate::{
    animation::{easing::Ease, tween::Tween},
    data_structures::scene_graph::{NodeId, SceneGraph},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowParams {
    pub peak_intensity: f32,
    pub duration: f32,
    pub ease: Ease,
}

impl Default for GlowParams {
    fn default() -> Self {
        Self {
            peak_intensity: 5.0,
            duration: 0.8,
            ease: Ease::SineInOut,
        }
    }
}

/// Registry of glow tweens keyed by mesh node. A mesh has at most one entry.
#[derive(Debug, Default)]
pub struct GlowEffect {
    params: GlowParams,
    tweens: HashMap<NodeId, Tween<f32>>,
}

impl GlowEffect {
    pub fn new(params: GlowParams) -> Self {
        Self {
            params,
            tweens: HashMap::new(),
        }
    }

    /// Flash every mesh below `part` in its own diffuse color. Returns the
    /// number of meshes lit.
    pub fn animate_glow(&mut self, scene: &mut SceneGraph, part: NodeId) -> usize {
        let meshes = scene.mesh_descendants(part);
        for mesh in &meshes {
            if let Some(mut previous) = self.tweens.remove(mesh) {
                previous.kill();
            }
            let Some(material) = scene.material_mut_unique(*mesh) else {
                continue;
            };
            material.emissive = material.color;
            material.emissive_intensity = self.params.peak_intensity;
            let tween = Tween::new(
                self.params.peak_intensity,
                0.0,
                self.params.duration,
                self.params.ease,
            );
            self.tweens.insert(*mesh, tween);
        }
        meshes.len()
    }

    /// Cancel the glow below `part` and switch the emission off.
    pub fn stop_glow(&mut self, scene: &mut SceneGraph, part: NodeId) {
        for mesh in scene.mesh_descendants(part) {
            if let Some(mut tween) = self.tweens.remove(&mesh) {
                tween.kill();
                if let Some(material) = scene.material_mut(mesh) {
                    material.emissive_intensity = 0.0;
                }
            }
        }
    }

    /// Writes through the materials `animate_glow` made unique.
    pub fn update(&mut self, dt: f32, scene: &mut SceneGraph) {
        self.tweens.retain(|mesh, tween| {
            let intensity = tween.advance(dt);
            match scene.material_mut(*mesh) {
                Some(material) => material.emissive_intensity = intensity,
                None => return false,
            }
            !tween.is_finished()
        });
    }

    pub fn is_glowing(&self, mesh: NodeId) -> bool {
        self.tweens.contains_key(&mesh)
    }

    pub fn active_count(&self) -> usize {
        self.tweens.len()
    }
}
