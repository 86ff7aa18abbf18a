//! Loading scenes and configuration from external files.
//!
//! glTF documents are read for their node hierarchy, node transforms and
//! material base colors only. Geometry stays with the renderer.

use std::collections::HashMap;

use anyhow::Context as _;

use crate::{
    config::ConfiguratorConfig,
    data_structures::{
        instance::Instance,
        scene_graph::{Material, NodeId, SceneGraph},
    },
};

/// Name of the synthetic node that carries the model scale.
pub const MODEL_ROOT: &str = "model_root";

pub fn load_binary(file_name: &str) -> anyhow::Result<Vec<u8>> {
    let path = std::path::Path::new(file_name);
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

pub fn load_config(file_name: &str) -> anyhow::Result<ConfiguratorConfig> {
    let bytes = load_binary(file_name)?;
    let text = String::from_utf8(bytes)?;
    ConfiguratorConfig::from_json(&text).with_context(|| format!("invalid config {}", file_name))
}

pub fn load_scene_gltf(file_name: &str, scale: f32) -> anyhow::Result<SceneGraph> {
    let bytes = load_binary(file_name)?;
    scene_from_gltf_slice(&bytes, scale).with_context(|| format!("invalid glTF {}", file_name))
}

/// Build a scene graph from `.gltf` or `.glb` bytes. All scene roots are
/// parented under one [`MODEL_ROOT`] node scaled by `scale`.
pub fn scene_from_gltf_slice(bytes: &[u8], scale: f32) -> anyhow::Result<SceneGraph> {
    let gltf = gltf::Gltf::from_slice(bytes)?;
    let mut scene = SceneGraph::new();

    let materials: HashMap<usize, usize> = gltf
        .materials()
        .filter_map(|material| {
            let index = material.index()?;
            let [r, g, b, _] = material.pbr_metallic_roughness().base_color_factor();
            let added = scene.add_material(Material {
                name: material.name().map(str::to_string),
                color: [r, g, b],
                emissive: material.emissive_factor(),
                emissive_intensity: 0.0,
            });
            Some((index, added))
        })
        .collect();
    let mut default_material = None;

    let root = scene.add_node(
        None,
        MODEL_ROOT,
        Instance {
            scale: [scale; 3].into(),
            ..Default::default()
        },
    );
    let Some(gltf_scene) = gltf.default_scene().or_else(|| gltf.scenes().next()) else {
        log::warn!("glTF document contains no scene");
        return Ok(scene);
    };
    for node in gltf_scene.nodes() {
        add_gltf_node(&mut scene, root, node, &materials, &mut default_material);
    }
    Ok(scene)
}

fn add_gltf_node(
    scene: &mut SceneGraph,
    parent: NodeId,
    node: gltf::Node,
    materials: &HashMap<usize, usize>,
    default_material: &mut Option<usize>,
) {
    let (translation, rotation, scale) = node.transform().decomposed();
    let local = Instance {
        position: translation.into(),
        rotation: rotation.into(),
        scale: scale.into(),
    };
    let name = node.name().unwrap_or_default();
    let material = node.mesh().map(|mesh| {
        let index = mesh
            .primitives()
            .filter_map(|primitive| primitive.material().index())
            .next()
            .and_then(|index| materials.get(&index).copied());
        match index {
            Some(index) => index,
            None => *default_material.get_or_insert_with(|| scene.add_material(Material::default())),
        }
    });
    let id = match material {
        Some(material) => scene.add_mesh(Some(parent), name, local, material),
        None => scene.add_node(Some(parent), name, local),
    };
    for child in node.children() {
        add_gltf_node(scene, id, child, materials, default_material);
    }
}
