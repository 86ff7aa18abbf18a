//! Part registry: logical part names → scene node handles.

use std::collections::BTreeMap;

use crate::{
    animation::{insertion::InsertionState, spin::SpinState},
    config::PartBinding,
    data_structures::scene_graph::{NodeId, SceneGraph},
    error::{Error, Result},
};

/// Node names coming out of the glTF pipeline have their spaces replaced by
/// underscores, so lookups must use the same spelling.
pub fn normalize_node_name(name: &str) -> String {
    name.replace(' ', "_")
}

#[derive(Clone, Debug, PartialEq)]
pub struct Part {
    pub name: String,
    pub node: NodeId,
    pub spin: SpinState,
    /// Only set for trays and boxes that can be pulled out.
    pub insertion: Option<InsertionState>,
}

#[derive(Clone, Debug, Default)]
pub struct PartRegistry {
    parts: BTreeMap<String, Part>,
}

impl PartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every binding against `scene`. Bindings whose node cannot be
    /// found are skipped and returned as errors.
    pub fn bind(scene: &SceneGraph, bindings: &[PartBinding]) -> (Self, Vec<Error>) {
        let mut registry = Self::new();
        let mut missing = Vec::new();
        for binding in bindings {
            let normalized = normalize_node_name(&binding.node);
            let node = scene
                .find_by_name(&normalized)
                .or_else(|| scene.find_by_name(&binding.node));
            match node {
                Some(node) => {
                    registry.insert(&binding.name, node);
                }
                None => missing.push(Error::MissingNode {
                    part: binding.name.clone(),
                    node: normalized,
                }),
            }
        }
        (registry, missing)
    }

    pub fn insert(&mut self, name: &str, node: NodeId) -> &mut Part {
        self.parts.entry(name.to_string()).or_insert_with(|| Part {
            name: name.to_string(),
            node,
            spin: SpinState::Idle,
            insertion: None,
        })
    }

    pub fn get(&self, name: &str) -> Option<&Part> {
        self.parts.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Part> {
        self.parts.get_mut(name)
    }

    pub fn node(&self, name: &str) -> Result<NodeId> {
        self.parts
            .get(name)
            .map(|part| part.node)
            .ok_or_else(|| Error::UnknownPart(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Part> {
        self.parts.values()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}
