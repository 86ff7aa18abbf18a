//! Scene graph and hierarchical scene organization.
//!
//! A renderer-agnostic node tree. Nodes are stored in an arena and addressed
//! through [`NodeId`] handles that stay valid for the lifetime of the graph
//! (nodes are never removed). Mesh nodes reference a material by index so
//! several meshes may share one material until one of them needs its own.

use std::collections::HashMap;

use crate::data_structures::instance::Instance;

/// Opaque handle to a node of a [`SceneGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub name: Option<String>,
    /// Diffuse base color, linear RGB.
    pub color: [f32; 3],
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: None,
            color: [1.0, 1.0, 1.0],
            emissive: [0.0, 0.0, 0.0],
            emissive_intensity: 0.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    pub name: String,
    pub local: Instance,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    material: Option<usize>,
}

impl SceneNode {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_mesh(&self) -> bool {
        self.material.is_some()
    }

    pub fn material_index(&self) -> Option<usize> {
        self.material
    }
}

#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    materials: Vec<Material>,
    roots: Vec<NodeId>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_material(&mut self, material: Material) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    /// Add a node without geometry (a group or transform null).
    pub fn add_node(&mut self, parent: Option<NodeId>, name: &str, local: Instance) -> NodeId {
        self.insert(parent, name, local, None)
    }

    /// Add a renderable node drawn with material `material`.
    pub fn add_mesh(
        &mut self,
        parent: Option<NodeId>,
        name: &str,
        local: Instance,
        material: usize,
    ) -> NodeId {
        if material >= self.materials.len() {
            log::warn!(
                "Mesh {} references material {} but only {} materials exist. Using a default material.",
                name,
                material,
                self.materials.len()
            );
            let fallback = self.add_material(Material::default());
            return self.insert(parent, name, local, Some(fallback));
        }
        self.insert(parent, name, local, Some(material))
    }

    fn insert(
        &mut self,
        parent: Option<NodeId>,
        name: &str,
        local: Instance,
        material: Option<usize>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        // a dangling parent handle would make the node unreachable
        let parent = parent.filter(|p| p.0 < self.nodes.len());
        self.nodes.push(SceneNode {
            name: name.to_string(),
            local,
            parent,
            children: Vec::new(),
            material,
        });
        match parent {
            Some(p) => self.nodes[p.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.0)
    }

    /// First node (depth-first, in insertion order) whose name matches exactly.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            if node.name == name {
                return Some(id);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    /// `id` and every node below it, depth-first.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if self.node(id).is_none() {
            return out;
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.nodes[current.0].children.iter().rev());
        }
        out
    }

    pub fn mesh_descendants(&self, id: NodeId) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|child| self.nodes[child.0].is_mesh())
            .collect()
    }

    pub fn material(&self, id: NodeId) -> Option<&Material> {
        let index = self.node(id)?.material?;
        self.materials.get(index)
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Mutable access to the material of mesh `id` as it is, shared or not.
    pub fn material_mut(&mut self, id: NodeId) -> Option<&mut Material> {
        let index = self.node(id)?.material?;
        self.materials.get_mut(index)
    }

    /// Mutable access to the material of mesh `id`, cloning it first if any
    /// other mesh still shares it.
    pub fn material_mut_unique(&mut self, id: NodeId) -> Option<&mut Material> {
        let index = self.node(id)?.material?;
        let shared = self
            .nodes
            .iter()
            .enumerate()
            .any(|(other, node)| other != id.0 && node.material == Some(index));
        let index = if shared {
            let copy = self.materials[index].clone();
            let copy = self.add_material(copy);
            self.nodes[id.0].material = Some(copy);
            copy
        } else {
            index
        };
        self.materials.get_mut(index)
    }

    /// World transform of `id`, composed from the roots down.
    pub fn world_transform(&self, id: NodeId) -> Option<Instance> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id)?;
            chain.push(node_id);
            current = node.parent;
        }
        let world = chain
            .iter()
            .rev()
            .fold(Instance::default(), |parent, node_id| {
                &parent * &self.nodes[node_id.0].local
            });
        Some(world)
    }

    /// World transforms of all nodes, keyed by name. Unnamed nodes are skipped.
    pub fn world_transforms(&self) -> HashMap<String, Instance> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| !node.name.is_empty())
            .filter_map(|(index, node)| {
                self.world_transform(NodeId(index))
                    .map(|world| (node.name.clone(), world))
            })
            .collect()
    }
}
