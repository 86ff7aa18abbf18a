//! Engine data structures: scene graphs and instances.
//!
//! - `instance` holds per-node transformation data
//! - `scene_graph` enables hierarchical scene organization and materials

pub mod instance;
pub mod scene_graph;
