//! flow-configurator
//!
//! Animation and toggle state coordinator for interactive 3D product
//! configurators. A loaded model exposes a handful of movable parts; users
//! toggle them through UI buttons or inbound messages and the coordinator
//! spins, slides and highlights them while choreographing the camera. The
//! crate is renderer-agnostic: a renderer reads transforms, materials,
//! lights and the camera pose back out of the session every frame.
//!
//! High-level modules
//! - `animation`: easing, tweens and the per-concern controllers
//! - `config`: serde-backed product configuration with stock defaults
//! - `context`: the `Configurator` session that owns all state
//! - `data_structures`: scene graph and node transforms
//! - `flow`: command queue, action dispatch and frame timing
//! - `message`: inbound message decoding
//! - `registry`: logical part names to scene nodes
//! - `resources`: glTF and config loading
//! - `ui`: UI surface abstraction and button state reflection
//!

pub mod animation;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod error;
pub mod flow;
pub mod message;
pub mod registry;
pub mod resources;
pub mod ui;
#[cfg(target_arch = "wasm32")]
pub mod web;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use context::Configurator;
pub use error::{Error, Result};
pub use instant::Duration;

/// Install the platform logger. Safe to call more than once.
pub fn init_logging() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Could not initialize logger: {}", e).into());
        }
    }
}
