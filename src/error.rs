//! Error types for the coordinator.
//!
//! Loading paths (files, glTF, config JSON) return `anyhow::Result`; the
//! errors below are the domain failures of running an action.

use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No scene has been attached yet, so there is nothing to animate.
    NotReady,
    /// The action name has no handler.
    UnknownAction(String),
    /// The action refers to a part that is not in the registry.
    UnknownPart(String),
    /// A part binding points at a node that does not exist in the scene.
    MissingNode {
        part: String,
        node: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotReady => write!(f, "model is not loaded yet"),
            Error::UnknownAction(name) => write!(f, "no handler found for action \"{name}\""),
            Error::UnknownPart(name) => write!(f, "unknown part \"{name}\""),
            Error::MissingNode { part, node } => {
                write!(f, "part \"{part}\" is bound to missing node \"{node}\"")
            }
        }
    }
}

impl std::error::Error for Error {}
