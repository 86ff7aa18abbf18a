//! Two-position slide for removable trays and boxes.
//!
//! Offsets are relative to the position the node had when it was
//! registered. A toggle issued while the part is still moving retargets
//! the motion from wherever the part currently is.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    animation::{Axis, easing::Ease, tween::Tween},
    data_structures::scene_graph::{NodeId, SceneGraph},
    error::{Error, Result},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertionState {
    #[default]
    Inserted,
    Ejected,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Motion {
    pub duration: f32,
    pub delay: f32,
    pub ease: Ease,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            duration: 1.4,
            delay: 0.0,
            ease: Ease::Power1InOut,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InsertionParams {
    pub axis: Axis,
    pub inserted_offset: f32,
    pub ejected_offset: f32,
    pub eject: Motion,
    pub insert: Motion,
}

#[derive(Clone, Debug)]
struct Track {
    node: NodeId,
    rest: f32,
    params: InsertionParams,
    inserted: bool,
    tween: Option<Tween<f32>>,
}

#[derive(Debug, Default)]
pub struct TransformAnimator {
    tracks: HashMap<String, Track>,
}

impl TransformAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `part`. The part begins inserted.
    pub fn register(&mut self, scene: &SceneGraph, part: &str, node: NodeId, params: InsertionParams) {
        let rest = scene
            .node(node)
            .map(|n| n.local.axis_offset(params.axis))
            .unwrap_or_default()
            - params.inserted_offset;
        self.tracks.insert(
            part.to_string(),
            Track {
                node,
                rest,
                params,
                inserted: true,
                tween: None,
            },
        );
    }

    /// Slide `part` to its other position and return the state it is heading to.
    pub fn toggle_insertion(&mut self, scene: &SceneGraph, part: &str) -> Result<InsertionState> {
        let track = self
            .tracks
            .get_mut(part)
            .ok_or_else(|| Error::UnknownPart(part.to_string()))?;
        let current = scene
            .node(track.node)
            .map(|n| n.local.axis_offset(track.params.axis))
            .ok_or_else(|| Error::UnknownPart(part.to_string()))?;
        let (offset, motion, next) = if track.inserted {
            (track.params.ejected_offset, track.params.eject, InsertionState::Ejected)
        } else {
            (track.params.inserted_offset, track.params.insert, InsertionState::Inserted)
        };
        if let Some(mut previous) = track.tween.take() {
            log::debug!("{} retargeted while moving", part);
            previous.kill();
        }
        track.tween = Some(
            Tween::new(current, track.rest + offset, motion.duration, motion.ease)
                .with_delay(motion.delay),
        );
        track.inserted = next == InsertionState::Inserted;
        Ok(next)
    }

    pub fn update(&mut self, dt: f32, scene: &mut SceneGraph) {
        for track in self.tracks.values_mut() {
            let Some(tween) = track.tween.as_mut() else {
                continue;
            };
            let value = tween.advance(dt);
            if tween.progress() > 0.0 {
                if let Some(node) = scene.node_mut(track.node) {
                    node.local.set_axis_offset(track.params.axis, value);
                }
            }
            if tween.is_finished() {
                track.tween = None;
            }
        }
    }

    pub fn state(&self, part: &str) -> Option<InsertionState> {
        self.tracks.get(part).map(|track| {
            if track.inserted {
                InsertionState::Inserted
            } else {
                InsertionState::Ejected
            }
        })
    }

    pub fn is_moving(&self, part: &str) -> bool {
        self.tracks
            .get(part)
            .is_some_and(|track| track.tween.is_some())
    }
}
