//! Product configuration.
//!
//! Everything that differs between products lives here: which glTF nodes
//! are parts, which actions exist and what they do, camera presets and the
//! light rig. `ConfiguratorConfig::default()` describes the stock robot
//! vacuum; a JSON document only needs to list the fields it overrides.

use serde::{Deserialize, Serialize};

use crate::animation::{
    Axis,
    easing::Ease,
    glow::GlowParams,
    insertion::{InsertionParams, Motion},
    spin::SpinParams,
};

/// Message `type` tag accepted on the inbound channel.
pub const MODEL_ACTION: &str = "MODEL_ACTION";

/// Convert `0xRRGGBB` to RGB in `[0, 1]`.
pub const fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfiguratorConfig {
    pub model: ModelConfig,
    pub camera: CameraConfig,
    pub glow: GlowConfig,
    /// Easing of the spin-up / spin-down velocity ramps.
    pub spin_ease: Ease,
    pub lights: Vec<LightConfig>,
    pub parts: Vec<PartBinding>,
    pub actions: Vec<ActionConfig>,
    /// Structured inbound messages must carry this `type` (or none at all).
    pub message_type: String,
}

impl ConfiguratorConfig {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn action(&self, name: &str) -> Option<&ActionConfig> {
        self.actions.iter().find(|action| action.name() == name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub path: String,
    /// Uniform scale applied to the model root (1.0 = as authored).
    pub scale: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: "glb/robot/test-spoot.glb".to_string(),
            scale: 0.06,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub start_position: [f32; 3],
    /// Where the opening fly-in ends and where an overhead camera is sent back to.
    pub default_view: [f32; 3],
    /// Camera heights above this count as looking down onto the model.
    pub overhead_threshold: f32,
    pub reposition_duration: f32,
    pub reset_target_duration: f32,
    pub opening_duration: f32,
    pub opening_ease: Ease,
    pub ease: Ease,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: [0.0, 5.0, 1.5],
            default_view: [0.0, -1.5, 1.75],
            overhead_threshold: 0.1,
            reposition_duration: 1.5,
            reset_target_duration: 1.5,
            opening_duration: 3.0,
            opening_ease: Ease::Power2InOut,
            ease: Ease::Power1InOut,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlowConfig {
    pub peak_intensity: f32,
    pub duration: f32,
    pub ease: Ease,
}

impl Default for GlowConfig {
    fn default() -> Self {
        let params = GlowParams::default();
        Self {
            peak_intensity: params.peak_intensity,
            duration: params.duration,
            ease: params.ease,
        }
    }
}

impl From<GlowConfig> for GlowParams {
    fn from(config: GlowConfig) -> Self {
        GlowParams {
            peak_intensity: config.peak_intensity,
            duration: config.duration,
            ease: config.ease,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightConfig {
    pub name: String,
    pub color: [f32; 3],
    pub intensity: f32,
    #[serde(default)]
    pub opening: Option<LightFade>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightFade {
    pub intensity: f32,
    pub duration: f32,
    #[serde(default)]
    pub delay: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartBinding {
    /// Logical part name used by actions.
    pub name: String,
    /// Node name as authored; spaces are normalized on lookup.
    pub node: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionConfig {
    Spin(SpinAction),
    Insertion(InsertionAction),
}

impl ActionConfig {
    pub fn name(&self) -> &str {
        match self {
            ActionConfig::Spin(action) => &action.name,
            ActionConfig::Insertion(action) => &action.name,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpinAction {
    pub name: String,
    pub parts: Vec<SpinPart>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinPart {
    pub part: String,
    pub axis: Axis,
    pub direction: f32,
    pub accel_time: f32,
    pub decel_time: f32,
    pub target_speed: f32,
}

impl Default for SpinPart {
    fn default() -> Self {
        let params = SpinParams::default();
        Self {
            part: String::new(),
            axis: params.axis,
            direction: params.direction,
            accel_time: params.accel_time,
            decel_time: params.decel_time,
            target_speed: params.target_speed,
        }
    }
}

impl SpinPart {
    pub fn params(&self) -> SpinParams {
        SpinParams {
            axis: self.axis,
            direction: self.direction,
            accel_time: self.accel_time,
            decel_time: self.decel_time,
            target_speed: self.target_speed,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InsertionAction {
    pub name: String,
    pub part: String,
    pub axis: Axis,
    #[serde(default)]
    pub inserted_offset: f32,
    pub ejected_offset: f32,
    #[serde(default)]
    pub eject: Motion,
    #[serde(default)]
    pub insert: Motion,
    pub eject_camera: CameraShot,
    pub insert_camera: CameraShot,
}

impl InsertionAction {
    pub fn params(&self) -> InsertionParams {
        InsertionParams {
            axis: self.axis,
            inserted_offset: self.inserted_offset,
            ejected_offset: self.ejected_offset,
            eject: self.eject,
            insert: self.insert,
        }
    }
}

/// A camera framing. Without `target` the orbit target returns to the origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraShot {
    pub position: [f32; 3],
    #[serde(default)]
    pub target: Option<[f32; 3]>,
    pub duration: f32,
}

impl Default for ConfiguratorConfig {
    fn default() -> Self {
        let ambient = 0.2;
        let atmospheric = 0.8;
        let lights = vec![
            light("key", rgb(0xffffff), 0.0, Some((2.0, 0.0))),
            light("fill", rgb(0xffffff), 0.0, Some((0.5, 0.2))),
            light("rim", rgb(0xffffff), 0.0, Some((1.0, 0.4))),
            light("ambient", rgb(0x444444), ambient, Some((ambient, 0.6))),
            light("hemisphere", rgb(0xffffff), 0.6, None),
            light("top", rgb(0xffffff), atmospheric * 10.0, None),
            light("bottom", rgb(0xffffff), atmospheric * 6.0, None),
            light("left", rgb(0xffffff), atmospheric, None),
            light("right", rgb(0xffffff), atmospheric, None),
            light("front", rgb(0xffffff), atmospheric, None),
            light("back", rgb(0xffffff), atmospheric * 0.7, None),
        ];

        let parts = [
            ("sideCleanerA", "rotor brush null A"),
            ("sideCleanerB", "rotor brush null B"),
            ("wetRoller", "SB-430273_AA - WET ROLLER ASSY_43089"),
            ("dustBox", "SB-430272_AA - DUST BOX ASSY"),
            ("tractionWheelA", "SB-430287_AA - TRACTION WHEEL ASSY_30408"),
            ("tractionWheelB", "SB-430287_AA - TRACTION WHEEL ASSY_38412"),
            ("wetRollerTray", "SB-430273_AA - WET ROLLER ASSY_37478"),
            ("brushBar", "SB-430275_AA - BRUSHBAR ASSY_22072"),
            ("frontWheel", "SB-430279_AA - FRONT WHEEL ASSY_5505"),
            ("tractionWheelC", "SB-430287_AA - TRACTION WHEEL ASSY_41617"),
        ]
        .into_iter()
        .map(|(name, node)| PartBinding {
            name: name.to_string(),
            node: node.to_string(),
        })
        .collect();

        let spin = |part: &str, axis: Axis| SpinPart {
            part: part.to_string(),
            axis,
            ..Default::default()
        };
        let side_cleaners = SpinAction {
            name: "sideCleanerButton".to_string(),
            parts: vec![
                spin("sideCleanerA", Axis::Y),
                SpinPart {
                    direction: -1.0,
                    ..spin("sideCleanerB", Axis::Y)
                },
            ],
        };
        let brush_bar = SpinAction {
            name: "brushBarButton".to_string(),
            parts: vec![spin("brushBar", Axis::X)],
        };
        let wet_roller = SpinAction {
            name: "wetRollerButton".to_string(),
            parts: vec![SpinPart {
                direction: -1.0,
                accel_time: 0.75,
                decel_time: 0.75,
                target_speed: 1.5,
                ..spin("wetRoller", Axis::X)
            }],
        };
        let wheel = |part: &str| SpinPart {
            target_speed: 3.0,
            ..spin(part, Axis::X)
        };
        let wheels = SpinAction {
            name: "wheelsButton".to_string(),
            parts: vec![wheel("tractionWheelA"), wheel("tractionWheelB")],
        };

        let parked = CameraShot {
            position: [-6.0, 3.0, 1.0],
            target: None,
            duration: 1.75,
        };
        let dust_box = InsertionAction {
            name: "dustBox".to_string(),
            part: "dustBox".to_string(),
            axis: Axis::Z,
            inserted_offset: 0.0,
            ejected_offset: -300.0,
            eject: Motion {
                duration: 1.4,
                delay: 0.5,
                ease: Ease::Power1InOut,
            },
            insert: Motion {
                duration: 1.75,
                delay: 0.0,
                ease: Ease::Power1InOut,
            },
            eject_camera: CameraShot {
                position: [-3.0, 3.0, 1.0],
                target: Some([0.0, 0.2, 0.0]),
                duration: 1.5,
            },
            insert_camera: parked,
        };
        let wet_roller_tray = InsertionAction {
            name: "wetRollerTray".to_string(),
            part: "wetRollerTray".to_string(),
            axis: Axis::X,
            inserted_offset: 0.0,
            ejected_offset: 400.0,
            eject: Motion {
                duration: 1.4,
                delay: 0.0,
                ease: Ease::Power1InOut,
            },
            insert: Motion {
                duration: 1.2,
                delay: 0.0,
                ease: Ease::Power1InOut,
            },
            eject_camera: CameraShot {
                position: [-0.4, 4.0, 1.4],
                target: Some([-0.4, -0.25, -0.1]),
                duration: 1.5,
            },
            insert_camera: CameraShot {
                duration: 1.2,
                ..parked
            },
        };

        Self {
            model: ModelConfig::default(),
            camera: CameraConfig::default(),
            glow: GlowConfig::default(),
            spin_ease: Ease::Power1InOut,
            lights,
            parts,
            actions: vec![
                ActionConfig::Spin(side_cleaners),
                ActionConfig::Spin(wheels),
                ActionConfig::Spin(wet_roller),
                ActionConfig::Spin(brush_bar),
                ActionConfig::Insertion(dust_box),
                ActionConfig::Insertion(wet_roller_tray),
            ],
            message_type: MODEL_ACTION.to_string(),
        }
    }
}

fn light(name: &str, color: [f32; 3], intensity: f32, opening: Option<(f32, f32)>) -> LightConfig {
    LightConfig {
        name: name.to_string(),
        color,
        intensity,
        opening: opening.map(|(target, delay)| LightFade {
            intensity: target,
            duration: 1.0,
            delay,
        }),
    }
}
