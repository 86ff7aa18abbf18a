use flow_configurator::{
    animation::lighting::LightRig,
    config::{ConfiguratorConfig, LightConfig, LightFade},
};

fn rig() -> LightRig {
    LightRig::new(&[
        LightConfig {
            name: "key".to_string(),
            color: [1.0, 1.0, 1.0],
            intensity: 0.0,
            opening: Some(LightFade {
                intensity: 2.0,
                duration: 1.0,
                delay: 0.5,
            }),
        },
        LightConfig {
            name: "fill".to_string(),
            color: [1.0, 0.9, 0.8],
            intensity: 0.3,
            opening: None,
        },
    ])
}

#[test]
fn opening_fades_respect_their_delay() {
    let mut rig = rig();
    rig.play_opening();
    rig.update(0.4);
    assert_eq!(rig.light("key").map(|l| l.intensity), Some(0.0));

    rig.update(0.6);
    let partway = rig.light("key").map(|l| l.intensity).unwrap_or_default();
    assert!(partway > 1.0 && partway < 2.0);

    rig.update(0.5);
    assert_eq!(rig.light("key").map(|l| l.intensity), Some(2.0));
    assert_eq!(rig.light("fill").map(|l| l.intensity), Some(0.3));
    assert!(!rig.is_fading());
}

#[test]
fn fades_replace_each_other() {
    let mut rig = rig();
    assert!(rig.fade_to("fill", 1.0, 1.0, 0.0));
    rig.update(0.5);
    assert!(rig.fade_to("fill", 0.0, 0.5, 0.0));
    rig.update(0.5);
    assert_eq!(rig.light("fill").map(|l| l.intensity), Some(0.0));
    assert!(!rig.is_fading());
}

#[test]
fn unknown_lights_are_refused() {
    let mut rig = rig();
    assert!(!rig.fade_to("laser", 1.0, 1.0, 0.0));
    assert!(!rig.is_fading());
    if let Some(light) = rig.light_mut("fill") {
        light.intensity = 0.9;
    }
    assert_eq!(rig.light("fill").map(|l| l.intensity), Some(0.9));
}

#[test]
fn stock_rig_names() {
    let config = ConfiguratorConfig::default();
    let rig = LightRig::new(&config.lights);
    let names: Vec<_> = rig.names().collect();
    assert_eq!(names.len(), 11);
    assert!(names.contains(&"hemisphere"));
    assert_eq!(rig.light("ambient").map(|l| l.intensity), Some(0.2));
}
