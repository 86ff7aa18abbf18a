use std::f32::consts::TAU;

use flow_configurator::{
    animation::{
        Axis,
        easing::Ease,
        spin::{SpinController, SpinParams, SpinState},
    },
    data_structures::{
        instance::Instance,
        scene_graph::{NodeId, SceneGraph},
    },
};

fn rotor_scene() -> (SceneGraph, NodeId) {
    let mut scene = SceneGraph::new();
    let rotor = scene.add_node(None, "rotor", Instance::default());
    (scene, rotor)
}

/// Advance `seconds` at 60 fps and collect every reported transition.
fn run(
    controller: &mut SpinController,
    scene: &mut SceneGraph,
    seconds: f32,
) -> Vec<(String, String, SpinState)> {
    let mut seen = Vec::new();
    let frames = (seconds * 60.0).ceil() as u32 + 2;
    for _ in 0..frames {
        controller.update(1.0 / 60.0, scene, &mut |part, action, state| {
            seen.push((part.to_string(), action.to_string(), state))
        });
    }
    seen
}

fn params() -> SpinParams {
    SpinParams {
        axis: Axis::Y,
        direction: -1.0,
        accel_time: 0.5,
        decel_time: 0.5,
        target_speed: 2.0,
    }
}

#[test]
fn idle_part_spins_up_to_target_speed() {
    let (mut scene, rotor) = rotor_scene();
    let mut controller = SpinController::new(Ease::Power1InOut);
    let mut reported = Vec::new();

    let state = controller.toggle_spin("rotor", rotor, "rotorButton", params(), &mut |_, a, s| {
        reported.push((a.to_string(), s))
    });
    assert_eq!(state, SpinState::Spinning);
    assert_eq!(reported, vec![("rotorButton".to_string(), SpinState::Spinning)]);

    let transitions = run(&mut controller, &mut scene, 0.5);
    assert!(transitions.is_empty());
    let velocity = controller.timeline("rotor").map(|t| t.velocity()).unwrap_or_default();
    assert!((velocity - (-2.0 * TAU)).abs() < 1e-3);
    assert_ne!(scene.node(rotor).map(|n| n.local.rotation), Some(Instance::default().rotation));
}

#[test]
fn spinning_part_comes_to_rest_and_reports_idle() {
    let (mut scene, rotor) = rotor_scene();
    let mut controller = SpinController::new(Ease::Power1InOut);
    controller.toggle_spin("rotor", rotor, "rotorButton", params(), &mut |_, _, _| ());
    run(&mut controller, &mut scene, 0.5);

    let state = controller.toggle_spin("rotor", rotor, "rotorButton", params(), &mut |_, _, _| ());
    assert_eq!(state, SpinState::Decelerating);
    assert_eq!(controller.state("rotor"), SpinState::Decelerating);

    let transitions = run(&mut controller, &mut scene, 0.5);
    assert_eq!(
        transitions,
        vec![("rotor".to_string(), "rotorButton".to_string(), SpinState::Idle)]
    );
    assert_eq!(controller.state("rotor"), SpinState::Idle);
    assert_eq!(controller.active_count(), 0);

    // a resting part no longer rotates
    let rest = scene.node(rotor).map(|n| n.local.rotation);
    run(&mut controller, &mut scene, 0.25);
    assert_eq!(scene.node(rotor).map(|n| n.local.rotation), rest);
}

#[test]
fn toggling_while_decelerating_spins_back_up_without_a_jump() {
    let (mut scene, rotor) = rotor_scene();
    let mut controller = SpinController::new(Ease::None);
    controller.toggle_spin("rotor", rotor, "rotorButton", params(), &mut |_, _, _| ());
    run(&mut controller, &mut scene, 0.5);
    controller.toggle_spin("rotor", rotor, "rotorButton", params(), &mut |_, _, _| ());
    for _ in 0..15 {
        controller.update(1.0 / 60.0, &mut scene, &mut |_, _, _| ());
    }
    let mid_ramp = controller.timeline("rotor").map(|t| t.velocity()).unwrap_or_default();
    assert!(mid_ramp < 0.0 && mid_ramp > -2.0 * TAU);

    let state = controller.toggle_spin("rotor", rotor, "rotorButton", params(), &mut |_, _, _| ());
    assert_eq!(state, SpinState::Spinning);
    // the new ramp starts where the old one stopped
    let resumed = controller.timeline("rotor").map(|t| t.velocity()).unwrap_or_default();
    assert_eq!(resumed, mid_ramp);

    // the cancelled deceleration never reports idle
    let transitions = run(&mut controller, &mut scene, 0.5);
    assert!(transitions.is_empty());
    assert_eq!(controller.state("rotor"), SpinState::Spinning);
}

#[test]
fn rapid_toggles_keep_one_timeline_per_part() {
    let (mut scene, rotor) = rotor_scene();
    let other = scene.add_node(None, "other", Instance::default());
    let mut controller = SpinController::new(Ease::Power1InOut);
    for _ in 0..7 {
        controller.toggle_spin("rotor", rotor, "rotorButton", params(), &mut |_, _, _| ());
        controller.update(1.0 / 60.0, &mut scene, &mut |_, _, _| ());
    }
    controller.toggle_spin("other", other, "otherButton", SpinParams::default(), &mut |_, _, _| ());

    assert_eq!(controller.active_count(), 2);
    // seven toggles end on a spin-up
    assert_eq!(controller.state("rotor"), SpinState::Spinning);
    assert_eq!(controller.state("never-toggled"), SpinState::Idle);
}

#[test]
fn spin_state_class_names() {
    let names: Vec<_> = SpinState::ALL.iter().map(|s| s.class_name()).collect();
    assert_eq!(names, vec!["idle", "spinning", "decelerating"]);
    assert_eq!(SpinState::Decelerating.to_string(), "decelerating");
}
