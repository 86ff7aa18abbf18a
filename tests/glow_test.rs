use flow_configurator::{
    animation::glow::{GlowEffect, GlowParams},
    data_structures::{
        instance::Instance,
        scene_graph::{Material, NodeId, SceneGraph},
    },
};

struct Fixture {
    scene: SceneGraph,
    part: NodeId,
    meshes: [NodeId; 2],
    bystander: NodeId,
}

/// A part with two meshes sharing a material that a third, unrelated mesh
/// also uses.
fn fixture() -> Fixture {
    let mut scene = SceneGraph::new();
    let shared = scene.add_material(Material {
        color: [0.5, 0.25, 1.0],
        ..Default::default()
    });
    let part = scene.add_node(None, "part", Instance::default());
    let group = scene.add_node(Some(part), "group", Instance::default());
    let a = scene.add_mesh(Some(part), "a", Instance::default(), shared);
    let b = scene.add_mesh(Some(group), "b", Instance::default(), shared);
    let bystander = scene.add_mesh(None, "bystander", Instance::default(), shared);
    Fixture {
        scene,
        part,
        meshes: [a, b],
        bystander,
    }
}

fn intensity(scene: &SceneGraph, mesh: NodeId) -> f32 {
    scene
        .material(mesh)
        .map(|m| m.emissive_intensity)
        .unwrap_or(f32::NAN)
}

#[test]
fn glow_lights_every_mesh_below_the_part() {
    let Fixture {
        mut scene,
        part,
        meshes,
        bystander,
    } = fixture();
    let mut glow = GlowEffect::new(GlowParams::default());

    let lit = glow.animate_glow(&mut scene, part);
    assert_eq!(lit, 2);
    for mesh in meshes {
        assert!(glow.is_glowing(mesh));
        assert_eq!(intensity(&scene, mesh), 5.0);
        // emission takes the mesh's own diffuse color
        let emissive = scene.material(mesh).map(|m| m.emissive);
        assert_eq!(emissive, Some([0.5, 0.25, 1.0]));
    }
    // the shared material was copied, not edited in place
    assert_eq!(intensity(&scene, bystander), 0.0);
    assert!(!glow.is_glowing(bystander));
    let indices: Vec<_> = meshes
        .iter()
        .map(|m| scene.node(*m).and_then(|n| n.material_index()))
        .collect();
    assert_ne!(indices[0], indices[1]);
}

#[test]
fn glow_fades_out_and_forgets_finished_tweens() {
    let Fixture {
        mut scene,
        part,
        meshes,
        ..
    } = fixture();
    let mut glow = GlowEffect::new(GlowParams::default());
    glow.animate_glow(&mut scene, part);

    glow.update(0.4, &mut scene);
    let halfway = intensity(&scene, meshes[0]);
    assert!(halfway > 0.0 && halfway < 5.0);

    glow.update(0.5, &mut scene);
    assert_eq!(glow.active_count(), 0);
    for mesh in meshes {
        assert_eq!(intensity(&scene, mesh), 0.0);
    }
}

#[test]
fn retriggering_replaces_the_running_glow() {
    let Fixture {
        mut scene, part, ..
    } = fixture();
    let mut glow = GlowEffect::new(GlowParams::default());
    glow.animate_glow(&mut scene, part);
    glow.update(0.6, &mut scene);
    let materials_before = scene.materials().len();

    glow.animate_glow(&mut scene, part);
    assert_eq!(glow.active_count(), 2);
    // each mesh already owns its material now
    assert_eq!(scene.materials().len(), materials_before);

    // the restarted flash runs its full length from the peak again
    glow.update(0.6, &mut scene);
    assert_eq!(glow.active_count(), 2);
    glow.update(0.3, &mut scene);
    assert_eq!(glow.active_count(), 0);
}

#[test]
fn frames_write_through_without_copying() {
    let Fixture {
        mut scene,
        part,
        meshes,
        bystander,
    } = fixture();
    let mut glow = GlowEffect::new(GlowParams::default());
    glow.animate_glow(&mut scene, part);
    let materials = scene.materials().len();
    let owned: Vec<_> = meshes
        .iter()
        .map(|m| scene.node(*m).and_then(|n| n.material_index()))
        .collect();

    for _ in 0..30 {
        glow.update(1.0 / 60.0, &mut scene);
    }
    assert_eq!(scene.materials().len(), materials);
    let after: Vec<_> = meshes
        .iter()
        .map(|m| scene.node(*m).and_then(|n| n.material_index()))
        .collect();
    assert_eq!(after, owned);
    assert_eq!(intensity(&scene, bystander), 0.0);
}

#[test]
fn stop_glow_switches_emission_off() {
    let Fixture {
        mut scene,
        part,
        meshes,
        ..
    } = fixture();
    let mut glow = GlowEffect::new(GlowParams::default());
    glow.animate_glow(&mut scene, part);
    glow.stop_glow(&mut scene, part);

    assert_eq!(glow.active_count(), 0);
    for mesh in meshes {
        assert_eq!(intensity(&scene, mesh), 0.0);
    }
}

#[test]
fn part_without_meshes_lights_nothing() {
    let mut scene = SceneGraph::new();
    let empty = scene.add_node(None, "empty", Instance::default());
    let mut glow = GlowEffect::new(GlowParams::default());
    assert_eq!(glow.animate_glow(&mut scene, empty), 0);
    assert_eq!(glow.active_count(), 0);
}
