//! End-to-end engine behaviour: discovery plus coherent replay.

use approx::assert_abs_diff_eq;

use beamline_core::scene::{ObjectKind, Scene};
use beamline_core::{Iris, OpticalElement, SimulationEngine};
use beamline_geometry::{Point3, Vec3};

/// Small grid keeps replay cheap without changing any semantics.
const TEST_SAMPLES: usize = 32;

fn add_source(scene: &mut Scene, position: Point3, orientation: Vec3) -> beamline_core::ObjectId {
    let id = scene.add(ObjectKind::Source, position, orientation);
    scene.source_mut(id).unwrap().set_samples(TEST_SAMPLES);
    id
}

#[test]
fn source_to_camera_accumulates_bounded_energy() {
    let mut scene = Scene::new();
    add_source(&mut scene, Point3::origin(), Vec3::z());
    let camera = scene.add(ObjectKind::Camera, Point3::new(0.0, 0.0, 0.5), Vec3::z());

    let engine = SimulationEngine::default();
    let paths = engine.discover_paths(&scene);
    assert_eq!(paths.len(), 1, "one source, one absorber: one path");

    let sensors = engine.run(&mut scene);
    assert_eq!(sensors, vec![camera]);

    let sensed = scene.element(camera).unwrap().sensed().unwrap();
    let energy = sensed.energy();
    assert!(energy > 0.0, "camera saw no light");
    assert!(
        energy <= 1.0 + 1e-9,
        "accumulated energy {energy} exceeds the unit emission"
    );
}

#[test]
fn iris_shadow_is_exact_on_the_camera() {
    let mut scene = Scene::new();
    add_source(&mut scene, Point3::origin(), Vec3::z());

    let hole_radius = 4e-3;
    let iris = Iris::new(Point3::new(0.0, 0.0, 0.2), Vec3::z(), hole_radius, 0.02);
    scene.insert_element(Box::new(iris));
    let camera = scene.add(ObjectKind::Camera, Point3::new(0.0, 0.0, 0.5), Vec3::z());

    SimulationEngine::default().run(&mut scene);

    let sensed = scene.element(camera).unwrap().sensed().unwrap();
    let intensity = sensed.intensity();
    let n = sensed.samples();
    for i in 0..n {
        for j in 0..n {
            let (x, y) = sensed.coords(i, j);
            if x * x + y * y > hole_radius * hole_radius {
                assert_abs_diff_eq!(intensity[[i, j]], 0.0, epsilon = 1e-18);
            }
        }
    }
}

#[test]
fn repeated_runs_are_idempotent() {
    let mut scene = Scene::new();
    add_source(&mut scene, Point3::origin(), Vec3::z());
    scene.add(ObjectKind::Iris, Point3::new(0.0, 0.0, 0.2), Vec3::z());
    let camera = scene.add(ObjectKind::Camera, Point3::new(0.0, 0.0, 0.5), Vec3::z());

    let engine = SimulationEngine::default();
    engine.run(&mut scene);
    let first = scene.element(camera).unwrap().sensed().unwrap().clone();

    engine.run(&mut scene);
    let second = scene.element(camera).unwrap().sensed().unwrap();

    assert_eq!(first.samples(), second.samples());
    for (a, b) in first.ex.iter().zip(second.ex.iter()) {
        assert_eq!(a, b, "accumulators diverged between runs");
    }
    for (a, b) in first.ey.iter().zip(second.ey.iter()) {
        assert_eq!(a, b);
    }
}

#[test]
fn mirror_folds_the_beam_onto_an_off_axis_camera() {
    let mut scene = Scene::new();
    add_source(&mut scene, Point3::origin(), Vec3::z());
    // 45° fold mirror sends +z light to +x
    let normal = Vec3::new(-1.0, 0.0, 1.0);
    scene.add(ObjectKind::Mirror, Point3::new(0.0, 0.0, 0.3), normal);
    let camera = scene.add(ObjectKind::Camera, Point3::new(0.3, 0.0, 0.3), Vec3::x());

    let engine = SimulationEngine::default();
    let paths = engine.discover_paths(&scene);
    assert_eq!(paths.len(), 1);
    assert_eq!(paths.iter().next().unwrap().elements.len(), 2);

    engine.run(&mut scene);
    let sensed = scene.element(camera).unwrap().sensed().unwrap();
    assert!(sensed.energy() > 0.0);
    // the accumulated field's axis arrived travelling along +x
    assert_abs_diff_eq!(sensed.axis().direction().x, 1.0, epsilon = 1e-9);
}

#[test]
fn two_sources_superpose_on_one_camera() {
    let mut scene = Scene::new();
    add_source(&mut scene, Point3::origin(), Vec3::z());
    add_source(&mut scene, Point3::new(0.0, 0.0, 0.1), Vec3::z());
    let camera = scene.add(ObjectKind::Camera, Point3::new(0.0, 0.0, 0.5), Vec3::z());

    SimulationEngine::default().run(&mut scene);
    let sensed = scene.element(camera).unwrap().sensed().unwrap();
    // coherent sum of two unit-energy beams: bounded by 4, positive
    let energy = sensed.energy();
    assert!(energy > 0.0);
    assert!(energy <= 4.0 + 1e-9);
}

#[test]
fn sensors_cleared_when_sources_removed() {
    let mut scene = Scene::new();
    let source = add_source(&mut scene, Point3::origin(), Vec3::z());
    let camera = scene.add(ObjectKind::Camera, Point3::new(0.0, 0.0, 0.5), Vec3::z());

    let engine = SimulationEngine::default();
    engine.run(&mut scene);
    assert!(scene.element(camera).unwrap().sensed().is_some());

    scene.remove(source);
    let sensors = engine.run(&mut scene);
    assert_eq!(sensors, vec![camera]);
    assert!(
        scene.element(camera).unwrap().sensed().is_none(),
        "a run without sources must leave sensors cleared"
    );
}
