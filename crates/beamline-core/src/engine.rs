//! The simulation engine: path discovery and coherent replay.
//!
//! A run has two sequential phases. Phase A launches a fixed number of
//! trial rays from every source and records which ordered element sequences
//! they traverse; structurally identical traversals collapse in a set, so
//! only topologically distinct [`Path`]s survive. Phase B replays each path
//! against a fresh copy of its source's wavefront, propagating and
//! interacting element by element until the field is absorbed or the path
//! stops matching.
//!
//! All element interactions are currently deterministic, so every trial
//! from a given source discovers the same path. The multi-trial structure
//! is retained deliberately: it is the discovery mechanism for elements
//! with probabilistic branching (e.g. a partially reflective mirror that
//! reflects or transmits per trial), which plug in without any engine
//! change.

use std::collections::BTreeSet;

use crate::scene::{ObjectId, Scene};

/// Trials launched per source during path discovery.
pub const DEFAULT_TRIALS: usize = 100;

/// An ordered element traversal from a specific source.
///
/// Equality and ordering are purely structural (source identity, then the
/// element sequence), so two trials that touch the same elements in the
/// same order are the same path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Path {
    pub source: ObjectId,
    pub elements: Vec<ObjectId>,
}

/// Orchestrates a two-phase simulation pass over a [`Scene`].
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    trials: usize,
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
        }
    }
}

impl SimulationEngine {
    pub fn new(trials: usize) -> Self {
        Self { trials }
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Run both phases and return the scene's sensors, whose accumulators
    /// now hold the arriving fields. An empty scene (or one without
    /// sources) yields cleared sensors and an empty path set, which is a
    /// valid result, not an error.
    pub fn run(&self, scene: &mut Scene) -> Vec<ObjectId> {
        let sources = scene.sources();
        let elements = scene.elements();

        // Phase B owns all accumulated state: start every run clean.
        for &id in &elements {
            if let Some(element) = scene.element_mut(id) {
                element.reset();
            }
        }

        if sources.is_empty() {
            log::info!("no source in the scene; sensors cleared");
            return scene.cameras();
        }
        log::info!(
            "simulation: {} source(s), {} element(s)",
            sources.len(),
            elements.len()
        );

        let paths = self.discover_paths(scene);
        log::info!("{} distinct path(s) discovered", paths.len());

        self.replay(scene, &paths);
        log::info!("replay complete");

        scene.cameras()
    }

    /// Phase A: trial-based discovery of topologically distinct paths.
    pub fn discover_paths(&self, scene: &Scene) -> BTreeSet<Path> {
        let elements = scene.elements();
        let mut paths = BTreeSet::new();

        for source_id in scene.sources() {
            let Some(source) = scene.source(source_id) else {
                continue;
            };

            for _ in 0..self.trials {
                let mut ray = source.launch_ray();
                let mut visited: BTreeSet<ObjectId> = BTreeSet::new();
                let mut sequence = Vec::new();

                while ray.is_alive() {
                    // Closest unvisited element; strict comparison keeps the
                    // first-considered element on ties.
                    let mut closest: Option<(ObjectId, f64)> = None;
                    for &element_id in &elements {
                        if visited.contains(&element_id) {
                            continue;
                        }
                        let Some(element) = scene.element(element_id) else {
                            continue;
                        };
                        if let Some(distance) = element.hit(&ray) {
                            if closest.map_or(true, |(_, best)| distance < best) {
                                closest = Some((element_id, distance));
                            }
                        }
                    }

                    match closest {
                        Some((element_id, distance)) => {
                            ray.advance(distance);
                            if let Some(element) = scene.element(element_id) {
                                element.interact_ray(&mut ray);
                            }
                            visited.insert(element_id);
                            sequence.push(element_id);
                        }
                        None => ray.kill(),
                    }
                }

                paths.insert(Path {
                    source: source_id,
                    elements: sequence,
                });
            }
        }

        paths
    }

    /// Phase B: replay every discovered path against a fresh emission.
    ///
    /// Sensor accumulation is additive, so the result is independent of the
    /// order paths are replayed in. A path whose hit test fails mid-replay
    /// (the scene changed since discovery) stops early and contributes
    /// nothing downstream.
    fn replay(&self, scene: &mut Scene, paths: &BTreeSet<Path>) {
        for path in paths {
            let Some(source) = scene.source(path.source) else {
                continue;
            };
            let mut field = source.emit();

            for &element_id in &path.elements {
                let Some(element) = scene.element(element_id) else {
                    break;
                };
                let Some(distance) = element.hit(field.axis()) else {
                    break;
                };
                field.propagate(distance);
                if let Some(element) = scene.element_mut(element_id) {
                    element.interact_wavefront(&mut field);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::ObjectKind;
    use beamline_geometry::{Point3, Vec3};

    fn shrink_source(scene: &mut Scene, id: ObjectId) {
        let source = scene.source_mut(id).unwrap();
        source.set_samples(16);
    }

    #[test]
    fn trials_collapse_to_one_path_per_source() {
        let mut scene = Scene::new();
        let source = scene.add(ObjectKind::Source, Point3::origin(), Vec3::z());
        let camera = scene.add(ObjectKind::Camera, Point3::new(0.0, 0.0, 0.5), Vec3::z());
        shrink_source(&mut scene, source);

        let engine = SimulationEngine::new(7);
        let paths = engine.discover_paths(&scene);
        assert_eq!(paths.len(), 1);
        let path = paths.iter().next().unwrap();
        assert_eq!(path.source, source);
        assert_eq!(path.elements, vec![camera]);
    }

    #[test]
    fn two_sources_discover_two_paths() {
        let mut scene = Scene::new();
        let a = scene.add(ObjectKind::Source, Point3::origin(), Vec3::z());
        let b = scene.add(ObjectKind::Source, Point3::new(0.0, 0.0, 1.0), Vec3::z());
        scene.add(ObjectKind::Camera, Point3::new(0.0, 0.0, 2.0), Vec3::z());
        shrink_source(&mut scene, a);
        shrink_source(&mut scene, b);

        let paths = SimulationEngine::new(3).discover_paths(&scene);
        // same element sequence, distinct sources: two structural paths
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn source_with_no_elements_yields_one_empty_path() {
        let mut scene = Scene::new();
        let source = scene.add(ObjectKind::Source, Point3::origin(), Vec3::z());
        shrink_source(&mut scene, source);

        let paths = SimulationEngine::new(5).discover_paths(&scene);
        assert_eq!(paths.len(), 1);
        assert!(paths.iter().next().unwrap().elements.is_empty());
    }

    #[test]
    fn visited_set_prevents_mirror_bounce_loops() {
        let mut scene = Scene::new();
        let source = scene.add(ObjectKind::Source, Point3::origin(), Vec3::z());
        // facing mirror pair: ahead of the source and behind it
        scene.add(ObjectKind::Mirror, Point3::new(0.0, 0.0, 0.5), Vec3::z());
        scene.add(ObjectKind::Mirror, Point3::new(0.0, 0.0, -0.5), Vec3::z());
        shrink_source(&mut scene, source);

        // terminates: each mirror is visited at most once per trial
        let paths = SimulationEngine::new(3).discover_paths(&scene);
        assert_eq!(paths.len(), 1);
        let path = paths.iter().next().unwrap();
        assert_eq!(path.elements.len(), 2);
    }

    #[test]
    fn empty_scene_runs_to_empty_result() {
        let mut scene = Scene::new();
        let cameras = SimulationEngine::default().run(&mut scene);
        assert!(cameras.is_empty());
    }
}
