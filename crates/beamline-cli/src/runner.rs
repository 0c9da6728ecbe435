//! Bench assembly and simulation runner.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use ndarray::Array2;

use beamline_core::{
    Camera, ConcaveLens, ConvexLens, Iris, Mirror, ObjectId, ObjectKind, Scene, SimulationEngine,
    Slit, Source,
};
use beamline_field::BeamMode;
use beamline_geometry::{Point3, Vec3};

use crate::config::{BenchConfig, ObjectConfig};

/// Build a scene from a parsed bench description.
pub fn build_scene(config: &BenchConfig) -> Result<Scene> {
    let mut scene = Scene::new();
    for (index, object) in config.object.iter().enumerate() {
        place_object(&mut scene, object)
            .with_context(|| format!("object #{} ({})", index + 1, object.kind))?;
    }
    Ok(scene)
}

fn vec3(components: [f64; 3]) -> Vec3 {
    Vec3::new(components[0], components[1], components[2])
}

fn point3(components: [f64; 3]) -> Point3 {
    Point3::new(components[0], components[1], components[2])
}

fn place_object(scene: &mut Scene, object: &ObjectConfig) -> Result<ObjectId> {
    let position = point3(object.position);
    let orientation = vec3(object.orientation);
    if orientation.norm() < 1e-12 {
        bail!("orientation must be a non-zero vector");
    }

    let id = match object.kind {
        ObjectKind::Source => {
            let mut source = Source::new(position, orientation);
            if let Some(mode) = &object.mode {
                source.set_mode(parse_mode(mode, object)?);
            }
            if let Some(wavelength) = object.wavelength {
                source.set_wavelength(wavelength);
            }
            if let Some(waist) = object.waist {
                source.set_waist(waist);
            }
            if let Some(psi) = object.psi {
                source.set_psi(psi);
            }
            if let Some(delta) = object.delta {
                source.set_delta(delta);
            }
            if let Some(samples) = object.samples {
                source.set_samples(samples);
            }
            if let Some(extent) = object.extent {
                source.set_extent(extent);
            }
            scene.insert_source(source)
        }
        ObjectKind::Mirror => {
            let mut mirror = Mirror::new(position, orientation);
            if let Some(size) = object.size {
                mirror.set_size(size);
            }
            if let Some(reflectivity) = object.reflectivity {
                mirror.set_reflectivity(reflectivity);
            }
            scene.insert_element(Box::new(mirror))
        }
        ObjectKind::ConvexLens => {
            let diameter = object.radius.map(|r| 2.0 * r).unwrap_or(0.02);
            let focal_length = object.focal_length.unwrap_or(0.1);
            let lens = ConvexLens::new(position, orientation, diameter, focal_length);
            scene.insert_element(Box::new(lens))
        }
        ObjectKind::ConcaveLens => {
            let diameter = object.radius.map(|r| 2.0 * r).unwrap_or(0.02);
            let focal_length = object.focal_length.unwrap_or(0.1);
            let lens = ConcaveLens::new(position, orientation, diameter, focal_length);
            scene.insert_element(Box::new(lens))
        }
        ObjectKind::Iris => {
            let size = object.size.unwrap_or(0.02);
            let radius = object.radius.unwrap_or(0.01);
            scene.insert_element(Box::new(Iris::new(position, orientation, radius, size)))
        }
        ObjectKind::Slit => {
            let size = object.size.unwrap_or(0.02);
            let slit = Slit::new(
                position,
                orientation,
                size,
                object.height.unwrap_or(0.01),
                object.width.unwrap_or(1e-4),
                object.num_slits.unwrap_or(1),
                object.separation.unwrap_or(2e-4),
            );
            scene.insert_element(Box::new(slit))
        }
        ObjectKind::Camera => {
            let mut camera = Camera::new(position, orientation);
            if let Some(size) = object.size {
                camera.set_size(size);
            }
            scene.insert_element(Box::new(camera))
        }
    };
    log::debug!("placed {} as {}", object.kind, id);
    Ok(id)
}

fn parse_mode(mode: &str, object: &ObjectConfig) -> Result<BeamMode> {
    match mode {
        "plane" => Ok(BeamMode::Plane),
        "gaussian" => Ok(BeamMode::Gaussian),
        "lg" => Ok(BeamMode::LaguerreGauss {
            l: object.l.unwrap_or(0),
            p: object.p.unwrap_or(0),
        }),
        "hg" => Ok(BeamMode::HermiteGauss {
            m: object.m.unwrap_or(0),
            n: object.n.unwrap_or(0),
        }),
        "blank" => Ok(BeamMode::Blank),
        other => bail!("unknown beam mode '{other}' (expected plane, gaussian, lg, hg, or blank)"),
    }
}

/// Run the engine over a built scene and write per-camera maps.
pub fn run_simulation(config: &BenchConfig, scene: &mut Scene, out_dir: &Path) -> Result<()> {
    let engine = SimulationEngine::new(config.engine.trials);
    let sensors = engine.run(scene);

    if sensors.is_empty() {
        println!("No cameras in the scene; nothing to write.");
        return Ok(());
    }

    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    for id in sensors {
        let Some(object) = scene.object(id) else {
            continue;
        };
        let name = sanitise(object.name());
        let Some(sensed) = object.as_element().and_then(|element| element.sensed()) else {
            println!("  {}: no light arrived", object.name());
            continue;
        };

        let intensity = sensed.intensity();
        let energy: f64 = intensity.sum();
        println!(
            "  {}: {}x{} samples, total energy {:.3e}",
            object.name(),
            sensed.samples(),
            sensed.samples(),
            energy
        );

        let intensity_path = out_dir.join(format!("{name}_intensity.csv"));
        write_grid_csv(&intensity, &intensity_path)?;
        println!("    intensity map written to {}", intensity_path.display());

        if config.output.save_phase {
            let phase_path = out_dir.join(format!("{name}_phase.csv"));
            write_grid_csv(&sensed.phase(), &phase_path)?;
            println!("    phase map written to {}", phase_path.display());
        }
    }

    Ok(())
}

/// Write one scalar grid as CSV, row per grid row.
fn write_grid_csv(grid: &Array2<f64>, path: &Path) -> Result<()> {
    let mut file =
        fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    for row in grid.rows() {
        let line: Vec<String> = row.iter().map(|value| format!("{value:.6e}")).collect();
        writeln!(file, "{}", line.join(","))?;
    }
    Ok(())
}

fn sanitise(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}
