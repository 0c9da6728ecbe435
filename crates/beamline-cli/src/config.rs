//! TOML bench-description deserialisation.

use serde::Deserialize;

use beamline_core::ObjectKind;

/// Top-level bench configuration.
#[derive(Debug, Deserialize)]
pub struct BenchConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub object: Vec<ObjectConfig>,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Engine parameters from TOML.
#[derive(Debug, Deserialize)]
pub struct EngineConfig {
    /// Trial rays per source during path discovery.
    #[serde(default = "default_trials")]
    pub trials: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            trials: default_trials(),
        }
    }
}

fn default_trials() -> usize {
    100
}

/// One placed object on the bench.
#[derive(Debug, Deserialize)]
pub struct ObjectConfig {
    pub kind: ObjectKind,
    /// Position in metres.
    pub position: [f64; 3],
    /// Orientation axis (normalised internally).
    pub orientation: [f64; 3],

    // source parameters
    /// "plane", "gaussian", "lg", "hg", or "blank".
    pub mode: Option<String>,
    /// Wavelength (metres).
    pub wavelength: Option<f64>,
    /// Beam waist (metres).
    pub waist: Option<f64>,
    /// Polarisation split angle ψ (radians).
    pub psi: Option<f64>,
    /// Polarisation relative phase δ (radians).
    pub delta: Option<f64>,
    /// Azimuthal index for LG modes.
    pub l: Option<i32>,
    /// Radial index for LG modes.
    pub p: Option<u32>,
    /// Horizontal index for HG modes.
    pub m: Option<u32>,
    /// Vertical index for HG modes.
    pub n: Option<u32>,
    /// Grid dimension N.
    pub samples: Option<usize>,
    /// Physical grid side length (metres).
    pub extent: Option<f64>,

    // element parameters
    /// Mirror/camera side length or aperture mount size (metres).
    pub size: Option<f64>,
    /// Lens aperture or iris hole radius (metres).
    pub radius: Option<f64>,
    pub focal_length: Option<f64>,
    pub reflectivity: Option<f64>,
    /// Slit opening height (metres).
    pub height: Option<f64>,
    /// Slit opening width (metres).
    pub width: Option<f64>,
    pub num_slits: Option<u32>,
    /// Centre-to-centre slit spacing (metres).
    pub separation: Option<f64>,
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Whether to write per-camera phase maps alongside intensity (default: true).
    #[serde(default = "default_true")]
    pub save_phase: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            save_phase: true,
        }
    }
}

fn default_output_dir() -> String {
    "./output".into()
}

fn default_true() -> bool {
    true
}

/// Load and parse a TOML bench description.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<BenchConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: BenchConfig = toml::from_str(&content)?;
    Ok(config)
}
