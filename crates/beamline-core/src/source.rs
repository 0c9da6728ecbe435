//! Coherent light sources.

use beamline_field::{emit, BeamMode, BeamSpec, Wavefront};
use beamline_geometry::{Point3, Ray, Vec3};

/// A coherent source: a position, an emission direction, and a beam
/// specification describing the canonical emission state.
///
/// Emission is generated on demand, so the field's reference ray always
/// matches the current position and orientation.
#[derive(Debug, Clone)]
pub struct Source {
    position: Point3,
    orientation: Vec3,
    beam: BeamSpec,
}

impl Source {
    pub fn new(position: Point3, orientation: Vec3) -> Self {
        Self {
            position,
            orientation: orientation.normalize(),
            beam: BeamSpec::default(),
        }
    }

    pub fn with_beam(position: Point3, orientation: Vec3, beam: BeamSpec) -> Self {
        Self {
            position,
            orientation: orientation.normalize(),
            beam,
        }
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    pub fn set_position(&mut self, position: Point3) {
        self.position = position;
    }

    pub fn orientation(&self) -> Vec3 {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Vec3) {
        self.orientation = orientation.normalize();
    }

    pub fn beam(&self) -> &BeamSpec {
        &self.beam
    }

    pub fn mode(&self) -> BeamMode {
        self.beam.mode
    }

    pub fn set_mode(&mut self, mode: BeamMode) {
        self.beam.mode = mode;
    }

    pub fn wavelength(&self) -> f64 {
        self.beam.wavelength
    }

    pub fn set_wavelength(&mut self, wavelength: f64) {
        self.beam.wavelength = wavelength;
    }

    pub fn waist(&self) -> f64 {
        self.beam.waist
    }

    pub fn set_waist(&mut self, waist: f64) {
        self.beam.waist = waist;
    }

    pub fn psi(&self) -> f64 {
        self.beam.psi
    }

    pub fn set_psi(&mut self, psi: f64) {
        self.beam.psi = psi;
    }

    pub fn delta(&self) -> f64 {
        self.beam.delta
    }

    pub fn set_delta(&mut self, delta: f64) {
        self.beam.delta = delta;
    }

    pub fn samples(&self) -> usize {
        self.beam.samples
    }

    pub fn set_samples(&mut self, samples: usize) {
        self.beam.samples = samples;
    }

    pub fn extent(&self) -> f64 {
        self.beam.extent
    }

    pub fn set_extent(&mut self, extent: f64) {
        self.beam.extent = extent;
    }

    /// The launch ray for path discovery.
    pub fn launch_ray(&self) -> Ray {
        Ray::new(self.position, self.orientation)
    }

    /// A freshly excited wavefront in the canonical emission state.
    pub fn emit(&self) -> Wavefront {
        emit(&self.beam, self.launch_ray())
    }
}
