//! Complex-amplitude wavefront grids.
//!
//! A [`Wavefront`] is an N×N grid of complex samples per polarisation axis
//! (Ex, Ey), a reference [`Ray`] giving the field's position and propagation
//! direction, a wavelength, and a physical extent. Sample (i, j) sits at the
//! transverse coordinates
//!
//! x = (j − N/2)·pitch,  y = (i − N/2)·pitch
//!
//! centred on the reference ray, with x along the local v axis and y along
//! the local u axis of whichever element is looking at the field.

use ndarray::Array2;
use num_complex::Complex64;
use thiserror::Error;

use beamline_geometry::{Ray, Vec3};

/// Errors from combining two sample grids.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("grid mismatch: {lhs}×{lhs} vs {rhs}×{rhs} samples")]
    GridMismatch { lhs: usize, rhs: usize },

    #[error("extent mismatch: {lhs} m vs {rhs} m")]
    ExtentMismatch { lhs: f64, rhs: f64 },
}

/// Two-component complex field on a square transverse grid.
#[derive(Debug, Clone)]
pub struct Wavefront {
    /// Horizontal polarisation samples.
    pub ex: Array2<Complex64>,
    /// Vertical polarisation samples.
    pub ey: Array2<Complex64>,
    axis: Ray,
    wavelength: f64,
    extent: f64,
}

impl Wavefront {
    /// An empty (all-zero) field of `samples`×`samples` over `extent` metres.
    pub fn new(axis: Ray, wavelength: f64, samples: usize, extent: f64) -> Self {
        Self {
            ex: Array2::zeros((samples, samples)),
            ey: Array2::zeros((samples, samples)),
            axis,
            wavelength,
            extent,
        }
    }

    /// The reference ray: where the field is and which way it travels.
    pub fn axis(&self) -> &Ray {
        &self.axis
    }

    pub fn wavelength(&self) -> f64 {
        self.wavelength
    }

    /// Grid dimension N.
    pub fn samples(&self) -> usize {
        self.ex.nrows()
    }

    /// Physical side length of the grid (metres).
    pub fn extent(&self) -> f64 {
        self.extent
    }

    /// Physical sample pitch: extent ÷ N.
    pub fn pitch(&self) -> f64 {
        self.extent / self.samples() as f64
    }

    /// Transverse coordinates of sample (i, j) relative to the grid centre.
    pub fn coords(&self, i: usize, j: usize) -> (f64, f64) {
        let half = (self.samples() / 2) as isize;
        let pitch = self.pitch();
        let x = (j as isize - half) as f64 * pitch;
        let y = (i as isize - half) as f64 * pitch;
        (x, y)
    }

    /// Wavenumber k = 2π/λ.
    pub fn wavenumber(&self) -> f64 {
        2.0 * std::f64::consts::PI / self.wavelength
    }

    /// Advance the field by a signed distance along its reference ray.
    ///
    /// Collimated transport: the reference ray moves, and every sample picks
    /// up the on-axis phase exp(i·k·d). Amplitudes are untouched, so energy
    /// is conserved exactly and hard-masked zeros stay zero.
    pub fn propagate(&mut self, distance: f64) {
        self.axis.advance(distance);
        let phase = Complex64::from_polar(1.0, self.wavenumber() * distance);
        self.ex.mapv_inplace(|e| e * phase);
        self.ey.mapv_inplace(|e| e * phase);
    }

    /// Uniform real scaling of both components. A factor of 0 empties the
    /// field (a sensor does this after absorbing it).
    pub fn scale(&mut self, factor: f64) {
        self.ex.mapv_inplace(|e| e * factor);
        self.ey.mapv_inplace(|e| e * factor);
    }

    /// Coherent in-place superposition of another field.
    pub fn superpose(&mut self, other: &Wavefront) -> Result<(), FieldError> {
        if self.samples() != other.samples() {
            return Err(FieldError::GridMismatch {
                lhs: self.samples(),
                rhs: other.samples(),
            });
        }
        if (self.extent - other.extent).abs() > f64::EPSILON * self.extent.abs() {
            return Err(FieldError::ExtentMismatch {
                lhs: self.extent,
                rhs: other.extent,
            });
        }
        self.ex += &other.ex;
        self.ey += &other.ey;
        Ok(())
    }

    /// Flip the propagation axis about a mirror normal.
    pub fn reflect(&mut self, normal: &Vec3) {
        self.axis.reflect(normal);
    }

    /// Per-sample intensity |Ex|² + |Ey|².
    pub fn intensity(&self) -> Array2<f64> {
        let mut out = Array2::zeros(self.ex.raw_dim());
        for ((i, j), value) in out.indexed_iter_mut() {
            *value = self.ex[[i, j]].norm_sqr() + self.ey[[i, j]].norm_sqr();
        }
        out
    }

    /// Total optical energy: the sum of all intensity samples.
    pub fn energy(&self) -> f64 {
        self.intensity().sum()
    }

    /// Per-sample phase of the dominant polarisation component (the one
    /// carrying more total energy).
    pub fn phase(&self) -> Array2<f64> {
        let ex_energy: f64 = self.ex.iter().map(|e| e.norm_sqr()).sum();
        let ey_energy: f64 = self.ey.iter().map(|e| e.norm_sqr()).sum();
        let dominant = if ex_energy >= ey_energy { &self.ex } else { &self.ey };
        dominant.mapv(|e| e.arg())
    }
}
