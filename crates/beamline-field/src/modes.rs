//! Beam-mode excitation.
//!
//! A [`BeamSpec`] describes a source's canonical emission: the transverse
//! mode, the polarisation Jones angles ψ and δ, the wavelength, the beam
//! waist, and the grid it is sampled on. [`emit`] turns a spec plus a
//! reference ray into a freshly excited [`Wavefront`]:
//!
//! Ex = a(x, y)·cos ψ,  Ey = a(x, y)·sin ψ·e^{iδ}
//!
//! where a(x, y) is the (possibly complex) mode profile. Non-blank modes
//! are normalised to unit total energy, so downstream accumulation is
//! bounded by 1 per source.

use num_complex::Complex64;

use beamline_geometry::Ray;

use crate::special::{factorial, generalized_laguerre, hermite};
use crate::wavefront::Wavefront;

/// Transverse mode of a source's emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeamMode {
    /// Uniform amplitude across the grid.
    Plane,
    /// Fundamental Gaussian, waist w₀ at the source plane.
    Gaussian,
    /// Laguerre-Gauss LG_p^l with azimuthal index l and radial index p.
    LaguerreGauss { l: i32, p: u32 },
    /// Hermite-Gauss HG_mn.
    HermiteGauss { m: u32, n: u32 },
    /// No emission (dark source).
    Blank,
}

/// Full description of a source's canonical emission state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamSpec {
    pub mode: BeamMode,
    /// Polarisation amplitude split angle ψ (radians).
    pub psi: f64,
    /// Relative phase δ between Ey and Ex (radians).
    pub delta: f64,
    /// Wavelength (metres).
    pub wavelength: f64,
    /// Beam waist w₀ (metres).
    pub waist: f64,
    /// Grid dimension N.
    pub samples: usize,
    /// Physical grid side length (metres).
    pub extent: f64,
}

impl Default for BeamSpec {
    fn default() -> Self {
        Self {
            mode: BeamMode::Gaussian,
            psi: 0.0,
            delta: 0.0,
            wavelength: 633e-9,
            waist: 1e-3,
            samples: 256,
            extent: 0.02,
        }
    }
}

/// Excite a wavefront in its canonical emission state along `axis`.
pub fn emit(spec: &BeamSpec, axis: Ray) -> Wavefront {
    let mut field = Wavefront::new(axis, spec.wavelength, spec.samples, spec.extent);
    if matches!(spec.mode, BeamMode::Blank) {
        return field;
    }

    let jones_x = Complex64::from(spec.psi.cos());
    let jones_y = Complex64::from_polar(spec.psi.sin(), spec.delta);

    let n = spec.samples;
    for i in 0..n {
        for j in 0..n {
            let (x, y) = field.coords(i, j);
            let a = profile(spec, x, y);
            field.ex[[i, j]] = a * jones_x;
            field.ey[[i, j]] = a * jones_y;
        }
    }

    let energy = field.energy();
    if energy > 0.0 {
        field.scale(1.0 / energy.sqrt());
    }
    field
}

/// The transverse profile a(x, y) at the source plane.
fn profile(spec: &BeamSpec, x: f64, y: f64) -> Complex64 {
    let w0 = spec.waist;
    let r_sq = x * x + y * y;
    match spec.mode {
        BeamMode::Plane => Complex64::from(1.0),
        BeamMode::Gaussian => Complex64::from((-r_sq / (w0 * w0)).exp()),
        BeamMode::LaguerreGauss { l, p } => {
            let labs = l.unsigned_abs();
            let rho = 2.0 * r_sq / (w0 * w0);
            let phi = y.atan2(x);
            let norm = (2.0 * factorial(p) / (std::f64::consts::PI * factorial(p + labs))).sqrt();
            let radial = norm
                * rho.powf(f64::from(labs) / 2.0)
                * generalized_laguerre(p, labs, rho)
                * (-r_sq / (w0 * w0)).exp();
            radial * Complex64::from_polar(1.0, f64::from(l) * phi)
        }
        BeamMode::HermiteGauss { m, n } => {
            let sqrt2 = std::f64::consts::SQRT_2;
            let h = hermite(m, sqrt2 * x / w0) * hermite(n, sqrt2 * y / w0);
            Complex64::from(h * (-r_sq / (w0 * w0)).exp())
        }
        BeamMode::Blank => Complex64::from(0.0),
    }
}
