//! # Beamline Field
//!
//! The continuous-field collaborator of the Beamline optical bench. A
//! [`Wavefront`] carries two polarisation components of complex amplitude on
//! a square transverse grid, tied to a reference ray that records where the
//! field is and which way it propagates.
//!
//! ## Modules
//!
//! - [`wavefront`] — The sample grid and its operations (propagate, scale,
//!   superpose, reflect, intensity/phase readout).
//! - [`modes`] — Beam-mode excitation: plane, Gaussian, Laguerre-Gauss,
//!   Hermite-Gauss profiles with Jones-angle polarisation.
//! - [`special`] — The special functions the mode profiles need.
//!
//! ## Transport model
//!
//! [`Wavefront::propagate`] carries the transverse profile rigidly and
//! advances the on-axis phase: the geometric-optics limit. A diffractive
//! propagator (angular spectrum, Fresnel) would slot in behind the same
//! call without touching any consumer.

pub mod modes;
pub mod special;
pub mod wavefront;

pub use modes::{emit, BeamMode, BeamSpec};
pub use wavefront::{FieldError, Wavefront};
