//! Orthonormal local frames.
//!
//! Every optical element spans a transverse plane described by an
//! orthonormal basis {u, v, w}, where w is the element's unit orientation
//! and u, v span the plane. The basis is rebuilt whenever the orientation
//! changes.

use crate::Vec3;

/// An orthonormal {u, v, w} basis derived from an orientation axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub u: Vec3,
    pub v: Vec3,
    pub w: Vec3,
}

impl Frame {
    /// Build the frame for a given axis.
    ///
    /// The reference axis for the cross products is x̂, swapped to ŷ when
    /// the axis points mostly along x, so the cross product never
    /// degenerates:
    /// u = normalize(w × ref), v = normalize(w × u).
    pub fn from_axis(axis: Vec3) -> Self {
        let w = axis.normalize();
        let reference = if w.x.abs() < 0.9 { Vec3::x() } else { Vec3::y() };
        let u = w.cross(&reference).normalize();
        let v = w.cross(&u).normalize();
        Frame { u, v, w }
    }
}
