//! The optical element contract and shared mount geometry.
//!
//! Every placed element owns a [`Mount`]: a position, a unit orientation,
//! and the orthonormal local frame derived from it. The [`OpticalElement`]
//! trait adds the variant-specific behaviour on top: a side-effect-free
//! `hit` test, a discrete-ray interaction used during path discovery, and a
//! continuous-wavefront interaction used during coherent replay.

pub mod aperture;
pub mod camera;
pub mod lens;
pub mod mirror;

pub use aperture::{Iris, Slit, DEFAULT_IRIS_RADIUS, DEFAULT_PLATE_SIZE};
pub use camera::Camera;
pub use lens::{ConcaveLens, ConvexLens};
pub use mirror::Mirror;

use beamline_field::Wavefront;
use beamline_geometry::{Frame, Point3, Ray, Vec3, HIT_EPSILON};

use crate::scene::ObjectKind;

/// Shared placement state: position, unit orientation, derived local frame.
#[derive(Debug, Clone)]
pub struct Mount {
    position: Point3,
    orientation: Vec3,
    frame: Frame,
}

/// A valid plane intersection: the parametric distance and the local
/// transverse offsets of the intersection point from the element centre
/// (x along the frame's v axis, y along u).
#[derive(Debug, Clone, Copy)]
pub struct PlaneHit {
    pub distance: f64,
    pub x: f64,
    pub y: f64,
}

impl PlaneHit {
    /// Squared in-plane distance from the element centre.
    pub fn radial_sq(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }
}

impl Mount {
    pub fn new(position: Point3, orientation: Vec3) -> Self {
        let orientation = orientation.normalize();
        Self {
            position,
            orientation,
            frame: Frame::from_axis(orientation),
        }
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    pub fn orientation(&self) -> Vec3 {
        self.orientation
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn set_position(&mut self, position: Point3) {
        self.position = position;
    }

    /// Replace the orientation and rebuild the local frame.
    pub fn set_orientation(&mut self, orientation: Vec3) {
        self.orientation = orientation.normalize();
        self.frame = Frame::from_axis(self.orientation);
    }

    /// Intersect a ray with the element's transverse plane.
    ///
    /// `None` when the ray is parallel to the plane (|d·w| < ε) or the
    /// intersection lies behind the origin (t < ε). Footprint tests are the
    /// caller's job.
    pub fn intersect(&self, ray: &Ray) -> Option<PlaneHit> {
        let denom = ray.direction().dot(&self.orientation);
        if denom.abs() < HIT_EPSILON {
            return None;
        }

        let t = (self.position - ray.origin()).dot(&self.orientation) / denom;
        if t < HIT_EPSILON {
            return None;
        }

        let offset = ray.at(t) - self.position;
        Some(PlaneHit {
            distance: t,
            x: offset.dot(&self.frame.v),
            y: offset.dot(&self.frame.u),
        })
    }

    /// Transverse offset of a field's reference ray from the element centre,
    /// in the local (x, y) axes. Apodizing elements use this to mask a field
    /// whose axis does not pass through their centre.
    pub fn transverse_offset(&self, axis: &Ray) -> (f64, f64) {
        let d = axis.origin() - self.position;
        (d.dot(&self.frame.v), d.dot(&self.frame.u))
    }
}

/// The polymorphic unit of interaction on the bench.
///
/// Implementations must keep `hit` free of side effects; all state changes
/// happen in the two `interact_*` methods and `reset`.
pub trait OpticalElement {
    /// The element's variant tag, used by scene views and displays.
    fn kind(&self) -> ObjectKind;

    fn mount(&self) -> &Mount;

    fn mount_mut(&mut self) -> &mut Mount;

    /// Smallest parametric distance ≥ ε at which the ray meets the element's
    /// footprint, or `None` when the element is irrelevant to this ray.
    fn hit(&self, ray: &Ray) -> Option<f64>;

    /// Redirect or absorb a discrete ray.
    fn interact_ray(&self, ray: &mut Ray);

    /// Transform or accumulate a continuous field in place.
    fn interact_wavefront(&mut self, field: &mut Wavefront);

    /// Clear accumulated state. Only sensors carry any.
    fn reset(&mut self) {}

    /// Read access to a sensor's accumulated field.
    fn sensed(&self) -> Option<&Wavefront> {
        None
    }

    fn position(&self) -> Point3 {
        self.mount().position()
    }

    fn orientation(&self) -> Vec3 {
        self.mount().orientation()
    }

    fn set_position(&mut self, position: Point3) {
        self.mount_mut().set_position(position);
    }

    fn set_orientation(&mut self, orientation: Vec3) {
        self.mount_mut().set_orientation(orientation);
    }
}
