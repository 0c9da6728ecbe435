//! Planar mirrors.

use beamline_field::Wavefront;
use beamline_geometry::{Point3, Ray, Vec3};

use super::{Mount, OpticalElement};
use crate::scene::ObjectKind;

pub const DEFAULT_MIRROR_SIZE: f64 = 0.02;

/// A square first-surface mirror.
///
/// `reflectivity` is stored for forthcoming partially-reflective behaviour
/// (reflect-or-transmit branching during path discovery) but does not yet
/// drive any interaction; the mirror reflects unconditionally.
#[derive(Debug, Clone)]
pub struct Mirror {
    mount: Mount,
    size: f64,
    reflectivity: f64,
}

impl Mirror {
    pub fn new(position: Point3, orientation: Vec3) -> Self {
        Self {
            mount: Mount::new(position, orientation),
            size: DEFAULT_MIRROR_SIZE,
            reflectivity: 1.0,
        }
    }

    /// Side length of the square footprint (metres).
    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn set_size(&mut self, size: f64) {
        self.size = size;
    }

    pub fn reflectivity(&self) -> f64 {
        self.reflectivity
    }

    pub fn set_reflectivity(&mut self, reflectivity: f64) {
        self.reflectivity = reflectivity.clamp(0.0, 1.0);
    }
}

impl OpticalElement for Mirror {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Mirror
    }

    fn mount(&self) -> &Mount {
        &self.mount
    }

    fn mount_mut(&mut self) -> &mut Mount {
        &mut self.mount
    }

    fn hit(&self, ray: &Ray) -> Option<f64> {
        let hit = self.mount.intersect(ray)?;
        let half = self.size / 2.0;
        if hit.x.abs() > half || hit.y.abs() > half {
            return None;
        }
        Some(hit.distance)
    }

    fn interact_ray(&self, ray: &mut Ray) {
        ray.reflect(&self.mount.orientation());
    }

    fn interact_wavefront(&mut self, field: &mut Wavefront) {
        field.reflect(&self.mount.orientation());
    }
}
