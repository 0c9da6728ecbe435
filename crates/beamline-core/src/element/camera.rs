//! Camera sensors.
//!
//! The camera is the only element that accumulates rather than transforms:
//! it absorbs every ray that reaches it, and coherently superposes every
//! incident wavefront into a persistent accumulator that survives until the
//! next engine run (or an explicit reset).

use beamline_field::Wavefront;
use beamline_geometry::{Point3, Ray, Vec3};

use super::{Mount, OpticalElement};
use crate::scene::ObjectKind;

pub const DEFAULT_CAMERA_SIZE: f64 = 0.02;

/// A square fully-absorbing sensor.
#[derive(Debug, Clone)]
pub struct Camera {
    mount: Mount,
    size: f64,
    sensed: Option<Wavefront>,
}

impl Camera {
    pub fn new(position: Point3, orientation: Vec3) -> Self {
        Self {
            mount: Mount::new(position, orientation),
            size: DEFAULT_CAMERA_SIZE,
            sensed: None,
        }
    }

    /// Side length of the sensor (metres).
    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn set_size(&mut self, size: f64) {
        self.size = size;
    }
}

impl OpticalElement for Camera {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Camera
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
        ray.kill();
    }

    /// Superpose the incident field into the accumulator, then empty the
    /// incident field so later paths crossing this sensor cannot double
    /// count it.
    fn interact_wavefront(&mut self, field: &mut Wavefront) {
        match &mut self.sensed {
            Some(acc) => {
                if let Err(err) = acc.superpose(field) {
                    log::warn!("sensor accumulation skipped: {err}");
                }
            }
            None => self.sensed = Some(field.clone()),
        }
        field.scale(0.0);
    }

    fn reset(&mut self) {
        self.sensed = None;
    }

    fn sensed(&self) -> Option<&Wavefront> {
        self.sensed.as_ref()
    }
}
