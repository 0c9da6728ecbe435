//! Apodizing elements: iris diaphragms and slit plates.
//!
//! Neither redirects geometric rays; their effect is purely on field
//! amplitude, as a hard binary mask. Both are mounted on an opaque plate
//! whose radius bounds the hit test, and both account for the transverse
//! displacement between the field's reference ray and the element centre.

use num_complex::Complex64;

use beamline_field::Wavefront;
use beamline_geometry::{Point3, Ray, Vec3};

use super::{Mount, OpticalElement};
use crate::scene::ObjectKind;

pub const DEFAULT_IRIS_RADIUS: f64 = 0.01;
pub const DEFAULT_PLATE_SIZE: f64 = 0.02;

fn plate_hit(mount: &Mount, plate_radius: f64, ray: &Ray) -> Option<f64> {
    let hit = mount.intersect(ray)?;
    if hit.radial_sq() > plate_radius * plate_radius {
        return None;
    }
    Some(hit.distance)
}

fn zero_sample(field: &mut Wavefront, i: usize, j: usize) {
    field.ex[[i, j]] = Complex64::from(0.0);
    field.ey[[i, j]] = Complex64::from(0.0);
}

/// A circular hole in an opaque plate.
///
/// The hole radius is clamped so it can never exceed the mount plate.
#[derive(Debug, Clone)]
pub struct Iris {
    mount: Mount,
    radius: f64,
    size: f64,
}

impl Iris {
    pub fn new(position: Point3, orientation: Vec3, radius: f64, size: f64) -> Self {
        Self {
            mount: Mount::new(position, orientation),
            radius: radius.min(size),
            size,
        }
    }

    /// Hole radius (metres).
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Clamped to the mount size.
    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius.min(self.size);
    }

    /// Mount plate radius (metres).
    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn set_size(&mut self, size: f64) {
        self.size = size;
    }
}

impl OpticalElement for Iris {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Iris
    }

    fn mount(&self) -> &Mount {
        &self.mount
    }

    fn mount_mut(&mut self) -> &mut Mount {
        &mut self.mount
    }

    fn hit(&self, ray: &Ray) -> Option<f64> {
        plate_hit(&self.mount, self.size, ray)
    }

    fn interact_ray(&self, _ray: &mut Ray) {}

    fn interact_wavefront(&mut self, field: &mut Wavefront) {
        let (dx, dy) = self.mount.transverse_offset(field.axis());
        let r_sq_max = self.radius * self.radius;
        let n = field.samples();
        for i in 0..n {
            for j in 0..n {
                let (x0, y0) = field.coords(i, j);
                let x = x0 + dx;
                let y = y0 + dy;
                if x * x + y * y > r_sq_max {
                    zero_sample(field, i, j);
                }
            }
        }
    }
}

/// One or more parallel rectangular openings in an opaque plate.
///
/// With `num_slits = 1` this is a single centred rectangle; with k > 1 the
/// transmissive region is the union of k rectangles spaced `separation`
/// apart along the local x axis, symmetric about the element centre.
#[derive(Debug, Clone)]
pub struct Slit {
    mount: Mount,
    size: f64,
    height: f64,
    width: f64,
    num_slits: u32,
    separation: f64,
}

impl Slit {
    pub fn new(
        position: Point3,
        orientation: Vec3,
        size: f64,
        height: f64,
        width: f64,
        num_slits: u32,
        separation: f64,
    ) -> Self {
        Self {
            mount: Mount::new(position, orientation),
            size,
            height: height.min(size),
            width: width.min(size),
            num_slits,
            separation,
        }
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn set_size(&mut self, size: f64) {
        self.size = size;
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Clamped to the mount size.
    pub fn set_height(&mut self, height: f64) {
        self.height = height.min(self.size);
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Clamped to the mount size.
    pub fn set_width(&mut self, width: f64) {
        self.width = width.min(self.size);
    }

    pub fn num_slits(&self) -> u32 {
        self.num_slits
    }

    pub fn set_num_slits(&mut self, num_slits: u32) {
        self.num_slits = num_slits;
    }

    pub fn separation(&self) -> f64 {
        self.separation
    }

    pub fn set_separation(&mut self, separation: f64) {
        self.separation = separation;
    }

    /// Slit centre abscissae along the local x axis, symmetric about 0.
    fn centres(&self) -> Vec<f64> {
        let k = self.num_slits;
        let start = -(f64::from(k.saturating_sub(1))) * self.separation / 2.0;
        (0..k).map(|i| start + f64::from(i) * self.separation).collect()
    }
}

impl OpticalElement for Slit {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Slit
    }

    fn mount(&self) -> &Mount {
        &self.mount
    }

    fn mount_mut(&mut self) -> &mut Mount {
        &mut self.mount
    }

    fn hit(&self, ray: &Ray) -> Option<f64> {
        plate_hit(&self.mount, self.size, ray)
    }

    fn interact_ray(&self, _ray: &mut Ray) {}

    fn interact_wavefront(&mut self, field: &mut Wavefront) {
        let (dx, dy) = self.mount.transverse_offset(field.axis());
        let centres = self.centres();
        let half_width = self.width / 2.0;
        let half_height = self.height / 2.0;
        let n = field.samples();
        for i in 0..n {
            for j in 0..n {
                let (x0, y0) = field.coords(i, j);
                let x = x0 + dx;
                let y = y0 + dy;
                let in_slit = y.abs() <= half_height
                    && centres.iter().any(|c| (x - c).abs() <= half_width);
                if !in_slit {
                    zero_sample(field, i, j);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn uniform_field(samples: usize) -> Wavefront {
        let axis = Ray::new(Point3::origin(), Vec3::z());
        let mut field = Wavefront::new(axis, 633e-9, samples, 0.02);
        field.ex.fill(Complex64::new(1.0, 0.0));
        field
    }

    #[test]
    fn iris_radius_clamps_to_mount() {
        let mut iris = Iris::new(Point3::origin(), Vec3::z(), 0.05, 0.02);
        assert_abs_diff_eq!(iris.radius(), 0.02);
        iris.set_radius(0.5);
        assert_abs_diff_eq!(iris.radius(), 0.02);
        iris.set_radius(0.004);
        assert_abs_diff_eq!(iris.radius(), 0.004);
    }

    #[test]
    fn iris_masks_outside_hole_exactly() {
        let mut iris = Iris::new(Point3::origin(), Vec3::z(), 0.004, 0.02);
        let mut field = uniform_field(64);
        iris.interact_wavefront(&mut field);
        let r_sq_max = iris.radius() * iris.radius();
        let n = field.samples();
        for i in 0..n {
            for j in 0..n {
                let (x, y) = field.coords(i, j);
                if x * x + y * y > r_sq_max {
                    assert_abs_diff_eq!(field.ex[[i, j]].norm(), 0.0, epsilon = 1e-15);
                } else {
                    assert_abs_diff_eq!(field.ex[[i, j]].re, 1.0, epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn iris_mask_respects_axis_displacement() {
        // element displaced from the field axis: the surviving disk shifts
        let mut iris = Iris::new(Point3::new(2e-3, 0.0, 0.0), Vec3::z(), 0.004, 0.02);
        let mut field = uniform_field(64);
        iris.interact_wavefront(&mut field);
        // centre of the grid is 2 mm from the hole centre, still inside 4 mm
        let n = field.samples();
        assert!(field.ex[[n / 2, n / 2]].norm() > 0.0);
    }

    #[test]
    fn iris_hit_bounded_by_plate() {
        let iris = Iris::new(Point3::new(0.0, 0.0, 0.1), Vec3::z(), 0.004, 0.02);
        let centred = Ray::new(Point3::origin(), Vec3::z());
        assert_abs_diff_eq!(iris.hit(&centred).unwrap(), 0.1, epsilon = 1e-12);
        // inside the plate but outside the hole still hits (the plate blocks,
        // the mask handles transmission)
        let on_plate = Ray::new(Point3::new(0.01, 0.0, 0.0), Vec3::z());
        assert!(iris.hit(&on_plate).is_some());
        let off_plate = Ray::new(Point3::new(0.03, 0.0, 0.0), Vec3::z());
        assert!(iris.hit(&off_plate).is_none());
    }

    #[test]
    fn single_slit_is_centred_rectangle() {
        let mut slit = Slit::new(Point3::origin(), Vec3::z(), 0.02, 0.01, 1e-3, 1, 2e-3);
        let mut field = uniform_field(64);
        slit.interact_wavefront(&mut field);
        let n = field.samples();
        for i in 0..n {
            for j in 0..n {
                let (x, y) = field.coords(i, j);
                let inside = x.abs() <= 0.5e-3 && y.abs() <= 5e-3;
                if inside {
                    assert_abs_diff_eq!(field.ex[[i, j]].re, 1.0, epsilon = 1e-12);
                } else {
                    assert_abs_diff_eq!(field.ex[[i, j]].norm(), 0.0, epsilon = 1e-15);
                }
            }
        }
    }

    #[test]
    fn triple_slit_union_is_symmetric() {
        let mut slit = Slit::new(Point3::origin(), Vec3::z(), 0.02, 0.01, 1e-3, 3, 4e-3);
        let mut field = uniform_field(128);
        slit.interact_wavefront(&mut field);
        let n = field.samples();
        let centres = [-4e-3, 0.0, 4e-3];
        for i in 0..n {
            for j in 0..n {
                let (x, y) = field.coords(i, j);
                let inside =
                    y.abs() <= 5e-3 && centres.iter().any(|c| (x - c).abs() <= 0.5e-3);
                let norm = field.ex[[i, j]].norm();
                if inside {
                    assert_abs_diff_eq!(norm, 1.0, epsilon = 1e-12);
                } else {
                    assert_abs_diff_eq!(norm, 0.0, epsilon = 1e-15);
                }
            }
        }
    }

    #[test]
    fn slit_centre_ray_hits_at_straight_line_distance() {
        let slit = Slit::new(Point3::new(0.0, 0.0, 0.25), Vec3::z(), 0.02, 0.01, 1e-4, 2, 2e-4);
        let ray = Ray::new(Point3::origin(), Vec3::z());
        assert_abs_diff_eq!(slit.hit(&ray).unwrap(), 0.25, epsilon = 1e-12);

        let sideways = Ray::new(Point3::origin(), Vec3::y());
        assert!(slit.hit(&sideways).is_none());
    }

    #[test]
    fn slit_dimensions_clamp_to_mount() {
        let mut slit = Slit::new(Point3::origin(), Vec3::z(), 0.02, 0.05, 0.05, 1, 2e-3);
        assert_abs_diff_eq!(slit.height(), 0.02);
        assert_abs_diff_eq!(slit.width(), 0.02);
        slit.set_height(1.0);
        assert_abs_diff_eq!(slit.height(), 0.02);
        slit.set_width(1e-4);
        assert_abs_diff_eq!(slit.width(), 1e-4);
    }
}
