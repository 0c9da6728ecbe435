//! Thin lenses.
//!
//! Both lens variants share the same disk footprint and thin-lens geometry;
//! they differ in the sign of the deflection and of the quadratic phase, and
//! in what happens to field samples outside the aperture: a convex lens is a
//! free aperture (samples pass untouched), a concave lens is mounted in an
//! opaque barrel (samples are blocked).

use num_complex::Complex64;

use beamline_field::Wavefront;
use beamline_geometry::{Point3, Ray, Vec3};

use super::{Mount, OpticalElement};
use crate::scene::ObjectKind;

/// Thin-lens ray deflection: direction += sign·(offset from axis)/f.
fn deflect(mount: &Mount, focal_length: f64, sign: f64, ray: &mut Ray) {
    let offset = ray.origin() - mount.position();
    let new_direction = ray.direction() + offset * (sign / focal_length);
    ray.set_direction(new_direction);
}

/// Thin-lens quadratic phase: multiply samples inside the aperture by
/// exp(i·sign·k/(2f)·r²). With `block_outside`, samples beyond the aperture
/// radius are zeroed instead of passed.
fn apply_phase(
    field: &mut Wavefront,
    radius: f64,
    focal_length: f64,
    sign: f64,
    block_outside: bool,
) {
    let prefactor = sign * field.wavenumber() / (2.0 * focal_length);
    let r_sq_max = radius * radius;
    let n = field.samples();
    for i in 0..n {
        for j in 0..n {
            let (x, y) = field.coords(i, j);
            let r_sq = x * x + y * y;
            if r_sq <= r_sq_max {
                let phasor = Complex64::from_polar(1.0, prefactor * r_sq);
                field.ex[[i, j]] *= phasor;
                field.ey[[i, j]] *= phasor;
            } else if block_outside {
                field.ex[[i, j]] = Complex64::from(0.0);
                field.ey[[i, j]] = Complex64::from(0.0);
            }
        }
    }
}

fn disk_hit(mount: &Mount, radius: f64, ray: &Ray) -> Option<f64> {
    let hit = mount.intersect(ray)?;
    if hit.radial_sq() > radius * radius {
        return None;
    }
    Some(hit.distance)
}

/// A converging thin lens.
#[derive(Debug, Clone)]
pub struct ConvexLens {
    mount: Mount,
    radius: f64,
    focal_length: f64,
}

impl ConvexLens {
    /// `diameter` is the clear aperture; `focal_length` is positive for a
    /// converging lens.
    pub fn new(position: Point3, orientation: Vec3, diameter: f64, focal_length: f64) -> Self {
        Self {
            mount: Mount::new(position, orientation),
            radius: diameter / 2.0,
            focal_length,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius;
    }

    pub fn focal_length(&self) -> f64 {
        self.focal_length
    }

    pub fn set_focal_length(&mut self, focal_length: f64) {
        self.focal_length = focal_length;
    }
}

impl OpticalElement for ConvexLens {
    fn kind(&self) -> ObjectKind {
        ObjectKind::ConvexLens
    }

    fn mount(&self) -> &Mount {
        &self.mount
    }

    fn mount_mut(&mut self) -> &mut Mount {
        &mut self.mount
    }

    fn hit(&self, ray: &Ray) -> Option<f64> {
        disk_hit(&self.mount, self.radius, ray)
    }

    fn interact_ray(&self, ray: &mut Ray) {
        deflect(&self.mount, self.focal_length, -1.0, ray);
    }

    fn interact_wavefront(&mut self, field: &mut Wavefront) {
        apply_phase(field, self.radius, self.focal_length, -1.0, false);
    }
}

/// A diverging thin lens in an opaque barrel.
#[derive(Debug, Clone)]
pub struct ConcaveLens {
    mount: Mount,
    radius: f64,
    focal_length: f64,
}

impl ConcaveLens {
    pub fn new(position: Point3, orientation: Vec3, diameter: f64, focal_length: f64) -> Self {
        Self {
            mount: Mount::new(position, orientation),
            radius: diameter / 2.0,
            focal_length,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius;
    }

    pub fn focal_length(&self) -> f64 {
        self.focal_length
    }

    pub fn set_focal_length(&mut self, focal_length: f64) {
        self.focal_length = focal_length;
    }
}

impl OpticalElement for ConcaveLens {
    fn kind(&self) -> ObjectKind {
        ObjectKind::ConcaveLens
    }

    fn mount(&self) -> &Mount {
        &self.mount
    }

    fn mount_mut(&mut self) -> &mut Mount {
        &mut self.mount
    }

    fn hit(&self, ray: &Ray) -> Option<f64> {
        disk_hit(&self.mount, self.radius, ray)
    }

    fn interact_ray(&self, ray: &mut Ray) {
        deflect(&self.mount, self.focal_length, 1.0, ray);
    }

    fn interact_wavefront(&mut self, field: &mut Wavefront) {
        apply_phase(field, self.radius, self.focal_length, 1.0, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use num_complex::Complex64;

    fn uniform_field(samples: usize) -> Wavefront {
        let axis = Ray::new(Point3::origin(), Vec3::z());
        let mut field = Wavefront::new(axis, 633e-9, samples, 0.02);
        field.ex.fill(Complex64::new(1.0, 0.0));
        field
    }

    #[test]
    fn convex_hit_inside_aperture() {
        let lens = ConvexLens::new(Point3::new(0.0, 0.0, 0.2), Vec3::z(), 0.02, 0.1);
        let ray = Ray::new(Point3::origin(), Vec3::z());
        assert_abs_diff_eq!(lens.hit(&ray).unwrap(), 0.2, epsilon = 1e-12);

        let wide = Ray::new(Point3::new(0.015, 0.0, 0.0), Vec3::z());
        assert!(lens.hit(&wide).is_none());
    }

    #[test]
    fn convex_bends_marginal_ray_toward_axis() {
        let lens = ConvexLens::new(Point3::origin(), Vec3::z(), 0.02, 0.1);
        let mut ray = Ray::new(Point3::new(5e-3, 0.0, 0.0), Vec3::z());
        lens.interact_ray(&mut ray);
        assert!(ray.direction().x < 0.0);
        assert_abs_diff_eq!(ray.direction().norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn concave_bends_marginal_ray_away_from_axis() {
        let lens = ConcaveLens::new(Point3::origin(), Vec3::z(), 0.02, 0.1);
        let mut ray = Ray::new(Point3::new(5e-3, 0.0, 0.0), Vec3::z());
        lens.interact_ray(&mut ray);
        assert!(ray.direction().x > 0.0);
    }

    #[test]
    fn convex_phase_is_unit_magnitude_everywhere() {
        let mut lens = ConvexLens::new(Point3::origin(), Vec3::z(), 0.01, 0.1);
        let mut field = uniform_field(32);
        lens.interact_wavefront(&mut field);
        for e in field.ex.iter() {
            assert_abs_diff_eq!(e.norm(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn concave_blocks_outside_aperture() {
        let mut lens = ConcaveLens::new(Point3::origin(), Vec3::z(), 0.01, 0.1);
        let mut field = uniform_field(32);
        lens.interact_wavefront(&mut field);
        let r_max = lens.radius();
        let n = field.samples();
        for i in 0..n {
            for j in 0..n {
                let (x, y) = field.coords(i, j);
                let inside = x * x + y * y <= r_max * r_max;
                if inside {
                    assert_abs_diff_eq!(field.ex[[i, j]].norm(), 1.0, epsilon = 1e-12);
                } else {
                    assert_abs_diff_eq!(field.ex[[i, j]].norm(), 0.0, epsilon = 1e-15);
                }
            }
        }
    }

    #[test]
    fn convex_leaves_outside_samples_untouched() {
        let mut lens = ConvexLens::new(Point3::origin(), Vec3::z(), 0.005, 0.1);
        let mut field = uniform_field(32);
        lens.interact_wavefront(&mut field);
        // corner sample is far outside the 2.5 mm aperture
        assert_abs_diff_eq!(field.ex[[0, 0]].re, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(field.ex[[0, 0]].im, 0.0, epsilon = 1e-12);
    }
}
