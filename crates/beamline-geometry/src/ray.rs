//! Parametric rays.
//!
//! A [`Ray`] is the discrete carrier of light during path discovery: a line
//! `origin + t * direction` with a liveness flag. Elements advance it,
//! redirect it, or kill it; a dead ray ends its trial.

use crate::{Point3, Vec3, HIT_EPSILON};

/// A parametric ray with a mutable liveness flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Ray {
    origin: Point3,
    direction: Vec3,
    alive: bool,
}

impl Ray {
    /// Create a live ray. The direction is normalised; a direction of
    /// (near-)zero length is degenerate and yields a dead ray that no
    /// element will interact with.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        let norm = direction.norm();
        if norm < HIT_EPSILON {
            Self {
                origin,
                direction: Vec3::zeros(),
                alive: false,
            }
        } else {
            Self {
                origin,
                direction: direction / norm,
                alive: true,
            }
        }
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// The point at parametric distance `t` along the ray.
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }

    /// Advance the origin by a signed distance along the direction.
    pub fn advance(&mut self, distance: f64) {
        self.origin += self.direction * distance;
    }

    /// Replace the direction (renormalised).
    pub fn set_direction(&mut self, direction: Vec3) {
        let norm = direction.norm();
        if norm >= HIT_EPSILON {
            self.direction = direction / norm;
        }
    }

    /// Specular reflection about a surface normal: d' = d − 2(d·n)n.
    pub fn reflect(&mut self, normal: &Vec3) {
        let d = self.direction;
        self.direction = d - normal * (2.0 * d.dot(normal));
    }

    /// Mark the ray as absorbed/terminated.
    pub fn kill(&mut self) {
        self.alive = false;
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn advance_moves_along_direction() {
        let mut ray = Ray::new(Point3::origin(), Vec3::new(0.0, 0.0, 2.0));
        ray.advance(0.5);
        assert_abs_diff_eq!(ray.origin().z, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(ray.direction().norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn reflect_preserves_unit_length() {
        let mut ray = Ray::new(Point3::origin(), Vec3::new(1.0, 0.0, 1.0));
        ray.reflect(&Vec3::new(0.0, 0.0, 1.0));
        assert_abs_diff_eq!(ray.direction().norm(), 1.0, epsilon = 1e-12);
        // z component flips, x survives
        assert!(ray.direction().z < 0.0);
        assert!(ray.direction().x > 0.0);
    }

    #[test]
    fn zero_direction_is_dead() {
        let ray = Ray::new(Point3::origin(), Vec3::zeros());
        assert!(!ray.is_alive());
    }

    #[test]
    fn killed_ray_stays_dead() {
        let mut ray = Ray::new(Point3::origin(), Vec3::z());
        assert!(ray.is_alive());
        ray.kill();
        assert!(!ray.is_alive());
    }
}
