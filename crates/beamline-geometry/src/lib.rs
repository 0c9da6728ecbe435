//! # Beamline Geometry
//!
//! Geometric foundations for the Beamline optical bench:
//!
//! - **Vector algebra** — re-exported `nalgebra` aliases ([`Vec3`], [`Point3`]).
//! - **Parametric rays** ([`ray`]) — origin + unit direction with a liveness
//!   flag, the discrete carrier used during path discovery.
//! - **Local frames** ([`frame`]) — the orthonormal {u, v, w} basis every
//!   optical element derives from its orientation.

pub mod frame;
pub mod ray;

pub use frame::Frame;
pub use ray::Ray;

/// 3D direction / displacement vector (metres).
pub type Vec3 = nalgebra::Vector3<f64>;

/// 3D position (metres).
pub type Point3 = nalgebra::Point3<f64>;

/// Shared geometric tolerance: minimum useful hit distance and the
/// threshold below which a ray counts as parallel to a surface.
pub const HIT_EPSILON: f64 = 1e-6;
