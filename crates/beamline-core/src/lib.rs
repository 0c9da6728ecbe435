//! # Beamline Core
//!
//! The simulation core of the Beamline optical bench: user-placed optical
//! elements illuminated by coherent sources, and the engine that computes
//! the light field arriving at each sensor.
//!
//! ## Architecture
//!
//! Every element implements the [`element::OpticalElement`] contract:
//! geometric hit-testing plus two interaction modes, one for discrete rays
//! (path discovery) and one for continuous wavefronts (coherent replay).
//! A [`scene::Scene`] owns all placed sources and elements in an arena keyed
//! by stable [`scene::ObjectId`]s, and the [`engine::SimulationEngine`]
//! orchestrates the two-phase run over it.
//!
//! ## Modules
//!
//! - [`element`] — The element contract, shared mount geometry, and the six
//!   variants (mirror, convex/concave lens, iris, slit, camera).
//! - [`source`] — Coherent sources and their canonical emission.
//! - [`scene`] — The entity registry and its query views.
//! - [`engine`] — Trial-based path discovery and deterministic coherent
//!   replay.

pub mod element;
pub mod engine;
pub mod scene;
pub mod source;

pub use element::{Camera, ConcaveLens, ConvexLens, Iris, Mirror, Mount, OpticalElement, Slit};
pub use engine::{Path, SimulationEngine};
pub use scene::{ObjectId, ObjectKind, Scene, SceneObject};
pub use source::Source;
