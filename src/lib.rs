//! Probabilistic cellular automaton of vascular and tissue regrowth after an
//! amputation through a layered limb cross-section.
//!
//! Main components:
//! - [`grid`]: label grid, distance field, injury mask and toroidal neighbors.
//! - [`geometry`]: initial ring layout, vessel seeding and the injury wedge.
//! - [`state`]: double-buffered grids and per-step scratch fields.
//! - [`simulation`]: the transition rule and the simulation driver API.

pub mod geometry;
pub mod grid;
pub mod simulation;
pub mod state;

pub use grid::{DistanceField, InjuryMask, LabelGrid};
pub use simulation::{FrameEvent, RegrowthSimulation};
