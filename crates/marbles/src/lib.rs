//! Stepped 2D point-mass simulation core
//!
//! A fixed population of circular point-mass bodies evolves under
//! composable laws (gravity, drag, collision response, pointer interaction)
//! inside a sub-steppable frame integrator whose sub-step count adapts to
//! keep fast bodies numerically stable. Rendering, raw input wiring, and
//! viewport bookkeeping live outside this crate; the seam is a
//! [`PointerState`] snapshot in and a read-only body list out.

pub mod body;
pub mod collisions;
pub mod config;
pub mod laws;
pub mod pointer;
pub mod simulation;
pub mod stepper;
pub mod world;

#[cfg(test)]
mod simulation_test;

pub use body::{Body, BodyError, BodyId};
pub use config::SimConfig;
pub use laws::{Law, LawPipeline};
pub use pointer::PointerState;
pub use simulation::Simulation;
pub use stepper::{FrequencyMode, StepController};
pub use world::{BatchId, BodySpec, World};
