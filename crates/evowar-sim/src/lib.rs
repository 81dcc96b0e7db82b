//! Simulation engine for EVOWAR.
//!
//! Owns the hecs ECS world, runs the lane battle one tick at a time,
//! draws entities through a `Surface`, and produces `GameStateSnapshot`s.

pub mod assets;
pub mod clock;
pub mod components;
pub mod engine;
pub mod lane;
pub mod level;
pub mod render;
pub mod systems;
pub mod world_setup;

pub use evowar_core as core;
pub use engine::{SimConfig, SimulationEngine};
