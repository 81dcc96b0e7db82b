//! Unit behaviour for EVOWAR.
//!
//! Archetype profiles (base stats, costs, rewards, attack delivery) and the
//! per-unit animation/combat state machine. No ECS dependency.

pub mod fsm;
pub mod profiles;

pub use evowar_core as core;

#[cfg(test)]
mod tests;
