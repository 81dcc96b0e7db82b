//! Core types and definitions for the EVOWAR lane battle.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, snapshot views, events, errors, silhouettes and
//! constants. It has no dependency on the ECS or any presentation layer.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod mask;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
