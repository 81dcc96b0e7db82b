//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` when read-only).
//! Cross-tick state they need lives in small structs owned by the engine.

pub mod cleanup;
pub mod combat;
pub mod economy;
pub mod movement;
pub mod projectiles;
pub mod snapshot;
pub mod spatial;
pub mod targeting;
pub mod wave_spawner;
