//! Arcade simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only (owned by the state)
//! - Variable frame delta, clamped by the caller
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod effects;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Rect, item_touches};
pub use spawner::spawn_interval;
pub use state::{
    ArcadeState, FallingItem, GameEvent, GamePhase, ItemKind, Paddle, Particle, ParticleColor,
};
pub use tick::{TickInput, tick};
