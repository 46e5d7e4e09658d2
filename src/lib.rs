//! Kebab Tycoon - catch falling kebabs, dodge bombs, grow a kebab empire
//!
//! Core modules:
//! - `sim`: Arcade simulation (spawning, physics, collisions, effects)
//! - `idle`: Clicker economy with persisted upgrades
//! - `hud`: Throttled HUD snapshots for the DOM layer
//! - `renderer`: WebGPU rendering with sprite or primitive fallback
//! - `audio`: Procedural music and sound effects
//! - `platform`: Frame clock and input mapping
//! - `persistence`: Key-value storage (LocalStorage on web)

pub mod assets;
pub mod audio;
pub mod best_score;
pub mod hud;
pub mod idle;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use best_score::BestScore;
pub use hud::{HudPublisher, HudSnapshot, IdlePanel};
pub use idle::{IdleState, IdleStore, StoreError, UpgradeId};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Play surface dimensions (CSS pixels)
    pub const CANVAS_WIDTH: f32 = 420.0;
    pub const CANVAS_HEIGHT: f32 = 720.0;
    /// Top of the floor band; the paddle sits on it
    pub const FLOOR_Y: f32 = CANVAS_HEIGHT - 40.0;

    /// Player paddle
    pub const PLAYER_WIDTH: f32 = 80.0;
    pub const PLAYER_HEIGHT: f32 = 18.0;
    /// Horizontal paddle speed (pixels/s)
    pub const PLAYER_SPEED: f32 = 320.0;
    pub const START_LIVES: u32 = 3;

    /// Largest frame delta fed to the simulation (tab-resume guard)
    pub const MAX_FRAME_DT: f32 = 0.033;

    /// Spawn interval curve: max(MIN, BASE - min(score, CAP) * STEP)
    pub const SPAWN_INTERVAL_BASE: f32 = 0.9;
    pub const SPAWN_INTERVAL_MIN: f32 = 0.25;
    pub const SPAWN_INTERVAL_STEP: f32 = 0.0035;
    pub const SPAWN_SCORE_CAP: u32 = 150;

    /// Chance a spawned item is a bomb
    pub const BOMB_CHANCE: f64 = 0.22;
    /// Fall speed: BASE + min(score * PER_POINT, BONUS_CAP) + U(0, JITTER)
    pub const FALL_SPEED_BASE: f32 = 140.0;
    pub const FALL_SPEED_PER_POINT: f32 = 2.0;
    pub const FALL_SPEED_BONUS_CAP: f32 = 260.0;
    pub const FALL_SPEED_JITTER: f32 = 120.0;
    pub const BOMB_RADIUS: f32 = 14.0;
    pub const KEBAB_RADIUS: f32 = 12.0;
    /// Items start this far above the top edge (plus their radius)
    pub const SPAWN_MARGIN: f32 = 10.0;

    /// Screen shake after a bomb hit
    pub const SHAKE_DURATION: f32 = 0.35;
    pub const SHAKE_MAGNITUDE: f32 = 8.0;
    /// Particle bursts
    pub const BOMB_BURST: usize = 24;
    pub const KEBAB_BURST: usize = 10;
    pub const PARTICLE_GRAVITY: f32 = 600.0;
    pub const MAX_PARTICLES: usize = 256;

    /// Background parallax speeds (pixels/s)
    pub const BACKDROP_SPEEDS: [f32; 2] = [20.0, 40.0];
}

/// Convert a `0xRRGGBB` color literal into opaque RGBA floats
pub const fn rgb(hex: u32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_unpacks_channels() {
        let c = rgb(0xff8000);
        assert_eq!(c[0], 1.0);
        assert!((c[1] - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c[2], 0.0);
        assert_eq!(c[3], 1.0);
    }
}
