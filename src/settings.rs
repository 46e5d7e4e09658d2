//! Game settings and preferences
//!
//! Persisted separately from the idle save in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_PARTICLES;
use crate::persistence::{self, KeyValueStore};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Maximum particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 64,
            QualityPreset::Medium => 160,
            QualityPreset::High => MAX_PARTICLES,
        }
    }

    /// Whether the scrolling background layers are drawn
    pub fn parallax_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Screen shake on bomb hits
    pub screen_shake: bool,
    /// Particle bursts
    pub particles: bool,

    // === Audio ===
    /// Mute all audio
    pub muted: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Accessibility ===
    /// Reduced motion (no shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            screen_shake: true,
            particles: true,
            muted: false,
            master_volume: 1.0,
            music_volume: 1.0,
            sfx_volume: 1.0,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "kebab-tycoon-settings";

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Flip mute, returning the new value
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Load settings from storage
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        persistence::load_or_default(store, Self::STORAGE_KEY)
    }

    /// Save settings to storage (best-effort)
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) {
        persistence::save_best_effort(store, Self::STORAGE_KEY, self);
        log::info!("Settings saved");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_reduced_motion_disables_shake() {
        let mut settings = Settings::default();
        assert!(settings.effective_screen_shake());
        settings.reduced_motion = true;
        assert!(!settings.effective_screen_shake());
    }

    #[test]
    fn test_particles_toggle_zeroes_cap() {
        let mut settings = Settings {
            quality: QualityPreset::High,
            ..Settings::default()
        };
        assert_eq!(settings.max_particles(), MAX_PARTICLES);
        settings.particles = false;
        assert_eq!(settings.max_particles(), 0);
    }

    #[test]
    fn test_mute_roundtrips_through_storage() {
        let mut store = MemoryStore::new();
        let mut settings = Settings::default();
        assert!(settings.toggle_mute());
        settings.save(&mut store);
        assert!(Settings::load(&store).muted);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let mut store = MemoryStore::new();
        store
            .set("kebab-tycoon-settings", r#"{"muted":true}"#)
            .unwrap();
        let settings = Settings::load(&store);
        assert!(settings.muted);
        assert!(settings.screen_shake);
        assert_eq!(settings.quality, QualityPreset::Medium);
    }

    #[test]
    fn test_low_preset_trims_effects() {
        let settings = Settings {
            quality: QualityPreset::Low,
            ..Settings::default()
        };
        assert!(!settings.quality.parallax_enabled());
        assert!(settings.max_particles() < MAX_PARTICLES);
    }
}
