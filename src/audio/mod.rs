//! Procedural audio
//!
//! Everything here is a plain description of what to play (tones, envelopes,
//! the music loop schedule). The Web Audio backend in [`web`] turns these
//! into oscillator nodes, so this half is testable off the browser.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

/// Music bus gain when unmuted
pub const MUSIC_BUS_GAIN: f32 = 0.15;
/// Sound-effect bus gain when unmuted
pub const SFX_BUS_GAIN: f32 = 0.4;

/// Silence floor for exponential ramps (they cannot reach 0)
pub const SILENCE: f32 = 0.0001;
/// Envelope attack time in seconds
pub const ATTACK: f64 = 0.01;

/// Music loop tempo
pub const MUSIC_BPM: f64 = 110.0;
/// Root note of the motif (A3)
pub const MUSIC_ROOT_HZ: f32 = 220.0;
/// Semitone offsets from the root, one eighth note each
pub const MOTIF: [i32; 8] = [0, 2, 4, 7, 4, 2, 0, -3];
/// Per-note peak gain
pub const MUSIC_NOTE_PEAK: f32 = 0.15;

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
}

/// One enveloped oscillator note, relative to a start time.
///
/// Gain starts at [`SILENCE`], ramps exponentially to `peak` over
/// [`ATTACK`], then decays back to [`SILENCE`] at `decay`. The oscillator
/// stops at `stop`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    pub waveform: Waveform,
    /// Delay from the trigger time
    pub offset: f64,
    pub peak: f32,
    pub decay: f64,
    pub stop: f64,
}

/// Sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Kebab caught
    Eat,
    /// Bomb caught
    Hit,
    /// Last life lost
    GameOver,
}

impl SoundEffect {
    /// Notes making up this effect
    pub fn tones(&self) -> Vec<Tone> {
        match self {
            SoundEffect::Eat => vec![Tone {
                freq: 660.0,
                waveform: Waveform::Sine,
                offset: 0.0,
                peak: 0.5,
                decay: 0.12,
                stop: 0.25,
            }],
            SoundEffect::Hit => vec![Tone {
                freq: 180.0,
                waveform: Waveform::Square,
                offset: 0.0,
                peak: 0.6,
                decay: 0.2,
                stop: 0.25,
            }],
            // Sad descending
            SoundEffect::GameOver => [400.0, 350.0, 300.0, 200.0]
                .iter()
                .enumerate()
                .map(|(i, &freq)| Tone {
                    freq,
                    waveform: Waveform::Sine,
                    offset: i as f64 * 0.2,
                    peak: 0.3,
                    decay: 0.3,
                    stop: 0.4,
                })
                .collect(),
        }
    }
}

/// Length of one beat in seconds
pub fn beat_seconds() -> f64 {
    60.0 / MUSIC_BPM
}

/// Length of one pass through the motif
pub fn bar_seconds() -> f64 {
    beat_seconds() * 0.5 * MOTIF.len() as f64
}

/// Equal-tempered frequency `semitones` away from the root
pub fn note_frequency(semitones: i32) -> f32 {
    MUSIC_ROOT_HZ * 2f32.powf(semitones as f32 / 12.0)
}

/// The motif as tones, offsets relative to the bar start
pub fn motif_tones() -> Vec<Tone> {
    let beat = beat_seconds();
    let step = beat * 0.5;
    MOTIF
        .iter()
        .enumerate()
        .map(|(i, &semitones)| Tone {
            freq: note_frequency(semitones),
            waveform: Waveform::Triangle,
            offset: i as f64 * step,
            peak: MUSIC_NOTE_PEAK,
            decay: beat * 0.45,
            stop: step,
        })
        .collect()
}

/// Decides when the next bar of music has to be queued.
///
/// Polled from the frame loop with the audio clock; hands out a bar start
/// time once the current bar is within `lookahead` of ending.
#[derive(Debug, Clone, Default)]
pub struct MusicScheduler {
    next_bar: Option<f64>,
}

impl MusicScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start time of a bar that should be scheduled now, if any
    pub fn due(&mut self, now: f64, lookahead: f64) -> Option<f64> {
        let start = match self.next_bar {
            // Fell behind (suspended context, hidden tab): restart cleanly
            Some(next) if next < now => now,
            Some(next) if next - now > lookahead => return None,
            Some(next) => next,
            None => now,
        };
        self.next_bar = Some(start + bar_seconds());
        Some(start)
    }
}

/// Bus gain levels for the current mute/volume settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mix {
    pub music: f32,
    pub sfx: f32,
}

impl Mix {
    pub fn new(muted: bool, master: f32, music: f32, sfx: f32) -> Self {
        if muted {
            return Self {
                music: 0.0,
                sfx: 0.0,
            };
        }
        let master = master.clamp(0.0, 1.0);
        Self {
            music: MUSIC_BUS_GAIN * master * music.clamp(0.0, 1.0),
            sfx: SFX_BUS_GAIN * master * sfx.clamp(0.0, 1.0),
        }
    }

    pub fn from_settings(settings: &crate::Settings) -> Self {
        Self::new(
            settings.muted,
            settings.master_volume,
            settings.music_volume,
            settings.sfx_volume,
        )
    }

    pub fn is_silent(&self) -> bool {
        self.music <= 0.0 && self.sfx <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eat_and_hit_envelopes() {
        let eat = SoundEffect::Eat.tones();
        assert_eq!(eat.len(), 1);
        assert_eq!(eat[0].freq, 660.0);
        assert_eq!(eat[0].waveform, Waveform::Sine);
        assert_eq!(eat[0].decay, 0.12);

        let hit = SoundEffect::Hit.tones();
        assert_eq!(hit[0].waveform, Waveform::Square);
        assert_eq!(hit[0].peak, 0.6);
        assert_eq!(hit[0].stop, 0.25);
    }

    #[test]
    fn test_game_over_descends() {
        let tones = SoundEffect::GameOver.tones();
        assert_eq!(tones.len(), 4);
        assert!(tones.windows(2).all(|w| w[1].freq < w[0].freq));
        assert!(tones.windows(2).all(|w| w[1].offset > w[0].offset));
    }

    #[test]
    fn test_motif_is_eighth_notes() {
        let tones = motif_tones();
        assert_eq!(tones.len(), 8);
        let step = beat_seconds() * 0.5;
        assert!((tones[1].offset - step).abs() < 1e-9);
        assert_eq!(tones[0].freq, 220.0);
        // Perfect fifth
        assert!((tones[3].freq - 329.63).abs() < 0.01);
        assert!(tones.iter().all(|t| t.decay < t.stop));
    }

    #[test]
    fn test_scheduler_queues_back_to_back_bars() {
        let mut music = MusicScheduler::new();
        let bar = bar_seconds();
        assert_eq!(music.due(1.0, 0.2), Some(1.0));
        assert_eq!(music.due(1.1, 0.2), None);
        let next = music.due(1.0 + bar - 0.1, 0.2);
        assert_eq!(next, Some(1.0 + bar));
    }

    #[test]
    fn test_scheduler_resyncs_after_stall() {
        let mut music = MusicScheduler::new();
        music.due(0.0, 0.2);
        assert_eq!(music.due(100.0, 0.2), Some(100.0));
        assert_eq!(music.due(100.1, 0.2), None);
    }

    #[test]
    fn test_mute_silences_both_buses() {
        let mix = Mix::new(true, 1.0, 1.0, 1.0);
        assert!(mix.is_silent());
        let mix = Mix::new(false, 1.0, 1.0, 1.0);
        assert_eq!(mix.music, MUSIC_BUS_GAIN);
        assert_eq!(mix.sfx, SFX_BUS_GAIN);
    }
}
