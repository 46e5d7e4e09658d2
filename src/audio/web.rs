//! Web Audio backend
//!
//! Oscillators routed through a music bus and an sfx bus. The context is
//! only created on [`AudioManager::unlock`], which the shell calls from a
//! user gesture.

use web_sys::{AudioContext, GainNode, OscillatorType};

use super::{motif_tones, Mix, MusicScheduler, SoundEffect, Tone, Waveform, ATTACK, SILENCE};

/// How far ahead of the audio clock the next music bar is queued
const MUSIC_LOOKAHEAD: f64 = 0.25;

struct Buses {
    ctx: AudioContext,
    music: GainNode,
    sfx: GainNode,
}

impl Buses {
    fn create(mix: Mix) -> Option<Self> {
        let ctx = AudioContext::new().ok()?;
        let music = ctx.create_gain().ok()?;
        let sfx = ctx.create_gain().ok()?;
        music.connect_with_audio_node(&ctx.destination()).ok()?;
        sfx.connect_with_audio_node(&ctx.destination()).ok()?;
        music.gain().set_value(mix.music);
        sfx.gain().set_value(mix.sfx);
        Some(Self { ctx, music, sfx })
    }
}

/// Audio manager for the game
pub struct AudioManager {
    buses: Option<Buses>,
    mix: Mix,
    music: MusicScheduler,
    failed: bool,
}

impl AudioManager {
    pub fn new(mix: Mix) -> Self {
        Self {
            buses: None,
            mix,
            music: MusicScheduler::new(),
            failed: false,
        }
    }

    /// Create (or resume) the audio context. Must run inside a user gesture.
    pub fn unlock(&mut self) {
        if self.failed {
            return;
        }
        if self.buses.is_none() {
            match Buses::create(self.mix) {
                Some(buses) => {
                    log::info!("Audio context created");
                    self.buses = Some(buses);
                }
                None => {
                    // May fail outside a secure context
                    log::warn!("Failed to create AudioContext - audio disabled");
                    self.failed = true;
                    return;
                }
            }
        }
        if let Some(buses) = &self.buses {
            if buses.ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = buses.ctx.resume();
            }
        }
    }

    /// Apply new bus levels (mute toggle, volume change)
    pub fn set_mix(&mut self, mix: Mix) {
        self.mix = mix;
        if let Some(buses) = &self.buses {
            buses.music.gain().set_value(mix.music);
            buses.sfx.gain().set_value(mix.sfx);
        }
    }

    /// Per-frame hook: keeps the music loop queued ahead of the audio clock
    pub fn update(&mut self) {
        let Some(buses) = &self.buses else { return };
        // Muted: let the scheduler fall behind, it resyncs on unmute
        if self.mix.is_silent() {
            return;
        }
        let now = buses.ctx.current_time();
        if let Some(bar_start) = self.music.due(now, MUSIC_LOOKAHEAD) {
            for tone in motif_tones() {
                schedule_tone(&buses.ctx, &buses.music, &tone, bar_start);
            }
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        if self.mix.sfx <= 0.0 {
            return;
        }
        let Some(buses) = &self.buses else { return };
        let t = buses.ctx.current_time();
        for tone in effect.tones() {
            schedule_tone(&buses.ctx, &buses.sfx, &tone, t);
        }
    }
}

fn oscillator_type(waveform: Waveform) -> OscillatorType {
    match waveform {
        Waveform::Sine => OscillatorType::Sine,
        Waveform::Square => OscillatorType::Square,
        Waveform::Triangle => OscillatorType::Triangle,
    }
}

/// Create an oscillator with gain envelope, routed into `bus`
fn schedule_tone(ctx: &AudioContext, bus: &GainNode, tone: &Tone, at: f64) -> Option<()> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(oscillator_type(tone.waveform));
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(bus).ok()?;

    let t = at + tone.offset;
    osc.frequency().set_value_at_time(tone.freq, t).ok()?;
    gain.gain().set_value_at_time(SILENCE, t).ok()?;
    gain.gain()
        .exponential_ramp_to_value_at_time(tone.peak, t + ATTACK)
        .ok()?;
    gain.gain()
        .exponential_ramp_to_value_at_time(SILENCE, t + tone.decay)
        .ok()?;

    osc.start_with_when(t).ok()?;
    osc.stop_with_when(t + tone.stop).ok()?;
    Some(())
}
