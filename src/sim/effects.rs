//! Screen shake and particle bursts

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{ArcadeState, ItemKind, Particle, ParticleColor};
use crate::consts::*;

const FIRE_PALETTE: [ParticleColor; 3] = [ParticleColor::Ember, ParticleColor::Flame, ParticleColor::Smoke];
const CONFETTI_PALETTE: [ParticleColor; 4] = [
    ParticleColor::Lettuce,
    ParticleColor::Tomato,
    ParticleColor::Sauce,
    ParticleColor::Bread,
];

/// Shape of a particle burst
#[derive(Debug, Clone, Copy)]
struct BurstStyle {
    count: usize,
    speed: (f32, f32),
    life: (f32, f32),
    size: (f32, f32),
    /// Extra upward kick so confetti pops before falling
    lift: f32,
}

const BOMB_STYLE: BurstStyle = BurstStyle {
    count: BOMB_BURST,
    speed: (80.0, 320.0),
    life: (0.4, 0.9),
    size: (2.0, 5.0),
    lift: 0.0,
};

const KEBAB_STYLE: BurstStyle = BurstStyle {
    count: KEBAB_BURST,
    speed: (60.0, 180.0),
    life: (0.3, 0.6),
    size: (1.5, 3.0),
    lift: 120.0,
};

fn range(rng: &mut Pcg32, (lo, hi): (f32, f32)) -> f32 {
    lo + rng.random::<f32>() * (hi - lo)
}

fn burst(state: &mut ArcadeState, origin: Vec2, style: BurstStyle, palette: &[ParticleColor]) {
    for i in 0..style.count {
        if state.particles.len() >= state.max_particles {
            break;
        }
        let angle = state.rng.random::<f32>() * std::f32::consts::TAU;
        let speed = range(&mut state.rng, style.speed);
        let life = range(&mut state.rng, style.life);
        let size = range(&mut state.rng, style.size);
        let vel = Vec2::new(angle.cos(), angle.sin()) * speed - Vec2::Y * style.lift;
        state.particles.push(Particle {
            pos: origin,
            vel,
            color: palette[i % palette.len()],
            life,
            max_life: life,
            size,
        });
    }
}

/// Kick off the effects for a caught item
pub fn on_catch(state: &mut ArcadeState, kind: ItemKind, at: Vec2) {
    match kind {
        ItemKind::Bomb => {
            state.shake_timer = SHAKE_DURATION;
            burst(state, at, BOMB_STYLE, &FIRE_PALETTE);
        }
        ItemKind::Kebab => burst(state, at, KEBAB_STYLE, &CONFETTI_PALETTE),
    }
}

/// Advance shake countdown and particles by `dt`
pub fn update(state: &mut ArcadeState, dt: f32) {
    state.shake_timer = (state.shake_timer - dt).max(0.0);

    for particle in state.particles.iter_mut() {
        particle.vel.y += PARTICLE_GRAVITY * dt;
        particle.pos += particle.vel * dt;
        particle.life -= dt;
    }
    state.particles.retain(|p| p.life > 0.0);
}

/// Current shake amplitude in pixels (0 when idle)
pub fn shake_amplitude(state: &ArcadeState) -> f32 {
    if state.shake_timer <= 0.0 {
        0.0
    } else {
        SHAKE_MAGNITUDE * (state.shake_timer / SHAKE_DURATION)
    }
}

/// Screen offset for the current shake, jittering with `time` (seconds)
pub fn shake_offset(state: &ArcadeState, time: f32) -> Vec2 {
    let amp = shake_amplitude(state);
    if amp == 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new((time * 91.0).sin(), (time * 77.0).cos()) * amp
}
