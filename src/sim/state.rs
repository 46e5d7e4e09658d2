//! Arcade state and core simulation types
//!
//! `ArcadeState` is the authoritative simulation state owned by the frame
//! loop. The presentation layer only ever sees the derived [`HudSnapshot`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::hud::HudSnapshot;

/// Current phase of the arcade mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for the first start input
    Idle,
    /// Active gameplay
    Running,
    /// Run ended, waiting for restart input
    GameOver,
}

/// Falling item types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Kebab,
    Bomb,
}

impl ItemKind {
    pub fn radius(self) -> f32 {
        match self {
            ItemKind::Kebab => KEBAB_RADIUS,
            ItemKind::Bomb => BOMB_RADIUS,
        }
    }
}

/// A falling entity
#[derive(Debug, Clone)]
pub struct FallingItem {
    pub id: u32,
    pub kind: ItemKind,
    /// Center position
    pub pos: Vec2,
    /// Vertical velocity (pixels/s, positive is down)
    pub vy: f32,
    pub radius: f32,
}

/// The player's paddle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: CANVAS_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
        }
    }
}

impl Paddle {
    /// Top edge, resting on the floor
    pub fn top(&self) -> f32 {
        FLOOR_Y - PLAYER_HEIGHT
    }

    pub fn bottom(&self) -> f32 {
        FLOOR_Y
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + PLAYER_WIDTH
    }

    /// Move horizontally by `dx`, staying inside the play surface
    pub fn shift(&mut self, dx: f32) {
        self.x = (self.x + dx).clamp(0.0, CANVAS_WIDTH - PLAYER_WIDTH);
    }
}

/// Particle palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleColor {
    Ember,
    Smoke,
    Flame,
    Lettuce,
    Tomato,
    Sauce,
    Bread,
}

/// A particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: ParticleColor,
    /// Seconds left before removal
    pub life: f32,
    /// Initial life, for fading
    pub max_life: f32,
    pub size: f32,
}

impl Particle {
    /// Opacity in [0, 1], fading with remaining life
    pub fn alpha(&self) -> f32 {
        if self.max_life <= 0.0 {
            0.0
        } else {
            (self.life / self.max_life).clamp(0.0, 1.0)
        }
    }
}

/// Things that happened during a tick, drained by the shell for audio and
/// persistence side effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Run (re)started
    Started,
    /// Kebab caught
    Ate,
    /// Bomb caught
    BombHit,
    /// Lives ran out; carries the final score
    GameOver { score: u32 },
}

/// Complete arcade state
#[derive(Debug, Clone)]
pub struct ArcadeState {
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u32,
    pub paddle: Paddle,
    /// Active items, the sole owner of every falling entity
    pub items: Vec<FallingItem>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Seconds accumulated toward the next spawn
    pub spawn_timer: f32,
    /// Screen shake countdown (seconds remaining)
    pub shake_timer: f32,
    /// Particle pool cap (from settings)
    pub max_particles: usize,
    /// Seconds spent running, used to animate effects
    pub elapsed: f32,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    pub rng: Pcg32,
    next_id: u32,
}

impl ArcadeState {
    /// Create a new arcade state on the title screen
    pub fn new(seed: u64) -> Self {
        Self {
            phase: GamePhase::Idle,
            score: 0,
            lives: START_LIVES,
            paddle: Paddle::default(),
            items: Vec::new(),
            particles: Vec::new(),
            spawn_timer: 0.0,
            shake_timer: 0.0,
            max_particles: MAX_PARTICLES,
            elapsed: 0.0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Reset counters and begin a fresh run
    pub fn start(&mut self) {
        self.phase = GamePhase::Running;
        self.score = 0;
        self.lives = START_LIVES;
        self.paddle = Paddle::default();
        self.items.clear();
        self.particles.clear();
        self.spawn_timer = 0.0;
        self.shake_timer = 0.0;
        self.elapsed = 0.0;
        self.next_id = 1;
        self.events.push(GameEvent::Started);
    }

    /// End the run. Only the first call has an effect.
    pub fn end(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver { score: self.score });
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Derive the HUD view of this state
    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            score: self.score,
            lives: self.lives,
            is_running: self.phase == GamePhase::Running,
            is_game_over: self.phase == GamePhase::GameOver,
        }
    }
}
