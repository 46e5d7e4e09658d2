//! Draw list construction
//!
//! Turns the arcade state into an ordered list of draw commands in canvas
//! pixels. Sprites are only emitted once every asset is ready; otherwise each
//! entity falls back to a solid-color primitive.

use glam::Vec2;

use super::vertex::colors;
use crate::assets::SpriteId;
use crate::consts::*;
use crate::sim::{ArcadeState, ItemKind};

/// One thing to draw, in back-to-front order
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: [f32; 4],
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
    },
    Sprite {
        id: SpriteId,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    },
}

impl DrawCmd {
    fn translated(self, by: Vec2) -> Self {
        match self {
            DrawCmd::Rect { x, y, w, h, color } => DrawCmd::Rect {
                x: x + by.x,
                y: y + by.y,
                w,
                h,
                color,
            },
            DrawCmd::Circle {
                center,
                radius,
                color,
            } => DrawCmd::Circle {
                center: center + by,
                radius,
                color,
            },
            DrawCmd::Sprite { id, x, y, w, h } => DrawCmd::Sprite {
                id,
                x: x + by.x,
                y: y + by.y,
                w,
                h,
            },
        }
    }
}

/// Scrolling offsets for the two background layers
#[derive(Debug, Clone, Default)]
pub struct Backdrop {
    offsets: [f32; 2],
}

impl Backdrop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance both layers, wrapping at the canvas height
    pub fn update(&mut self, dt: f32) {
        for (offset, speed) in self.offsets.iter_mut().zip(BACKDROP_SPEEDS) {
            *offset = (*offset + speed * dt) % CANVAS_HEIGHT;
        }
    }

    pub fn offsets(&self) -> [f32; 2] {
        self.offsets
    }
}

/// Per-frame presentation options
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneOptions {
    /// Every sprite texture is uploaded
    pub assets_ready: bool,
    /// Draw the scrolling layers (quality dependent)
    pub parallax: bool,
    /// Scene translation from screen shake (all but the background fill)
    pub shake: Vec2,
}

/// Build the draw list for one frame
pub fn build_scene(state: &ArcadeState, backdrop: &Backdrop, opts: SceneOptions) -> Vec<DrawCmd> {
    let sprites = opts.assets_ready;
    let mut cmds = Vec::with_capacity(8 + state.items.len() + state.particles.len());

    // Background
    cmds.push(DrawCmd::Rect {
        x: 0.0,
        y: 0.0,
        w: CANVAS_WIDTH,
        h: CANVAS_HEIGHT,
        color: colors::BACKGROUND,
    });
    if sprites && opts.parallax {
        let layers = [SpriteId::Layer1, SpriteId::Layer2];
        for (id, offset) in layers.into_iter().zip(backdrop.offsets()) {
            // Two copies stacked so the wrap is seamless
            for y in [-offset, CANVAS_HEIGHT - offset] {
                cmds.push(DrawCmd::Sprite {
                    id,
                    x: 0.0,
                    y,
                    w: CANVAS_WIDTH,
                    h: CANVAS_HEIGHT,
                });
            }
        }
    }

    // Floor
    cmds.push(DrawCmd::Rect {
        x: 0.0,
        y: FLOOR_Y,
        w: CANVAS_WIDTH,
        h: CANVAS_HEIGHT - FLOOR_Y,
        color: colors::FLOOR,
    });

    // Player
    let paddle = &state.paddle;
    if sprites {
        let (w, h) = SpriteId::Player.draw_size();
        // Centered on the paddle, feet on the floor
        cmds.push(DrawCmd::Sprite {
            id: SpriteId::Player,
            x: paddle.left() - (w - PLAYER_WIDTH) / 2.0,
            y: paddle.top() - (h - PLAYER_HEIGHT),
            w,
            h,
        });
    } else {
        cmds.push(DrawCmd::Rect {
            x: paddle.left(),
            y: paddle.top(),
            w: PLAYER_WIDTH,
            h: PLAYER_HEIGHT,
            color: colors::PLAYER,
        });
    }

    // Falling items
    for item in &state.items {
        let (id, color) = match item.kind {
            ItemKind::Bomb => (SpriteId::Bomb, colors::BOMB),
            ItemKind::Kebab => (SpriteId::Kebab, colors::KEBAB),
        };
        if sprites {
            let (w, h) = id.draw_size();
            cmds.push(DrawCmd::Sprite {
                id,
                x: item.pos.x - w / 2.0,
                y: item.pos.y - h / 2.0,
                w,
                h,
            });
        } else {
            cmds.push(DrawCmd::Circle {
                center: item.pos,
                radius: item.radius,
                color,
            });
        }
    }

    // Particles on top
    for p in &state.particles {
        cmds.push(DrawCmd::Circle {
            center: p.pos,
            radius: p.size,
            color: colors::particle(p.color, p.alpha()),
        });
    }

    if opts.shake != Vec2::ZERO {
        // The full-canvas fill stays put so the edges never show the clear color
        cmds = cmds
            .into_iter()
            .enumerate()
            .map(|(i, c)| if i == 0 { c } else { c.translated(opts.shake) })
            .collect();
    }
    cmds
}
