//! Draw list to GPU batches
//!
//! Keeps painter's order: consecutive primitives share one draw call, and
//! consecutive sprites of the same image share another.

use std::ops::Range;

use super::scene::DrawCmd;
use super::shapes::{self, CIRCLE_SEGMENTS, PARTICLE_SEGMENTS};
use super::vertex::{SpriteVertex, Vertex};
use crate::assets::SpriteId;
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Radius under which circles get the cheap tessellation
const SMALL_CIRCLE: f32 = 6.0;

/// One draw call
#[derive(Debug, Clone, PartialEq)]
pub enum Batch {
    /// Range into `FrameBatches::shapes`
    Shapes(Range<u32>),
    /// Range into `FrameBatches::sprites`
    Sprites { id: SpriteId, range: Range<u32> },
}

/// Vertex data and draw calls for one frame, in clip space
#[derive(Debug, Clone, Default)]
pub struct FrameBatches {
    pub shapes: Vec<Vertex>,
    pub sprites: Vec<SpriteVertex>,
    pub batches: Vec<Batch>,
}

/// Canvas pixels (y down) to normalized device coordinates (y up)
pub fn canvas_to_ndc(x: f32, y: f32) -> [f32; 2] {
    [x / CANVAS_WIDTH * 2.0 - 1.0, 1.0 - y / CANVAS_HEIGHT * 2.0]
}

impl FrameBatches {
    pub fn build(cmds: &[DrawCmd]) -> Self {
        let mut frame = Self::default();
        for cmd in cmds {
            match cmd {
                DrawCmd::Rect { x, y, w, h, color } => {
                    frame.push_shapes(shapes::rect(*x, *y, *w, *h, *color));
                }
                DrawCmd::Circle {
                    center,
                    radius,
                    color,
                } => {
                    let segments = if *radius < SMALL_CIRCLE {
                        PARTICLE_SEGMENTS
                    } else {
                        CIRCLE_SEGMENTS
                    };
                    frame.push_shapes(shapes::circle(*center, *radius, *color, segments));
                }
                DrawCmd::Sprite { id, x, y, w, h } => {
                    frame.push_sprite(*id, shapes::sprite_quad(*x, *y, *w, *h));
                }
            }
        }
        frame
    }

    fn push_shapes(&mut self, vertices: Vec<Vertex>) {
        let start = self.shapes.len() as u32;
        self.shapes.extend(vertices.into_iter().map(|v| Vertex {
            position: canvas_to_ndc(v.position[0], v.position[1]),
            color: v.color,
        }));
        let end = self.shapes.len() as u32;

        match self.batches.last_mut() {
            Some(Batch::Shapes(range)) => range.end = end,
            _ => self.batches.push(Batch::Shapes(start..end)),
        }
    }

    fn push_sprite(&mut self, id: SpriteId, quad: [SpriteVertex; 6]) {
        let start = self.sprites.len() as u32;
        self.sprites.extend(quad.into_iter().map(|v| SpriteVertex {
            position: canvas_to_ndc(v.position[0], v.position[1]),
            uv: v.uv,
        }));
        let end = self.sprites.len() as u32;

        match self.batches.last_mut() {
            Some(Batch::Sprites { id: last, range }) if *last == id => range.end = end,
            _ => self.batches.push(Batch::Sprites {
                id,
                range: start..end,
            }),
        }
    }
}
