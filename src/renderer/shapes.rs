//! Shape generation for 2D primitives
//!
//! Output is in canvas pixels; the batcher maps it to clip space.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{SpriteVertex, Vertex};

/// Segments used for item circles
pub const CIRCLE_SEGMENTS: u32 = 24;
/// Fewer segments for tiny particles
pub const PARTICLE_SEGMENTS: u32 = 8;

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0, x1, y1) = (x, y, x + w, y + h);
    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Textured quad covering the whole image
pub fn sprite_quad(x: f32, y: f32, w: f32, h: f32) -> [SpriteVertex; 6] {
    let (x0, y0, x1, y1) = (x, y, x + w, y + h);
    [
        SpriteVertex::new(x0, y0, 0.0, 0.0),
        SpriteVertex::new(x1, y0, 1.0, 0.0),
        SpriteVertex::new(x0, y1, 0.0, 1.0),
        SpriteVertex::new(x0, y1, 0.0, 1.0),
        SpriteVertex::new(x1, y0, 1.0, 0.0),
        SpriteVertex::new(x1, y1, 1.0, 1.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_covers_corners() {
        let verts = rect(10.0, 20.0, 30.0, 40.0, [1.0; 4]);
        assert_eq!(verts.len(), 6);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_circle_stays_within_radius() {
        let center = Vec2::new(50.0, 50.0);
        let verts = circle(center, 12.0, [1.0; 4], CIRCLE_SEGMENTS);
        assert_eq!(verts.len(), (CIRCLE_SEGMENTS * 3) as usize);
        for v in verts {
            let d = Vec2::from(v.position).distance(center);
            assert!(d <= 12.0 + 1e-3);
        }
    }

    #[test]
    fn test_sprite_quad_uv_corners() {
        let quad = sprite_quad(0.0, 0.0, 28.0, 28.0);
        assert_eq!(quad[0].uv, [0.0, 0.0]);
        assert_eq!(quad[5].uv, [1.0, 1.0]);
        assert_eq!(quad[5].position, [28.0, 28.0]);
    }
}
