//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Textured vertex for sprite quads
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

impl SpriteVertex {
    pub const fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    use crate::rgb;
    use crate::sim::ParticleColor;

    // Primitive fallback palette
    pub const BACKGROUND: [f32; 4] = rgb(0x0b0b0c);
    pub const FLOOR: [f32; 4] = rgb(0x1f2937);
    pub const PLAYER: [f32; 4] = rgb(0xf59e0b);
    pub const BOMB: [f32; 4] = rgb(0x111827);
    pub const KEBAB: [f32; 4] = rgb(0x10b981);

    /// Particle color with the given opacity
    pub fn particle(color: ParticleColor, alpha: f32) -> [f32; 4] {
        let [r, g, b, _] = match color {
            ParticleColor::Ember => rgb(0xf97316),
            ParticleColor::Flame => rgb(0xfacc15),
            ParticleColor::Smoke => rgb(0x6b7280),
            ParticleColor::Lettuce => rgb(0x84cc16),
            ParticleColor::Tomato => rgb(0xef4444),
            ParticleColor::Sauce => rgb(0xfef3c7),
            ParticleColor::Bread => rgb(0xd97706),
        };
        [r, g, b, alpha]
    }
}
