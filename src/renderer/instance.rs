//! Per-circle instance data for instanced drawing

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::sim::Circle;

/// Model matrix (column-major) and fill color of one circle
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct CircleInstance {
    pub model: [f32; 16],
    pub color: [f32; 4],
}

impl CircleInstance {
    /// Shader locations 1-4 carry the model matrix columns, 5 the color.
    /// Location 0 is left for the unit circle mesh position.
    const ATTRIBUTES: [wgpu::VertexAttribute; 5] = [
        wgpu::VertexAttribute {
            offset: 0,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32x4,
        },
        wgpu::VertexAttribute {
            offset: 16,
            shader_location: 2,
            format: wgpu::VertexFormat::Float32x4,
        },
        wgpu::VertexAttribute {
            offset: 32,
            shader_location: 3,
            format: wgpu::VertexFormat::Float32x4,
        },
        wgpu::VertexAttribute {
            offset: 48,
            shader_location: 4,
            format: wgpu::VertexFormat::Float32x4,
        },
        wgpu::VertexAttribute {
            offset: 64,
            shader_location: 5,
            format: wgpu::VertexFormat::Float32x4,
        },
    ];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CircleInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

impl From<&Circle> for CircleInstance {
    fn from(circle: &Circle) -> Self {
        Self {
            model: circle.transform.to_cols_array(),
            color: circle.color.to_array(),
        }
    }
}

/// Instance buffer contents for a whole collection
pub fn instances(circles: &[Circle]) -> Vec<CircleInstance> {
    circles.iter().map(CircleInstance::from).collect()
}

/// Aspect correction so circles stay round in a non-square viewport
pub fn aspect_matrix(aspect: f32) -> Mat4 {
    Mat4::from_diagonal(glam::Vec4::new(
        (1.0 / aspect).min(1.0),
        aspect.min(1.0),
        1.0,
        1.0,
    ))
}
