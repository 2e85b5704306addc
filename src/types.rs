use glam::{Mat4, Vec3};

use crate::scene::{LightRig, Node};

/// Mesh vertex for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Camera uniform buffer data for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 3],
    pub _pad: f32,
}

/// Light rig uniform. Colors are premultiplied by intensity; for point lights
/// `position.w` is the range and `color.w` the decay exponent.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    pub ambient: [f32; 4],
    pub directional_dir: [f32; 4],
    pub directional_color: [f32; 4],
    pub hemi_sky: [f32; 4],
    pub hemi_ground: [f32; 4],
    pub hemi_up: [f32; 4],
    pub point_position: [[f32; 4]; 2],
    pub point_color: [[f32; 4]; 2],
}

impl LightsUniform {
    pub fn from_rig(rig: &LightRig) -> Self {
        let point = |i: usize| {
            rig.points.get(i).map_or(([0.0; 4], [0.0; 4]), |p| {
                (
                    p.position.extend(p.range).to_array(),
                    p.color.scaled(p.intensity).to_vec4(p.decay),
                )
            })
        };
        let (p0_pos, p0_col) = point(0);
        let (p1_pos, p1_col) = point(1);
        Self {
            ambient: rig.ambient.color.scaled(rig.ambient.intensity).to_vec4(0.0),
            directional_dir: rig.directional.direction().extend(0.0).to_array(),
            directional_color: rig
                .directional
                .color
                .scaled(rig.directional.intensity)
                .to_vec4(0.0),
            hemi_sky: rig.hemisphere.sky.scaled(rig.hemisphere.intensity).to_vec4(0.0),
            hemi_ground: rig
                .hemisphere
                .ground
                .scaled(rig.hemisphere.intensity)
                .to_vec4(0.0),
            hemi_up: rig.hemisphere.up.extend(0.0).to_array(),
            point_position: [p0_pos, p1_pos],
            point_color: [p0_col, p1_col],
        }
    }
}

/// Per-node uniform: transforms and standard material parameters
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct NodeUniform {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub emissive: [f32; 4],
    /// x = roughness, y = metalness
    pub params: [f32; 4],
}

impl NodeUniform {
    pub fn from_node(node: &Node) -> Self {
        let model = node.model_matrix();
        let normal_matrix = if model.determinant().abs() > f32::EPSILON {
            model.inverse().transpose()
        } else {
            Mat4::from_quat(node.transform.quat())
        };
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: normal_matrix.to_cols_array_2d(),
            color: node.material.color.to_vec4(1.0),
            emissive: node.material.emissive.to_vec4(1.0),
            params: [node.material.roughness, node.material.metalness, 0.0, 0.0],
        }
    }
}
