use glam::{Mat4, Vec3};

use crate::timeline::{Channel, Value};
use crate::types::CameraUniform;

pub const DEFAULT_FOV_DEGREES: f32 = 75.0;
pub const DEFAULT_NEAR: f32 = 0.1;
pub const DEFAULT_FAR: f32 = 1000.0;

/// Perspective camera looking at `target`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view, degrees
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveCamera {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            fov: DEFAULT_FOV_DEGREES,
            aspect: sanitize_aspect(aspect),
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = sanitize_aspect(aspect);
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    pub fn to_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_projection().to_cols_array_2d(),
            position: self.position.to_array(),
            _pad: 0.0,
        }
    }

    /// Position channels only; the camera has no material or scale
    pub(crate) fn channel(&self, channel: Channel) -> Option<Value> {
        match channel {
            Channel::PositionX => Some(Value::Scalar(self.position.x)),
            Channel::PositionY => Some(Value::Scalar(self.position.y)),
            Channel::PositionZ => Some(Value::Scalar(self.position.z)),
            _ => None,
        }
    }

    pub(crate) fn set_channel(&mut self, channel: Channel, value: Value) -> bool {
        let Some(v) = value.as_scalar() else {
            return false;
        };
        match channel {
            Channel::PositionX => self.position.x = v,
            Channel::PositionY => self.position.y = v,
            Channel::PositionZ => self.position.z = v,
            _ => return false,
        }
        true
    }
}

fn sanitize_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    }
}
