use glam::Vec3;

use crate::math::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

/// Light arriving from `position` toward `target`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl DirectionalLight {
    /// Unit vector pointing from the surface toward the light
    pub fn direction(&self) -> Vec3 {
        (self.position - self.target).normalize_or_zero()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HemisphereLight {
    pub sky: Color,
    pub ground: Color,
    pub intensity: f32,
    pub up: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
    /// Cutoff distance; 0 means unbounded
    pub range: f32,
    pub decay: f32,
}

impl PointLight {
    pub fn new(hex: u32, intensity: f32, range: f32, position: Vec3) -> Self {
        Self {
            color: Color::from_hex(hex),
            intensity,
            position,
            range,
            decay: 2.0,
        }
    }
}

/// Fixed lighting rig. No light casts shadows.
#[derive(Debug, Clone, PartialEq)]
pub struct LightRig {
    pub ambient: AmbientLight,
    pub directional: DirectionalLight,
    pub hemisphere: HemisphereLight,
    pub points: Vec<PointLight>,
}

impl LightRig {
    pub fn showcase() -> Self {
        Self {
            ambient: AmbientLight {
                color: Color::from_hex(0xffffff),
                intensity: 0.5,
            },
            directional: DirectionalLight {
                color: Color::from_hex(0xffffff),
                intensity: 1.0,
                position: Vec3::new(5.0, 5.0, 5.0),
                target: Vec3::ZERO,
            },
            hemisphere: HemisphereLight {
                sky: Color::from_hex(0xffffbb),
                ground: Color::from_hex(0x080820),
                intensity: 0.5,
                up: Vec3::Y,
            },
            points: vec![
                PointLight::new(0xff0040, 1.0, 100.0, Vec3::new(3.0, 3.0, 3.0)),
                PointLight::new(0x0040ff, 1.0, 100.0, Vec3::new(-3.0, -3.0, -3.0)),
            ],
        }
    }
}
