mod geometry;
mod lights;

pub use geometry::{box_mesh, sphere_mesh, torus_mesh, MeshData};
pub use lights::{AmbientLight, DirectionalLight, HemisphereLight, LightRig, PointLight};

use glam::{Mat4, Quat, Vec3};

use crate::math::Color;
use crate::timeline::{Animatable, Channel, Property, Target, Value};

/// Nodes below this x scale count as hidden and skip idle motion
pub const VISIBILITY_THRESHOLD: f32 = 0.1;
pub const IDLE_AMPLITUDE: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Cube,
    Sphere,
    Torus,
}

impl Shape {
    pub fn mesh(&self) -> MeshData {
        match self {
            Shape::Cube => box_mesh(1.0, 1.0, 1.0),
            Shape::Sphere => sphere_mesh(0.7, 32, 32),
            Shape::Torus => torus_mesh(0.7, 0.3, 16, 100),
        }
    }
}

/// Position, Euler XYZ rotation (radians) and per-axis scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn quat(&self) -> Quat {
        Quat::from_rotation_x(self.rotation.x)
            * Quat::from_rotation_y(self.rotation.y)
            * Quat::from_rotation_z(self.rotation.z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    pub emissive: Color,
    pub roughness: f32,
    pub metalness: f32,
}

impl Material {
    pub fn standard(color: u32, emissive: u32, roughness: f32, metalness: f32) -> Self {
        Self {
            color: Color::from_hex(color),
            emissive: Color::from_hex(emissive),
            roughness,
            metalness,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub shape: Shape,
    pub transform: Transform,
    pub material: Material,
    /// Phase of the idle oscillator, radians
    pub idle_phase: f32,
    /// Vertical idle offset added on top of `transform.position`
    pub idle_offset: f32,
}

impl Node {
    pub fn new(name: &str, shape: Shape, transform: Transform, material: Material) -> Self {
        Self {
            name: name.to_string(),
            shape,
            transform,
            material,
            idle_phase: 0.0,
            idle_offset: 0.0,
        }
    }

    pub fn with_idle_phase(mut self, phase: f32) -> Self {
        self.idle_phase = phase;
        self
    }

    pub fn is_visible(&self) -> bool {
        self.transform.scale.x > VISIBILITY_THRESHOLD
    }

    /// Zero scale on any axis collapses the mesh; nothing to rasterize
    pub fn is_drawable(&self) -> bool {
        let s = self.transform.scale;
        s.x != 0.0 && s.y != 0.0 && s.z != 0.0
    }

    /// Position including the idle offset
    pub fn world_position(&self) -> Vec3 {
        self.transform.position + Vec3::Y * self.idle_offset
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.transform.scale,
            self.transform.quat(),
            self.world_position(),
        )
    }

    /// Advance the idle oscillator; hidden nodes keep their last offset
    pub fn bob(&mut self, time: f64) -> bool {
        if !self.is_visible() {
            return false;
        }
        self.idle_offset = ((time + self.idle_phase as f64).sin() as f32) * IDLE_AMPLITUDE;
        true
    }

    fn channel(&self, channel: Channel) -> Value {
        let t = &self.transform;
        match channel {
            Channel::PositionX => Value::Scalar(t.position.x),
            Channel::PositionY => Value::Scalar(t.position.y),
            Channel::PositionZ => Value::Scalar(t.position.z),
            Channel::RotationX => Value::Scalar(t.rotation.x),
            Channel::RotationY => Value::Scalar(t.rotation.y),
            Channel::RotationZ => Value::Scalar(t.rotation.z),
            Channel::ScaleX => Value::Scalar(t.scale.x),
            Channel::ScaleY => Value::Scalar(t.scale.y),
            Channel::ScaleZ => Value::Scalar(t.scale.z),
            Channel::Color => Value::Color(self.material.color),
            Channel::Emissive => Value::Color(self.material.emissive),
        }
    }

    fn set_channel(&mut self, channel: Channel, value: Value) -> bool {
        match channel {
            Channel::Color => return value.as_color().map(|c| self.material.color = c).is_some(),
            Channel::Emissive => {
                return value.as_color().map(|c| self.material.emissive = c).is_some()
            }
            _ => {}
        }
        let t = &mut self.transform;
        let slot = match channel {
            Channel::Color | Channel::Emissive => return false,
            Channel::PositionX => &mut t.position.x,
            Channel::PositionY => &mut t.position.y,
            Channel::PositionZ => &mut t.position.z,
            Channel::RotationX => &mut t.rotation.x,
            Channel::RotationY => &mut t.rotation.y,
            Channel::RotationZ => &mut t.rotation.z,
            Channel::ScaleX => &mut t.scale.x,
            Channel::ScaleY => &mut t.scale.y,
            Channel::ScaleZ => &mut t.scale.z,
        };
        value.as_scalar().map(|v| *slot = v).is_some()
    }
}

/// Scene graph: background, renderable nodes and the light rig
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub background: Color,
    pub nodes: Vec<Node>,
    pub lights: LightRig,
}

/// Handles to the showcase nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowcaseNodes {
    pub cube: NodeId,
    pub sphere: NodeId,
    pub torus: NodeId,
}

impl ShowcaseNodes {
    pub fn all(&self) -> [NodeId; 3] {
        [self.cube, self.sphere, self.torus]
    }
}

impl Scene {
    pub fn new(background: Color, lights: LightRig) -> Self {
        Self {
            background,
            nodes: Vec::new(),
            lights,
        }
    }

    pub fn add(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Cube, sphere and torus side by side with the fixed light rig
    pub fn showcase() -> (Self, ShowcaseNodes) {
        let mut scene = Scene::new(Color::from_hex(0x0a0a1a), LightRig::showcase());

        let cube = scene.add(
            Node::new(
                "cube",
                Shape::Cube,
                Transform::at(Vec3::new(-2.0, 0.0, 0.0)),
                Material::standard(0x4a6fa5, 0x004400, 0.2, 0.8),
            )
            .with_idle_phase(0.0),
        );
        let sphere = scene.add(
            Node::new(
                "sphere",
                Shape::Sphere,
                Transform::at(Vec3::ZERO),
                Material::standard(0xff0000, 0x440000, 0.1, 0.9),
            )
            .with_idle_phase(1.0),
        );
        let torus = scene.add(
            Node::new(
                "torus",
                Shape::Torus,
                Transform::at(Vec3::new(2.0, 0.0, 0.0)),
                Material::standard(0x0000ff, 0x000044, 0.3, 0.7),
            )
            .with_idle_phase(2.0),
        );

        (scene, ShowcaseNodes { cube, sphere, torus })
    }

    /// Idle motion for every visible node at wall-clock `time` seconds
    pub fn apply_idle_motion(&mut self, time: f64) {
        for node in &mut self.nodes {
            node.bob(time);
        }
    }
}

impl Animatable for Scene {
    fn get(&self, property: Property) -> Option<Value> {
        match property.target {
            Target::Node(id) => self.node(id).map(|n| n.channel(property.channel)),
            Target::Camera => None,
        }
    }

    fn set(&mut self, property: Property, value: Value) -> bool {
        match property.target {
            Target::Node(id) => self
                .node_mut(id)
                .is_some_and(|n| n.set_channel(property.channel, value)),
            Target::Camera => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_showcase_layout() {
        let (scene, ids) = Scene::showcase();
        assert_eq!(scene.nodes.len(), 3);
        let xs: Vec<f32> = ids
            .all()
            .iter()
            .map(|&id| scene.node(id).unwrap().transform.position.x)
            .collect();
        assert_eq!(xs, vec![-2.0, 0.0, 2.0]);
        assert_eq!(scene.node(ids.torus).unwrap().idle_phase, 2.0);
        assert_eq!(scene.lights.points.len(), 2);
    }

    #[test]
    fn test_get_and_set_channels() {
        let (mut scene, ids) = Scene::showcase();
        let p = Property::node(ids.sphere, Channel::PositionY);
        assert!(scene.set(p, Value::Scalar(1.5)));
        assert_eq!(scene.get(p), Some(Value::Scalar(1.5)));

        let c = Property::node(ids.sphere, Channel::Color);
        assert!(scene.set(c, Value::Color(Color::WHITE)));
        assert_eq!(scene.node(ids.sphere).unwrap().material.color, Color::WHITE);

        // kind mismatch and unknown targets are rejected
        assert!(!scene.set(c, Value::Scalar(1.0)));
        assert!(!scene.set(p, Value::Color(Color::BLACK)));
        assert!(!scene.set(Property::node(NodeId::new(9), Channel::ScaleX), Value::Scalar(1.0)));
        assert_eq!(scene.get(Property::camera(Channel::PositionZ)), None);
    }

    #[test]
    fn test_bob_skips_hidden_nodes() {
        let (mut scene, ids) = Scene::showcase();
        scene.apply_idle_motion(0.5);
        let before = scene.node(ids.cube).unwrap().idle_offset;
        assert!((before - 0.5f64.sin() as f32 * 0.1).abs() < 1e-6);

        scene.node_mut(ids.cube).unwrap().transform.scale = Vec3::ZERO;
        scene.apply_idle_motion(2.0);
        assert_eq!(scene.node(ids.cube).unwrap().idle_offset, before);
        // still visible nodes keep moving
        let sphere = scene.node(ids.sphere).unwrap();
        assert!((sphere.idle_offset - 3.0f64.sin() as f32 * 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_model_matrix_includes_idle_offset() {
        let mut node = Node::new(
            "n",
            Shape::Cube,
            Transform::at(Vec3::new(1.0, 2.0, 3.0)),
            Material::standard(0xffffff, 0x000000, 0.5, 0.5),
        );
        node.idle_offset = 0.25;
        let m = node.model_matrix();
        assert_eq!(m.w_axis.truncate(), Vec3::new(1.0, 2.25, 3.0));
    }

    #[test]
    fn test_quat_applies_x_then_y_then_z() {
        let t = Transform {
            rotation: Vec3::new(0.3, 0.5, 0.7),
            ..Default::default()
        };
        let expected = Mat4::from_rotation_x(0.3) * Mat4::from_rotation_y(0.5) * Mat4::from_rotation_z(0.7);
        let actual = Mat4::from_quat(t.quat());
        assert!(actual.abs_diff_eq(expected, 1e-5));
    }
}
