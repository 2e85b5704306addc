use std::fmt;

use crate::math::Color;
use crate::scene::NodeId;

/// Object whose property is animated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Node(NodeId),
    Camera,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    PositionX,
    PositionY,
    PositionZ,
    RotationX,
    RotationY,
    RotationZ,
    ScaleX,
    ScaleY,
    ScaleZ,
    Color,
    Emissive,
}

impl Channel {
    pub const SCALE: [Channel; 3] = [Channel::ScaleX, Channel::ScaleY, Channel::ScaleZ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Property {
    pub target: Target,
    pub channel: Channel,
}

impl Property {
    pub fn node(id: NodeId, channel: Channel) -> Self {
        Self {
            target: Target::Node(id),
            channel,
        }
    }

    pub fn camera(channel: Channel) -> Self {
        Self {
            target: Target::Camera,
            channel,
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target {
            Target::Node(id) => write!(f, "node#{}.{:?}", id.index(), self.channel),
            Target::Camera => write!(f, "camera.{:?}", self.channel),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Scalar(f32),
    Color(Color),
}

impl Value {
    pub fn same_kind(&self, other: &Value) -> bool {
        matches!(
            (self, other),
            (Value::Scalar(_), Value::Scalar(_)) | (Value::Color(_), Value::Color(_))
        )
    }

    /// `self + (to - from) * t`; `None` when the kinds differ
    pub fn offset_by(self, from: Value, to: Value, t: f32) -> Option<Value> {
        match (self, from, to) {
            (Value::Scalar(v), Value::Scalar(a), Value::Scalar(b)) => {
                Some(Value::Scalar(v + (b - a) * t))
            }
            (Value::Color(v), Value::Color(a), Value::Color(b)) => {
                Some(Value::Color(v + (b - a) * t))
            }
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<f32> {
        match self {
            Value::Scalar(v) => Some(*v),
            Value::Color(_) => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            Value::Color(c) => Some(*c),
            Value::Scalar(_) => None,
        }
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Scalar(v)
    }
}

impl From<Color> for Value {
    fn from(c: Color) -> Self {
        Value::Color(c)
    }
}

/// Something the timeline can read and write properties on
pub trait Animatable {
    /// Current value, or `None` if the property is not exposed
    fn get(&self, property: Property) -> Option<Value>;

    /// Write a value; returns false if the property or value kind is not accepted
    fn set(&mut self, property: Property, value: Value) -> bool;
}
