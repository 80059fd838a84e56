//! # Common Types
//!
//! Spatial value types shared by the interaction core and the network layer.

use serde::{Serialize, Deserialize};

/// Vector3 representation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0, z: 0.0 }
    }

    pub fn one() -> Self {
        Self { x: 1.0, y: 1.0, z: 1.0 }
    }
}

/// Quaternion representation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quat {
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn identity() -> Self {
        Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 }
    }
}

/// Local transform of a scene object (location, rotation, scale).
///
/// This is the value captured as the "pre-hold" snapshot when a grab starts
/// and the value written back when an undo or redo step is replayed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub location: Vector3,
    pub rotation: Quat,
    pub scale: Vector3,
}

impl Transform {
    pub fn new(location: Vector3, rotation: Quat, scale: Vector3) -> Self {
        Self { location, rotation, scale }
    }

    pub fn identity() -> Self {
        Self {
            location: Vector3::zero(),
            rotation: Quat::identity(),
            scale: Vector3::one(),
        }
    }

    /// Identity rotation and scale, translated to `location`.
    pub fn from_location(location: Vector3) -> Self {
        Self {
            location,
            ..Self::identity()
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
