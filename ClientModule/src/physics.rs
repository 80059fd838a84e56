//! # Physics Engine Interface
//!
//! The physics engine is an external black box. The interaction core only
//! asks it to create and destroy constraints between bodies and to switch a
//! body's simulation mode.

use holdsync_shared::interactor::InteractorId;
use holdsync_shared::object::{BodyHandle, ObjectId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulation mode of a physics body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyMode {
    Dynamic,
    Kinematic,
}

/// Extra flags accompanying a body mode change
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyFlags {
    /// Keep the body awake even when it comes to rest
    pub disable_deactivation: bool,
}

impl BodyFlags {
    /// Flags for a body that is being driven by a hold constraint
    pub fn held() -> Self {
        Self { disable_deactivation: true }
    }

    /// Flags for a free body that may go to sleep
    pub fn free() -> Self {
        Self { disable_deactivation: false }
    }
}

/// Constraint flavour requested from the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintKind {
    Lock,
    Fixed,
    Spring,
}

/// Options passed through to [`PhysicsEngine::add_constraint`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstraintOptions {
    pub kind: ConstraintKind,
}

impl Default for ConstraintOptions {
    fn default() -> Self {
        Self { kind: ConstraintKind::Lock }
    }
}

/// Identity of one hold constraint: the held object plus the interactor
/// whose proxy body drives it. An interactor constrains at most one object
/// at a time, so this pair is unique among live constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConstraintId {
    pub object: ObjectId,
    pub interactor: InteractorId,
}

impl fmt::Display for ConstraintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.object, self.interactor)
    }
}

/// Constraint and body-mode calls consumed from the physics engine
pub trait PhysicsEngine {
    fn add_constraint(
        &mut self,
        id: ConstraintId,
        body_a: BodyHandle,
        body_b: BodyHandle,
        options: &ConstraintOptions,
    );

    fn remove_constraint(&mut self, id: ConstraintId);

    fn set_body_mode(&mut self, body: BodyHandle, mode: BodyMode, flags: BodyFlags);
}
