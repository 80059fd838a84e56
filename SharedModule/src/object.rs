//! # Shared Object Identifiers
//!
//! Identifiers for scene objects, their replicated identities, peers and
//! physics bodies.

use serde::{Serialize, Deserialize};
use std::fmt;

/// Local identifier of a scene node. Stable for the lifetime of the node.
pub type ObjectId = u64;

/// Opaque token identifying a replicated object across peers.
///
/// Only objects that opted into replication have one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkId(pub String);

impl NetworkId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of a participant in the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeerId(pub u64);

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "peer-{}", self.0)
    }
}

/// Opaque per-object handle into the physics engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyHandle(pub i32);

impl BodyHandle {
    /// Handle of a body the physics engine has not created (yet).
    pub const INVALID: BodyHandle = BodyHandle(-1);

    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl Default for BodyHandle {
    fn default() -> Self {
        Self::INVALID
    }
}
