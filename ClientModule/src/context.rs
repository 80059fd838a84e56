//! # Tick Context
//!
//! The external collaborators, borrowed for the duration of one tick and
//! handed to each component in turn.

use crate::net::NetworkLayer;
use crate::ownership::Ownership;
use crate::physics::PhysicsEngine;
use crate::scene::{HitTester, Permissions, Scene};

/// Borrowed collaborators for one tick
pub struct Collaborators<'a> {
    pub scene: &'a mut dyn Scene,
    pub hit_test: &'a dyn HitTester,
    pub permissions: &'a dyn Permissions,
    pub physics: &'a mut dyn PhysicsEngine,
    pub network: &'a mut dyn NetworkLayer,
}

impl<'a> Collaborators<'a> {
    /// Ownership view gated on `capability`
    pub fn ownership<'b>(&'b mut self, capability: &'b str) -> Ownership<'b> {
        Ownership::new(&*self.scene, &mut *self.network, self.permissions, capability)
    }
}
