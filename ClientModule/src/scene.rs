//! # Scene Collaborators
//!
//! Narrow views of the host scene: object lookup and transforms, hit-testing
//! for interactor proxies, and access-control checks. The host engine
//! implements these; the interaction core never owns scene data.

use holdsync_shared::interactor::InteractorId;
use holdsync_shared::object::{BodyHandle, ObjectId};
use holdsync_shared::types::Transform;

/// Scene-graph queries and transform writes
pub trait Scene {
    /// Whether the node still exists in the scene
    fn exists(&self, obj: ObjectId) -> bool;

    fn parent(&self, obj: ObjectId) -> Option<ObjectId>;

    fn transform(&self, obj: ObjectId) -> Option<Transform>;

    /// Assign a transform directly, bypassing physics
    fn set_transform(&mut self, obj: ObjectId, transform: Transform);

    /// Whether the node is tagged as something a user may pick up
    fn is_interactable(&self, obj: ObjectId) -> bool;

    /// Physics body of a scene object, [`BodyHandle::INVALID`] if it has none yet
    fn body(&self, obj: ObjectId) -> BodyHandle;

    /// Physics body of an interactor's proxy
    fn interactor_body(&self, interactor: InteractorId) -> BodyHandle;

    /// Whether the interactor is currently tracked (hand visible, cursor active)
    fn interactor_enabled(&self, interactor: InteractorId) -> bool;
}

/// Spatial query for interactor targets
pub trait HitTester {
    /// Nearest eligible target under the interactor's ray or collision proxy
    fn nearest_target(&self, interactor: InteractorId) -> Option<ObjectId>;
}

/// Access-control checks
pub trait Permissions {
    fn can(&self, capability: &str, obj: ObjectId) -> bool;
}
