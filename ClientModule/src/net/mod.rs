//! # Network Module
//!
//! Interface to the replication layer that distributes scene objects and
//! their ownership between peers. The transport and consensus underneath are
//! not part of this crate; it only consumes presence, ownership and
//! instantiation facts and emits ownership claims.

use holdsync_shared::object::{NetworkId, ObjectId, PeerId};
use serde::{Deserialize, Serialize};

use crate::notify::Notification;

/// Ownership claim broadcast to the other peers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipClaim {
    /// Replicated identity being claimed
    pub network_id: NetworkId,

    /// Peer asserting authority
    pub peer: PeerId,

    /// Local scene node the claim was issued for (diagnostics only)
    pub object: ObjectId,
}

impl OwnershipClaim {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Distributed ownership and replication layer
pub trait NetworkLayer {
    /// Identity of the local peer
    fn local_peer(&self) -> PeerId;

    /// Replicated identity of a scene node, `None` if it does not replicate
    fn network_id(&self, obj: ObjectId) -> Option<NetworkId>;

    /// Current owner of a replicated object according to the local replica
    fn owner(&self, id: &NetworkId) -> Option<PeerId>;

    /// Send a JSON-encoded [`OwnershipClaim`]. Fire-and-forget: the layer
    /// applies the claim to its local replica optimistically and returns
    /// whether it accepted the message for broadcast.
    fn request_ownership(&mut self, id: &NetworkId, claim_json: &str) -> bool;

    /// Whether the object has been fully instantiated across the network
    fn is_instantiated(&self, id: &NetworkId) -> bool;

    /// One-shot notification fired when the object becomes instantiated
    fn on_instantiated(&mut self, id: &NetworkId) -> Notification<()>;

    /// Duplicate a replicated object. The notification resolves with the
    /// clone's scene node once it has finished loading. `None` if the
    /// object cannot be cloned.
    fn duplicate(&mut self, obj: ObjectId) -> Option<Notification<ObjectId>>;
}
