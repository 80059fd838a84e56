//! # Ownership Service
//!
//! Thin adapter over the distributed ownership layer. Ownership follows an
//! optimistic-concurrency protocol: a peer claims an object and proceeds
//! immediately; losing a race to another peer is noticed reactively on a
//! later tick when [`Ownership::is_mine`] turns false. Nothing here blocks or
//! waits for an acknowledgement.

use std::future::Future;

use holdsync_shared::object::{NetworkId, ObjectId};
use log::{debug, trace, warn};

use crate::error::{OwnershipError, OwnershipResult};
use crate::net::{NetworkLayer, OwnershipClaim};
use crate::scene::{Permissions, Scene};

/// Per-call view over the collaborators needed to answer ownership questions
pub struct Ownership<'a> {
    scene: &'a dyn Scene,
    network: &'a mut dyn NetworkLayer,
    permissions: &'a dyn Permissions,
    capability: &'a str,
}

impl<'a> Ownership<'a> {
    /// `capability` is the grant required before a claim is sent.
    pub fn new(
        scene: &'a dyn Scene,
        network: &'a mut dyn NetworkLayer,
        permissions: &'a dyn Permissions,
        capability: &'a str,
    ) -> Self {
        Self { scene, network, permissions, capability }
    }

    /// True iff the node itself participates in replication
    pub fn is_synchronized(&self, obj: ObjectId) -> bool {
        self.network.network_id(obj).is_some()
    }

    pub fn network_id(&self, obj: ObjectId) -> Option<NetworkId> {
        self.network.network_id(obj)
    }

    /// Nearest node, starting with `obj` itself, that replicates
    pub fn networked_ancestor(&self, obj: ObjectId) -> Option<(ObjectId, NetworkId)> {
        let mut current = Some(obj);
        while let Some(node) = current {
            if let Some(id) = self.network.network_id(node) {
                return Some((node, id));
            }
            current = self.scene.parent(node);
        }
        None
    }

    /// Whether the local peer owns the networked entity `obj` belongs to.
    ///
    /// Calling this for a node with no networked ancestor is a wiring mistake
    /// and is reported as [`OwnershipError::NotNetworked`].
    pub fn is_mine(&self, obj: ObjectId) -> OwnershipResult<bool> {
        let (_, id) = self
            .networked_ancestor(obj)
            .ok_or(OwnershipError::NotNetworked(obj))?;
        Ok(self.network.owner(&id) == Some(self.network.local_peer()))
    }

    /// Returns true if the local peer already owns `obj`, otherwise tries to
    /// claim it. The claim is refused when the local peer lacks the move
    /// capability. A `true` result is permission to proceed optimistically,
    /// not a confirmed lock.
    pub fn ensure_ownership(&mut self, obj: ObjectId) -> bool {
        let Some((entity, network_id)) = self.networked_ancestor(obj) else {
            warn!("ensure_ownership called for non-networked object {}", obj);
            return false;
        };

        let local = self.network.local_peer();
        if self.network.owner(&network_id) == Some(local) {
            return true;
        }

        if !self.permissions.can(self.capability, obj) {
            debug!("Ownership claim for {} denied: missing '{}'", obj, self.capability);
            return false;
        }

        let claim = OwnershipClaim {
            network_id: network_id.clone(),
            peer: local,
            object: entity,
        };
        let json = match claim.to_json() {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to encode ownership claim for {}: {}", obj, e);
                return false;
            }
        };

        let accepted = self.network.request_ownership(&network_id, &json);
        if accepted {
            trace!("Claimed ownership of {} ({})", network_id, obj);
        } else {
            debug!("Network layer refused ownership claim for {} ({})", network_id, obj);
        }
        accepted
    }

    /// Objects outside replication need no claim; replicated ones must be
    /// owned (or successfully claimed) before they are mutated.
    pub fn is_non_networked_or_ensure_ownership(&mut self, obj: ObjectId) -> bool {
        if self.networked_ancestor(obj).is_none() {
            return true;
        }
        self.ensure_ownership(obj)
    }

    /// Resolve the networked entity `obj` belongs to, waiting for it to be
    /// instantiated across the network if necessary.
    ///
    /// The returned future borrows nothing, so it can outlive this view. It
    /// fails with [`OwnershipError::Cancelled`] if the entity is destroyed
    /// before its "instantiated" notification fires.
    pub fn networked_entity(
        &mut self,
        obj: ObjectId,
    ) -> impl Future<Output = OwnershipResult<ObjectId>> + 'static {
        let resolved = match self.networked_ancestor(obj) {
            Some((entity, id)) => {
                let pending = if self.network.is_instantiated(&id) {
                    None
                } else {
                    Some(self.network.on_instantiated(&id))
                };
                Ok((entity, pending))
            }
            None => Err(OwnershipError::NotNetworked(obj)),
        };

        async move {
            match resolved {
                Err(e) => Err(e),
                Ok((entity, None)) => Ok(entity),
                Ok((entity, Some(instantiated))) => match instantiated.await {
                    Ok(()) => Ok(entity),
                    Err(_) => Err(OwnershipError::Cancelled(entity)),
                },
            }
        }
    }
}
