//! In-memory collaborators for unit tests.

use std::collections::{HashMap, HashSet};

use holdsync_shared::interactor::InteractorId;
use holdsync_shared::object::{BodyHandle, NetworkId, ObjectId, PeerId};
use holdsync_shared::types::{Transform, Vector3};

use crate::context::Collaborators;
use crate::net::{NetworkLayer, OwnershipClaim};
use crate::notify::{Notification, OneShot};
use crate::ownership::Ownership;
use crate::physics::{BodyFlags, BodyMode, ConstraintId, ConstraintOptions, PhysicsEngine};
use crate::scene::{HitTester, Permissions, Scene};

pub(crate) const MOVE: &str = "spawn_and_move_media";

#[derive(Debug, Clone)]
pub(crate) struct FakeObject {
    pub parent: Option<ObjectId>,
    pub transform: Transform,
    pub interactable: bool,
    pub body: BodyHandle,
}

#[derive(Default)]
pub(crate) struct FakeScene {
    pub objects: HashMap<ObjectId, FakeObject>,
    pub disabled: HashSet<InteractorId>,
    pub missing_proxy_bodies: HashSet<InteractorId>,
    pub transform_writes: usize,
}

impl FakeScene {
    pub fn set_parent(&mut self, child: ObjectId, parent: ObjectId) {
        if let Some(o) = self.objects.get_mut(&child) {
            o.parent = Some(parent);
        }
    }

    pub fn set_body(&mut self, obj: ObjectId, body: BodyHandle) {
        if let Some(o) = self.objects.get_mut(&obj) {
            o.body = body;
        }
    }

    pub fn move_to(&mut self, obj: ObjectId, x: f32) {
        if let Some(o) = self.objects.get_mut(&obj) {
            o.transform = Transform::from_location(Vector3::new(x, 0.0, 0.0));
        }
    }

    pub fn x(&self, obj: ObjectId) -> f32 {
        self.objects[&obj].transform.location.x
    }

    pub fn remove(&mut self, obj: ObjectId) {
        self.objects.remove(&obj);
    }
}

impl Scene for FakeScene {
    fn exists(&self, obj: ObjectId) -> bool {
        self.objects.contains_key(&obj)
    }

    fn parent(&self, obj: ObjectId) -> Option<ObjectId> {
        self.objects.get(&obj).and_then(|o| o.parent)
    }

    fn transform(&self, obj: ObjectId) -> Option<Transform> {
        self.objects.get(&obj).map(|o| o.transform)
    }

    fn set_transform(&mut self, obj: ObjectId, transform: Transform) {
        if let Some(o) = self.objects.get_mut(&obj) {
            o.transform = transform;
            self.transform_writes += 1;
        }
    }

    fn is_interactable(&self, obj: ObjectId) -> bool {
        self.objects.get(&obj).map_or(false, |o| o.interactable)
    }

    fn body(&self, obj: ObjectId) -> BodyHandle {
        self.objects.get(&obj).map_or(BodyHandle::INVALID, |o| o.body)
    }

    fn interactor_body(&self, interactor: InteractorId) -> BodyHandle {
        if self.missing_proxy_bodies.contains(&interactor) {
            BodyHandle::INVALID
        } else {
            BodyHandle(1000 + interactor.index() as i32)
        }
    }

    fn interactor_enabled(&self, interactor: InteractorId) -> bool {
        !self.disabled.contains(&interactor)
    }
}

#[derive(Default)]
pub(crate) struct FakeHits {
    pub targets: HashMap<InteractorId, ObjectId>,
}

impl FakeHits {
    pub fn aim(&mut self, interactor: InteractorId, obj: ObjectId) {
        self.targets.insert(interactor, obj);
    }

    pub fn clear(&mut self, interactor: InteractorId) {
        self.targets.remove(&interactor);
    }
}

impl HitTester for FakeHits {
    fn nearest_target(&self, interactor: InteractorId) -> Option<ObjectId> {
        self.targets.get(&interactor).copied()
    }
}

#[derive(Default)]
pub(crate) struct FakePermissions {
    pub granted: HashSet<String>,
}

impl FakePermissions {
    pub fn grant(&mut self, capability: &str) {
        self.granted.insert(capability.to_string());
    }

    pub fn revoke(&mut self, capability: &str) {
        self.granted.remove(capability);
    }
}

impl Permissions for FakePermissions {
    fn can(&self, capability: &str, _obj: ObjectId) -> bool {
        self.granted.contains(capability)
    }
}

#[derive(Default)]
pub(crate) struct FakePhysics {
    pub constraints: HashMap<ConstraintId, (BodyHandle, BodyHandle)>,
    pub modes: HashMap<BodyHandle, (BodyMode, BodyFlags)>,
    pub added: usize,
    pub removed: usize,
}

impl FakePhysics {
    pub fn constraints_on(&self, body: BodyHandle) -> usize {
        self.constraints.values().filter(|(_, b)| *b == body).count()
    }

    pub fn mode(&self, body: BodyHandle) -> Option<(BodyMode, BodyFlags)> {
        self.modes.get(&body).copied()
    }
}

impl PhysicsEngine for FakePhysics {
    fn add_constraint(
        &mut self,
        id: ConstraintId,
        body_a: BodyHandle,
        body_b: BodyHandle,
        _options: &ConstraintOptions,
    ) {
        self.constraints.insert(id, (body_a, body_b));
        self.added += 1;
    }

    fn remove_constraint(&mut self, id: ConstraintId) {
        if self.constraints.remove(&id).is_some() {
            self.removed += 1;
        }
    }

    fn set_body_mode(&mut self, body: BodyHandle, mode: BodyMode, flags: BodyFlags) {
        self.modes.insert(body, (mode, flags));
    }
}

pub(crate) struct FakeNetwork {
    pub local: PeerId,
    pub ids: HashMap<ObjectId, NetworkId>,
    pub owners: HashMap<NetworkId, PeerId>,
    pub latches: HashMap<NetworkId, OneShot<()>>,
    pub claims: Vec<String>,
    pub refuse_claims: bool,
    pub clone_loads: Vec<(ObjectId, OneShot<ObjectId>)>,
    pub cloning_disabled: bool,
}

impl Default for FakeNetwork {
    fn default() -> Self {
        Self {
            local: PeerId(1),
            ids: HashMap::new(),
            owners: HashMap::new(),
            latches: HashMap::new(),
            claims: Vec::new(),
            refuse_claims: false,
            clone_loads: Vec::new(),
            cloning_disabled: false,
        }
    }
}

impl FakeNetwork {
    pub fn set_owner(&mut self, id: &str, peer: PeerId) {
        self.owners.insert(NetworkId::new(id), peer);
    }

    pub fn set_instantiated(&mut self, id: &str, instantiated: bool) {
        let mut latch = OneShot::new();
        if instantiated {
            latch.fire(());
        }
        self.latches.insert(NetworkId::new(id), latch);
    }

    pub fn instantiate(&mut self, id: &str) {
        if let Some(latch) = self.latches.get_mut(&NetworkId::new(id)) {
            latch.fire(());
        }
    }

    pub fn destroy(&mut self, id: &str) {
        if let Some(latch) = self.latches.get_mut(&NetworkId::new(id)) {
            latch.cancel();
        }
    }
}

impl NetworkLayer for FakeNetwork {
    fn local_peer(&self) -> PeerId {
        self.local
    }

    fn network_id(&self, obj: ObjectId) -> Option<NetworkId> {
        self.ids.get(&obj).cloned()
    }

    fn owner(&self, id: &NetworkId) -> Option<PeerId> {
        self.owners.get(id).copied()
    }

    fn request_ownership(&mut self, id: &NetworkId, claim_json: &str) -> bool {
        if self.refuse_claims {
            return false;
        }
        let Ok(claim) = OwnershipClaim::from_json(claim_json) else {
            return false;
        };
        assert_eq!(&claim.network_id, id);
        self.owners.insert(claim.network_id, claim.peer);
        self.claims.push(claim_json.to_string());
        true
    }

    fn is_instantiated(&self, id: &NetworkId) -> bool {
        self.latches.get(id).map_or(true, |l| l.is_fired())
    }

    fn on_instantiated(&mut self, id: &NetworkId) -> Notification<()> {
        self.latches.entry(id.clone()).or_default().subscribe()
    }

    fn duplicate(&mut self, obj: ObjectId) -> Option<Notification<ObjectId>> {
        if self.cloning_disabled {
            return None;
        }
        let mut latch = OneShot::new();
        let rx = latch.subscribe();
        self.clone_loads.push((obj, latch));
        Some(rx)
    }
}

/// Every fake collaborator, with helpers to populate the scene
#[derive(Default)]
pub(crate) struct Harness {
    pub scene: FakeScene,
    pub hits: FakeHits,
    pub permissions: FakePermissions,
    pub physics: FakePhysics,
    pub network: FakeNetwork,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Harness whose local peer holds the move capability
    pub fn permissive() -> Self {
        let mut h = Self::new();
        h.permissions.grant(MOVE);
        h
    }

    pub fn ctx(&mut self) -> Collaborators<'_> {
        Collaborators {
            scene: &mut self.scene,
            hit_test: &self.hits,
            permissions: &self.permissions,
            physics: &mut self.physics,
            network: &mut self.network,
        }
    }

    pub fn ownership<'s>(&'s mut self, capability: &'s str) -> Ownership<'s> {
        Ownership::new(&self.scene, &mut self.network, &self.permissions, capability)
    }

    /// Interactable, non-replicated object with a valid physics body
    pub fn add_object(&mut self, id: ObjectId) -> ObjectId {
        self.scene.objects.insert(
            id,
            FakeObject {
                parent: None,
                transform: Transform::identity(),
                interactable: true,
                body: BodyHandle(id as i32),
            },
        );
        id
    }

    /// Interactable, replicated, unowned object
    pub fn add_networked(&mut self, id: ObjectId, network_id: &str) -> ObjectId {
        self.add_object(id);
        self.network.ids.insert(id, NetworkId::new(network_id));
        id
    }

    /// Replicated object already owned by the local peer
    pub fn add_owned(&mut self, id: ObjectId, network_id: &str) -> ObjectId {
        self.add_networked(id, network_id);
        let local = self.network.local;
        self.network.set_owner(network_id, local);
        id
    }

    /// Finish loading the oldest pending clone as scene node `clone_id`
    pub fn finish_clone(&mut self, clone_id: ObjectId) -> ObjectId {
        let (source, mut latch) = self.network.clone_loads.remove(0);
        let transform = self.scene.transform(source).unwrap_or_default();
        self.add_owned(clone_id, &format!("clone-{}", clone_id));
        self.scene.set_transform(clone_id, transform);
        latch.fire(clone_id);
        clone_id
    }

    /// Destroy the oldest pending clone before it loads
    pub fn abort_clone(&mut self) {
        let (_, mut latch) = self.network.clone_loads.remove(0);
        latch.cancel();
    }
}
