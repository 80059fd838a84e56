//! # Interaction State Machine
//!
//! Tracks what each of the four interactors hovers and holds. Each tick an
//! idle interactor hit-tests for a target and grabs it when the grab input is
//! active and the permission and ownership checks pass; a holding interactor
//! keeps its object until the grab input is released or another peer takes
//! ownership of the object.
//!
//! Exclusion rules keep the hand and cursor on one side from competing: a
//! remote cursor only acquires targets while its hand is neither holding nor
//! hovering, and a hand does not acquire while the opposite-side cursor is
//! holding. These rules only gate acquisition. An interactor that already
//! holds is always ticked so its release is observed.

use holdsync_shared::constants::INTERACTOR_COUNT;
use holdsync_shared::interactor::{InteractorId, InteractorKind};
use holdsync_shared::object::ObjectId;
use holdsync_shared::types::Transform;
use log::{debug, trace};
use serde::Serialize;
use std::ops::{Index, IndexMut};
use tokio::sync::oneshot::error::TryRecvError;

use crate::config::InteractionConfig;
use crate::context::Collaborators;
use crate::notify::Notification;

pub mod input;

pub use input::{InputFrame, InteractorInput};

/// Hover/hold state of one interactor
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InteractorState {
    pub hovered: Option<ObjectId>,
    pub held: Option<ObjectId>,

    /// A duplicate was requested and the clone has not finished loading
    pub spawning: bool,

    /// The hold is driven by a physics constraint rather than by direct
    /// transform assignment
    pub constraining: bool,

    /// Transform of the held object at the instant it was grabbed
    pub pre_hold_transform: Transform,
}

impl Default for InteractorState {
    fn default() -> Self {
        Self {
            hovered: None,
            held: None,
            spawning: false,
            constraining: true,
            pre_hold_transform: Transform::identity(),
        }
    }
}

impl InteractorState {
    pub fn is_idle(&self) -> bool {
        self.held.is_none() && !self.spawning
    }

    fn clear_hold(&mut self) {
        self.held = None;
        self.hovered = None;
        self.constraining = true;
    }
}

/// State of all four interactors at the end of a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct InteractionSnapshot {
    states: [InteractorState; INTERACTOR_COUNT],
}

impl InteractionSnapshot {
    pub fn iter(&self) -> impl Iterator<Item = (InteractorId, &InteractorState)> + '_ {
        InteractorId::ALL.into_iter().map(move |id| (id, &self.states[id.index()]))
    }

    /// Interactor currently holding `obj`, if any
    pub fn holder_of(&self, obj: ObjectId) -> Option<InteractorId> {
        self.iter()
            .find(|(_, state)| state.held == Some(obj))
            .map(|(id, _)| id)
    }

    pub fn is_held(&self, obj: ObjectId) -> bool {
        self.holder_of(obj).is_some()
    }

    pub fn is_holding_anything(&self) -> bool {
        self.states.iter().any(|s| s.held.is_some())
    }
}

impl Index<InteractorId> for InteractionSnapshot {
    type Output = InteractorState;

    fn index(&self, id: InteractorId) -> &InteractorState {
        &self.states[id.index()]
    }
}

impl IndexMut<InteractorId> for InteractionSnapshot {
    fn index_mut(&mut self, id: InteractorId) -> &mut InteractorState {
        &mut self.states[id.index()]
    }
}

/// Hold transitions produced by a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoldEvent {
    Grabbed {
        interactor: InteractorId,
        object: ObjectId,
    },
    Released {
        interactor: InteractorId,
        object: ObjectId,
        from: Transform,
        to: Transform,
        /// The hold was physics-driven, so its net effect belongs in the
        /// undo history
        record_undo: bool,
    },
    CloneRequested {
        interactor: InteractorId,
        source: ObjectId,
    },
    CloneAttached {
        interactor: InteractorId,
        object: ObjectId,
    },
}

/// Per-interactor hover/hold tracking
#[derive(Debug, Default)]
pub struct InteractionStateMachine {
    state: InteractionSnapshot,
    pending_clones: [Option<Notification<ObjectId>>; INTERACTOR_COUNT],
}

impl InteractionStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> InteractionSnapshot {
        self.state
    }

    pub fn state(&self, id: InteractorId) -> &InteractorState {
        &self.state[id]
    }

    pub fn is_held(&self, obj: ObjectId) -> bool {
        self.state.is_held(obj)
    }

    /// Switch a hold between physics-driven and direct manipulation. Ignored
    /// while `id` holds nothing; every hold starts constrained.
    pub fn set_constraining(&mut self, id: InteractorId, constraining: bool) {
        if self.state[id].held.is_none() {
            debug!("Ignoring constraining={} for {}: not holding", constraining, id);
            return;
        }
        self.state[id].constraining = constraining;
    }

    /// Drop every hold on `obj` without recording undo history. Used when
    /// the object is deleted from under a hold.
    pub fn release(&mut self, obj: ObjectId) {
        for id in InteractorId::ALL {
            if self.state[id].held == Some(obj) {
                debug!("{} force-released {}", id, obj);
                self.state[id].clear_hold();
            }
        }
    }

    /// Advance every interactor by one tick
    pub fn tick(
        &mut self,
        input: &InputFrame,
        ctx: &mut Collaborators<'_>,
        config: &InteractionConfig,
    ) -> Vec<HoldEvent> {
        let mut events = Vec::new();
        for id in InteractorId::ALL {
            if !self.state[id].is_idle() {
                self.maintain(id, input, ctx, config, &mut events);
            } else if self.may_acquire(id, ctx) {
                self.acquire(id, input, ctx, config, &mut events);
            } else {
                self.state[id].hovered = None;
            }
        }
        events
    }

    fn may_acquire(&self, id: InteractorId, ctx: &Collaborators<'_>) -> bool {
        if !ctx.scene.interactor_enabled(id) {
            return false;
        }
        match id.kind() {
            InteractorKind::Hand => {
                let cursor = InteractorId::remote(id.side().opposite());
                self.state[cursor].held.is_none()
            }
            InteractorKind::Remote => {
                let hand = &self.state[id.counterpart()];
                hand.held.is_none() && hand.hovered.is_none()
            }
        }
    }

    fn acquire(
        &mut self,
        id: InteractorId,
        input: &InputFrame,
        ctx: &mut Collaborators<'_>,
        config: &InteractionConfig,
        events: &mut Vec<HoldEvent>,
    ) {
        let target = ctx
            .hit_test
            .nearest_target(id)
            .filter(|&obj| ctx.scene.exists(obj) && ctx.scene.is_interactable(obj));
        if self.state[id].hovered != target {
            trace!("{} hover {:?} -> {:?}", id, self.state[id].hovered, target);
        }
        self.state[id].hovered = target;

        let Some(target) = target else { return };
        let pressed = input.get(id);
        if !pressed.grab {
            return;
        }

        if pressed.duplicate {
            self.request_clone(id, target, ctx, config, events);
            return;
        }

        if let Some(holder) = self.state.holder_of(target) {
            trace!("{} cannot grab {}: held by {}", id, target, holder);
            return;
        }
        if !ctx.permissions.can(&config.move_capability, target) {
            debug!("{} grab of {} denied: missing '{}'", id, target, config.move_capability);
            return;
        }
        if !ctx
            .ownership(&config.move_capability)
            .is_non_networked_or_ensure_ownership(target)
        {
            debug!("{} grab of {} aborted: ownership unavailable", id, target);
            return;
        }

        let state = &mut self.state[id];
        state.held = Some(target);
        state.hovered = None;
        state.pre_hold_transform = ctx.scene.transform(target).unwrap_or_default();
        debug!("{} grabbed {}", id, target);
        events.push(HoldEvent::Grabbed { interactor: id, object: target });
    }

    fn request_clone(
        &mut self,
        id: InteractorId,
        source: ObjectId,
        ctx: &mut Collaborators<'_>,
        config: &InteractionConfig,
        events: &mut Vec<HoldEvent>,
    ) {
        if !ctx.permissions.can(&config.clone_capability, source) {
            debug!("{} duplicate of {} denied: missing '{}'", id, source, config.clone_capability);
            return;
        }
        let Some(loaded) = ctx.network.duplicate(source) else {
            debug!("{} duplicate of {} refused by network layer", id, source);
            return;
        };

        self.pending_clones[id.index()] = Some(loaded);
        let state = &mut self.state[id];
        state.spawning = true;
        state.held = None;
        state.hovered = None;
        debug!("{} spawning clone of {}", id, source);
        events.push(HoldEvent::CloneRequested { interactor: id, source });
    }

    fn maintain(
        &mut self,
        id: InteractorId,
        input: &InputFrame,
        ctx: &mut Collaborators<'_>,
        config: &InteractionConfig,
        events: &mut Vec<HoldEvent>,
    ) {
        if self.state[id].spawning {
            self.poll_clone(id, ctx, events);
            return;
        }

        let Some(held) = self.state[id].held else { return };
        let from = self.state[id].pre_hold_transform;

        if !ctx.scene.exists(held) {
            debug!("{} lost {}: object left the scene", id, held);
            self.state[id].clear_hold();
            events.push(HoldEvent::Released {
                interactor: id,
                object: held,
                from,
                to: from,
                record_undo: false,
            });
            return;
        }

        // Not networked at all means nobody can take it from us.
        let lost_ownership = matches!(ctx.ownership(&config.move_capability).is_mine(held), Ok(false));
        if !lost_ownership && input.get(id).grab {
            return;
        }

        if lost_ownership {
            debug!("{} dropped {}: ownership taken by another peer", id, held);
        } else {
            debug!("{} released {}", id, held);
        }
        let state = &mut self.state[id];
        let record_undo = state.constraining;
        state.held = None;
        state.constraining = true;
        events.push(HoldEvent::Released {
            interactor: id,
            object: held,
            from,
            to: ctx.scene.transform(held).unwrap_or(from),
            record_undo,
        });
    }

    fn poll_clone(&mut self, id: InteractorId, ctx: &Collaborators<'_>, events: &mut Vec<HoldEvent>) {
        let slot = &mut self.pending_clones[id.index()];
        let outcome = match slot.as_mut() {
            Some(loaded) => loaded.try_recv(),
            None => Err(TryRecvError::Closed),
        };

        match outcome {
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Closed) => {
                *slot = None;
                self.state[id].spawning = false;
                debug!("{} clone abandoned before it loaded", id);
            }
            Ok(clone) => {
                *slot = None;
                let state = &mut self.state[id];
                state.spawning = false;
                if !ctx.scene.exists(clone) {
                    debug!("{} clone {} vanished before attach", id, clone);
                    return;
                }
                state.held = Some(clone);
                state.hovered = None;
                state.pre_hold_transform = ctx.scene.transform(clone).unwrap_or_default();
                debug!("{} attached to clone {}", id, clone);
                events.push(HoldEvent::CloneAttached { interactor: id, object: clone });
            }
        }
    }
}
