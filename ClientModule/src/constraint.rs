//! # Constraint Lifecycle
//!
//! Turns interactor hold transitions into physics constraints between an
//! interactor's proxy body and the held object's body. Pairings record which
//! interactors constrain each object; when the last one goes away the object
//! is handed back to the simulation as a free dynamic body.
//!
//! Removal is edge-triggered against the previous tick's snapshot. Creation
//! is retried every tick while a hold wants a constraint and has none, which
//! covers the hold starting, a clone finishing its load, constraining being
//! switched back on, and earlier attempts that failed for lack of a body or
//! of ownership.

use std::collections::HashMap;

use holdsync_shared::interactor::InteractorId;
use holdsync_shared::object::ObjectId;
use log::{debug, trace};

use crate::config::InteractionConfig;
use crate::context::Collaborators;
use crate::interaction::{InteractionSnapshot, InteractorState};
use crate::physics::{BodyFlags, BodyMode, ConstraintId};

/// Creates and destroys hold constraints from interaction snapshots
#[derive(Debug, Default)]
pub struct ConstraintManager {
    previous: InteractionSnapshot,
    pairings: HashMap<ObjectId, Vec<InteractorId>>,
    released: Vec<ObjectId>,
}

impl ConstraintManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interactors currently constraining `obj`
    pub fn pairings(&self, obj: ObjectId) -> &[InteractorId] {
        self.pairings.get(&obj).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_constraining(&self, id: InteractorId, obj: ObjectId) -> bool {
        self.pairings(obj).contains(&id)
    }

    /// Forget `obj` in the previous-tick shadows so its disappearance is not
    /// seen as a hold ending, and tear down its pairings on the next tick.
    pub fn release(&mut self, obj: ObjectId) {
        for id in InteractorId::ALL {
            if self.previous[id].held == Some(obj) {
                self.previous[id] = InteractorState::default();
            }
        }
        if self.pairings.contains_key(&obj) && !self.released.contains(&obj) {
            self.released.push(obj);
        }
    }

    pub fn tick(
        &mut self,
        snapshot: &InteractionSnapshot,
        ctx: &mut Collaborators<'_>,
        config: &InteractionConfig,
    ) {
        for obj in std::mem::take(&mut self.released) {
            if let Some(interactors) = self.pairings.get(&obj).cloned() {
                for id in interactors {
                    self.remove(id, obj, ctx);
                }
            }
        }

        for (id, current) in snapshot.iter() {
            let previous = self.previous[id];

            if previous.held != current.held {
                if let Some(old) = previous.held {
                    self.remove(id, old, ctx);
                }
            } else if let Some(held) = current.held {
                if previous.constraining && !current.constraining {
                    self.remove(id, held, ctx);
                }
            }

            if let Some(held) = current.held {
                if current.constraining && !current.spawning && !self.is_constraining(id, held) {
                    self.add(id, held, ctx, config);
                }
            }
        }

        self.previous = *snapshot;
    }

    fn add(
        &mut self,
        id: InteractorId,
        obj: ObjectId,
        ctx: &mut Collaborators<'_>,
        config: &InteractionConfig,
    ) {
        let body = ctx.scene.body(obj);
        let proxy = ctx.scene.interactor_body(id);
        if !body.is_valid() || !proxy.is_valid() {
            trace!("Deferring constraint {} -> {}: physics body not ready", id, obj);
            return;
        }
        if !ctx
            .ownership(&config.move_capability)
            .is_non_networked_or_ensure_ownership(obj)
        {
            debug!("Not constraining {} to {}: ownership unavailable", obj, id);
            return;
        }

        ctx.physics.set_body_mode(body, BodyMode::Dynamic, BodyFlags::held());
        ctx.physics.add_constraint(
            ConstraintId { object: obj, interactor: id },
            proxy,
            body,
            &config.constraint,
        );
        self.pairings.entry(obj).or_default().push(id);
        debug!("Constrained {} to {}", obj, id);
    }

    fn remove(&mut self, id: InteractorId, obj: ObjectId, ctx: &mut Collaborators<'_>) {
        let Some(interactors) = self.pairings.get_mut(&obj) else { return };
        let Some(pos) = interactors.iter().position(|&i| i == id) else { return };
        interactors.remove(pos);
        let last = interactors.is_empty();

        ctx.physics.remove_constraint(ConstraintId { object: obj, interactor: id });
        debug!("Removed constraint {} -> {}", id, obj);

        if last {
            self.pairings.remove(&obj);
            let body = ctx.scene.body(obj);
            if body.is_valid() {
                ctx.physics.set_body_mode(body, BodyMode::Dynamic, BodyFlags::free());
            }
        }
    }
}
