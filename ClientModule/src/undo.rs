//! # Undo Journal
//!
//! Per-object bounded history of reversible field changes. Every registered
//! object gets an [`UndoStack`] made of two parallel fixed-size arrays:
//! `backward[position]` undoes the latest step and `forward[position]` redoes
//! the step that was most recently undone. When full, the oldest step is
//! shifted out rather than letting the arrays grow.
//!
//! Undo and redo requests are queued and applied once per tick, in the order
//! they were submitted. Replaying a step writes transforms directly into the
//! scene, so it first (re)claims ownership of replicated objects; a failed
//! claim skips the step and leaves the history untouched. Objects held by an
//! interactor are skipped the same way, since a live hold owns their transform.

use std::collections::HashMap;

use holdsync_shared::constants::undo::UNDO_CAPACITY;
use holdsync_shared::object::ObjectId;
use holdsync_shared::types::Transform;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::context::Collaborators;
use crate::interaction::InteractionSnapshot;

/// Kind of change a step records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    MatrixUpdate,
}

/// A field value to restore. One variant per mutable field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum UndoValue {
    Transform(Transform),
}

/// One direction of a recorded change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UndoStep {
    pub change: ChangeKind,
    pub values: Vec<UndoValue>,
}

/// Queued history operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoOp {
    Undo,
    Redo,
}

/// Bounded history for one object
#[derive(Debug, Clone)]
pub struct UndoStack {
    backward: Vec<Option<UndoStep>>,
    forward: Vec<Option<UndoStep>>,
    position: usize,
}

impl UndoStack {
    pub fn new() -> Self {
        Self {
            backward: vec![None; UNDO_CAPACITY],
            forward: vec![None; UNDO_CAPACITY],
            position: 0,
        }
    }

    /// Record a step, discarding the oldest one when full and any redo
    /// history past the new position.
    pub fn push(&mut self, backward: UndoStep, forward: UndoStep) {
        if self.position == UNDO_CAPACITY - 1 {
            self.backward.remove(0);
            self.backward.push(None);
            self.forward.remove(0);
            self.forward.push(None);
            self.position -= 1;
        }

        self.position += 1;
        self.backward[self.position] = Some(backward);
        self.forward[self.position - 1] = Some(forward);

        for slot in &mut self.backward[self.position + 1..] {
            *slot = None;
        }
        for slot in &mut self.forward[self.position..] {
            *slot = None;
        }
    }

    /// Step that moves one back, if any
    pub fn backward_step(&self) -> Option<&UndoStep> {
        if self.position == 0 {
            return None;
        }
        self.backward[self.position].as_ref()
    }

    /// Step that moves one forward, if any
    pub fn forward_step(&self) -> Option<&UndoStep> {
        self.forward.get(self.position).and_then(Option::as_ref)
    }

    pub fn can_undo(&self) -> bool {
        self.backward_step().is_some()
    }

    pub fn can_redo(&self) -> bool {
        self.forward_step().is_some()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Slot counts of the backward and forward arrays
    pub fn capacity(&self) -> (usize, usize) {
        (self.backward.len(), self.forward.len())
    }

    fn retreat(&mut self) {
        self.position -= 1;
    }

    fn advance(&mut self) {
        self.position += 1;
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

/// Undo/redo histories for every registered object
#[derive(Debug, Default)]
pub struct UndoJournal {
    stacks: HashMap<ObjectId, UndoStack>,
    pending: Vec<(ObjectId, UndoOp)>,
}

impl UndoJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, obj: ObjectId) {
        self.stacks.entry(obj).or_default();
        trace!("Registered {} for undo", obj);
    }

    /// Drop the object's history and any queued operations for it
    pub fn unregister(&mut self, obj: ObjectId) {
        self.stacks.remove(&obj);
        self.pending.retain(|(o, _)| *o != obj);
        trace!("Unregistered {} from undo", obj);
    }

    pub fn is_registered(&self, obj: ObjectId) -> bool {
        self.stacks.contains_key(&obj)
    }

    pub fn stack(&self, obj: ObjectId) -> Option<&UndoStack> {
        self.stacks.get(&obj)
    }

    pub fn can_undo(&self, obj: ObjectId) -> bool {
        self.stack(obj).map_or(false, UndoStack::can_undo)
    }

    pub fn can_redo(&self, obj: ObjectId) -> bool {
        self.stack(obj).map_or(false, UndoStack::can_redo)
    }

    /// Steps that can currently be undone for `obj`
    pub fn depth(&self, obj: ObjectId) -> usize {
        self.stack(obj).map_or(0, UndoStack::position)
    }

    pub fn push_undo(
        &mut self,
        obj: ObjectId,
        change: ChangeKind,
        backward: Vec<UndoValue>,
        forward: Vec<UndoValue>,
    ) {
        let Some(stack) = self.stacks.get_mut(&obj) else {
            debug!("Ignoring undo entry for unregistered object {}", obj);
            return;
        };
        stack.push(
            UndoStep { change, values: backward },
            UndoStep { change, values: forward },
        );
    }

    /// Record a transform change from `from` to `to`
    pub fn push_matrix_update_undo(&mut self, obj: ObjectId, from: Transform, to: Transform) {
        self.push_undo(
            obj,
            ChangeKind::MatrixUpdate,
            vec![UndoValue::Transform(from)],
            vec![UndoValue::Transform(to)],
        );
    }

    pub fn do_undo(&mut self, obj: ObjectId) {
        self.pending.push((obj, UndoOp::Undo));
    }

    pub fn do_redo(&mut self, obj: ObjectId) {
        self.pending.push((obj, UndoOp::Redo));
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Apply queued operations in submission order against the end-of-tick
    /// `snapshot`. Returns how many steps were actually applied.
    pub fn apply_pending(
        &mut self,
        snapshot: &InteractionSnapshot,
        ctx: &mut Collaborators<'_>,
        capability: &str,
    ) -> usize {
        let mut applied = 0;
        for (obj, op) in std::mem::take(&mut self.pending) {
            if self.apply(obj, op, snapshot, ctx, capability) {
                applied += 1;
            }
        }
        applied
    }

    fn apply(
        &mut self,
        obj: ObjectId,
        op: UndoOp,
        snapshot: &InteractionSnapshot,
        ctx: &mut Collaborators<'_>,
        capability: &str,
    ) -> bool {
        let Some(stack) = self.stacks.get(&obj) else {
            debug!("{:?} requested for unregistered object {}", op, obj);
            return false;
        };
        let step = match op {
            UndoOp::Undo => stack.backward_step(),
            UndoOp::Redo => stack.forward_step(),
        };
        let Some(step) = step.cloned() else {
            trace!("Nothing to {:?} for {}", op, obj);
            return false;
        };

        if !ctx.scene.exists(obj) {
            debug!("Skipping {:?} for {}: object no longer in scene", op, obj);
            return false;
        }
        if let Some(holder) = snapshot.holder_of(obj) {
            debug!("Skipping {:?} for {}: held by {}", op, obj, holder);
            return false;
        }
        if !ctx.ownership(capability).is_non_networked_or_ensure_ownership(obj) {
            debug!("Skipping {:?} for {}: ownership not available", op, obj);
            return false;
        }

        for value in &step.values {
            match *value {
                UndoValue::Transform(transform) => ctx.scene.set_transform(obj, transform),
            }
        }

        if let Some(stack) = self.stacks.get_mut(&obj) {
            match op {
                UndoOp::Undo => stack.retreat(),
                UndoOp::Redo => stack.advance(),
            }
        }
        debug!("Applied {:?} ({:?}) to {}", op, step.change, obj);
        true
    }
}
