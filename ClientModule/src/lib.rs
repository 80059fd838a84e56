//! # Interaction Client Module
//!
//! Client-side core that lets the local user's interactors pick up, hold and
//! release shared scene objects while those objects are replicated between
//! peers and simulated by a physics engine.
//!
//! The system is organized into several sub-modules:
//! - `interaction`: per-interactor hover/hold state machine
//! - `constraint`: physics constraint lifecycle for held objects
//! - `undo`: bounded per-object undo/redo history
//! - `ownership`: optimistic ownership claims over replicated objects
//! - `net`, `physics`, `scene`: collaborator interfaces implemented by the host
//!
//! Everything runs inside one frame tick on one thread. The state machine runs
//! first; the constraint manager and undo journal then consume the same
//! end-of-tick snapshot.

use holdsync_shared::interactor::InteractorId;
use holdsync_shared::object::ObjectId;
use log::{debug, info};

// Module declarations
pub mod config;
pub mod constraint;
pub mod context;
pub mod error;
pub mod interaction;
pub mod net;
pub mod notify;
pub mod ownership;
pub mod physics;
pub mod scene;
pub mod undo;

#[cfg(test)]
mod test_support;

// Re-export commonly used items
pub use config::InteractionConfig;
pub use constraint::ConstraintManager;
pub use context::Collaborators;
pub use error::{ConfigError, OwnershipError, OwnershipResult};
pub use interaction::{
    HoldEvent, InputFrame, InteractionSnapshot, InteractionStateMachine, InteractorInput,
    InteractorState,
};
pub use net::{NetworkLayer, OwnershipClaim};
pub use notify::{Notification, OneShot};
pub use ownership::Ownership;
pub use physics::{BodyFlags, BodyMode, ConstraintId, ConstraintKind, ConstraintOptions, PhysicsEngine};
pub use scene::{HitTester, Permissions, Scene};
pub use undo::{UndoJournal, UndoStack};

/// The interaction core: state machine, constraint manager and undo journal
/// driven together once per frame.
#[derive(Debug)]
pub struct InteractionSystem {
    config: InteractionConfig,
    interaction: InteractionStateMachine,
    constraints: ConstraintManager,
    undo: UndoJournal,
}

impl InteractionSystem {
    pub fn new(config: InteractionConfig) -> Self {
        info!(
            "Initializing interaction system (move capability '{}')",
            config.move_capability
        );
        Self {
            config,
            interaction: InteractionStateMachine::new(),
            constraints: ConstraintManager::new(),
            undo: UndoJournal::new(),
        }
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Run one frame: interaction state first, then constraints and undo
    /// from the resulting snapshot.
    pub fn tick(&mut self, input: &InputFrame, ctx: &mut Collaborators<'_>) -> Vec<HoldEvent> {
        let events = self.interaction.tick(input, ctx, &self.config);

        for event in &events {
            if let HoldEvent::Released { object, from, to, record_undo: true, .. } = *event {
                self.undo.push_matrix_update_undo(object, from, to);
            }
        }

        let snapshot = self.interaction.snapshot();
        self.constraints.tick(&snapshot, ctx, &self.config);
        self.undo.apply_pending(&snapshot, ctx, &self.config.move_capability);
        events
    }

    pub fn snapshot(&self) -> InteractionSnapshot {
        self.interaction.snapshot()
    }

    pub fn state(&self, id: InteractorId) -> &InteractorState {
        self.interaction.state(id)
    }

    pub fn is_held(&self, obj: ObjectId) -> bool {
        self.interaction.is_held(obj)
    }

    /// Switch a hold between physics-driven and direct manipulation, e.g.
    /// while a scale or rotate gesture assigns transforms directly. Has no
    /// effect on an interactor that holds nothing.
    pub fn set_constraining(&mut self, id: InteractorId, constraining: bool) {
        self.interaction.set_constraining(id, constraining);
    }

    /// Drop every hold and constraint on `obj`, typically because it is
    /// being deleted. No undo history is recorded.
    pub fn release(&mut self, obj: ObjectId) {
        debug!("Force-releasing {}", obj);
        self.interaction.release(obj);
        self.constraints.release(obj);
    }

    pub fn constraints(&self) -> &ConstraintManager {
        &self.constraints
    }

    pub fn undo_journal(&self) -> &UndoJournal {
        &self.undo
    }

    pub fn register_object(&mut self, obj: ObjectId) {
        self.undo.register(obj);
    }

    pub fn unregister_object(&mut self, obj: ObjectId) {
        self.undo.unregister(obj);
    }

    /// Queue an undo step for `obj`; applied on the next tick
    pub fn request_undo(&mut self, obj: ObjectId) {
        self.undo.do_undo(obj);
    }

    /// Queue a redo step for `obj`; applied on the next tick
    pub fn request_redo(&mut self, obj: ObjectId) {
        self.undo.do_redo(obj);
    }
}

impl Default for InteractionSystem {
    fn default() -> Self {
        Self::new(InteractionConfig::default())
    }
}
