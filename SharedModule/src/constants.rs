//! # Shared Constants
//!
//! Constants used by the interaction core and its collaborators.

/// Number of interactors tracked per user
pub const INTERACTOR_COUNT: usize = 4;

/// Undo history constants
pub mod undo {
    /// Slots per object in each of the backward and forward arrays.
    /// A hard memory bound, not a tunable.
    pub const UNDO_CAPACITY: usize = 32;
}

/// Capability names understood by the permission collaborator
pub mod capability {
    /// Grab, move and claim ownership of shared content
    pub const SPAWN_AND_MOVE_MEDIA: &str = "spawn_and_move_media";
}
