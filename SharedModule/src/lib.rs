//! # SharedModule
//!
//! Shared types used by the interaction core and by whatever network layer
//! replicates scene objects between peers. This module contains the spatial
//! value types, object/peer/body identifiers and the interactor enumeration,
//! so both sides of the replication boundary agree on them.

// Export module structure
pub mod types;
pub mod object;
pub mod interactor;
pub mod constants;

// Re-export commonly used items for convenience
pub use types::*;
pub use object::{ObjectId, NetworkId, PeerId, BodyHandle};
pub use interactor::{InteractorId, InteractorKind, Side};
