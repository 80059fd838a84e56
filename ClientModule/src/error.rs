//! # Errors
//!
//! Only caller-side programming mistakes and broken configuration surface as
//! errors. Permission denials, lost ownership and missing physics bodies are
//! ordinary outcomes and are reported through logging instead.

use holdsync_shared::object::ObjectId;
use thiserror::Error;

/// Failure to resolve the replicated identity behind a scene node
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OwnershipError {
    /// Neither the node nor any of its ancestors participates in replication.
    #[error("object {0} is not networked and has no networked ancestor")]
    NotNetworked(ObjectId),

    /// The networked entity was destroyed before it finished instantiating.
    #[error("networked entity {0} was destroyed before it was instantiated")]
    Cancelled(ObjectId),
}

/// Result type for ownership queries
pub type OwnershipResult<T> = Result<T, OwnershipError>;

/// Invalid interaction configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse interaction config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("capability name for {0} must not be empty")]
    EmptyCapability(&'static str),
}
