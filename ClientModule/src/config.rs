//! # Interaction Configuration
//!
//! Capability names and physics constraint options. Everything has a default
//! so hosts only override what differs in their deployment.

use holdsync_shared::constants::capability;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::physics::ConstraintOptions;

/// Tunables for the interaction core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Capability required to grab an object and to claim its ownership
    pub move_capability: String,

    /// Capability required to duplicate an object by grabbing it
    pub clone_capability: String,

    /// Options handed to the physics engine for every hold constraint
    pub constraint: ConstraintOptions,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            move_capability: capability::SPAWN_AND_MOVE_MEDIA.to_string(),
            clone_capability: capability::SPAWN_AND_MOVE_MEDIA.to_string(),
            constraint: ConstraintOptions::default(),
        }
    }
}

impl InteractionConfig {
    /// Parse a configuration from JSON, filling unspecified fields with defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: InteractionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.move_capability.is_empty() {
            return Err(ConfigError::EmptyCapability("move_capability"));
        }
        if self.clone_capability.is_empty() {
            return Err(ConfigError::EmptyCapability("clone_capability"));
        }
        Ok(())
    }
}
