//! ALFA Biometrics - Authenticator Configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BioError, BioResult};
use crate::platform::AuthPolicy;

/// How overlapping `authenticate` calls reach the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeScheduling {
    /// One challenge in flight; later calls wait in FIFO order
    #[default]
    Serialized,
    /// Every call goes straight to the platform. The context must be reentrant.
    Concurrent,
}

/// Authenticator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct AuthenticatorConfig {
    /// Policy passed to every probe and challenge
    pub policy: AuthPolicy,
    /// Overlapping-call handling
    pub scheduling: ChallengeScheduling,
}

impl AuthenticatorConfig {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> BioResult<Self> {
        serde_json::from_str(json).map_err(|e| BioError::DeserializationError(e.to_string()))
    }

    pub fn to_json(&self) -> BioResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| BioError::SerializationError(e.to_string()))
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> BioResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Write to a JSON file
    pub fn save(&self, path: &Path) -> BioResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(BioError::InvalidConfig(format!(
                    "Directory does not exist: {}",
                    parent.display()
                )));
            }
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
