use serde::{Deserialize, Serialize};

use crate::core::params::SimParams;
use crate::core::store::ParameterStore;

/// Configuration for a globe view, provided by the host.
/// Loaded from a JSON string at startup; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Parameter values the store starts with (clamped into slider ranges).
    pub initial_params: SimParams,
    /// Start playing immediately instead of paused (default: false).
    pub autoplay: bool,
}

impl EngineConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Build the parameter store this config describes.
    pub fn build_store(&self) -> ParameterStore {
        let mut store = ParameterStore::with_params(self.initial_params);
        if self.autoplay {
            store.play();
        }
        store
    }
}
