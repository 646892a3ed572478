//! Simulator configuration
//!
//! JSON-backed settings for the `framekit` binary: the command line handed
//! to the locate resolver, the simulated machine's starting state, and when
//! the simulated operator cancels.

use serde::{Deserialize, Serialize};
use std::path::Path;

use framekit_core::{Error, Result};

/// Settings for one simulated locate run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Command line handed to the locate resolver.
    pub command: String,
    /// Machine feed rate before the session starts, mm/min.
    pub initial_feed_rate: f32,
    /// Workspace offset applied by the simulated executor, X component.
    pub workspace_offset_x: f32,
    /// Workspace offset applied by the simulated executor, Y component.
    pub workspace_offset_y: f32,
    /// Optional override of the tracer's slice bound, mm.
    pub slice_mm: Option<f32>,
    /// Drive-loop iterations before the simulated operator cancels.
    pub cancel_after_steps: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            command: "X0 Y0 I40 J30 S2 F900".to_string(),
            initial_feed_rate: 600.0,
            workspace_offset_x: 0.0,
            workspace_offset_y: 0.0,
            slice_mm: None,
            cancel_after_steps: 24,
        }
    }
}

impl SimConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::other(format!("Failed to read config file: {}", e)))?;

        let config: Self = serde_json::from_str(&content)
            .map_err(|e| Error::other(format!("Invalid JSON config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| Error::other(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| Error::other(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validate settings
    pub fn validate(&self) -> Result<()> {
        if self.initial_feed_rate <= 0.0 {
            return Err(Error::other("initial_feed_rate must be positive"));
        }
        if let Some(slice) = self.slice_mm {
            if slice <= 0.0 {
                return Err(Error::other("slice_mm must be positive"));
            }
        }
        Ok(())
    }
}
