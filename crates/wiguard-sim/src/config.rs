//! Simulator configuration.
//!
//! Defaults reproduce the Wi-Guard dashboard: one phase per second, a
//! telemetry tick every two seconds, a 20-sample activity window and the
//! dashboard's opening counters.

use crate::core::{DEFAULT_WINDOW_CAPACITY, StatsSnapshot};
use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    /// Wait before each attack phase result (default: 1000)
    pub phase_interval_ms: u64,
    /// Metrics/stats tick period (default: 2000)
    pub tick_interval_ms: u64,
    /// Activity window capacity (default: 20)
    pub window_capacity: usize,
    /// Root seed; `None` seeds from the OS
    pub seed: Option<u64>,
    /// Counters shown when the dashboard view mounts
    pub initial_stats: StatsSnapshot,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            phase_interval_ms: 1000,
            tick_interval_ms: 2000,
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            seed: None,
            initial_stats: StatsSnapshot::default(),
        }
    }
}

impl SimConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(SimError::ConfigParse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| SimError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.phase_interval_ms == 0 {
            return Err(SimError::InvalidConfig(
                "phase_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(SimError::InvalidConfig(
                "tick_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.window_capacity == 0 {
            return Err(SimError::InvalidConfig(
                "window_capacity must be greater than zero".to_string(),
            ));
        }
        let health = self.initial_stats.network_health;
        if !(90..100).contains(&health) {
            return Err(SimError::InvalidConfig(format!(
                "initial network_health {} outside [90, 100)",
                health
            )));
        }
        Ok(())
    }

    pub fn phase_interval(&self) -> Duration {
        Duration::from_millis(self.phase_interval_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
