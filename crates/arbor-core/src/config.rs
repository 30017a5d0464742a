#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{AgentId, ConfigError};

/// What a hosting brain does once its tree has finished.
///
/// The engine itself never restarts a finished tree; this is a host-side decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RestartPolicy {
    /// Leave the tree in its terminal state until someone calls `reset`.
    #[default]
    Never,
    /// Reset the tree on the next think tick after it finished.
    OnFinish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BrainConfig {
    pub think_every_ticks: u32,
    pub think_offset_ticks: u32,
    pub restart: RestartPolicy,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            think_every_ticks: 1,
            think_offset_ticks: 0,
            restart: RestartPolicy::Never,
        }
    }
}

impl BrainConfig {
    /// Spreads agents sharing a cadence across ticks by offsetting on their stable id.
    pub fn deterministic(agent: impl AgentId, think_every_ticks: u32) -> Self {
        let every = think_every_ticks.max(1);
        let offset = (agent.stable_id() % (every as u64)) as u32;
        Self {
            think_every_ticks: every,
            think_offset_ticks: offset,
            restart: RestartPolicy::Never,
        }
    }

    pub fn with_restart(mut self, restart: RestartPolicy) -> Self {
        self.restart = restart;
        self
    }

    pub fn should_think(&self, tick: u64) -> bool {
        let every = self.think_every_ticks.max(1) as u64;
        (tick % every + (self.think_offset_ticks as u64) % every) % every == 0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.think_every_ticks == 0 {
            return Err(ConfigError::ZeroCadence);
        }
        Ok(())
    }

    /// Parses a YAML document; missing fields fall back to their defaults.
    #[cfg(feature = "yaml")]
    #[cfg_attr(docsrs, doc(cfg(feature = "yaml")))]
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }
}
