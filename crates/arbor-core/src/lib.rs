//! Deterministic, engine-agnostic primitives shared by the arbor crates.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod blackboard;
pub mod config;
pub mod error;
pub mod tick;

pub use agent::AgentId;
pub use blackboard::{BbKey, Blackboard};
pub use config::{BrainConfig, RestartPolicy};
pub use error::{BlackboardError, ConfigError};
pub use tick::TickContext;
