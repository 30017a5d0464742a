use thiserror::Error;

/// Errors reported by [`crate::Blackboard::try_get`].
///
/// A missing key is not an error; it is reported as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlackboardError {
    #[error("blackboard type mismatch for key `{key}` (stored type differs from requested)")]
    TypeMismatch { key: &'static str },
}

/// Errors that can occur while loading a [`crate::BrainConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[cfg(feature = "yaml")]
    #[error("invalid brain config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("think_every_ticks must be at least 1")]
    ZeroCadence,
}
