//! Error types for iostat-core.

/// Errors raised while loading or validating [`Config`](crate::config::Config).
///
/// These are only ever produced at startup; the steady-state pipeline has no
/// fatal errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required value was not supplied by any layer.
    #[error("missing required setting `{0}`")]
    Missing(&'static str),

    /// A setting is present but out of range.
    #[error("invalid value for `{key}`: {reason}")]
    InvalidValue { key: &'static str, reason: String },

    /// Reading or deserializing a configuration layer failed.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
