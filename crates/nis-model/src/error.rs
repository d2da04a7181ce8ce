use thiserror::Error;

/// Malformed per-dataset cleaning configuration.
///
/// These are programming/configuration errors: they surface when a
/// registry is loaded and are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Both a source column and a literal override were supplied.
    #[error("`{column}`: supply either a source column or an override value, not both")]
    ConfigConflict { column: String },

    /// Neither a source column, an override, nor a donor column was supplied.
    #[error("`{column}`: no source column or override value supplied")]
    MissingSource { column: String },

    /// A step configuration is structurally valid but semantically unusable.
    #[error("invalid `{step}` configuration: {reason}")]
    InvalidConfig { step: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
