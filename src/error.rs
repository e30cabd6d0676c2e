//! Error types
//!
//! Only startup configuration can fail hard. Sensor problems degrade gracefully
//! and are reported so the host can log them.

use thiserror::Error;

/// Startup data or tuning could not be used; the session refuses to start.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("placement list `{list}` is empty")]
    EmptyPlacements { list: &'static str },
    #[error("placement list `{list}` has a non-finite coordinate at index {index}")]
    NonFiniteCoordinate { list: &'static str, index: usize },
    #[error("invalid setting `{name}`: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// The lateral tilt source could not be started.
#[derive(Debug, Error)]
pub enum SensorError {
    #[error("tilt sensor unavailable")]
    Unavailable,
    #[error("tilt sensor failed: {0}")]
    Failed(String),
}
