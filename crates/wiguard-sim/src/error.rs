//! Error types for wiguard-sim.
//!
//! The simulation core itself has no failure paths; these cover
//! configuration loading and the CLI surface.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read config file {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[source] serde_json::Error),

    #[error("unknown attack '{id}' (available: {available})")]
    UnknownAttack { id: String, available: String },

    #[error("failed to render output: {0}")]
    Render(#[source] serde_json::Error),
}
