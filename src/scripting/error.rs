// Fri Jan 16 2026 - Alex

use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Stored when an exception cannot be turned into a string.
pub const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Failed to create script engine: {0}")]
    Init(#[from] rquickjs::Error),
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to open file: {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}")]
    Exception(String),
    #[error("Conversion failed: {0}")]
    Conversion(#[from] BridgeError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("nesting exceeds the depth limit of {limit}")]
    DepthExceeded { limit: usize },
    #[error("cyclic reference detected at depth {depth}")]
    CyclicReference { depth: usize },
    #[error("engine error: {0}")]
    Engine(String),
}

pub type SessionResult<T> = Result<T, SessionError>;
pub type BridgeResult<T> = Result<T, BridgeError>;
