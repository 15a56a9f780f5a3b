//! Error type for the fallible edges of the engine (snapshots, parsing, menus).
//!
//! Status derivation itself is total and never returns these.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VisError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown run status '{0}'")]
    UnknownStatus(String),

    #[error("no menu option at position {index} ({available} available)")]
    NoSuchOption { index: usize, available: usize },
}

pub type Result<T> = std::result::Result<T, VisError>;
