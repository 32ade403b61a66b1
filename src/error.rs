//! Error types for toast

use std::path::PathBuf;
use thiserror::Error;

/// Invocation errors (usage line on stdout, exit 1)
#[derive(Debug, Error)]
pub enum UsageError {
    #[error("Usage: {program} <success|failure>")]
    ArgCount { program: String },
}

/// Asset resolution errors
/// SelfPath is fatal; icon errors degrade to text only
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Executable path unresolvable: {argv0}")]
    SelfPath { argv0: String },

    #[error("Icon not found: {}", path.display())]
    IconMissing { path: PathBuf },

    #[error("Icon decode failed: {}", path.display())]
    IconDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Overlay window errors (fallback to desktop notification)
#[derive(Debug, Error)]
pub enum WindowError {
    #[error("RegisterClass failed")]
    RegisterClass,

    #[error("CreateWindowEx failed: {0}")]
    Create(String),

    #[error("CreateFont failed")]
    Font,

    #[error("Icon bitmap creation failed: {0}")]
    Bitmap(String),
}
