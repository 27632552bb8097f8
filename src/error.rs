//! Error types for icon generation

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for encoder and generator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or writing icons
#[derive(Error, Debug)]
pub enum Error {
    /// Width or height is zero or beyond what a PNG header can carry
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Color string could not be parsed
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Chunk payload does not fit the 31-bit PNG length field
    #[error("Chunk {} payload too large: {len} bytes", String::from_utf8_lossy(.kind))]
    ChunkTooLarge { kind: [u8; 4], len: usize },

    /// Stored chunk checksum disagrees with the recomputed one
    #[error(
        "CRC mismatch in {} chunk: stored {stored:08x}, computed {computed:08x}",
        String::from_utf8_lossy(.kind)
    )]
    CrcMismatch { kind: [u8; 4], stored: u32, computed: u32 },

    /// Byte stream is not a well-formed PNG
    #[error("Malformed PNG: {0}")]
    Malformed(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// The icons.json manifest could not be serialized
    #[error("Failed to serialize manifest: {0}")]
    Manifest(#[source] serde_json::Error),

    /// Filesystem failure, tagged with the path involved
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}
