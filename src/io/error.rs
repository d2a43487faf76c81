//! Error types for indexing, composition and the command-line surface

use std::fmt;
use std::path::PathBuf;

/// Every failure the indexer, composer and command line can report
#[derive(Debug)]
pub enum MosaicError {
    /// Target image or tile directory failed validation before the run started
    InvalidInput {
        /// Offending path
        path: PathBuf,
        /// What is wrong with it
        reason: String,
    },

    /// An image file could not be opened or decoded
    Decode {
        /// Image that failed to decode
        path: PathBuf,
        /// Underlying codec error
        source: image::ImageError,
    },

    /// A thumbnail or mosaic could not be encoded or written
    ImageExport {
        /// Destination of the write
        path: PathBuf,
        /// Underlying codec error
        source: image::ImageError,
    },

    /// A directory or file operation outside the image codecs failed
    FileSystem {
        /// File or directory being touched
        path: PathBuf,
        /// Short name of the attempted operation
        operation: &'static str,
        /// OS-level cause
        source: std::io::Error,
    },

    /// The tile index file could not be written or parsed
    IndexFormat {
        /// Path to the index file
        path: PathBuf,
        /// Underlying serialization error
        source: serde_json::Error,
    },

    /// Composition was requested against an index without any tiles
    ///
    /// Emitting a mosaic here would silently return the untouched canvas,
    /// so the run fails instead.
    EmptyIndex {
        /// Tile directory the index was built from
        path: PathBuf,
    },

    /// A tuning value is out of range
    InvalidParameter {
        /// Parameter name as used in `MosaicConfig` or the grid
        parameter: &'static str,
        /// Rejected value, rendered as text
        value: String,
        /// Accepted range or constraint
        reason: String,
    },

    /// Every disambiguated output name up to the attempt bound already exists
    NamingCollisionExhausted {
        /// Destination directory
        directory: PathBuf,
        /// Requested file name
        file_name: String,
        /// Number of numbered candidates tried
        attempts: u32,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput { path, reason } => {
                write!(f, "Invalid input '{}': {reason}", path.display())
            }
            Self::Decode { path, source } => {
                write!(f, "Failed to decode image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to write image '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "Could not {operation} '{}': {source}",
                    path.display()
                )
            }
            Self::IndexFormat { path, source } => {
                write!(f, "Tile index '{}' is unusable: {source}", path.display())
            }
            Self::EmptyIndex { path } => {
                write!(
                    f,
                    "No tiles indexed from '{}', nothing to match against",
                    path.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::NamingCollisionExhausted {
                directory,
                file_name,
                attempts,
            } => {
                write!(
                    f,
                    "No free output name for '{file_name}' in '{}' after {attempts} attempts",
                    directory.display()
                )
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::IndexFormat { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, MosaicError>;

/// Build an `InvalidParameter` error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an input validation error for a path
pub fn invalid_input(path: impl Into<PathBuf>, reason: &impl ToString) -> MosaicError {
    MosaicError::InvalidInput {
        path: path.into(),
        reason: reason.to_string(),
    }
}

/// Attach a path and operation name to an I/O failure
pub fn file_system(
    path: impl Into<PathBuf>,
    operation: &'static str,
) -> impl FnOnce(std::io::Error) -> MosaicError {
    let path = path.into();
    move |source| MosaicError::FileSystem {
        path,
        operation,
        source,
    }
}
