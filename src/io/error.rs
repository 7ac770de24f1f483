//! Error types for mosaic configuration, image I/O and canvas allocation

use std::fmt;
use std::path::PathBuf;

/// Broad failure category, used to decide how an aborted run is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Parameters or inputs that can never produce a mosaic
    Configuration,
    /// Reading, decoding or writing files failed
    Io,
    /// The requested canvas cannot be allocated
    Resource,
}

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// Failed to load or decode an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save the composited canvas
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image encoding error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// No usable tile images were supplied
    EmptyTileSet {
        /// File or folder the tiles were expected in
        path: PathBuf,
    },

    /// Canvas dimensions exceed what will be allocated
    CanvasTooLarge {
        /// Requested width in pixels
        width: u64,
        /// Requested height in pixels
        height: u64,
        /// Largest accepted edge length
        limit: u32,
    },
}

impl MosaicError {
    /// Category of this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParameter { .. } | Self::EmptyTileSet { .. } => ErrorKind::Configuration,
            Self::ImageLoad { .. } | Self::ImageExport { .. } | Self::FileSystem { .. } => {
                ErrorKind::Io
            }
            Self::CanvasTooLarge { .. } => ErrorKind::Resource,
        }
    }
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
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
                    "File system error during {operation} on '{}': {source}",
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
            Self::EmptyTileSet { path } => {
                write!(f, "No tile images found at '{}'", path.display())
            }
            Self::CanvasTooLarge {
                width,
                height,
                limit,
            } => {
                write!(
                    f,
                    "Canvas of {width}x{height} pixels exceeds the {limit} pixel edge limit"
                )
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

impl From<image::ImageError> for MosaicError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for MosaicError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
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
