//! Error types for contact point detection
//!
//! This module defines all error types that can occur while validating label
//! volumes, scanning them for contacts, and reading or writing result files.

use thiserror::Error;

/// Error types for contact point operations
///
/// Validation errors are always reported before a scan starts, so a failing
/// call never produces a partial result table.
#[derive(Error, Debug)]
pub enum ContactPointsError {
    /// Volume shape is not usable
    ///
    /// Raised when any dimension is zero or negative, or when the number of
    /// labels does not match the product of the dimensions.
    #[error("Invalid volume shape: {0}")]
    InvalidShape(String),

    /// Connectivity mode is not one of 6, 18 or 26
    #[error("Unsupported connectivity: {0} (expected 6, 18 or 26)")]
    UnsupportedConnectivity(i64),

    /// Buffers for the volume or the result table could not be allocated
    ///
    /// Happens for shapes whose voxel count overflows `usize` or when the
    /// allocator refuses a reservation.
    #[error("Allocation failed: {0}")]
    Allocation(String),

    /// Pairwise extraction was asked for two identical labels
    #[error("Invalid label pair: {0}")]
    InvalidLabels(String),

    /// File I/O error
    ///
    /// Wraps standard I/O errors from file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Label volume file could not be parsed
    #[error("Invalid volume file: {0}")]
    VolumeFormat(String),

    /// VTK file writing error
    #[error("VTK error: {0}")]
    VtkError(String),

    /// Configuration error
    ///
    /// Invalid configuration file format, missing required fields,
    /// or invalid parameter values.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Convenience type alias for Results with [`ContactPointsError`]
///
/// # Example
/// ```
/// use contact_points::Result;
///
/// fn my_function() -> Result<()> {
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, ContactPointsError>;
