//! Error types for the equipotential core.

use thiserror::Error;

/// Errors produced when a caller hands the core malformed input.
///
/// The computations themselves cannot fail; every variant is a contract
/// violation rejected at the boundary.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Grid resolution below two samples along an axis, or too many samples
    /// in total.
    #[error(
        "invalid resolution {nx}x{ny}: each axis needs at least 2 samples and the grid at most {max}",
        max = crate::domain::MAX_GRID_SAMPLES
    )]
    InvalidResolution { nx: usize, ny: usize },

    /// Sampling domain with non-finite bounds or an empty span.
    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    /// Potential or field requested without any charges.
    #[error("charge list is empty")]
    EmptyCharges,

    /// A coordinate, magnitude or level was NaN or infinite.
    #[error("non-finite value: {0}")]
    NonFinite(String),

    /// Caller-assembled grid samples do not match the axis lengths.
    #[error("dimension mismatch: expected {expected_w}x{expected_h} samples, got {got}")]
    DimensionMismatch {
        expected_w: usize,
        expected_h: usize,
        got: usize,
    },

    /// A grid axis is too short or not strictly increasing.
    #[error("invalid axis: {0}")]
    InvalidAxis(String),

    /// A level range could not produce levels.
    #[error("invalid levels: {0}")]
    InvalidLevels(String),

    /// Field vector overlay settings are unusable.
    #[error("invalid vector settings: {0}")]
    InvalidSettings(String),

    /// Scene text is not valid scene JSON.
    #[error("invalid scene: {0}")]
    InvalidScene(String),

    /// Reading a scene from disk failed.
    #[error("I/O error: {0}")]
    Io(String),
}
