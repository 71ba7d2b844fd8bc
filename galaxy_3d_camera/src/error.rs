//! Error types for the Galaxy3D camera
//!
//! This module defines the error types used throughout the crate,
//! including parameter validation, pixel-space conversions, render
//! target management and snapshot persistence.

use thiserror::Error;

/// Result type for Galaxy3D camera operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D camera errors
///
/// None of these are fatal: every failure is local to the call that
/// produced it and leaves the camera in its previous valid state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A setter argument violates a camera invariant. The setter was a no-op.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Name of the rejected parameter
        name: &'static str,
        /// Human readable reason
        reason: String,
    },

    /// A pixel-space conversion was requested without a usable render target
    #[error("No render target bound to the camera")]
    NoRenderTarget,

    /// A pixel coordinate lies outside the camera's viewport rectangle
    #[error("Point ({x}, {y}) lies outside the camera viewport")]
    OutOfViewport {
        /// X coordinate of the rejected point, in pixels
        x: f32,
        /// Y coordinate of the rejected point, in pixels
        y: f32,
    },

    /// A point on or behind the camera plane has no pixel position
    #[error("Point lies on or behind the camera plane")]
    BehindCamera,

    /// The camera's backing state was released by `Camera::destroy()`
    #[error("Camera has been destroyed")]
    CameraDestroyed,

    /// Invalid resource (render target name clash, missing target, etc.)
    #[error("Invalid resource: {0}")]
    InvalidResource(String),

    /// Initialization failed (engine, subsystems)
    #[error("Initialization failed: {0}")]
    InitializationFailed(String),

    /// Internal failure (poisoned lock, etc.)
    #[error("Backend error: {0}")]
    BackendError(String),

    /// Snapshot could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Shorthand for building an `InvalidParameter` error.
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
