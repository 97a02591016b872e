//! Library-level errors

use thiserror::Error;

use crate::config::ConfigError;
use crate::gpu::ProgramError;
use crate::platform::PlatformError;

/// Errors surfaced by the library
#[derive(Error, Debug)]
pub enum GxError {
    /// Backend initialization failed
    #[error("Initialization failed: {0}")]
    Initialization(String),

    /// The operation needs an application and none exists
    #[error("No application exists")]
    NoApplication,

    /// The handle is stale, foreign or of the wrong kind
    #[error("Handle does not refer to a live resource")]
    InvalidHandle,

    /// The platform could not create the native window
    #[error("Window creation failed: {0}")]
    WindowCreation(#[source] PlatformError),

    /// GPU entry points could not be loaded for the new window's context
    #[error("Failed to load GPU functions for window \"{0}\"")]
    ContextLoad(String),

    /// Indexed draw requested on an object without an element buffer
    #[error("Render object has no element buffer")]
    NoElementBuffer,

    /// Shader program failed to build
    #[error(transparent)]
    Program(#[from] ProgramError),

    /// Configuration file problem
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for library operations
pub type GxResult<T> = Result<T, GxError>;
