//! Windowing platform abstraction
//!
//! The resource layer never talks to GLFW directly. Everything it needs from
//! the windowing system goes through the [`Platform`] trait:
//!
//! ```text
//! ┌─────────────────────────────────┐
//! │     Gx (registry + loop)        │
//! └─────────────┬───────────────────┘
//!               │ SurfaceId
//!      ┌────────▼────────┐
//!      │ Platform trait  │
//!      └────────┬────────┘
//!               │ Implemented by
//!      ┌────────▼────────┐
//!      │ GlfwPlatform    │ ← glfw_backend.rs
//!      └─────────────────┘
//! ```
//!
//! Windows are referred to by [`SurfaceId`]. The registry keeps the
//! surface → resource association so that events reported per surface can be
//! routed back to the owning window resource.

use std::ffi::c_void;

use thiserror::Error;

use crate::input::KeyEvent;

mod glfw_backend;

pub use glfw_backend::GlfwPlatform;

slotmap::new_key_type! {
    /// Backend identity of a native window
    pub struct SurfaceId;
}

/// Platform errors
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Backend library failed to initialize
    #[error("Platform initialization failed: {0}")]
    InitializationFailed(String),

    /// Native window creation failed
    #[error("Window creation failed: {0}")]
    CreationFailed(String),
}

/// Result type for platform operations
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Parameters for a native window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceDescriptor<'a> {
    /// Title bar text
    pub title: &'a str,
    /// Client width in pixels
    pub width: i32,
    /// Client height in pixels
    pub height: i32,
    /// Create the window already visible
    pub visible: bool,
}

/// Events reported by [`Platform::poll_events`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    /// A key changed state while `surface` had focus
    Key {
        /// Originating window
        surface: SurfaceId,
        /// Key data
        event: KeyEvent,
    },

    /// The user asked to close `surface`
    CloseRequested {
        /// Originating window
        surface: SurfaceId,
    },

    /// The contents of `surface` were damaged and need redrawing
    Refresh {
        /// Originating window
        surface: SurfaceId,
    },

    /// The framebuffer of `surface` was resized
    FramebufferResized {
        /// Originating window
        surface: SurfaceId,
        /// New width in pixels
        width: i32,
        /// New height in pixels
        height: i32,
    },
}

/// Windowing backend contract
///
/// Operations on an unknown surface are ignored (queries return a neutral
/// value). All calls happen on the thread that owns the event loop.
pub trait Platform {
    /// Create a native window with a current-capable GL context
    fn create_window(&mut self, descriptor: &SurfaceDescriptor<'_>) -> PlatformResult<SurfaceId>;

    /// Destroy a native window and its context
    fn destroy_window(&mut self, surface: SurfaceId);

    /// Make the window visible
    fn show_window(&mut self, surface: SurfaceId);

    /// Hide the window
    fn hide_window(&mut self, surface: SurfaceId);

    /// Process pending window system events and return them in arrival order
    fn poll_events(&mut self) -> Vec<PlatformEvent>;

    /// Whether closure was requested for the window
    fn should_close(&self, surface: SurfaceId) -> bool;

    /// Set or clear the close request flag
    fn set_should_close(&mut self, surface: SurfaceId, should_close: bool);

    /// Make the window's GL context current on this thread
    fn make_current(&mut self, surface: SurfaceId);

    /// Current framebuffer size in pixels
    fn framebuffer_size(&self, surface: SurfaceId) -> (i32, i32);

    /// Present the back buffer
    fn swap_buffers(&mut self, surface: SurfaceId);

    /// Set the swap interval of the current context (0 disables vsync)
    fn set_swap_interval(&mut self, interval: u32);

    /// Address of a GL entry point, resolved through the window's context
    fn proc_address(&mut self, surface: SurfaceId, name: &str) -> *const c_void;
}
