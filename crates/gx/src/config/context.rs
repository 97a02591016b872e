//! Context and window configuration

use serde::{Deserialize, Serialize};

use super::Config;

/// # Context Configuration
///
/// OpenGL context hints applied by the platform before any window is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Requested OpenGL major version
    pub gl_version_major: u32,
    /// Requested OpenGL minor version
    pub gl_version_minor: u32,
    /// Request a core profile context
    pub core_profile: bool,
    /// Request a forward-compatible context (required on macOS)
    pub forward_compat: bool,
    /// Request a debug context
    pub debug_context: bool,
}

impl ContextConfig {
    /// Create the default 4.6 core profile configuration
    pub fn new() -> Self {
        Self {
            gl_version_major: 4,
            gl_version_minor: 6,
            core_profile: true,
            forward_compat: cfg!(target_os = "macos"),
            debug_context: cfg!(debug_assertions),
        }
    }

    /// Set the requested OpenGL version
    pub fn with_version(mut self, major: u32, minor: u32) -> Self {
        self.gl_version_major = major;
        self.gl_version_minor = minor;
        self
    }

    /// Enable or disable the debug context
    pub fn with_debug_context(mut self, enabled: bool) -> Self {
        self.debug_context = enabled;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.gl_version_major < 3 || (self.gl_version_major == 3 && self.gl_version_minor < 3) {
            return Err(format!(
                "OpenGL {}.{} is too old, vertex array objects need at least 3.3",
                self.gl_version_major, self.gl_version_minor
            ));
        }
        Ok(())
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for ContextConfig {}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,

    /// Window width in pixels
    pub width: i32,

    /// Window height in pixels
    pub height: i32,

    /// VSync setting
    pub vsync: bool,

    /// Whether the window should be shown by the event loop
    pub show: bool,
}

impl WindowConfig {
    /// Create a shown, vsynced window configuration
    pub fn new(title: impl Into<String>, width: i32, height: i32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            vsync: true,
            show: true,
        }
    }

    /// Set vsync
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    /// Set initial visibility
    pub fn with_show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new("gx", 800, 600)
    }
}

impl Config for WindowConfig {}
