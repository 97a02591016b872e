//! # Gx
//!
//! A small retained-mode layer over GLFW windows and OpenGL objects.
//!
//! ## Features
//!
//! - **Resource Registry**: windows and render objects with tracked lifetimes
//! - **Single Application**: one active application per context, torn down as a unit
//! - **Event Loop**: polls input, reconciles visibility, draws every shown window
//! - **Swappable Backends**: windowing and GPU calls go through traits
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gx::prelude::*;
//!
//! fn on_key(gx: &mut Gx, window: WindowHandle, event: KeyEvent) {
//!     if event.is_press(KeyCode::Escape) {
//!         gx.window_close(window);
//!     }
//! }
//!
//! fn main() -> Result<(), GxError> {
//!     let mut gx = Gx::init(&ContextConfig::default())?;
//!     gx.create_application(ApplicationOptions::NONE);
//!     gx.add_keyboard_callback(on_key);
//!
//!     let window = gx.create_window(&WindowConfig::new("hello", 640, 480))?;
//!     gx.set_draw_callback(window, |ctx| ctx.set_background(0.1, 0.2, 0.3, 1.0));
//!
//!     gx.exec();
//!     gx.terminate();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::must_use_candidate,
    clippy::missing_errors_doc
)]

pub mod foundation;
pub mod config;
pub mod input;
pub mod platform;
pub mod gpu;
pub mod resource;
pub mod render;
pub mod application;
pub mod context;
pub mod event_loop;
pub mod error;

#[cfg(test)]
mod testing;
#[cfg(test)]
mod tests;

pub use application::{Application, ApplicationOptions, KeyboardCallback};
pub use context::Gx;
pub use error::{GxError, GxResult};
pub use event_loop::TickOutcome;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::application::{Application, ApplicationOptions, KeyboardCallback};
    pub use crate::config::{Config, ContextConfig, WindowConfig};
    pub use crate::context::Gx;
    pub use crate::error::{GxError, GxResult};
    pub use crate::event_loop::TickOutcome;
    pub use crate::gpu::{
        AttributeType, BufferData, BufferType, BufferUsage, ClearMask, ShaderStage, VertexAttribute,
    };
    pub use crate::input::{KeyAction, KeyCode, KeyEvent, Modifiers};
    pub use crate::render::RenderContext;
    pub use crate::resource::{
        ObjectHandle, RenderObject, RenderObjectDescriptor, ResourceHandle, ResourceStatus, Window,
        WindowHandle,
    };
}
