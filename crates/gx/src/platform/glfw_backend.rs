//! Window management using GLFW
//!
//! Provides cross-platform window creation and event handling for OpenGL

use std::ffi::c_void;

use glfw::Context;
use slotmap::SlotMap;

use super::{Platform, PlatformError, PlatformEvent, PlatformResult, SurfaceDescriptor, SurfaceId};
use crate::config::ContextConfig;
use crate::input::{KeyAction, KeyCode, KeyEvent, Modifiers};

/// A native window together with its event queue
struct GlfwSurface {
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

/// GLFW platform with proper resource management
pub struct GlfwPlatform {
    // Declared before `glfw` so windows are destroyed before the library terminates.
    surfaces: SlotMap<SurfaceId, GlfwSurface>,
    glfw: glfw::Glfw,
    config: ContextConfig,
}

impl GlfwPlatform {
    /// Initialize GLFW with the context hints from `config`
    pub fn new(config: &ContextConfig) -> PlatformResult<Self> {
        config.validate().map_err(PlatformError::InitializationFailed)?;

        let glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|e| PlatformError::InitializationFailed(format!("Failed to initialize GLFW: {:?}", e)))?;

        log::info!(
            "GLFW initialized, requesting OpenGL {}.{} context",
            config.gl_version_major,
            config.gl_version_minor
        );

        Ok(Self {
            surfaces: SlotMap::with_key(),
            glfw,
            config: config.clone(),
        })
    }

    fn apply_context_hints(&mut self, visible: bool) {
        let config = &self.config;
        self.glfw.window_hint(glfw::WindowHint::ContextVersion(
            config.gl_version_major,
            config.gl_version_minor,
        ));
        if config.core_profile {
            self.glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
        }
        self.glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(config.forward_compat));
        self.glfw.window_hint(glfw::WindowHint::OpenGlDebugContext(config.debug_context));
        self.glfw.window_hint(glfw::WindowHint::Visible(visible));
    }

    fn translate(surface: SurfaceId, event: glfw::WindowEvent) -> Option<PlatformEvent> {
        match event {
            glfw::WindowEvent::Key(key, scancode, action, mods) => {
                let action = KeyAction::from_raw(action as i32)?;
                Some(PlatformEvent::Key {
                    surface,
                    event: KeyEvent {
                        key: KeyCode::from_raw(key as i32),
                        scancode,
                        action,
                        modifiers: Modifiers::from_bits_truncate(mods.bits()),
                    },
                })
            }
            glfw::WindowEvent::Close => Some(PlatformEvent::CloseRequested { surface }),
            glfw::WindowEvent::Refresh => Some(PlatformEvent::Refresh { surface }),
            glfw::WindowEvent::FramebufferSize(width, height) => {
                Some(PlatformEvent::FramebufferResized { surface, width, height })
            }
            _ => None,
        }
    }
}

/// Merge per-window queues into one sequence ordered by GLFW timestamp
///
/// The sort is stable, so events sharing a timestamp keep their queue order.
fn arrival_order(mut events: Vec<(f64, PlatformEvent)>) -> Vec<PlatformEvent> {
    events.sort_by(|a, b| a.0.total_cmp(&b.0));
    events.into_iter().map(|(_, event)| event).collect()
}

impl Platform for GlfwPlatform {
    fn create_window(&mut self, descriptor: &SurfaceDescriptor<'_>) -> PlatformResult<SurfaceId> {
        if descriptor.width <= 0 || descriptor.height <= 0 {
            return Err(PlatformError::CreationFailed(format!(
                "Invalid window size {}x{}",
                descriptor.width, descriptor.height
            )));
        }

        self.apply_context_hints(descriptor.visible);

        let (mut window, events) = self
            .glfw
            .create_window(
                descriptor.width as u32,
                descriptor.height as u32,
                descriptor.title,
                glfw::WindowMode::Windowed,
            )
            .ok_or_else(|| PlatformError::CreationFailed(descriptor.title.to_string()))?;

        window.set_key_polling(true);
        window.set_close_polling(true);
        window.set_refresh_polling(true);
        window.set_framebuffer_size_polling(true);

        Ok(self.surfaces.insert(GlfwSurface { window, events }))
    }

    fn destroy_window(&mut self, surface: SurfaceId) {
        // Dropping the PWindow destroys the native window.
        if self.surfaces.remove(surface).is_none() {
            log::warn!("Attempted to destroy unknown surface {:?}", surface);
        }
    }

    fn show_window(&mut self, surface: SurfaceId) {
        if let Some(s) = self.surfaces.get_mut(surface) {
            s.window.show();
        }
    }

    fn hide_window(&mut self, surface: SurfaceId) {
        if let Some(s) = self.surfaces.get_mut(surface) {
            s.window.hide();
        }
    }

    fn poll_events(&mut self) -> Vec<PlatformEvent> {
        self.glfw.poll_events();

        let mut events = Vec::new();
        for (id, surface) in &self.surfaces {
            for (time, event) in glfw::flush_messages(&surface.events) {
                if let Some(event) = Self::translate(id, event) {
                    events.push((time, event));
                }
            }
        }
        arrival_order(events)
    }

    fn should_close(&self, surface: SurfaceId) -> bool {
        self.surfaces
            .get(surface)
            .is_some_and(|s| s.window.should_close())
    }

    fn set_should_close(&mut self, surface: SurfaceId, should_close: bool) {
        if let Some(s) = self.surfaces.get_mut(surface) {
            s.window.set_should_close(should_close);
        }
    }

    fn make_current(&mut self, surface: SurfaceId) {
        if let Some(s) = self.surfaces.get_mut(surface) {
            s.window.make_current();
        }
    }

    fn framebuffer_size(&self, surface: SurfaceId) -> (i32, i32) {
        self.surfaces
            .get(surface)
            .map_or((0, 0), |s| s.window.get_framebuffer_size())
    }

    fn swap_buffers(&mut self, surface: SurfaceId) {
        if let Some(s) = self.surfaces.get_mut(surface) {
            s.window.swap_buffers();
        }
    }

    fn set_swap_interval(&mut self, interval: u32) {
        let interval = if interval == 0 {
            glfw::SwapInterval::None
        } else {
            glfw::SwapInterval::Sync(interval)
        };
        self.glfw.set_swap_interval(interval);
    }

    fn proc_address(&mut self, surface: SurfaceId, name: &str) -> *const c_void {
        self.surfaces
            .get_mut(surface)
            .map_or(std::ptr::null(), |s| s.window.get_proc_address(name) as *const c_void)
    }
}
