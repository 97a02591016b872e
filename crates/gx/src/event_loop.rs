//! Event/render loop
//!
//! One tick runs four ordered phases:
//!
//! 1. poll backend events and dispatch keyboard callbacks
//! 2. reconcile window visibility and collect windows asked to close
//! 3. destroy the collected windows
//! 4. draw every shown window that has a draw callback
//!
//! The loop stops once no window keeps it alive. Destructive passes always run
//! over a snapshot of registry keys.

use crate::context::{release_resource, Gx};
use crate::foundation::collections::{ApplicationId, ResourceKey};
use crate::platform::{PlatformEvent, SurfaceId};
use crate::render::RenderContext;
use crate::resource::Resource;

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// At least one window keeps the loop alive
    Continue,
    /// No window keeps the loop alive, or no application exists
    Exit,
}

impl Gx {
    /// Run ticks until the loop terminates
    pub fn exec(&mut self) {
        log::info!("Entering event loop");
        let mut ticks: u64 = 0;
        while self.tick() == TickOutcome::Continue {
            ticks += 1;
        }
        log::info!("Event loop finished after {} ticks", ticks);
    }

    /// Run one iteration of the loop
    pub fn tick(&mut self) -> TickOutcome {
        let Some(app_id) = self.application.as_ref().map(|app| app.id()) else {
            return TickOutcome::Exit;
        };

        for event in self.platform.poll_events() {
            self.dispatch_event(event);
            // A keyboard callback may have replaced or destroyed the application.
            if self.active_application() != Some(app_id) {
                log::debug!("Application changed during event dispatch, ending tick");
                return if self.application.is_some() {
                    TickOutcome::Continue
                } else {
                    TickOutcome::Exit
                };
            }
        }

        let alive = self.reconcile_windows();
        if !alive {
            log::trace!("No window keeps the loop alive");
            return TickOutcome::Exit;
        }

        self.draw_pass();
        TickOutcome::Continue
    }

    fn active_application(&self) -> Option<ApplicationId> {
        self.application.as_ref().map(|app| app.id())
    }

    fn window_key_for(&self, surface: SurfaceId) -> Option<ResourceKey> {
        self.application.as_ref()?.registry.window_for_surface(surface)
    }

    fn dispatch_event(&mut self, event: PlatformEvent) {
        match event {
            PlatformEvent::Key { surface, event } => {
                let Some(app) = self.application.as_ref() else {
                    return;
                };
                let Some(key) = app.registry.window_for_surface(surface) else {
                    return;
                };
                let window = app.registry.handle(key);
                let app_id = app.id();
                for callback in app.callback_snapshot() {
                    callback(self, window, event);
                    if self.active_application() != Some(app_id) {
                        break;
                    }
                }
            }
            PlatformEvent::CloseRequested { surface } => {
                let Some(key) = self.window_key_for(surface) else {
                    return;
                };
                if let Some(resource) = self.resource_by_key_mut(key) {
                    resource.status_mut().request_close();
                }
            }
            PlatformEvent::Refresh { surface } => {
                if let Some(key) = self.window_key_for(surface) {
                    self.draw_window(key);
                }
            }
            PlatformEvent::FramebufferResized { surface, width, height } => {
                let Some(key) = self.window_key_for(surface) else {
                    return;
                };
                if let Some(window) = self.resource_by_key_mut(key).and_then(Resource::as_window_mut) {
                    window.width = width;
                    window.height = height;
                }
            }
        }
    }

    fn resource_by_key_mut(&mut self, key: ResourceKey) -> Option<&mut Resource> {
        self.application.as_mut()?.registry.get_mut_by_key(key)
    }

    /// Reconcile visibility, destroy closed windows and report liveness
    fn reconcile_windows(&mut self) -> bool {
        let Some(app) = self.application.as_mut() else {
            return false;
        };

        let mut removal = Vec::new();
        let mut alive = false;
        for key in app.registry.window_keys() {
            let Some(resource) = app.registry.get_mut_by_key(key) else {
                continue;
            };
            let status = resource.status();
            let Some(window) = resource.as_window() else {
                continue;
            };
            let (surface, show) = (window.surface, window.is_shown());

            if status.should_close() || self.platform.should_close(surface) {
                removal.push(key);
                continue;
            }

            if show && !status.is_showing() {
                self.platform.show_window(surface);
                resource.status_mut().set_showing(true);
            } else if !show && status.is_showing() {
                self.platform.hide_window(surface);
                resource.status_mut().set_showing(false);
            }

            alive |= app.keeps_alive(show);
        }

        for key in removal {
            if let Some(resource) = app.registry.remove_key(key) {
                release_resource(self.platform.as_mut(), self.gpu.as_mut(), resource);
            }
        }

        alive
    }

    fn draw_pass(&mut self) {
        let keys = match self.application.as_ref() {
            Some(app) => app.registry.window_keys(),
            None => return,
        };
        for key in keys {
            let shown = self
                .application
                .as_ref()
                .and_then(|app| app.registry.get_by_key(key)?.as_window())
                .is_some_and(|window| window.is_shown());
            if shown {
                self.draw_window(key);
            }
        }
    }

    /// Draw one window through its callback and present it
    ///
    /// Returns false if the window is gone or has no draw callback.
    pub(crate) fn draw_window(&mut self, key: ResourceKey) -> bool {
        let Some(app) = self.application.as_mut() else {
            return false;
        };
        let Some(window) = app.registry.get_mut_by_key(key).and_then(Resource::as_window_mut) else {
            return false;
        };
        let Some(mut callback) = window.draw_callback.take() else {
            return false;
        };

        let surface = window.surface;
        self.platform.make_current(surface);
        let (width, height) = self.platform.framebuffer_size(surface);
        window.width = width;
        window.height = height;

        {
            let mut context = RenderContext::new(&mut app.registry, self.gpu.as_mut(), Some(key));
            callback(&mut context);
        }

        if let Some(resource) = app.registry.get_mut_by_key(key) {
            resource.status_mut().mark_initiated();
            if let Some(window) = resource.as_window_mut() {
                if window.draw_callback.is_none() {
                    window.draw_callback = Some(callback);
                }
            }
        }

        self.platform.swap_buffers(surface);
        log::trace!("Presented window {:?}", key);
        true
    }
}
