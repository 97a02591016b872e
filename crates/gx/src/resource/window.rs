//! Window payload

use std::fmt;

use crate::foundation::collections::ResourceKey;
use crate::platform::SurfaceId;
use crate::render::RenderContext;

/// Per-window draw callback, invoked once per tick while the window is shown
pub type DrawCallback = Box<dyn FnMut(&mut RenderContext<'_>)>;

/// A native window managed by the registry
///
/// Width and height are refreshed from the framebuffer every time the window
/// is drawn. The title is fixed at creation. `show` is the caller's request;
/// the event loop reconciles it against the backend visibility on each tick.
pub struct Window {
    pub(crate) resource: ResourceKey,
    pub(crate) width: i32,
    pub(crate) height: i32,
    title: String,
    show: bool,
    pub(crate) surface: SurfaceId,
    pub(crate) draw_callback: Option<DrawCallback>,
}

impl Window {
    pub(crate) fn new(
        resource: ResourceKey,
        surface: SurfaceId,
        title: String,
        width: i32,
        height: i32,
        show: bool,
    ) -> Self {
        Self {
            resource,
            width,
            height,
            title,
            show,
            surface,
            draw_callback: None,
        }
    }

    /// Key of the owning resource
    pub fn resource_key(&self) -> ResourceKey {
        self.resource
    }

    /// Backend surface of this window
    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    /// Framebuffer width in pixels as of the last draw
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Framebuffer height in pixels as of the last draw
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Window title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether the window is requested to be visible
    pub fn is_shown(&self) -> bool {
        self.show
    }

    /// Request the window to be shown or hidden on the next tick
    pub fn set_show(&mut self, show: bool) {
        self.show = show;
    }

    /// Whether a draw callback is installed
    pub fn has_draw_callback(&self) -> bool {
        self.draw_callback.is_some()
    }

    /// Install or replace the draw callback
    pub fn set_draw_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&mut RenderContext<'_>) + 'static,
    {
        self.draw_callback = Some(Box::new(callback));
    }

    /// Remove the draw callback, returning it
    pub fn clear_draw_callback(&mut self) -> Option<DrawCallback> {
        self.draw_callback.take()
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("resource", &self.resource)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("title", &self.title)
            .field("show", &self.show)
            .field("surface", &self.surface)
            .field("draw_callback", &self.draw_callback.is_some())
            .finish()
    }
}
