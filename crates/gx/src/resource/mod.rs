//! Managed resources
//!
//! A [`Resource`] is the unit of managed lifetime: a status flag set plus
//! exactly one payload, either a [`Window`] or a [`RenderObject`]. The payload
//! kind is fixed at creation; downcasts to the wrong kind return `None`.

mod object;
mod registry;
mod status;
mod window;

pub use object::{ObjectHandles, RenderObject, RenderObjectDescriptor, UserData};
pub use registry::Registry;
pub use status::ResourceStatus;
pub use window::{DrawCallback, Window};

use crate::foundation::collections::TypedHandle;

/// Handle to any resource
pub type ResourceHandle = TypedHandle<Resource>;

/// Handle to a window resource
pub type WindowHandle = TypedHandle<Window>;

/// Handle to a render object resource
pub type ObjectHandle = TypedHandle<RenderObject>;

impl From<WindowHandle> for ResourceHandle {
    fn from(handle: WindowHandle) -> Self {
        handle.cast()
    }
}

impl From<ObjectHandle> for ResourceHandle {
    fn from(handle: ObjectHandle) -> Self {
        handle.cast()
    }
}

/// Payload discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Native window
    Window,
    /// Drawable GPU object
    RenderObject,
}

/// Resource payload
#[derive(Debug)]
pub enum ResourcePayload {
    /// Native window
    Window(Window),
    /// Drawable GPU object
    RenderObject(RenderObject),
}

/// A registry-owned resource
#[derive(Debug)]
pub struct Resource {
    status: ResourceStatus,
    payload: ResourcePayload,
}

impl Resource {
    pub(crate) fn new(payload: ResourcePayload) -> Self {
        Self {
            status: ResourceStatus::NONE,
            payload,
        }
    }

    /// Payload discriminant
    pub fn kind(&self) -> ResourceKind {
        match self.payload {
            ResourcePayload::Window(_) => ResourceKind::Window,
            ResourcePayload::RenderObject(_) => ResourceKind::RenderObject,
        }
    }

    /// Lifecycle flags
    pub fn status(&self) -> ResourceStatus {
        self.status
    }

    pub(crate) fn status_mut(&mut self) -> &mut ResourceStatus {
        &mut self.status
    }

    /// Payload
    pub fn payload(&self) -> &ResourcePayload {
        &self.payload
    }

    pub(crate) fn into_payload(self) -> ResourcePayload {
        self.payload
    }

    /// Window payload, if this is a window
    pub fn as_window(&self) -> Option<&Window> {
        match &self.payload {
            ResourcePayload::Window(window) => Some(window),
            ResourcePayload::RenderObject(_) => None,
        }
    }

    /// Mutable window payload, if this is a window
    pub fn as_window_mut(&mut self) -> Option<&mut Window> {
        match &mut self.payload {
            ResourcePayload::Window(window) => Some(window),
            ResourcePayload::RenderObject(_) => None,
        }
    }

    /// Render object payload, if this is a render object
    pub fn as_render_object(&self) -> Option<&RenderObject> {
        match &self.payload {
            ResourcePayload::RenderObject(object) => Some(object),
            ResourcePayload::Window(_) => None,
        }
    }
}
