//! Application state
//!
//! At most one [`Application`] exists per [`Gx`](crate::Gx) context. It owns
//! the resource registry and the keyboard callback set; destroying it releases
//! every resource it still holds.

use std::collections::HashSet;

use bitflags::bitflags;

use crate::context::Gx;
use crate::foundation::collections::ApplicationId;
use crate::input::KeyEvent;
use crate::resource::{Registry, WindowHandle};

/// Keyboard callback, invoked for every key event of every window
///
/// Callbacks are plain functions so that the set can deduplicate them:
/// registering the same function twice keeps a single entry.
pub type KeyboardCallback = fn(&mut Gx, WindowHandle, KeyEvent);

bitflags! {
    /// Application behavior flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ApplicationOptions: u32 {
        /// Hidden windows keep the event loop running
        const KEEP_ALIVE_WHILE_HIDDEN = 1;
    }
}

impl ApplicationOptions {
    /// Default behavior: only shown windows keep the loop alive
    pub const NONE: Self = Self::empty();
}

/// The single application of a context
#[derive(Debug)]
pub struct Application {
    id: ApplicationId,
    options: ApplicationOptions,
    pub(crate) registry: Registry,
    pub(crate) keyboard_callbacks: HashSet<KeyboardCallback>,
}

impl Application {
    pub(crate) fn new(id: ApplicationId, options: ApplicationOptions) -> Self {
        Self {
            id,
            options,
            registry: Registry::new(id),
            keyboard_callbacks: HashSet::new(),
        }
    }

    /// Identity of this application
    pub fn id(&self) -> ApplicationId {
        self.id
    }

    /// Behavior flags
    pub fn options(&self) -> ApplicationOptions {
        self.options
    }

    /// Live resources
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Mutable access to live resources
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Number of distinct keyboard callbacks
    pub fn keyboard_callback_count(&self) -> usize {
        self.keyboard_callbacks.len()
    }

    /// Whether a window counts toward keeping the loop alive
    pub(crate) fn keeps_alive(&self, shown: bool) -> bool {
        shown || self.options.contains(ApplicationOptions::KEEP_ALIVE_WHILE_HIDDEN)
    }

    pub(crate) fn callback_snapshot(&self) -> Vec<KeyboardCallback> {
        self.keyboard_callbacks.iter().copied().collect()
    }
}
