//! Resource lifecycle flags

use bitflags::bitflags;

bitflags! {
    /// Lifecycle state of a resource
    ///
    /// The flags are independent and may be set together. An empty set is the
    /// initial state of every resource.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ResourceStatus: u32 {
        /// The window is visible at the backend level
        const SHOWING = 1;
        /// The resource has been used at least once (window presented, object bound)
        const INITIATED = 2;
        /// The backend asked for the window to be torn down
        const SHOULD_CLOSE = 4;
    }
}

impl ResourceStatus {
    /// No flag set
    pub const NONE: Self = Self::empty();

    /// Window is currently visible
    pub fn is_showing(self) -> bool {
        self.contains(Self::SHOWING)
    }

    /// Resource has been used at least once
    pub fn is_initiated(self) -> bool {
        self.contains(Self::INITIATED)
    }

    /// Closure was requested
    pub fn should_close(self) -> bool {
        self.contains(Self::SHOULD_CLOSE)
    }

    /// Set or clear the SHOWING flag
    pub fn set_showing(&mut self, showing: bool) {
        self.set(Self::SHOWING, showing);
    }

    /// Set the INITIATED flag
    pub fn mark_initiated(&mut self) {
        self.insert(Self::INITIATED);
    }

    /// Set the SHOULD_CLOSE flag
    pub fn request_close(&mut self) {
        self.insert(Self::SHOULD_CLOSE);
    }

    /// Clear the SHOULD_CLOSE flag
    pub fn cancel_close(&mut self) {
        self.remove(Self::SHOULD_CLOSE);
    }
}
