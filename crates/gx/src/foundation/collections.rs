//! Specialized collection types and typed handles

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

pub use slotmap::{Key, SlotMap};

slotmap::new_key_type! {
    /// Identity of a resource inside one application's registry
    pub struct ResourceKey;
}

/// Generation number of an application instance
///
/// Every call to `Gx::create_application` produces a new id, so handles issued
/// by a destroyed application never resolve against its successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApplicationId(pub(crate) u64);

impl ApplicationId {
    /// Raw generation value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "app#{}", self.0)
    }
}

/// Typed handle for type-safe resource references
///
/// `T` only tags the handle; it is never stored.
pub struct TypedHandle<T> {
    app: ApplicationId,
    key: ResourceKey,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> TypedHandle<T> {
    pub(crate) fn new(app: ApplicationId, key: ResourceKey) -> Self {
        Self {
            app,
            key,
            _phantom: PhantomData,
        }
    }

    /// Application that issued this handle
    pub fn application(&self) -> ApplicationId {
        self.app
    }

    /// Get the underlying key
    pub fn key(&self) -> ResourceKey {
        self.key
    }

    /// Re-tag the handle with another payload type
    pub(crate) fn cast<U>(self) -> TypedHandle<U> {
        TypedHandle::new(self.app, self.key)
    }
}

// Manual impls so that `T` does not need to satisfy the derived bounds.
impl<T> Clone for TypedHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedHandle<T> {}

impl<T> PartialEq for TypedHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.app == other.app && self.key == other.key
    }
}

impl<T> Eq for TypedHandle<T> {}

impl<T> Hash for TypedHandle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.app.hash(state);
        self.key.hash(state);
    }
}

impl<T> fmt::Debug for TypedHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedHandle")
            .field("app", &self.app)
            .field("key", &self.key)
            .finish()
    }
}
