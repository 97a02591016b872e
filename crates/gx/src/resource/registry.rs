//! Resource registry
//!
//! Owns every live resource of one application. Resources are stored in a
//! slot map, so insertion, lookup and removal are O(1) and keys of removed
//! resources are never reused with the same version. The registry also keeps
//! the surface → window association used to route backend events.

use std::collections::HashMap;

use slotmap::SlotMap;

use super::{
    ObjectHandle, RenderObject, Resource, ResourceHandle, ResourceKind, ResourcePayload, Window,
    WindowHandle,
};
use crate::foundation::collections::{ApplicationId, ResourceKey, TypedHandle};
use crate::platform::SurfaceId;

/// Unordered set of live resources keyed by identity
#[derive(Debug)]
pub struct Registry {
    app: ApplicationId,
    resources: SlotMap<ResourceKey, Resource>,
    surfaces: HashMap<SurfaceId, ResourceKey>,
}

impl Registry {
    pub(crate) fn new(app: ApplicationId) -> Self {
        Self {
            app,
            resources: SlotMap::with_key(),
            surfaces: HashMap::new(),
        }
    }

    /// Application that owns this registry
    pub fn application(&self) -> ApplicationId {
        self.app
    }

    /// Number of live resources
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether no resource is alive
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Number of live windows
    pub fn window_count(&self) -> usize {
        self.surfaces.len()
    }

    /// Whether `handle` refers to a live resource of this registry
    pub fn contains(&self, handle: impl Into<ResourceHandle>) -> bool {
        self.resolve(handle.into()).is_some()
    }

    /// Build a handle for a key of this registry
    pub fn handle<T>(&self, key: ResourceKey) -> TypedHandle<T> {
        TypedHandle::new(self.app, key)
    }

    fn resolve(&self, handle: ResourceHandle) -> Option<ResourceKey> {
        (handle.application() == self.app && self.resources.contains_key(handle.key()))
            .then(|| handle.key())
    }

    /// Resource behind `handle`
    pub fn get(&self, handle: impl Into<ResourceHandle>) -> Option<&Resource> {
        let key = self.resolve(handle.into())?;
        self.resources.get(key)
    }

    pub(crate) fn get_mut(&mut self, handle: impl Into<ResourceHandle>) -> Option<&mut Resource> {
        let key = self.resolve(handle.into())?;
        self.resources.get_mut(key)
    }

    pub(crate) fn get_by_key(&self, key: ResourceKey) -> Option<&Resource> {
        self.resources.get(key)
    }

    pub(crate) fn get_mut_by_key(&mut self, key: ResourceKey) -> Option<&mut Resource> {
        self.resources.get_mut(key)
    }

    /// Window behind `handle`
    pub fn window(&self, handle: WindowHandle) -> Option<&Window> {
        self.get(handle)?.as_window()
    }

    /// Mutable window behind `handle`
    pub fn window_mut(&mut self, handle: WindowHandle) -> Option<&mut Window> {
        self.get_mut(handle)?.as_window_mut()
    }

    /// Render object behind `handle`
    pub fn render_object(&self, handle: ObjectHandle) -> Option<&RenderObject> {
        self.get(handle)?.as_render_object()
    }

    /// Window resource that owns `surface`
    pub fn window_for_surface(&self, surface: SurfaceId) -> Option<ResourceKey> {
        self.surfaces.get(&surface).copied()
    }

    /// Insert a window built around its own key
    pub(crate) fn insert_window(&mut self, build: impl FnOnce(ResourceKey) -> Window) -> WindowHandle {
        let key = self
            .resources
            .insert_with_key(|key| Resource::new(ResourcePayload::Window(build(key))));
        if let Some(window) = self.resources[key].as_window() {
            self.surfaces.insert(window.surface, key);
        }
        self.handle(key)
    }

    /// Insert a render object built around its own key
    pub(crate) fn insert_render_object(
        &mut self,
        build: impl FnOnce(ResourceKey) -> RenderObject,
    ) -> ObjectHandle {
        let key = self
            .resources
            .insert_with_key(|key| Resource::new(ResourcePayload::RenderObject(build(key))));
        self.handle(key)
    }

    /// Remove a resource, returning it for release
    pub(crate) fn remove(&mut self, handle: ResourceHandle) -> Option<Resource> {
        let key = self.resolve(handle)?;
        self.remove_key(key)
    }

    pub(crate) fn remove_key(&mut self, key: ResourceKey) -> Option<Resource> {
        let resource = self.resources.remove(key)?;
        if let Some(window) = resource.as_window() {
            self.surfaces.remove(&window.surface);
        }
        Some(resource)
    }

    /// Snapshot of every live key
    ///
    /// Destructive passes iterate a snapshot so that removal cannot invalidate
    /// the iteration.
    pub fn keys(&self) -> Vec<ResourceKey> {
        self.resources.keys().collect()
    }

    /// Snapshot of every live window key
    pub fn window_keys(&self) -> Vec<ResourceKey> {
        self.resources
            .iter()
            .filter(|(_, resource)| resource.kind() == ResourceKind::Window)
            .map(|(key, _)| key)
            .collect()
    }

    /// Snapshot of handles to every live resource
    pub fn handles(&self) -> Vec<ResourceHandle> {
        self.resources.keys().map(|key| self.handle(key)).collect()
    }

    /// Iterate live windows
    pub fn windows(&self) -> impl Iterator<Item = (WindowHandle, &Window)> + '_ {
        self.resources
            .iter()
            .filter_map(move |(key, resource)| Some((self.handle(key), resource.as_window()?)))
    }

    /// Iterate live render objects
    pub fn render_objects(&self) -> impl Iterator<Item = (ObjectHandle, &RenderObject)> + '_ {
        self.resources
            .iter()
            .filter_map(move |(key, resource)| Some((self.handle(key), resource.as_render_object()?)))
    }
}
