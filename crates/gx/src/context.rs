//! Library context
//!
//! [`Gx`] is the explicit context threaded through every call. It owns the
//! windowing backend, the GPU backend and the (at most one) active
//! [`Application`]. Creating a new application tears down the previous one, so
//! handles from an earlier application never resolve again.

use std::ffi::c_void;

use crate::application::{Application, ApplicationOptions, KeyboardCallback};
use crate::config::{ContextConfig, WindowConfig};
use crate::error::{GxError, GxResult};
use crate::foundation::collections::ApplicationId;
use crate::gpu::{self, BufferData, BufferType, GlDevice, GpuDevice, ShaderCompilation, ShaderStage};
use crate::platform::{GlfwPlatform, Platform, SurfaceDescriptor};
use crate::render::RenderContext;
use crate::resource::{
    ObjectHandle, ObjectHandles, RenderObject, RenderObjectDescriptor, Resource, ResourceHandle,
    ResourceKind, ResourcePayload, UserData, Window, WindowHandle,
};

/// The library context
pub struct Gx {
    pub(crate) platform: Box<dyn Platform>,
    pub(crate) gpu: Box<dyn GpuDevice>,
    pub(crate) application: Option<Application>,
    next_application: u64,
}

impl Gx {
    /// Initialize GLFW and the OpenGL backend
    pub fn init(config: &ContextConfig) -> GxResult<Self> {
        let platform = GlfwPlatform::new(config).map_err(|e| GxError::Initialization(e.to_string()))?;
        log::info!("Gx context initialized");
        Ok(Self::with_backends(Box::new(platform), Box::new(GlDevice::new())))
    }

    /// Build a context over arbitrary backends
    pub fn with_backends(platform: Box<dyn Platform>, gpu: Box<dyn GpuDevice>) -> Self {
        Self {
            platform,
            gpu,
            application: None,
            next_application: 1,
        }
    }

    /// Destroy the application (if any) and shut the backends down
    pub fn terminate(mut self) {
        self.destroy_application();
        log::info!("Gx context terminated");
    }

    /// Create the application, destroying any previous one first
    pub fn create_application(&mut self, options: ApplicationOptions) -> &mut Application {
        if self.destroy_application() {
            log::debug!("Replaced previous application");
        }

        let id = ApplicationId(self.next_application);
        self.next_application += 1;
        log::info!("Created application {}", id);
        self.application.insert(Application::new(id, options))
    }

    /// The active application
    pub fn application(&self) -> Option<&Application> {
        self.application.as_ref()
    }

    /// The active application, mutably
    pub fn application_mut(&mut self) -> Option<&mut Application> {
        self.application.as_mut()
    }

    /// Destroy the active application and every resource it owns
    ///
    /// Returns false if no application exists.
    pub fn destroy_application(&mut self) -> bool {
        let Some(mut app) = self.application.take() else {
            return false;
        };

        // Objects first: their GPU names belong to a context of some window.
        let mut keys = app.registry.keys();
        keys.sort_by_key(|key| {
            app.registry
                .get_by_key(*key)
                .map_or(1, |resource| u8::from(resource.kind() == ResourceKind::Window))
        });

        let count = keys.len();
        for key in keys {
            if let Some(resource) = app.registry.remove_key(key) {
                release_resource(self.platform.as_mut(), self.gpu.as_mut(), resource);
            }
        }
        app.keyboard_callbacks.clear();

        log::info!("Destroyed application {} ({} resources released)", app.id(), count);
        true
    }

    /// Register a keyboard callback; duplicates collapse to one entry
    pub fn add_keyboard_callback(&mut self, callback: KeyboardCallback) {
        if let Some(app) = self.application.as_mut() {
            app.keyboard_callbacks.insert(callback);
        }
    }

    /// Remove every keyboard callback
    pub fn clear_keyboard_callbacks(&mut self) {
        if let Some(app) = self.application.as_mut() {
            app.keyboard_callbacks.clear();
        }
    }

    /// Create a window with its own GL context
    ///
    /// Nothing is registered and no native window is leaked when creation fails.
    pub fn create_window(&mut self, config: &WindowConfig) -> GxResult<WindowHandle> {
        let Some(app) = self.application.as_mut() else {
            return Err(GxError::NoApplication);
        };

        let surface = self
            .platform
            .create_window(&SurfaceDescriptor {
                title: &config.title,
                width: config.width,
                height: config.height,
                visible: config.show,
            })
            .map_err(GxError::WindowCreation)?;

        self.platform.make_current(surface);
        let platform = &mut self.platform;
        let loaded = self
            .gpu
            .load_functions(&mut |name: &'static str| -> *const c_void { platform.proc_address(surface, name) });
        if !loaded {
            log::error!("Failed to load GPU functions for window \"{}\"", config.title);
            self.platform.destroy_window(surface);
            return Err(GxError::ContextLoad(config.title.clone()));
        }

        if config.vsync {
            self.platform.set_swap_interval(1);
        }

        let title = config.title.clone();
        let (width, height, show) = (config.width, config.height, config.show);
        let handle = app
            .registry
            .insert_window(|key| Window::new(key, surface, title, width, height, show));

        log::debug!("Created window \"{}\" ({}x{}, show={})", config.title, width, height, show);
        Ok(handle)
    }

    /// Create a render object from vertex data only
    pub fn create_render_object(
        &mut self,
        shader_program: u32,
        vertices: BufferData<'_>,
    ) -> GxResult<ObjectHandle> {
        self.create_render_object_with_elements(
            RenderObjectDescriptor::new(shader_program).with_vertices(vertices),
        )
    }

    /// Create a render object with its vertex array and buffers
    ///
    /// The vertex buffer and element buffer are only created for data that is
    /// present; a missing buffer is recorded as handle 0. The object must be
    /// bound before use.
    pub fn create_render_object_with_elements(
        &mut self,
        descriptor: RenderObjectDescriptor<'_>,
    ) -> GxResult<ObjectHandle> {
        if self.application.is_none() {
            return Err(GxError::NoApplication);
        }

        let gpu = self.gpu.as_mut();
        let vao = gpu.gen_vertex_array();
        let vbo = descriptor
            .vertices
            .map_or(0, |data| gpu.gen_buffer(BufferType::Array, data));
        let ebo = descriptor
            .elements
            .map_or(0, |data| gpu.gen_buffer(BufferType::ElementArray, data));

        self.create_object(
            ObjectHandles {
                shader_program: descriptor.shader_program,
                vao,
                vbo,
                ebo,
            },
            descriptor.user_data,
        )
    }

    /// Adopt existing GPU names as a render object
    ///
    /// The vertex array and buffers become owned by the new resource.
    pub fn create_object(
        &mut self,
        handles: ObjectHandles,
        user_data: Option<UserData>,
    ) -> GxResult<ObjectHandle> {
        let app = self.application.as_mut().ok_or(GxError::NoApplication)?;
        let handle = app
            .registry
            .insert_render_object(|key| RenderObject::new(key, handles, user_data));
        log::debug!(
            "Created render object (program={}, vao={}, vbo={}, ebo={})",
            handles.shader_program,
            handles.vao,
            handles.vbo,
            handles.ebo
        );
        Ok(handle)
    }

    /// Remove a resource from the registry and release its backend handles
    ///
    /// Returns false when no application exists or the handle does not refer
    /// to a live resource.
    pub fn destroy_resource(&mut self, handle: impl Into<ResourceHandle>) -> bool {
        let Some(app) = self.application.as_mut() else {
            return false;
        };
        let Some(resource) = app.registry.remove(handle.into()) else {
            return false;
        };
        release_resource(self.platform.as_mut(), self.gpu.as_mut(), resource);
        true
    }

    /// Ask for the window to be closed on the next tick
    pub fn window_close(&mut self, handle: WindowHandle) {
        if let Some(surface) = self.window(handle).map(Window::surface) {
            self.platform.set_should_close(surface, true);
        }
    }

    /// Withdraw a pending close request before the next reconciliation
    ///
    /// Clears both the backend flag and the SHOULD_CLOSE status bit set by a
    /// close event. Returns false when the window is absent.
    pub fn window_cancel_close(&mut self, handle: WindowHandle) -> bool {
        let Some(app) = self.application.as_mut() else {
            return false;
        };
        let Some(resource) = app.registry.get_mut(handle) else {
            return false;
        };
        let Some(surface) = resource.as_window().map(Window::surface) else {
            return false;
        };
        resource.status_mut().cancel_close();
        self.platform.set_should_close(surface, false);
        true
    }

    /// Whether the backend reports the window should close
    pub fn window_should_close(&self, handle: WindowHandle) -> bool {
        self.window(handle)
            .is_some_and(|window| self.platform.should_close(window.surface))
    }

    /// Install the draw callback of a window
    pub fn set_draw_callback<F>(&mut self, handle: WindowHandle, callback: F) -> bool
    where
        F: FnMut(&mut RenderContext<'_>) + 'static,
    {
        match self.window_mut(handle) {
            Some(window) => {
                window.set_draw_callback(callback);
                true
            }
            None => false,
        }
    }

    /// Resource behind `handle`
    pub fn resource(&self, handle: impl Into<ResourceHandle>) -> Option<&Resource> {
        self.application.as_ref()?.registry.get(handle)
    }

    /// Window behind `handle`
    pub fn window(&self, handle: WindowHandle) -> Option<&Window> {
        self.application.as_ref()?.registry.window(handle)
    }

    /// Mutable window behind `handle`
    pub fn window_mut(&mut self, handle: WindowHandle) -> Option<&mut Window> {
        self.application.as_mut()?.registry.window_mut(handle)
    }

    /// Render object behind `handle`
    pub fn render_object(&self, handle: ObjectHandle) -> Option<&RenderObject> {
        self.application.as_ref()?.registry.render_object(handle)
    }

    /// Command surface outside of a draw callback
    ///
    /// Used for setup such as vertex attribute layout. GPU calls target the
    /// context that is current, normally the last created window.
    pub fn render_context(&mut self) -> Option<RenderContext<'_>> {
        let app = self.application.as_mut()?;
        Some(RenderContext::new(&mut app.registry, self.gpu.as_mut(), None))
    }

    /// Compile a single shader stage
    pub fn compile_shader(&mut self, source: &str, stage: ShaderStage) -> ShaderCompilation {
        gpu::compile_shader(self.gpu.as_mut(), source, stage)
    }

    /// Compile and link a vertex/fragment program
    pub fn compile_program(&mut self, vertex_source: &str, fragment_source: &str) -> GxResult<u32> {
        Ok(gpu::compile_program(self.gpu.as_mut(), vertex_source, fragment_source)?)
    }
}

impl Drop for Gx {
    fn drop(&mut self) {
        self.destroy_application();
    }
}

/// Release the backend handles of a resource already removed from its registry
pub(crate) fn release_resource(platform: &mut dyn Platform, gpu: &mut dyn GpuDevice, resource: Resource) {
    match resource.into_payload() {
        ResourcePayload::Window(window) => {
            log::debug!("Destroying window \"{}\"", window.title());
            platform.destroy_window(window.surface);
        }
        ResourcePayload::RenderObject(object) => {
            log::debug!("Destroying render object (vao={})", object.vao);
            if object.vao != 0 {
                gpu.delete_vertex_array(object.vao);
            }
            if object.vbo != 0 {
                gpu.delete_buffer(object.vbo);
            }
            if object.ebo != 0 {
                gpu.delete_buffer(object.ebo);
            }
        }
    }
}
