//! Render context
//!
//! [`RenderContext`] pairs the registry with the GPU device so that draw
//! callbacks (and setup code, via `Gx::render_context`) can issue commands
//! against render objects by handle.

use crate::error::{GxError, GxResult};
use crate::foundation::collections::ResourceKey;
use crate::gpu::{update_buffer_object, AttributeType, BufferType, ClearMask, GpuDevice, VertexAttribute};
use crate::resource::{ObjectHandle, Registry, RenderObject, Window, WindowHandle};

/// Command surface handed to draw callbacks
pub struct RenderContext<'a> {
    registry: &'a mut Registry,
    gpu: &'a mut dyn GpuDevice,
    window: Option<ResourceKey>,
}

impl<'a> RenderContext<'a> {
    pub(crate) fn new(
        registry: &'a mut Registry,
        gpu: &'a mut dyn GpuDevice,
        window: Option<ResourceKey>,
    ) -> Self {
        Self { registry, gpu, window }
    }

    /// Window being drawn, `None` outside a draw callback
    pub fn window(&self) -> Option<&Window> {
        self.registry.get_by_key(self.window?)?.as_window()
    }

    /// Handle of the window being drawn
    pub fn window_handle(&self) -> Option<WindowHandle> {
        self.window.map(|key| self.registry.handle(key))
    }

    /// Registry of the active application
    pub fn registry(&self) -> &Registry {
        self.registry
    }

    /// Raw GPU device
    pub fn gpu(&mut self) -> &mut dyn GpuDevice {
        self.gpu
    }

    /// Render object behind `handle`
    pub fn render_object(&self, handle: ObjectHandle) -> Option<&RenderObject> {
        self.registry.render_object(handle)
    }

    fn object_handles(&self, handle: ObjectHandle) -> Option<(u32, u32, u32, u32)> {
        let object = self.registry.render_object(handle)?;
        Some((object.shader_program, object.vao, object.vbo, object.ebo))
    }

    /// Bind the object's vertex array and buffers
    ///
    /// Marks the object INITIATED. Returns false for an absent object or one
    /// without a vertex array.
    pub fn bind_object(&mut self, handle: ObjectHandle) -> bool {
        let Some((_, vao, vbo, ebo)) = self.object_handles(handle) else {
            return false;
        };
        if vao == 0 {
            return false;
        }

        self.gpu.bind_vertex_array(vao);
        if vbo != 0 {
            self.gpu.bind_buffer(BufferType::Array, vbo);
        }
        if ebo != 0 {
            self.gpu.bind_buffer(BufferType::ElementArray, ebo);
        }
        if let Some(resource) = self.registry.get_mut(handle) {
            resource.status_mut().mark_initiated();
        }
        true
    }

    /// Activate the object's shader program
    pub fn use_shader(&mut self, handle: ObjectHandle) -> bool {
        let Some((program, ..)) = self.object_handles(handle) else {
            return false;
        };
        self.gpu.use_program(program);
        true
    }

    /// Draw `count` vertices starting at `offset` as triangles
    pub fn draw_vertices(&mut self, handle: ObjectHandle, offset: usize, count: usize) -> bool {
        let Some((_, vao, ..)) = self.object_handles(handle) else {
            return false;
        };
        self.gpu.bind_vertex_array(vao);
        self.gpu.draw_arrays(offset, count);
        true
    }

    /// Draw `count` indices from the object's element buffer as triangles
    pub fn draw_elements(&mut self, handle: ObjectHandle, count: usize, index_type: AttributeType) -> GxResult<()> {
        let (_, vao, _, ebo) = self.object_handles(handle).ok_or(GxError::InvalidHandle)?;
        if ebo == 0 {
            return Err(GxError::NoElementBuffer);
        }
        self.gpu.bind_vertex_array(vao);
        self.gpu.draw_elements(count, index_type);
        Ok(())
    }

    /// Overwrite part of the object's vertex buffer
    pub fn update_vertices(&mut self, handle: ObjectHandle, offset: usize, data: &[u8]) -> bool {
        let Some((_, _, vbo, _)) = self.object_handles(handle) else {
            return false;
        };
        update_buffer_object(self.gpu, BufferType::Array, vbo, offset, data)
    }

    /// Overwrite part of the object's element buffer
    pub fn update_elements(&mut self, handle: ObjectHandle, offset: usize, data: &[u8]) -> bool {
        let Some((.., ebo)) = self.object_handles(handle) else {
            return false;
        };
        update_buffer_object(self.gpu, BufferType::ElementArray, ebo, offset, data)
    }

    /// Overwrite part of a uniform buffer
    pub fn update_uniform_block(&mut self, ubo: u32, offset: usize, data: &[u8]) -> bool {
        update_buffer_object(self.gpu, BufferType::Uniform, ubo, offset, data)
    }

    /// Describe a vertex attribute of the object's vertex buffer
    pub fn set_vertex_attribute(&mut self, handle: ObjectHandle, attribute: &VertexAttribute) -> bool {
        let Some((_, _, vbo, _)) = self.object_handles(handle) else {
            return false;
        };
        self.gpu.bind_buffer(BufferType::Array, vbo);
        self.gpu.vertex_attrib_pointer(attribute);
        true
    }

    /// Enable attribute `index` on the object's vertex array
    pub fn enable_vertex_attribute(&mut self, handle: ObjectHandle, index: u32) -> bool {
        let Some((_, vao, ..)) = self.object_handles(handle) else {
            return false;
        };
        self.gpu.enable_vertex_array_attrib(vao, index);
        true
    }

    /// Disable attribute `index` on the object's vertex array
    pub fn disable_vertex_attribute(&mut self, handle: ObjectHandle, index: u32) -> bool {
        let Some((_, vao, ..)) = self.object_handles(handle) else {
            return false;
        };
        self.gpu.disable_vertex_array_attrib(vao, index);
        true
    }

    /// Bind a buffer to an indexed binding point
    pub fn bind_buffer_base(&mut self, ty: BufferType, binding_point: u32, buffer: u32) {
        self.gpu.bind_buffer_base(ty, binding_point, buffer);
    }

    /// Bind a uniform buffer to a uniform block binding point
    pub fn bind_uniform_block(&mut self, binding_point: u32, ubo: u32) {
        self.gpu.bind_buffer_base(BufferType::Uniform, binding_point, ubo);
    }

    /// Cover the whole framebuffer of the window being drawn
    pub fn update_viewport(&mut self) -> bool {
        let Some((width, height)) = self.window().map(|w| (w.width, w.height)) else {
            return false;
        };
        self.gpu.viewport(0, 0, width, height);
        true
    }

    /// Clear the color buffer to the given color
    pub fn set_background(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.gpu.clear_color(r, g, b, a);
        self.gpu.clear(ClearMask::COLOR);
    }

    /// Set the viewport rectangle
    pub fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.gpu.viewport(x, y, width, height);
    }

    /// Set the clear color
    pub fn clear_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.gpu.clear_color(r, g, b, a);
    }

    /// Clear the selected buffers
    pub fn clear(&mut self, mask: ClearMask) {
        self.gpu.clear(mask);
    }
}
