//! GPU backend abstraction
//!
//! [`GpuDevice`] is the thin command surface the resource layer sequences.
//! Handles are raw `u32` names as issued by the driver; `0` always means
//! "no object".

use std::ffi::c_void;

mod buffer;
mod gl_device;
mod shader;
mod types;

pub use buffer::update_buffer_object;
pub use gl_device::GlDevice;
pub use shader::{compile_program, compile_shader, ProgramError, ShaderCompilation};
pub use types::{
    AttributeType, BufferData, BufferType, BufferUsage, ClearMask, MapAccess, ShaderStage,
    VertexAttribute,
};

/// Result of linking a program object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOutput {
    /// Program name (non-zero even when linking failed)
    pub program: u32,
    /// Whether linking succeeded
    pub success: bool,
    /// Linker diagnostics
    pub log: String,
}

/// GPU command backend contract
///
/// All calls require the context of some window to be current.
pub trait GpuDevice {
    /// Resolve API entry points; returns false if the core entry points are missing
    fn load_functions(&mut self, loader: &mut dyn FnMut(&'static str) -> *const c_void) -> bool;

    /// Create a vertex array object (left unbound)
    fn gen_vertex_array(&mut self) -> u32;

    /// Bind a vertex array object (0 unbinds)
    fn bind_vertex_array(&mut self, vao: u32);

    /// Delete a vertex array object
    fn delete_vertex_array(&mut self, vao: u32);

    /// Create a buffer filled with `data` (left unbound)
    fn gen_buffer(&mut self, ty: BufferType, data: BufferData<'_>) -> u32;

    /// Bind a buffer to `ty` (0 unbinds)
    fn bind_buffer(&mut self, ty: BufferType, buffer: u32);

    /// Delete a buffer
    fn delete_buffer(&mut self, buffer: u32);

    /// Map a range of the buffer bound to `ty` and copy `data` into it
    ///
    /// Returns false when the mapping could not be established.
    fn write_mapped_range(&mut self, ty: BufferType, offset: usize, data: &[u8], access: MapAccess) -> bool;

    /// Unmap the buffer bound to `ty`; false means the contents were lost
    fn unmap_buffer(&mut self, ty: BufferType) -> bool;

    /// Replace a range of the buffer bound to `ty`
    fn buffer_sub_data(&mut self, ty: BufferType, offset: usize, data: &[u8]);

    /// Bind a buffer to an indexed binding point
    fn bind_buffer_base(&mut self, ty: BufferType, binding_point: u32, buffer: u32);

    /// Compile a single shader stage
    fn compile_shader(&mut self, source: &str, stage: ShaderStage) -> ShaderCompilation;

    /// Create a program, attach `shaders` and link it
    fn link_program(&mut self, shaders: &[u32]) -> LinkOutput;

    /// Delete a shader object
    fn delete_shader(&mut self, shader: u32);

    /// Make `program` the active program
    fn use_program(&mut self, program: u32);

    /// Describe an attribute of the bound vertex buffer
    fn vertex_attrib_pointer(&mut self, attribute: &VertexAttribute);

    /// Enable an attribute on a vertex array
    fn enable_vertex_array_attrib(&mut self, vao: u32, index: u32);

    /// Disable an attribute on a vertex array
    fn disable_vertex_array_attrib(&mut self, vao: u32, index: u32);

    /// Draw triangles from the bound vertex array
    fn draw_arrays(&mut self, first: usize, count: usize);

    /// Draw indexed triangles from the bound element buffer
    fn draw_elements(&mut self, count: usize, index_type: AttributeType);

    /// Set the viewport rectangle
    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32);

    /// Set the clear color
    fn clear_color(&mut self, r: f32, g: f32, b: f32, a: f32);

    /// Clear the selected buffers
    fn clear(&mut self, mask: ClearMask);
}
