//! OpenGL implementation of [`GpuDevice`]
//!
//! Every method is a direct pass-through to the driver. The `gl` crate keeps
//! its function pointers in process-wide storage, so one `GlDevice` serves
//! every window context created by the platform.

use std::ffi::{c_void, CString};
use std::ptr;

use gl::types::{GLboolean, GLchar, GLenum, GLint, GLintptr, GLsizei, GLsizeiptr, GLuint};

use super::{
    AttributeType, BufferData, BufferType, ClearMask, GpuDevice, LinkOutput, MapAccess,
    ShaderCompilation, ShaderStage, VertexAttribute,
};

const SHADER_LOG_CAPACITY: usize = 512;
const PROGRAM_LOG_CAPACITY: usize = 1024;

/// OpenGL command backend
#[derive(Debug, Default)]
pub struct GlDevice {
    loaded: bool,
}

impl GlDevice {
    /// Create a device; entry points are resolved on the first window
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether entry points have been resolved
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn log_to_string(mut buffer: Vec<u8>, written: GLsizei) -> String {
        buffer.truncate(usize::try_from(written).unwrap_or(0));
        String::from_utf8_lossy(&buffer).into_owned()
    }

    fn to_sizei(value: usize) -> GLsizei {
        GLsizei::try_from(value).unwrap_or(GLsizei::MAX)
    }

    fn to_sizeiptr(value: usize) -> GLsizeiptr {
        GLsizeiptr::try_from(value).unwrap_or(GLsizeiptr::MAX)
    }

    fn to_intptr(value: usize) -> GLintptr {
        GLintptr::try_from(value).unwrap_or(GLintptr::MAX)
    }
}

impl GpuDevice for GlDevice {
    fn load_functions(&mut self, loader: &mut dyn FnMut(&'static str) -> *const c_void) -> bool {
        if !self.loaded {
            gl::load_with(|name| loader(name));
            self.loaded = gl::GenVertexArrays::is_loaded()
                && gl::GenBuffers::is_loaded()
                && gl::CreateShader::is_loaded();
            if self.loaded {
                log::info!("OpenGL entry points loaded");
            }
        }
        self.loaded
    }

    fn gen_vertex_array(&mut self) -> u32 {
        let mut vao: GLuint = 0;
        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::BindVertexArray(0);
        }
        vao
    }

    fn bind_vertex_array(&mut self, vao: u32) {
        unsafe { gl::BindVertexArray(vao) }
    }

    fn delete_vertex_array(&mut self, vao: u32) {
        unsafe { gl::DeleteVertexArrays(1, &vao) }
    }

    fn gen_buffer(&mut self, ty: BufferType, data: BufferData<'_>) -> u32 {
        let mut buffer: GLuint = 0;
        let target = ty as GLenum;
        unsafe {
            gl::GenBuffers(1, &mut buffer);
            gl::BindBuffer(target, buffer);
            gl::BufferData(
                target,
                Self::to_sizeiptr(data.bytes.len()),
                data.bytes.as_ptr().cast::<c_void>(),
                data.usage as GLenum,
            );
            gl::BindBuffer(target, 0);
        }
        buffer
    }

    fn bind_buffer(&mut self, ty: BufferType, buffer: u32) {
        unsafe { gl::BindBuffer(ty as GLenum, buffer) }
    }

    fn delete_buffer(&mut self, buffer: u32) {
        unsafe { gl::DeleteBuffers(1, &buffer) }
    }

    fn write_mapped_range(&mut self, ty: BufferType, offset: usize, data: &[u8], access: MapAccess) -> bool {
        unsafe {
            let dest = gl::MapBufferRange(
                ty as GLenum,
                Self::to_intptr(offset),
                Self::to_sizeiptr(data.len()),
                access.bits(),
            );
            if dest.is_null() {
                return false;
            }
            ptr::copy_nonoverlapping(data.as_ptr(), dest.cast::<u8>(), data.len());
        }
        true
    }

    fn unmap_buffer(&mut self, ty: BufferType) -> bool {
        unsafe { gl::UnmapBuffer(ty as GLenum) == gl::TRUE }
    }

    fn buffer_sub_data(&mut self, ty: BufferType, offset: usize, data: &[u8]) {
        unsafe {
            gl::BufferSubData(
                ty as GLenum,
                Self::to_intptr(offset),
                Self::to_sizeiptr(data.len()),
                data.as_ptr().cast::<c_void>(),
            );
        }
    }

    fn bind_buffer_base(&mut self, ty: BufferType, binding_point: u32, buffer: u32) {
        unsafe { gl::BindBufferBase(ty as GLenum, binding_point, buffer) }
    }

    fn compile_shader(&mut self, source: &str, stage: ShaderStage) -> ShaderCompilation {
        let Ok(source) = CString::new(source) else {
            return ShaderCompilation {
                handle: 0,
                success: false,
                info_log: "shader source contains an interior nul byte".to_string(),
            };
        };

        unsafe {
            let handle = gl::CreateShader(stage as GLenum);
            gl::ShaderSource(handle, 1, &source.as_ptr(), ptr::null());
            gl::CompileShader(handle);

            let mut status: GLint = 0;
            gl::GetShaderiv(handle, gl::COMPILE_STATUS, &mut status);
            let success = status == GLint::from(gl::TRUE);

            let info_log = if success {
                String::new()
            } else {
                let mut buffer = vec![0u8; SHADER_LOG_CAPACITY];
                let mut written: GLsizei = 0;
                gl::GetShaderInfoLog(
                    handle,
                    Self::to_sizei(buffer.len()),
                    &mut written,
                    buffer.as_mut_ptr().cast::<GLchar>(),
                );
                Self::log_to_string(buffer, written)
            };

            ShaderCompilation { handle, success, info_log }
        }
    }

    fn link_program(&mut self, shaders: &[u32]) -> LinkOutput {
        unsafe {
            let program = gl::CreateProgram();
            for &shader in shaders {
                gl::AttachShader(program, shader);
            }
            gl::LinkProgram(program);

            let mut status: GLint = 0;
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);
            let success = status == GLint::from(gl::TRUE);

            let log = if success {
                String::new()
            } else {
                let mut buffer = vec![0u8; PROGRAM_LOG_CAPACITY];
                let mut written: GLsizei = 0;
                gl::GetProgramInfoLog(
                    program,
                    Self::to_sizei(buffer.len()),
                    &mut written,
                    buffer.as_mut_ptr().cast::<GLchar>(),
                );
                Self::log_to_string(buffer, written)
            };

            LinkOutput { program, success, log }
        }
    }

    fn delete_shader(&mut self, shader: u32) {
        unsafe { gl::DeleteShader(shader) }
    }

    fn use_program(&mut self, program: u32) {
        unsafe { gl::UseProgram(program) }
    }

    fn vertex_attrib_pointer(&mut self, attribute: &VertexAttribute) {
        unsafe {
            gl::VertexAttribPointer(
                attribute.index,
                attribute.size,
                attribute.ty as GLenum,
                GLboolean::from(attribute.normalize),
                Self::to_sizei(attribute.stride),
                // Byte offset into the bound buffer, passed as a pointer per the GL API.
                attribute.offset as *const c_void,
            );
        }
    }

    fn enable_vertex_array_attrib(&mut self, vao: u32, index: u32) {
        unsafe { gl::EnableVertexArrayAttrib(vao, index) }
    }

    fn disable_vertex_array_attrib(&mut self, vao: u32, index: u32) {
        unsafe { gl::DisableVertexArrayAttrib(vao, index) }
    }

    fn draw_arrays(&mut self, first: usize, count: usize) {
        unsafe {
            gl::DrawArrays(
                gl::TRIANGLES,
                GLint::try_from(first).unwrap_or(GLint::MAX),
                Self::to_sizei(count),
            );
        }
    }

    fn draw_elements(&mut self, count: usize, index_type: AttributeType) {
        unsafe {
            gl::DrawElements(gl::TRIANGLES, Self::to_sizei(count), index_type as GLenum, ptr::null());
        }
    }

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { gl::Viewport(x, y, width, height) }
    }

    fn clear_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        unsafe { gl::ClearColor(r, g, b, a) }
    }

    fn clear(&mut self, mask: ClearMask) {
        unsafe { gl::Clear(mask.bits()) }
    }
}
