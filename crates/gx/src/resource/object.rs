//! Render object payload

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::foundation::collections::ResourceKey;
use crate::gpu::BufferData;

/// Opaque data attached to a render object; never inspected by the library
pub type UserData = Rc<dyn Any>;

/// GPU handles of one drawable object
///
/// A zero handle means the object was created without that buffer. The vertex
/// array, vertex buffer and element buffer are owned and deleted with the
/// resource; the shader program is shared and left alone.
pub struct RenderObject {
    pub(crate) resource: ResourceKey,
    pub(crate) shader_program: u32,
    pub(crate) vao: u32,
    pub(crate) vbo: u32,
    pub(crate) ebo: u32,
    user_data: Option<UserData>,
}

impl RenderObject {
    pub(crate) fn new(
        resource: ResourceKey,
        handles: ObjectHandles,
        user_data: Option<UserData>,
    ) -> Self {
        Self {
            resource,
            shader_program: handles.shader_program,
            vao: handles.vao,
            vbo: handles.vbo,
            ebo: handles.ebo,
            user_data,
        }
    }

    /// Key of the owning resource
    pub fn resource_key(&self) -> ResourceKey {
        self.resource
    }

    /// Shader program used by this object
    pub fn shader_program(&self) -> u32 {
        self.shader_program
    }

    /// Vertex array object
    pub fn vertex_array(&self) -> u32 {
        self.vao
    }

    /// Vertex buffer, 0 when absent
    pub fn vertex_buffer(&self) -> u32 {
        self.vbo
    }

    /// Element buffer, `None` when the object has no indices
    pub fn element_buffer(&self) -> Option<u32> {
        (self.ebo != 0).then_some(self.ebo)
    }

    /// Whether the object can be drawn by index
    pub fn has_elements(&self) -> bool {
        self.ebo != 0
    }

    /// Attached user data
    pub fn user_data(&self) -> Option<&UserData> {
        self.user_data.as_ref()
    }

    /// Attached user data downcast to `T`
    pub fn user_data_as<T: 'static>(&self) -> Option<&T> {
        self.user_data.as_deref()?.downcast_ref::<T>()
    }
}

impl fmt::Debug for RenderObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderObject")
            .field("resource", &self.resource)
            .field("shader_program", &self.shader_program)
            .field("vao", &self.vao)
            .field("vbo", &self.vbo)
            .field("ebo", &self.ebo)
            .field("user_data", &self.user_data.is_some())
            .finish()
    }
}

/// Raw GPU names adopted by a render object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ObjectHandles {
    /// Shader program
    pub shader_program: u32,
    /// Vertex array object
    pub vao: u32,
    /// Vertex buffer (0 for none)
    pub vbo: u32,
    /// Element buffer (0 for none)
    pub ebo: u32,
}

/// Everything needed to build a render object and its buffers
#[derive(Clone, Default)]
pub struct RenderObjectDescriptor<'a> {
    /// Linked shader program
    pub shader_program: u32,
    /// Vertex data; no vertex buffer is created when absent
    pub vertices: Option<BufferData<'a>>,
    /// Index data; no element buffer is created when absent
    pub elements: Option<BufferData<'a>>,
    /// Opaque data to attach
    pub user_data: Option<UserData>,
}

impl<'a> RenderObjectDescriptor<'a> {
    /// Descriptor for `shader_program` with no buffers
    pub fn new(shader_program: u32) -> Self {
        Self {
            shader_program,
            ..Self::default()
        }
    }

    /// Attach vertex data
    pub fn with_vertices(mut self, vertices: BufferData<'a>) -> Self {
        self.vertices = Some(vertices);
        self
    }

    /// Attach index data
    pub fn with_elements(mut self, elements: BufferData<'a>) -> Self {
        self.elements = Some(elements);
        self
    }

    /// Attach user data
    pub fn with_user_data(mut self, user_data: UserData) -> Self {
        self.user_data = Some(user_data);
        self
    }
}
