//! GPU enumerations
//!
//! Discriminants are the OpenGL enum values so backends can pass them through.

use bitflags::bitflags;

/// Buffer binding target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum BufferType {
    /// Vertex attribute data
    Array = 0x8892,
    /// Vertex indices
    ElementArray = 0x8893,
    /// Uniform block storage
    Uniform = 0x8A11,
}

/// Buffer usage hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum BufferUsage {
    /// Written once, drawn many times
    #[default]
    Static = 0x88E4,
    /// Rewritten often, drawn many times
    Dynamic = 0x88E8,
    /// Written once, drawn a few times
    Stream = 0x88E0,
}

/// Shader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ShaderStage {
    /// Fragment shader
    Fragment = 0x8B30,
    /// Vertex shader
    Vertex = 0x8B31,
}

/// Component type of a vertex attribute or index buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum AttributeType {
    /// i8
    Byte = 0x1400,
    /// u8
    UnsignedByte = 0x1401,
    /// i16
    Short = 0x1402,
    /// u16
    UnsignedShort = 0x1403,
    /// i32
    Int = 0x1404,
    /// u32
    UnsignedInt = 0x1405,
    /// f32
    Float = 0x1406,
}

impl AttributeType {
    /// Size of one component in bytes
    pub fn size(self) -> usize {
        match self {
            Self::Byte | Self::UnsignedByte => 1,
            Self::Short | Self::UnsignedShort => 2,
            Self::Int | Self::UnsignedInt | Self::Float => 4,
        }
    }
}

bitflags! {
    /// Access flags for buffer range mapping
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MapAccess: u32 {
        /// Mapping may be read
        const READ = 0x0001;
        /// Mapping may be written
        const WRITE = 0x0002;
        /// Previous contents of the range may be discarded
        const INVALIDATE_RANGE = 0x0004;
        /// Previous contents of the whole buffer may be discarded
        const INVALIDATE_BUFFER = 0x0008;
        /// Skip synchronization with pending GPU work
        const UNSYNCHRONIZED = 0x0020;

        /// Plain overwrite of a range
        const SIMPLE_WRITE = Self::WRITE.bits() | Self::INVALIDATE_BUFFER.bits();
        /// Overwrite that does not wait on the GPU; caller must avoid races
        const UNSAFE_HIGH_PERFORMANCE_WRITE = Self::WRITE.bits() | Self::UNSYNCHRONIZED.bits();
    }
}

bitflags! {
    /// Buffers affected by a clear
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearMask: u32 {
        /// Depth buffer
        const DEPTH = 0x0000_0100;
        /// Stencil buffer
        const STENCIL = 0x0000_0400;
        /// Color buffer
        const COLOR = 0x0000_4000;
    }
}

/// Layout of one vertex attribute inside the vertex buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader attribute location
    pub index: u32,
    /// Number of components (1-4)
    pub size: i32,
    /// Component type
    pub ty: AttributeType,
    /// Normalize integer components to [0, 1] / [-1, 1]
    pub normalize: bool,
    /// Byte distance between consecutive vertices
    pub stride: usize,
    /// Byte offset of the first component
    pub offset: usize,
}

impl VertexAttribute {
    /// Tightly described float attribute
    pub fn float(index: u32, size: i32, stride: usize, offset: usize) -> Self {
        Self {
            index,
            size,
            ty: AttributeType::Float,
            normalize: false,
            stride,
            offset,
        }
    }
}

/// Buffer contents handed to a creation call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferData<'a> {
    /// Usage hint for the driver
    pub usage: BufferUsage,
    /// Raw bytes uploaded at creation
    pub bytes: &'a [u8],
}

impl<'a> BufferData<'a> {
    /// Wrap raw bytes
    pub fn new(usage: BufferUsage, bytes: &'a [u8]) -> Self {
        Self { usage, bytes }
    }

    /// Wrap a slice of plain-old-data values
    pub fn from_slice<T: bytemuck::Pod>(usage: BufferUsage, data: &'a [T]) -> Self {
        Self {
            usage,
            bytes: bytemuck::cast_slice(data),
        }
    }
}
