//! Buffer update helpers

use super::{BufferType, GpuDevice, MapAccess};

/// Overwrite `data.len()` bytes of buffer `buffer` starting at `offset`
///
/// The buffer is mapped for writing, filled, unmapped and unbound again.
/// Returns false for a zero handle, empty data, a failed mapping or a failed
/// unmap. A failed mapping leaves the buffer bound.
pub fn update_buffer_object(
    gpu: &mut dyn GpuDevice,
    ty: BufferType,
    buffer: u32,
    offset: usize,
    data: &[u8],
) -> bool {
    if buffer == 0 || data.is_empty() {
        return false;
    }

    gpu.bind_buffer(ty, buffer);
    if !gpu.write_mapped_range(ty, offset, data, MapAccess::WRITE) {
        return false;
    }
    let result = gpu.unmap_buffer(ty);
    gpu.bind_buffer(ty, 0);
    result
}
