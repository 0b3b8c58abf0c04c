use std::alloc::{alloc, dealloc, Layout};
use std::ptr::NonNull;

/// Segments are allocated at this alignment so that requests up to 16 bytes
/// of alignment land at exact offsets from the segment start.
const SEGMENT_ALIGN: usize = 16;

/// One contiguous block of arena memory.
///
/// Pure storage: the allocation cursor lives in the [`Arena`](crate::Arena).
/// The block address never changes once the buffer exists; buffers are
/// appended to the arena's segment list and only released when it drops.
pub struct Buffer {
    data: NonNull<u8>,
    layout: Layout,
}

impl Buffer {
    /// Requests a block of `capacity` bytes from the system allocator.
    ///
    /// Returns `None` when the system refuses the allocation or the
    /// capacity is not representable as a layout.
    pub fn new(capacity: usize) -> Option<Buffer> {
        debug_assert!(capacity > 0, "zero-capacity buffer");
        let layout = Layout::from_size_align(capacity, SEGMENT_ALIGN).ok()?;
        let data = NonNull::new(unsafe { alloc(layout) })?;
        Some(Buffer { data, layout })
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.layout.size()
    }

    #[inline(always)]
    pub fn start(&self) -> *mut u8 {
        self.data.as_ptr()
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        unsafe { dealloc(self.data.as_ptr(), self.layout) };
    }
}
