use std::cell::RefCell;
use std::fmt::Display;
use std::mem;
use std::ptr::NonNull;

use crate::buffer::Buffer;
use crate::events::{ArenaLog, NopLog};

#[derive(Debug)]
pub enum ArenaError {
    /// The backing system refused memory for a new or initial segment.
    SegmentUnavailable { capacity: usize },
    /// No growth step can produce a segment satisfying the request.
    AlignmentUnsatisfiable { size: usize, align: usize },
}

impl Display for ArenaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArenaError::SegmentUnavailable { capacity } => write!(f, "Could not obtain a segment of {} bytes from the system", capacity),
            ArenaError::AlignmentUnsatisfiable { size, align } => write!(f, "No segment can satisfy an allocation of size {} and alignment {}", size, align),
        }
    }
}

impl std::error::Error for ArenaError {}

/// Cursor over the segment list: which segment serves requests and how far
/// into it the next request starts.
struct Cursor {
    segments: Vec<Buffer>,
    active: usize,
    offset: usize,
}

/// A growable bump arena.
///
/// Serves aligned raw allocations out of owned buffer segments by
/// advancing a cursor. When the active segment cannot fit a request, the
/// arena moves on to the next segment if one is left over from an earlier
/// [`reset`](Arena::reset), or appends a fresh one with at least double the
/// exhausted segment's capacity. Segment capacities are therefore
/// non-decreasing, and a returned pointer stays valid until the arena is
/// reset or dropped.
///
/// The arena is single-threaded: allocation mutates the cursor through a
/// `RefCell`, so the type is not `Sync`, and sharing it across threads
/// requires external synchronization the arena itself does not provide.
///
/// Memory is reclaimed only in bulk: `reset` rewinds the cursor without
/// freeing anything, and dropping the arena releases every segment exactly
/// once. Nothing ever runs destructors on values placed in the arena, which
/// is why [`make`](Arena::make) is restricted to `Copy` types.
pub struct Arena {
    cursor: RefCell<Cursor>,
    log: Box<dyn ArenaLog>,
}

impl Arena {
    /// Creates an arena with one segment of `initial_capacity` bytes.
    ///
    /// A zero capacity is rounded up to one byte so the doubling growth
    /// rule always makes progress.
    pub fn new(initial_capacity: usize) -> Result<Arena, ArenaError> {
        Arena::with_log(initial_capacity, NopLog)
    }

    /// Creates an arena that reports lifecycle events to `log`.
    pub fn with_log(initial_capacity: usize, log: impl ArenaLog + 'static) -> Result<Arena, ArenaError> {
        let capacity = initial_capacity.max(1);
        let first = Buffer::new(capacity).ok_or(ArenaError::SegmentUnavailable { capacity })?;
        log.segment_created(0, capacity);
        Ok(Arena {
            cursor: RefCell::new(Cursor {
                segments: vec![first],
                active: 0,
                offset: 0,
            }),
            log: Box::new(log),
        })
    }

    /// Returns a pointer to `size` bytes aligned to `align`.
    ///
    /// `align` must be a power of two. A zero `size` is valid and returns
    /// the aligned cursor without claiming any bytes past it.
    ///
    /// On failure the cursor and segment list are untouched, so smaller
    /// subsequent requests still succeed.
    pub fn allocate(&self, size: usize, align: usize) -> Result<NonNull<u8>, ArenaError> {
        debug_assert!(align.is_power_of_two(), "align must be a power of two");
        let mut cursor = self.cursor.borrow_mut();
        loop {
            let (base, capacity) = {
                let segment = &cursor.segments[cursor.active];
                (segment.start() as usize, segment.capacity())
            };

            if let Some(aligned) = align_up(base + cursor.offset, align) {
                if let Some(end) = aligned.checked_add(size) {
                    if end <= base + capacity {
                        cursor.offset = end - base;
                        // derived from a live segment, never null
                        return Ok(unsafe { NonNull::new_unchecked(aligned as *mut u8) });
                    }
                }
            }

            // Does not fit. Move on to a segment left over from a reset,
            // or append a fresh one and serve the request from there.
            if cursor.active + 1 < cursor.segments.len() {
                cursor.active += 1;
                cursor.offset = 0;
                continue;
            }

            let new_capacity = match capacity.checked_mul(2) {
                Some(doubled) => doubled.max(size),
                None => {
                    self.log.allocation_failed(size, align);
                    return Err(ArenaError::AlignmentUnsatisfiable { size, align });
                }
            };
            let buffer = match Buffer::new(new_capacity) {
                Some(buffer) => buffer,
                None => {
                    self.log.allocation_failed(size, align);
                    return Err(ArenaError::SegmentUnavailable { capacity: new_capacity });
                }
            };
            cursor.segments.push(buffer);
            cursor.active += 1;
            cursor.offset = 0;
            self.log.segment_created(cursor.active, new_capacity);
        }
    }

    /// Places `value` in the arena and returns a reference to it.
    ///
    /// The `Copy` bound is the compile-time form of the "trivially
    /// destructible" restriction: a `Copy` type cannot implement `Drop`,
    /// and neither `reset` nor arena teardown runs destructors, so only
    /// such types can live here without leaking what they own.
    pub fn make<T: Copy>(&self, value: T) -> Result<&mut T, ArenaError> {
        let ptr = self.allocate(mem::size_of::<T>(), mem::align_of::<T>())?.cast::<T>();
        unsafe {
            ptr.as_ptr().write(value);
            Ok(&mut *ptr.as_ptr())
        }
    }

    /// Rewinds the cursor to segment 0, offset 0 without freeing segments
    /// or running any destructors.
    ///
    /// # Safety
    ///
    /// Every pointer and reference previously obtained from this arena
    /// becomes dangling: the next allocations will overwrite that memory.
    /// The caller must guarantee none of them is used again.
    pub unsafe fn reset(&self) {
        let mut cursor = self.cursor.borrow_mut();
        cursor.active = 0;
        cursor.offset = 0;
        self.log.reset();
    }

    /// Number of owned segments.
    pub fn segment_count(&self) -> usize {
        self.cursor.borrow().segments.len()
    }

    /// Index of the segment currently serving requests.
    pub fn active_segment(&self) -> usize {
        self.cursor.borrow().active
    }

    /// Byte offset of the cursor within the active segment.
    pub fn offset_in_active(&self) -> usize {
        self.cursor.borrow().offset
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        let mut cursor = self.cursor.borrow_mut();
        for (index, segment) in cursor.segments.drain(..).enumerate() {
            self.log.segment_released(index, segment.capacity());
        }
    }
}

/// First multiple of `align` at or above `addr`, or `None` past the end of
/// the address space. `align` must be a power of two.
#[inline(always)]
fn align_up(addr: usize, align: usize) -> Option<usize> {
    let mask = align - 1;
    addr.checked_add(mask).map(|padded| padded & !mask)
}
