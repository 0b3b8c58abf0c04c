use std::alloc::Layout;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use allocator_api2::alloc::{AllocError, Allocator};

use crate::arena::{Arena, ArenaError};

/// Allocator handle for generic containers, backed by a shared [`Arena`].
///
/// The handle is a borrow: it owns nothing, costs a pointer, and cannot
/// outlive its arena. Element-count requests are translated into byte and
/// alignment requests against the arena; `deallocate` is a no-op, because
/// the arena only reclaims in bulk. A container that frees individual
/// nodes simply stops reusing those bytes until the whole arena is reset.
///
/// The [`Allocator`] impl plugs the handle into `allocator-api2`
/// containers, so one arena can back a `Vec` of integers and a map of
/// pairs at the same time, through handles of differing element types
/// obtained with [`rebind`](ArenaAlloc::rebind).
pub struct ArenaAlloc<'a, T = u8> {
    arena: &'a Arena,
    _marker: PhantomData<*const T>,
}

impl<'a, T> ArenaAlloc<'a, T> {
    pub fn new(arena: &'a Arena) -> ArenaAlloc<'a, T> {
        ArenaAlloc {
            arena,
            _marker: PhantomData,
        }
    }

    /// Returns the arena this handle draws from.
    #[inline(always)]
    pub fn arena(&self) -> &'a Arena {
        self.arena
    }

    /// A handle for element type `U` on the same arena.
    pub fn rebind<U>(&self) -> ArenaAlloc<'a, U> {
        ArenaAlloc::new(self.arena)
    }

    /// Returns storage for `n` contiguous elements of `T`.
    pub fn allocate(&self, n: usize) -> Result<NonNull<T>, ArenaError> {
        // a saturated size can never be satisfied, the arena reports it
        let size = mem::size_of::<T>().saturating_mul(n);
        Ok(self.arena.allocate(size, mem::align_of::<T>())?.cast())
    }

    /// Does nothing: memory is reclaimed only through the arena.
    pub fn deallocate(&self, ptr: NonNull<T>, n: usize) {
        let _ = (ptr, n);
    }
}

impl<'a, T> std::fmt::Debug for ArenaAlloc<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArenaAlloc")
            .field("arena", &(self.arena as *const Arena))
            .finish()
    }
}

impl<'a, T> Clone for ArenaAlloc<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for ArenaAlloc<'a, T> {}

/// Handles are equal when they draw from the same arena instance,
/// regardless of element type.
impl<'a, 'b, T, U> PartialEq<ArenaAlloc<'b, U>> for ArenaAlloc<'a, T> {
    fn eq(&self, other: &ArenaAlloc<'b, U>) -> bool {
        std::ptr::eq(self.arena, other.arena)
    }
}

impl<'a, T> Eq for ArenaAlloc<'a, T> {}

unsafe impl<'a, T> Allocator for ArenaAlloc<'a, T> {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        let ptr = self
            .arena
            .allocate(layout.size(), layout.align())
            .map_err(|_| AllocError)?;
        let slice = std::ptr::slice_from_raw_parts_mut(ptr.as_ptr(), layout.size());
        // built from a NonNull
        Ok(unsafe { NonNull::new_unchecked(slice) })
    }

    unsafe fn deallocate(&self, _ptr: NonNull<u8>, _layout: Layout) {}
}
