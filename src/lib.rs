//! Growable bump arena with a container allocator adapter.
//!
//! The [`Arena`] serves aligned raw allocations by bumping a cursor through
//! owned memory segments, appending a larger segment whenever the active
//! one runs out, and reclaiming everything at once with an O(1)
//! [`reset`](Arena::reset). The [`ArenaAlloc`] handle exposes the arena to
//! `allocator-api2` containers, so vectors and maps of differing element
//! types can share one arena.
//!
//! ```
//! use bumpur::{Arena, ArenaAlloc};
//!
//! # fn main() -> Result<(), bumpur::ArenaError> {
//! #[derive(Clone, Copy, Debug, PartialEq)]
//! struct Point2D { x: i32, y: i32 }
//!
//! let arena = Arena::new(64)?;
//!
//! let point = arena.make(Point2D { x: 2, y: 3 })?;
//! assert_eq!(Point2D { x: 2, y: 3 }, *point);
//!
//! let mut numbers = allocator_api2::vec::Vec::new_in(ArenaAlloc::<i32>::new(&arena));
//! for i in 0..64 {
//!     numbers.push(i);
//! }
//! assert_eq!(63, numbers[63]);
//! # Ok(())
//! # }
//! ```
//!
//! The arena never runs destructors and never frees a segment before it is
//! dropped; [`Arena::make`] is therefore restricted to `Copy` types, and
//! `reset` is `unsafe` because it invalidates every pointer handed out so
//! far. None of this is thread safe.

#[macro_use]
mod logging;

mod alloc;
mod arena;
mod buffer;
mod events;

pub use alloc::ArenaAlloc;
pub use arena::{Arena, ArenaError};
#[cfg(feature = "logging")]
pub use events::DebugLog;
pub use events::{ArenaLog, NopLog};

#[cfg(test)]
pub mod eventlog;
