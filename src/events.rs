/// Diagnostic hooks for arena lifecycle events.
///
/// An implementation is injected into the arena at construction with
/// [`Arena::with_log`](crate::Arena::with_log); there is no global logger.
/// Hooks are observability only and must not change allocation behavior.
/// In particular, an implementation must not allocate from the arena it
/// observes.
pub trait ArenaLog {
    /// A segment was appended at `index` with the given byte capacity.
    fn segment_created(&self, index: usize, capacity: usize) {
        let _ = (index, capacity);
    }

    /// A segment is being released back to the system during arena teardown.
    fn segment_released(&self, index: usize, capacity: usize) {
        let _ = (index, capacity);
    }

    /// The cursor was rewound to segment 0, offset 0.
    fn reset(&self) {}

    /// A request could not be satisfied because segment creation failed.
    fn allocation_failed(&self, size: usize, align: usize) {
        let _ = (size, align);
    }
}

/// The default log: ignores every event.
pub struct NopLog;

impl ArenaLog for NopLog {}

/// Forwards arena events to the `log` facade.
#[cfg(feature = "logging")]
pub struct DebugLog;

#[cfg(feature = "logging")]
impl ArenaLog for DebugLog {
    fn segment_created(&self, index: usize, capacity: usize) {
        debug!("created segment {} of capacity {}", index, capacity);
    }

    fn segment_released(&self, index: usize, capacity: usize) {
        debug!("released segment {} of capacity {}", index, capacity);
    }

    fn reset(&self) {
        debug!("arena was reset");
    }

    fn allocation_failed(&self, size: usize, align: usize) {
        error!("allocation of size {} align {} failed, memory is likely full", size, align);
    }
}
