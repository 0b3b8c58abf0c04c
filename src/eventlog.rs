//! This module is for testing only

use std::cell::RefCell;
use std::rc::Rc;

use crate::events::ArenaLog;

#[derive(Clone, Debug, PartialEq)]
pub enum ArenaEvent {
    SegmentCreated { index: usize, capacity: usize },
    SegmentReleased { index: usize, capacity: usize },
    Reset,
    AllocationFailed { size: usize, align: usize },
}

/// Records every arena event; clones share the recording, so a test can
/// keep one clone and inspect it after the arena is gone.
#[derive(Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<ArenaEvent>>>,
}

impl EventLog {
    pub fn new() -> EventLog {
        EventLog::default()
    }

    pub fn events(&self) -> Vec<ArenaEvent> {
        self.events.borrow().clone()
    }

    pub fn created_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ArenaEvent::SegmentCreated { .. }))
            .count()
    }

    pub fn released_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ArenaEvent::SegmentReleased { .. }))
            .count()
    }

    pub fn created_capacity(&self, segment: usize) -> Option<usize> {
        self.events().iter().find_map(|e| match e {
            ArenaEvent::SegmentCreated { index, capacity } if *index == segment => Some(*capacity),
            _ => None,
        })
    }

    pub fn released_capacity(&self, segment: usize) -> Option<usize> {
        self.events().iter().find_map(|e| match e {
            ArenaEvent::SegmentReleased { index, capacity } if *index == segment => Some(*capacity),
            _ => None,
        })
    }
}

impl ArenaLog for EventLog {
    fn segment_created(&self, index: usize, capacity: usize) {
        self.events.borrow_mut().push(ArenaEvent::SegmentCreated { index, capacity });
    }

    fn segment_released(&self, index: usize, capacity: usize) {
        self.events.borrow_mut().push(ArenaEvent::SegmentReleased { index, capacity });
    }

    fn reset(&self) {
        self.events.borrow_mut().push(ArenaEvent::Reset);
    }

    fn allocation_failed(&self, size: usize, align: usize) {
        self.events.borrow_mut().push(ArenaEvent::AllocationFailed { size, align });
    }
}

#[test]
fn eventlog_clones_share_the_recording() {
    let log = EventLog::new();
    let clone = log.clone();
    log.reset();
    assert_eq!(vec![ArenaEvent::Reset], clone.events());
}
