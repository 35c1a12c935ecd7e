//! Event queue shared between the tick loop and the host bus handler
//!
//! A fixed ring of `N` slots holding at most `N - 1` events, so a full
//! ring and an empty one are told apart by the indices alone. The ring
//! owns the ready line: it is asserted whenever an event goes in and
//! released when the host takes the last one out.
//!
//! Both sides take a short critical section around each operation, which
//! also keeps the line level consistent with the ring contents.

use core::cell::RefCell;

use critical_section::Mutex;
use keystone_hal::SignalLine;
use keystone_protocol::{EventResponse, PanelEvent};

use crate::traits::EventSink;

/// Slots in the panel's event ring
pub const QUEUE_SLOTS: usize = 16;

struct Ring<R, const N: usize> {
    slots: [u16; N],
    write: usize,
    read: usize,
    ready: R,
}

impl<R: SignalLine, const N: usize> Ring<R, N> {
    fn len(&self) -> usize {
        (self.write + N - self.read) % N
    }
}

/// Fixed-capacity event ring with an out-of-band ready line
pub struct EventQueue<R, const N: usize = QUEUE_SLOTS> {
    ring: Mutex<RefCell<Ring<R, N>>>,
}

impl<R: SignalLine, const N: usize> EventQueue<R, N> {
    /// Create an empty queue; the ready line is released
    pub fn new(mut ready: R) -> Self {
        ready.set_asserted(false);
        Self {
            ring: Mutex::new(RefCell::new(Ring {
                slots: [0; N],
                write: 0,
                read: 0,
                ready,
            })),
        }
    }

    /// Events the queue can hold at once
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.ring.borrow_ref(cs).len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add an event; returns false (and drops it) if the queue is full
    pub fn enqueue(&self, event: PanelEvent) -> bool {
        critical_section::with(|cs| {
            let mut ring = self.ring.borrow_ref_mut(cs);
            let next = (ring.write + 1) % N;
            if next == ring.read {
                return false;
            }
            let write = ring.write;
            ring.slots[write] = event.to_word();
            ring.write = next;
            ring.ready.set_asserted(true);
            true
        })
    }

    /// Take the oldest event, tagged with the depth before the pop
    ///
    /// The ready line is released when this read empties the queue (or
    /// the queue was already empty).
    pub fn dequeue(&self) -> EventResponse {
        critical_section::with(|cs| {
            let mut ring = self.ring.borrow_ref_mut(cs);
            let depth = ring.len();
            if depth <= 1 {
                ring.ready.set_asserted(false);
            }
            if depth == 0 {
                return EventResponse::EMPTY;
            }
            let word = ring.slots[ring.read];
            ring.read = (ring.read + 1) % N;
            match PanelEvent::from_word(word) {
                Some(event) => EventResponse::new(event, depth as u8),
                None => EventResponse::EMPTY,
            }
        })
    }

    /// Release the ready line without touching the queue
    pub fn release_ready_line(&self) {
        critical_section::with(|cs| self.ring.borrow_ref_mut(cs).ready.set_asserted(false));
    }

    pub fn is_ready_asserted(&self) -> bool {
        critical_section::with(|cs| self.ring.borrow_ref(cs).ready.is_asserted())
    }
}

impl<R: SignalLine, const N: usize> EventSink for EventQueue<R, N> {
    fn push(&self, event: PanelEvent) -> bool {
        self.enqueue(event)
    }
}
