//! Event output

use core::cell::RefCell;

use keystone_protocol::PanelEvent;

/// Destination for classified panel events
///
/// Takes `&self` so a sink can be shared with the bus handler that drains
/// it. Returns false if the event was dropped.
pub trait EventSink {
    fn push(&self, event: PanelEvent) -> bool;
}

/// Plain buffer sink, mostly for tests and host-side tools
impl<const N: usize> EventSink for RefCell<heapless::Vec<PanelEvent, N>> {
    fn push(&self, event: PanelEvent) -> bool {
        self.borrow_mut().push(event).is_ok()
    }
}

impl<S: EventSink + ?Sized> EventSink for &S {
    fn push(&self, event: PanelEvent) -> bool {
        (**self).push(event)
    }
}
