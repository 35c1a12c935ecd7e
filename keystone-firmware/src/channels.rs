//! State shared between the tick task and the interrupt-priority tasks
//!
//! The register file and VFO accumulator are lock-free and live in plain
//! statics. The event queue owns the ready pin, so it is built at startup
//! and handed out as a `'static` reference.

use keystone_core::encoder::VfoEncoder;
use keystone_core::{EventQueue, HostRegisters};
use static_cell::StaticCell;

use crate::board::{ReadyLine, VFO_MODE};

/// Event queue as built for this board
pub type PanelQueue = EventQueue<ReadyLine>;

/// Host register file (selected register, LED word)
pub static REGISTERS: HostRegisters = HostRegisters::new();

/// Optical VFO encoder; the edge task feeds it, the tick task drains it
pub static VFO: VfoEncoder = VfoEncoder::new(VFO_MODE);

/// Event queue, initialized in main once the ready pin exists
pub static QUEUE: StaticCell<PanelQueue> = StaticCell::new();
