//! Embassy async tasks
//!
//! The tick task runs on the thread executor; the host bus and VFO edge
//! tasks run on a higher-priority interrupt executor so a slow tick never
//! holds off the bus master or misses a VFO edge.

pub mod host_bus;
pub mod tick;
pub mod vfo;

pub use host_bus::host_bus_task;
pub use tick::tick_task;
pub use vfo::vfo_task;
