//! Interfaces between the panel logic and its surroundings
//!
//! The core never touches hardware directly: raw inputs and outputs go
//! through [`PanelIo`], finished events go to an [`EventSink`].

pub mod panel_io;
pub mod sink;

pub use panel_io::PanelIo;
pub use sink::EventSink;
