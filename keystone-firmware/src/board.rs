//! Board wiring
//!
//! Pin assignments for the panel controller board (Pico form factor):
//!
//! | Function                 | GPIO          |
//! |--------------------------|---------------|
//! | VFO encoder A / B        | 0 / 1         |
//! | Encoder 8 B / A          | 2 / 3         |
//! | Host I2C SDA / SCL       | 4 / 5         |
//! | Encoder 9 B / A          | 6 / 7         |
//! | LEDs 4..10               | 8..14         |
//! | Expander SPI MISO        | 16            |
//! | Encoder expander CS      | 17            |
//! | Expander SPI SCK / MOSI  | 18 / 19       |
//! | Matrix expander CS       | 20            |
//! | Ready line (active low)  | 22            |

use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Spi};
use keystone_core::encoder::VfoMode;
use keystone_drivers::{ExpanderPanel, Mcp23s17Pair};
use keystone_hal::ActiveLow;
use keystone_hal_rp2040::gpio::{RpInput, RpOutput};
use keystone_hal_rp2040::spi::RpSpi;

/// The two expanders on SPI0
pub type BoardExpanders = Mcp23s17Pair<RpSpi<Spi<'static, SPI0, Blocking>>, RpOutput<'static>>;

/// Everything the tick task reads and drives
pub type BoardPanel = ExpanderPanel<BoardExpanders, RpInput<'static>, RpOutput<'static>>;

/// Ready line to the host
pub type ReadyLine = ActiveLow<RpOutput<'static>>;

/// VFO decoding on this board
///
/// Both phase lines are wired to edge-capable pins, so every edge goes
/// through the transition table. `SingleEdge` suits encoders whose B line
/// only gives direction.
pub const VFO_MODE: VfoMode = VfoMode::BothEdges;
