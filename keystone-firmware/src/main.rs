//! Keystone - Front Panel Controller Firmware
//!
//! Main firmware binary for the RP2040 panel controller board. Scans the
//! button matrix, decodes the rotary encoders, drives the panel LEDs and
//! serves the resulting events to the radio host over I2C.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c_slave::{self, I2cSlave};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::peripherals::I2C0;
use embassy_rp::spi::Spi;
use embassy_rp::{bind_interrupts, i2c};
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use keystone_core::encoder::EncoderSamples;
use keystone_core::traits::PanelIo;
use keystone_core::{EventQueue, Panel};
use keystone_drivers::{ExpanderPanel, Mcp23s17Pair};
use keystone_hal::spi::SpiConfig;
use keystone_hal::ActiveLow;
use keystone_hal_rp2040::flash::FlashStorage;
use keystone_hal_rp2040::gpio::{RpInput, RpOutput};
use keystone_hal_rp2040::spi::{rp_config, RpSpi};
use keystone_protocol::registers::{PANEL_I2C_ADDRESS, PRODUCT_ID, SW_VERSION};

use crate::board::BoardPanel;
use crate::channels::{PanelQueue, QUEUE, VFO};

mod board;
mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

/// Executor for the host bus and VFO edge tasks
static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

/// Attempts at configuring the expanders before carrying on without them
const EXPANDER_INIT_ATTEMPTS: u8 = 3;

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!(
        "Keystone panel firmware starting (product {}, version {})",
        PRODUCT_ID, SW_VERSION
    );

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Divisor settings from flash (or factory defaults)
    let mut storage = FlashStorage::new(p.FLASH, p.DMA_CH0);
    let settings = config::load_settings(&mut storage).await;

    // Expanders on SPI0, one chip select each
    let spi = Spi::new_blocking(
        p.SPI0,
        p.PIN_18,
        p.PIN_19,
        p.PIN_16,
        rp_config(SpiConfig::EXPANDER),
    );
    let mut expanders = Mcp23s17Pair::new(
        RpSpi::new(spi),
        [
            RpOutput::new(Output::new(p.PIN_17, Level::High)),
            RpOutput::new(Output::new(p.PIN_20, Level::High)),
        ],
    );
    init_expanders(&mut expanders).await;

    let encoder_lines = [
        RpInput::new(Input::new(p.PIN_2, Pull::Up)),
        RpInput::new(Input::new(p.PIN_3, Pull::Up)),
        RpInput::new(Input::new(p.PIN_6, Pull::Up)),
        RpInput::new(Input::new(p.PIN_7, Pull::Up)),
    ];
    let leds = [
        RpOutput::new(Output::new(p.PIN_8, Level::Low)),
        RpOutput::new(Output::new(p.PIN_9, Level::Low)),
        RpOutput::new(Output::new(p.PIN_10, Level::Low)),
        RpOutput::new(Output::new(p.PIN_11, Level::Low)),
        RpOutput::new(Output::new(p.PIN_12, Level::Low)),
        RpOutput::new(Output::new(p.PIN_13, Level::Low)),
        RpOutput::new(Output::new(p.PIN_14, Level::Low)),
    ];
    let mut io: BoardPanel = ExpanderPanel::new(expanders, encoder_lines, leds);

    // Prime the decoders with the current line levels so boot is not a step
    let initial = match io.read_encoders() {
        Ok(samples) => samples,
        Err(e) => {
            warn!("Initial encoder read failed: {:?}", e);
            EncoderSamples::default()
        }
    };
    let mut panel = Panel::new(settings, initial);
    panel.apply_settings(settings, &VFO);

    // Ready line idles high; the queue owns it from here on
    let ready = ActiveLow::new(RpOutput::new(Output::new(p.PIN_22, Level::High)));
    let queue: &'static PanelQueue = QUEUE.init(EventQueue::new(ready));
    info!("Event queue ready ({} events)", queue.capacity());

    let mut bus_config = i2c_slave::Config::default();
    bus_config.addr = PANEL_I2C_ADDRESS as u16;
    let bus = I2cSlave::new(p.I2C0, p.PIN_5, p.PIN_4, Irqs, bus_config);
    info!("Host bus listening at {=u8:#x}", PANEL_I2C_ADDRESS);

    let vfo_a = Input::new(p.PIN_0, Pull::Up);
    let vfo_b = Input::new(p.PIN_1, Pull::Up);

    // Bus and VFO edges preempt the tick
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let high = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);
    high.spawn(tasks::host_bus_task(bus, queue)).unwrap();
    high.spawn(tasks::vfo_task(vfo_a, vfo_b)).unwrap();

    spawner.spawn(tasks::tick_task(panel, io, queue)).unwrap();

    info!("All tasks spawned, panel running");
}

/// Configure both expanders, retrying briefly
///
/// A panel that never answers still boots: the tick task reports the bus
/// fault and the host can read identification registers.
async fn init_expanders(expanders: &mut board::BoardExpanders) {
    for attempt in 1..=EXPANDER_INIT_ATTEMPTS {
        match expanders.init() {
            Ok(()) => {
                info!("Port expanders configured");
                return;
            }
            Err(e) => {
                warn!("Expander init attempt {} failed: {:?}", attempt, e);
                Timer::after_millis(10).await;
            }
        }
    }
    error!("Port expanders not responding, continuing without them");
}
