//! Host bus task
//!
//! Serves the register file as an I2C target. A write selects a register
//! (and for the LED register sets its value); a read answers with the
//! selected register's 16-bit word, low byte first.

use defmt::*;
use embassy_rp::i2c_slave::{Command, I2cSlave, ReadStatus};
use embassy_rp::peripherals::I2C0;
use keystone_protocol::HostWrite;

use crate::channels::{PanelQueue, REGISTERS};

/// Longest write the host sends: register byte plus a 16-bit value
const WRITE_BUFFER_SIZE: usize = 8;

/// Byte clocked out if the host reads past the response word
const READ_FILL: u8 = 0x00;

#[embassy_executor::task]
pub async fn host_bus_task(mut bus: I2cSlave<'static, I2C0>, queue: &'static PanelQueue) {
    info!("Host bus task started");

    let mut buffer = [0u8; WRITE_BUFFER_SIZE];

    loop {
        let command = match bus.listen(&mut buffer).await {
            Ok(command) => command,
            Err(e) => {
                warn!("Host bus listen error: {:?}", e);
                continue;
            }
        };

        match command {
            Command::Write(len) => apply_write(&buffer[..len]),
            Command::WriteRead(len) => {
                apply_write(&buffer[..len]);
                respond(&mut bus, queue).await;
            }
            Command::Read => respond(&mut bus, queue).await,
            Command::GeneralCall(_) => trace!("Ignoring general call"),
        }
    }
}

fn apply_write(bytes: &[u8]) {
    // Malformed writes get no reply; the host sees nothing change
    let result = HostWrite::from_bytes(bytes).and_then(|write| REGISTERS.handle_write(write));
    if let Err(e) = result {
        debug!("Host write {=[u8]:x} rejected: {:?}", bytes, e);
    }
}

async fn respond(bus: &mut I2cSlave<'static, I2C0>, queue: &'static PanelQueue) {
    let word = REGISTERS.handle_read(queue);
    trace!("Host read {=u8:#x} -> {=u16:#06x}", REGISTERS.selected(), word);

    match bus.respond_and_fill(&word.to_le_bytes(), READ_FILL).await {
        Ok(ReadStatus::Done) => {}
        Ok(ReadStatus::LeftoverBytes(n)) => debug!("Host stopped reading with {} bytes left", n),
        Ok(ReadStatus::NeedMoreBytes) => {}
        Err(e) => warn!("Host bus read error: {:?}", e),
    }
}
