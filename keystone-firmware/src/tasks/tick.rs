//! Panel tick task
//!
//! Runs the panel tick every 2 ms: encoder sampling, matrix scanning, LED
//! projection and column drive.

use defmt::*;
use embassy_time::{Duration, Ticker};
use keystone_core::scheduler::{Panel, TICK_PERIOD_MS};

use crate::board::BoardPanel;
use crate::channels::{PanelQueue, REGISTERS, VFO};

#[embassy_executor::task]
pub async fn tick_task(mut panel: Panel, mut io: BoardPanel, queue: &'static PanelQueue) {
    info!("Tick task started ({} ms)", TICK_PERIOD_MS);

    let mut ticker = Ticker::every(Duration::from_millis(TICK_PERIOD_MS));
    let mut faulted = false;
    let mut self_test_reported = false;

    loop {
        ticker.next().await;

        match panel.tick(&mut io, &VFO, REGISTERS.led_word(), queue) {
            Ok(()) if faulted => {
                info!("Expander bus recovered");
                faulted = false;
            }
            Ok(()) => {}
            Err(e) if !faulted => {
                warn!("Expander bus fault: {:?}, skipping ticks", e);
                faulted = true;
            }
            Err(_) => {}
        }

        if !self_test_reported && panel.self_test_complete() {
            info!("LED self test complete");
            self_test_reported = true;
        }
    }
}
