//! VFO edge task
//!
//! The optical VFO encoder turns too fast for the 2 ms tick, so its lines
//! are watched with edge waits and fed straight into the shared VFO
//! accumulator. The tick task drains the accumulated steps.

use defmt::*;
use embassy_futures::select::select;
use embassy_rp::gpio::Input;
use keystone_core::encoder::VfoMode;

use crate::channels::VFO;

fn sample(a: &Input<'_>, b: &Input<'_>) -> u8 {
    ((a.is_high() as u8) << 1) | b.is_high() as u8
}

#[embassy_executor::task]
pub async fn vfo_task(mut a: Input<'static>, mut b: Input<'static>) {
    info!("VFO task started ({:?})", VFO.mode());

    VFO.prime(sample(&a, &b));

    match VFO.mode() {
        VfoMode::SingleEdge => loop {
            a.wait_for_any_edge().await;
            VFO.on_edge(a.is_high(), b.is_high());
        },
        VfoMode::BothEdges => loop {
            select(a.wait_for_any_edge(), b.wait_for_any_edge()).await;
            VFO.on_phase_change(sample(&a, &b));
        },
    }
}
