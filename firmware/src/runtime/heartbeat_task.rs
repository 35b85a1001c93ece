use embassy_time::{Duration, Ticker};

use crate::status;

const HEARTBEAT_PERIOD: Duration = Duration::from_secs(10);

#[embassy_executor::task]
pub async fn run() -> ! {
    let mut ticker = Ticker::every(HEARTBEAT_PERIOD);
    loop {
        ticker.next().await;

        let status = status::snapshot();
        defmt::info!(
            "status: usb={} phase={} step={} feed-left={} ticks={} pulses={} sent={} dropped={}",
            status.usb_configured,
            status.phase.name(),
            status.step_index + 1,
            status.repeats_remaining,
            status.total_ticks,
            status.pulses,
            status.reports_sent,
            status.inbound_discarded
        );
    }
}
