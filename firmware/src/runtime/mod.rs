use cortex_m::interrupt;
use cortex_m::register::primask;
use critical_section::{self, RawRestoreState};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_stm32 as hal;
use embassy_stm32::gpio::{Level, Output, Speed};
use static_cell::StaticCell;

use crate::indicator::PhaseIndicator;
use crate::usb;

mod heartbeat_task;
mod usb_task;

critical_section::set_impl!(InterruptCriticalSection);

struct InterruptCriticalSection;

unsafe impl critical_section::Impl for InterruptCriticalSection {
    unsafe fn acquire() -> RawRestoreState {
        let primask = primask::read();
        interrupt::disable();
        primask.is_active()
    }

    unsafe fn release(restore_state: RawRestoreState) {
        if restore_state {
            unsafe {
                interrupt::enable();
            }
        }
    }
}

pub(super) static USB_STORAGE: StaticCell<usb::UsbDeviceStorage> = StaticCell::new();

#[embassy_executor::main]
pub async fn main(spawner: Spawner) {
    let config = hal::Config::default();
    let hal::Peripherals {
        PB3,
        PB4,
        USB,
        PA11,
        PA12,
        ..
    } = hal::init(config);

    let indicator = PhaseIndicator::new(
        Output::new(PB3, Level::Low, Speed::Low),
        Output::new(PB4, Level::Low, Speed::Low),
    );

    defmt::info!("macro: starting from the sync phase");

    spawner
        .spawn(usb_task::run(USB, PA12, PA11, indicator))
        .expect("failed to spawn USB task");

    spawner
        .spawn(heartbeat_task::run())
        .expect("failed to spawn heartbeat task");

    core::future::pending::<()>().await;
}
