use core::cell::RefCell;

use super::USB_STORAGE;
use crate::indicator::PhaseIndicator;
use crate::status;
use crate::usb::{self, UsbDeviceStrings};
use embassy_futures::join::join3;
use embassy_stm32 as hal;
use embassy_stm32::Peri;
use embassy_stm32::gpio::Output;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_time::Timer;
use embassy_usb::class::hid::{HidReader, HidWriter, ReadError};
use embassy_usb::driver::EndpointError;
use macro_core::report::descriptor::POLL_INTERVAL_MS;
use macro_core::report::{INPUT_REPORT_LEN, OUTPUT_REPORT_LEN};
use macro_core::repl::status::StatusSnapshot;
use macro_core::sequencer::MacroProgram;
use macro_core::transport::ReportPump;

embassy_stm32::bind_interrupts!(struct UsbIrqs {
    USB_UCPD1_2 => embassy_stm32::usb::InterruptHandler<hal::peripherals::USB>;
});

type Pump = ReportPump<PhaseIndicator<Output<'static>>>;
/// Shared between the IN and OUT loops; both run on the same executor.
type SharedPump = Mutex<NoopRawMutex, RefCell<Pump>>;

#[embassy_executor::task]
pub async fn run(
    usb: Peri<'static, hal::peripherals::USB>,
    dp: Peri<'static, hal::peripherals::PA12>,
    dm: Peri<'static, hal::peripherals::PA11>,
    indicator: PhaseIndicator<Output<'static>>,
) -> ! {
    let storage = USB_STORAGE.init(usb::UsbDeviceStorage::new());
    let driver = embassy_stm32::usb::Driver::new(usb, UsbIrqs, dp, dm);

    let usb::PokkenPad {
        mut device,
        reader,
        writer,
    } = usb::PokkenPad::new(driver, storage, UsbDeviceStrings::default());

    let pump: SharedPump = Mutex::new(RefCell::new(ReportPump::with_observer(
        MacroProgram::STANDARD,
        indicator,
    )));

    join3(
        device.run(),
        run_report_writer(writer, &pump),
        run_report_reader(reader, &pump),
    )
    .await;
    loop {
        core::future::pending::<()>().await;
    }
}

/// Plays one sequencer tick per IN report the host accepts.
async fn run_report_writer<D>(
    mut writer: HidWriter<'static, D, INPUT_REPORT_LEN>,
    pump: &SharedPump,
) -> !
where
    D: embassy_usb::driver::Driver<'static>,
{
    loop {
        writer.ready().await;
        status::set_usb_configured(true);
        defmt::info!("usb: HID interface configured");

        loop {
            let (frame, snapshot) = pump.lock(|cell| {
                let mut pump = cell.borrow_mut();
                let frame = pump.poll_outbound_bytes();
                (frame, StatusSnapshot::of_pump(&*pump))
            });
            status::publish(&snapshot);

            match writer.write(&frame).await {
                Ok(()) => {}
                Err(EndpointError::Disabled) => {
                    defmt::warn!("usb: HID IN endpoint disabled");
                    break;
                }
                Err(_) => {
                    defmt::warn!("usb: HID IN write error");
                    Timer::after_millis(u64::from(POLL_INTERVAL_MS)).await;
                }
            }
        }

        status::set_usb_configured(false);
    }
}

/// Reads OUT reports so the endpoint never stalls; the content is dropped.
async fn run_report_reader<D>(
    mut reader: HidReader<'static, D, OUTPUT_REPORT_LEN>,
    pump: &SharedPump,
) -> !
where
    D: embassy_usb::driver::Driver<'static>,
{
    let mut frame = [0u8; OUTPUT_REPORT_LEN];

    loop {
        reader.ready().await;

        loop {
            match reader.read(&mut frame).await {
                Ok(count) => {
                    pump.lock(|cell| cell.borrow_mut().drain_inbound(&frame[..count]));
                    defmt::trace!("usb: discarded OUT report len={}", count);
                }
                Err(ReadError::Disabled) => {
                    defmt::warn!("usb: HID OUT endpoint disabled");
                    break;
                }
                Err(_) => {
                    defmt::warn!("usb: HID OUT read error");
                }
            }
        }
    }
}
