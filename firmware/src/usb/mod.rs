//! USB HID device builder for the emulated Pokken pad.
//!
//! The device exposes a single HID interface with one interrupt IN endpoint
//! carrying controller reports and one interrupt OUT endpoint whose frames
//! are read and dropped. The identity matches the HORI pad so the console
//! accepts it without pairing.

#![cfg_attr(not(target_os = "none"), allow(dead_code))]

use macro_core::report::descriptor::{USB_MANUFACTURER, USB_PRODUCT};

#[cfg(target_os = "none")]
use macro_core::report::descriptor::{
    ENDPOINT_SIZE, POKKEN_REPORT_DESCRIPTOR, POLL_INTERVAL_MS, USB_PRODUCT_ID, USB_VENDOR_ID,
};
#[cfg(target_os = "none")]
use macro_core::report::{INPUT_REPORT_LEN, OUTPUT_REPORT_LEN};

#[cfg(target_os = "none")]
const CONTROL_BUFFER_LEN: usize = 64;
#[cfg(target_os = "none")]
const CONFIG_DESCRIPTOR_LEN: usize = 64;
#[cfg(target_os = "none")]
const BOS_DESCRIPTOR_LEN: usize = 64;
#[cfg(target_os = "none")]
const MSOS_DESCRIPTOR_LEN: usize = 64;
/// Current requested from the console, in milliamps.
#[cfg(target_os = "none")]
const MAX_POWER_MA: u16 = 500;

/// User-visible strings advertised in the USB descriptors.
#[derive(Clone, Copy, Debug)]
pub struct UsbDeviceStrings {
    pub manufacturer: &'static str,
    pub product: &'static str,
    pub serial_number: Option<&'static str>,
}

impl Default for UsbDeviceStrings {
    fn default() -> Self {
        Self {
            manufacturer: USB_MANUFACTURER,
            product: USB_PRODUCT,
            serial_number: None,
        }
    }
}

/// Backing storage for the Embassy USB builder and the HID class.
#[cfg(target_os = "none")]
pub struct UsbDeviceStorage {
    control_buf: [u8; CONTROL_BUFFER_LEN],
    config_descriptor: [u8; CONFIG_DESCRIPTOR_LEN],
    bos_descriptor: [u8; BOS_DESCRIPTOR_LEN],
    msos_descriptor: [u8; MSOS_DESCRIPTOR_LEN],
    hid_state: embassy_usb::class::hid::State<'static>,
}

#[cfg(target_os = "none")]
impl UsbDeviceStorage {
    pub fn new() -> Self {
        Self {
            control_buf: [0; CONTROL_BUFFER_LEN],
            config_descriptor: [0; CONFIG_DESCRIPTOR_LEN],
            bos_descriptor: [0; BOS_DESCRIPTOR_LEN],
            msos_descriptor: [0; MSOS_DESCRIPTOR_LEN],
            hid_state: embassy_usb::class::hid::State::new(),
        }
    }
}

/// The built USB device plus the split HID endpoints.
#[cfg(target_os = "none")]
pub struct PokkenPad<D>
where
    D: embassy_usb::driver::Driver<'static>,
{
    pub device: embassy_usb::UsbDevice<'static, D>,
    pub reader: embassy_usb::class::hid::HidReader<'static, D, OUTPUT_REPORT_LEN>,
    pub writer: embassy_usb::class::hid::HidWriter<'static, D, INPUT_REPORT_LEN>,
}

#[cfg(target_os = "none")]
impl<D> PokkenPad<D>
where
    D: embassy_usb::driver::Driver<'static>,
{
    /// Builds the device descriptors and the HID interface.
    pub fn new(
        driver: D,
        storage: &'static mut UsbDeviceStorage,
        strings: UsbDeviceStrings,
    ) -> Self {
        let mut config = embassy_usb::Config::new(USB_VENDOR_ID, USB_PRODUCT_ID);
        config.manufacturer = Some(strings.manufacturer);
        config.product = Some(strings.product);
        config.serial_number = strings.serial_number;
        config.max_packet_size_0 = 64;
        config.max_power = MAX_POWER_MA;
        config.device_class = 0x00;
        config.device_sub_class = 0x00;
        config.device_protocol = 0x00;
        config.composite_with_iads = false;

        let mut builder = embassy_usb::Builder::new(
            driver,
            config,
            &mut storage.config_descriptor,
            &mut storage.bos_descriptor,
            &mut storage.msos_descriptor,
            &mut storage.control_buf,
        );

        let hid_config = embassy_usb::class::hid::Config {
            report_descriptor: POKKEN_REPORT_DESCRIPTOR,
            request_handler: None,
            poll_ms: POLL_INTERVAL_MS,
            max_packet_size: ENDPOINT_SIZE,
            hid_subclass: embassy_usb::class::hid::HidSubclass::No,
            hid_boot_protocol: embassy_usb::class::hid::HidBootProtocol::None,
        };
        let hid = embassy_usb::class::hid::HidReaderWriter::<_, OUTPUT_REPORT_LEN, INPUT_REPORT_LEN>::new(
            &mut builder,
            &mut storage.hid_state,
            hid_config,
        );
        let (reader, writer) = hid.split();

        Self {
            device: builder.build(),
            reader,
            writer,
        }
    }
}

/// Host-side stub so `cargo test` builds without pulling in Embassy USB.
#[cfg(not(target_os = "none"))]
pub struct UsbDeviceStorage;

#[cfg(not(target_os = "none"))]
impl UsbDeviceStorage {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }
}
