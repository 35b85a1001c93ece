//! USB identity and HID report descriptor of the emulated pad.
//!
//! The Switch recognises the HORI Pokken Tournament Pro Pad by vendor and
//! product id and then trusts this descriptor. It advertises 16 buttons
//! (the console uses 14), a 4-bit hat plus a padding nibble, four 8-bit
//! axes, one vendor byte, and an 8-byte OUT report the host uses as an echo
//! channel.

/// HORI CO.,LTD.
pub const USB_VENDOR_ID: u16 = 0x0F0D;
/// Pokken Tournament Pro Pad.
pub const USB_PRODUCT_ID: u16 = 0x0092;
pub const USB_MANUFACTURER: &str = "HORI CO.,LTD.";
pub const USB_PRODUCT: &str = "POKKEN CONTROLLER";
/// Interrupt endpoint size for both directions.
pub const ENDPOINT_SIZE: u16 = 64;
/// Host polling interval requested in the endpoint descriptors.
pub const POLL_INTERVAL_MS: u8 = 5;

/// HID report descriptor matching [`super::InputReport::to_bytes`].
pub const POKKEN_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x05, // Usage (Game Pad)
    0xA1, 0x01, // Collection (Application)
    // Buttons: 16 x 1 bit
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x35, 0x00, //   Physical Minimum (0)
    0x45, 0x01, //   Physical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x10, //   Report Count (16)
    0x05, 0x09, //   Usage Page (Button)
    0x19, 0x01, //   Usage Minimum (1)
    0x29, 0x10, //   Usage Maximum (16)
    0x81, 0x02, //   Input (Data, Var, Abs)
    // Hat switch: 1 x 4 bits, null state for neutral
    0x05, 0x01, //   Usage Page (Generic Desktop)
    0x25, 0x07, //   Logical Maximum (7)
    0x46, 0x3B, 0x01, // Physical Maximum (315)
    0x75, 0x04, //   Report Size (4)
    0x95, 0x01, //   Report Count (1)
    0x65, 0x14, //   Unit (Degrees)
    0x09, 0x39, //   Usage (Hat Switch)
    0x81, 0x42, //   Input (Data, Var, Abs, Null)
    // Padding nibble
    0x65, 0x00, //   Unit (None)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x01, //   Input (Const)
    // Sticks: 4 x 8 bits
    0x26, 0xFF, 0x00, // Logical Maximum (255)
    0x46, 0xFF, 0x00, // Physical Maximum (255)
    0x09, 0x30, //   Usage (X)
    0x09, 0x31, //   Usage (Y)
    0x09, 0x32, //   Usage (Z)
    0x09, 0x35, //   Usage (Rz)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x04, //   Report Count (4)
    0x81, 0x02, //   Input (Data, Var, Abs)
    // Vendor byte
    0x06, 0x00, 0xFF, // Usage Page (Vendor Defined 0xFF00)
    0x09, 0x20, //   Usage (0x20)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x02, //   Input (Data, Var, Abs)
    // OUT report: 8 bytes
    0x0A, 0x21, 0x26, // Usage (0x2621)
    0x95, 0x08, //   Report Count (8)
    0x91, 0x02, //   Output (Data, Var, Abs)
    0xC0, // End Collection
];
