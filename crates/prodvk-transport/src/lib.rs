//! Packet channel abstraction for the ProDVK test board.
//!
//! The board talks over a USB-HID interrupt endpoint pair that moves
//! fixed-size 64-byte reports. This crate hides the USB specifics behind
//! [`PacketChannel`]:
//! - [`HidChannel`] talks to real hardware through hidapi (`hid` feature)
//! - [`ScriptedChannel`] replays canned responses for tests and dry runs
//!
//! This is the lowest layer of prodvk. Framing and dispatch build on top of
//! the trait provided here.

pub mod error;
pub mod scripted;
pub mod traits;

#[cfg(feature = "hid")]
pub mod hid;

pub use error::{Result, TransportError};
pub use scripted::ScriptedChannel;
pub use traits::{PacketChannel, MAX_PACKET_SIZE};

#[cfg(feature = "hid")]
pub use hid::{list_devices, DeviceFilter, DeviceSummary, HidChannel, PRODUCT_ID, VENDOR_ID};
