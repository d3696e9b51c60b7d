//! Host-side protocol engine for the ProDVK production test board.
//!
//! The board bridges a USB-HID link to two EM9304 radios, a reference
//! device (REF) and a device under test (DUT). Test scripts drive it with
//! one TESTOP command at a time and read back one response each.
//!
//! # Crate Structure
//!
//! - [`transport`] - Packet channel abstraction, hidapi channel (behind `hid` feature)
//! - [`frame`] - TESTOP command/response framing, sub-command and status tables
//! - [`session`] - Dispatcher, response decoders, decoded state and test bookkeeping

/// Re-export transport types.
pub mod transport {
    pub use prodvk_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use prodvk_frame::*;
}

/// Re-export session types.
pub mod session {
    pub use prodvk_session::*;
}
