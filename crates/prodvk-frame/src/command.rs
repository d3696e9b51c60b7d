//! Command classes carried in byte 0 of every frame.
//!
//! Only [`TESTOP`] is sent by this library. The others are accepted on the
//! receive side so that stray bridge-mode traffic can be named in logs.

/// Raw HCI transmit (bridge mode).
pub const TX: u8 = 0x00;

/// Raw HCI receive (bridge mode).
pub const RX: u8 = 0x01;

/// Board reset.
pub const RESET: u8 = 0x02;

/// Program test mode.
pub const PTM: u8 = 0x03;

/// Test operation. All sub-commands travel under this class.
pub const TESTOP: u8 = 0x20;

/// Returns a human-readable name for a command class.
pub fn command_name(class: u8) -> &'static str {
    match class {
        TX => "TX",
        RX => "RX",
        RESET => "RESET",
        PTM => "PTM",
        TESTOP => "TESTOP",
        _ => "UNKNOWN",
    }
}
