use std::fmt;

/// Error code returned in byte 4 of every response.
///
/// Codes 0x01-0x12 come from the EM9304 HCI layer. Codes 0xF0 and up are
/// raised by the board firmware itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Success,
    UnknownCommand,
    HardwareFailure,
    CommandNotAllowed,
    InvalidParameters,
    CommandTimeout,
    ResponseParseError,
    DeviceHardFail,
    TxBusy,
    TxError,
    CommandCompleteNotReceived,
    Unknown(u8),
}

impl Status {
    pub const fn from_code(code: u8) -> Self {
        match code {
            0x00 => Status::Success,
            0x01 => Status::UnknownCommand,
            0x03 => Status::HardwareFailure,
            0x0C => Status::CommandNotAllowed,
            0x12 => Status::InvalidParameters,
            0xF0 => Status::CommandTimeout,
            0xF1 => Status::ResponseParseError,
            0xFC => Status::DeviceHardFail,
            0xFD => Status::TxBusy,
            0xFE => Status::TxError,
            0xFF => Status::CommandCompleteNotReceived,
            other => Status::Unknown(other),
        }
    }

    pub const fn code(self) -> u8 {
        match self {
            Status::Success => 0x00,
            Status::UnknownCommand => 0x01,
            Status::HardwareFailure => 0x03,
            Status::CommandNotAllowed => 0x0C,
            Status::InvalidParameters => 0x12,
            Status::CommandTimeout => 0xF0,
            Status::ResponseParseError => 0xF1,
            Status::DeviceHardFail => 0xFC,
            Status::TxBusy => 0xFD,
            Status::TxError => 0xFE,
            Status::CommandCompleteNotReceived => 0xFF,
            Status::Unknown(code) => code,
        }
    }

    pub const fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    /// Human-readable description used in failure logs.
    pub const fn name(self) -> &'static str {
        match self {
            Status::Success => "Success",
            Status::UnknownCommand => "Unknown command",
            Status::HardwareFailure => "HW Failure",
            Status::CommandNotAllowed => "Command not allowed",
            Status::InvalidParameters => "Invalid parameters",
            Status::CommandTimeout => "Command timeout",
            Status::ResponseParseError => "Response parse error",
            Status::DeviceHardFail => "Device hard fail",
            Status::TxBusy => "Command Tx failed because device is busy",
            Status::TxError => "Command Tx failed because invalid command",
            Status::CommandCompleteNotReceived => "Command complete not received",
            Status::Unknown(_) => "unknown error code",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:02X})", self.name(), self.code())
    }
}
