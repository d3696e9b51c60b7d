use std::time::Duration;

use prodvk_transport::TransportError;

/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// Fewer bytes than a response header.
    #[error("response truncated ({len} bytes, need at least {min})")]
    Truncated { len: usize, min: usize },

    /// The response length field is below the fixed header overhead.
    #[error("invalid response length field {0} (minimum 3)")]
    InvalidLength(u8),

    /// Argument bytes do not fit in the one-byte length field.
    #[error("arguments too long ({size} bytes, max {max})")]
    ArgumentsTooLong { size: usize, max: usize },

    /// The encoded frame exceeds the channel's transfer unit.
    #[error("frame too large ({size} bytes, max {max})")]
    FrameTooLarge { size: usize, max: usize },

    /// The device accepted zero bytes of the command.
    #[error("command not accepted by device")]
    WriteRejected,

    /// No response arrived before the deadline.
    #[error("no response within {0:?}")]
    Timeout(Duration),

    /// Packet channel error.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

pub type Result<T> = std::result::Result<T, FrameError>;
