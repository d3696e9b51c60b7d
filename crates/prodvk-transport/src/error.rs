use std::time::Duration;

/// Errors that can occur on the packet channel.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// No attached device matched the requested identity.
    #[error("no device matching {filter}")]
    DeviceNotFound { filter: String },

    /// A matching device was found but could not be opened.
    #[error("failed to open {filter}: {reason}")]
    Open { filter: String, reason: String },

    /// The HID backend reported an error.
    #[error("HID error: {0}")]
    Hid(String),

    /// An I/O error occurred on the channel.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The packet does not fit in a single report.
    #[error("packet too large ({size} bytes, max {max})")]
    PacketTooLarge { size: usize, max: usize },

    /// Nothing arrived before the read deadline.
    #[error("no packet received within {0:?}")]
    Timeout(Duration),
}

#[cfg(feature = "hid")]
impl From<hidapi::HidError> for TransportError {
    fn from(err: hidapi::HidError) -> Self {
        TransportError::Hid(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TransportError>;
