use std::time::Duration;

use prodvk_frame::{FrameError, Status, HEADER_SIZE};
use prodvk_transport::TransportError;

/// Errors returned by [`Dispatcher::dispatch`](crate::Dispatcher::dispatch).
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The board answered with a nonzero error code.
    #[error("device reported {0}")]
    Device(Status),

    /// The command could not be written or its arguments are invalid.
    #[error("bad parameters: {0}")]
    BadParams(String),

    /// The encoded command does not fit in one packet.
    #[error("frame too large: {size} bytes (max {max})")]
    FrameTooLarge { size: usize, max: usize },

    /// No response arrived within the read timeout.
    #[error("no response after {0:?}")]
    Timeout(Duration),

    /// Reading from the channel failed.
    #[error("transport error: {0}")]
    Transport(#[source] TransportError),

    /// The response header or detail could not be decoded.
    #[error("response parse error: {0}")]
    ResponseParse(String),
}

impl DispatchError {
    /// Status code this error corresponds to on the wire.
    pub fn code(&self) -> u8 {
        match self {
            DispatchError::Device(status) => status.code(),
            DispatchError::BadParams(_) => Status::InvalidParameters.code(),
            DispatchError::FrameTooLarge { .. } => Status::TxError.code(),
            DispatchError::Timeout(_) => Status::CommandTimeout.code(),
            DispatchError::Transport(_) => Status::DeviceHardFail.code(),
            DispatchError::ResponseParse(_) => Status::ResponseParseError.code(),
        }
    }

    /// Whether the board or link is likely unusable after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DispatchError::Timeout(_) | DispatchError::Transport(_))
    }

    /// Map a failure raised while sending a command.
    pub(crate) fn from_send(err: FrameError) -> Self {
        match err {
            FrameError::FrameTooLarge { size, max } => DispatchError::FrameTooLarge { size, max },
            FrameError::ArgumentsTooLong { size, max } => DispatchError::FrameTooLarge {
                size: size + HEADER_SIZE,
                max: max + HEADER_SIZE,
            },
            FrameError::Timeout(timeout) => DispatchError::Timeout(timeout),
            other => DispatchError::BadParams(other.to_string()),
        }
    }

    /// Map a failure raised while reading a response.
    pub(crate) fn from_receive(err: FrameError) -> Self {
        match err {
            FrameError::Timeout(timeout) => DispatchError::Timeout(timeout),
            FrameError::Transport(TransportError::Timeout(timeout)) => {
                DispatchError::Timeout(timeout)
            }
            FrameError::Transport(source) => DispatchError::Transport(source),
            other => DispatchError::ResponseParse(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DispatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_wire_taxonomy() {
        assert_eq!(DispatchError::Device(Status::HardwareFailure).code(), 0x03);
        assert_eq!(DispatchError::BadParams("x".into()).code(), 0x12);
        assert_eq!(DispatchError::FrameTooLarge { size: 70, max: 64 }.code(), 0xFE);
        assert_eq!(DispatchError::Timeout(Duration::from_secs(6)).code(), 0xF0);
        assert_eq!(DispatchError::ResponseParse("short".into()).code(), 0xF1);
        assert_eq!(
            DispatchError::Transport(TransportError::Hid("gone".into())).code(),
            0xFC
        );
    }

    #[test]
    fn send_failures_become_bad_params() {
        let err = DispatchError::from_send(FrameError::WriteRejected);
        assert!(matches!(err, DispatchError::BadParams(_)));

        let err = DispatchError::from_send(FrameError::Transport(TransportError::Hid(
            "pipe".into(),
        )));
        assert!(matches!(err, DispatchError::BadParams(_)));

        let err = DispatchError::from_send(FrameError::FrameTooLarge { size: 65, max: 64 });
        assert!(matches!(err, DispatchError::FrameTooLarge { size: 65, max: 64 }));

        let err = DispatchError::from_send(FrameError::ArgumentsTooLong {
            size: 253,
            max: 252,
        });
        assert!(matches!(err, DispatchError::FrameTooLarge { size: 258, max: 257 }));
        assert_eq!(err.code(), 0xFE);
    }

    #[test]
    fn receive_failures_keep_their_kind() {
        let err = DispatchError::from_receive(FrameError::Timeout(Duration::from_millis(5)));
        assert!(err.is_fatal());
        assert!(matches!(err, DispatchError::Timeout(_)));

        let err = DispatchError::from_receive(FrameError::Truncated { len: 3, min: 5 });
        assert!(matches!(err, DispatchError::ResponseParse(_)));
        assert!(!err.is_fatal());
    }
}
