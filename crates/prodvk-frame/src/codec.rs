use std::time::Duration;

use bytes::{BufMut, Bytes, BytesMut};

use crate::command::TESTOP;
use crate::error::{FrameError, Result};
use crate::slot::DeviceSlot;
use crate::status::Status;

/// Header size shared by commands and responses: class, length, sub-command,
/// sequence, slot (commands) or error code (responses).
pub const HEADER_SIZE: usize = 5;

/// Bytes counted by the length field ahead of the argument/detail bytes.
pub const LENGTH_OVERHEAD: u8 = 3;

/// Longest argument list the one-byte length field can describe.
pub const MAX_ARGUMENT_LEN: usize = (u8::MAX - LENGTH_OVERHEAD) as usize;

/// Default maximum transfer unit: one 64-byte HID report.
pub const DEFAULT_MTU: usize = 64;

/// Default time to wait for a response.
pub const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_millis(6000);

/// An outbound command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFrame {
    pub class: u8,
    pub subcmd: u8,
    pub seq: u8,
    pub slot: u8,
    pub args: Bytes,
}

impl CommandFrame {
    /// Create a TESTOP command with sequence number 0.
    pub fn testop(subcmd: u8, slot: DeviceSlot, args: impl Into<Bytes>) -> Self {
        Self {
            class: TESTOP,
            subcmd,
            seq: 0,
            slot: slot.code(),
            args: args.into(),
        }
    }

    pub fn with_sequence(mut self, seq: u8) -> Self {
        self.seq = seq;
        self
    }

    /// The total wire size of this frame (header + arguments).
    pub fn wire_size(&self) -> usize {
        HEADER_SIZE + self.args.len()
    }
}

/// Encode a command into the wire format.
///
/// ```text
/// ┌───────┬──────────┬─────────┬─────┬──────┬──────────────┐
/// │ Class │ 3 + len  │ Sub-cmd │ Seq │ Slot │ Arguments    │
/// │ (1B)  │ (1B)     │ (1B)    │(1B) │ (1B) │ (len bytes)  │
/// └───────┴──────────┴─────────┴─────┴──────┴──────────────┘
/// ```
pub fn encode_command(frame: &CommandFrame, dst: &mut BytesMut) -> Result<()> {
    if frame.args.len() > MAX_ARGUMENT_LEN {
        return Err(FrameError::ArgumentsTooLong {
            size: frame.args.len(),
            max: MAX_ARGUMENT_LEN,
        });
    }
    dst.reserve(frame.wire_size());
    dst.put_u8(frame.class);
    dst.put_u8(LENGTH_OVERHEAD + frame.args.len() as u8);
    dst.put_u8(frame.subcmd);
    dst.put_u8(frame.seq);
    dst.put_u8(frame.slot);
    dst.put_slice(&frame.args);
    Ok(())
}

/// A decoded response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseFrame {
    pub class: u8,
    /// Raw length field: 3 + detail length as claimed by the board.
    pub length: u8,
    pub subcmd: u8,
    pub seq: u8,
    pub error_code: u8,
    /// Payload after the header. Empty when `length <= 3`.
    pub detail: Bytes,
}

impl ResponseFrame {
    pub fn status(&self) -> Status {
        Status::from_code(self.error_code)
    }

    /// Detail bytes the length field promised but the packet did not carry.
    pub fn missing_detail(&self) -> usize {
        usize::from(self.length.saturating_sub(LENGTH_OVERHEAD)).saturating_sub(self.detail.len())
    }
}

/// Decode one response packet.
///
/// Detail bytes are clamped to what the packet actually holds; padding past
/// `length` is ignored.
pub fn decode_response(src: &[u8]) -> Result<ResponseFrame> {
    if src.len() < HEADER_SIZE {
        return Err(FrameError::Truncated {
            len: src.len(),
            min: HEADER_SIZE,
        });
    }

    let length = src[1];
    if length < LENGTH_OVERHEAD {
        return Err(FrameError::InvalidLength(length));
    }

    let claimed = usize::from(length - LENGTH_OVERHEAD);
    let available = src.len() - HEADER_SIZE;
    let detail_len = claimed.min(available);

    Ok(ResponseFrame {
        class: src[0],
        length,
        subcmd: src[2],
        seq: src[3],
        error_code: src[4],
        detail: Bytes::copy_from_slice(&src[HEADER_SIZE..HEADER_SIZE + detail_len]),
    })
}

/// What the reader does with a packet whose class byte does not match the
/// command it is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnsolicitedPolicy {
    /// Log it and keep waiting within the remaining timeout.
    #[default]
    Discard,
    /// Log it and hand it back as the response.
    Accept,
}

/// Configuration for the frame codec.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Largest encoded command in bytes. Default: 64.
    pub max_transfer_unit: usize,
    /// How long to wait for a response. Default: 6 s.
    pub read_timeout: Duration,
    pub unsolicited: UnsolicitedPolicy,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_transfer_unit: DEFAULT_MTU,
            read_timeout: DEFAULT_RESPONSE_TIMEOUT,
            unsolicited: UnsolicitedPolicy::default(),
        }
    }
}

/// Space-separated lowercase hex, used for frame logging.
pub fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_without_arguments() {
        let frame = CommandFrame::testop(0x0A, DeviceSlot::NOT_APPLICABLE, Bytes::new())
            .with_sequence(2);
        let mut buf = BytesMut::new();
        encode_command(&frame, &mut buf).unwrap();

        assert_eq!(buf.as_ref(), &[0x20, 0x03, 0x0A, 0x02, 0x01]);
    }

    #[test]
    fn encode_with_arguments() {
        let frame = CommandFrame::testop(0x06, DeviceSlot::Ref, vec![0x00]).with_sequence(9);
        let mut buf = BytesMut::new();
        encode_command(&frame, &mut buf).unwrap();

        assert_eq!(buf.as_ref(), &[0x20, 0x04, 0x06, 0x09, 0x00, 0x00]);
        assert_eq!(buf.len(), frame.wire_size());
    }

    #[test]
    fn encode_rejects_unrepresentable_length() {
        let frame = CommandFrame::testop(0x62, DeviceSlot::Dut, vec![0u8; MAX_ARGUMENT_LEN + 1]);
        let mut buf = BytesMut::new();
        let err = encode_command(&frame, &mut buf).unwrap_err();
        assert!(matches!(err, FrameError::ArgumentsTooLong { size: 253, max: 252 }));
        assert!(buf.is_empty());
    }

    #[test]
    fn decode_header_only() {
        let frame = decode_response(&[0x20, 0x03, 0x08, 0x02, 0x00]).unwrap();
        assert_eq!(frame.class, 0x20);
        assert_eq!(frame.subcmd, 0x08);
        assert_eq!(frame.seq, 0x02);
        assert!(frame.status().is_success());
        assert!(frame.detail.is_empty());
    }

    #[test]
    fn decode_ignores_report_padding() {
        let mut packet = vec![0x20, 0x05, 0x6C, 0x03, 0x00, 0xAA, 0xBB];
        packet.resize(64, 0xEE);
        let frame = decode_response(&packet).unwrap();
        assert_eq!(frame.detail.as_ref(), &[0xAA, 0xBB]);
        assert_eq!(frame.missing_detail(), 0);
    }

    #[test]
    fn decode_clamps_short_detail() {
        let frame = decode_response(&[0x20, 0x0B, 0x05, 0x03, 0x00, 0x01, 0x02]).unwrap();
        assert_eq!(frame.detail.as_ref(), &[0x01, 0x02]);
        assert_eq!(frame.missing_detail(), 6);
    }

    #[test]
    fn missing_detail_saturates_on_short_length_field() {
        let frame = ResponseFrame {
            class: 0x20,
            length: 1,
            subcmd: 0x05,
            seq: 0x02,
            error_code: 0x00,
            detail: Bytes::new(),
        };
        assert_eq!(frame.missing_detail(), 0);
    }

    #[test]
    fn decode_rejects_short_buffer() {
        let err = decode_response(&[0x20, 0x03, 0x05]).unwrap_err();
        assert!(matches!(err, FrameError::Truncated { len: 3, min: 5 }));
    }

    #[test]
    fn decode_rejects_length_below_overhead() {
        let err = decode_response(&[0x20, 0x02, 0x05, 0x03, 0x00]).unwrap_err();
        assert!(matches!(err, FrameError::InvalidLength(2)));
    }

    #[test]
    fn decode_keeps_error_code() {
        let frame = decode_response(&[0x20, 0x03, 0x05, 0x03, 0x12]).unwrap();
        assert_eq!(frame.status(), Status::InvalidParameters);
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(hex_bytes(&[0x20, 0x03, 0xFF]), "20 03 ff");
        assert_eq!(hex_bytes(&[]), "");
    }
}
