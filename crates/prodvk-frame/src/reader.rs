use std::time::Instant;

use prodvk_transport::{PacketChannel, TransportError};
use tracing::{debug, warn};

use crate::codec::{decode_response, hex_bytes, FrameConfig, ResponseFrame, UnsolicitedPolicy};
use crate::command::command_name;
use crate::error::{FrameError, Result};

/// Reads response frames from a packet channel.
///
/// One packet is one response; there is no reassembly.
pub struct ResponseReader<C> {
    inner: C,
    config: FrameConfig,
}

impl<C: PacketChannel> ResponseReader<C> {
    /// Create a new response reader with default configuration.
    pub fn new(inner: C) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new response reader with explicit configuration.
    pub fn with_config(inner: C, config: FrameConfig) -> Self {
        Self { inner, config }
    }

    /// Read the response to a command of class `expected_class`.
    ///
    /// Packets of any other class are unsolicited. They are logged, then
    /// dropped or returned according to [`FrameConfig::unsolicited`]. The
    /// whole call, including any discarded packets, stays within
    /// [`FrameConfig::read_timeout`].
    pub fn read_response(&mut self, expected_class: u8) -> Result<ResponseFrame> {
        let timeout = self.config.read_timeout;
        let deadline = Instant::now() + timeout;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(FrameError::Timeout(timeout));
            }

            let packet = match self.inner.read_packet(remaining) {
                Ok(packet) => packet,
                Err(TransportError::Timeout(_)) => return Err(FrameError::Timeout(timeout)),
                Err(err) => return Err(FrameError::Transport(err)),
            };
            debug!(bytes = %hex_bytes(&packet), "rx");

            match packet.first() {
                Some(&class) if class != expected_class => {
                    warn!(
                        class = format_args!("0x{class:02X}"),
                        class_name = command_name(class),
                        bytes = %hex_bytes(&packet),
                        "spontaneous response"
                    );
                    if self.config.unsolicited == UnsolicitedPolicy::Discard {
                        continue;
                    }
                }
                _ => {}
            }

            return decode_response(&packet).inspect_err(|err| {
                warn!(bytes = %hex_bytes(&packet), error = %err, "malformed response");
            });
        }
    }

    /// Borrow the underlying channel.
    pub fn get_ref(&self) -> &C {
        &self.inner
    }

    /// Mutably borrow the underlying channel.
    pub fn get_mut(&mut self) -> &mut C {
        &mut self.inner
    }

    /// Consume the reader and return the inner channel.
    pub fn into_inner(self) -> C {
        self.inner
    }

    /// Current response reader configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use prodvk_transport::ScriptedChannel;

    use super::*;
    use crate::command::{RX, TESTOP};

    fn accept_config() -> FrameConfig {
        FrameConfig {
            unsolicited: UnsolicitedPolicy::Accept,
            ..FrameConfig::default()
        }
    }

    #[test]
    fn read_single_response() {
        let mut channel = ScriptedChannel::new();
        channel.push_packet(vec![0x20, 0x04, 0x06, 0x02, 0x00, 0x7F]);

        let mut reader = ResponseReader::new(channel);
        let frame = reader.read_response(TESTOP).unwrap();

        assert_eq!(frame.subcmd, 0x06);
        assert_eq!(frame.detail.as_ref(), &[0x7F]);
    }

    #[test]
    fn unsolicited_packet_discarded_by_default() {
        let mut channel = ScriptedChannel::new();
        channel.push_packet(vec![RX, 0x04, 0x0E, 0x00, 0x00]);
        channel.push_packet(vec![0x20, 0x03, 0x0A, 0x02, 0x00]);

        let mut reader = ResponseReader::new(channel);
        let frame = reader.read_response(TESTOP).unwrap();

        assert_eq!(frame.class, TESTOP);
        assert_eq!(frame.subcmd, 0x0A);
        assert_eq!(reader.get_ref().read_count(), 2);
    }

    #[test]
    fn unsolicited_packet_accepted_when_configured() {
        let mut channel = ScriptedChannel::new();
        channel.push_packet(vec![RX, 0x03, 0x0E, 0x00, 0x00]);
        channel.push_packet(vec![0x20, 0x03, 0x0A, 0x02, 0x00]);

        let mut reader = ResponseReader::with_config(channel, accept_config());
        let frame = reader.read_response(TESTOP).unwrap();

        assert_eq!(frame.class, RX);
        assert_eq!(reader.get_ref().pending(), 1);
    }

    #[test]
    fn only_unsolicited_traffic_times_out() {
        let mut channel = ScriptedChannel::new();
        channel.push_packet(vec![RX, 0x03, 0x0E, 0x00, 0x00]);

        let cfg = FrameConfig {
            read_timeout: Duration::from_millis(50),
            ..FrameConfig::default()
        };
        let mut reader = ResponseReader::with_config(channel, cfg);
        let err = reader.read_response(TESTOP).unwrap_err();

        assert!(matches!(err, FrameError::Timeout(d) if d == Duration::from_millis(50)));
    }

    #[test]
    fn transport_timeout_maps_to_frame_timeout() {
        let mut channel = ScriptedChannel::new();
        channel.push_timeout();

        let mut reader = ResponseReader::new(channel);
        let err = reader.read_response(TESTOP).unwrap_err();
        assert!(matches!(err, FrameError::Timeout(_)));
    }

    #[test]
    fn short_packet_is_decode_error() {
        let mut channel = ScriptedChannel::new();
        channel.push_packet(vec![0x20, 0x03, 0x05]);

        let mut reader = ResponseReader::new(channel);
        let err = reader.read_response(TESTOP).unwrap_err();
        assert!(matches!(err, FrameError::Truncated { len: 3, .. }));
    }

    #[test]
    fn empty_packet_is_decode_error() {
        let mut channel = ScriptedChannel::new();
        channel.push_packet(Vec::new());

        let mut reader = ResponseReader::new(channel);
        let err = reader.read_response(TESTOP).unwrap_err();
        assert!(matches!(err, FrameError::Truncated { len: 0, .. }));
    }

    #[test]
    fn accessors_and_into_inner() {
        let mut reader = ResponseReader::new(ScriptedChannel::new());

        let _ = reader.get_ref();
        let _ = reader.get_mut();
        assert_eq!(reader.config().read_timeout, Duration::from_millis(6000));
        let _inner = reader.into_inner();
    }
}
