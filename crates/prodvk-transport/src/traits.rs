use std::time::Duration;

use bytes::Bytes;

use crate::error::Result;

/// Size of one HID report on the ProDVK interrupt endpoints.
pub const MAX_PACKET_SIZE: usize = 64;

/// A bidirectional channel that moves whole packets.
///
/// Implementations never split or merge packets: one `write_packet` is one
/// report on the wire, one `read_packet` returns one report.
pub trait PacketChannel {
    /// Send one packet. Returns the number of payload bytes accepted.
    ///
    /// A return of `Ok(0)` means the device did not take the packet and
    /// callers must treat it as a failed write.
    fn write_packet(&mut self, packet: &[u8]) -> Result<usize>;

    /// Block until one packet arrives or `timeout` elapses.
    ///
    /// Returns [`TransportError::Timeout`](crate::TransportError::Timeout)
    /// when the deadline passes with nothing received.
    fn read_packet(&mut self, timeout: Duration) -> Result<Bytes>;

    /// Largest packet this channel carries.
    fn max_packet_size(&self) -> usize {
        MAX_PACKET_SIZE
    }
}

impl<T: PacketChannel + ?Sized> PacketChannel for &mut T {
    fn write_packet(&mut self, packet: &[u8]) -> Result<usize> {
        (**self).write_packet(packet)
    }

    fn read_packet(&mut self, timeout: Duration) -> Result<Bytes> {
        (**self).read_packet(timeout)
    }

    fn max_packet_size(&self) -> usize {
        (**self).max_packet_size()
    }
}

impl<T: PacketChannel + ?Sized> PacketChannel for Box<T> {
    fn write_packet(&mut self, packet: &[u8]) -> Result<usize> {
        (**self).write_packet(packet)
    }

    fn read_packet(&mut self, timeout: Duration) -> Result<Bytes> {
        (**self).read_packet(timeout)
    }

    fn max_packet_size(&self) -> usize {
        (**self).max_packet_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::scripted::ScriptedChannel;

    fn exchange<C: PacketChannel>(mut channel: C, packet: &[u8]) -> Result<Bytes> {
        channel.write_packet(packet)?;
        channel.read_packet(Duration::from_millis(10))
    }

    #[test]
    fn mut_ref_forwards_to_inner_channel() {
        let mut channel = ScriptedChannel::new();
        channel.push_packet(vec![0x20, 0x03, 0x01, 0x02, 0x00]);

        let reply = exchange(&mut channel, &[0x20, 0x03, 0x01, 0x02, 0x01]).unwrap();

        assert_eq!(reply.as_ref(), &[0x20, 0x03, 0x01, 0x02, 0x00]);
        assert_eq!(channel.written().len(), 1);
        assert_eq!(channel.read_count(), 1);
    }

    #[test]
    fn boxed_channel_reports_inner_packet_size() {
        let boxed: Box<dyn PacketChannel> =
            Box::new(ScriptedChannel::new().with_max_packet_size(32));
        assert_eq!(boxed.max_packet_size(), 32);
    }

    #[test]
    fn default_packet_size_is_one_report() {
        assert_eq!(ScriptedChannel::new().max_packet_size(), MAX_PACKET_SIZE);
    }

    #[test]
    fn empty_script_times_out() {
        let err = exchange(ScriptedChannel::new(), &[0x20]).unwrap_err();
        assert!(matches!(err, TransportError::Timeout(_)));
    }
}
