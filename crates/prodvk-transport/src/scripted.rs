//! In-memory packet channel with scripted replies.
//!
//! Replies are served in order. A responder closure can be installed to
//! answer each written packet, which is how most dispatcher tests build a
//! board that echoes sequence numbers back.

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use bytes::Bytes;

use crate::error::{Result, TransportError};
use crate::traits::{PacketChannel, MAX_PACKET_SIZE};

type Responder = Box<dyn FnMut(&[u8]) -> Vec<Vec<u8>> + Send>;

enum Reply {
    Packet(Bytes),
    Timeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteMode {
    Accept,
    Reject,
    Fail,
}

/// A [`PacketChannel`] backed by queued replies instead of hardware.
pub struct ScriptedChannel {
    replies: VecDeque<Reply>,
    responder: Option<Responder>,
    written: Vec<Bytes>,
    reads: usize,
    write_mode: WriteMode,
    max_packet_size: usize,
}

impl ScriptedChannel {
    /// Create a channel with nothing queued.
    pub fn new() -> Self {
        Self {
            replies: VecDeque::new(),
            responder: None,
            written: Vec::new(),
            reads: 0,
            write_mode: WriteMode::Accept,
            max_packet_size: MAX_PACKET_SIZE,
        }
    }

    /// Override the reported packet size.
    pub fn with_max_packet_size(mut self, size: usize) -> Self {
        self.max_packet_size = size;
        self
    }

    /// Queue one packet for a future read.
    pub fn push_packet(&mut self, packet: impl Into<Bytes>) {
        self.replies.push_back(Reply::Packet(packet.into()));
    }

    /// Queue a read that times out.
    pub fn push_timeout(&mut self) {
        self.replies.push_back(Reply::Timeout);
    }

    /// Answer every accepted write with the packets returned by `responder`.
    ///
    /// Generated packets are queued behind anything already scripted.
    pub fn respond_with<F>(&mut self, responder: F)
    where
        F: FnMut(&[u8]) -> Vec<Vec<u8>> + Send + 'static,
    {
        self.responder = Some(Box::new(responder));
    }

    /// Make every write report zero bytes accepted.
    pub fn reject_writes(&mut self) {
        self.write_mode = WriteMode::Reject;
    }

    /// Make every write fail with an I/O error.
    pub fn fail_writes(&mut self) {
        self.write_mode = WriteMode::Fail;
    }

    /// Packets accepted so far, in order.
    pub fn written(&self) -> &[Bytes] {
        &self.written
    }

    /// Most recent accepted packet.
    pub fn last_written(&self) -> Option<&Bytes> {
        self.written.last()
    }

    /// Number of `read_packet` calls made.
    pub fn read_count(&self) -> usize {
        self.reads
    }

    /// Number of replies still queued.
    pub fn pending(&self) -> usize {
        self.replies.len()
    }
}

impl Default for ScriptedChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl PacketChannel for ScriptedChannel {
    fn write_packet(&mut self, packet: &[u8]) -> Result<usize> {
        match self.write_mode {
            WriteMode::Reject => return Ok(0),
            WriteMode::Fail => {
                return Err(TransportError::Io(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    "scripted write failure",
                )))
            }
            WriteMode::Accept => {}
        }

        if packet.len() > self.max_packet_size {
            return Err(TransportError::PacketTooLarge {
                size: packet.len(),
                max: self.max_packet_size,
            });
        }

        self.written.push(Bytes::copy_from_slice(packet));
        if let Some(responder) = self.responder.as_mut() {
            for reply in responder(packet) {
                self.replies.push_back(Reply::Packet(Bytes::from(reply)));
            }
        }
        Ok(packet.len())
    }

    fn read_packet(&mut self, timeout: Duration) -> Result<Bytes> {
        self.reads += 1;
        match self.replies.pop_front() {
            Some(Reply::Packet(packet)) => Ok(packet),
            Some(Reply::Timeout) | None => Err(TransportError::Timeout(timeout)),
        }
    }

    fn max_packet_size(&self) -> usize {
        self.max_packet_size
    }
}

impl fmt::Debug for ScriptedChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptedChannel")
            .field("pending", &self.replies.len())
            .field("written", &self.written.len())
            .field("reads", &self.reads)
            .field("write_mode", &self.write_mode)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replies_served_in_order() {
        let mut channel = ScriptedChannel::new();
        channel.push_packet(vec![1]);
        channel.push_timeout();
        channel.push_packet(vec![2]);

        let timeout = Duration::from_millis(5);
        assert_eq!(channel.read_packet(timeout).unwrap().as_ref(), &[1]);
        assert!(matches!(
            channel.read_packet(timeout),
            Err(TransportError::Timeout(d)) if d == timeout
        ));
        assert_eq!(channel.read_packet(timeout).unwrap().as_ref(), &[2]);
        assert_eq!(channel.read_count(), 3);
        assert_eq!(channel.pending(), 0);
    }

    #[test]
    fn responder_answers_each_write() {
        let mut channel = ScriptedChannel::new();
        channel.respond_with(|packet| vec![vec![packet[0], 0x03, packet[2], packet[3], 0x00]]);

        channel.write_packet(&[0x20, 0x03, 0x0A, 0x07, 0x01]).unwrap();
        let reply = channel.read_packet(Duration::from_millis(5)).unwrap();

        assert_eq!(reply.as_ref(), &[0x20, 0x03, 0x0A, 0x07, 0x00]);
        assert_eq!(channel.last_written().unwrap().as_ref(), &[0x20, 0x03, 0x0A, 0x07, 0x01]);
    }

    #[test]
    fn rejected_write_reports_zero_and_records_nothing() {
        let mut channel = ScriptedChannel::new();
        channel.reject_writes();

        assert_eq!(channel.write_packet(&[0x20]).unwrap(), 0);
        assert!(channel.written().is_empty());
    }

    #[test]
    fn failed_write_is_io_error() {
        let mut channel = ScriptedChannel::new();
        channel.fail_writes();

        let err = channel.write_packet(&[0x20]).unwrap_err();
        assert!(matches!(err, TransportError::Io(_)));
    }

    #[test]
    fn oversized_write_rejected() {
        let mut channel = ScriptedChannel::new().with_max_packet_size(4);
        let err = channel.write_packet(&[0; 5]).unwrap_err();
        assert!(matches!(err, TransportError::PacketTooLarge { size: 5, max: 4 }));
    }
}
