use bytes::BytesMut;
use prodvk_transport::PacketChannel;
use tracing::debug;

use crate::codec::{encode_command, hex_bytes, CommandFrame, FrameConfig, DEFAULT_MTU};
use crate::error::{FrameError, Result};

/// Writes command frames to a packet channel.
pub struct CommandWriter<C> {
    inner: C,
    buf: BytesMut,
    config: FrameConfig,
}

impl<C: PacketChannel> CommandWriter<C> {
    /// Create a new command writer with default configuration.
    pub fn new(inner: C) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new command writer with explicit configuration.
    pub fn with_config(inner: C, config: FrameConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(DEFAULT_MTU),
            config,
        }
    }

    /// Encode and send one command as a single packet.
    ///
    /// Frames larger than the configured transfer unit (or the channel's
    /// packet size, whichever is smaller) are rejected before anything is
    /// sent. A write that the device accepts zero bytes of is an error.
    pub fn send(&mut self, frame: &CommandFrame) -> Result<usize> {
        let max = self.max_frame_size();
        if frame.wire_size() > max {
            return Err(FrameError::FrameTooLarge {
                size: frame.wire_size(),
                max,
            });
        }

        self.buf.clear();
        encode_command(frame, &mut self.buf)?;

        debug!(bytes = %hex_bytes(&self.buf), "tx");
        match self.inner.write_packet(&self.buf)? {
            0 => Err(FrameError::WriteRejected),
            n => Ok(n),
        }
    }

    /// Largest frame this writer will send.
    pub fn max_frame_size(&self) -> usize {
        self.config
            .max_transfer_unit
            .min(self.inner.max_packet_size())
    }

    /// Borrow the underlying channel.
    pub fn get_ref(&self) -> &C {
        &self.inner
    }

    /// Mutably borrow the underlying channel.
    pub fn get_mut(&mut self) -> &mut C {
        &mut self.inner
    }

    /// Consume the writer and return the inner channel.
    pub fn into_inner(self) -> C {
        self.inner
    }

    /// Current command writer configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}
