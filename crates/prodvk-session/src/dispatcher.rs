use bytes::Bytes;
use prodvk_frame::{
    hex_bytes, subcmd_name, CommandFrame, CommandWriter, DeviceSlot, ResponseReader,
};
use prodvk_transport::PacketChannel;
use tracing::{debug, info, warn};

use crate::config::DispatchConfig;
use crate::decode::Decoded;
use crate::error::{DispatchError, Result};
use crate::registry::DecoderRegistry;
use crate::state::LastValues;
use crate::stats::TestStats;

/// Sequence number held before the first command; the first frame carries 2.
const INITIAL_SEQUENCE: u8 = 1;

/// Sends TESTOP commands and decodes their responses, one at a time.
///
/// The dispatcher owns the channel and the sequence counter, so every call
/// takes `&mut self`. Share it across threads behind a `Mutex`.
pub struct Dispatcher<C> {
    channel: C,
    seq: u8,
    registry: DecoderRegistry,
    config: DispatchConfig,
    stats: TestStats,
}

impl<C: PacketChannel> Dispatcher<C> {
    /// Create a dispatcher with the standard decoders and default config.
    pub fn new(channel: C) -> Self {
        Self::with_config(channel, DispatchConfig::default())
    }

    /// Create a dispatcher with explicit configuration.
    pub fn with_config(channel: C, config: DispatchConfig) -> Self {
        let registry = DecoderRegistry::standard(config.decode);
        Self::with_registry(channel, config, registry)
    }

    /// Create a dispatcher with a caller-built decoder registry.
    pub fn with_registry(channel: C, config: DispatchConfig, registry: DecoderRegistry) -> Self {
        Self {
            channel,
            seq: INITIAL_SEQUENCE,
            registry,
            config,
            stats: TestStats::default(),
        }
    }

    /// Send one TESTOP command and decode its response into `values`.
    pub fn dispatch(
        &mut self,
        values: &mut LastValues,
        subcmd: u8,
        slot: DeviceSlot,
        args: impl Into<Bytes>,
    ) -> Result<Decoded> {
        self.dispatch_frame(values, CommandFrame::testop(subcmd, slot, args))
    }

    /// Send a prepared frame. Its sequence number is replaced with the
    /// next value from this dispatcher's counter.
    ///
    /// Every call counts one verification. Only a nonzero status reported
    /// by the board counts an error.
    pub fn dispatch_frame(
        &mut self,
        values: &mut LastValues,
        frame: CommandFrame,
    ) -> Result<Decoded> {
        self.stats.verifications = self.stats.verifications.saturating_add(1);
        let subcmd = frame.subcmd;

        let result = self.exchange(values, frame);
        match &result {
            Err(DispatchError::Device(status)) => {
                self.stats.errors = self.stats.errors.saturating_add(1);
                warn!(
                    subcmd = subcmd_name(subcmd),
                    status = status.name(),
                    code = format_args!("0x{:02X}", status.code()),
                    "command failed"
                );
            }
            Err(other) => warn!(
                subcmd = subcmd_name(subcmd),
                error = %other,
                "command failed"
            ),
            Ok(_) => {}
        }
        result
    }

    fn exchange(&mut self, values: &mut LastValues, frame: CommandFrame) -> Result<Decoded> {
        self.seq = self.seq.wrapping_add(1);
        let frame = frame.with_sequence(self.seq);
        debug!(
            subcmd = subcmd_name(frame.subcmd),
            seq = frame.seq,
            slot = frame.slot,
            "dispatch"
        );

        CommandWriter::with_config(&mut self.channel, self.config.frame.clone())
            .send(&frame)
            .map_err(DispatchError::from_send)?;

        let response = ResponseReader::with_config(&mut self.channel, self.config.frame.clone())
            .read_response(frame.class)
            .map_err(DispatchError::from_receive)?;

        if response.seq != frame.seq {
            warn!(
                subcmd = subcmd_name(frame.subcmd),
                expected = frame.seq,
                actual = response.seq,
                "sequence number mismatch"
            );
        }

        let status = response.status();
        if !status.is_success() {
            return Err(DispatchError::Device(status));
        }

        let decoded = self
            .registry
            .decode(frame.subcmd, &response.detail)
            .map_err(|err| {
                warn!(
                    subcmd = subcmd_name(frame.subcmd),
                    detail = %hex_bytes(&response.detail),
                    "undecodable response detail"
                );
                DispatchError::ResponseParse(err.to_string())
            })?;

        decoded.apply(values);
        info!("Command Response: {decoded}");
        Ok(decoded)
    }

    /// Sequence number carried by the most recent command.
    pub fn last_sequence(&self) -> u8 {
        self.seq
    }

    pub fn stats(&self) -> &TestStats {
        &self.stats
    }

    pub fn registry(&self) -> &DecoderRegistry {
        &self.registry
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Borrow the underlying channel.
    pub fn get_ref(&self) -> &C {
        &self.channel
    }

    /// Mutably borrow the underlying channel.
    pub fn get_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Consume the dispatcher and return the inner channel.
    pub fn into_inner(self) -> C {
        self.channel
    }
}
