use prodvk_frame::{DeviceSlot, FrameConfig};

use crate::decode::DecodeContext;

/// Controls dispatch behavior.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Transfer unit, read timeout and unsolicited packet handling.
    pub frame: FrameConfig,
    /// Slot used by commands that take no explicit slot (mode switches).
    pub default_slot: DeviceSlot,
    /// Scale factors for current and calibration decoding.
    pub decode: DecodeContext,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            frame: FrameConfig::default(),
            default_slot: DeviceSlot::Dut,
            decode: DecodeContext::default(),
        }
    }
}
