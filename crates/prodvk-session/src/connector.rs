use prodvk_transport::{DeviceFilter, HidChannel};
use tracing::info;

use crate::commands::Session;
use crate::config::DispatchConfig;
use crate::error::{DispatchError, Result};

/// Board identity read from the USB string descriptors at connect time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardIdentity {
    pub product: Option<String>,
    pub serial: Option<String>,
}

impl Session<HidChannel> {
    /// Open the first board matching `filter` and put it in TestOp mode.
    pub fn open(filter: &DeviceFilter) -> Result<(Self, BoardIdentity)> {
        Self::open_with_config(filter, DispatchConfig::default())
    }

    /// Open with explicit dispatch configuration.
    pub fn open_with_config(
        filter: &DeviceFilter,
        config: DispatchConfig,
    ) -> Result<(Self, BoardIdentity)> {
        let channel = HidChannel::open(filter).map_err(DispatchError::Transport)?;
        let identity = BoardIdentity {
            product: channel.product_string().map_err(DispatchError::Transport)?,
            serial: channel.serial_number().map_err(DispatchError::Transport)?,
        };
        info!(
            "Board Name: {} Board Serial Number: {}",
            identity.product.as_deref().unwrap_or("unknown"),
            identity.serial.as_deref().unwrap_or("unknown")
        );

        let mut session = Session::with_config(channel, config);
        session.switch_to_testop_mode()?;
        Ok((session, identity))
    }
}
