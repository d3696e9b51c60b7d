//! hidapi-backed channel for attached ProDVK boards.
//!
//! The board enumerates as a vendor HID device with interrupt endpoints
//! 0x81 (IN) and 0x01 (OUT). hidapi addresses the interface, so endpoint
//! numbers never appear here. Product name and serial number come from
//! string descriptors 2 and 3.

use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use hidapi::{HidApi, HidDevice};
use tracing::debug;

use crate::error::{Result, TransportError};
use crate::traits::{PacketChannel, MAX_PACKET_SIZE};

/// NXP vendor ID used by the ProDVK firmware.
pub const VENDOR_ID: u16 = 0x1fc9;

/// ProDVK product ID.
pub const PRODUCT_ID: u16 = 0x0081;

/// Boards use unnumbered reports; hidapi expects a leading zero on writes.
const REPORT_ID: u8 = 0x00;

/// Identity used to pick one board out of those attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceFilter {
    pub vendor_id: u16,
    pub product_id: u16,
    /// Match only the board with this serial number.
    pub serial: Option<String>,
}

impl DeviceFilter {
    /// Restrict the filter to one serial number.
    pub fn with_serial(mut self, serial: impl Into<String>) -> Self {
        self.serial = Some(serial.into());
        self
    }

    pub fn matches(&self, vendor_id: u16, product_id: u16, serial: Option<&str>) -> bool {
        if vendor_id != self.vendor_id || product_id != self.product_id {
            return false;
        }
        match &self.serial {
            Some(wanted) => serial == Some(wanted.as_str()),
            None => true,
        }
    }
}

impl Default for DeviceFilter {
    fn default() -> Self {
        Self {
            vendor_id: VENDOR_ID,
            product_id: PRODUCT_ID,
            serial: None,
        }
    }
}

impl fmt::Display for DeviceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VID=0x{:04X} PID=0x{:04X}", self.vendor_id, self.product_id)?;
        if let Some(serial) = &self.serial {
            write!(f, " SN={serial}")?;
        }
        Ok(())
    }
}

/// One enumerated board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSummary {
    pub vendor_id: u16,
    pub product_id: u16,
    pub serial: Option<String>,
    pub product: Option<String>,
    pub path: String,
}

/// Enumerate attached boards matching `filter`.
pub fn list_devices(filter: &DeviceFilter) -> Result<Vec<DeviceSummary>> {
    let api = HidApi::new()?;
    let devices = api
        .device_list()
        .filter(|info| filter.matches(info.vendor_id(), info.product_id(), info.serial_number()))
        .map(|info| DeviceSummary {
            vendor_id: info.vendor_id(),
            product_id: info.product_id(),
            serial: info.serial_number().map(str::to_string),
            product: info.product_string().map(str::to_string),
            path: info.path().to_string_lossy().into_owned(),
        })
        .collect();
    Ok(devices)
}

/// A [`PacketChannel`] over an open HID device.
pub struct HidChannel {
    device: HidDevice,
    filter: DeviceFilter,
    report_size: usize,
}

impl HidChannel {
    /// Open the first attached board matching `filter`.
    pub fn open(filter: &DeviceFilter) -> Result<Self> {
        let api = HidApi::new()?;
        let info = api
            .device_list()
            .find(|info| filter.matches(info.vendor_id(), info.product_id(), info.serial_number()))
            .ok_or_else(|| TransportError::DeviceNotFound {
                filter: filter.to_string(),
            })?;

        let device = info.open_device(&api).map_err(|err| TransportError::Open {
            filter: filter.to_string(),
            reason: err.to_string(),
        })?;
        debug!(
            filter = %filter,
            path = %info.path().to_string_lossy(),
            "opened HID device"
        );

        Ok(Self {
            device,
            filter: filter.clone(),
            report_size: MAX_PACKET_SIZE,
        })
    }

    /// Product name string descriptor.
    pub fn product_string(&self) -> Result<Option<String>> {
        Ok(self.device.get_product_string()?)
    }

    /// Serial number string descriptor.
    pub fn serial_number(&self) -> Result<Option<String>> {
        Ok(self.device.get_serial_number_string()?)
    }

    /// The filter this channel was opened with.
    pub fn filter(&self) -> &DeviceFilter {
        &self.filter
    }
}

impl PacketChannel for HidChannel {
    fn write_packet(&mut self, packet: &[u8]) -> Result<usize> {
        if packet.len() > self.report_size {
            return Err(TransportError::PacketTooLarge {
                size: packet.len(),
                max: self.report_size,
            });
        }

        let mut report = vec![0u8; self.report_size + 1];
        report[0] = REPORT_ID;
        report[1..=packet.len()].copy_from_slice(packet);

        let written = self.device.write(&report)?;
        // Reported count includes the report ID byte.
        Ok(written.saturating_sub(1).min(packet.len()))
    }

    fn read_packet(&mut self, timeout: Duration) -> Result<Bytes> {
        let mut buf = vec![0u8; self.report_size];
        let millis = i32::try_from(timeout.as_millis()).unwrap_or(i32::MAX);
        let read = self.device.read_timeout(&mut buf, millis)?;
        if read == 0 {
            return Err(TransportError::Timeout(timeout));
        }
        buf.truncate(read);
        Ok(Bytes::from(buf))
    }

    fn max_packet_size(&self) -> usize {
        self.report_size
    }
}

impl fmt::Debug for HidChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HidChannel")
            .field("filter", &self.filter)
            .field("report_size", &self.report_size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_targets_prodvk() {
        let filter = DeviceFilter::default();
        assert_eq!(filter.vendor_id, 0x1fc9);
        assert_eq!(filter.product_id, 0x0081);
        assert!(filter.serial.is_none());
    }

    #[test]
    fn filter_without_serial_matches_any_board() {
        let filter = DeviceFilter::default();
        assert!(filter.matches(VENDOR_ID, PRODUCT_ID, None));
        assert!(filter.matches(VENDOR_ID, PRODUCT_ID, Some("A1")));
        assert!(!filter.matches(VENDOR_ID, 0x0082, None));
    }

    #[test]
    fn filter_with_serial_requires_exact_match() {
        let filter = DeviceFilter::default().with_serial("PDVK0042");
        assert!(filter.matches(VENDOR_ID, PRODUCT_ID, Some("PDVK0042")));
        assert!(!filter.matches(VENDOR_ID, PRODUCT_ID, Some("PDVK0043")));
        assert!(!filter.matches(VENDOR_ID, PRODUCT_ID, None));
    }

    #[test]
    fn filter_display() {
        assert_eq!(DeviceFilter::default().to_string(), "VID=0x1FC9 PID=0x0081");
        assert_eq!(
            DeviceFilter::default().with_serial("X9").to_string(),
            "VID=0x1FC9 PID=0x0081 SN=X9"
        );
    }
}
