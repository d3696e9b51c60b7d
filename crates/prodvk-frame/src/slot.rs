use std::fmt;

/// Which radio on the board a sub-command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceSlot {
    /// Reference EM9304.
    Ref,
    /// EM9304 under test.
    Dut,
}

impl DeviceSlot {
    /// Slot sent when the sub-command does not address a radio.
    pub const NOT_APPLICABLE: DeviceSlot = DeviceSlot::Dut;

    pub const fn code(self) -> u8 {
        match self {
            DeviceSlot::Ref => 0,
            DeviceSlot::Dut => 1,
        }
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(DeviceSlot::Ref),
            1 => Some(DeviceSlot::Dut),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            DeviceSlot::Ref => "REF",
            DeviceSlot::Dut => "DUT",
        }
    }
}

impl fmt::Display for DeviceSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
