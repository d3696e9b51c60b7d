use serde::Serialize;

/// Values decoded from the most recent response of each command family.
///
/// Fields keep their last value until a later response overwrites them.
/// Only [`Decoded::apply`](crate::Decoded::apply) writes here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LastValues {
    // Memory usage
    pub memory_pool_size: u32,
    pub retention_memory_used: u32,
    pub non_retention_memory_used: u32,
    pub retention_memory_reserved: u32,

    pub crc32: u32,
    pub read_memory: String,

    // Versions
    pub board_version: String,
    pub board_serial: String,
    pub device_version: String,
    pub dut_version: String,
    pub ref_version: String,

    /// Most recent scaled current/ADC measurement.
    pub adc_measurement: f64,

    // SVLD
    pub svld_power_mode: String,
    pub svld_measurement: String,

    // Patch query
    pub patch_containers: u16,
    pub patch_transfer_count: u16,
    pub patch_state: u32,
    pub patch_address: u32,
    pub patch_size: u32,
    pub patch_crc32: u32,
    pub patch_build_number: u16,
    pub patch_user_build_number: u16,
    pub patch_flags: u8,
    pub patch_version: u8,
    pub patch_type: u8,
    pub patch_id: u8,

    /// Packets counted by the last LE/EM test end.
    pub test_end_packets: u16,
    pub max_rf_power_level: u8,

    // Crystal validation
    pub xtal_ref_tics: u32,
    pub xtal_dut_tics: u32,

    pub bd_address: String,

    // Advertising report
    pub adv_total_events: u32,
    pub adv_min_rssi: i32,
    pub adv_max_rssi: i32,
    pub adv_average_rssi: i32,
    pub adv_last_rssi: i32,

    /// Calibration constants for the 5 mA, 100 µA and 1 µA ranges (µA).
    pub calibration: [f64; 3],

    pub triggered_currents: Vec<f64>,
    pub busy: bool,
    /// Packet error rate in percent.
    pub per: f64,
    /// Crystal deviation in ppm.
    pub ppm: f64,
    pub digital_read: Option<String>,
    pub upload_response: String,

    // Board status
    pub dut_busy: bool,
    pub ref_busy: bool,
    pub dut_command_count: u16,
    pub ref_command_count: u16,
}

impl LastValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop readings collected by triggered-current measurements.
    pub fn clear_triggered_currents(&mut self) {
        self.triggered_currents.clear();
    }
}

impl Default for LastValues {
    fn default() -> Self {
        Self {
            memory_pool_size: 0,
            retention_memory_used: 0,
            non_retention_memory_used: 0,
            retention_memory_reserved: 0,
            crc32: 0,
            read_memory: String::new(),
            board_version: String::new(),
            board_serial: String::new(),
            device_version: String::new(),
            dut_version: String::new(),
            ref_version: String::new(),
            adc_measurement: 0.0,
            svld_power_mode: String::new(),
            svld_measurement: String::new(),
            patch_containers: 0,
            patch_transfer_count: 0,
            patch_state: 0,
            patch_address: 0,
            patch_size: 0,
            patch_crc32: 0,
            patch_build_number: 0,
            patch_user_build_number: 0,
            patch_flags: 0,
            patch_version: 0,
            patch_type: 0,
            patch_id: 0,
            test_end_packets: 0,
            max_rf_power_level: 0,
            xtal_ref_tics: 0,
            xtal_dut_tics: 0,
            bd_address: String::new(),
            adv_total_events: 0,
            adv_min_rssi: 0,
            adv_max_rssi: 0,
            adv_average_rssi: 0,
            adv_last_rssi: 0,
            calibration: [0.0; 3],
            triggered_currents: Vec::new(),
            busy: false,
            per: 100.0,
            ppm: 100_000.0,
            digital_read: None,
            upload_response: String::new(),
            dut_busy: false,
            ref_busy: false,
            dut_command_count: 0,
            ref_command_count: 0,
        }
    }
}
