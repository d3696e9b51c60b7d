//! Typed wrappers for every TESTOP sub-command.
//!
//! Each method packs its arguments little-endian and dispatches one
//! command. Methods that address a radio take the slot explicitly; board
//! commands always go out with [`DeviceSlot::NOT_APPLICABLE`].

use bytes::Bytes;
use prodvk_frame::subcmd::*;
use prodvk_frame::{ArgBuilder, ClockConfig, CommandFrame, DeviceSlot};
use prodvk_transport::PacketChannel;
use tracing::info;

use crate::config::DispatchConfig;
use crate::decode::Decoded;
use crate::dispatcher::Dispatcher;
use crate::error::{DispatchError, Result};
use crate::state::LastValues;
use crate::stats::{self, TestStats};

const NA: DeviceSlot = DeviceSlot::NOT_APPLICABLE;

/// Longest advertising payload the controller accepts.
pub const MAX_ADVERTISING_DATA: usize = 31;

/// Scan parameters, sent as the ASCII text of each field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanParameters {
    pub scan_type: String,
    pub interval: String,
    pub window: String,
    pub address_type: String,
    pub filter_policy: String,
}

impl Default for ScanParameters {
    fn default() -> Self {
        Self {
            scan_type: "00".into(),
            interval: "0004".into(),
            window: "0004".into(),
            address_type: "00".into(),
            filter_policy: "00".into(),
        }
    }
}

/// GPIO register words for `HCI_PROTEST_SET_GPIO`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioConfig {
    pub input: u32,
    pub output: u32,
    pub pullup: u32,
    pub pulldown: u32,
}

impl Default for GpioConfig {
    fn default() -> Self {
        Self {
            input: 0,
            output: 0,
            pullup: 1,
            pulldown: 0,
        }
    }
}

/// A dispatcher plus the values decoded through it.
pub struct Session<C> {
    dispatcher: Dispatcher<C>,
    values: LastValues,
}

impl<C: PacketChannel> Session<C> {
    pub fn new(channel: C) -> Self {
        Self::from_dispatcher(Dispatcher::new(channel))
    }

    pub fn with_config(channel: C, config: DispatchConfig) -> Self {
        Self::from_dispatcher(Dispatcher::with_config(channel, config))
    }

    pub fn from_dispatcher(dispatcher: Dispatcher<C>) -> Self {
        Self {
            dispatcher,
            values: LastValues::default(),
        }
    }

    /// Values decoded so far.
    pub fn values(&self) -> &LastValues {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut LastValues {
        &mut self.values
    }

    pub fn stats(&self) -> &TestStats {
        self.dispatcher.stats()
    }

    /// 0 when every command so far succeeded, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        self.stats().exit_code()
    }

    pub fn dispatcher(&self) -> &Dispatcher<C> {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher<C> {
        &mut self.dispatcher
    }

    /// Consume the session and return the inner channel.
    pub fn into_inner(self) -> C {
        self.dispatcher.into_inner()
    }

    /// Send any sub-command with pre-packed arguments.
    pub fn send(&mut self, subcmd: u8, slot: DeviceSlot, args: impl Into<Bytes>) -> Result<Decoded> {
        self.dispatcher.dispatch(&mut self.values, subcmd, slot, args)
    }

    fn no_args(&mut self, subcmd: u8, slot: DeviceSlot) -> Result<Decoded> {
        self.send(subcmd, slot, Bytes::new())
    }

    fn one_byte(&mut self, subcmd: u8, slot: DeviceSlot, value: u8) -> Result<Decoded> {
        self.send(subcmd, slot, ArgBuilder::new().u8(value).build())
    }

    // Test bookkeeping

    /// Log the start banner for a test. Counters keep running across tests.
    pub fn begin_test(&self, title: &str) {
        info!("{}", stats::header(title));
    }

    /// Log the pass/fail summary for a test and return its exit code.
    pub fn finish_test(&self, title: &str) -> i32 {
        info!("{}", stats::summary(title, self.stats()));
        self.exit_code()
    }

    /// Read and log board, DUT and REF firmware versions.
    pub fn log_firmware_versions(&mut self) -> Result<()> {
        let dut = self.read_dut_version();
        let reference = self.read_ref_version();
        let board = self.read_board_version();
        info!(
            "Board FW Version={} DUT FW Version={} REF FW Version={}",
            self.values.board_version, self.values.dut_version, self.values.ref_version
        );
        dut.and(reference).and(board).map(|_| ())
    }

    // Mode switches and resets

    pub fn switch_to_testop_mode(&mut self) -> Result<Decoded> {
        info!("Switch to TestOp Mode");
        let slot = self.dispatcher.config().default_slot;
        self.no_args(MODESWITCH_TO_TESTOP, slot)
    }

    pub fn switch_to_bridge_mode(&mut self) -> Result<Decoded> {
        info!("Switch to Bridge Mode");
        let slot = self.dispatcher.config().default_slot;
        self.no_args(MODESWITCH_TO_BRIDGE, slot)
    }

    /// Pulse the reset line of one radio.
    pub fn hard_reset(&mut self, slot: DeviceSlot) -> Result<Decoded> {
        self.no_args(RESET_9304, slot)
    }

    /// HCI reset of one radio.
    pub fn soft_reset(&mut self, slot: DeviceSlot) -> Result<Decoded> {
        self.no_args(HCI_RESET, slot)
    }

    /// Soft reset the DUT, then the REF. Both are attempted; the first
    /// failure is returned.
    pub fn reset_devices(&mut self) -> Result<()> {
        let dut = self.soft_reset(DeviceSlot::Dut);
        let reference = self.soft_reset(DeviceSlot::Ref);
        dut.and(reference).map(|_| ())
    }

    /// Hard reset the DUT, then the REF.
    pub fn reset_devices_hard(&mut self) -> Result<()> {
        let dut = self.hard_reset(DeviceSlot::Dut);
        let reference = self.hard_reset(DeviceSlot::Ref);
        dut.and(reference).map(|_| ())
    }

    // Board commands

    pub fn read_board_version(&mut self) -> Result<Decoded> {
        self.no_args(READ_PRODVK_FW_VER, NA)
    }

    pub fn read_board_serial(&mut self) -> Result<Decoded> {
        self.no_args(READ_PRODVK_SN, NA)
    }

    pub fn read_dut_version(&mut self) -> Result<Decoded> {
        self.no_args(READ_DUT_VER, NA)
    }

    pub fn read_ref_version(&mut self) -> Result<Decoded> {
        self.no_args(READ_REF_VER, NA)
    }

    pub fn read_current(&mut self, slot: DeviceSlot) -> Result<Decoded> {
        self.no_args(READ_CURRENT, slot)
    }

    pub fn read_adc(&mut self, slot: DeviceSlot, channel: u8) -> Result<Decoded> {
        self.one_byte(READ_ADC, slot, channel)
    }

    pub fn read_status(&mut self) -> Result<Decoded> {
        self.no_args(READ_STATUS, NA)
    }

    /// Select current range 0, 1 or 2. Other values select range 0.
    pub fn set_current_range(&mut self, range: u8) -> Result<Decoded> {
        let subcmd = match range {
            1 => SET_CURRENT_RANGE_2,
            2 => SET_CURRENT_RANGE_3,
            _ => SET_CURRENT_RANGE_1,
        };
        self.no_args(subcmd, NA)
    }

    pub fn set_ref_clock(&mut self, clock: &ClockConfig) -> Result<Decoded> {
        self.send(SET_REF_CLOCK, NA, clock.encode())
    }

    pub fn execute_xtal_validation(&mut self, max_dut_clocks: u32) -> Result<Decoded> {
        self.send(
            EXEC_XTALVALIDATION,
            NA,
            ArgBuilder::new().u32_le(max_dut_clocks).build(),
        )
    }

    /// Set analog mux `source` to `state`. The source goes in the slot byte.
    pub fn set_mux_state(&mut self, source: u8, state: u8) -> Result<Decoded> {
        let frame = CommandFrame {
            slot: source,
            ..CommandFrame::testop(SET_MUX_STATE, NA, ArgBuilder::new().u8(state).build())
        };
        self.dispatcher.dispatch_frame(&mut self.values, frame)
    }

    /// Current calibration. Only the DUT can be calibrated.
    pub fn execute_current_calibration(&mut self, code: u8) -> Result<Decoded> {
        self.one_byte(EXEC_CALIBRATION, DeviceSlot::Dut, code)
    }

    // Standard HCI and LE commands

    pub fn read_device_version(&mut self, slot: DeviceSlot) -> Result<Decoded> {
        self.no_args(HCI_READ_9304_VER, slot)
    }

    pub fn le_receiver_test(&mut self, slot: DeviceSlot, channel: u8) -> Result<Decoded> {
        self.one_byte(HCI_LE_RECEIVER_TEST, slot, channel)
    }

    pub fn le_transmitter_test(
        &mut self,
        slot: DeviceSlot,
        channel: u8,
        payload_len: u8,
        payload_type: u8,
    ) -> Result<Decoded> {
        let args = ArgBuilder::new()
            .u8(channel)
            .u8(payload_len)
            .u8(payload_type)
            .build();
        self.send(HCI_LE_TRANSMITTER_TEST, slot, args)
    }

    pub fn le_test_end(&mut self, slot: DeviceSlot) -> Result<Decoded> {
        self.no_args(HCI_LE_TEST_END, slot)
    }

    pub fn read_bd_address(&mut self, slot: DeviceSlot) -> Result<Decoded> {
        self.no_args(HCI_READ_BD_ADDR, slot)
    }

    /// Set advertising data: a length byte followed by up to 31 data bytes.
    pub fn le_set_advertising_data(&mut self, slot: DeviceSlot, data: &[u8]) -> Result<Decoded> {
        if data.len() > MAX_ADVERTISING_DATA {
            return Err(DispatchError::BadParams(format!(
                "advertising data is {} bytes (max {MAX_ADVERTISING_DATA})",
                data.len()
            )));
        }
        let args = ArgBuilder::new().u8(data.len() as u8).bytes(data).build();
        self.send(HCI_SET_ADVERTISING_DATA, slot, args)
    }

    pub fn le_set_advertising_parameters(
        &mut self,
        slot: DeviceSlot,
        min_interval: u8,
        max_interval: u8,
        advertising_type: u8,
        channel_map: u8,
    ) -> Result<Decoded> {
        let args = ArgBuilder::new()
            .u8(min_interval)
            .u8(max_interval)
            .u8(advertising_type)
            .u8(channel_map)
            .build();
        self.send(HCI_SET_ADVERTISING_PARAMETERS, slot, args)
    }

    pub fn le_set_advertising_enable(&mut self, slot: DeviceSlot, enable: bool) -> Result<Decoded> {
        self.one_byte(HCI_LE_SET_ADVERTISE_ENABLE, slot, u8::from(enable))
    }

    pub fn le_clear_white_list(&mut self, slot: DeviceSlot) -> Result<Decoded> {
        self.no_args(HCI_LE_CLEAR_WHITE_LIST, slot)
    }

    /// Both fields are sent as ASCII text, e.g. `"00"` and `"0a1b2c3d4e5f"`.
    pub fn le_add_device_to_white_list(
        &mut self,
        slot: DeviceSlot,
        address_type: &str,
        address: &str,
    ) -> Result<Decoded> {
        let args = ArgBuilder::new().ascii(address_type).ascii(address).build();
        self.send(HCI_LE_ADD_DEVICE_TO_WHITE_LIST, slot, args)
    }

    pub fn le_set_scan_parameters(
        &mut self,
        slot: DeviceSlot,
        params: &ScanParameters,
    ) -> Result<Decoded> {
        let args = ArgBuilder::new()
            .ascii(&params.scan_type)
            .ascii(&params.interval)
            .ascii(&params.window)
            .ascii(&params.address_type)
            .ascii(&params.filter_policy)
            .build();
        self.send(HCI_LE_SET_SCAN_PARAMETERS, slot, args)
    }

    pub fn le_set_scan_enable(
        &mut self,
        slot: DeviceSlot,
        enable: bool,
        filter_duplicates: bool,
    ) -> Result<Decoded> {
        let args = ArgBuilder::new()
            .u8(u8::from(enable))
            .u8(u8::from(filter_duplicates))
            .build();
        self.send(HCI_LE_SET_SCAN_ENABLE, slot, args)
    }

    pub fn get_advertising_report(&mut self, slot: DeviceSlot) -> Result<Decoded> {
        self.no_args(HCI_LE_GET_ADVERTISING_REPORT, slot)
    }

    // EM9304 vendor commands

    pub fn em_set_public_address(&mut self, slot: DeviceSlot, address: [u8; 6]) -> Result<Decoded> {
        self.send(HCI_EM_SET_PUBLIC_ADDRESS, slot, address.to_vec())
    }

    pub fn em_set_uart_baud_rate(&mut self, slot: DeviceSlot, rate: u8) -> Result<Decoded> {
        self.one_byte(HCI_EM_SET_UART_BAUD_RATE, slot, rate)
    }

    pub fn em_transmitter_test(
        &mut self,
        slot: DeviceSlot,
        test_mode: u8,
        channel: u8,
        packet_len: u8,
        payload_type: u8,
    ) -> Result<Decoded> {
        let args = ArgBuilder::new()
            .u8(test_mode)
            .u8(channel)
            .u8(packet_len)
            .u8(payload_type)
            .build();
        self.send(HCI_EM_TRANSMITTER_TEST, slot, args)
    }

    pub fn em_transmitter_test_end(&mut self, slot: DeviceSlot) -> Result<Decoded> {
        self.no_args(HCI_EM_TRANSMITTER_TEST_END, slot)
    }

    pub fn em_read_at_address(
        &mut self,
        slot: DeviceSlot,
        address: u32,
        count: u8,
    ) -> Result<Decoded> {
        let args = ArgBuilder::new().u32_le(address).u8(count).build();
        self.send(HCI_EM_READ_AT_ADDRESS, slot, args)
    }

    /// Write `data` starting at `address`. The frame must fit one packet.
    pub fn em_write_at_address(
        &mut self,
        slot: DeviceSlot,
        address: u32,
        data: &[u8],
    ) -> Result<Decoded> {
        let args = ArgBuilder::new().u32_le(address).bytes(data).build();
        self.send(HCI_EM_WRITE_AT_ADDRESS, slot, args)
    }

    pub fn em_set_power_mode(&mut self, slot: DeviceSlot, mode: u8) -> Result<Decoded> {
        self.one_byte(HCI_EM_SET_POWER_MODE_EX, slot, mode)
    }

    pub fn em_set_rf_activity_signal(
        &mut self,
        slot: DeviceSlot,
        enable: u8,
        gpio_output: u8,
    ) -> Result<Decoded> {
        let args = ArgBuilder::new().u8(enable).u8(gpio_output).build();
        self.send(HCI_EM_SET_RF_ACTIVITY_SIGNAL_EX, slot, args)
    }

    pub fn em_set_rf_power_level(&mut self, slot: DeviceSlot, level: u8) -> Result<Decoded> {
        self.one_byte(HCI_EM_SET_RF_POWER_LEVEL_EX, slot, level)
    }

    pub fn em_set_clock_source(&mut self, slot: DeviceSlot, source: u8) -> Result<Decoded> {
        self.one_byte(HCI_EM_SET_CLOCK_SOURCE, slot, source)
    }

    pub fn em_set_memory_mode(&mut self, slot: DeviceSlot, mode: u8) -> Result<Decoded> {
        self.one_byte(HCI_EM_SET_MEMORY_MODE, slot, mode)
    }

    pub fn em_get_memory_usage(&mut self, slot: DeviceSlot) -> Result<Decoded> {
        self.no_args(HCI_EM_GET_MEMORY_USAGE, slot)
    }

    pub fn em_set_sleep_options(&mut self, slot: DeviceSlot, options: u8) -> Result<Decoded> {
        self.one_byte(HCI_EM_SET_SLEEP_OPTIONS, slot, options)
    }

    pub fn em_svld_measurement(&mut self, slot: DeviceSlot) -> Result<Decoded> {
        self.no_args(HCI_EM_SVLD_MEASUREMENT, slot)
    }

    pub fn em_set_event_mask(&mut self, slot: DeviceSlot, mask: u32) -> Result<Decoded> {
        self.send(
            HCI_EM_SET_EVENT_MASK,
            slot,
            ArgBuilder::new().u32_le(mask).build(),
        )
    }

    pub fn em_cpu_reset(&mut self, slot: DeviceSlot) -> Result<Decoded> {
        self.no_args(HCI_EM_CPU_RESET, slot)
    }

    pub fn em_calculate_crc32(&mut self, slot: DeviceSlot, start: u32, end: u32) -> Result<Decoded> {
        let args = ArgBuilder::new().u32_le(start).u32_le(end).build();
        self.send(HCI_EM_CALCULATE_CRC32_EX, slot, args)
    }

    pub fn em_patch_query(&mut self, slot: DeviceSlot, index: u16) -> Result<Decoded> {
        self.send(
            HCI_EM_PATCH_QUERY,
            slot,
            ArgBuilder::new().u16_le(index).build(),
        )
    }

    // Production test commands

    pub fn protest_sleep(&mut self, slot: DeviceSlot) -> Result<Decoded> {
        self.no_args(HCI_PROTEST_SLEEP, slot)
    }

    pub fn protest_active(&mut self, slot: DeviceSlot) -> Result<Decoded> {
        self.no_args(HCI_PROTEST_ACTIVE, slot)
    }

    pub fn protest_tx_start(&mut self, slot: DeviceSlot) -> Result<Decoded> {
        self.no_args(HCI_PROTEST_TXSTART, slot)
    }

    pub fn protest_tx_stop(&mut self, slot: DeviceSlot) -> Result<Decoded> {
        self.no_args(HCI_PROTEST_TXSTOP, slot)
    }

    pub fn protest_rx_start(&mut self, slot: DeviceSlot) -> Result<Decoded> {
        self.no_args(HCI_PROTEST_RXSTART, slot)
    }

    pub fn protest_rx_stop(&mut self, slot: DeviceSlot) -> Result<Decoded> {
        self.no_args(HCI_PROTEST_RXSTOP, slot)
    }

    pub fn protest_hf_xtal_enable(&mut self, slot: DeviceSlot, divider: u8) -> Result<Decoded> {
        self.one_byte(HCI_PROTEST_HF_XTAL_ENABLE, slot, divider)
    }

    pub fn protest_hf_xtal_disable(&mut self, slot: DeviceSlot) -> Result<Decoded> {
        self.no_args(HCI_PROTEST_HF_XTAL_DISABLE, slot)
    }

    pub fn protest_lf_xtal_enable(&mut self, slot: DeviceSlot) -> Result<Decoded> {
        self.no_args(HCI_PROTEST_LF_XTAL_ENABLE, slot)
    }

    pub fn protest_lf_xtal_disable(&mut self, slot: DeviceSlot) -> Result<Decoded> {
        self.no_args(HCI_PROTEST_LF_XTAL_DISABLE, slot)
    }

    pub fn protest_get_svld(&mut self, slot: DeviceSlot) -> Result<Decoded> {
        self.no_args(HCI_PROTEST_GET_SVLD, slot)
    }

    pub fn protest_set_gpio(&mut self, slot: DeviceSlot, gpio: &GpioConfig) -> Result<Decoded> {
        let args = ArgBuilder::new()
            .u32_le(gpio.input)
            .u32_le(gpio.output)
            .u32_le(gpio.pullup)
            .u32_le(gpio.pulldown)
            .build();
        self.send(HCI_PROTEST_SET_GPIO, slot, args)
    }
}

#[cfg(test)]
mod tests {
    use prodvk_transport::ScriptedChannel;

    use super::*;

    fn ok_session() -> Session<ScriptedChannel> {
        let mut channel = ScriptedChannel::new();
        channel.respond_with(|cmd| vec![vec![cmd[0], 0x03, cmd[2], cmd[3], 0x00]]);
        Session::new(channel)
    }

    fn last_written(session: &Session<ScriptedChannel>) -> Vec<u8> {
        session
            .dispatcher()
            .get_ref()
            .last_written()
            .map(|b| b.to_vec())
            .unwrap_or_default()
    }

    #[test]
    fn read_at_address_packs_word_and_count() {
        let mut session = ok_session();
        session
            .em_read_at_address(DeviceSlot::Dut, 0x1000, 4)
            .unwrap();
        assert_eq!(
            last_written(&session),
            vec![0x20, 0x08, 0x60, 0x02, 0x01, 0x00, 0x10, 0x00, 0x00, 0x04]
        );
    }

    #[test]
    fn crc32_packs_two_words() {
        let mut session = ok_session();
        session
            .em_calculate_crc32(DeviceSlot::Ref, 0x2000, 0x3000)
            .unwrap();
        assert_eq!(
            last_written(&session),
            vec![0x20, 0x0B, 0x73, 0x02, 0x00, 0x00, 0x20, 0, 0, 0x00, 0x30, 0, 0]
        );
    }

    #[test]
    fn scan_parameters_are_ascii() {
        let mut session = ok_session();
        session
            .le_set_scan_parameters(DeviceSlot::Ref, &ScanParameters::default())
            .unwrap();
        let written = last_written(&session);
        assert_eq!(&written[5..], b"00000400040000");
    }

    #[test]
    fn advertising_data_prefixed_with_length() {
        let mut session = ok_session();
        session
            .le_set_advertising_data(DeviceSlot::Dut, &[0x02, 0x01, 0x06])
            .unwrap();
        assert_eq!(&last_written(&session)[4..], &[0x01, 0x03, 0x02, 0x01, 0x06]);

        let err = session
            .le_set_advertising_data(DeviceSlot::Dut, &[0u8; 32])
            .unwrap_err();
        assert!(matches!(err, DispatchError::BadParams(_)));
    }

    #[test]
    fn current_range_selects_subcommand() {
        let mut session = ok_session();
        for (range, subcmd) in [
            (0, SET_CURRENT_RANGE_1),
            (1, SET_CURRENT_RANGE_2),
            (2, SET_CURRENT_RANGE_3),
            (9, SET_CURRENT_RANGE_1),
        ] {
            session.set_current_range(range).unwrap();
            let written = last_written(&session);
            assert_eq!(written[2], subcmd);
            assert_eq!(written[4], NA.code());
        }
    }

    #[test]
    fn mux_state_uses_source_as_slot() {
        let mut session = ok_session();
        session.set_mux_state(5, 1).unwrap();
        assert_eq!(
            last_written(&session),
            vec![0x20, 0x04, SET_MUX_STATE, 0x02, 0x05, 0x01]
        );
    }

    #[test]
    fn ref_clock_fills_one_packet() {
        let mut session = ok_session();
        session.set_ref_clock(&ClockConfig::default()).unwrap();
        let written = last_written(&session);
        assert_eq!(written.len(), 59);
        assert_eq!(written[1], 57);
    }

    #[test]
    fn reset_devices_targets_dut_then_ref() {
        let mut session = ok_session();
        session.reset_devices().unwrap();
        let written = session.dispatcher().get_ref().written();
        assert_eq!(written.len(), 2);
        assert_eq!((written[0][2], written[0][4]), (HCI_RESET, 1));
        assert_eq!((written[1][2], written[1][4]), (HCI_RESET, 0));
    }

    #[test]
    fn reset_devices_attempts_both_on_failure() {
        let mut channel = ScriptedChannel::new();
        channel.respond_with(|cmd| vec![vec![cmd[0], 0x03, cmd[2], cmd[3], 0x03]]);
        let mut session = Session::new(channel);

        assert!(session.reset_devices_hard().is_err());
        assert_eq!(session.dispatcher().get_ref().written().len(), 2);
        assert_eq!(session.stats().errors, 2);
        assert_eq!(session.exit_code(), 1);
    }

    #[test]
    fn gpio_defaults_enable_pullup() {
        let mut session = ok_session();
        session
            .protest_set_gpio(DeviceSlot::Dut, &GpioConfig::default())
            .unwrap();
        let written = last_written(&session);
        assert_eq!(written[2], HCI_PROTEST_SET_GPIO);
        assert_eq!(&written[5..], &[0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn begin_test_keeps_counters() {
        let mut channel = ScriptedChannel::new();
        channel.respond_with(|cmd| vec![vec![cmd[0], 0x03, cmd[2], cmd[3], 0x01]]);
        let mut session = Session::new(channel);

        let _ = session.read_status();
        assert_eq!(session.stats().errors, 1);

        session.begin_test("Status");
        assert_eq!(
            *session.stats(),
            TestStats {
                verifications: 1,
                errors: 1
            }
        );
        assert_eq!(session.finish_test("Status"), 1);
    }
}
