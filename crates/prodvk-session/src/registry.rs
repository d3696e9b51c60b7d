use std::collections::HashMap;

use prodvk_frame::subcmd::*;

use crate::decode::{self, DecodeContext, DecodeError, Decoded};

/// Signature shared by all response decoders.
pub type DecodeFn = fn(&[u8], &DecodeContext) -> Result<Decoded, DecodeError>;

/// Sub-command keyed table of response decoders.
///
/// Sub-commands without an entry decode to a hex dump of their detail, or
/// `"OK"` when there is none.
#[derive(Debug, Clone)]
pub struct DecoderRegistry {
    decoders: HashMap<u8, DecodeFn>,
    context: DecodeContext,
}

impl DecoderRegistry {
    /// Create an empty registry.
    pub fn new(context: DecodeContext) -> Self {
        Self {
            decoders: HashMap::new(),
            context,
        }
    }

    /// Create a registry holding the decoder for every sub-command that
    /// returns structured detail.
    pub fn standard(context: DecodeContext) -> Self {
        let mut registry = Self::new(context);
        let table: &[(u8, DecodeFn)] = &[
            (READ_PRODVK_FW_VER, decode::decode_board_version),
            (READ_PRODVK_SN, decode::decode_board_serial),
            (READ_DUT_VER, decode::decode_dut_version),
            (READ_REF_VER, decode::decode_ref_version),
            (HCI_READ_9304_VER, decode::decode_device_version),
            (READ_CURRENT, decode::decode_current),
            (READ_ADC, decode::decode_current),
            (UNUSED, decode::decode_unused),
            (READ_STATUS, decode::decode_board_status),
            (EXEC_XTALVALIDATION, decode::decode_xtal_validation),
            (EXEC_CALIBRATION, decode::decode_calibration),
            (HCI_LE_TEST_END, decode::decode_test_end),
            (HCI_EM_TRANSMITTER_TEST_END, decode::decode_test_end),
            (HCI_READ_BD_ADDR, decode::decode_bd_address),
            (HCI_LE_GET_ADVERTISING_REPORT, decode::decode_advertising_report),
            (FUNCTEST_CURRENT_SLEEP, decode::decode_text),
            (FUNCTEST_CURRENT_ACTIVE, decode::decode_text),
            (FUNCTEST_CURRENT_RX, decode::decode_text),
            (FUNCTEST_CURRENT_TX, decode::decode_text),
            (FUNCTEST_PER_TX, decode::decode_text),
            (FUNCTEST_PER_RX, decode::decode_text),
            (FUNCTEST_ADVERTISE, decode::decode_text),
            (FUNCTEST_RSSI, decode::decode_text),
            (FUNCTEST_XTAL, decode::decode_text),
            (FUNCTEST_PWR_MODE, decode::decode_text),
            (WRITE_DAC_LTC2633, decode::decode_text),
            (READ_CRC, decode::decode_text),
            (UPLOAD_TO_9304, decode::decode_upload),
            (FUNCTEST_SVLD, decode::decode_test_results),
            (FUNCTEST_READ_RESULTS, decode::decode_test_results),
            (GPIO_READ_DIGITAL_IO, decode::decode_gpio_digital),
            (GPIO_READ_ANALOG_IO, decode::decode_gpio_analog),
            (READ_ADC_MAX11614EEE, decode::decode_adc_channel),
            (HCI_EM_READ_AT_ADDRESS, decode::decode_read_memory),
            (HCI_EM_SET_RF_POWER_LEVEL_EX, decode::decode_rf_power_level),
            (HCI_EM_GET_MEMORY_USAGE, decode::decode_memory_usage),
            (HCI_EM_SVLD_MEASUREMENT, decode::decode_svld),
            (HCI_EM_CALCULATE_CRC32_EX, decode::decode_crc32),
            (HCI_EM_PATCH_QUERY, decode::decode_patch_query),
            (HCI_PROTEST_GET_SVLD, decode::decode_protest_svld),
        ];
        for &(subcmd, decoder) in table {
            registry.register(subcmd, decoder);
        }
        registry
    }

    /// Register (or replace) the decoder for a sub-command.
    pub fn register(&mut self, subcmd: u8, decoder: DecodeFn) {
        self.decoders.insert(subcmd, decoder);
    }

    /// Check if a sub-command has a registered decoder.
    pub fn has_decoder(&self, subcmd: u8) -> bool {
        self.decoders.contains_key(&subcmd)
    }

    /// Sub-commands with registered decoders, ascending.
    pub fn subcmds(&self) -> Vec<u8> {
        let mut subcmds: Vec<u8> = self.decoders.keys().copied().collect();
        subcmds.sort_unstable();
        subcmds
    }

    /// Decode the detail of a successful response to `subcmd`.
    pub fn decode(&self, subcmd: u8, detail: &[u8]) -> Result<Decoded, DecodeError> {
        let decoder = self
            .decoders
            .get(&subcmd)
            .copied()
            .unwrap_or(decode::decode_raw);
        decoder(detail, &self.context)
    }

    /// Scale factors handed to every decoder.
    pub fn context(&self) -> &DecodeContext {
        &self.context
    }
}

impl Default for DecoderRegistry {
    fn default() -> Self {
        Self::standard(DecodeContext::default())
    }
}
