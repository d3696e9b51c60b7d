//! TESTOP sub-command codes.
//!
//! Byte 2 of a command frame. Codes below 0x40 are handled by the board
//! firmware itself; 0x40-0x7F wrap EM9304 vendor HCI commands (opcode OR'd
//! with [`HCI_EM_BASE`]); 0x80 and up wrap production-test HCI commands.

// Board commands
/// Board firmware version string.
pub const READ_PRODVK_FW_VER: u8 = 0x01;
/// Board serial number string.
pub const READ_PRODVK_SN: u8 = 0x02;
/// Firmware version of the device under test.
pub const READ_DUT_VER: u8 = 0x03;
/// Firmware version of the reference device.
pub const READ_REF_VER: u8 = 0x04;
/// Supply current measurement.
pub const READ_CURRENT: u8 = 0x05;
/// Raw ADC channel measurement.
pub const READ_ADC: u8 = 0x06;
pub const UNUSED: u8 = 0x07;
/// Enter test-operation mode.
pub const MODESWITCH_TO_TESTOP: u8 = 0x08;
/// Enter HCI bridge mode.
pub const MODESWITCH_TO_BRIDGE: u8 = 0x09;
/// Board busy state and command counters.
pub const READ_STATUS: u8 = 0x0A;
pub const SET_CURRENT_RANGE_1: u8 = 0x0B;
pub const SET_CURRENT_RANGE_2: u8 = 0x0C;
pub const SET_CURRENT_RANGE_3: u8 = 0x0D;
/// Hard reset of one radio.
pub const RESET_9304: u8 = 0x0E;
/// Program the reference clock synthesizer.
pub const SET_REF_CLOCK: u8 = 0x0F;
/// Count crystal ticks on both radios.
pub const EXEC_XTALVALIDATION: u8 = 0x10;
pub const SET_MUX_STATE: u8 = 0x11;
/// Current measurement calibration.
pub const EXEC_CALIBRATION: u8 = 0x12;

// Standard HCI and LE HCI commands
/// HCI_Read_Local_Version_Information.
pub const HCI_READ_9304_VER: u8 = 0x13;
pub const HCI_LE_RECEIVER_TEST: u8 = 0x14;
pub const HCI_LE_TRANSMITTER_TEST: u8 = 0x15;
pub const HCI_LE_TEST_END: u8 = 0x16;
/// Soft reset through HCI_Reset.
pub const HCI_RESET: u8 = 0x17;
pub const HCI_READ_BD_ADDR: u8 = 0x18;
pub const HCI_SET_ADVERTISING_DATA: u8 = 0x19;
pub const HCI_SET_ADVERTISING_PARAMETERS: u8 = 0x1A;
pub const HCI_LE_SET_ADVERTISE_ENABLE: u8 = 0x1B;
pub const HCI_LE_CLEAR_WHITE_LIST: u8 = 0x1C;
pub const HCI_LE_ADD_DEVICE_TO_WHITE_LIST: u8 = 0x1D;
pub const HCI_LE_SET_SCAN_PARAMETERS: u8 = 0x1E;
pub const HCI_LE_SET_SCAN_ENABLE: u8 = 0x1F;
pub const HCI_LE_GET_ADVERTISING_REPORT: u8 = 0x20;

// Functional tests run by the board firmware
pub const FUNCTEST_CURRENT_SLEEP: u8 = 0x21;
pub const FUNCTEST_CURRENT_ACTIVE: u8 = 0x22;
pub const FUNCTEST_CURRENT_RX: u8 = 0x23;
pub const FUNCTEST_CURRENT_TX: u8 = 0x24;
pub const FUNCTEST_PER_TX: u8 = 0x25;
pub const FUNCTEST_PER_RX: u8 = 0x26;
pub const FUNCTEST_ADVERTISE: u8 = 0x27;
pub const FUNCTEST_RSSI: u8 = 0x28;
pub const FUNCTEST_XTAL: u8 = 0x29;
pub const FUNCTEST_PWR_MODE: u8 = 0x2A;
pub const FUNCTEST_SVLD: u8 = 0x2B;
pub const FUNCTEST_READ_RESULTS: u8 = 0x2C;

// GPIO and board peripherals
pub const GPIO_CONFIGURE_IO: u8 = 0x30;
pub const GPIO_SET_IO: u8 = 0x31;
pub const GPIO_READ_DIGITAL_IO: u8 = 0x32;
pub const GPIO_READ_ANALOG_IO: u8 = 0x33;
pub const GPIO_DISABLE_IO_SET: u8 = 0x34;
pub const MEASURE_TRIGGERED_CURRENT: u8 = 0x35;
pub const WRITE_DAC_LTC2633: u8 = 0x36;
pub const READ_ADC_MAX11614EEE: u8 = 0x37;
pub const RESET_ADC_MAX11614EEE: u8 = 0x38;
pub const UPLOAD_TO_9304: u8 = 0x39;
pub const RESET_PRODVK: u8 = 0x3A;
pub const READ_CRC: u8 = 0x3B;

/// Offset applied to EM9304 vendor HCI opcodes.
pub const HCI_EM_BASE: u8 = 0x40;
pub const HCI_EM_SET_PUBLIC_ADDRESS: u8 = HCI_EM_BASE + 0x02;
pub const HCI_EM_SET_UART_BAUD_RATE: u8 = HCI_EM_BASE + 0x07;
pub const HCI_EM_TRANSMITTER_TEST: u8 = HCI_EM_BASE + 0x11;
pub const HCI_EM_TRANSMITTER_TEST_END: u8 = HCI_EM_BASE + 0x12;
pub const HCI_EM_READ_AT_ADDRESS: u8 = HCI_EM_BASE + 0x20;
pub const HCI_EM_READ_CONTINUE: u8 = HCI_EM_BASE + 0x21;
pub const HCI_EM_WRITE_AT_ADDRESS: u8 = HCI_EM_BASE + 0x22;
pub const HCI_EM_WRITE_CONTINUE: u8 = HCI_EM_BASE + 0x23;
pub const HCI_EM_SET_POWER_MODE_EX: u8 = HCI_EM_BASE + 0x24;
pub const HCI_EM_SET_RF_ACTIVITY_SIGNAL_EX: u8 = HCI_EM_BASE + 0x25;
pub const HCI_EM_SET_RF_POWER_LEVEL_EX: u8 = HCI_EM_BASE + 0x26;
pub const HCI_EM_WRITE_PATCH_START: u8 = HCI_EM_BASE + 0x27;
pub const HCI_EM_WRITE_PATCH_CONTINUE: u8 = HCI_EM_BASE + 0x28;
pub const HCI_EM_WRITE_PATCH_ABORT: u8 = HCI_EM_BASE + 0x29;
pub const HCI_EM_SET_CLOCK_SOURCE: u8 = HCI_EM_BASE + 0x2A;
pub const HCI_EM_SET_MEMORY_MODE: u8 = HCI_EM_BASE + 0x2B;
pub const HCI_EM_GET_MEMORY_USAGE: u8 = HCI_EM_BASE + 0x2C;
pub const HCI_EM_SET_SLEEP_OPTIONS: u8 = HCI_EM_BASE + 0x2D;
pub const HCI_EM_SVLD_MEASUREMENT: u8 = HCI_EM_BASE + 0x2E;
pub const HCI_EM_SET_EVENT_MASK: u8 = HCI_EM_BASE + 0x2F;
pub const HCI_EM_CPU_RESET: u8 = HCI_EM_BASE + 0x32;
pub const HCI_EM_CALCULATE_CRC32_EX: u8 = HCI_EM_BASE + 0x33;
pub const HCI_EM_PATCH_QUERY: u8 = HCI_EM_BASE + 0x34;

/// Offset applied to production-test HCI sub-opcodes.
pub const HCI_PROTEST_BASE: u8 = 0x80;
pub const HCI_PROTEST_SLEEP: u8 = HCI_PROTEST_BASE + 0;
pub const HCI_PROTEST_ACTIVE: u8 = HCI_PROTEST_BASE + 1;
pub const HCI_PROTEST_TXSTART: u8 = HCI_PROTEST_BASE + 2;
pub const HCI_PROTEST_TXSTOP: u8 = HCI_PROTEST_BASE + 3;
pub const HCI_PROTEST_RXSTART: u8 = HCI_PROTEST_BASE + 4;
pub const HCI_PROTEST_RXSTOP: u8 = HCI_PROTEST_BASE + 5;
pub const HCI_PROTEST_HF_XTAL_ENABLE: u8 = HCI_PROTEST_BASE + 6;
pub const HCI_PROTEST_HF_XTAL_DISABLE: u8 = HCI_PROTEST_BASE + 7;
pub const HCI_PROTEST_LF_XTAL_ENABLE: u8 = HCI_PROTEST_BASE + 8;
pub const HCI_PROTEST_LF_XTAL_DISABLE: u8 = HCI_PROTEST_BASE + 9;
pub const HCI_PROTEST_GET_SVLD: u8 = HCI_PROTEST_BASE + 10;
pub const HCI_PROTEST_SET_GPIO: u8 = HCI_PROTEST_BASE + 11;

/// Returns the symbolic name of a sub-command, or `"UNKNOWN"`.
pub fn subcmd_name(subcmd: u8) -> &'static str {
    match subcmd {
        READ_PRODVK_FW_VER => "READ_PRODVK_FW_VER",
        READ_PRODVK_SN => "READ_PRODVK_SN",
        READ_DUT_VER => "READ_DUT_VER",
        READ_REF_VER => "READ_REF_VER",
        READ_CURRENT => "READ_CURRENT",
        READ_ADC => "READ_ADC",
        UNUSED => "UNUSED",
        MODESWITCH_TO_TESTOP => "MODESWITCH_TO_TESTOP",
        MODESWITCH_TO_BRIDGE => "MODESWITCH_TO_BRIDGE",
        READ_STATUS => "READ_STATUS",
        SET_CURRENT_RANGE_1 => "SET_CURRENT_RANGE_1",
        SET_CURRENT_RANGE_2 => "SET_CURRENT_RANGE_2",
        SET_CURRENT_RANGE_3 => "SET_CURRENT_RANGE_3",
        RESET_9304 => "RESET_9304",
        SET_REF_CLOCK => "SET_REF_CLOCK",
        EXEC_XTALVALIDATION => "EXEC_XTALVALIDATION",
        SET_MUX_STATE => "SET_MUX_STATE",
        EXEC_CALIBRATION => "EXEC_CALIBRATION",
        HCI_READ_9304_VER => "HCI_READ_9304_VER",
        HCI_LE_RECEIVER_TEST => "HCI_LE_RECEIVER_TEST",
        HCI_LE_TRANSMITTER_TEST => "HCI_LE_TRANSMITTER_TEST",
        HCI_LE_TEST_END => "HCI_LE_TEST_END",
        HCI_RESET => "HCI_RESET",
        HCI_READ_BD_ADDR => "HCI_READ_BD_ADDR",
        HCI_SET_ADVERTISING_DATA => "HCI_SET_ADVERTISING_DATA",
        HCI_SET_ADVERTISING_PARAMETERS => "HCI_SET_ADVERTISING_PARAMETERS",
        HCI_LE_SET_ADVERTISE_ENABLE => "HCI_LE_SET_ADVERTISE_ENABLE",
        HCI_LE_CLEAR_WHITE_LIST => "HCI_LE_CLEAR_WHITE_LIST",
        HCI_LE_ADD_DEVICE_TO_WHITE_LIST => "HCI_LE_ADD_DEVICE_TO_WHITE_LIST",
        HCI_LE_SET_SCAN_PARAMETERS => "HCI_LE_SET_SCAN_PARAMETERS",
        HCI_LE_SET_SCAN_ENABLE => "HCI_LE_SET_SCAN_ENABLE",
        HCI_LE_GET_ADVERTISING_REPORT => "HCI_LE_GET_ADVERTISING_REPORT",
        FUNCTEST_CURRENT_SLEEP => "FUNCTEST_CURRENT_SLEEP",
        FUNCTEST_CURRENT_ACTIVE => "FUNCTEST_CURRENT_ACTIVE",
        FUNCTEST_CURRENT_RX => "FUNCTEST_CURRENT_RX",
        FUNCTEST_CURRENT_TX => "FUNCTEST_CURRENT_TX",
        FUNCTEST_PER_TX => "FUNCTEST_PER_TX",
        FUNCTEST_PER_RX => "FUNCTEST_PER_RX",
        FUNCTEST_ADVERTISE => "FUNCTEST_ADVERTISE",
        FUNCTEST_RSSI => "FUNCTEST_RSSI",
        FUNCTEST_XTAL => "FUNCTEST_XTAL",
        FUNCTEST_PWR_MODE => "FUNCTEST_PWR_MODE",
        FUNCTEST_SVLD => "FUNCTEST_SVLD",
        FUNCTEST_READ_RESULTS => "FUNCTEST_READ_RESULTS",
        GPIO_CONFIGURE_IO => "GPIO_CONFIGURE_IO",
        GPIO_SET_IO => "GPIO_SET_IO",
        GPIO_READ_DIGITAL_IO => "GPIO_READ_DIGITAL_IO",
        GPIO_READ_ANALOG_IO => "GPIO_READ_ANALOG_IO",
        GPIO_DISABLE_IO_SET => "GPIO_DISABLE_IO_SET",
        MEASURE_TRIGGERED_CURRENT => "MEASURE_TRIGGERED_CURRENT",
        WRITE_DAC_LTC2633 => "WRITE_DAC_LTC2633",
        READ_ADC_MAX11614EEE => "READ_ADC_MAX11614EEE",
        RESET_ADC_MAX11614EEE => "RESET_ADC_MAX11614EEE",
        UPLOAD_TO_9304 => "UPLOAD_TO_9304",
        RESET_PRODVK => "RESET_PRODVK",
        READ_CRC => "READ_CRC",
        HCI_EM_SET_PUBLIC_ADDRESS => "HCI_EM_SET_PUBLIC_ADDRESS",
        HCI_EM_SET_UART_BAUD_RATE => "HCI_EM_SET_UART_BAUD_RATE",
        HCI_EM_TRANSMITTER_TEST => "HCI_EM_TRANSMITTER_TEST",
        HCI_EM_TRANSMITTER_TEST_END => "HCI_EM_TRANSMITTER_TEST_END",
        HCI_EM_READ_AT_ADDRESS => "HCI_EM_READ_AT_ADDRESS",
        HCI_EM_READ_CONTINUE => "HCI_EM_READ_CONTINUE",
        HCI_EM_WRITE_AT_ADDRESS => "HCI_EM_WRITE_AT_ADDRESS",
        HCI_EM_WRITE_CONTINUE => "HCI_EM_WRITE_CONTINUE",
        HCI_EM_SET_POWER_MODE_EX => "HCI_EM_SET_POWER_MODE_EX",
        HCI_EM_SET_RF_ACTIVITY_SIGNAL_EX => "HCI_EM_SET_RF_ACTIVITY_SIGNAL_EX",
        HCI_EM_SET_RF_POWER_LEVEL_EX => "HCI_EM_SET_RF_POWER_LEVEL_EX",
        HCI_EM_WRITE_PATCH_START => "HCI_EM_WRITE_PATCH_START",
        HCI_EM_WRITE_PATCH_CONTINUE => "HCI_EM_WRITE_PATCH_CONTINUE",
        HCI_EM_WRITE_PATCH_ABORT => "HCI_EM_WRITE_PATCH_ABORT",
        HCI_EM_SET_CLOCK_SOURCE => "HCI_EM_SET_CLOCK_SOURCE",
        HCI_EM_SET_MEMORY_MODE => "HCI_EM_SET_MEMORY_MODE",
        HCI_EM_GET_MEMORY_USAGE => "HCI_EM_GET_MEMORY_USAGE",
        HCI_EM_SET_SLEEP_OPTIONS => "HCI_EM_SET_SLEEP_OPTIONS",
        HCI_EM_SVLD_MEASUREMENT => "HCI_EM_SVLD_MEASUREMENT",
        HCI_EM_SET_EVENT_MASK => "HCI_EM_SET_EVENT_MASK",
        HCI_EM_CPU_RESET => "HCI_EM_CPU_RESET",
        HCI_EM_CALCULATE_CRC32_EX => "HCI_EM_CALCULATE_CRC32_EX",
        HCI_EM_PATCH_QUERY => "HCI_EM_PATCH_QUERY",
        HCI_PROTEST_SLEEP => "HCI_PROTEST_SLEEP",
        HCI_PROTEST_ACTIVE => "HCI_PROTEST_ACTIVE",
        HCI_PROTEST_TXSTART => "HCI_PROTEST_TXSTART",
        HCI_PROTEST_TXSTOP => "HCI_PROTEST_TXSTOP",
        HCI_PROTEST_RXSTART => "HCI_PROTEST_RXSTART",
        HCI_PROTEST_RXSTOP => "HCI_PROTEST_RXSTOP",
        HCI_PROTEST_HF_XTAL_ENABLE => "HCI_PROTEST_HF_XTAL_ENABLE",
        HCI_PROTEST_HF_XTAL_DISABLE => "HCI_PROTEST_HF_XTAL_DISABLE",
        HCI_PROTEST_LF_XTAL_ENABLE => "HCI_PROTEST_LF_XTAL_ENABLE",
        HCI_PROTEST_LF_XTAL_DISABLE => "HCI_PROTEST_LF_XTAL_DISABLE",
        HCI_PROTEST_GET_SVLD => "HCI_PROTEST_GET_SVLD",
        HCI_PROTEST_SET_GPIO => "HCI_PROTEST_SET_GPIO",
        _ => "UNKNOWN",
    }
}
