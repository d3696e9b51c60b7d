//! Pure decoders for response detail bytes.
//!
//! A decoder turns the detail of one response into a [`Decoded`] value.
//! Nothing here touches [`LastValues`]; that happens in [`Decoded::apply`]
//! once the dispatcher has accepted the response.

use std::fmt;

use prodvk_frame::subcmd;
use serde::Serialize;

use crate::state::LastValues;

/// ADC reference voltage of the current measurement front end.
const CURRENT_ADC_VREF: f64 = 1.25;
/// Full-scale code of the 22-bit signed current ADC.
const CURRENT_ADC_FULL_SCALE: f64 = 2_097_151.0;
/// Shunt resistor and amplifier gain per current range.
const CURRENT_RANGES: [(f64, f64); 3] = [(47.0, 100.0), (4.7, 1000.0), (0.47, 1000.0)];

/// Scale factors applied while decoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodeContext {
    /// Raw ADC count to current, indexed by channel (channels above 2 use
    /// the last entry).
    pub current_scale: [f64; 3],
    /// Raw calibration count to microamps, one per current range.
    pub calibration_scale: [f64; 3],
}

impl DecodeContext {
    /// Scale a raw current reading taken on `channel`.
    pub fn scale_current(&self, channel: u8, raw: i32) -> f64 {
        let index = usize::from(channel).min(self.current_scale.len() - 1);
        f64::from(raw) * self.current_scale[index]
    }
}

impl Default for DecodeContext {
    fn default() -> Self {
        let lsb = CURRENT_ADC_VREF / CURRENT_ADC_FULL_SCALE;
        Self {
            current_scale: [
                0.000_126_818_453_610_880_04,
                0.001_268_184_536_108_800_2,
                0.012_681_845_361_088,
            ],
            calibration_scale: CURRENT_RANGES.map(|(shunt, gain)| lsb / (shunt * gain) * 1e6),
        }
    }
}

/// Errors raised by decoders.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The detail is shorter than the decoder's fixed layout.
    #[error("{what}: need {need} detail bytes, got {got}")]
    Short {
        what: &'static str,
        need: usize,
        got: usize,
    },
}

/// Power supply configuration reported with an SVLD measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PowerMode {
    StepDown,
    Off,
    StepUp,
    External,
    Invalid(u8),
}

impl PowerMode {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => PowerMode::StepDown,
            1 => PowerMode::Off,
            2 => PowerMode::StepUp,
            3 => PowerMode::External,
            other => PowerMode::Invalid(other),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PowerMode::StepDown => "DCDC Step-Down Configuration",
            PowerMode::Off => "DCDC Off Configuration",
            PowerMode::StepUp => "DCDC Step-Up Configuration",
            PowerMode::External => "External DCDC Configuration",
            PowerMode::Invalid(_) => "Invalid",
        }
    }
}

/// One scaled current measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurrentReading {
    pub channel: u8,
    pub raw: i32,
    pub value: f64,
}

impl fmt::Display for CurrentReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ADCMeasurement CH={}, Current={}", self.channel, self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemoryUsage {
    pub pool_size: u32,
    pub retention_used: u32,
    pub non_retention_used: u32,
    pub retention_reserved: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PatchQuery {
    pub containers: u16,
    pub transfer_count: u16,
    pub state: u32,
    pub address: u32,
    pub size: u32,
    pub crc32: u32,
    pub build_number: u16,
    pub user_build_number: u16,
    pub flags: u8,
    pub version: u8,
    pub patch_type: u8,
    pub id: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdvertisingReport {
    pub total_events: u32,
    pub min_rssi: i32,
    pub max_rssi: i32,
    pub average_rssi: i32,
    pub last_rssi: i32,
}

impl fmt::Display for AdvertisingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ave RSSI:{}, Total Events:{}",
            self.average_rssi, self.total_events
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoardStatus {
    pub dut_busy: bool,
    pub ref_busy: bool,
    pub dut_command_count: u16,
    pub ref_command_count: u16,
}

/// Which version query a hex version string answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VersionSource {
    Dut,
    Ref,
    Device,
}

/// Outcome of a functional test, as read back with `FUNCTEST_READ_RESULTS`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TestResults {
    /// The test is still running.
    Busy,
    Current(CurrentReading),
    PacketErrorRate { sent: u32, received: u32, per: f64 },
    Advertising(AdvertisingReport),
    Xtal { ref_tics: u32, dut_tics: u32, ppm: f64 },
    PowerMode { mode: PowerMode, measurement: String },
    TriggeredCurrent(Vec<CurrentReading>),
    /// Idle, but the result type byte names no known test.
    Other(u8),
}

/// A decoded response detail.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Decoded {
    /// Success with no detail bytes.
    Ok,
    /// Detail of a sub-command without a dedicated decoder.
    Raw(String),
    Unused,
    BoardVersion(String),
    BoardSerial(String),
    HexVersion { source: VersionSource, version: String },
    Current(CurrentReading),
    BoardStatus(BoardStatus),
    XtalTics { ref_tics: u32, dut_tics: u32 },
    Calibration([f64; 3]),
    TestEnd { packets: u16 },
    BdAddress(String),
    AdvertisingReport(AdvertisingReport),
    /// ASCII text returned by a functional test command.
    Text(String),
    Upload(String),
    Results(TestResults),
    GpioDigital(String),
    GpioAnalog(String),
    AdcChannel { channel: u8, millivolts: u16 },
    ReadMemory(String),
    RfPowerLevel(u8),
    MemoryUsage(MemoryUsage),
    Svld { mode: PowerMode, measurement: u8 },
    ProtestSvld(u8),
    Crc32(u32),
    PatchQuery(PatchQuery),
}

impl Decoded {
    /// Record this result in `values`.
    pub fn apply(&self, values: &mut LastValues) {
        match self {
            Decoded::Ok
            | Decoded::Raw(_)
            | Decoded::Unused
            | Decoded::Text(_)
            | Decoded::GpioAnalog(_)
            | Decoded::AdcChannel { .. } => {}
            Decoded::BoardVersion(version) => values.board_version = version.clone(),
            Decoded::BoardSerial(serial) => values.board_serial = serial.clone(),
            Decoded::HexVersion { source, version } => {
                let slot = match source {
                    VersionSource::Dut => &mut values.dut_version,
                    VersionSource::Ref => &mut values.ref_version,
                    VersionSource::Device => &mut values.device_version,
                };
                *slot = version.clone();
            }
            Decoded::Current(reading) => values.adc_measurement = reading.value,
            Decoded::BoardStatus(status) => {
                values.dut_busy = status.dut_busy;
                values.ref_busy = status.ref_busy;
                values.dut_command_count = status.dut_command_count;
                values.ref_command_count = status.ref_command_count;
            }
            Decoded::XtalTics { ref_tics, dut_tics } => {
                values.xtal_ref_tics = *ref_tics;
                values.xtal_dut_tics = *dut_tics;
            }
            Decoded::Calibration(constants) => values.calibration = *constants,
            Decoded::TestEnd { packets } => values.test_end_packets = *packets,
            Decoded::BdAddress(address) => values.bd_address = address.clone(),
            Decoded::AdvertisingReport(report) => {
                values.adv_total_events = report.total_events;
                values.adv_min_rssi = report.min_rssi;
                values.adv_max_rssi = report.max_rssi;
                values.adv_average_rssi = report.average_rssi;
                values.adv_last_rssi = report.last_rssi;
            }
            Decoded::Upload(text) => values.upload_response = text.clone(),
            Decoded::Results(results) => apply_results(results, values),
            Decoded::GpioDigital(text) => values.digital_read = Some(text.clone()),
            Decoded::ReadMemory(dump) => values.read_memory = dump.clone(),
            Decoded::RfPowerLevel(level) => values.max_rf_power_level = *level,
            Decoded::MemoryUsage(usage) => {
                values.memory_pool_size = usage.pool_size;
                values.retention_memory_used = usage.retention_used;
                values.non_retention_memory_used = usage.non_retention_used;
                values.retention_memory_reserved = usage.retention_reserved;
            }
            Decoded::Svld { mode, measurement } => {
                values.svld_power_mode = mode.name().to_string();
                values.svld_measurement = measurement.to_string();
            }
            Decoded::ProtestSvld(measurement) => {
                values.svld_measurement = measurement.to_string();
            }
            Decoded::Crc32(crc) => values.crc32 = *crc,
            Decoded::PatchQuery(query) => {
                values.patch_containers = query.containers;
                values.patch_transfer_count = query.transfer_count;
                values.patch_state = query.state;
                values.patch_address = query.address;
                values.patch_size = query.size;
                values.patch_crc32 = query.crc32;
                values.patch_build_number = query.build_number;
                values.patch_user_build_number = query.user_build_number;
                values.patch_flags = query.flags;
                values.patch_version = query.version;
                values.patch_type = query.patch_type;
                values.patch_id = query.id;
            }
        }
    }
}

fn apply_results(results: &TestResults, values: &mut LastValues) {
    values.busy = matches!(results, TestResults::Busy);
    match results {
        TestResults::Busy | TestResults::Advertising(_) | TestResults::Other(_) => {}
        TestResults::Current(reading) => values.adc_measurement = reading.value,
        TestResults::PacketErrorRate { per, .. } => values.per = *per,
        TestResults::Xtal { ppm, .. } => values.ppm = *ppm,
        TestResults::PowerMode { mode, measurement } => {
            values.svld_power_mode = mode.name().to_string();
            values.svld_measurement = measurement.clone();
        }
        TestResults::TriggeredCurrent(readings) => {
            values
                .triggered_currents
                .extend(readings.iter().map(|reading| reading.value));
            if let Some(last) = readings.last() {
                values.adc_measurement = last.value;
            }
        }
    }
}

impl fmt::Display for TestResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestResults::Busy => f.write_str("ReadResults = 1"),
            TestResults::Other(_) => f.write_str("ReadResults = 0"),
            TestResults::Current(reading) => reading.fmt(f),
            TestResults::PacketErrorRate { per, .. } => write!(f, "Packet error rate ={per}"),
            TestResults::Advertising(report) => report.fmt(f),
            TestResults::Xtal { ppm, .. } => write!(f, "ppm = {ppm:.2}"),
            TestResults::PowerMode { mode, measurement } => write!(
                f,
                "PowerMode={}  SVLDMeasurement={measurement}",
                mode.name()
            ),
            TestResults::TriggeredCurrent(readings) => {
                for reading in readings {
                    write!(f, "\n{reading}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decoded::Ok => f.write_str("OK"),
            Decoded::Raw(dump) => f.write_str(dump),
            Decoded::Unused => f.write_str("Unused command"),
            Decoded::BoardVersion(version) => write!(f, "Version={version}"),
            Decoded::BoardSerial(serial) => write!(f, "BoardSerialNumber={serial}"),
            Decoded::HexVersion { version, .. } => write!(f, "Version={version}"),
            Decoded::Current(reading) => reading.fmt(f),
            Decoded::BoardStatus(status) => write!(
                f,
                "dut_state: {}  ref_state: {}    dut_cmd_cnt:{}    ref_cmd_cnt:{}",
                busy_name(status.dut_busy),
                busy_name(status.ref_busy),
                status.dut_command_count,
                status.ref_command_count
            ),
            Decoded::XtalTics { ref_tics, dut_tics } => write!(
                f,
                "Difference in XTAL tics:{}",
                i64::from(*ref_tics) - i64::from(*dut_tics)
            ),
            Decoded::Calibration([ma5, ua100, ua1]) => {
                write!(f, "5ma:{ma5}, 100uA:{ua100}, 1uA:{ua1}")
            }
            Decoded::TestEnd { packets } => write!(f, "NumberOfPackets={packets}"),
            Decoded::BdAddress(address) => write!(f, "BD Address:{address}"),
            Decoded::AdvertisingReport(report) => report.fmt(f),
            Decoded::Text(text) | Decoded::Upload(text) => f.write_str(text),
            Decoded::Results(results) => results.fmt(f),
            Decoded::GpioDigital(text) => write!(f, "GPIO Digital Read = {text}"),
            Decoded::GpioAnalog(text) => write!(f, "GPIO Analog Read = {text}"),
            Decoded::AdcChannel {
                channel,
                millivolts,
            } => write!(f, "Channel {channel} = {millivolts} millivolts"),
            Decoded::ReadMemory(dump) => write!(f, "ReadMemory={dump}"),
            Decoded::RfPowerLevel(level) => write!(f, "MaxPowerLevel={level}"),
            Decoded::MemoryUsage(usage) => write!(
                f,
                "MemoryPoolSize={}  RetentionMemoryUsed={}  NonRetentionMemoryUsed={}  RetentionMemoryReserved={}",
                usage.pool_size,
                usage.retention_used,
                usage.non_retention_used,
                usage.retention_reserved
            ),
            Decoded::Svld { mode, measurement } => write!(
                f,
                "PowerMode={}  SVLDMeasurement={measurement}",
                mode.name()
            ),
            Decoded::ProtestSvld(measurement) => write!(f, "SVLDMeasurement={measurement}"),
            Decoded::Crc32(crc) => write!(f, "CRC32={crc:#x}"),
            Decoded::PatchQuery(q) => write!(
                f,
                "Containers={} TransferCount={} State={:#x} Addr={:#x} Size={} CRC32={:#x} \
                 BuildNum={} UserBuildNum={} Flags={:02x} Ver={:02x} Type={:02x} ID={:02x}",
                q.containers,
                q.transfer_count,
                q.state,
                q.address,
                q.size,
                q.crc32,
                q.build_number,
                q.user_build_number,
                q.flags,
                q.version,
                q.patch_type,
                q.id
            ),
        }
    }
}

fn busy_name(busy: bool) -> &'static str {
    if busy {
        "BUSY"
    } else {
        "IDLE"
    }
}

type DecodeResult = Result<Decoded, DecodeError>;

fn require<'a>(detail: &'a [u8], need: usize, what: &'static str) -> Result<&'a [u8], DecodeError> {
    if detail.len() < need {
        return Err(DecodeError::Short {
            what,
            need,
            got: detail.len(),
        });
    }
    Ok(detail)
}

fn u16_le(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn u32_le(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

fn i32_le(bytes: &[u8], at: usize) -> i32 {
    i32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

fn u32_be(bytes: &[u8], at: usize) -> u32 {
    u32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Bytes up to the first NUL, one char per byte.
fn ascii(bytes: &[u8]) -> String {
    bytes
        .iter()
        .take_while(|&&b| b != 0)
        .map(|&b| char::from(b))
        .collect()
}

fn hex_compact(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Dump used for sub-commands without a dedicated decoder: `"aa bb "`.
pub fn hex_dump(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x} ")).collect()
}

pub fn decode_raw(detail: &[u8], _ctx: &DecodeContext) -> DecodeResult {
    if detail.is_empty() {
        Ok(Decoded::Ok)
    } else {
        Ok(Decoded::Raw(hex_dump(detail)))
    }
}

pub fn decode_unused(_detail: &[u8], _ctx: &DecodeContext) -> DecodeResult {
    Ok(Decoded::Unused)
}

pub fn decode_board_version(detail: &[u8], _ctx: &DecodeContext) -> DecodeResult {
    Ok(Decoded::BoardVersion(ascii(&detail[..detail.len().min(8)])))
}

pub fn decode_board_serial(detail: &[u8], _ctx: &DecodeContext) -> DecodeResult {
    Ok(Decoded::BoardSerial(ascii(&detail[..detail.len().min(32)])))
}

fn decode_hex_version(detail: &[u8], source: VersionSource) -> DecodeResult {
    let d = require(detail, 8, "version")?;
    Ok(Decoded::HexVersion {
        source,
        version: hex_compact(&d[..8]),
    })
}

pub fn decode_dut_version(detail: &[u8], _ctx: &DecodeContext) -> DecodeResult {
    decode_hex_version(detail, VersionSource::Dut)
}

pub fn decode_ref_version(detail: &[u8], _ctx: &DecodeContext) -> DecodeResult {
    decode_hex_version(detail, VersionSource::Ref)
}

pub fn decode_device_version(detail: &[u8], _ctx: &DecodeContext) -> DecodeResult {
    decode_hex_version(detail, VersionSource::Device)
}

fn current_at(d: &[u8], channel_at: usize, raw_at: usize, ctx: &DecodeContext) -> CurrentReading {
    let channel = d[channel_at];
    let raw = i32_le(d, raw_at);
    CurrentReading {
        channel,
        raw,
        value: ctx.scale_current(channel, raw),
    }
}

pub fn decode_current(detail: &[u8], ctx: &DecodeContext) -> DecodeResult {
    let d = require(detail, 8, "current measurement")?;
    Ok(Decoded::Current(current_at(d, 0, 4, ctx)))
}

pub fn decode_board_status(detail: &[u8], _ctx: &DecodeContext) -> DecodeResult {
    let d = require(detail, 6, "board status")?;
    Ok(Decoded::BoardStatus(BoardStatus {
        dut_busy: d[0] != 0,
        ref_busy: d[1] != 0,
        dut_command_count: u16_le(d, 2),
        ref_command_count: u16_le(d, 4),
    }))
}

pub fn decode_xtal_validation(detail: &[u8], _ctx: &DecodeContext) -> DecodeResult {
    let d = require(detail, 8, "xtal validation")?;
    Ok(Decoded::XtalTics {
        ref_tics: u32_le(d, 0),
        dut_tics: u32_le(d, 4),
    })
}

pub fn decode_calibration(detail: &[u8], ctx: &DecodeContext) -> DecodeResult {
    let d = require(detail, 12, "calibration")?;
    let mut constants = [0.0; 3];
    for (i, constant) in constants.iter_mut().enumerate() {
        *constant = f64::from(i32_le(d, i * 4)) * ctx.calibration_scale[i];
    }
    Ok(Decoded::Calibration(constants))
}

pub fn decode_test_end(detail: &[u8], _ctx: &DecodeContext) -> DecodeResult {
    let d = require(detail, 2, "test end")?;
    Ok(Decoded::TestEnd {
        packets: u16_le(d, 0),
    })
}

pub fn decode_bd_address(detail: &[u8], _ctx: &DecodeContext) -> DecodeResult {
    let d = require(detail, 6, "BD address")?;
    Ok(Decoded::BdAddress(hex_dump(&d[..6])))
}

fn advertising_report(d: &[u8]) -> AdvertisingReport {
    AdvertisingReport {
        total_events: u32_le(d, 0),
        min_rssi: i32_le(d, 4),
        max_rssi: i32_le(d, 8),
        average_rssi: i32_le(d, 12),
        last_rssi: i32_le(d, 16),
    }
}

pub fn decode_advertising_report(detail: &[u8], _ctx: &DecodeContext) -> DecodeResult {
    let d = require(detail, 20, "advertising report")?;
    Ok(Decoded::AdvertisingReport(advertising_report(d)))
}

pub fn decode_text(detail: &[u8], _ctx: &DecodeContext) -> DecodeResult {
    Ok(Decoded::Text(ascii(detail)))
}

pub fn decode_upload(detail: &[u8], _ctx: &DecodeContext) -> DecodeResult {
    Ok(Decoded::Upload(ascii(detail)))
}

pub fn decode_gpio_digital(detail: &[u8], _ctx: &DecodeContext) -> DecodeResult {
    Ok(Decoded::GpioDigital(ascii(detail)))
}

pub fn decode_gpio_analog(detail: &[u8], _ctx: &DecodeContext) -> DecodeResult {
    Ok(Decoded::GpioAnalog(ascii(detail)))
}

pub fn decode_adc_channel(detail: &[u8], _ctx: &DecodeContext) -> DecodeResult {
    let d = require(detail, 3, "ADC channel")?;
    Ok(Decoded::AdcChannel {
        channel: d[0],
        millivolts: u16::from_be_bytes([d[1], d[2]]),
    })
}

pub fn decode_read_memory(detail: &[u8], _ctx: &DecodeContext) -> DecodeResult {
    Ok(Decoded::ReadMemory(hex_dump(detail)))
}

pub fn decode_rf_power_level(detail: &[u8], _ctx: &DecodeContext) -> DecodeResult {
    let d = require(detail, 1, "RF power level")?;
    Ok(Decoded::RfPowerLevel(d[0]))
}

pub fn decode_memory_usage(detail: &[u8], _ctx: &DecodeContext) -> DecodeResult {
    let d = require(detail, 16, "memory usage")?;
    Ok(Decoded::MemoryUsage(MemoryUsage {
        pool_size: u32_le(d, 0),
        retention_used: u32_le(d, 4),
        non_retention_used: u32_le(d, 8),
        retention_reserved: u32_le(d, 12),
    }))
}

pub fn decode_svld(detail: &[u8], _ctx: &DecodeContext) -> DecodeResult {
    let d = require(detail, 2, "SVLD measurement")?;
    Ok(Decoded::Svld {
        mode: PowerMode::from_code(d[0]),
        measurement: d[1],
    })
}

pub fn decode_protest_svld(detail: &[u8], _ctx: &DecodeContext) -> DecodeResult {
    let d = require(detail, 1, "SVLD measurement")?;
    Ok(Decoded::ProtestSvld(d[0]))
}

pub fn decode_crc32(detail: &[u8], _ctx: &DecodeContext) -> DecodeResult {
    let d = require(detail, 4, "CRC32")?;
    Ok(Decoded::Crc32(u32_le(d, 0)))
}

pub fn decode_patch_query(detail: &[u8], _ctx: &DecodeContext) -> DecodeResult {
    let d = require(detail, 28, "patch query")?;
    Ok(Decoded::PatchQuery(PatchQuery {
        containers: u16_le(d, 0),
        transfer_count: u16_le(d, 2),
        state: u32_le(d, 4),
        address: u32_le(d, 8),
        size: u32_le(d, 12),
        crc32: u32_le(d, 16),
        build_number: u16_le(d, 20),
        user_build_number: u16_le(d, 22),
        flags: d[24],
        version: d[25],
        patch_type: d[26],
        id: d[27],
    }))
}

/// Decode a functional test result block.
///
/// Bit 7 of byte 0 flags a test still in progress; otherwise byte 0 names
/// the test whose result follows.
pub fn decode_test_results(detail: &[u8], ctx: &DecodeContext) -> DecodeResult {
    let d = require(detail, 1, "test results")?;
    if d[0] & 0x80 != 0 {
        return Ok(Decoded::Results(TestResults::Busy));
    }

    let results = match d[0] {
        subcmd::FUNCTEST_CURRENT_SLEEP
        | subcmd::FUNCTEST_CURRENT_ACTIVE
        | subcmd::FUNCTEST_CURRENT_RX
        | subcmd::FUNCTEST_CURRENT_TX => {
            let d = require(d, 12, "current test result")?;
            TestResults::Current(current_at(d, 4, 8, ctx))
        }
        subcmd::FUNCTEST_PER_TX | subcmd::FUNCTEST_PER_RX => {
            let d = require(d, 9, "PER test result")?;
            let sent = u32_be(d, 1);
            let received = u32_be(d, 5);
            let per = if sent == 0 {
                100.0
            } else {
                (f64::from(sent) - f64::from(received)) / f64::from(sent) * 100.0
            };
            TestResults::PacketErrorRate {
                sent,
                received,
                per,
            }
        }
        subcmd::FUNCTEST_ADVERTISE | subcmd::FUNCTEST_RSSI => {
            let d = require(d, 20, "RSSI test result")?;
            TestResults::Advertising(advertising_report(d))
        }
        subcmd::FUNCTEST_XTAL => {
            let d = require(d, 12, "XTAL test result")?;
            let ref_tics = u32_le(d, 4);
            let dut_tics = u32_le(d, 8);
            let ppm = if ref_tics == 0 {
                -1.0
            } else {
                (1e6 - f64::from(dut_tics) / f64::from(ref_tics) * 1e6).abs()
            };
            TestResults::Xtal {
                ref_tics,
                dut_tics,
                ppm,
            }
        }
        subcmd::FUNCTEST_PWR_MODE | subcmd::FUNCTEST_SVLD => {
            let d = require(d, 2, "power mode test result")?;
            TestResults::PowerMode {
                mode: PowerMode::from_code(d[1]),
                measurement: ascii(&d[2..d.len().min(10)]),
            }
        }
        subcmd::MEASURE_TRIGGERED_CURRENT => {
            let d = require(d, 2, "triggered current result")?;
            let count = usize::from(d[1]);
            let need = if count == 0 {
                2
            } else {
                (2 + count).max(12 + 4 * count)
            };
            let d = require(d, need, "triggered current result")?;
            let readings = (0..count)
                .map(|x| current_at(d, 2 + x, 12 + 4 * x, ctx))
                .collect();
            TestResults::TriggeredCurrent(readings)
        }
        other => TestResults::Other(other),
    };
    Ok(Decoded::Results(results))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> DecodeContext {
        DecodeContext::default()
    }

    #[test]
    fn current_uses_channel_scale() {
        let mut detail = vec![0u8, 0, 0, 0];
        detail.extend_from_slice(&10_000i32.to_le_bytes());
        let Decoded::Current(reading) = decode_current(&detail, &ctx()).unwrap() else {
            panic!("expected current");
        };
        assert_eq!(reading.channel, 0);
        assert!((reading.value - 1.2682).abs() < 1e-4);
    }

    #[test]
    fn current_signed_boundary() {
        let detail = [2u8, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF];
        let Decoded::Current(reading) = decode_current(&detail, &ctx()).unwrap() else {
            panic!("expected current");
        };
        assert_eq!(reading.raw, -1);
        assert!((reading.value + 0.012_681_845_361_088).abs() < 1e-12);

        let detail = [7u8, 0, 0, 0, 0x00, 0x00, 0x00, 0x80];
        let Decoded::Current(reading) = decode_current(&detail, &ctx()).unwrap() else {
            panic!("expected current");
        };
        assert_eq!(reading.raw, i32::MIN);
    }

    #[test]
    fn short_detail_is_an_error() {
        let err = decode_current(&[0, 0, 0], &ctx()).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Short {
                what: "current measurement",
                need: 8,
                got: 3
            }
        );
        assert!(decode_patch_query(&[0; 27], &ctx()).is_err());
    }

    #[test]
    fn memory_usage_summary() {
        let mut detail = Vec::new();
        for v in [4096u32, 100, 200, 300] {
            detail.extend_from_slice(&v.to_le_bytes());
        }
        let decoded = decode_memory_usage(&detail, &ctx()).unwrap();
        assert_eq!(
            decoded.to_string(),
            "MemoryPoolSize=4096  RetentionMemoryUsed=100  NonRetentionMemoryUsed=200  RetentionMemoryReserved=300"
        );
    }

    #[test]
    fn crc32_renders_prefixed_hex() {
        let decoded = decode_crc32(&0xDEAD_BEEFu32.to_le_bytes(), &ctx()).unwrap();
        assert_eq!(decoded.to_string(), "CRC32=0xdeadbeef");
    }

    #[test]
    fn svld_names_power_mode() {
        let decoded = decode_svld(&[2, 41], &ctx()).unwrap();
        assert_eq!(
            decoded.to_string(),
            "PowerMode=DCDC Step-Up Configuration  SVLDMeasurement=41"
        );
        let decoded = decode_svld(&[9, 0], &ctx()).unwrap();
        assert!(decoded.to_string().starts_with("PowerMode=Invalid"));
    }

    #[test]
    fn hex_version_has_no_spaces() {
        let decoded =
            decode_dut_version(&[0x01, 0x02, 0x03, 0x04, 0xAA, 0xBB, 0xCC, 0xDD], &ctx()).unwrap();
        assert_eq!(decoded.to_string(), "Version=01020304aabbccdd");

        let mut values = LastValues::default();
        decoded.apply(&mut values);
        assert_eq!(values.dut_version, "01020304aabbccdd");
        assert!(values.ref_version.is_empty());
    }

    #[test]
    fn board_version_stops_at_nul() {
        let decoded = decode_board_version(b"1.4.2\0\0\0junk", &ctx()).unwrap();
        assert_eq!(decoded, Decoded::BoardVersion("1.4.2".into()));
    }

    #[test]
    fn xtal_validation_difference_is_signed() {
        let mut detail = 1000u32.to_le_bytes().to_vec();
        detail.extend_from_slice(&1003u32.to_le_bytes());
        let decoded = decode_xtal_validation(&detail, &ctx()).unwrap();
        assert_eq!(decoded.to_string(), "Difference in XTAL tics:-3");
    }

    #[test]
    fn board_status_summary() {
        let decoded = decode_board_status(&[0, 1, 5, 0, 7, 0], &ctx()).unwrap();
        assert_eq!(
            decoded.to_string(),
            "dut_state: IDLE  ref_state: BUSY    dut_cmd_cnt:5    ref_cmd_cnt:7"
        );
    }

    #[test]
    fn calibration_scales_each_range() {
        let mut detail = Vec::new();
        for v in [1000i32, 1000, -1000] {
            detail.extend_from_slice(&v.to_le_bytes());
        }
        let Decoded::Calibration(constants) = decode_calibration(&detail, &ctx()).unwrap() else {
            panic!("expected calibration");
        };
        let lsb = 1.25 / 2_097_151.0;
        assert!((constants[0] - 1000.0 * lsb / 4700.0 * 1e6).abs() < 1e-9);
        assert!((constants[1] - 1000.0 * lsb / 4700.0 * 1e6).abs() < 1e-9);
        assert!(constants[2] < 0.0);
    }

    #[test]
    fn results_busy_flag() {
        let decoded = decode_test_results(&[0x80 | 0x25], &ctx()).unwrap();
        assert_eq!(decoded, Decoded::Results(TestResults::Busy));
        assert_eq!(decoded.to_string(), "ReadResults = 1");

        let mut values = LastValues::default();
        decoded.apply(&mut values);
        assert!(values.busy);
    }

    #[test]
    fn results_packet_error_rate() {
        // sent 200, received 150, both big-endian
        let detail = [0x25, 0, 0, 0, 200, 0, 0, 0, 150];
        let decoded = decode_test_results(&detail, &ctx()).unwrap();
        let mut values = LastValues::default();
        decoded.apply(&mut values);
        assert_eq!(values.per, 25.0);
        assert_eq!(decoded.to_string(), "Packet error rate =25");

        let detail = [0x26, 0, 0, 0, 0, 0, 0, 0, 0];
        let mut values = LastValues {
            per: 3.0,
            ..LastValues::default()
        };
        decode_test_results(&detail, &ctx()).unwrap().apply(&mut values);
        assert_eq!(values.per, 100.0);
    }

    #[test]
    fn results_xtal_ppm() {
        let mut detail = vec![0x29, 0, 0, 0];
        detail.extend_from_slice(&1_000_000u32.to_le_bytes());
        detail.extend_from_slice(&1_000_020u32.to_le_bytes());
        let decoded = decode_test_results(&detail, &ctx()).unwrap();
        assert_eq!(decoded.to_string(), "ppm = 20.00");

        let mut detail = vec![0x29, 0, 0, 0];
        detail.extend_from_slice(&0u32.to_le_bytes());
        detail.extend_from_slice(&5u32.to_le_bytes());
        let mut values = LastValues::default();
        decode_test_results(&detail, &ctx()).unwrap().apply(&mut values);
        assert_eq!(values.ppm, -1.0);
    }

    #[test]
    fn results_power_mode_reads_ascii() {
        let mut detail = vec![0x2A, 0x00];
        detail.extend_from_slice(b"3.01V\0\0\0");
        let decoded = decode_test_results(&detail, &ctx()).unwrap();
        assert_eq!(
            decoded.to_string(),
            "PowerMode=DCDC Step-Down Configuration  SVLDMeasurement=3.01V"
        );
        let mut values = LastValues::default();
        decoded.apply(&mut values);
        assert_eq!(values.svld_measurement, "3.01V");
    }

    #[test]
    fn results_triggered_currents_accumulate() {
        let mut detail = vec![0x35, 2, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0];
        detail.extend_from_slice(&10_000i32.to_le_bytes());
        detail.extend_from_slice(&(-500i32).to_le_bytes());

        let decoded = decode_test_results(&detail, &ctx()).unwrap();
        let mut values = LastValues {
            triggered_currents: vec![9.0],
            ..LastValues::default()
        };
        decoded.apply(&mut values);

        assert_eq!(values.triggered_currents.len(), 3);
        assert!((values.triggered_currents[1] - 1.2682).abs() < 1e-4);
        assert!(values.adc_measurement < 0.0);
        assert_eq!(decoded.to_string().lines().count(), 3);
    }

    #[test]
    fn results_triggered_rejects_missing_readings() {
        let detail = [0x35, 2, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0];
        assert!(decode_test_results(&detail, &ctx()).is_err());
    }

    #[test]
    fn results_triggered_with_no_readings() {
        let decoded = decode_test_results(&[0x35, 0], &ctx()).unwrap();
        assert_eq!(
            decoded,
            Decoded::Results(TestResults::TriggeredCurrent(Vec::new()))
        );

        let mut values = LastValues::default();
        decoded.apply(&mut values);
        assert!(values.triggered_currents.is_empty());
        assert!(!values.busy);
    }

    #[test]
    fn bd_address_and_memory_dump_format() {
        let address = [0x0C, 0xF3, 0xEE, 0x00, 0x11, 0xA2];
        let decoded = decode_bd_address(&address, &ctx()).unwrap();
        assert_eq!(decoded, Decoded::BdAddress("0c f3 ee 00 11 a2 ".into()));

        let dump = decode_read_memory(&[0xDE, 0xAD], &ctx()).unwrap();
        let mut values = LastValues::default();
        dump.apply(&mut values);
        assert_eq!(values.read_memory, "de ad ");
    }

    #[test]
    fn results_unknown_type() {
        let decoded = decode_test_results(&[0x11, 0, 0], &ctx()).unwrap();
        assert_eq!(decoded.to_string(), "ReadResults = 0");
    }

    #[test]
    fn raw_fallback() {
        assert_eq!(decode_raw(&[], &ctx()).unwrap(), Decoded::Ok);
        assert_eq!(
            decode_raw(&[0xAA, 0x0B], &ctx()).unwrap().to_string(),
            "aa 0b "
        );
    }

    #[test]
    fn adc_channel_is_big_endian() {
        let decoded = decode_adc_channel(&[3, 0x01, 0x2C], &ctx()).unwrap();
        assert_eq!(decoded.to_string(), "Channel 3 = 300 millivolts");
    }
}
