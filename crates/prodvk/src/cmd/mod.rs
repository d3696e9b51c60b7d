use std::time::Duration;

use clap::{Args, Subcommand, ValueEnum};
use prodvk_frame::{DeviceSlot, FrameConfig};
use prodvk_session::{BoardIdentity, DispatchConfig, Session};
use prodvk_transport::{DeviceFilter, HidChannel, PRODUCT_ID, VENDOR_ID};

use crate::exit::{dispatch_error, CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod info;
pub mod list;
pub mod send;
pub mod status;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List attached boards.
    List(ListArgs),
    /// Connect and print board and radio versions.
    Info(InfoArgs),
    /// Send one TESTOP sub-command and print the decoded response.
    Send(SendArgs),
    /// Read board busy state and command counters.
    Status(StatusArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::List(args) => list::run(args, format),
        Command::Info(args) => info::run(args, format),
        Command::Send(args) => send::run(args, format),
        Command::Status(args) => status::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Which board to open and how long to wait for each response.
#[derive(Args, Debug, Clone)]
pub struct DeviceArgs {
    /// USB vendor ID (hex with 0x prefix, or decimal).
    #[arg(long, env = "PRODVK_VID", default_value = "0x1fc9", value_parser = parse_id)]
    pub vid: u16,
    /// USB product ID (hex with 0x prefix, or decimal).
    #[arg(long, env = "PRODVK_PID", default_value = "0x0081", value_parser = parse_id)]
    pub pid: u16,
    /// Only open the board with this serial number.
    #[arg(long, env = "PRODVK_SERIAL")]
    pub serial: Option<String>,
    /// Response timeout (e.g. 6s, 500ms).
    #[arg(long, env = "PRODVK_TIMEOUT", default_value = "6s")]
    pub timeout: String,
}

impl DeviceArgs {
    pub fn filter(&self) -> DeviceFilter {
        DeviceFilter {
            vendor_id: self.vid,
            product_id: self.pid,
            serial: self.serial.clone(),
        }
    }

    pub fn dispatch_config(&self) -> CliResult<DispatchConfig> {
        Ok(DispatchConfig {
            frame: FrameConfig {
                read_timeout: parse_duration(&self.timeout)?,
                ..FrameConfig::default()
            },
            ..DispatchConfig::default()
        })
    }

    /// Open the board and switch it to TestOp mode.
    pub fn open(&self) -> CliResult<(Session<HidChannel>, BoardIdentity)> {
        let config = self.dispatch_config()?;
        Session::open_with_config(&self.filter(), config)
            .map_err(|err| dispatch_error("connect failed", err))
    }
}

impl Default for DeviceArgs {
    fn default() -> Self {
        Self {
            vid: VENDOR_ID,
            pid: PRODUCT_ID,
            serial: None,
            timeout: "6s".to_string(),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
pub enum SlotArg {
    Ref,
    #[default]
    Dut,
}

impl From<SlotArg> for DeviceSlot {
    fn from(slot: SlotArg) -> Self {
        match slot {
            SlotArg::Ref => DeviceSlot::Ref,
            SlotArg::Dut => DeviceSlot::Dut,
        }
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub device: DeviceArgs,
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    pub device: DeviceArgs,
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Sub-command code (e.g. 0x06) or name (e.g. READ_ADC).
    pub subcmd: String,
    /// Target radio.
    #[arg(long, value_enum, default_value = "dut")]
    pub slot: SlotArg,
    /// Argument bytes as hex (e.g. "00" or "00 10 00 00 04").
    #[arg(long, default_value = "")]
    pub args: String,
    #[command(flatten)]
    pub device: DeviceArgs,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub device: DeviceArgs,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Parse a USB ID given as `0x1fc9` or `8137`.
fn parse_id(input: &str) -> Result<u16, String> {
    let input = input.trim();
    let parsed = match input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => input.parse(),
    };
    parsed.map_err(|_| format!("invalid USB id: {input}"))
}

pub fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        _ => Ok(Duration::from_secs(value)),
    }
}
