use prodvk_frame::{subcmd_name, DeviceSlot};
use prodvk_session::Decoded;
use serde::Serialize;

use crate::cmd::SendArgs;
use crate::exit::{dispatch_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_json, print_pretty, print_table, OutputFormat, SCHEMA_BASE};

#[derive(Serialize)]
struct SendOutput {
    schema_id: String,
    subcmd: String,
    name: &'static str,
    slot: &'static str,
    args: String,
    summary: String,
    response: Decoded,
}

pub fn run(args: SendArgs, format: OutputFormat) -> CliResult<i32> {
    // Validate everything before touching the board.
    let subcmd = parse_subcmd(&args.subcmd)?;
    let payload = parse_hex(&args.args)?;
    let slot = DeviceSlot::from(args.slot);

    let (mut session, _identity) = args.device.open()?;
    let decoded = session
        .send(subcmd, slot, payload.clone())
        .map_err(|err| dispatch_error("command failed", err))?;

    let out = SendOutput {
        schema_id: format!("{SCHEMA_BASE}/send-result.schema.json"),
        subcmd: format!("0x{subcmd:02x}"),
        name: subcmd_name(subcmd),
        slot: match slot {
            DeviceSlot::Dut => "dut",
            DeviceSlot::Ref => "ref",
        },
        args: payload.iter().map(|b| format!("{b:02x}")).collect(),
        summary: decoded.to_string(),
        response: decoded,
    };

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => print_table(
            &["Sub-command", "Slot", "Response"],
            vec![vec![
                format!("{} ({})", out.name, out.subcmd),
                out.slot.to_string(),
                out.summary.clone(),
            ]],
        ),
        OutputFormat::Raw => println!("{}", out.summary),
        OutputFormat::Pretty => print_pretty(
            "Response",
            &[
                ("subcmd", format!("{} ({})", out.name, out.subcmd)),
                ("slot", out.slot.to_string()),
                ("summary", out.summary.clone()),
            ],
        ),
    }

    Ok(SUCCESS)
}

/// Accept `0x06`, `06` or a sub-command name such as `read_adc`.
fn parse_subcmd(input: &str) -> CliResult<u8> {
    let input = input.trim();
    let hex = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    if let Ok(code) = u8::from_str_radix(hex, 16) {
        return Ok(code);
    }

    (0..=u8::MAX)
        .find(|&code| {
            let name = subcmd_name(code);
            name != "UNKNOWN" && name.eq_ignore_ascii_case(input)
        })
        .ok_or_else(|| CliError::new(USAGE, format!("unknown sub-command: {input}")))
}

/// Parse argument bytes written as hex pairs, with or without spaces.
fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let digits: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':' && *c != ',')
        .collect();
    if !digits.is_ascii() {
        return Err(CliError::new(USAGE, format!("invalid hex in --args: {input}")));
    }
    if digits.len() % 2 != 0 {
        return Err(CliError::new(
            USAGE,
            format!("odd number of hex digits in --args: {input}"),
        ));
    }

    (0..digits.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| CliError::new(USAGE, format!("invalid hex in --args: {input}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use prodvk_frame::subcmd;

    use super::*;

    #[test]
    fn parse_subcmd_hex_and_name() {
        assert_eq!(parse_subcmd("0x06").unwrap(), subcmd::READ_ADC);
        assert_eq!(parse_subcmd("2c").unwrap(), subcmd::FUNCTEST_READ_RESULTS);
        assert_eq!(parse_subcmd("READ_STATUS").unwrap(), subcmd::READ_STATUS);
        assert_eq!(parse_subcmd("read_status").unwrap(), subcmd::READ_STATUS);
    }

    #[test]
    fn parse_subcmd_rejects_unknown() {
        let err = parse_subcmd("NOT_A_COMMAND").unwrap_err();
        assert_eq!(err.code, USAGE);
        assert!(parse_subcmd("UNKNOWN").is_err());
    }

    #[test]
    fn parse_hex_forms() {
        assert_eq!(parse_hex("").unwrap(), Vec::<u8>::new());
        assert_eq!(parse_hex("00").unwrap(), vec![0x00]);
        assert_eq!(parse_hex("00 10 00 00 04").unwrap(), vec![0, 0x10, 0, 0, 4]);
        assert_eq!(parse_hex("DEADbeef").unwrap(), vec![0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(parse_hex("aa:bb").unwrap(), vec![0xAA, 0xBB]);
    }

    #[test]
    fn parse_hex_rejects_bad_input() {
        assert_eq!(parse_hex("abc").unwrap_err().code, USAGE);
        assert_eq!(parse_hex("zz").unwrap_err().code, USAGE);
    }
}
