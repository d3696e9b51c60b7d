use serde::Serialize;

use crate::cmd::StatusArgs;
use crate::exit::{dispatch_error, CliResult, SUCCESS};
use crate::output::{print_json, print_pretty, print_table, OutputFormat, SCHEMA_BASE};

#[derive(Serialize)]
struct StatusOutput {
    schema_id: String,
    dut_busy: bool,
    ref_busy: bool,
    dut_command_count: u16,
    ref_command_count: u16,
}

pub fn run(args: StatusArgs, format: OutputFormat) -> CliResult<i32> {
    let (mut session, _identity) = args.device.open()?;
    session
        .read_status()
        .map_err(|err| dispatch_error("status query failed", err))?;

    let values = session.values();
    let out = StatusOutput {
        schema_id: format!("{SCHEMA_BASE}/board-status.schema.json"),
        dut_busy: values.dut_busy,
        ref_busy: values.ref_busy,
        dut_command_count: values.dut_command_count,
        ref_command_count: values.ref_command_count,
    };

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => print_table(
            &["Device", "Busy", "Commands"],
            vec![
                vec![
                    "DUT".to_string(),
                    out.dut_busy.to_string(),
                    out.dut_command_count.to_string(),
                ],
                vec![
                    "REF".to_string(),
                    out.ref_busy.to_string(),
                    out.ref_command_count.to_string(),
                ],
            ],
        ),
        OutputFormat::Raw => println!(
            "{} {} {} {}",
            u8::from(out.dut_busy),
            u8::from(out.ref_busy),
            out.dut_command_count,
            out.ref_command_count
        ),
        OutputFormat::Pretty => print_pretty(
            "Status",
            &[
                ("dut busy", out.dut_busy.to_string()),
                ("dut commands", out.dut_command_count.to_string()),
                ("ref busy", out.ref_busy.to_string()),
                ("ref commands", out.ref_command_count.to_string()),
            ],
        ),
    }

    Ok(SUCCESS)
}
