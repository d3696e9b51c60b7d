use prodvk_frame::DeviceSlot;
use serde::Serialize;

use crate::cmd::InfoArgs;
use crate::exit::{dispatch_error, CliResult, SUCCESS};
use crate::output::{or_dash, print_json, print_pretty, print_table, OutputFormat, SCHEMA_BASE};

#[derive(Serialize)]
struct InfoOutput {
    schema_id: String,
    product: Option<String>,
    usb_serial: Option<String>,
    board_serial: String,
    board_version: String,
    dut_version: String,
    ref_version: String,
    device_version: String,
    connected: bool,
}

pub fn run(args: InfoArgs, format: OutputFormat) -> CliResult<i32> {
    let (mut session, identity) = args.device.open()?;

    session
        .log_firmware_versions()
        .map_err(|err| dispatch_error("version query failed", err))?;
    session
        .read_board_serial()
        .map_err(|err| dispatch_error("serial query failed", err))?;
    session
        .read_device_version(DeviceSlot::Dut)
        .map_err(|err| dispatch_error("device version query failed", err))?;

    let values = session.values();
    let out = InfoOutput {
        schema_id: format!("{SCHEMA_BASE}/board-info.schema.json"),
        product: identity.product,
        usb_serial: identity.serial,
        board_serial: values.board_serial.clone(),
        board_version: values.board_version.clone(),
        dut_version: values.dut_version.clone(),
        ref_version: values.ref_version.clone(),
        device_version: values.device_version.clone(),
        connected: true,
    };

    let fields = [
        ("product", or_dash(out.product.as_deref())),
        ("usb serial", or_dash(out.usb_serial.as_deref())),
        ("board serial", out.board_serial.clone()),
        ("board fw", out.board_version.clone()),
        ("dut fw", out.dut_version.clone()),
        ("ref fw", out.ref_version.clone()),
        ("device", out.device_version.clone()),
    ];

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => print_table(
            &["Field", "Value"],
            fields
                .iter()
                .map(|(k, v)| vec![(*k).to_string(), v.clone()])
                .collect(),
        ),
        OutputFormat::Pretty => print_pretty("Board", &fields),
        OutputFormat::Raw => {
            for (_, value) in &fields {
                println!("{value}");
            }
        }
    }

    Ok(SUCCESS)
}
