use prodvk_transport::{list_devices, DeviceSummary};
use serde::Serialize;

use crate::cmd::ListArgs;
use crate::exit::{transport_error, CliResult, FAILURE, SUCCESS};
use crate::output::{or_dash, print_json, print_pretty, print_table, OutputFormat, SCHEMA_BASE};

#[derive(Serialize)]
struct BoardEntry {
    vendor_id: String,
    product_id: String,
    serial: Option<String>,
    product: Option<String>,
    path: String,
}

impl From<DeviceSummary> for BoardEntry {
    fn from(device: DeviceSummary) -> Self {
        Self {
            vendor_id: format!("0x{:04x}", device.vendor_id),
            product_id: format!("0x{:04x}", device.product_id),
            serial: device.serial,
            product: device.product,
            path: device.path,
        }
    }
}

#[derive(Serialize)]
struct ListOutput {
    schema_id: String,
    count: usize,
    boards: Vec<BoardEntry>,
}

pub fn run(args: ListArgs, format: OutputFormat) -> CliResult<i32> {
    let devices = list_devices(&args.device.filter())
        .map_err(|err| transport_error("enumerate failed", err))?;

    let out = ListOutput {
        schema_id: format!("{SCHEMA_BASE}/board-list.schema.json"),
        count: devices.len(),
        boards: devices.into_iter().map(BoardEntry::from).collect(),
    };

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => print_table(
            &["VID", "PID", "Serial", "Product", "Path"],
            out.boards
                .iter()
                .map(|b| {
                    vec![
                        b.vendor_id.clone(),
                        b.product_id.clone(),
                        or_dash(b.serial.as_deref()),
                        or_dash(b.product.as_deref()),
                        b.path.clone(),
                    ]
                })
                .collect(),
        ),
        OutputFormat::Raw => {
            for board in &out.boards {
                println!("{}", or_dash(board.serial.as_deref()));
            }
        }
        OutputFormat::Pretty => {
            for (index, board) in out.boards.iter().enumerate() {
                print_pretty(
                    &format!("Board {index}"),
                    &[
                        ("serial", or_dash(board.serial.as_deref())),
                        ("product", or_dash(board.product.as_deref())),
                        ("path", board.path.clone()),
                    ],
                );
            }
        }
    }

    if out.count == 0 {
        Ok(FAILURE)
    } else {
        Ok(SUCCESS)
    }
}
