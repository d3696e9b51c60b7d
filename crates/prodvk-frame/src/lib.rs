//! TESTOP command and response framing for the ProDVK test board.
//!
//! Every exchange is one command packet followed by one response packet:
//! - Command: class, `3 + len(args)`, sub-command, sequence, device slot, arguments
//! - Response: class, `3 + len(detail)`, sub-command, sequence, error code, detail
//!
//! Frames never span packets, so there is no reassembly and no partial-read
//! handling above the packet channel.

pub mod args;
pub mod codec;
pub mod command;
pub mod error;
pub mod reader;
pub mod slot;
pub mod status;
pub mod subcmd;
pub mod writer;

pub use args::{ArgBuilder, ClockConfig, ClockOutput, PllConfig};
pub use codec::{
    decode_response, encode_command, hex_bytes, CommandFrame, FrameConfig, ResponseFrame,
    UnsolicitedPolicy, DEFAULT_MTU, DEFAULT_RESPONSE_TIMEOUT, HEADER_SIZE, MAX_ARGUMENT_LEN,
};
pub use command::{command_name, TESTOP};
pub use error::{FrameError, Result};
pub use reader::ResponseReader;
pub use slot::DeviceSlot;
pub use status::Status;
pub use subcmd::subcmd_name;
pub use writer::CommandWriter;
