//! Session layer for the ProDVK production-test board.
//!
//! A [`Session`] owns a [`Dispatcher`] and the [`LastValues`] it fills in.
//! Each command goes out as one TESTOP frame, waits for one response, and
//! the response detail is decoded by the [`DecoderRegistry`] entry for its
//! sub-command.
//!
//! # Example
//!
//! ```
//! use prodvk_frame::DeviceSlot;
//! use prodvk_session::Session;
//! use prodvk_transport::ScriptedChannel;
//!
//! let mut channel = ScriptedChannel::new();
//! channel.respond_with(|cmd| {
//!     // READ_ADC, channel 0, raw 10000
//!     let mut reply = vec![0x20, 0x0B, cmd[2], cmd[3], 0x00, 0, 0, 0, 0];
//!     reply.extend_from_slice(&10_000i32.to_le_bytes());
//!     vec![reply]
//! });
//!
//! let mut session = Session::new(channel);
//! session.read_adc(DeviceSlot::Dut, 0).unwrap();
//! assert!((session.values().adc_measurement - 1.2682).abs() < 1e-4);
//! ```

pub mod commands;
pub mod config;
#[cfg(feature = "hid")]
pub mod connector;
pub mod decode;
pub mod dispatcher;
pub mod error;
pub mod registry;
pub mod state;
pub mod stats;

pub use commands::{GpioConfig, ScanParameters, Session, MAX_ADVERTISING_DATA};
#[cfg(feature = "hid")]
pub use connector::BoardIdentity;
pub use config::DispatchConfig;
pub use decode::{DecodeContext, DecodeError, Decoded};
pub use dispatcher::Dispatcher;
pub use error::{DispatchError, Result};
pub use registry::{DecodeFn, DecoderRegistry};
pub use state::LastValues;
pub use stats::TestStats;
