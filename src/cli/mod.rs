//! Support code for the `xtypes` demo binary.
//!
//! - [`CliError`]: structured error with a semantic exit code
//! - [`ExitCode`]: exit code constants
//! - [`demo`]: the workload the binary runs

pub mod demo;
pub mod error;
pub mod exit;

pub use demo::{DemoConfig, DemoReport, Task};
pub use error::{CliError, errors};
pub use exit::ExitCode;
