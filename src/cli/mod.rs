//! CLI command handlers.
//!
//! Each subcommand parses its arguments with clap and reports failures as a
//! [`CliError`](common::CliError) mapped to a process exit code.

pub mod build;
pub mod common;
pub mod view;

pub use build::BuildArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use view::{ViewArgs, ViewKind};
