//! ContractGuard CLI library.
//!
//! Command-line client for the ContractGuard server: argument parsing,
//! client-side upload checks, the HTTP client and output formatting.

pub mod cli;
pub mod client;
pub mod commands;
pub mod error;
pub mod output;
pub mod validate;

pub use cli::{Cli, CliFormat, Command};
pub use client::ApiClient;
pub use error::{CliError, Result};
pub use output::Formatter;
