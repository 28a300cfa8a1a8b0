//! CLI configuration

use std::path::PathBuf;

use clap::{ArgAction, Args, ValueEnum};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogFormat {
    /// Human-readable single-line output
    #[default]
    Compact,

    /// Structured JSON lines
    Json,
}

/// Settings shared by every subcommand.
#[derive(Debug, Args)]
pub(crate) struct Config {
    /// File the calculator state is kept in
    #[arg(long, global = true, env = "CASHBACC_STATE", default_value = "cashbacc.json")]
    pub(crate) state: PathBuf,

    /// Keep a copy of the best cashback in the state file
    #[arg(
        long,
        global = true,
        env = "CASHBACC_CACHE_DISCOUNT",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub(crate) cache_discount: bool,

    /// Seed for generated providers; random when omitted
    #[arg(long, global = true, env = "CASHBACC_SEED")]
    pub(crate) seed: Option<u64>,

    /// ISO 4217 currency amounts are shown in
    #[arg(long, global = true, env = "CASHBACC_CURRENCY", default_value = "IDR")]
    pub(crate) currency: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "RUST_LOG", default_value = "warn")]
    pub(crate) log_level: String,

    /// Log format
    #[arg(long, global = true, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub(crate) log_format: LogFormat,
}
