//! CLI argument parsing for Flagward

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the invocation report
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    Text,
    /// JSON report for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "flagward")]
#[command(version)]
#[command(about = "Compiler wrapper that filters unsafe internal compiler argument warnings", long_about = None)]
pub struct Cli {
    /// Extra compiler argument, appended to the compiler command line and
    /// checked against the allowlist (repeatable)
    #[arg(short = 'X', long = "compiler-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub compiler_args: Vec<String>,

    /// Treat compiler warnings as errors (escalates the unsafe-argument
    /// warning and fails the invocation)
    #[arg(short = 'W', long = "warnings-as-errors")]
    pub warnings_as_errors: bool,

    /// TOML file of known-safe experimental arguments (built-in defaults
    /// when omitted)
    #[arg(long = "allowlist", value_name = "FILE")]
    pub allowlist: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Shell command to run before the compiler
    #[arg(long = "before", value_name = "CMD")]
    pub before_hook: Option<String>,

    /// Shell command to run after a successful compile
    #[arg(long = "after", value_name = "CMD")]
    pub after_hook: Option<String>,

    /// Enable debug tracing output
    #[arg(long = "debug")]
    pub debug: bool,

    /// Compiler command to run (everything after --)
    #[arg(last = true)]
    pub command: Option<Vec<String>>,
}
