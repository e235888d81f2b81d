use anyhow::Result;
use clap::Parser;
use flagward::allowlist::Allowlist;
use flagward::cli::{Cli, OutputFormat};
use flagward::invoker::{self, InvocationConfig};
use flagward::json_output::JsonReport;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let allowlist = match &args.allowlist {
        Some(path) => Allowlist::from_file(path)?,
        None => Allowlist::built_in(),
    };
    tracing::debug!(
        source = allowlist.source(),
        arguments = allowlist.len(),
        "loaded allowlist"
    );

    let command = match args.command {
        Some(command) if !command.is_empty() => command,
        _ => anyhow::bail!(
            "Must specify a compiler command. Usage: flagward [OPTIONS] -- COMPILER [ARGS...]"
        ),
    };

    let config = InvocationConfig {
        compiler_args: args.compiler_args,
        warnings_as_errors: args.warnings_as_errors,
        before_hook: args.before_hook,
        after_hook: args.after_hook,
    };

    let outcome = invoker::run(&command, &allowlist, &config)?;

    if matches!(args.format, OutputFormat::Json) {
        let report = JsonReport::from_outcome(&outcome, &allowlist);
        println!("{}", report.to_json()?);
    }

    // Exit with the invocation's resolved exit code
    std::process::exit(outcome.process_exit_code());
}
