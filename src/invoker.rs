//! Compiler invocation with unsafe-argument filtering
//!
//! Spawns the configured compiler with inherited stdio so its own output
//! passes through unbuffered and in real order, brackets it with the
//! optional lifecycle hooks, and emits the diagnostic decided by the
//! classifier and router.

use anyhow::{Context, Result};
use std::process::{Command, ExitStatus};

use crate::allowlist::Allowlist;
use crate::classifier::{self, Classification};
use crate::router::{self, Diagnostic, Stream};

/// Per-invocation settings consumed by [`run`]
#[derive(Debug, Clone, Default)]
pub struct InvocationConfig {
    /// Extra compiler arguments appended to the command line and classified
    pub compiler_args: Vec<String>,
    /// Treat compiler warnings as errors
    pub warnings_as_errors: bool,
    /// Shell command run before the compiler
    pub before_hook: Option<String>,
    /// Shell command run after a successful compile
    pub after_hook: Option<String>,
}

/// Result of one wrapped compiler invocation
#[derive(Debug, Clone)]
pub struct InvocationOutcome {
    /// Exit code of the wrapped compiler (128 + signo on signal death)
    pub compiler_exit_code: i32,
    pub classification: Classification,
    pub diagnostic: Option<Diagnostic>,
    /// True when the compiler failed or the routed diagnostic escalated
    pub failed: bool,
}

impl InvocationOutcome {
    /// Exit code for the wrapping process: the compiler's own code when it
    /// failed, 1 when only the escalated diagnostic failed the invocation
    pub fn process_exit_code(&self) -> i32 {
        if self.compiler_exit_code != 0 {
            self.compiler_exit_code
        } else if self.failed {
            1
        } else {
            0
        }
    }
}

/// Write a routed diagnostic to its stream: header first, one line per
/// flagged argument, verbatim
pub fn emit_diagnostic(diagnostic: &Diagnostic) {
    match diagnostic.stream {
        Stream::Informational => {
            for line in diagnostic.lines() {
                println!("{}", line);
            }
        }
        Stream::Error => {
            for line in diagnostic.lines() {
                eprintln!("{}", line);
            }
        }
    }
}

/// Run a lifecycle hook command via `sh -c` with inherited stdio
fn run_hook(label: &str, command: &str) -> Result<()> {
    tracing::debug!(hook = label, command, "running lifecycle hook");
    let status = Command::new("sh")
        .arg("-c")
        .arg(command)
        .status()
        .with_context(|| format!("Failed to run {} hook: {}", label, command))?;

    if !status.success() {
        anyhow::bail!("{} hook failed ({}): {}", label, status, command);
    }
    Ok(())
}

/// Map a child exit status to an exit code, signal death as 128 + signo
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    match status.code() {
        Some(code) => code,
        None => 128 + status.signal().unwrap_or(0),
    }
}

/// Run the compiler command with filtering and lifecycle hooks
///
/// Execution order within the invocation: before-hook, routed diagnostic
/// (if any), compiler, after-hook. The after-hook is skipped when the
/// compiler itself exits non-zero, but still runs when only the escalated
/// diagnostic marks the invocation failed, so hook output never depends on
/// the filter's outcome.
pub fn run(
    command: &[String],
    allowlist: &Allowlist,
    config: &InvocationConfig,
) -> Result<InvocationOutcome> {
    if command.is_empty() {
        anyhow::bail!("Command array is empty");
    }

    let classification = classifier::classify(&config.compiler_args, allowlist);
    let diagnostic = router::route(&classification, config.warnings_as_errors);
    tracing::debug!(
        safe = classification.safe.len(),
        flagged = classification.flagged.len(),
        "classified extra compiler arguments"
    );

    if let Some(hook) = &config.before_hook {
        run_hook("before", hook)?;
    }

    if let Some(diagnostic) = &diagnostic {
        emit_diagnostic(diagnostic);
    }

    let program = &command[0];
    let args = &command[1..];
    let status = Command::new(program)
        .args(args)
        .args(&config.compiler_args)
        .status()
        .with_context(|| format!("Failed to run compiler: {}", program))?;
    let compiler_exit_code = exit_code(status);

    if compiler_exit_code == 0 {
        if let Some(hook) = &config.after_hook {
            run_hook("after", hook)?;
        }
    }

    let failed =
        compiler_exit_code != 0 || diagnostic.as_ref().is_some_and(|d| d.causes_failure);

    Ok(InvocationOutcome {
        compiler_exit_code,
        classification,
        diagnostic,
        failed,
    })
}
