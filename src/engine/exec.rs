use std::process::Command;

use anyhow::{Context, Result, bail};

/// Run an external command and capture its stdout, trimmed.
///
/// A spawn failure or a non-zero exit becomes an error carrying the
/// command line, the exit status and whatever the program wrote to stderr.
/// Call sites decide whether that error is fatal or merely logged.
pub(crate) fn run_capture(program: &str, args: &[String]) -> Result<String> {
    tracing::debug!(program, ?args, "running external command");

    let output = Command::new(program)
        .args(args)
        .output()
        .with_context(|| format!("failed to invoke `{program}` (is it installed and on PATH?)"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "`{program} {}` failed ({}): {}",
            args.join(" "),
            output.status,
            stderr.trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
