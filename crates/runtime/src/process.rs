//! Blocking invocation of the bridge executable.

use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Captured output of a successful bridge invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeOutput {
	pub stdout: String,
	pub stderr: String,
}

/// Run the bridge with `args`, wait for it, and capture its output.
///
/// Output is decoded lossily as UTF-8.
///
/// # Errors
///
/// Returns [`Error::LaunchFailed`] if the process cannot be spawned and
/// [`Error::CommandFailed`] if it exits unsuccessfully.
pub fn run_bridge<S: AsRef<str>>(exe: &Path, args: &[S]) -> Result<BridgeOutput> {
	let command = describe(exe, args);
	debug!(target = "andropy", %command, "running bridge command");

	let output = Command::new(exe)
		.args(args.iter().map(AsRef::as_ref))
		.stdin(Stdio::null())
		.output()
		.map_err(|source| Error::LaunchFailed {
			program: exe.display().to_string(),
			source,
		})?;

	let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
	let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

	if !output.status.success() {
		return Err(Error::CommandFailed {
			command,
			status: output.status,
			stderr,
		});
	}

	Ok(BridgeOutput { stdout, stderr })
}

/// Run the bridge with its output discarded and return the exit status.
///
/// # Errors
///
/// Returns [`Error::LaunchFailed`] if the process cannot be spawned.
pub fn run_bridge_status<S: AsRef<str>>(exe: &Path, args: &[S]) -> Result<ExitStatus> {
	let command = describe(exe, args);
	debug!(target = "andropy", %command, "running bridge command");

	let status = Command::new(exe)
		.args(args.iter().map(AsRef::as_ref))
		.stdin(Stdio::null())
		.stdout(Stdio::null())
		.stderr(Stdio::null())
		.status()
		.map_err(|source| Error::LaunchFailed {
			program: exe.display().to_string(),
			source,
		})?;

	if !status.success() {
		warn!(target = "andropy", %command, %status, "bridge command exited unsuccessfully");
	}
	Ok(status)
}

/// Run the bridge and ignore its output and exit status.
///
/// Returns whether the process ran to a successful exit. Failures are logged.
pub fn run_bridge_best_effort<S: AsRef<str>>(exe: &Path, args: &[S]) -> bool {
	match run_bridge_status(exe, args) {
		Ok(status) => status.success(),
		Err(e) => {
			warn!(target = "andropy", error = %e, "failed to launch bridge command");
			false
		}
	}
}

fn describe<S: AsRef<str>>(exe: &Path, args: &[S]) -> String {
	let mut parts = vec![exe.display().to_string()];
	parts.extend(args.iter().map(|arg| arg.as_ref().to_string()));
	parts.join(" ")
}
