//! Error types for the andropy runtime.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while locating, installing, or invoking the bridge tool.
#[derive(Debug, Error)]
pub enum Error {
	/// The bridge executable is not present at its install location.
	#[error("No ADB binary has been found at {}. Please run `andropy install` first.", path.display())]
	ToolNotInstalled { path: PathBuf },

	/// The install directory could not be created.
	#[error("Folder creation failed for {}: {source}", path.display())]
	InstallDirectory {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// A tool download failed (network error, non-success status, or write failure).
	#[error("Download failed for {url}: {reason}")]
	DownloadFailed { url: String, reason: String },

	/// The home directory could not be determined.
	#[error("Could not determine the home directory")]
	HomeDirNotFound,

	/// The bridge process could not be spawned.
	#[error("Failed to launch {program}: {source}")]
	LaunchFailed {
		program: String,
		#[source]
		source: std::io::Error,
	},

	/// The bridge process ran but exited unsuccessfully.
	#[error("`{command}` exited with {status}{}", format_stderr(stderr))]
	CommandFailed {
		command: String,
		status: ExitStatus,
		stderr: String,
	},

	/// I/O error.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

fn format_stderr(stderr: &str) -> String {
	let trimmed = stderr.trim();
	if trimmed.is_empty() {
		String::new()
	} else {
		format!(": {trimmed}")
	}
}

impl Error {
	/// Returns true if this error means the tool still has to be provisioned.
	pub fn is_not_installed(&self) -> bool {
		matches!(self, Error::ToolNotInstalled { .. })
	}
}
