use std::path::PathBuf;

use thiserror::Error;

use crate::output::{CommandError, ErrorCode};

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
	/// Invalid configuration value or flag combination.
	#[error("invalid configuration: {0}")]
	Config(String),

	#[error("failed to read config file {}: {source}", path.display())]
	ConfigRead {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error(transparent)]
	Device(#[from] andropy::Error),

	#[error(transparent)]
	Runtime(#[from] andropy_runtime::Error),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

fn classify_runtime_error(err: &andropy_runtime::Error) -> (ErrorCode, Option<serde_json::Value>) {
	use andropy_runtime::Error as E;

	match err {
		E::ToolNotInstalled { path } => (
			ErrorCode::ToolNotInstalled,
			Some(serde_json::json!({ "path": path })),
		),
		E::InstallDirectory { path, .. } => (
			ErrorCode::InstallDirectoryError,
			Some(serde_json::json!({ "path": path })),
		),
		E::DownloadFailed { url, .. } => (
			ErrorCode::DownloadFailed,
			Some(serde_json::json!({ "url": url })),
		),
		E::HomeDirNotFound => (ErrorCode::InstallDirectoryError, None),
		E::LaunchFailed { program, .. } => (
			ErrorCode::CommandFailed,
			Some(serde_json::json!({ "program": program })),
		),
		E::CommandFailed { command, status, .. } => (
			ErrorCode::CommandFailed,
			Some(serde_json::json!({ "command": command, "exitCode": status.code() })),
		),
		E::Io(_) => (ErrorCode::IoError, None),
	}
}

impl CliError {
	/// Convert this error to a CommandError for structured output
	pub fn to_command_error(&self) -> CommandError {
		let (code, details) = match self {
			CliError::Config(_) => (ErrorCode::InvalidInput, None),
			CliError::ConfigRead { path, .. } => (
				ErrorCode::InvalidInput,
				Some(serde_json::json!({ "path": path })),
			),
			CliError::Device(andropy::Error::NoDeviceFound) => (ErrorCode::NoDeviceFound, None),
			CliError::Device(andropy::Error::DeviceDisconnected) => {
				(ErrorCode::DeviceDisconnected, None)
			}
			CliError::Device(andropy::Error::Runtime(err)) | CliError::Runtime(err) => {
				classify_runtime_error(err)
			}
			CliError::Io(_) => (ErrorCode::IoError, None),
			CliError::Json(_) => (ErrorCode::InternalError, None),
		};

		CommandError {
			code,
			message: self.to_string(),
			details,
		}
	}

	/// Process exit code for this error.
	pub fn exit_code(&self) -> i32 {
		self.to_command_error().code.exit_code()
	}
}
