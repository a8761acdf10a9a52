//! Structured output envelope for all CLI commands.
//!
//! ## Output Contract
//!
//! Every command produces a result envelope on stdout:
//!
//! ```json
//! {
//!   "schemaVersion": 1,
//!   "ok": true,
//!   "command": "devices",
//!   "data": { "count": 1, "devices": ["ABCDEF012345"] },
//!   "timings": { "durationMs": 42 }
//! }
//! ```
//!
//! On failure:
//!
//! ```json
//! {
//!   "ok": false,
//!   "command": "shell",
//!   "error": {
//!     "code": "DEVICE_DISCONNECTED",
//!     "message": "Error connecting to device! The device is no longer connected."
//!   }
//! }
//! ```


use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use andropy::DeviceId;
use serde::{Deserialize, Serialize};

/// Current schema version for command output.
///
/// Increment this when making breaking changes to the output structure.
pub const SCHEMA_VERSION: u32 = 1;

/// Output format for CLI results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
	/// TOON output (default, compact)
	#[default]
	Toon,
	/// JSON output
	Json,
	/// Newline-delimited JSON
	Ndjson,
	/// Human-readable text
	Text,
}

impl std::fmt::Display for OutputFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			OutputFormat::Toon => write!(f, "toon"),
			OutputFormat::Json => write!(f, "json"),
			OutputFormat::Ndjson => write!(f, "ndjson"),
			OutputFormat::Text => write!(f, "text"),
		}
	}
}

/// The result envelope returned by all commands.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult<T: Serialize> {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub schema_version: Option<u32>,

	/// Whether the command succeeded
	pub ok: bool,

	/// Command name (e.g., "devices", "shell", "install")
	pub command: String,

	/// Command-specific result data (only present on success)
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<T>,

	/// Error information (only present on failure)
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<CommandError>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub timings: Option<Timings>,

	/// Warnings and notes produced while running the command
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub diagnostics: Vec<Diagnostic>,
}

/// Error information for failed commands
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
	pub code: ErrorCode,

	/// Human-readable error message
	pub message: String,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<serde_json::Value>,
}

/// Standardized error codes for programmatic handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
	/// adb has not been provisioned
	ToolNotInstalled,
	/// No ready device when the session was entered
	NoDeviceFound,
	/// The device disappeared during the session
	DeviceDisconnected,
	/// The install directory could not be created
	InstallDirectoryError,
	/// A tool download failed
	DownloadFailed,
	/// adb could not be launched or exited unsuccessfully
	CommandFailed,
	/// File I/O error
	IoError,
	/// Invalid input or configuration
	InvalidInput,
	/// Unknown/internal error
	InternalError,
}

impl ErrorCode {
	/// Process exit code for this error kind.
	pub fn exit_code(self) -> i32 {
		match self {
			ErrorCode::InternalError | ErrorCode::IoError | ErrorCode::CommandFailed => 1,
			ErrorCode::InvalidInput => 2,
			ErrorCode::ToolNotInstalled => 3,
			ErrorCode::NoDeviceFound => 4,
			ErrorCode::DeviceDisconnected => 5,
			ErrorCode::InstallDirectoryError => 6,
			ErrorCode::DownloadFailed => 7,
		}
	}
}

impl std::fmt::Display for ErrorCode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ErrorCode::ToolNotInstalled => write!(f, "TOOL_NOT_INSTALLED"),
			ErrorCode::NoDeviceFound => write!(f, "NO_DEVICE_FOUND"),
			ErrorCode::DeviceDisconnected => write!(f, "DEVICE_DISCONNECTED"),
			ErrorCode::InstallDirectoryError => write!(f, "INSTALL_DIRECTORY_ERROR"),
			ErrorCode::DownloadFailed => write!(f, "DOWNLOAD_FAILED"),
			ErrorCode::CommandFailed => write!(f, "COMMAND_FAILED"),
			ErrorCode::IoError => write!(f, "IO_ERROR"),
			ErrorCode::InvalidInput => write!(f, "INVALID_INPUT"),
			ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
		}
	}
}

/// Timing information for the command
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timings {
	/// Total duration in milliseconds
	pub duration_ms: u64,
}

impl From<Duration> for Timings {
	fn from(duration: Duration) -> Self {
		Timings {
			duration_ms: duration.as_millis() as u64,
		}
	}
}

/// Diagnostic messages (warnings, info, etc.)
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
	pub level: DiagnosticLevel,
	pub message: String,
}

/// Diagnostic severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
	Warning,
}

/// Builder for constructing command results
pub struct ResultBuilder<T: Serialize> {
	command: String,
	data: Option<T>,
	error: Option<CommandError>,
	start_time: Instant,
	timings: Option<Timings>,
	diagnostics: Vec<Diagnostic>,
}

impl<T: Serialize> ResultBuilder<T> {
	pub fn new(command: impl Into<String>) -> Self {
		Self {
			command: command.into(),
			data: None,
			error: None,
			start_time: Instant::now(),
			timings: None,
			diagnostics: Vec::new(),
		}
	}

	/// Set the successful result data
	pub fn data(mut self, data: T) -> Self {
		self.data = Some(data);
		self
	}

	/// Set a fully built error
	pub fn error_with(mut self, error: CommandError) -> Self {
		self.error = Some(error);
		self
	}

	/// Override timings (if not using automatic timing from start_time)
	pub fn timings(mut self, timings: Timings) -> Self {
		self.timings = Some(timings);
		self
	}

	/// Add a diagnostic
	pub fn diagnostic(mut self, level: DiagnosticLevel, message: impl Into<String>) -> Self {
		self.diagnostics.push(Diagnostic {
			level,
			message: message.into(),
		});
		self
	}

	/// Build the final result
	pub fn build(self) -> CommandResult<T> {
		let ok = self.error.is_none() && self.data.is_some();

		CommandResult {
			schema_version: Some(SCHEMA_VERSION),
			ok,
			command: self.command,
			data: self.data,
			error: self.error,
			timings: Some(
				self.timings
					.unwrap_or_else(|| Timings::from(self.start_time.elapsed())),
			),
			diagnostics: self.diagnostics,
		}
	}
}

/// Print a command result to stdout in the specified format
pub fn print_result<T: Serialize>(result: &CommandResult<T>, format: OutputFormat) {
	match format {
		OutputFormat::Toon => {
			if let Ok(json_value) = serde_json::to_value(result) {
				println!("{}", toon::encode(&json_value, None));
			}
		}
		OutputFormat::Json => {
			if let Ok(json) = serde_json::to_string_pretty(result) {
				println!("{json}");
			}
		}
		OutputFormat::Ndjson => {
			if let Ok(json) = serde_json::to_string(result) {
				println!("{json}");
			}
		}
		OutputFormat::Text => {
			print_result_text(result);
		}
	}
}

/// Print a command result in human-readable text format
fn print_result_text<T: Serialize>(result: &CommandResult<T>) {
	let mut stdout = io::stdout().lock();
	let _ = write_result_text(&mut stdout, result);
}

fn write_result_text<T: Serialize>(out: &mut impl Write, result: &CommandResult<T>) -> io::Result<()> {
	if result.ok {
		if let Some(ref data) = result.data {
			if let Ok(value) = serde_json::to_value(data) {
				write_text_value(out, &value)?;
			}
		}
	} else if let Some(ref error) = result.error {
		writeln!(out, "Error [{}]: {}", error.code, error.message)?;
	}

	for diag in &result.diagnostics {
		let prefix = match diag.level {
			DiagnosticLevel::Warning => "warning",
		};
		writeln!(out, "[{prefix}] {}", diag.message)?;
	}
	Ok(())
}

/// Plain rendering: bare lines for string lists, `key: value` for objects.
fn write_text_value(out: &mut impl Write, value: &serde_json::Value) -> io::Result<()> {
	use serde_json::Value;

	match value {
		Value::Object(map) => {
			for (key, value) in map {
				match value {
					Value::Array(items) => {
						writeln!(out, "{key}:")?;
						for item in items {
							writeln!(out, "  {}", scalar_text(item))?;
						}
					}
					Value::Object(inner) => {
						writeln!(out, "{key}:")?;
						for (inner_key, inner_value) in inner {
							writeln!(out, "  {inner_key}={}", scalar_text(inner_value))?;
						}
					}
					other => writeln!(out, "{key}: {}", scalar_text(other))?,
				}
			}
		}
		other => writeln!(out, "{}", scalar_text(other))?,
	}
	Ok(())
}

fn scalar_text(value: &serde_json::Value) -> String {
	match value {
		serde_json::Value::String(s) => s.clone(),
		serde_json::Value::Null => "-".to_string(),
		other => other.to_string(),
	}
}

/// Print an error to stderr in human-readable format
pub fn print_error_stderr(error: &CommandError) {
	eprintln!("Error [{}]: {}", error.code, error.message);
}

/// Result data for the devices command
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevicesData {
	pub count: usize,
	pub devices: Vec<DeviceId>,
}

/// Result data for the shell command
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellData {
	pub command: String,
	pub lines: Vec<String>,
}

/// Result data for the props command
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropsData {
	pub count: usize,
	/// Sorted by property name.
	pub properties: BTreeMap<String, String>,
}

/// Result data for `props --key`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropData {
	pub key: String,
	pub value: Option<String>,
}

/// Result data for the reboot command
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RebootData {
	pub target: String,
	/// Whether a reboot was issued.
	pub issued: bool,
}

/// Result data for the install command
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallData {
	pub install_dir: PathBuf,
	pub os: String,
	pub arch: String,
	pub installed: Vec<InstalledToolData>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledToolData {
	pub tool: String,
	pub url: String,
	pub path: PathBuf,
	pub size_bytes: u64,
}

/// Result data for the config commands
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigData {
	pub path: PathBuf,
	pub file: crate::config::CliConfig,
	pub effective: EffectiveSettings,
}

/// Settings after applying environment and defaults
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveSettings {
	pub base_url: String,
	pub install_dir: PathBuf,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub adb_path: Option<PathBuf>,
}
