//! Bridge tool location
//!
//! Handles locating the installed `adb` / `fastboot` executables.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::dirs;
use crate::error::{Error, Result};

/// Environment variable overriding the `adb` location.
pub const ADB_ENV: &str = "ANDROPY_ADB";

/// An installable platform tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
	/// The Android Debug Bridge.
	Adb,
	/// The bootloader flashing tool.
	Fastboot,
}

impl Tool {
	/// Fixed file name inside the install directory.
	pub fn file_name(self) -> &'static str {
		match self {
			Tool::Adb => dirs::ADB,
			Tool::Fastboot => dirs::FASTBOOT,
		}
	}
}

impl fmt::Display for Tool {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.file_name())
	}
}

/// Get the path to the `adb` executable.
///
/// Looks in the following order:
/// 1. `ANDROPY_ADB`
/// 2. The conventional install path `<home>/.andropy/bin/adb`
///
/// # Errors
///
/// Returns [`Error::ToolNotInstalled`] if adb cannot be found.
pub fn get_adb_executable() -> Result<PathBuf> {
	locate_adb(std::env::var_os(ADB_ENV).as_deref(), dirs::default_install_dir)
}

/// The home directory is only looked up when no override is set.
fn locate_adb(
	env_override: Option<&OsStr>,
	install_dir: impl FnOnce() -> Result<PathBuf>,
) -> Result<PathBuf> {
	match env_override.filter(|raw| !raw.is_empty()) {
		Some(raw) => resolve_tool_executable(Tool::Adb, Some(raw), Path::new("")),
		None => resolve_tool_executable(Tool::Adb, None, &install_dir()?),
	}
}

/// Resolve a tool path from an optional override and an install directory.
///
/// An override containing a path separator must point at an existing file.
/// A bare command name is looked up on `PATH`.
pub fn resolve_tool_executable(
	tool: Tool,
	override_path: Option<&OsStr>,
	install_dir: &Path,
) -> Result<PathBuf> {
	if let Some(raw) = override_path.filter(|raw| !raw.is_empty()) {
		let path = resolve_override(raw)?;
		debug!(target = "andropy", tool = %tool, path = %path.display(), "using tool override");
		return Ok(path);
	}

	let path = install_dir.join(tool.file_name());
	if path.is_file() {
		debug!(target = "andropy", tool = %tool, path = %path.display(), "found installed tool");
		return Ok(path);
	}

	Err(Error::ToolNotInstalled { path })
}

fn resolve_override(raw: &OsStr) -> Result<PathBuf> {
	let candidate = PathBuf::from(raw);
	if candidate.components().count() > 1 || candidate.is_absolute() {
		if candidate.is_file() {
			return Ok(candidate);
		}
		return Err(Error::ToolNotInstalled { path: candidate });
	}

	which::which(OsString::from(raw)).map_err(|_| Error::ToolNotInstalled { path: candidate })
}
