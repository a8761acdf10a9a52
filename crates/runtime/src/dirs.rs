//! Directory and file name conventions for installed tools.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Hidden directory under the user's home directory.
pub const ANDROPY: &str = ".andropy";
/// Executables directory name (inside `.andropy/`).
pub const BIN: &str = "bin";
/// File name of the installed bridge executable.
pub const ADB: &str = "adb";
/// File name of the installed flashing executable.
pub const FASTBOOT: &str = "fastboot";

/// Install directory below an explicit home directory: `<home>/.andropy/bin`.
pub fn install_dir_in(home: &Path) -> PathBuf {
	home.join(ANDROPY).join(BIN)
}

/// Default install directory for the current user.
///
/// # Errors
///
/// Returns [`Error::HomeDirNotFound`] if the platform reports no home directory.
pub fn default_install_dir() -> Result<PathBuf> {
	::dirs::home_dir()
		.map(|home| install_dir_in(&home))
		.ok_or(Error::HomeDirNotFound)
}
