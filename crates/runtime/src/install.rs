//! Tool provisioning
//!
//! Downloads `adb` and `fastboot` builds matching the host platform into the
//! install directory (`~/.andropy/bin`). URLs follow the mirror layout
//! `{base_url}{os}/{tool}{arch}` where `arch` is the first two characters of
//! the pointer-width label (`64bit` → `64`).

use std::fs;
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;
use tracing::info;

use crate::dirs;
use crate::driver::Tool;
use crate::error::{Error, Result};

/// Mirror hosting prebuilt platform tools.
pub const DEFAULT_BASE_URL: &str = "https://github.com/tehmk/androgola-platform-tools/raw/master/";

/// Host operating system and architecture as named by the download mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPlatform {
	os: String,
	arch: String,
}

impl HostPlatform {
	/// Detect the platform this binary runs on.
	///
	/// The OS is lower-cased and uses the mirror's names (`linux`, `darwin`,
	/// `windows`); the architecture is the pointer width label (`64bit`).
	pub fn detect() -> Self {
		Self::new(mirror_os_name(std::env::consts::OS), format!("{}bit", usize::BITS))
	}

	pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
		Self {
			os: os.into().to_lowercase(),
			arch: arch.into(),
		}
	}

	pub fn os(&self) -> &str {
		&self.os
	}

	pub fn arch(&self) -> &str {
		&self.arch
	}

	/// Two-character architecture token appended to tool names.
	pub fn arch_token(&self) -> &str {
		match self.arch.char_indices().nth(2) {
			Some((end, _)) => &self.arch[..end],
			None => &self.arch,
		}
	}
}

fn mirror_os_name(os: &str) -> String {
	match os {
		"macos" => "darwin".to_string(),
		other => other.to_lowercase(),
	}
}

/// One tool written by [`Provisioner::execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledTool {
	pub tool: Tool,
	pub url: String,
	pub path: PathBuf,
	pub bytes: u64,
}

/// Summary of a provisioning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
	pub install_dir: PathBuf,
	pub installed: Vec<InstalledTool>,
}

/// Installs the bridge executable and, optionally, the flashing tool.
#[derive(Debug, Clone)]
pub struct Provisioner {
	install_adb: bool,
	install_fastboot: bool,
	platform: HostPlatform,
	install_dir: PathBuf,
	base_url: String,
	client: Option<Client>,
}

impl Provisioner {
	/// Create a provisioner for the detected host and the default install directory.
	///
	/// # Errors
	///
	/// Returns [`Error::HomeDirNotFound`] if the home directory cannot be determined.
	pub fn new(install_adb: bool, install_fastboot: bool) -> Result<Self> {
		Ok(Self {
			install_adb,
			install_fastboot,
			platform: HostPlatform::detect(),
			install_dir: dirs::default_install_dir()?,
			base_url: DEFAULT_BASE_URL.to_string(),
			client: None,
		})
	}

	pub fn with_platform(mut self, platform: HostPlatform) -> Self {
		self.platform = platform;
		self
	}

	pub fn with_install_dir(mut self, install_dir: impl Into<PathBuf>) -> Self {
		self.install_dir = install_dir.into();
		self
	}

	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();
		self
	}

	/// Use a preconfigured HTTP client instead of the default one.
	pub fn with_client(mut self, client: Client) -> Self {
		self.client = Some(client);
		self
	}

	pub fn platform(&self) -> &HostPlatform {
		&self.platform
	}

	pub fn install_dir(&self) -> &Path {
		&self.install_dir
	}

	/// Tools selected for installation, in install order.
	pub fn requested_tools(&self) -> Vec<Tool> {
		let mut tools = Vec::with_capacity(2);
		if self.install_adb {
			tools.push(Tool::Adb);
		}
		if self.install_fastboot {
			tools.push(Tool::Fastboot);
		}
		tools
	}

	/// Download URL of `tool` for the configured platform.
	pub fn download_url(&self, tool: Tool) -> String {
		let separator = if self.base_url.ends_with('/') { "" } else { "/" };
		format!(
			"{}{}{}/{}{}",
			self.base_url,
			separator,
			self.platform.os(),
			tool.file_name(),
			self.platform.arch_token()
		)
	}

	/// Create the install directory tree. An existing directory is not an error.
	///
	/// # Errors
	///
	/// Returns [`Error::InstallDirectory`] if the tree cannot be created.
	pub fn ensure_install_dir(&self) -> Result<()> {
		fs::create_dir_all(&self.install_dir).map_err(|source| Error::InstallDirectory {
			path: self.install_dir.clone(),
			source,
		})
	}

	/// Create the install directory and download every requested tool into it.
	///
	/// # Errors
	///
	/// Returns [`Error::InstallDirectory`] if the directory cannot be created and
	/// [`Error::DownloadFailed`] on the first download that fails.
	pub fn execute(&self) -> Result<InstallReport> {
		self.ensure_install_dir()?;

		let client = match &self.client {
			Some(client) => client.clone(),
			None => default_client()?,
		};

		let mut installed = Vec::new();
		for tool in self.requested_tools() {
			let url = self.download_url(tool);
			let path = self.install_dir.join(tool.file_name());

			info!(target = "andropy", %tool, %url, "downloading tool");
			let bytes = download_to(&client, &url, &path)?;
			info!(target = "andropy", %tool, path = %path.display(), bytes, "installed tool");

			installed.push(InstalledTool { tool, url, path, bytes });
		}

		Ok(InstallReport {
			install_dir: self.install_dir.clone(),
			installed,
		})
	}
}

fn default_client() -> Result<Client> {
	Client::builder()
		.user_agent(concat!("andropy/", env!("CARGO_PKG_VERSION")))
		.build()
		.map_err(|e| Error::DownloadFailed {
			url: DEFAULT_BASE_URL.to_string(),
			reason: format!("failed to build HTTP client: {e}"),
		})
}

/// Download `url` and write the body byte-for-byte to `dest`.
fn download_to(client: &Client, url: &str, dest: &Path) -> Result<u64> {
	let failed = |reason: String| Error::DownloadFailed {
		url: url.to_string(),
		reason,
	};

	let response = client.get(url).send().map_err(|e| failed(e.to_string()))?;

	if !response.status().is_success() {
		return Err(failed(format!("status {}", response.status())));
	}

	let bytes = response
		.bytes()
		.map_err(|e| failed(format!("failed to read response: {e}")))?;

	let write_failed = |e: std::io::Error| failed(format!("failed to write {}: {e}", dest.display()));

	fs::write(dest, &bytes).map_err(write_failed)?;

	#[cfg(unix)]
	{
		use std::os::unix::fs::PermissionsExt;

		let mut perms = fs::metadata(dest).map_err(write_failed)?.permissions();
		perms.set_mode(0o755);
		fs::set_permissions(dest, perms).map_err(write_failed)?;
	}

	Ok(bytes.len() as u64)
}
