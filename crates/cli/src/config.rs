//! CLI configuration file and setting resolution.
//!
//! Settings are layered, highest priority first: command-line flags,
//! environment variables, the JSON config file, built-in defaults.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use andropy_runtime::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, Result};

/// Environment variable overriding the adb location.
pub const ADB_ENV: &str = andropy_runtime::driver::ADB_ENV;
/// Environment variable overriding the download mirror.
pub const BASE_URL_ENV: &str = "ANDROPY_BASE_URL";
/// Environment variable overriding the install directory.
pub const INSTALL_DIR_ENV: &str = "ANDROPY_INSTALL_DIR";

const CONFIG_DIR: &str = "andropy";
const CONFIG_FILE: &str = "config.json";

/// Location of the configuration file.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
	pub config_file: PathBuf,
}

impl ConfigPaths {
	/// Uses `explicit` when given, otherwise `$XDG_CONFIG_HOME/andropy/config.json`
	/// falling back to `~/.config/andropy/config.json`.
	pub fn new(explicit: Option<&Path>) -> Self {
		Self::from_vars(
			explicit,
			std::env::var_os("XDG_CONFIG_HOME"),
			std::env::var_os("HOME"),
		)
	}

	fn from_vars(explicit: Option<&Path>, xdg: Option<OsString>, home: Option<OsString>) -> Self {
		if let Some(path) = explicit {
			return Self {
				config_file: path.to_path_buf(),
			};
		}

		let config_home = xdg
			.filter(|v| !v.is_empty())
			.map(PathBuf::from)
			.or_else(|| home.map(|h| PathBuf::from(h).join(".config")))
			.unwrap_or_else(|| PathBuf::from("."));

		Self {
			config_file: config_home.join(CONFIG_DIR).join(CONFIG_FILE),
		}
	}
}

/// Persisted CLI configuration. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CliConfig {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub base_url: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub install_dir: Option<PathBuf>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub adb_path: Option<PathBuf>,
}

impl CliConfig {
	/// Overlay the fields set in `other` onto `self`.
	pub fn merge(&mut self, other: &CliConfig) {
		if other.base_url.is_some() {
			self.base_url = other.base_url.clone();
		}
		if other.install_dir.is_some() {
			self.install_dir = other.install_dir.clone();
		}
		if other.adb_path.is_some() {
			self.adb_path = other.adb_path.clone();
		}
	}

	/// Load from `path`. A missing file yields the empty configuration.
	pub fn load(path: &Path) -> Result<Self> {
		Ok(load_json(path)?.unwrap_or_default())
	}

	pub fn save(&self, path: &Path) -> Result<()> {
		save_json(path, self)
	}

	/// Layer built from the `ANDROPY_*` environment variables.
	pub fn from_env() -> Self {
		Self::from_lookup(|name| std::env::var_os(name))
	}

	fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Self {
		let var = |name: &str| lookup(name).filter(|v| !v.is_empty());
		Self {
			base_url: var(BASE_URL_ENV).map(|v| v.to_string_lossy().into_owned()),
			install_dir: var(INSTALL_DIR_ENV).map(PathBuf::from),
			adb_path: var(ADB_ENV).map(PathBuf::from),
		}
	}
}

/// Effective settings consumed by commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
	/// Explicit adb location (path or bare command name), if any.
	pub adb_path: Option<PathBuf>,
	pub install_dir: PathBuf,
	pub base_url: String,
}

impl Settings {
	/// Fold `layers` (lowest priority first) over the defaults.
	///
	/// `default_install_dir` is only consulted when no layer sets one.
	pub fn resolve(
		layers: &[&CliConfig],
		default_install_dir: impl FnOnce() -> andropy_runtime::Result<PathBuf>,
	) -> Result<Self> {
		let mut merged = CliConfig::default();
		for layer in layers {
			merged.merge(layer);
		}

		let base_url = merged
			.base_url
			.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
		validate_base_url(&base_url)?;

		let install_dir = match merged.install_dir {
			Some(dir) => dir,
			None => default_install_dir()?,
		};

		let settings = Self {
			adb_path: merged.adb_path,
			install_dir,
			base_url,
		};
		debug!(target = "andropy", ?settings, "resolved settings");
		Ok(settings)
	}
}

pub fn validate_base_url(raw: &str) -> Result<()> {
	let parsed =
		url::Url::parse(raw).map_err(|e| CliError::Config(format!("invalid base URL {raw:?}: {e}")))?;
	match parsed.scheme() {
		"http" | "https" => Ok(()),
		other => Err(CliError::Config(format!(
			"base URL must use http or https, got {other}"
		))),
	}
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
	let content = match fs::read_to_string(path) {
		Ok(content) => content,
		Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
		Err(err) => return Err(err.into()),
	};
	serde_json::from_str(&content)
		.map(Some)
		.map_err(|source| CliError::ConfigRead {
			path: path.to_path_buf(),
			source,
		})
}

fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent)?;
	}
	fs::write(path, serde_json::to_string_pretty(data)?)?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use tempfile::TempDir;

	use super::*;

	fn default_dir() -> andropy_runtime::Result<PathBuf> {
		Ok(PathBuf::from("/default"))
	}

	#[test]
	fn config_path_prefers_xdg() {
		let paths = ConfigPaths::from_vars(None, Some("/xdg".into()), Some("/home/u".into()));
		assert_eq!(paths.config_file, PathBuf::from("/xdg/andropy/config.json"));
	}

	#[test]
	fn config_path_falls_back_to_home() {
		let paths = ConfigPaths::from_vars(None, Some("".into()), Some("/home/u".into()));
		assert_eq!(
			paths.config_file,
			PathBuf::from("/home/u/.config/andropy/config.json")
		);
	}

	#[test]
	fn explicit_config_path_wins() {
		let paths = ConfigPaths::from_vars(
			Some(Path::new("/etc/andropy.json")),
			Some("/xdg".into()),
			None,
		);
		assert_eq!(paths.config_file, PathBuf::from("/etc/andropy.json"));
	}

	#[test]
	fn missing_file_loads_empty_config() {
		let temp = TempDir::new().unwrap();
		let config = CliConfig::load(&temp.path().join("absent.json")).unwrap();
		assert_eq!(config, CliConfig::default());
	}

	#[test]
	fn malformed_file_is_reported() {
		let temp = TempDir::new().unwrap();
		let path = temp.path().join("config.json");
		fs::write(&path, "{ not json").unwrap();

		let err = CliConfig::load(&path).unwrap_err();
		assert!(matches!(err, CliError::ConfigRead { .. }));
		assert_eq!(err.exit_code(), 2);
	}

	#[test]
	fn save_creates_parent_dirs_and_uses_camel_case() {
		let temp = TempDir::new().unwrap();
		let path = temp.path().join("nested/andropy/config.json");
		let config = CliConfig {
			base_url: Some("https://mirror.example/".into()),
			install_dir: None,
			adb_path: Some(PathBuf::from("/opt/adb")),
		};
		config.save(&path).unwrap();

		let raw: serde_json::Value =
			serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
		assert_eq!(raw["baseUrl"], "https://mirror.example/");
		assert_eq!(raw["adbPath"], "/opt/adb");
		assert!(raw.get("installDir").is_none());
		assert_eq!(CliConfig::load(&path).unwrap(), config);
	}

	#[test]
	fn merge_only_overrides_set_fields() {
		let mut base = CliConfig {
			base_url: Some("https://a/".into()),
			install_dir: Some(PathBuf::from("/a")),
			adb_path: None,
		};
		base.merge(&CliConfig {
			install_dir: Some(PathBuf::from("/b")),
			..Default::default()
		});
		assert_eq!(base.base_url.as_deref(), Some("https://a/"));
		assert_eq!(base.install_dir, Some(PathBuf::from("/b")));
	}

	#[test]
	fn env_layer_ignores_empty_values() {
		let vars: HashMap<&str, OsString> = HashMap::from([
			(BASE_URL_ENV, OsString::from("")),
			(INSTALL_DIR_ENV, OsString::from("/env/bin")),
			(ADB_ENV, OsString::from("adb")),
		]);
		let layer = CliConfig::from_lookup(|name| vars.get(name).cloned());
		assert!(layer.base_url.is_none());
		assert_eq!(layer.install_dir, Some(PathBuf::from("/env/bin")));
		assert_eq!(layer.adb_path, Some(PathBuf::from("adb")));
	}

	#[test]
	fn resolve_applies_precedence_and_defaults() {
		let file = CliConfig {
			base_url: Some("https://file/".into()),
			install_dir: Some(PathBuf::from("/file")),
			adb_path: Some(PathBuf::from("/file/adb")),
		};
		let env = CliConfig {
			install_dir: Some(PathBuf::from("/env")),
			..Default::default()
		};
		let flags = CliConfig {
			base_url: Some("http://flag/".into()),
			..Default::default()
		};

		let settings = Settings::resolve(&[&file, &env, &flags], default_dir).unwrap();
		assert_eq!(settings.base_url, "http://flag/");
		assert_eq!(settings.install_dir, PathBuf::from("/env"));
		assert_eq!(settings.adb_path, Some(PathBuf::from("/file/adb")));

		let defaults = Settings::resolve(&[], default_dir).unwrap();
		assert_eq!(defaults.base_url, DEFAULT_BASE_URL);
		assert_eq!(defaults.install_dir, PathBuf::from("/default"));
		assert!(defaults.adb_path.is_none());
	}

	#[test]
	fn default_install_dir_not_consulted_when_configured() {
		let layer = CliConfig {
			install_dir: Some(PathBuf::from("/configured")),
			..Default::default()
		};
		let settings = Settings::resolve(&[&layer], || {
			Err(andropy_runtime::Error::HomeDirNotFound)
		})
		.unwrap();
		assert_eq!(settings.install_dir, PathBuf::from("/configured"));

		let err = Settings::resolve(&[], || Err(andropy_runtime::Error::HomeDirNotFound)).unwrap_err();
		assert!(matches!(err, CliError::Runtime(_)));
	}

	#[test]
	fn non_http_base_url_is_rejected() {
		let layer = CliConfig {
			base_url: Some("ftp://mirror/".into()),
			..Default::default()
		};
		let err = Settings::resolve(&[&layer], default_dir).unwrap_err();
		assert!(matches!(err, CliError::Config(_)));

		assert!(validate_base_url("not a url").is_err());
		assert!(validate_base_url("https://github.com/x/").is_ok());
	}
}
