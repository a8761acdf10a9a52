//! [`Bridge`] and [`Session`]: the device-session lifecycle.
//!
//! Constructing a [`Bridge`] locates `adb` and starts its background server.
//! [`Bridge::enter`] turns it into a [`Session`] once at least one device is
//! connected. The server is stopped when the last bridge or session referring
//! to it is dropped, whichever path led there.

use std::path::Path;

use andropy_runtime::{ServerLease, get_adb_executable, run_bridge, run_bridge_status};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::device::{DeviceId, parse_devices};
use crate::error::{Error, Result};
use crate::props::{BUILD_PROP_COMMAND, BuildProps, parse_build_props};
use crate::reboot::RebootTarget;
use crate::response::{classify_response, parse_shell_output};

/// Remote command listing installed application packages.
const LIST_APPS_COMMAND: &str = "ls /data/app";

/// Handle on a running adb server.
#[derive(Debug)]
pub struct Bridge {
	lease: ServerLease,
}

impl Bridge {
	/// Locate the installed `adb` and start its background server.
	///
	/// # Errors
	///
	/// Returns a `ToolNotInstalled` runtime error if `adb` has not been
	/// provisioned, or the launch error of `adb start-server`.
	pub fn new() -> Result<Self> {
		let exe = get_adb_executable()?;
		Self::with_executable(exe)
	}

	/// Use an explicit `adb` executable and start its background server.
	pub fn with_executable(exe: impl AsRef<Path>) -> Result<Self> {
		let exe = exe.as_ref();
		if !exe.is_file() {
			return Err(andropy_runtime::Error::ToolNotInstalled { path: exe.to_path_buf() }.into());
		}

		let lease = ServerLease::acquire(exe)?;
		Ok(Self { lease })
	}

	pub fn executable(&self) -> &Path {
		self.lease.executable()
	}

	/// Query the devices that are connected and ready, right now.
	pub fn devices(&self) -> Result<Vec<DeviceId>> {
		let raw = self.read(&["devices"])?;
		Ok(parse_devices(&raw))
	}

	/// Enter a device session.
	///
	/// # Errors
	///
	/// Returns [`Error::NoDeviceFound`] if no device is connected. The server
	/// is released in that case as well.
	pub fn enter(self) -> Result<Session> {
		let devices = self.devices()?;
		if devices.is_empty() {
			return Err(Error::NoDeviceFound);
		}

		info!(target = "andropy", count = devices.len(), "entered device session");
		Ok(Session { bridge: self })
	}

	/// Run the bridge and return its classified stdout.
	fn read(&self, args: &[&str]) -> Result<String> {
		let output = match run_bridge(self.executable(), args) {
			Ok(output) => output,
			Err(andropy_runtime::Error::CommandFailed { stderr, .. })
				if classify_response(&stderr).is_err() =>
			{
				return Err(Error::DeviceDisconnected);
			}
			Err(e) => return Err(e.into()),
		};

		classify_response(&output.stdout)?;
		Ok(output.stdout)
	}
}

/// A device session: the server is running and a device was present on entry.
///
/// Operations do not re-check that the device is still there; a device that
/// went away is reported as [`Error::DeviceDisconnected`].
#[derive(Debug)]
pub struct Session {
	bridge: Bridge,
}

impl Session {
	pub fn executable(&self) -> &Path {
		self.bridge.executable()
	}

	/// Query the currently connected devices. Never cached.
	pub fn devices(&self) -> Result<Vec<DeviceId>> {
		self.bridge.devices()
	}

	/// Run `command` in a device shell and return its non-empty output lines.
	pub fn shell(&self, command: &str) -> Result<Vec<String>> {
		let raw = self.bridge.read(&["shell", command])?;
		Ok(parse_shell_output(&raw))
	}

	/// Read and parse the device's `/system/build.prop`.
	pub fn build_props(&self) -> Result<BuildProps> {
		let raw = self.bridge.read(&["shell", BUILD_PROP_COMMAND])?;
		Ok(parse_build_props(&raw))
	}

	/// Reboot the device into `target`.
	///
	/// The bridge output is not consulted; an unsuccessful exit is only logged.
	pub fn reboot(&self, target: RebootTarget) -> Result<()> {
		debug!(target = "andropy", reboot = %target, "rebooting device");
		run_bridge_status(self.executable(), target.bridge_args())?;
		Ok(())
	}

	/// Reboot by target name (`system`, `recovery`, `bootloader`).
	///
	/// An unknown name is reported as a warning and nothing is invoked;
	/// returns whether a reboot was issued.
	pub fn reboot_named(&self, name: &str) -> Result<bool> {
		match name.parse::<RebootTarget>() {
			Ok(target) => {
				self.reboot(target)?;
				Ok(true)
			}
			Err(message) => {
				warn!(target = "andropy", "{message}");
				Ok(false)
			}
		}
	}

	/// Collect a short overview of the connected device.
	pub fn summary(&self) -> Result<DeviceSummary> {
		let device_count = self.devices()?.len();
		let installed_apps = self.shell(LIST_APPS_COMMAND)?.len();
		let props = self.build_props()?;
		let prop = |key: &str| props.get(key).map(str::to_string);

		Ok(DeviceSummary {
			device_count,
			installed_apps,
			cpu: prop("ro.device.cpu"),
			manufacturer: prop("ro.product.manufacturer"),
			model: prop("ro.product.device"),
		})
	}
}

/// Overview of a connected device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSummary {
	pub device_count: usize,
	/// Entries under `/data/app`.
	pub installed_apps: usize,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub cpu: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub manufacturer: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub model: Option<String>,
}
