//! Error types for device sessions.

use thiserror::Error;

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to a device.
#[derive(Debug, Error)]
pub enum Error {
	/// No device was connected when the session was entered.
	#[error("No devices found.")]
	NoDeviceFound,

	/// The device went away during the session.
	#[error("Error connecting to device! The device is no longer connected.")]
	DeviceDisconnected,

	/// Tool location, provisioning, or process error.
	#[error(transparent)]
	Runtime(#[from] andropy_runtime::Error),
}

impl Error {
	/// Returns true if the bridge executable still has to be installed.
	pub fn is_not_installed(&self) -> bool {
		matches!(self, Error::Runtime(err) if err.is_not_installed())
	}

	/// Returns true if the device disappeared mid-session.
	pub fn is_disconnected(&self) -> bool {
		matches!(self, Error::DeviceDisconnected)
	}
}
