//! Device identifiers and `adb devices` output parsing.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// A connected, ready device line: 12 uppercase alphanumerics, whitespace, `device`.
static DEVICE_LINE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[A-Z0-9]{12}\sdevice$").expect("device line pattern is valid"));

const ID_LEN: usize = 12;

/// Identifier of a connected device, valid for the duration of the connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
	/// Parse one line of `adb devices` output.
	///
	/// Returns `None` for the header, offline or unauthorized devices and
	/// anything else that is not a ready device.
	pub fn from_listing_line(line: &str) -> Option<Self> {
		DEVICE_LINE
			.is_match(line)
			.then(|| Self(line[..ID_LEN].to_string()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for DeviceId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for DeviceId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

/// Extract the ready devices from `adb devices` output, in listing order.
pub fn parse_devices(raw: &str) -> Vec<DeviceId> {
	raw.lines().filter_map(DeviceId::from_listing_line).collect()
}
