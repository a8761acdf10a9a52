//! Reboot targets.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Where a device boots into after `adb reboot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RebootTarget {
	/// Normal system boot.
	System,
	/// Recovery image.
	Recovery,
	/// Bootloader / fastboot mode.
	Bootloader,
}

impl RebootTarget {
	/// Arguments passed to the bridge for this target.
	pub fn bridge_args(self) -> &'static [&'static str] {
		match self {
			RebootTarget::System => &["reboot"],
			RebootTarget::Recovery => &["reboot", "recovery"],
			RebootTarget::Bootloader => &["reboot", "bootloader"],
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			RebootTarget::System => "system",
			RebootTarget::Recovery => "recovery",
			RebootTarget::Bootloader => "bootloader",
		}
	}
}

impl FromStr for RebootTarget {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"system" => Ok(RebootTarget::System),
			"recovery" => Ok(RebootTarget::Recovery),
			"bootloader" => Ok(RebootTarget::Bootloader),
			_ => Err(format!("Invalid reboot option: {s}")),
		}
	}
}

impl fmt::Display for RebootTarget {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
