//! Classification of raw adb responses.

use crate::error::{Error, Result};

/// Responses meaning the device is gone.
///
/// Compared against the whole response with line terminators removed.
const DISCONNECT_SENTINELS: &[&str] = &["error: device not found"];

/// Check a raw device response before it is parsed.
///
/// Every read that talks to the device goes through this function.
///
/// # Errors
///
/// Returns [`Error::DeviceDisconnected`] if the response is a disconnect sentinel.
pub fn classify_response(raw: &str) -> Result<&str> {
	let body = raw.trim_end_matches(['\r', '\n']);
	if DISCONNECT_SENTINELS.contains(&body) {
		return Err(Error::DeviceDisconnected);
	}
	Ok(raw)
}

/// Split shell output into its non-empty lines, in order, otherwise untouched.
pub fn parse_shell_output(raw: &str) -> Vec<String> {
	raw.lines()
		.filter(|line| !line.is_empty())
		.map(str::to_string)
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sentinel_is_disconnect() {
		let result = classify_response("error: device not found");
		assert!(matches!(result, Err(Error::DeviceDisconnected)));
	}

	#[test]
	fn sentinel_with_line_terminator_is_disconnect() {
		assert!(classify_response("error: device not found\n").is_err());
		assert!(classify_response("error: device not found\r\n").is_err());
	}

	#[test]
	fn sentinel_inside_other_output_is_data() {
		let raw = "line one\nerror: device not found\n";
		assert_eq!(classify_response(raw).unwrap(), raw);
	}

	#[test]
	fn ordinary_output_passes_through() {
		assert_eq!(classify_response("").unwrap(), "");
		assert_eq!(classify_response("ok\n").unwrap(), "ok\n");
	}

	#[test]
	fn shell_output_drops_blank_lines_and_keeps_order() {
		let raw = "first\n\nsecond\n\n\nthird\n";
		assert_eq!(parse_shell_output(raw), vec!["first", "second", "third"]);
	}

	#[test]
	fn shell_output_keeps_lines_verbatim() {
		let raw = "  indented\ttab \r\n\r\nlast";
		assert_eq!(parse_shell_output(raw), vec!["  indented\ttab ", "last"]);
	}

	#[test]
	fn empty_shell_output() {
		assert!(parse_shell_output("").is_empty());
		assert!(parse_shell_output("\n\n").is_empty());
	}
}
