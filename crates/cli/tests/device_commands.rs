//! End-to-end tests for the device commands against a scripted adb.
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::{Value, json};
use tempfile::TempDir;

const ONE_DEVICE: &str = "ABCDEF012345\tdevice\n";

/// Temp home plus a fake `adb` that logs its arguments to `calls.log`.
struct Fixture {
	home: TempDir,
	adb: PathBuf,
}

impl Fixture {
	fn new() -> Self {
		let home = TempDir::new().unwrap();
		let mock = home.path().join("mock");
		fs::create_dir_all(&mock).unwrap();
		let adb = mock.join("adb");
		let script = format!(
			r#"#!/bin/sh
D='{root}'
echo "$*" >> "$D/calls.log"
case "$1" in
  devices)
    echo "List of devices attached"
    cat "$D/devices.txt" 2>/dev/null
    ;;
  shell)
    if [ -f "$D/slow" ]; then sleep 1; fi
    if [ -f "$D/disconnected" ]; then printf 'error: device not found'; exit 0; fi
    if [ "$2" = "cat /system/build.prop" ]; then cat "$D/build.prop"; else cat "$D/shell.txt"; fi
    ;;
esac
exit 0
"#,
			root = mock.display()
		);
		fs::write(&adb, script).unwrap();
		let mut perms = fs::metadata(&adb).unwrap().permissions();
		perms.set_mode(0o755);
		fs::set_permissions(&adb, perms).unwrap();

		Self { home, adb }
	}

	fn mock_file(&self, name: &str, contents: &str) -> &Self {
		fs::write(self.adb.parent().unwrap().join(name), contents).unwrap();
		self
	}

	fn calls(&self) -> Vec<String> {
		fs::read_to_string(self.adb.parent().unwrap().join("calls.log"))
			.unwrap_or_default()
			.lines()
			.map(str::to_string)
			.collect()
	}

	fn command(&self, adb: Option<&Path>) -> Command {
		let mut cmd = Command::new(env!("CARGO_BIN_EXE_andropy"));
		cmd.env("HOME", self.home.path())
			.env("XDG_CONFIG_HOME", self.home.path().join(".config"))
			.env_remove("ANDROPY_ADB")
			.env_remove("ANDROPY_BASE_URL")
			.env_remove("ANDROPY_INSTALL_DIR")
			.env_remove("RUST_LOG");
		if let Some(adb) = adb {
			cmd.env("ANDROPY_ADB", adb);
		}
		cmd
	}

	/// Run with `-f json` and the mock adb; returns (exit code, envelope, stderr).
	fn run(&self, args: &[&str]) -> (i32, Value, String) {
		self.run_with(Some(&self.adb), args)
	}

	fn run_with(&self, adb: Option<&Path>, args: &[&str]) -> (i32, Value, String) {
		let output = self
			.command(adb)
			.args(["-f", "json"])
			.args(args)
			.output()
			.expect("failed to execute andropy");

		let stdout = String::from_utf8_lossy(&output.stdout).to_string();
		let stderr = String::from_utf8_lossy(&output.stderr).to_string();
		let parsed = serde_json::from_str::<Value>(&stdout).unwrap_or_else(|_| json!({ "raw": stdout }));
		(output.status.code().unwrap_or(-1), parsed, stderr)
	}
}

#[test]
fn missing_adb_exits_with_tool_not_installed() {
	let fx = Fixture::new();
	let (code, json, stderr) = fx.run_with(None, &["devices"]);

	assert_eq!(code, 3, "stderr: {stderr}");
	assert_eq!(json["ok"], false);
	assert_eq!(json["command"], "devices");
	assert_eq!(json["error"]["code"], "TOOL_NOT_INSTALLED");
	assert!(stderr.contains("Error [TOOL_NOT_INSTALLED]"));
}

#[test]
fn devices_lists_ready_devices_and_stops_server() {
	let fx = Fixture::new();
	fx.mock_file("devices.txt", "ABCDEF012345\tdevice\nZZZZZZZZZZZZ\toffline\n");

	let (code, json, stderr) = fx.run(&["devices"]);
	assert_eq!(code, 0, "stderr: {stderr}");
	assert_eq!(json["ok"], true);
	assert_eq!(json["data"]["devices"], json!(["ABCDEF012345"]));
	assert_eq!(json["data"]["count"], 1);

	let calls = fx.calls();
	assert_eq!(calls.first().map(String::as_str), Some("start-server"));
	assert_eq!(calls.last().map(String::as_str), Some("kill-server"));
	assert_eq!(calls.iter().filter(|c| *c == "kill-server").count(), 1);
}

#[test]
fn no_ready_device_exits_with_no_device_found() {
	let fx = Fixture::new();
	fx.mock_file("devices.txt", "ABCDEF012345\tunauthorized\n");

	let (code, json, _) = fx.run(&["shell", "ls"]);
	assert_eq!(code, 4);
	assert_eq!(json["error"]["code"], "NO_DEVICE_FOUND");
	assert_eq!(json["error"]["message"], "No devices found.");
	assert!(!fx.calls().iter().any(|c| c.starts_with("shell")));
}

#[test]
fn shell_joins_words_and_drops_blank_lines() {
	let fx = Fixture::new();
	fx.mock_file("devices.txt", ONE_DEVICE)
		.mock_file("shell.txt", "com.example.one\n\ncom.example.two\n");

	let (code, json, stderr) = fx.run(&["shell", "ls", "-1", "/data/app"]);
	assert_eq!(code, 0, "stderr: {stderr}");
	assert_eq!(json["data"]["command"], "ls -1 /data/app");
	assert_eq!(json["data"]["lines"], json!(["com.example.one", "com.example.two"]));
	assert!(fx.calls().contains(&"shell ls -1 /data/app".to_string()));
}

#[test]
fn disconnected_device_exits_with_device_disconnected() {
	let fx = Fixture::new();
	fx.mock_file("devices.txt", ONE_DEVICE).mock_file("disconnected", "");

	let (code, json, stderr) = fx.run(&["shell", "ls"]);
	assert_eq!(code, 5);
	assert_eq!(json["error"]["code"], "DEVICE_DISCONNECTED");
	assert!(stderr.contains("The device is no longer connected"));
}

#[test]
fn envelope_timings_cover_the_bridge_work() {
	let fx = Fixture::new();
	fx.mock_file("devices.txt", ONE_DEVICE)
		.mock_file("shell.txt", "ok\n")
		.mock_file("slow", "");

	let (code, json, stderr) = fx.run(&["shell", "ls"]);
	assert_eq!(code, 0, "stderr: {stderr}");
	let ms = json["timings"]["durationMs"].as_u64().unwrap();
	assert!(ms >= 1000, "durationMs={ms}");

	fx.mock_file("disconnected", "");
	let (code, json, _) = fx.run(&["shell", "ls"]);
	assert_eq!(code, 5);
	let ms = json["timings"]["durationMs"].as_u64().unwrap();
	assert!(ms >= 1000, "durationMs={ms}");
}

#[test]
fn props_shows_all_or_one_property() {
	let fx = Fixture::new();
	fx.mock_file("devices.txt", ONE_DEVICE).mock_file(
		"build.prop",
		"# build properties\nro.product.device=pixel\nro.build.fingerprint=a=b\n",
	);

	let (code, json, _) = fx.run(&["props"]);
	assert_eq!(code, 0);
	assert_eq!(json["data"]["count"], 2);
	assert_eq!(json["data"]["properties"]["ro.build.fingerprint"], "a=b");

	let (code, json, _) = fx.run(&["props", "--key", "ro.product.device"]);
	assert_eq!(code, 0);
	assert_eq!(json["data"], json!({ "key": "ro.product.device", "value": "pixel" }));

	let (code, json, _) = fx.run(&["props", "--key", "ro.missing"]);
	assert_eq!(code, 0);
	assert_eq!(json["data"]["value"], Value::Null);
	assert_eq!(json["diagnostics"][0]["level"], "warning");
}

#[test]
fn reboot_dispatches_known_targets() {
	let fx = Fixture::new();
	fx.mock_file("devices.txt", ONE_DEVICE);

	let (code, json, _) = fx.run(&["reboot", "recovery"]);
	assert_eq!(code, 0);
	assert_eq!(json["data"], json!({ "target": "recovery", "issued": true }));

	let (code, _, _) = fx.run(&["reboot"]);
	assert_eq!(code, 0);

	let reboots: Vec<String> = fx.calls().into_iter().filter(|c| c.starts_with("reboot")).collect();
	assert_eq!(reboots, vec!["reboot recovery", "reboot"]);
}

#[test]
fn unknown_reboot_target_is_a_warning() {
	let fx = Fixture::new();
	fx.mock_file("devices.txt", ONE_DEVICE);

	let (code, json, _) = fx.run(&["reboot", "sideways"]);
	assert_eq!(code, 0);
	assert_eq!(json["ok"], true);
	assert_eq!(json["data"]["issued"], false);
	assert_eq!(json["diagnostics"][0]["message"], "Invalid reboot option: sideways");
	assert!(!fx.calls().iter().any(|c| c.starts_with("reboot")));
}

#[test]
fn info_summarizes_device() {
	let fx = Fixture::new();
	fx.mock_file("devices.txt", ONE_DEVICE)
		.mock_file("shell.txt", "a.apk\nb.apk\nc.apk\n")
		.mock_file(
			"build.prop",
			"ro.device.cpu=arm64\nro.product.manufacturer=Google\nro.product.device=pixel\n",
		);

	let (code, json, stderr) = fx.run(&["info"]);
	assert_eq!(code, 0, "stderr: {stderr}");
	assert_eq!(
		json["data"],
		json!({
			"deviceCount": 1,
			"installedApps": 3,
			"cpu": "arm64",
			"manufacturer": "Google",
			"model": "pixel"
		})
	);
}

#[test]
fn adb_path_from_config_file_is_used() {
	let fx = Fixture::new();
	fx.mock_file("devices.txt", ONE_DEVICE);
	let config_dir = fx.home.path().join(".config/andropy");
	fs::create_dir_all(&config_dir).unwrap();
	fs::write(
		config_dir.join("config.json"),
		json!({ "adbPath": fx.adb }).to_string(),
	)
	.unwrap();

	let (code, json, stderr) = fx.run_with(None, &["devices"]);
	assert_eq!(code, 0, "stderr: {stderr}");
	assert_eq!(json["data"]["count"], 1);
}

#[test]
fn text_format_prints_plain_lines() {
	let fx = Fixture::new();
	fx.mock_file("devices.txt", ONE_DEVICE);

	let output = fx
		.command(Some(&fx.adb))
		.args(["-f", "text", "devices"])
		.output()
		.unwrap();
	assert!(output.status.success());
	assert_eq!(
		String::from_utf8_lossy(&output.stdout),
		"count: 1\ndevices:\n  ABCDEF012345\n"
	);
}
