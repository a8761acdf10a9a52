
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::output::OutputFormat;
use crate::styles::cli_styles;

/// Root CLI for andropy.
#[derive(Parser, Debug)]
#[command(name = "andropy")]
#[command(about = "Control Android devices over adb")]
#[command(version)]
#[command(styles = cli_styles())]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Output format: toon (default), json, ndjson, or text
	#[arg(short = 'f', long, global = true, value_enum, default_value = "toon")]
	pub format: OutputFormat,

	/// Configuration file (defaults to $XDG_CONFIG_HOME/andropy/config.json)
	#[arg(long, global = true, value_name = "FILE")]
	pub config: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// List connected devices.
	Devices,
	/// Run a shell command on the device.
	Shell(ShellArgs),
	/// Show the device build properties.
	Props(PropsArgs),
	/// Reboot the device (system, recovery, or bootloader).
	Reboot(RebootArgs),
	/// Show a short overview of the connected device.
	Info,
	/// Download adb (and optionally fastboot) for this host.
	Install(InstallArgs),
	/// Show or change the configuration file.
	Config(ConfigArgs),
}

impl Commands {
	/// Command name used in result envelopes.
	pub fn name(&self) -> &'static str {
		match self {
			Commands::Devices => "devices",
			Commands::Shell(_) => "shell",
			Commands::Props(_) => "props",
			Commands::Reboot(_) => "reboot",
			Commands::Info => "info",
			Commands::Install(_) => "install",
			Commands::Config(ConfigArgs { action: ConfigAction::Show }) => "config show",
			Commands::Config(ConfigArgs { action: ConfigAction::Set(_) }) => "config set",
		}
	}
}

#[derive(Args, Debug, Clone)]
pub struct ShellArgs {
	/// Command and arguments, joined with spaces.
	#[arg(value_name = "COMMAND", required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
	pub command: Vec<String>,
}

impl ShellArgs {
	pub fn joined(&self) -> String {
		self.command.join(" ")
	}
}

#[derive(Args, Debug, Clone)]
pub struct PropsArgs {
	/// Only show this property.
	#[arg(short, long, value_name = "KEY")]
	pub key: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct RebootArgs {
	/// Boot target: system, recovery, or bootloader.
	#[arg(value_name = "TARGET", default_value = "system")]
	pub target: String,
}

#[derive(Args, Debug, Clone)]
pub struct InstallArgs {
	/// Skip the adb download.
	#[arg(long)]
	pub no_adb: bool,

	/// Also download fastboot.
	#[arg(long)]
	pub fastboot: bool,

	/// Mirror base URL (overrides configuration).
	#[arg(long, value_name = "URL")]
	pub base_url: Option<String>,

	/// Install directory (overrides configuration).
	#[arg(long, value_name = "DIR")]
	pub install_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
	#[command(subcommand)]
	pub action: ConfigAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
	/// Show the configuration file and the effective settings.
	Show,
	/// Update fields of the configuration file.
	Set(ConfigSetArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ConfigSetArgs {
	/// Mirror base URL for tool downloads.
	#[arg(long, value_name = "URL")]
	pub base_url: Option<String>,

	/// Directory tools are installed into.
	#[arg(long, value_name = "DIR")]
	pub install_dir: Option<PathBuf>,

	/// Explicit adb executable (path or command name on PATH).
	#[arg(long, value_name = "PATH")]
	pub adb_path: Option<PathBuf>,
}
