mod config;
mod devices;
mod info;
mod install;
mod props;
mod reboot;
mod shell;

use std::path::Path;
use std::time::Instant;

use andropy::{Bridge, Session, Tool};
use andropy_runtime::resolve_tool_executable;
use serde::Serialize;
use tracing::debug;

use crate::cli::{Cli, Commands, ConfigAction};
use crate::config::{CliConfig, ConfigPaths, Settings};
use crate::error::Result;
use crate::output::{OutputFormat, ResultBuilder, Timings, print_result};

/// State shared by every command invocation.
pub struct CommandContext {
	pub format: OutputFormat,
	/// When the invocation started; envelope timings are measured from here.
	pub started: Instant,
	pub paths: ConfigPaths,
	/// Contents of the configuration file (empty if absent).
	pub file: CliConfig,
}

impl CommandContext {
	/// Effective settings with `flags` layered over env, file and defaults.
	pub fn settings(&self, flags: &CliConfig) -> Result<Settings> {
		let env = CliConfig::from_env();
		Settings::resolve(
			&[&self.file, &env, flags],
			andropy_runtime::dirs::default_install_dir,
		)
	}

	/// Start the bridge server and enter a device session.
	pub fn open_session(&self) -> Result<Session> {
		let settings = self.settings(&CliConfig::default())?;
		let exe = resolve_tool_executable(
			Tool::Adb,
			settings.adb_path.as_deref().map(Path::as_os_str),
			&settings.install_dir,
		)?;
		debug!(target = "andropy", exe = %exe.display(), "opening session");
		Ok(Bridge::with_executable(exe)?.enter()?)
	}

	/// Build and print the result envelope.
	pub fn emit<T: Serialize>(&self, builder: ResultBuilder<T>) {
		let timings = Timings::from(self.started.elapsed());
		print_result(&builder.timings(timings).build(), self.format);
	}
}

pub fn dispatch(cli: Cli, started: Instant) -> Result<()> {
	let paths = ConfigPaths::new(cli.config.as_deref());
	let file = CliConfig::load(&paths.config_file)?;
	let ctx = CommandContext {
		format: cli.format,
		started,
		paths,
		file,
	};

	match cli.command {
		Commands::Devices => devices::execute(&ctx),
		Commands::Shell(args) => shell::execute(&ctx, &args),
		Commands::Props(args) => props::execute(&ctx, &args),
		Commands::Reboot(args) => reboot::execute(&ctx, &args),
		Commands::Info => info::execute(&ctx),
		Commands::Install(args) => install::execute(&ctx, &args),
		Commands::Config(args) => match args.action {
			ConfigAction::Show => config::show(&ctx),
			ConfigAction::Set(set) => config::set(&ctx, set),
		},
	}
}
