use tracing::info;

use crate::cli::ConfigSetArgs;
use crate::commands::CommandContext;
use crate::config::{CliConfig, Settings, validate_base_url};
use crate::error::{CliError, Result};
use crate::output::{ConfigData, EffectiveSettings, ResultBuilder};

pub fn show(ctx: &CommandContext) -> Result<()> {
	let settings = ctx.settings(&CliConfig::default())?;
	emit_config(ctx, "config show", ctx.file.clone(), settings);
	Ok(())
}

/// Update the fields given on the command line and write the file back.
pub fn set(ctx: &CommandContext, args: ConfigSetArgs) -> Result<()> {
	if args.base_url.is_none() && args.install_dir.is_none() && args.adb_path.is_none() {
		return Err(CliError::Config(
			"config set needs at least one of --base-url, --install-dir, --adb-path".into(),
		));
	}
	if let Some(url) = &args.base_url {
		validate_base_url(url)?;
	}

	let mut file = ctx.file.clone();
	file.merge(&CliConfig {
		base_url: args.base_url,
		install_dir: args.install_dir,
		adb_path: args.adb_path,
	});
	file.save(&ctx.paths.config_file)?;
	info!(target = "andropy", path = %ctx.paths.config_file.display(), "configuration saved");

	let env = CliConfig::from_env();
	let settings = Settings::resolve(&[&file, &env], andropy_runtime::dirs::default_install_dir)?;
	emit_config(ctx, "config set", file, settings);
	Ok(())
}

fn emit_config(ctx: &CommandContext, command: &str, file: CliConfig, settings: Settings) {
	ctx.emit(ResultBuilder::new(command).data(ConfigData {
		path: ctx.paths.config_file.clone(),
		file,
		effective: EffectiveSettings {
			base_url: settings.base_url,
			install_dir: settings.install_dir,
			adb_path: settings.adb_path,
		},
	}));
}
