use andropy::Provisioner;

use crate::cli::InstallArgs;
use crate::commands::CommandContext;
use crate::config::CliConfig;
use crate::error::{CliError, Result};
use crate::output::{InstallData, InstalledToolData, ResultBuilder};

pub fn execute(ctx: &CommandContext, args: &InstallArgs) -> Result<()> {
	if args.no_adb && !args.fastboot {
		return Err(CliError::Config(
			"nothing to install: --no-adb without --fastboot".into(),
		));
	}

	let flags = CliConfig {
		base_url: args.base_url.clone(),
		install_dir: args.install_dir.clone(),
		adb_path: None,
	};
	let settings = ctx.settings(&flags)?;

	let provisioner = Provisioner::new(!args.no_adb, args.fastboot)?
		.with_install_dir(settings.install_dir)
		.with_base_url(settings.base_url);
	let report = provisioner.execute()?;

	let platform = provisioner.platform();
	ctx.emit(ResultBuilder::new("install").data(InstallData {
		install_dir: report.install_dir,
		os: platform.os().to_string(),
		arch: platform.arch().to_string(),
		installed: report
			.installed
			.into_iter()
			.map(|tool| InstalledToolData {
				tool: tool.tool.to_string(),
				url: tool.url,
				path: tool.path,
				size_bytes: tool.bytes,
			})
			.collect(),
	}));
	Ok(())
}
