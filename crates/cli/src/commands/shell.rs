use crate::cli::ShellArgs;
use crate::commands::CommandContext;
use crate::error::Result;
use crate::output::{ResultBuilder, ShellData};

pub fn execute(ctx: &CommandContext, args: &ShellArgs) -> Result<()> {
	let command = args.joined();
	let session = ctx.open_session()?;
	let lines = session.shell(&command)?;

	ctx.emit(ResultBuilder::new("shell").data(ShellData { command, lines }));
	Ok(())
}
