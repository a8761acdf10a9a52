use crate::commands::CommandContext;
use crate::error::Result;
use crate::output::ResultBuilder;

pub fn execute(ctx: &CommandContext) -> Result<()> {
	let session = ctx.open_session()?;
	let summary = session.summary()?;

	ctx.emit(ResultBuilder::new("info").data(summary));
	Ok(())
}
