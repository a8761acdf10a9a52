use crate::cli::RebootArgs;
use crate::commands::CommandContext;
use crate::error::Result;
use crate::output::{DiagnosticLevel, RebootData, ResultBuilder};

/// Unknown targets are not an error: nothing is invoked and a warning is attached.
pub fn execute(ctx: &CommandContext, args: &RebootArgs) -> Result<()> {
	let session = ctx.open_session()?;
	let issued = session.reboot_named(&args.target)?;

	let mut builder = ResultBuilder::new("reboot");
	if !issued {
		builder = builder.diagnostic(
			DiagnosticLevel::Warning,
			format!("Invalid reboot option: {}", args.target),
		);
	}
	ctx.emit(builder.data(RebootData {
		target: args.target.clone(),
		issued,
	}));
	Ok(())
}
