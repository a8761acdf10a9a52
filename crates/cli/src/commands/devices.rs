use crate::commands::CommandContext;
use crate::error::Result;
use crate::output::{DevicesData, ResultBuilder};

pub fn execute(ctx: &CommandContext) -> Result<()> {
	let session = ctx.open_session()?;
	let devices = session.devices()?;

	ctx.emit(ResultBuilder::new("devices").data(DevicesData {
		count: devices.len(),
		devices,
	}));
	Ok(())
}
