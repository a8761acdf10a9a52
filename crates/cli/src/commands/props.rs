use std::collections::BTreeMap;

use crate::cli::PropsArgs;
use crate::commands::CommandContext;
use crate::error::Result;
use crate::output::{DiagnosticLevel, PropData, PropsData, ResultBuilder};

pub fn execute(ctx: &CommandContext, args: &PropsArgs) -> Result<()> {
	let session = ctx.open_session()?;
	let props = session.build_props()?;

	match &args.key {
		Some(key) => {
			let value = props.get(key).map(str::to_string);
			let mut builder = ResultBuilder::new("props");
			if value.is_none() {
				builder = builder.diagnostic(
					DiagnosticLevel::Warning,
					format!("property {key} is not set"),
				);
			}
			ctx.emit(builder.data(PropData {
				key: key.clone(),
				value,
			}));
		}
		None => {
			let properties: BTreeMap<String, String> = props.into_inner().into_iter().collect();
			ctx.emit(ResultBuilder::new("props").data(PropsData {
				count: properties.len(),
				properties,
			}));
		}
	}
	Ok(())
}
