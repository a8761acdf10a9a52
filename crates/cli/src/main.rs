use andropy_cli::{
	cli::Cli,
	commands,
	error::CliError,
	logging,
	output::{self, OutputFormat, ResultBuilder, Timings},
};
use clap::Parser;
use std::time::Instant;

fn main() {
	let started = Instant::now();
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	let format = cli.format;
	let command = cli.command.name();

	if let Err(err) = commands::dispatch(cli, started) {
		handle_error(&err, command, format, started);
		std::process::exit(err.exit_code());
	}
}

fn handle_error(err: &CliError, command: &str, format: OutputFormat, started: Instant) {
	let cmd_error = err.to_command_error();

	// Always print to stderr for humans
	output::print_error_stderr(&cmd_error);

	// Structured formats also get the envelope on stdout
	if format != OutputFormat::Text {
		let result: output::CommandResult<()> = ResultBuilder::new(command)
			.error_with(cmd_error)
			.timings(Timings::from(started.elapsed()))
			.build();
		output::print_result(&result, format);
	}
}
