// SPDX-License-Identifier: Apache-2.0 OR MIT
mod app;

use self::app::{
	args::{AppArgs, AppSubcommand},
	prompt::{AlwaysYes, TerminalPrompter},
};
use archivist::{Prompter, RunnerConfig, SystemRunner};
use clap::Parser;
use color_eyre::{eyre::WrapErr, Result};

fn main() -> Result<()> {
	color_eyre::install().wrap_err("failed to install color-eyre handler")?;
	let args = AppArgs::parse();
	app::logging::init_logging(args.verbose);

	let runner = SystemRunner::new(RunnerConfig {
		timeout: args.timeout,
	});
	let mut prompter: Box<dyn Prompter> = if args.yes {
		Box::new(AlwaysYes)
	} else {
		Box::new(TerminalPrompter)
	};

	match args.subcommand {
		AppSubcommand::List(args) => app::list::list(args, runner).wrap_err("failed to list archive"),
		AppSubcommand::Extract(args) => {
			app::extract::extract(args, runner, &mut prompter).wrap_err("failed to extract archive")
		}
		AppSubcommand::Create(args) => {
			app::create::create(args, runner, &mut prompter).wrap_err("failed to create archive")
		}
	}
}
