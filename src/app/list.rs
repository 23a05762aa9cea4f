// SPDX-License-Identifier: Apache-2.0 OR MIT
use super::args::ListArgs;
use archivist::{ProcessRunner, Session};
use color_eyre::{
	eyre::{eyre, WrapErr},
	Result,
};
use log::info;

pub fn list(args: ListArgs, runner: impl ProcessRunner) -> Result<()> {
	let mut session = Session::new(runner);
	let outcome = session.open(&args.archive);
	if !outcome.success {
		return Err(eyre!(outcome.message));
	}
	info!("{}", outcome.message);
	let entries = outcome.entries.unwrap_or_default();
	if args.json {
		let json = serde_json::to_string_pretty(&entries).wrap_err("failed to serialize entries")?;
		println!("{json}");
	} else {
		for entry in &entries {
			println!("{}", entry.name);
		}
	}

	Ok(())
}
