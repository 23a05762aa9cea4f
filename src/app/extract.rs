// SPDX-License-Identifier: Apache-2.0 OR MIT
use super::{args::ExtractArgs, report};
use archivist::{Entry, ProcessRunner, Prompter, Session};
use color_eyre::{eyre::eyre, Result};
use log::{debug, info};
use std::path::Path;
use wax::{Glob, Pattern};

pub fn extract(args: ExtractArgs, runner: impl ProcessRunner, prompter: &mut impl Prompter) -> Result<()> {
	let mut session = Session::new(runner);
	let opened = session.open(&args.archive);
	if !opened.success {
		return Err(eyre!(opened.message));
	}
	info!("{}", opened.message);
	let entries = opened.entries.unwrap_or_default();

	let items = match &args.glob {
		Some(pattern) => select(&entries, pattern)?,
		None => args.items,
	};
	let outcome = if items.is_empty() && args.glob.is_none() {
		session.extract_all(&args.destination, prompter)
	} else {
		session.extract_selected(&items, &args.destination, prompter)
	};
	report(outcome)
}

/// Entry names matching `pattern`, in listing order.
fn select(entries: &[Entry], pattern: &str) -> Result<Vec<String>> {
	let glob = Glob::new(pattern).map_err(|err| eyre!("failed to parse --glob: {}", err))?;
	let selected: Vec<String> = entries
		.iter()
		.filter(|entry| glob.is_match(Path::new(&entry.name)))
		.map(|entry| entry.name.clone())
		.collect();
	debug!("--glob {pattern} selected {} of {} entries", selected.len(), entries.len());
	Ok(selected)
}
