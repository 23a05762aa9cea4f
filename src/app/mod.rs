// SPDX-License-Identifier: Apache-2.0 OR MIT
pub mod args;
pub mod create;
pub mod extract;
pub mod list;
pub mod logging;
pub mod prompt;

use color_eyre::{eyre::eyre, Result};
use log::info;

/// Prints a successful outcome, stays quiet about a declined one, and turns a
/// failure into an error for the handler in `main`.
pub fn report(outcome: archivist::OperationOutcome) -> Result<()> {
	if outcome.aborted {
		info!("nothing done, overwrite declined");
		return Ok(());
	}
	if !outcome.success {
		return Err(eyre!(outcome.message));
	}
	println!("{}", outcome.message);
	Ok(())
}
