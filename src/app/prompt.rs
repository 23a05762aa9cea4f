// SPDX-License-Identifier: Apache-2.0 OR MIT
use archivist::Prompter;
use std::io::{self, BufRead, Write};

/// Asks on the terminal; anything but `y`/`yes` is a no.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
	fn confirm(&mut self, question: &str) -> bool {
		let mut stderr = io::stderr().lock();
		if write!(stderr, "{question} [y/N] ").and_then(|_| stderr.flush()).is_err() {
			return false;
		}
		let mut answer = String::new();
		if io::stdin().lock().read_line(&mut answer).is_err() {
			return false;
		}
		is_yes(&answer)
	}
}

/// For `--yes`.
pub struct AlwaysYes;

impl Prompter for AlwaysYes {
	fn confirm(&mut self, _question: &str) -> bool {
		true
	}
}

fn is_yes(answer: &str) -> bool {
	matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
