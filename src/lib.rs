// SPDX-License-Identifier: Apache-2.0 OR MIT
#![forbid(unsafe_code)]
#![warn(
	clippy::perf,
	clippy::complexity,
	clippy::style,
	clippy::correctness,
	clippy::missing_const_for_fn
)]
#![allow(clippy::tabs_in_doc_comments)]

//! This crate lists, extracts, and creates `.zip`, `.tar`, `.tar.gz`,
//! `.tar.bz2` and `.tar.xz` archives by driving the system's `tar`, `zip` and
//! `unzip` programs. It never touches archive bytes itself: it picks the
//! format from the file name, builds the command line, runs it, and parses
//! what the listing tool prints.
//!
//! # Examples
//!
//! ## Listing an archive
//! ```rust,no_run
//! use archivist::{Session, SystemRunner};
//!
//! let mut session = Session::new(SystemRunner::default());
//! let outcome = session.open("backup.tar.gz");
//! for entry in outcome.entries.unwrap_or_default() {
//! 	println!("{}", entry.name);
//! }
//! ```
//!
//! ## Building a command without running it
//! ```rust
//! use archivist::{command::{self, Operation}, ArchiveKind};
//! use std::path::Path;
//!
//! let path = Path::new("photos.tar.xz");
//! let invocation = command::build(&Operation::List, ArchiveKind::detect(path), path);
//! assert_eq!(invocation.to_string(), "tar -tJf photos.tar.xz");
//! ```
//!
//! ## Creating an archive
//! ```rust,no_run
//! use archivist::{Prompter, Session, SystemRunner};
//!
//! struct AlwaysYes;
//!
//! impl Prompter for AlwaysYes {
//! 	fn confirm(&mut self, _question: &str) -> bool {
//! 		true
//! 	}
//! }
//!
//! let mut session = Session::new(SystemRunner::default());
//! session.stage(["/home/me/notes.txt", "/home/me/drafts"]);
//! let outcome = session.create_from_staged("/home/me/notes.zip", &mut AlwaysYes);
//! assert!(outcome.success, "{}", outcome.message);
//! ```
//!
//! # License
//!
//! `archivist` is licensed under either the MIT license or the Apache License
//! 2.0, at the choice of the user.

/// Program and argument vectors for each format and operation.
pub mod command;
/// Error handling for archive operations.
pub mod error;
/// Archive format detection from file names.
pub mod kind;
/// Parsing the output of listing tools.
pub mod listing;
/// Running external programs.
pub mod runner;
/// The stateful front door: open, extract, create.
pub mod session;
/// Paths staged for archive creation.
pub mod staging;

pub use error::{Error, LaunchCause, Result};
pub use kind::{repair_extension, ArchiveKind};
pub use listing::Entry;
pub use runner::{ProcessOutput, ProcessRunner, RunnerConfig, SystemRunner};
pub use session::{ArchiveHandle, OperationOutcome, Prompter, Session};
pub use staging::PendingCreation;

#[cfg(all(test, unix))]
mod test {
	use crate::{ArchiveKind, Prompter, Session, SystemRunner};
	use std::{fs, process::Command};

	struct Yes;

	impl Prompter for Yes {
		fn confirm(&mut self, _question: &str) -> bool {
			true
		}
	}

	fn have(program: &str) -> bool {
		Command::new(program).arg("--version").output().is_ok()
	}

	#[test]
	fn test_tar_round_trip() {
		if !have("tar") {
			return;
		}
		let src = tempfile::tempdir().expect("failed to create source dir");
		let out = tempfile::tempdir().expect("failed to create output dir");
		fs::write(src.path().join("hello world.txt"), "Hello, World!").expect("failed to write file");
		fs::create_dir(src.path().join("nested")).expect("failed to create dir");
		fs::write(src.path().join("nested").join("inner.txt"), "inner").expect("failed to write file");

		let archive = out.path().join("bundle.tar.gz");
		let mut session = Session::new(SystemRunner::default());
		session.stage([src.path().join("hello world.txt"), src.path().join("nested")]);
		let created = session.create_from_staged(&archive, &mut Yes);
		assert!(created.success, "{}", created.message);

		let opened = session.open(&archive);
		assert!(opened.success, "{}", opened.message);
		let handle = session.archive().expect("archive should be open");
		assert_eq!(handle.kind, ArchiveKind::TarGzip);
		let names: Vec<&str> = handle.entries.iter().map(|entry| entry.name.as_str()).collect();
		assert!(names.contains(&"hello world.txt"), "{names:?}");
		assert!(names.contains(&"nested/inner.txt"), "{names:?}");

		let dest = out.path().join("extracted");
		fs::create_dir(&dest).expect("failed to create destination");
		let extracted = session.extract_all(&dest, &mut Yes);
		assert!(extracted.success, "{}", extracted.message);
		let contents = fs::read_to_string(dest.join("nested").join("inner.txt")).expect("failed to read extracted file");
		assert_eq!(contents, "inner");
	}
}
