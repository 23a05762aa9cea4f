// SPDX-License-Identifier: Apache-2.0 OR MIT
use crate::{
	command::{self, Invocation, Operation},
	error::{Error, Result},
	kind::ArchiveKind,
	listing::{self, Entry},
	runner::{ProcessOutput, ProcessRunner},
	staging::{self, PendingCreation},
};
use log::{info, warn};
use std::path::{Component, Path, PathBuf};

/// Asks the user a yes/no question. Declining aborts the operation quietly.
pub trait Prompter {
	fn confirm(&mut self, question: &str) -> bool;
}

impl<P: Prompter + ?Sized> Prompter for Box<P> {
	fn confirm(&mut self, question: &str) -> bool {
		(**self).confirm(question)
	}
}

/// The archive currently open for browsing and extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveHandle {
	pub path: PathBuf,
	pub kind: ArchiveKind,
	pub entries: Vec<Entry>,
}

/// The result of one session call, ready to be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationOutcome {
	pub success: bool,
	pub message: String,
	/// Only present for a successful open.
	pub entries: Option<Vec<Entry>>,
	/// The user declined an overwrite; nothing ran and nothing should be shown.
	pub aborted: bool,
}

impl OperationOutcome {
	fn succeeded(message: String) -> Self {
		Self {
			success: true,
			message,
			entries: None,
			aborted: false,
		}
	}

	fn failed(context: &str, err: &Error) -> Self {
		warn!("{context}: {err}");
		Self {
			success: false,
			message: format!("{context}:\n\n{}", failure_detail(err)),
			entries: None,
			aborted: false,
		}
	}

	const fn declined() -> Self {
		Self {
			success: false,
			message: String::new(),
			entries: None,
			aborted: true,
		}
	}
}

/// Process output speaks for itself; everything else is described by the error.
fn failure_detail(err: &Error) -> String {
	match err {
		Error::NonZeroExit { output, .. } | Error::EmptyListing { output } => output.trim().to_owned(),
		_ => err.to_string(),
	}
}

/// Whether a session call ran to completion or was declined at a prompt.
enum Step {
	Done,
	Declined,
}

/// Drives archive operations one at a time.
///
/// Every call blocks until its single external process has finished, and
/// holds `&mut self` while it does, so a second operation can never start
/// while one is in flight.
pub struct Session<R> {
	runner: R,
	archive: Option<ArchiveHandle>,
	pending: PendingCreation,
}

impl<R: ProcessRunner> Session<R> {
	pub fn new(runner: R) -> Self {
		Self {
			runner,
			archive: None,
			pending: PendingCreation::default(),
		}
	}

	/// The open archive, if any.
	#[inline]
	pub const fn archive(&self) -> Option<&ArchiveHandle> {
		self.archive.as_ref()
	}

	#[inline]
	pub const fn pending(&self) -> &PendingCreation {
		&self.pending
	}

	#[inline]
	pub const fn runner(&self) -> &R {
		&self.runner
	}

	/// Forgets the open archive.
	pub fn close(&mut self) {
		self.archive = None;
	}

	/// Replaces the staged paths with a fresh drop.
	pub fn stage<I, P>(&mut self, paths: I) -> &PendingCreation
	where
		I: IntoIterator<Item = P>,
		P: Into<PathBuf>,
	{
		self.pending = PendingCreation::new(paths);
		&self.pending
	}

	/// Lists `path` and, on success, makes it the open archive.
	pub fn open(&mut self, path: impl AsRef<Path>) -> OperationOutcome {
		let path = path.as_ref();
		match self.try_open(path) {
			Ok(handle) => {
				let name = path
					.file_name()
					.map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
				info!("loaded {} ({} entries)", path.display(), handle.entries.len());
				let mut outcome = OperationOutcome::succeeded(format!("Archive loaded: {name}"));
				outcome.entries = Some(handle.entries.clone());
				self.archive = Some(handle);
				outcome
			}
			Err(err) => OperationOutcome::failed("Failed to read archive", &err),
		}
	}

	/// Extracts the named entries into `output_dir`.
	pub fn extract_selected(
		&mut self,
		items: &[String],
		output_dir: impl AsRef<Path>,
		prompter: &mut impl Prompter,
	) -> OperationOutcome {
		let output_dir = output_dir.as_ref();
		match self.try_extract_selected(items, output_dir, prompter) {
			Ok(Step::Done) => OperationOutcome::succeeded(format!(
				"Extracted {} item(s) to:\n{}",
				items.len(),
				output_dir.display()
			)),
			Ok(Step::Declined) => OperationOutcome::declined(),
			Err(err) => OperationOutcome::failed("Extraction failed", &err),
		}
	}

	/// Extracts the whole open archive into `output_dir`.
	pub fn extract_all(&mut self, output_dir: impl AsRef<Path>, prompter: &mut impl Prompter) -> OperationOutcome {
		let output_dir = output_dir.as_ref();
		match self.try_extract_all(output_dir, prompter) {
			Ok(Step::Done) => {
				OperationOutcome::succeeded(format!("Extracted entire archive to:\n{}", output_dir.display()))
			}
			Ok(Step::Declined) => OperationOutcome::declined(),
			Err(err) => OperationOutcome::failed("Extraction failed", &err),
		}
	}

	/// Bundles `paths` into a new archive at `target`, whose suffix selects the
	/// format. The open archive, if any, is left alone.
	pub fn create_archive(
		&mut self,
		paths: &[PathBuf],
		target: impl AsRef<Path>,
		prompter: &mut impl Prompter,
	) -> OperationOutcome {
		let target = target.as_ref();
		match self.try_create(paths, target, prompter) {
			Ok(Step::Done) => OperationOutcome::succeeded(format!("Archive created:\n{}", target.display())),
			Ok(Step::Declined) => OperationOutcome::declined(),
			Err(err) => OperationOutcome::failed("Failed to create archive", &err),
		}
	}

	/// [`Session::create_archive`] over the staged paths.
	pub fn create_from_staged(&mut self, target: impl AsRef<Path>, prompter: &mut impl Prompter) -> OperationOutcome {
		let paths = self.pending.paths().to_vec();
		self.create_archive(&paths, target, prompter)
	}

	fn execute(&mut self, invocation: &Invocation) -> Result<ProcessOutput> {
		let output = self.runner.run(invocation)?;
		if !output.success() {
			return Err(Error::NonZeroExit {
				program: invocation.program.to_owned(),
				code: output.code,
				output: output.output,
			});
		}
		Ok(output)
	}

	fn try_open(&mut self, path: &Path) -> Result<ArchiveHandle> {
		let kind = ArchiveKind::detect(path);
		let output = self.execute(&command::build(&Operation::List, kind, path))?;
		let entries = listing::parse(kind, &output.output)?;
		Ok(ArchiveHandle {
			path: path.to_path_buf(),
			kind,
			entries,
		})
	}

	fn try_extract_selected(
		&mut self,
		items: &[String],
		output_dir: &Path,
		prompter: &mut impl Prompter,
	) -> Result<Step> {
		let handle = self.archive.as_ref().ok_or(Error::NoArchive)?;
		if items.is_empty() {
			return Err(Error::NoSelection);
		}
		if !confirm_overwrite(items.iter().map(String::as_str), output_dir, prompter) {
			return Ok(Step::Declined);
		}
		let op = Operation::Extract {
			items: items.to_vec(),
			output_dir: output_dir.to_path_buf(),
		};
		let invocation = command::build(&op, handle.kind, &handle.path);
		self.execute(&invocation)?;
		info!("extracted {} item(s) into {}", items.len(), output_dir.display());
		Ok(Step::Done)
	}

	fn try_extract_all(&mut self, output_dir: &Path, prompter: &mut impl Prompter) -> Result<Step> {
		let handle = self.archive.as_ref().ok_or(Error::NoArchive)?;
		let names = handle.entries.iter().map(|entry| entry.name.as_str());
		if !confirm_overwrite(names, output_dir, prompter) {
			return Ok(Step::Declined);
		}
		let op = Operation::Extract {
			items: Vec::new(),
			output_dir: output_dir.to_path_buf(),
		};
		let invocation = command::build(&op, handle.kind, &handle.path);
		self.execute(&invocation)?;
		info!("extracted every entry into {}", output_dir.display());
		Ok(Step::Done)
	}

	fn try_create(&mut self, paths: &[PathBuf], target: &Path, prompter: &mut impl Prompter) -> Result<Step> {
		if paths.is_empty() {
			return Err(Error::NoItems);
		}
		let parent = staging::common_parent(paths)?;
		if target.exists() {
			let question = format!(
				"The file '{}' already exists. Do you want to overwrite it?",
				target.display()
			);
			if !prompter.confirm(&question) {
				return Ok(Step::Declined);
			}
		}
		// The tool runs inside the parent directory, so a relative target
		// has to be pinned down first.
		let target = std::path::absolute(target)?;
		let kind = ArchiveKind::detect(&target);
		let op = Operation::Create {
			items: parent.names,
			working_dir: parent.dir,
		};
		self.execute(&command::build(&op, kind, &target))?;
		info!("created {} from {} item(s)", target.display(), paths.len());
		Ok(Step::Done)
	}
}

/// Asks once, naming the first entry that already exists in `output_dir`.
/// Returns `true` when extraction may proceed.
fn confirm_overwrite<'a>(
	names: impl IntoIterator<Item = &'a str>,
	output_dir: &Path,
	prompter: &mut impl Prompter,
) -> bool {
	let Some(existing) = names
		.into_iter()
		.find(|name| extraction_target(output_dir, name).exists())
	else {
		return true;
	};
	let question = format!(
		"'{existing}' already exists in '{}'. Overwrite?",
		output_dir.display()
	);
	prompter.confirm(&question)
}

/// Where `name` lands under `output_dir`. Absolute member names (as stored by
/// `tar -P`) still land inside `output_dir`, so their root is dropped rather
/// than letting it replace the directory.
fn extraction_target(output_dir: &Path, name: &str) -> PathBuf {
	let relative: PathBuf = Path::new(name)
		.components()
		.filter(|component| !matches!(component, Component::RootDir | Component::Prefix(_)))
		.collect();
	output_dir.join(relative)
}
