// SPDX-License-Identifier: Apache-2.0 OR MIT
use crate::kind::ArchiveKind;
use std::{
	ffi::OsString,
	fmt,
	path::{Path, PathBuf},
};

/// What an invocation should do to the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
	/// Enumerate the archive's contents.
	List,
	/// Extract `items` (archive-relative names, verbatim from a listing) into
	/// `output_dir`. No items means the whole archive.
	Extract {
		items: Vec<String>,
		output_dir: PathBuf,
	},
	/// Bundle `items` (paths relative to `working_dir`) into the archive.
	Create {
		items: Vec<OsString>,
		working_dir: PathBuf,
	},
}

/// A fully resolved external-program call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
	pub program: &'static str,
	pub args: Vec<OsString>,
	/// Only set for creation; everything else runs in the inherited directory.
	pub working_dir: Option<PathBuf>,
}

impl fmt::Display for Invocation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.program)?;
		for arg in &self.args {
			write!(f, " {}", arg.to_string_lossy())?;
		}
		Ok(())
	}
}

const fn program(kind: ArchiveKind, op: &Operation) -> &'static str {
	match (kind, op) {
		(ArchiveKind::Zip, Operation::Create { .. }) => "zip",
		(ArchiveKind::Zip, _) => "unzip",
		_ => "tar",
	}
}

/// The tar mode letter combined with the compression letter, e.g. `-xzf`.
fn tar_flag(mode: char, kind: ArchiveKind) -> OsString {
	let compression = match kind {
		ArchiveKind::TarGzip => "z",
		ArchiveKind::TarBzip2 => "j",
		ArchiveKind::TarXz => "J",
		ArchiveKind::TarPlain | ArchiveKind::Zip => "",
	};
	format!("-{mode}{compression}f").into()
}

/// Builds the program and argument vector for `op` on an archive of `kind`.
///
/// Item names are passed through untouched: the archive tool matches them
/// verbatim against the paths stored inside the archive.
pub fn build(op: &Operation, kind: ArchiveKind, archive: &Path) -> Invocation {
	let archive = archive.as_os_str().to_owned();
	let mut args: Vec<OsString> = Vec::new();
	let mut working_dir = None;

	match op {
		Operation::List => {
			if kind.is_tar() {
				args.push(tar_flag('t', kind));
			} else {
				args.push("-l".into());
			}
			args.push(archive);
		}
		Operation::Extract { items, output_dir } => {
			if kind.is_tar() {
				args.extend([tar_flag('x', kind), archive, "-C".into()]);
				args.push(output_dir.as_os_str().to_owned());
				args.extend(items.iter().map(OsString::from));
			} else {
				args.extend(["-o".into(), archive]);
				args.extend(items.iter().map(OsString::from));
				args.extend(["-d".into(), output_dir.as_os_str().to_owned()]);
			}
		}
		Operation::Create {
			items,
			working_dir: dir,
		} => {
			if kind.is_tar() {
				args.push(tar_flag('c', kind));
			} else {
				args.push("-r".into());
			}
			args.push(archive);
			args.extend(items.iter().cloned());
			working_dir = Some(dir.clone());
		}
	}

	Invocation {
		program: program(kind, op),
		args,
		working_dir,
	}
}
