// SPDX-License-Identifier: Apache-2.0 OR MIT
use super::{args::CreateArgs, report};
use archivist::{repair_extension, ArchiveKind, ProcessRunner, Prompter, Session};
use color_eyre::Result;
use log::debug;

pub fn create(args: CreateArgs, runner: impl ProcessRunner, prompter: &mut impl Prompter) -> Result<()> {
	let kind = args.format.as_deref().map_or(ArchiveKind::TarPlain, format_kind);
	let output = repair_extension(&args.output, kind);
	debug!("creating {} as {kind}", output.display());

	let mut session = Session::new(runner);
	session.stage(args.paths);
	report(session.create_from_staged(&output, prompter))
}

/// Short names first, then save-dialog style filter labels.
fn format_kind(format: &str) -> ArchiveKind {
	format
		.parse()
		.unwrap_or_else(|_| ArchiveKind::from_filter_label(format))
}

#[cfg(test)]
mod test {
	use super::format_kind;
	use archivist::ArchiveKind;

	#[test]
	fn test_format_kind() {
		assert_eq!(format_kind("zip"), ArchiveKind::Zip);
		assert_eq!(format_kind("tar.bz2"), ArchiveKind::TarBzip2);
		assert_eq!(format_kind("Tar XZ (*.tar.xz)"), ArchiveKind::TarXz);
		assert_eq!(format_kind("whatever"), ArchiveKind::TarPlain);
	}
}
