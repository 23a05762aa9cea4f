// SPDX-License-Identifier: Apache-2.0 OR MIT
use crate::{
	error::{Error, Result},
	kind::ArchiveKind,
};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// One named item inside an archive, exactly as the listing tool reported it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Entry {
	pub name: String,
}

impl Entry {
	pub fn new(name: impl Into<String>) -> Self {
		Self { name: name.into() }
	}
}

/// Turns the captured output of a listing invocation into entries.
///
/// An empty result is an error even when the tool exited cleanly, since
/// nothing could be selected for extraction afterwards.
pub fn parse(kind: ArchiveKind, raw: &str) -> Result<Vec<Entry>> {
	let entries = if kind.is_tar() {
		parse_tar(raw)
	} else {
		parse_unzip(raw)
	};
	if entries.is_empty() {
		return Err(Error::EmptyListing {
			output: raw.trim().to_owned(),
		});
	}
	Ok(entries)
}

/// `tar -t` prints one member per line.
fn parse_tar(raw: &str) -> Vec<Entry> {
	raw.lines()
		.filter(|line| !line.trim().is_empty())
		.map(Entry::new)
		.collect()
}

/// Size, date (hyphens optional), and time anchor the row; the name is
/// whatever follows, spaces included.
fn unzip_row() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	RE.get_or_init(|| {
		Regex::new(r"^\s*\d+\s+\d{4}-?\d{2}-?\d{2}\s+\d{2}:\d{2}\s+(.+)$")
			.expect("unzip row pattern is valid")
	})
}

/// `unzip -l` frames its table with two dashed rows:
///
/// ```text
///   Length      Date    Time    Name
/// ---------  ---------- -----   ----
///       123  2024-01-02 03:04   my file.txt
/// ---------                     -------
///       123                     1 file
/// ```
///
/// Rows between the dashes that do not fit the column pattern are skipped.
fn parse_unzip(raw: &str) -> Vec<Entry> {
	let lines: Vec<&str> = raw.lines().filter(|line| !line.is_empty()).collect();
	let mut separators = lines
		.iter()
		.enumerate()
		.filter(|(_, line)| line.trim().starts_with("----"))
		.map(|(idx, _)| idx);
	let (Some(start), Some(end)) = (separators.next(), separators.next()) else {
		return Vec::new();
	};

	lines[start + 1..end]
		.iter()
		.filter_map(|line| unzip_row().captures(line.trim()))
		.filter_map(|captures| captures.get(1))
		.map(|name| Entry::new(name.as_str().trim()))
		.collect()
}

#[cfg(test)]
mod test {
	use super::{parse, Entry};
	use crate::{error::Error, kind::ArchiveKind};

	static UNZIP_LISTING: &str = "Archive:  test.zip
  Length      Date    Time    Name
---------  ---------- -----   ----
        0  2024-01-02 03:04   docs/
     1234  2024-01-02 03:04   docs/read me.txt
      123  2024-01-02 03:04   my file.txt
       42  20240105 17:30   compact.bin
---------                     -------
     1399                     4 files
";

	fn names(entries: &[Entry]) -> Vec<&str> {
		entries.iter().map(|entry| entry.name.as_str()).collect()
	}

	#[test]
	fn test_tar_lines() {
		let entries = parse(ArchiveKind::TarGzip, "a.txt\nb/c.txt\n").expect("failed to parse");
		assert_eq!(names(&entries), ["a.txt", "b/c.txt"]);
	}

	#[test]
	fn test_tar_drops_blank_lines() {
		let entries =
			parse(ArchiveKind::TarPlain, "\na.txt\n\n\nb/\n  \nb/with space.txt\n").expect("failed to parse");
		assert_eq!(names(&entries), ["a.txt", "b/", "b/with space.txt"]);
	}

	#[test]
	fn test_tar_empty_output() {
		let err = parse(ArchiveKind::TarXz, "\n\n").expect_err("empty listing should fail");
		assert!(matches!(err, Error::EmptyListing { .. }));
	}

	#[test]
	fn test_unzip_single_row() {
		let raw = "---------  ---------- -----   ----\n      123  2024-01-02 03:04   my file.txt\n---------                     -------\n";
		let entries = parse(ArchiveKind::Zip, raw).expect("failed to parse");
		assert_eq!(names(&entries), ["my file.txt"]);
	}

	#[test]
	fn test_unzip_full_listing() {
		let entries = parse(ArchiveKind::Zip, UNZIP_LISTING).expect("failed to parse");
		assert_eq!(
			names(&entries),
			["docs/", "docs/read me.txt", "my file.txt", "compact.bin"]
		);
	}

	#[test]
	fn test_unzip_skips_unmatched_rows() {
		let raw = "---------\n  garbage row\n       5  2024-01-02 03:04   kept.txt\n---------\n";
		let entries = parse(ArchiveKind::Zip, raw).expect("failed to parse");
		assert_eq!(names(&entries), ["kept.txt"]);
	}

	#[test]
	fn test_unzip_single_separator() {
		let raw = "---------  ---------- -----   ----\n      123  2024-01-02 03:04   my file.txt\n";
		let err = parse(ArchiveKind::Zip, raw).expect_err("malformed listing should fail");
		assert!(matches!(err, Error::EmptyListing { .. }));
	}

	#[test]
	fn test_unzip_no_interior_rows() {
		let raw = "---------  ---------- -----   ----\n---------                     -------\n        0                     0 files\n";
		let err = parse(ArchiveKind::Zip, raw).expect_err("empty table should fail");
		assert!(matches!(err, Error::EmptyListing { .. }));
	}

	#[test]
	fn test_unzip_foreign_date_layout() {
		let raw = "---------  ---------- -----   ----\n      123  01-02-2024 03:04   my file.txt\n---------                     -------\n";
		let err = parse(ArchiveKind::Zip, raw).expect_err("unknown layout should fail");
		assert!(matches!(err, Error::EmptyListing { .. }));
	}
}
