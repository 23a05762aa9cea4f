// SPDX-License-Identifier: Apache-2.0 OR MIT
use regex::Regex;
use std::{
	ffi::OsString,
	fmt,
	path::{Path, PathBuf},
	str::FromStr,
	sync::OnceLock,
};

/// The container/compression combinations that can be listed, extracted, and
/// created.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ArchiveKind {
	Zip,
	TarPlain,
	TarGzip,
	TarBzip2,
	TarXz,
}

/// Most specific suffix first, so `.tar.gz` wins over `.tar`.
const SUFFIXES: [(&str, ArchiveKind); 5] = [
	(".tar.gz", ArchiveKind::TarGzip),
	(".tar.bz2", ArchiveKind::TarBzip2),
	(".tar.xz", ArchiveKind::TarXz),
	(".zip", ArchiveKind::Zip),
	(".tar", ArchiveKind::TarPlain),
];

impl ArchiveKind {
	/// Classifies an archive path by its suffix, ignoring case.
	///
	/// Unrecognised suffixes fall back to [`ArchiveKind::TarPlain`]; the
	/// external tool is left to reject files that are not tarballs.
	pub fn detect(path: impl AsRef<Path>) -> Self {
		let name = path.as_ref().to_string_lossy().to_lowercase();
		SUFFIXES
			.iter()
			.find(|(suffix, _)| name.ends_with(suffix))
			.map(|(_, kind)| *kind)
			.unwrap_or(Self::TarPlain)
	}

	/// Maps a save-dialog filter label such as `"Tar GZ (*.tar.gz)"` to a kind.
	/// Anything that names no known compressed suffix means a plain tarball.
	pub fn from_filter_label(label: &str) -> Self {
		let label = label.to_lowercase();
		[
			(".tar.gz", Self::TarGzip),
			(".tar.bz2", Self::TarBzip2),
			(".tar.xz", Self::TarXz),
			(".zip", Self::Zip),
		]
		.into_iter()
		.find(|(suffix, _)| label.contains(suffix))
		.map(|(_, kind)| kind)
		.unwrap_or(Self::TarPlain)
	}

	/// The canonical file name suffix, leading dot included.
	pub const fn suffix(self) -> &'static str {
		match self {
			Self::Zip => ".zip",
			Self::TarPlain => ".tar",
			Self::TarGzip => ".tar.gz",
			Self::TarBzip2 => ".tar.bz2",
			Self::TarXz => ".tar.xz",
		}
	}

	pub const fn is_tar(self) -> bool {
		!matches!(self, Self::Zip)
	}
}

impl fmt::Display for ArchiveKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.suffix()[1..])
	}
}

impl FromStr for ArchiveKind {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let name = s.trim().trim_start_matches('.').to_lowercase();
		match name.as_str() {
			"zip" => Ok(Self::Zip),
			"tar" => Ok(Self::TarPlain),
			"tar.gz" | "tgz" | "gz" => Ok(Self::TarGzip),
			"tar.bz2" | "tbz2" | "bz2" => Ok(Self::TarBzip2),
			"tar.xz" | "txz" | "xz" => Ok(Self::TarXz),
			_ => Err(format!(
				"unknown archive format '{s}' (expected zip, tar, tar.gz, tar.bz2 or tar.xz)"
			)),
		}
	}
}

fn recognised_suffix() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	RE.get_or_init(|| {
		Regex::new(r"(?i)\.(?:zip|tar(?:\.(?:gz|bz2|xz))?)$").expect("suffix pattern is valid")
	})
}

/// Appends `kind`'s suffix to `path` unless it already ends in a recognised
/// archive suffix. The chosen format decides, not the path's current name.
pub fn repair_extension(path: impl AsRef<Path>, kind: ArchiveKind) -> PathBuf {
	let path = path.as_ref();
	if recognised_suffix().is_match(&path.to_string_lossy()) {
		return path.to_path_buf();
	}
	let mut repaired = OsString::from(path.as_os_str());
	repaired.push(kind.suffix());
	PathBuf::from(repaired)
}

#[cfg(test)]
mod test {
	use super::{repair_extension, ArchiveKind};
	use std::path::PathBuf;

	#[test]
	fn test_detect_known_suffixes() {
		let cases = [
			("/tmp/a.zip", ArchiveKind::Zip),
			("/tmp/a.tar", ArchiveKind::TarPlain),
			("/tmp/a.tar.gz", ArchiveKind::TarGzip),
			("/tmp/a.tar.bz2", ArchiveKind::TarBzip2),
			("/tmp/a.tar.xz", ArchiveKind::TarXz),
			("/tmp/A.TAR.GZ", ArchiveKind::TarGzip),
			("Backup.Zip", ArchiveKind::Zip),
		];
		for (path, kind) in cases {
			assert_eq!(ArchiveKind::detect(path), kind, "{path}");
		}
	}

	#[test]
	fn test_detect_falls_back_to_plain_tar() {
		for path in ["a.rar", "a.7z", "a.gz", "a.tgz", "no_extension", ""] {
			assert_eq!(ArchiveKind::detect(path), ArchiveKind::TarPlain, "{path}");
		}
	}

	#[test]
	fn test_filter_labels() {
		assert_eq!(ArchiveKind::from_filter_label("Tar (*.tar)"), ArchiveKind::TarPlain);
		assert_eq!(ArchiveKind::from_filter_label("Tar GZ (*.tar.gz)"), ArchiveKind::TarGzip);
		assert_eq!(ArchiveKind::from_filter_label("Tar BZ2 (*.tar.bz2)"), ArchiveKind::TarBzip2);
		assert_eq!(ArchiveKind::from_filter_label("Zip (*.zip)"), ArchiveKind::Zip);
		assert_eq!(ArchiveKind::from_filter_label("Tar XZ (*.tar.xz)"), ArchiveKind::TarXz);
		assert_eq!(ArchiveKind::from_filter_label(""), ArchiveKind::TarPlain);
	}

	#[test]
	fn test_parse_short_names() {
		assert_eq!("zip".parse::<ArchiveKind>(), Ok(ArchiveKind::Zip));
		assert_eq!(".tar.xz".parse::<ArchiveKind>(), Ok(ArchiveKind::TarXz));
		assert_eq!("TGZ".parse::<ArchiveKind>(), Ok(ArchiveKind::TarGzip));
		assert!("rar".parse::<ArchiveKind>().is_err());
		assert_eq!(ArchiveKind::TarBzip2.to_string(), "tar.bz2");
	}

	#[test]
	fn test_repair_extension() {
		assert_eq!(
			repair_extension("/home/u/archive", ArchiveKind::TarGzip),
			PathBuf::from("/home/u/archive.tar.gz")
		);
		assert_eq!(
			repair_extension("/home/u/archive.ZIP", ArchiveKind::TarXz),
			PathBuf::from("/home/u/archive.ZIP")
		);
		assert_eq!(
			repair_extension("/home/u/notes.txt", ArchiveKind::TarPlain),
			PathBuf::from("/home/u/notes.txt.tar")
		);
		assert_eq!(
			repair_extension("/home/u/a.gz", ArchiveKind::Zip),
			PathBuf::from("/home/u/a.gz.zip")
		);
	}
}
