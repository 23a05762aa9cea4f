// SPDX-License-Identifier: Apache-2.0 OR MIT
use crate::error::{Error, Result};
use std::{
	ffi::OsString,
	path::{Path, PathBuf},
};

/// Filesystem paths waiting to be bundled into a new archive, in the order
/// the drop source delivered them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingCreation {
	paths: Vec<PathBuf>,
}

impl PendingCreation {
	/// Takes the drop source's paths verbatim, skipping empty ones.
	pub fn new<I, P>(paths: I) -> Self
	where
		I: IntoIterator<Item = P>,
		P: Into<PathBuf>,
	{
		Self {
			paths: paths
				.into_iter()
				.map(Into::into)
				.filter(|path: &PathBuf| !path.as_os_str().is_empty())
				.collect(),
		}
	}

	#[inline]
	pub fn paths(&self) -> &[PathBuf] {
		&self.paths
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.paths.is_empty()
	}
}

/// The directory shared by every staged path, and each path's name relative
/// to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonParent {
	pub dir: PathBuf,
	pub names: Vec<OsString>,
}

fn split(path: &Path) -> Result<(PathBuf, OsString)> {
	let absolute = std::path::absolute(path)?;
	match (absolute.parent(), absolute.file_name()) {
		(Some(parent), Some(name)) => Ok((parent.to_path_buf(), name.to_owned())),
		_ => Err(Error::NoFileName(path.to_path_buf())),
	}
}

/// Checks that all `paths` live directly in the same directory.
///
/// The first path decides the directory; the first path found elsewhere is
/// reported in [`Error::SiblingMismatch`].
pub fn common_parent(paths: &[PathBuf]) -> Result<CommonParent> {
	let (first, rest) = paths.split_first().ok_or(Error::NoItems)?;
	let (dir, name) = split(first)?;
	let mut names = vec![name];
	for path in rest {
		let (parent, name) = split(path)?;
		if parent != dir {
			return Err(Error::SiblingMismatch {
				expected: dir,
				found: path.to_path_buf(),
			});
		}
		names.push(name);
	}
	Ok(CommonParent { dir, names })
}
