// SPDX-License-Identifier: Apache-2.0 OR MIT
use std::{io::Error as IoError, path::PathBuf, time::Duration};
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
	#[error("{program}: {cause}")]
	LaunchFailure { program: String, cause: LaunchCause },
	#[error("{program} exited with {}:\n{output}", exit_description(.code))]
	NonZeroExit {
		program: String,
		code: Option<i32>,
		output: String,
	},
	#[error("no entries could be read from the listing:\n{output}")]
	EmptyListing { output: String },
	#[error("Select one or more items (or use extract all)")]
	NoSelection,
	#[error("Please stage files or folders first")]
	NoItems,
	#[error("All files must reside in the same folder ('{}' is not in '{}')", .found.display(), .expected.display())]
	SiblingMismatch { expected: PathBuf, found: PathBuf },
	#[error("Open an archive first")]
	NoArchive,
	#[error("'{}' has no file name", .0.display())]
	NoFileName(PathBuf),
	#[error("I/O error: {0}")]
	Io(#[from] IoError),
}

impl Error {
	/// Whether the external program never ran to completion, as opposed to
	/// running and reporting a failure itself.
	pub const fn is_launch_failure(&self) -> bool {
		matches!(self, Self::LaunchFailure { .. })
	}
}

/// Why an external program did not produce an exit status.
#[derive(Debug, ThisError)]
pub enum LaunchCause {
	#[error("could not be launched: {0}")]
	Spawn(#[source] IoError),
	#[error("could not be waited on: {0}")]
	Wait(#[source] IoError),
	#[error("did not terminate within {0:?}")]
	TimedOut(Duration),
}

fn exit_description(code: &Option<i32>) -> String {
	match code {
		Some(code) => format!("status {code}"),
		None => "no status (killed by a signal)".to_owned(),
	}
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod test {
	use super::{Error, LaunchCause};
	use std::time::Duration;

	#[test]
	fn test_launch_failure_is_distinct() {
		let timed_out = Error::LaunchFailure {
			program: "tar".into(),
			cause: LaunchCause::TimedOut(Duration::from_secs(30)),
		};
		let non_zero = Error::NonZeroExit {
			program: "tar".into(),
			code: Some(2),
			output: "tar: boom".into(),
		};
		let wait_failed = Error::LaunchFailure {
			program: "unzip".into(),
			cause: LaunchCause::Wait(std::io::Error::other("interrupted")),
		};
		assert!(timed_out.is_launch_failure());
		assert!(wait_failed.is_launch_failure());
		assert_eq!(wait_failed.to_string(), "unzip: could not be waited on: interrupted");
		assert!(!non_zero.is_launch_failure());
		assert_eq!(timed_out.to_string(), "tar: did not terminate within 30s");
		assert_eq!(non_zero.to_string(), "tar exited with status 2:\ntar: boom");
	}
}
