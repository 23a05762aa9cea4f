// SPDX-License-Identifier: Apache-2.0 OR MIT
use crate::{
	command::Invocation,
	error::{Error, LaunchCause, Result},
};
use log::{debug, warn};
use std::{
	io::Read,
	process::{Child, Command, ExitStatus, Stdio},
	sync::{Arc, Mutex},
	thread::{self, JoinHandle},
	time::{Duration, Instant},
};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Settings for [`SystemRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
	/// How long a child may run before it is killed and reported as a launch
	/// failure.
	pub timeout: Duration,
}

impl Default for RunnerConfig {
	fn default() -> Self {
		Self {
			timeout: Duration::from_secs(30),
		}
	}
}

/// What a finished program left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
	/// `None` when the program was terminated by a signal.
	pub code: Option<i32>,
	/// stdout and stderr interleaved in the order they arrived.
	pub output: String,
}

impl ProcessOutput {
	pub const fn success(&self) -> bool {
		matches!(self.code, Some(0))
	}
}

/// Runs an [`Invocation`] to completion.
///
/// Implementations must block until the program exits (or is given up on) and
/// must report programs that never produced an exit status as
/// [`Error::LaunchFailure`].
pub trait ProcessRunner {
	fn run(&mut self, invocation: &Invocation) -> Result<ProcessOutput>;
}

/// Spawns real child processes.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
	config: RunnerConfig,
}

impl SystemRunner {
	pub const fn new(config: RunnerConfig) -> Self {
		Self { config }
	}

	pub const fn config(&self) -> &RunnerConfig {
		&self.config
	}

	fn wait(&self, program: &str, child: &mut Child, deadline: Instant) -> Result<ExitStatus> {
		loop {
			let polled = child.try_wait().map_err(|err| Error::LaunchFailure {
				program: program.to_owned(),
				cause: LaunchCause::Wait(err),
			})?;
			if let Some(status) = polled {
				return Ok(status);
			}
			if Instant::now() >= deadline {
				warn!("{program} did not finish within {:?}, killing it", self.config.timeout);
				// It may have exited between the poll and the kill.
				let _ = child.kill();
				let _ = child.wait();
				return Err(Error::LaunchFailure {
					program: program.to_owned(),
					cause: LaunchCause::TimedOut(self.config.timeout),
				});
			}
			thread::sleep(POLL_INTERVAL);
		}
	}
}

/// Waits for the output readers until `deadline`. Anything the program forked
/// off may keep the pipes open long after it exited; such readers are left
/// behind and whatever they captured so far is used.
fn join_readers(program: &str, readers: Vec<JoinHandle<()>>, deadline: Instant) {
	let mut pending = readers;
	loop {
		let (finished, running): (Vec<_>, Vec<_>) =
			pending.into_iter().partition(JoinHandle::is_finished);
		for reader in finished {
			let _ = reader.join();
		}
		if running.is_empty() {
			return;
		}
		if Instant::now() >= deadline {
			warn!("{program} exited but its output is still held open, keeping what was captured");
			return;
		}
		pending = running;
		thread::sleep(POLL_INTERVAL);
	}
}

fn drain<R: Read + Send + 'static>(mut source: R, sink: Arc<Mutex<Vec<u8>>>) -> JoinHandle<()> {
	thread::spawn(move || {
		let mut buf = [0_u8; 8 * 1024];
		loop {
			match source.read(&mut buf) {
				Ok(0) | Err(_) => break,
				Ok(read) => match sink.lock() {
					Ok(mut sink) => sink.extend_from_slice(&buf[..read]),
					Err(_) => break,
				},
			}
		}
	})
}

impl ProcessRunner for SystemRunner {
	fn run(&mut self, invocation: &Invocation) -> Result<ProcessOutput> {
		let program = invocation.program;
		debug!(
			"running `{invocation}` in {}",
			invocation
				.working_dir
				.as_deref()
				.map_or_else(|| "the current directory".to_owned(), |dir| dir.display().to_string())
		);

		let mut command = Command::new(program);
		command
			.args(&invocation.args)
			.stdin(Stdio::null())
			.stdout(Stdio::piped())
			.stderr(Stdio::piped());
		if let Some(dir) = &invocation.working_dir {
			command.current_dir(dir);
		}
		let mut child = command.spawn().map_err(|err| Error::LaunchFailure {
			program: program.to_owned(),
			cause: LaunchCause::Spawn(err),
		})?;

		let merged = Arc::new(Mutex::new(Vec::new()));
		let readers: Vec<JoinHandle<()>> = [
			child.stdout.take().map(|out| drain(out, Arc::clone(&merged))),
			child.stderr.take().map(|err| drain(err, Arc::clone(&merged))),
		]
		.into_iter()
		.flatten()
		.collect();

		let deadline = Instant::now() + self.config.timeout;
		let status = self.wait(program, &mut child, deadline)?;
		join_readers(program, readers, deadline);

		let bytes = merged.lock().map(|bytes| bytes.clone()).unwrap_or_default();
		let output = String::from_utf8_lossy(&bytes).into_owned();
		debug!("{program} exited with {status}");
		Ok(ProcessOutput {
			code: status.code(),
			output,
		})
	}
}
