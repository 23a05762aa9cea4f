// SPDX-License-Identifier: Apache-2.0 OR MIT
use clap::{Args, Parser, Subcommand};
use std::{path::PathBuf, time::Duration};

#[derive(Parser)]
#[clap(author, version, about, long_about = None, propagate_version = true)]
pub struct AppArgs {
	/// Log every command that gets run
	#[clap(short, long, global = true)]
	pub verbose: bool,
	/// Seconds to wait for tar, zip or unzip before giving up
	#[clap(
		long,
		global = true,
		env = "ARCHIVIST_TIMEOUT",
		default_value = "30",
		value_parser = parse_timeout
	)]
	pub timeout: Duration,
	/// Overwrite existing files without asking
	#[clap(short, long, global = true)]
	pub yes: bool,
	#[clap(subcommand)]
	pub subcommand: AppSubcommand,
}

#[derive(Subcommand)]
pub enum AppSubcommand {
	List(ListArgs),
	Extract(ExtractArgs),
	Create(CreateArgs),
}

/// List the contents of an archive
#[derive(Args)]
pub struct ListArgs {
	/// The archive to list
	#[clap(value_parser)]
	pub archive: PathBuf,
	/// Print the entries as JSON
	#[clap(long)]
	pub json: bool,
}

/// Extract some or all of an archive
#[derive(Args)]
pub struct ExtractArgs {
	/// Archive to extract
	#[clap(value_parser)]
	pub archive: PathBuf,
	/// The directory to extract to
	#[clap(value_parser)]
	pub destination: PathBuf,
	/// Entries to extract, exactly as `list` prints them; none means all
	#[clap(value_parser)]
	pub items: Vec<String>,
	/// Extract the entries matching glob <PATTERN>
	#[clap(long, value_name = "PATTERN", conflicts_with = "items")]
	pub glob: Option<String>,
}

/// Create an archive from files and folders in one directory
#[derive(Args)]
pub struct CreateArgs {
	/// Format to create, as a short name (`tar.gz`) or a filter label
	/// (`Tar GZ (*.tar.gz)`); appended to <OUTPUT> if it lacks an archive suffix
	#[clap(long)]
	pub format: Option<String>,
	/// The archive to write
	#[clap(value_parser)]
	pub output: PathBuf,
	/// Files and folders to bundle; they must share a parent directory
	#[clap(value_parser, required = true)]
	pub paths: Vec<PathBuf>,
}

fn parse_timeout(value: &str) -> Result<Duration, String> {
	match value.trim().parse::<u64>() {
		Ok(0) => Err("timeout must be at least one second".to_owned()),
		Ok(secs) => Ok(Duration::from_secs(secs)),
		Err(err) => Err(format!("invalid timeout '{value}': {err}")),
	}
}
