// SPDX-License-Identifier: Apache-2.0 OR MIT
use log::LevelFilter;

/// `RUST_LOG` still overrides the level picked here.
pub fn init_logging(verbose: bool) {
	let level = if verbose {
		LevelFilter::Trace
	} else {
		LevelFilter::Info
	};

	env_logger::Builder::new()
		.filter_level(level)
		.parse_default_env()
		.init();
}
