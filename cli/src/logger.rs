// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use env_logger::{Env, Target};
use log::{Level, LevelFilter};
use std::io::Write;

/// Target for errors that terminate the process.
pub const FATAL: &str = "fatal";

/// Log to stdout, tagging each line with its severity.
///
/// The filter defaults to info, and may be overridden by RUST_LOG.
/// Fatal errors are always logged.
pub fn init(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.filter(Some(FATAL), LevelFilter::Error);
    builder
        .target(Target::Stdout)
        .format(|buf, record| {
            writeln!(
                buf,
                "{}: {}",
                tag(record.level(), record.target()),
                record.args()
            )
        });
    // only fails if already initialised
    _ = builder.try_init();
}

// Warnings share the ERROR tag as consumers only distinguish INFO, ERROR and FATAL.
fn tag(level: Level, target: &str) -> &'static str {
    match level {
        Level::Error if target == FATAL => "FATAL",
        Level::Error | Level::Warn => "ERROR",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
