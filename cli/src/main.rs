// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A link between a stream of text commands on stdin and the output line of
//! an Automation HAT.

use automationhat::LineSource;
use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;

mod common;
mod link;
mod logger;

fn main() -> ExitCode {
    match Opts::try_parse() {
        Ok(opts) => {
            logger::init(opts.verbose);
            match link::run(&opts) {
                Ok(()) => return ExitCode::SUCCESS,
                Err(e) => log::error!(target: logger::FATAL, "{e:#}"),
            }
        }
        Err(e) => e.exit(),
    }
    ExitCode::FAILURE
}

#[derive(Debug, Parser)]
#[command(
    name = "automationhat-link",
    about = "Drive an Automation HAT output line from commands read on stdin.",
    long_about = "Drive an Automation HAT output line from commands read on stdin.\n\n\
    Each line of input is a command:\n    \
    true, 1      drive the line high\n    \
    false, 0     drive the line low\n    \
    toggle, 2    invert the line",
    version
)]
pub struct Opts {
    /// The chip containing the output line.
    ///
    /// The chip may be identified by number, name, or path.
    /// e.g. the following all select the same chip:
    ///     --chip 0
    ///     --chip gpiochip0
    ///     --chip /dev/gpiochip0
    ///
    /// Lines identified by offset default to gpiochip0.
    /// Lines identified by name are searched for on all chips unless
    /// a chip is specified.
    #[arg(short, long, value_name = "chip", verbatim_doc_comment)]
    pub chip: Option<String>,

    /// The output line.
    ///
    /// The line is identified by its offset on the chip, or by name.
    #[arg(short, long, value_name = "line", default_value = "5")]
    pub line: String,

    /// The consumer label applied to the requested line.
    #[arg(long, value_name = "consumer", default_value = "automationhat-link")]
    pub consumer: String,

    /// The maximum time to wait for a command before checking for shutdown.
    ///
    /// The period is taken as milliseconds unless otherwise specified.
    #[arg(short = 'p', long = "poll", value_name = "period", default_value = "100ms", value_parser = common::parse_duration)]
    pub poll_period: Duration,

    /// The time to idle between polls.
    ///
    /// The period is taken as milliseconds unless otherwise specified.
    #[arg(long = "idle", value_name = "period", default_value = "1ms", value_parser = common::parse_duration)]
    pub idle_period: Duration,

    /// The number of commands that may be queued awaiting dispatch.
    ///
    /// Input is not read while the queue is full.
    #[arg(long, value_name = "depth", default_value_t = LineSource::DEFAULT_CAPACITY)]
    pub queue_depth: usize,

    /// Log debug messages.
    #[arg(short = 'v', long)]
    pub verbose: bool,
}
