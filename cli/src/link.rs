// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::common;
use super::Opts;
use anyhow::{Context, Result};
use automationhat::{ChipDriver, Dispatcher, Driver, LineSource, OutputPin};
use log::info;
use std::io::BufReader;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub fn run(opts: &Opts) -> Result<()> {
    let (chip, offset) = common::resolve_line(opts.chip.as_deref(), &opts.line)?;
    // must be the first thing that touches the hardware.
    let driver = ChipDriver::open(&chip, &opts.consumer)?;

    info!("Starting up...");
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || r.store(false, Ordering::SeqCst))
        .context("unable to install signal handler")?;

    let pin = OutputPin::new(&driver, offset)
        .with_context(|| format!("unable to request line {} on {}", offset, chip.display()))?;
    let mut dispatcher = Dispatcher::new(pin);

    info!("Start reading input stream...");
    let source = LineSource::with_capacity(BufReader::new(std::io::stdin()), opts.queue_depth);

    info!("Watching for incoming messages...");
    let res = serve(
        &source,
        &mut dispatcher,
        &running,
        opts.poll_period,
        opts.idle_period,
    );
    source.stop();
    info!("Shutting down...");
    res
}

/// Dispatch lines from the source until `running` is cleared.
///
/// Only fails if the output line cannot be driven.
pub fn serve<D: Driver>(
    source: &LineSource,
    dispatcher: &mut Dispatcher<'_, D>,
    running: &AtomicBool,
    poll_period: Duration,
    idle_period: Duration,
) -> Result<()> {
    while running.load(Ordering::SeqCst) {
        if let Some(line) = source.readline(Some(poll_period)) {
            dispatcher
                .dispatch(&line)
                .with_context(|| format!("unable to apply '{}'", line.trim()))?;
        }
        thread::sleep(idle_period);
    }
    Ok(())
}
