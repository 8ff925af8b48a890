// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crossbeam_channel::{Receiver, Sender};
use std::io::{BufRead, ErrorKind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

// time to wait before retrying a stream that is at EOF or has failed.
const RETRY_PAUSE: Duration = Duration::from_millis(10);

/// Reads lines from a stream in a background thread so they can be
/// polled without blocking.
///
/// Lines are returned in the order they were read, including any line
/// terminator.
///
/// The background thread continues to poll the stream after it reaches
/// EOF, so a stream that is later extended continues to deliver lines.
/// It only exits once [`stop`] has been called and the blocking read it is
/// performing returns.
///
/// [`stop`]: LineSource::stop
#[derive(Debug)]
pub struct LineSource {
    rx: Receiver<String>,
    stop: Arc<AtomicBool>,
}

impl LineSource {
    /// The default number of lines buffered between the reader and the consumer.
    pub const DEFAULT_CAPACITY: usize = 1024;

    /// Start reading lines from `reader`.
    pub fn new<R>(reader: R) -> LineSource
    where
        R: BufRead + Send + 'static,
    {
        LineSource::with_capacity(reader, LineSource::DEFAULT_CAPACITY)
    }

    /// Start reading lines from `reader`, buffering up to `capacity` lines.
    ///
    /// Once the buffer is full the reader blocks until the consumer catches
    /// up, so lines are never dropped.
    pub fn with_capacity<R>(reader: R, capacity: usize) -> LineSource
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = crossbeam_channel::bounded(capacity);
        let stop = Arc::new(AtomicBool::new(false));
        let stopped = stop.clone();
        thread::spawn(move || populate(reader, tx, stopped));
        LineSource { rx, stop }
    }

    /// Return the next line, if one is available.
    ///
    /// With a `timeout` of `None` this returns immediately, else it waits
    /// up to `timeout` for a line to arrive.
    pub fn readline(&self, timeout: Option<Duration>) -> Option<String> {
        match timeout {
            None => self.rx.try_recv().ok(),
            Some(timeout) => self.rx.recv_timeout(timeout).ok(),
        }
    }

    /// Request the background thread to exit.
    ///
    /// A read already in progress is not interrupted.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

impl Drop for LineSource {
    fn drop(&mut self) {
        self.stop();
    }
}

fn populate<R: BufRead>(mut reader: R, tx: Sender<String>, stop: Arc<AtomicBool>) {
    let mut line = String::new();
    while !stop.load(Ordering::Relaxed) {
        match reader.read_line(&mut line) {
            Ok(0) => thread::sleep(RETRY_PAUSE),
            Ok(_) => {
                if tx.send(std::mem::take(&mut line)).is_err() {
                    // consumer is gone
                    return;
                }
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => {
                log::error!("unable to read input: {}", e);
                line.clear();
                thread::sleep(RETRY_PAUSE);
            }
        }
    }
    log::debug!("line source stopped");
}
