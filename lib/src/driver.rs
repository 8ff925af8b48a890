// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{Error, Result};
use gpiocdev::line::{Direction, Offset, Value};
use gpiocdev::request::Request;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The operations the GPIO driver provides to pins.
///
/// A driver is an owned handle. It is created once at startup, lent to the
/// pins that use it, and releases any lines it holds when dropped.
pub trait Driver {
    /// Configure the line direction.
    ///
    /// For outputs the line is driven to `value` as part of the configuration.
    /// For inputs `value` is ignored.
    fn configure(&self, offset: Offset, direction: Direction, value: Value) -> Result<()>;

    /// Drive a configured line to the given value.
    fn write(&self, offset: Offset, value: Value) -> Result<()>;

    /// Read the current value of a configured line.
    fn read(&self, offset: Offset) -> Result<Value>;
}

/// A [`Driver`] for the lines of a single GPIO character device.
///
/// Each configured line is held in its own [`Request`], which is released
/// when the driver is dropped.
#[derive(Debug)]
pub struct ChipDriver {
    chip: PathBuf,
    consumer: String,
    requests: RefCell<HashMap<Offset, Request>>,
}

impl ChipDriver {
    /// Open the driver for the GPIO character device at `chip`.
    ///
    /// The `consumer` label is applied to all lines requested by the driver.
    ///
    /// Fails with [`Error::DriverUnavailable`] if `chip` is not a GPIO
    /// character device.
    pub fn open<P: AsRef<Path>>(chip: P, consumer: &str) -> Result<ChipDriver> {
        let path = chip.as_ref();
        let chip = gpiocdev::chip::is_chip(path)
            .map_err(|e| Error::DriverUnavailable(path.to_path_buf(), e))?;
        log::debug!("opened GPIO chip {}", chip.display());
        Ok(ChipDriver {
            chip,
            consumer: consumer.to_string(),
            requests: RefCell::new(HashMap::new()),
        })
    }

    /// The resolved path of the GPIO character device.
    pub fn path(&self) -> &Path {
        &self.chip
    }
}

impl Driver for ChipDriver {
    fn configure(&self, offset: Offset, direction: Direction, value: Value) -> Result<()> {
        let mut requests = self.requests.borrow_mut();
        if let Some(req) = requests.get(&offset) {
            // already requested, so only the config changes.
            let mut cfg = req.config();
            cfg.with_line(offset);
            match direction {
                Direction::Input => cfg.as_input(),
                Direction::Output => cfg.as_output(value),
            };
            req.reconfigure(&cfg)?;
            return Ok(());
        }
        let mut builder = Request::builder();
        builder
            .on_chip(&self.chip)
            .with_consumer(&self.consumer)
            .with_line(offset);
        match direction {
            Direction::Input => builder.as_input(),
            Direction::Output => builder.as_output(value),
        };
        let req = builder.request()?;
        log::debug!(
            "requested line {} on {} as {:?}",
            offset,
            self.chip.display(),
            direction
        );
        requests.insert(offset, req);
        Ok(())
    }

    fn write(&self, offset: Offset, value: Value) -> Result<()> {
        let requests = self.requests.borrow();
        let req = requests
            .get(&offset)
            .ok_or(Error::UnconfiguredLine(offset))?;
        req.set_value(offset, value)?;
        Ok(())
    }

    fn read(&self, offset: Offset) -> Result<Value> {
        let requests = self.requests.borrow();
        let req = requests
            .get(&offset)
            .ok_or(Error::UnconfiguredLine(offset))?;
        Ok(req.value(offset)?)
    }
}

impl Drop for ChipDriver {
    fn drop(&mut self) {
        let requests = self.requests.get_mut();
        if !requests.is_empty() {
            log::debug!(
                "releasing {} line(s) on {}",
                requests.len(),
                self.chip.display()
            );
        }
        requests.clear();
    }
}
