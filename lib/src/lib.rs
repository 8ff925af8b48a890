// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A library for driving the output line of an Automation HAT style board
//! from a stream of plain-text commands.
//!
//! The GPIO driver is accessed through the [`Driver`] trait, which is
//! implemented for the Linux GPIO character device by [`ChipDriver`].
//!
//! Lines are wrapped by [`Pin`] and [`OutputPin`], commands are read from a
//! stream by a [`LineSource`] and applied to an [`OutputPin`] by a
//! [`Dispatcher`].
//!
//! # Example Usage
//!
//! ```no_run
//! # fn example() -> Result<(), automationhat::Error> {
//! use automationhat::{ChipDriver, Dispatcher, LineSource, OutputPin};
//! use std::io::BufReader;
//! use std::time::Duration;
//!
//! let driver = ChipDriver::open("/dev/gpiochip0", "automationhat-link")?;
//! let mut dispatcher = Dispatcher::new(OutputPin::new(&driver, 5)?);
//! let source = LineSource::new(BufReader::new(std::io::stdin()));
//! loop {
//!     if let Some(line) = source.readline(Some(Duration::from_millis(100))) {
//!         dispatcher.dispatch(&line)?;
//!     }
//! }
//! # }
//! ```

use gpiocdev::line::Offset;
use std::path::PathBuf;

/// Parsing and application of text commands.
pub mod command;

/// The GPIO driver abstraction and its character device implementation.
pub mod driver;

/// Wrappers around individual GPIO lines.
pub mod pin;

/// Background reading of lines from a stream.
pub mod source;

pub use command::{Command, Dispatcher, Outcome, UnknownCommand};
pub use driver::{ChipDriver, Driver};
pub use pin::{OutputPin, Pin};
pub use source::LineSource;

/// Errors returned by [`automationhat`] functions.
///
/// [`automationhat`]: crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The GPIO driver could not be located.
    #[error("this program requires the GPIO character device \"{}\"", .0.display())]
    DriverUnavailable(PathBuf, #[source] gpiocdev::Error),

    /// A read or write was attempted on a line that was never configured.
    #[error("line {0} has not been configured")]
    UnconfiguredLine(Offset),

    /// An error returned from the GPIO driver.
    #[error(transparent)]
    Gpio(#[from] gpiocdev::Error),
}

/// The result for [`automationhat`] functions.
///
/// [`automationhat`]: crate
pub type Result<T> = std::result::Result<T, Error>;
