// SPDX-FileCopyrightText: 2024 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{Driver, Result};
use gpiocdev::line::{Direction, Offset, Value};

/// A single GPIO line accessed through a [`Driver`].
///
/// The pin tracks the last level observed by [`has_changed`] so that
/// transitions between successive reads can be detected.
///
/// [`has_changed`]: Pin::has_changed
#[derive(Debug)]
pub struct Pin<'d, D: Driver> {
    driver: &'d D,
    offset: Offset,
    last_value: Option<Value>,
}

impl<'d, D: Driver> Pin<'d, D> {
    /// Creates a pin for the given `offset`, configured as an input.
    pub fn input(driver: &'d D, offset: Offset) -> Result<Self> {
        driver.configure(offset, Direction::Input, Value::Inactive)?;
        Ok(Pin::unconfigured(driver, offset))
    }

    fn unconfigured(driver: &'d D, offset: Offset) -> Self {
        Pin {
            driver,
            offset,
            last_value: None,
        }
    }

    /// The offset of the line on its chip.
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// Read the current level of the line.
    #[inline]
    pub fn read(&self) -> Result<Value> {
        self.driver.read(self.offset)
    }

    /// Read the line and report if the level differs from the previous read.
    ///
    /// The first call only records the level as the baseline and so always
    /// returns false.
    pub fn has_changed(&mut self) -> Result<bool> {
        let value = self.read()?;
        let last = self.last_value.replace(value);
        Ok(matches!(last, Some(last) if last != value))
    }

    #[inline]
    pub fn is_on(&self) -> Result<bool> {
        Ok(self.read()? == Value::Active)
    }

    #[inline]
    pub fn is_off(&self) -> Result<bool> {
        Ok(self.read()? == Value::Inactive)
    }
}

/// A [`Pin`] configured as an output.
///
/// Construction drives the line low, regardless of its prior state.
///
/// Do NOT drop the [`OutputPin`] between commands.
/// Reconfiguring the line is far more expensive than setting the value.
#[derive(Debug)]
pub struct OutputPin<'d, D: Driver>(Pin<'d, D>);

impl<'d, D: Driver> OutputPin<'d, D> {
    /// Creates an output pin for the given `offset`, initially low.
    pub fn new(driver: &'d D, offset: Offset) -> Result<Self> {
        driver.configure(offset, Direction::Output, Value::Inactive)?;
        Ok(OutputPin(Pin::unconfigured(driver, offset)))
    }

    /// Drive the line to the given value.
    #[inline]
    pub fn write(&mut self, value: Value) -> Result<()> {
        self.0.driver.write(self.0.offset, value)
    }

    /// Drive the line high.
    #[inline]
    pub fn on(&mut self) -> Result<()> {
        self.write(Value::Active)
    }

    /// Drive the line low.
    #[inline]
    pub fn off(&mut self) -> Result<()> {
        self.write(Value::Inactive)
    }

    /// Invert the current level of the line.
    ///
    /// Note that this relies on the driver being able to read back output
    /// values.
    pub fn toggle(&mut self) -> Result<()> {
        let value = self.0.read()?;
        self.write(value.not())
    }

    #[inline]
    pub fn offset(&self) -> Offset {
        self.0.offset()
    }

    #[inline]
    pub fn read(&self) -> Result<Value> {
        self.0.read()
    }

    #[inline]
    pub fn has_changed(&mut self) -> Result<bool> {
        self.0.has_changed()
    }

    #[inline]
    pub fn is_on(&self) -> Result<bool> {
        self.0.is_on()
    }

    #[inline]
    pub fn is_off(&self) -> Result<bool> {
        self.0.is_off()
    }
}

impl<'d, D: Driver> From<OutputPin<'d, D>> for Pin<'d, D> {
    fn from(pin: OutputPin<'d, D>) -> Self {
        pin.0
    }
}
