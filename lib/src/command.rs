// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{Driver, OutputPin, Result};
use std::fmt;
use std::str::FromStr;

/// A command to apply to the output line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    /// Drive the line high.
    On,
    /// Drive the line low.
    Off,
    /// Invert the current level of the line.
    Toggle,
}

impl Command {
    /// Apply the command to the pin.
    pub fn apply<D: Driver>(&self, pin: &mut OutputPin<'_, D>) -> Result<()> {
        match self {
            Command::On => pin.on(),
            Command::Off => pin.off(),
            Command::Toggle => pin.toggle(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Command::On => "on",
            Command::Off => "off",
            Command::Toggle => "toggle",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Command {
    type Err = UnknownCommand;

    /// Parse a command, ignoring surrounding whitespace.
    ///
    /// Matching is exact and case-sensitive.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "true" | "1" => Ok(Command::On),
            "false" | "0" => Ok(Command::Off),
            "toggle" | "2" => Ok(Command::Toggle),
            _ => Err(UnknownCommand(s.trim().to_string())),
        }
    }
}

/// The text did not match any known command.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("incoming message '{0}' ignored, only accept values: true,false,toggle,0,1,2")]
pub struct UnknownCommand(pub String);

/// The result of dispatching a single line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The command was applied to the pin.
    Applied(Command),
    /// The line was empty.
    Ignored,
    /// The line did not contain a known command.
    Unrecognized(String),
}

/// Interprets lines of text as commands and applies them to an [`OutputPin`].
#[derive(Debug)]
pub struct Dispatcher<'d, D: Driver> {
    pin: OutputPin<'d, D>,
}

impl<'d, D: Driver> Dispatcher<'d, D> {
    pub fn new(pin: OutputPin<'d, D>) -> Self {
        Dispatcher { pin }
    }

    /// The pin commands are applied to.
    pub fn pin(&self) -> &OutputPin<'d, D> {
        &self.pin
    }

    /// Interpret the line and apply the command it contains.
    ///
    /// Empty lines are silently ignored.
    /// Unknown commands are logged as a warning and otherwise ignored.
    /// Errors are only returned if the pin could not be driven.
    pub fn dispatch(&mut self, line: &str) -> Result<Outcome> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Outcome::Ignored);
        }
        match line.parse::<Command>() {
            Ok(cmd) => {
                log::info!("Incoming message, value: {}", line);
                cmd.apply(&mut self.pin)?;
                log::debug!("line {} {}", self.pin.offset(), cmd);
                Ok(Outcome::Applied(cmd))
            }
            Err(e) => {
                log::warn!("{}", e);
                Ok(Outcome::Unrecognized(e.0))
            }
        }
    }
}
