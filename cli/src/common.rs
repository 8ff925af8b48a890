// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use anyhow::{anyhow, bail, Result};
use automationhat::Error;
use gpiocdev::chip::{chips, Chip};
use gpiocdev::line::Offset;
use std::path::PathBuf;
use std::time::Duration;

/// The path of the chip with the given number, name or path.
pub fn chip_path_from_id(id: &str) -> PathBuf {
    if !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) {
        return format!("/dev/gpiochip{id}").into();
    }
    if !id.contains('/') {
        return PathBuf::from("/dev").join(id);
    }
    id.into()
}

/// The chip used when none is specified.
pub const DEFAULT_CHIP: &str = "gpiochip0";

// Displayed in place of a chip path when no chips exist.
const ANY_CHIP: &str = "/dev/gpiochip*";

/// Identify the chip and offset of the output line.
///
/// Lines given as offsets are on the identified chip, or the default chip.
/// Otherwise the line is found by name, on the identified chip if any,
/// else on all chips.
///
/// A missing chip is reported as [`Error::DriverUnavailable`].
pub fn resolve_line(chip: Option<&str>, line: &str) -> Result<(PathBuf, Offset)> {
    if let Ok(offset) = line.parse::<Offset>() {
        return Ok((chip_path_from_id(chip.unwrap_or(DEFAULT_CHIP)), offset));
    }
    if let Some(id) = chip {
        let path = chip_path_from_id(id);
        let c = Chip::from_path(&path).map_err(|e| Error::DriverUnavailable(path.clone(), e))?;
        return c
            .find_line_info(line)
            .map(|li| (c.path().to_path_buf(), li.offset))
            .ok_or_else(|| anyhow!("cannot find GPIO line '{line}' on {}", path.display()));
    }
    if let Some(fl) = gpiocdev::find_named_line(line) {
        return Ok((fl.chip, fl.info.offset));
    }
    match chips() {
        Ok(chips) if !chips.is_empty() => bail!("cannot find GPIO line '{line}'"),
        Ok(_) => Err(Error::DriverUnavailable(ANY_CHIP.into(), gpiocdev::Error::NoGpioChips()).into()),
        Err(e) => Err(Error::DriverUnavailable(ANY_CHIP.into(), e).into()),
    }
}

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseDurationError {
    #[error("'{0}' unknown units - use 's', 'ms' or 'us'.")]
    Units(String),
    #[error("'{0}' must start with a digit")]
    NoDigits(String),
    #[error("'{0}' {1}")]
    ParseDigits(String, std::num::ParseIntError),
}

/// Parse a period, taken as milliseconds unless units are provided.
pub fn parse_duration(s: &str) -> std::result::Result<Duration, ParseDurationError> {
    let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if split == 0 {
        return Err(ParseDurationError::NoDigits(s.into()));
    }
    let (num, units) = s.split_at(split);
    let t = num
        .parse::<u64>()
        .map_err(|e| ParseDurationError::ParseDigits(num.into(), e))?;
    match units {
        "" | "ms" => Ok(Duration::from_millis(t)),
        "us" => Ok(Duration::from_micros(t)),
        "s" => Ok(Duration::from_secs(t)),
        _ => Err(ParseDurationError::Units(s.into())),
    }
}
