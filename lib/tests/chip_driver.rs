// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

// ALL IT as the driver requires a GPIO character device.
//
// Assumptions:
//  - the gpio-sim kernel module is loaded and the user may configure it

use automationhat::{ChipDriver, Command, Dispatcher, Driver, Error, Outcome, OutputPin, Pin};
use gpiocdev::line::Value;
use gpiocdev::request::Request;
use gpiosim::{Level, Simpleton};
use std::thread::sleep;
use std::time::Duration;

// max time to allow changes to propagate from the sim to cdev
const PROPAGATION_DELAY: Duration = Duration::from_millis(10);

#[test]
fn open() {
    let s = Simpleton::new(4);
    let d = ChipDriver::open(s.dev_path(), "open").unwrap();
    assert!(d.path().ends_with(s.dev_path().file_name().unwrap()));
}

#[test]
fn unconfigured_line() {
    let s = Simpleton::new(4);
    let d = ChipDriver::open(s.dev_path(), "unconfigured").unwrap();
    assert!(matches!(
        d.write(2, Value::Active),
        Err(Error::UnconfiguredLine(2))
    ));
    assert!(matches!(d.read(2), Err(Error::UnconfiguredLine(2))));
}

#[test]
fn invalid_offset() {
    let s = Simpleton::new(4);
    let d = ChipDriver::open(s.dev_path(), "invalid").unwrap();
    assert!(matches!(OutputPin::new(&d, 4), Err(Error::Gpio(_))));
}

#[test]
fn output_pin() {
    let s = Simpleton::new(8);
    let offset = 5;
    s.pullup(offset).unwrap();
    let d = ChipDriver::open(s.dev_path(), "output_pin").unwrap();

    // initial level is low regardless of the prior state of the line
    let mut pin = OutputPin::new(&d, offset).unwrap();
    assert_eq!(s.get_level(offset).unwrap(), Level::Low);

    pin.on().unwrap();
    assert_eq!(s.get_level(offset).unwrap(), Level::High);
    assert!(pin.is_on().unwrap());

    pin.off().unwrap();
    assert_eq!(s.get_level(offset).unwrap(), Level::Low);
    assert!(pin.is_off().unwrap());

    pin.toggle().unwrap();
    assert_eq!(s.get_level(offset).unwrap(), Level::High);
    pin.toggle().unwrap();
    assert_eq!(s.get_level(offset).unwrap(), Level::Low);
}

#[test]
fn input_pin() {
    let s = Simpleton::new(4);
    let offset = 1;
    let d = ChipDriver::open(s.dev_path(), "input_pin").unwrap();
    let mut pin = Pin::input(&d, offset).unwrap();

    s.pulldown(offset).unwrap();
    sleep(PROPAGATION_DELAY);
    assert!(pin.is_off().unwrap());
    assert!(!pin.has_changed().unwrap());

    s.pullup(offset).unwrap();
    sleep(PROPAGATION_DELAY);
    assert!(pin.is_on().unwrap());
    assert!(pin.has_changed().unwrap());
    assert!(!pin.has_changed().unwrap());
}

#[test]
fn reconfigure_input_as_output() {
    let s = Simpleton::new(4);
    let offset = 2;
    s.pullup(offset).unwrap();
    let d = ChipDriver::open(s.dev_path(), "reconfigure").unwrap();
    let pin = Pin::input(&d, offset).unwrap();
    sleep(PROPAGATION_DELAY);
    assert!(pin.is_on().unwrap());

    let mut pin = OutputPin::new(&d, offset).unwrap();
    assert_eq!(s.get_level(offset).unwrap(), Level::Low);
    pin.on().unwrap();
    assert_eq!(s.get_level(offset).unwrap(), Level::High);
}

#[test]
fn dispatch() {
    let s = Simpleton::new(8);
    let offset = 5;
    let d = ChipDriver::open(s.dev_path(), "dispatch").unwrap();
    let mut dispatcher = Dispatcher::new(OutputPin::new(&d, offset).unwrap());

    assert_eq!(
        dispatcher.dispatch("true\n").unwrap(),
        Outcome::Applied(Command::On)
    );
    assert_eq!(s.get_level(offset).unwrap(), Level::High);

    assert_eq!(
        dispatcher.dispatch("banana\n").unwrap(),
        Outcome::Unrecognized("banana".to_string())
    );
    assert_eq!(s.get_level(offset).unwrap(), Level::High);

    assert_eq!(dispatcher.dispatch("\n").unwrap(), Outcome::Ignored);
    assert_eq!(s.get_level(offset).unwrap(), Level::High);

    for line in ["false", "toggle", "toggle"] {
        dispatcher.dispatch(line).unwrap();
    }
    assert_eq!(s.get_level(offset).unwrap(), Level::Low);
}

#[test]
fn drop_releases_lines() {
    let s = Simpleton::new(4);
    let offset = 3;
    let d = ChipDriver::open(s.dev_path(), "drop").unwrap();
    let pin = OutputPin::new(&d, offset).unwrap();

    // line is busy while held by the driver
    assert!(Request::builder()
        .on_chip(s.dev_path())
        .with_line(offset)
        .as_input()
        .request()
        .is_err());

    drop(pin);
    drop(d);
    assert!(Request::builder()
        .on_chip(s.dev_path())
        .with_line(offset)
        .as_input()
        .request()
        .is_ok());
}
