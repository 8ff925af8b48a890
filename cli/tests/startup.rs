// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::process::{Command, Output, Stdio};

fn link(args: &[&str]) -> Output {
    link_with_log_filter(args, None)
}

fn link_with_log_filter(args: &[&str], filter: Option<&str>) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_automationhat-link"));
    cmd.args(args).env_remove("RUST_LOG").stdin(Stdio::null());
    if let Some(filter) = filter {
        cmd.env("RUST_LOG", filter);
    }
    cmd.output().expect("failed to run automationhat-link")
}

fn no_chips() -> bool {
    gpiocdev::chip::chips()
        .map(|c| c.is_empty())
        .unwrap_or(true)
}

#[test]
fn missing_chip_is_fatal() {
    let out = link(&["--chip", "/dev/gpiochip_missing"]);
    assert!(!out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    let mut lines = stdout.lines();
    let first = lines.next().unwrap();
    assert!(first.starts_with("FATAL: "), "{}", first);
    assert!(first.contains("GPIO character device"), "{}", first);
    assert!(first.contains("/dev/gpiochip_missing"), "{}", first);
    // terminated before startup
    assert_eq!(lines.next(), None);
}

#[test]
fn missing_named_line_is_fatal() {
    let out = link(&["--line", "NO_SUCH_LINE_EXISTS"]);
    assert!(!out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("FATAL: "), "{}", stdout);
    if no_chips() {
        assert!(stdout.contains("GPIO character device"), "{}", stdout);
    } else {
        assert!(stdout.contains("NO_SUCH_LINE_EXISTS"), "{}", stdout);
    }
    assert!(!stdout.contains("INFO:"), "{}", stdout);
}

#[test]
fn named_line_on_missing_chip_is_fatal() {
    let out = link(&["--chip", "/dev/gpiochip_missing", "--line", "RELAY_1"]);
    assert!(!out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("FATAL: "), "{}", stdout);
    assert!(stdout.contains("GPIO character device"), "{}", stdout);
    assert!(stdout.contains("/dev/gpiochip_missing"), "{}", stdout);
    assert_eq!(stdout.lines().count(), 1, "{}", stdout);
}

#[test]
fn fatal_survives_log_filter() {
    for filter in ["off", "warn", "automationhat=trace"] {
        let out = link_with_log_filter(&["--chip", "/dev/gpiochip_missing"], Some(filter));
        assert!(!out.status.success());

        let stdout = String::from_utf8_lossy(&out.stdout);
        assert!(stdout.starts_with("FATAL: "), "{}: {}", filter, stdout);
        assert!(stdout.contains("/dev/gpiochip_missing"), "{}: {}", filter, stdout);
    }
}

#[test]
fn invalid_option() {
    let out = link(&["--poll", "soon"]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("soon"));
}
