//! End-to-end tests for the disarm binary
//!
//! Run with: cargo test --test cli

use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn disarm() -> Command {
    Command::cargo_bin("disarm").expect("disarm binary should be built")
}

#[test]
fn test_a32_add() {
    disarm()
        .args(["a32", "0xE0800001"])
        .assert()
        .success()
        .stdout("\tadd\tr0, r0, r1\n\n");
}

#[test]
fn test_a64_ret() {
    disarm()
        .args(["a64", "0xD65F03C0"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("\tret").and(predicate::str::ends_with("\n\n")));
}

#[test]
fn test_a32_undefined_prints_placeholder() {
    disarm()
        .args(["a32", "0xFFFFFFFF"])
        .assert()
        .success()
        .stdout("<invalid instruction>\n\n");
}

#[test]
fn test_thumb_narrow_and_wide() {
    disarm()
        .args(["t16", "0x4770"])
        .assert()
        .success()
        .stdout("\tbx\tlr\n\n");

    let output = disarm().args(["t32", "0xF000F8D0"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 2, "one instruction plus a blank line");
    assert!(!stdout.contains("<invalid instruction>"));
}

#[test]
fn test_prefix_optional() {
    let with = disarm().args(["a32", "0xe0800001"]).output().unwrap();
    let without = disarm().args(["a32", "e0800001"]).output().unwrap();

    assert!(with.status.success());
    assert_eq!(with.stdout, without.stdout);
}

#[test]
fn test_every_mode_prints_something() {
    for mode in ["a32", "a64", "t16", "t32", "thumb"] {
        for hex in ["1", "0x1", "deadbeef", "0x0000ffff"] {
            disarm()
                .args([mode, hex])
                .assert()
                .code(0)
                .stdout(predicate::str::is_empty().not());
        }
    }
}

#[test]
fn test_extra_argument_ignored() {
    disarm()
        .args(["a32", "0xE0800001", "extra"])
        .assert()
        .success()
        .stdout("\tadd\tr0, r0, r1\n\n");
}

#[test]
fn test_invalid_mode() {
    disarm()
        .args(["bogus", "0x1"])
        .assert()
        .code(1)
        .stdout("Invalid mode: bogus\nValid values: a32, a64, thumb\n");
}

#[test]
fn test_hex_too_long() {
    for mode in ["a32", "a64", "thumb", "bogus"] {
        disarm()
            .args([mode, "0x123456789"])
            .assert()
            .code(1)
            .stdout("hex string too long\n");
    }
}

#[test]
fn test_no_arguments_prints_usage() {
    disarm()
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("usage: ").and(predicate::str::contains("disarm")));
}

#[test]
fn test_too_many_arguments_prints_usage() {
    disarm()
        .args(["a32", "1", "2", "3"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("<a32/a64/thumb> <instruction_in_hex>"));
}

#[test]
fn test_separator_as_mode() {
    disarm()
        .args(["--", "a32", "0xE0800001"])
        .assert()
        .code(1)
        .stdout("Invalid mode: --\nValid values: a32, a64, thumb\n");

    disarm()
        .args(["--", "0x1"])
        .assert()
        .code(1)
        .stdout("Invalid mode: --\nValid values: a32, a64, thumb\n");
}

#[test]
fn test_separator_as_hex_decodes_zero() {
    disarm()
        .args(["a32", "--", "0xE0800001"])
        .assert()
        .success()
        .stdout("\tandeq\tr0, r0, r0\n\n");
}

#[test]
fn test_flag_like_modes_rejected() {
    for flag in ["-h", "--help", "-V", "--version"] {
        disarm()
            .args([flag, "0x1"])
            .assert()
            .code(1)
            .stdout(predicate::str::diff(format!(
                "Invalid mode: {}\nValid values: a32, a64, thumb\n",
                flag
            )));
    }

    for flag in ["-h", "--help", "-V"] {
        disarm()
            .arg(flag)
            .assert()
            .code(1)
            .stdout(predicate::str::starts_with("usage: "));
    }
}

#[test]
fn test_trailing_junk_within_length() {
    let junk = disarm().args(["a32", "12zz"]).output().unwrap();
    let clean = disarm().args(["a32", "0x12"]).output().unwrap();

    assert!(junk.status.success());
    assert_eq!(junk.stdout, clean.stdout);

    disarm()
        .args(["a32", "e0800001zz"])
        .assert()
        .code(1)
        .stdout("hex string too long\n");
}

#[test]
fn test_uppercase_prefix() {
    let upper = disarm().args(["a32", "0X1234"]).output().unwrap();
    let plain = disarm().args(["a32", "1234"]).output().unwrap();

    assert!(upper.status.success());
    assert_eq!(upper.stdout, plain.stdout);
}

#[cfg(unix)]
#[test]
fn test_non_utf8_arguments() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let zero = disarm().args(["a32", "0"]).output().unwrap();
    let bad_hex = disarm()
        .arg("a32")
        .arg(OsString::from_vec(vec![0xff]))
        .output()
        .unwrap();
    assert!(bad_hex.status.success());
    assert_eq!(bad_hex.stdout, zero.stdout);

    disarm()
        .arg(OsString::from_vec(vec![0xff]))
        .arg("1")
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("Invalid mode: "));
}
