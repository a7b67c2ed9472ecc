//! Labelled console messages for command results.
//!
//! These are user-facing lines, separate from `tracing` diagnostics which go
//! to stderr under `--log-level`.

use colored::Colorize;

pub fn info(msg: impl AsRef<str>) {
    println!("{} {}", "info".blue(), msg.as_ref());
}

pub fn success(msg: impl AsRef<str>) {
    println!("{} {}", "success".green(), msg.as_ref());
}

pub fn warn(msg: impl AsRef<str>) {
    println!("{} {}", "warn".yellow(), msg.as_ref());
}

pub fn error(msg: impl AsRef<str>) {
    eprintln!("{} {}", "error".red(), msg.as_ref());
}
