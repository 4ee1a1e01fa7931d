//! Basic logger usage example
//!
//! Starts the process-wide logger at trace level with a log file, logs at
//! each console severity, and appends to a side file.
//!
//! Run with: cargo run --example basic_usage

use mlog::{global, LogLevel};

fn main() -> mlog::Result<()> {
    global::start(LogLevel::Trace, "app.log");

    global::trace("Hello world");
    println!("Welcome to mlog");
    global::info("Hello world");
    global::warning("Hello world");

    mlog::append!("test.log", "{} - {}", "Hello", "World")?;
    mlog::appendln!("test.log", "{} - {}", "Hello", "World 2")?;

    global::stop()
}
