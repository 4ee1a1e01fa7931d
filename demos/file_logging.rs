//! File logging example
//!
//! Uses a logger handle with a small rotation threshold so backups appear
//! after a few hundred lines.
//!
//! Run with: cargo run --example file_logging

use mlog::prelude::*;
use mlog::{info, warn};
use std::fs;

fn main() -> Result<()> {
    println!("=== mlog - File Logging Example ===\n");

    let log_dir = "logs";
    fs::create_dir_all(log_dir)?;
    let path = format!("{}/rotating.log", log_dir);

    // Warn drops trace and info from the file as well as the console
    let logger = Logger::builder(LogLevel::Warn)
        .file(&path)
        .max_bytes(4 * 1024)
        .backup_count(3)
        .build()?;

    println!("1. Writing warnings until the file rotates:");
    for i in 0..200 {
        warn!(logger, "disk usage at {}%", 50 + i % 50)?;
        info!(logger, "filtered out {}", i)?;
    }
    logger.if_error(&"not a number".parse::<u32>())?;

    if let Some(sink) = logger.file_appender() {
        println!("   {} rotations", sink.rotation_count());
        for i in 1..=sink.backup_count() {
            let backup = sink.backup_path(i);
            if backup.exists() {
                println!("   {} ({} bytes)", backup.display(), fs::metadata(&backup)?.len());
            }
        }
    }

    println!("\n2. File-only logging:");
    let quiet = Logger::start(LogLevel::OnlyFile, format!("{}/quiet.log", log_dir))?;
    quiet.trace("only in the file")?;
    quiet.info("also only in the file")?;
    quiet.close()?;
    println!("   wrote {}/quiet.log", log_dir);

    let metrics = logger.metrics();
    println!(
        "\nwritten: {}, discarded: {}, failed: {}",
        metrics.lines_written(),
        metrics.lines_discarded(),
        metrics.write_failures()
    );

    logger.close()
}
