//! Integration tests for the logger
//!
//! These tests verify:
//! - Console / file routing per configured level
//! - Size-based rotation and backup renumbering
//! - Append helpers
//! - Exit statuses of the process-wide facade

use mlog::prelude::*;
use mlog::{global, ConsoleAppender};
use parking_lot::Mutex;
use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().clone()).expect("console output is UTF-8")
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Drop ANSI SGR sequences (`ESC [ ... m`)
fn strip_ansi(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn captured_logger(builder: LoggerBuilder, colors: bool) -> (Logger, Capture, Capture) {
    let out = Capture::default();
    let err = Capture::default();
    let logger = builder
        .stdout(ConsoleAppender::from_writer("stdout", out.clone()).with_colors(colors))
        .stderr(ConsoleAppender::from_writer("stderr", err.clone()).with_colors(colors))
        .build()
        .expect("Failed to build logger");
    (logger, out, err)
}

#[test]
fn test_trace_hello_world_console_and_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    let (logger, out, err) =
        captured_logger(Logger::builder(LogLevel::Trace).file(&log_file), true);

    logger
        .trace(format_args!("hello {}", "world"))
        .expect("Failed to log");

    let console = out.text();
    let file = fs::read_to_string(&log_file).expect("Failed to read log file");

    assert_eq!(console.lines().count(), 1);
    assert_eq!(file.lines().count(), 1);
    assert!(strip_ansi(&console).contains("hello world"));
    assert!(file.contains("hello world"));
    assert_eq!(strip_ansi(&console), file);
    assert!(err.text().is_empty());
}

#[test]
fn test_error_level_rotation_scenario() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("x.log");

    let (logger, _out, err) = captured_logger(
        Logger::builder(LogLevel::Error)
            .file(&log_file)
            .max_bytes(100)
            .backup_count(2),
        false,
    );

    let mut previous_size = 0;
    let mut shrank = false;
    for i in 0..10 {
        logger
            .error(format_args!("request {} failed", i))
            .expect("Failed to log");
        let size = fs::metadata(&log_file).unwrap().len();
        shrank |= size < previous_size;
        previous_size = size;
    }

    let backup = temp_dir.path().join("x.log.1");
    assert!(backup.exists(), "x.log.1 should exist after crossing 100 bytes");
    assert!(shrank, "x.log should restart smaller after rotation");
    assert!(!temp_dir.path().join("x.log.3").exists());
    assert_eq!(err.text().lines().count(), 10);
}

#[test]
fn test_only_file_level() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("only.log");

    let (logger, out, err) =
        captured_logger(Logger::builder(LogLevel::OnlyFile).file(&log_file), true);

    logger.trace("t").unwrap();
    logger.info("i").unwrap();
    logger.warning("w").unwrap();
    logger.error("e").unwrap();
    let _ = logger.fatal("f");

    assert!(out.text().is_empty());
    assert!(err.text().is_empty());

    let content = fs::read_to_string(&log_file).unwrap();
    let tags: String = content.lines().map(|l| &l[..1]).collect();
    assert_eq!(tags, "TIWEF");
    assert!(!content.contains('\u{1b}'));
}

#[test]
fn test_only_file_without_path_discards_everything() {
    let (logger, out, err) = captured_logger(Logger::builder(LogLevel::OnlyFile), false);

    logger.info("nowhere").unwrap();
    logger.error("nowhere").unwrap();

    assert!(out.text().is_empty());
    assert!(err.text().is_empty());
    assert_eq!(logger.metrics().lines_discarded(), 2);
}

#[test]
fn test_inactive_channels_skip_file_too() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("warn.log");

    let (logger, _out, _err) =
        captured_logger(Logger::builder(LogLevel::Warn).file(&log_file), false);

    logger.info("filtered").unwrap();
    logger.warning("kept").unwrap();

    let content = fs::read_to_string(&log_file).unwrap();
    assert!(!content.contains("filtered"));
    assert!(content.contains("kept"));
}

#[test]
fn test_most_recent_backup_is_dot_one() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("order.log");

    let sink = RotatingFileAppender::new(&log_file, 8, 3).unwrap();
    for i in 0..6 {
        sink.write(format!("chunk-{}\n", i).as_bytes()).unwrap();
    }

    assert_eq!(sink.rotation_count(), 5);
    assert_eq!(fs::read_to_string(&log_file).unwrap(), "chunk-5\n");
    assert_eq!(fs::read_to_string(sink.backup_path(1)).unwrap(), "chunk-4\n");
    assert_eq!(fs::read_to_string(sink.backup_path(2)).unwrap(), "chunk-3\n");
    assert_eq!(fs::read_to_string(sink.backup_path(3)).unwrap(), "chunk-2\n");
    assert!(!sink.backup_path(4).exists());
}

#[test]
fn test_config_driven_logger() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("configured.log");

    let json = format!(
        r#"{{ "level": "only_file", "path": {:?}, "max_bytes": 64, "backup_count": 1, "timestamp_format": "Iso8601" }}"#,
        log_file.display().to_string()
    );
    let config = LoggerConfig::from_json(&json).unwrap();
    let logger = LoggerBuilder::from_config(config).build().unwrap();

    for i in 0..10 {
        logger.info(format_args!("configured line {}", i)).unwrap();
    }

    let sink = logger.file_appender().unwrap();
    assert_eq!(sink.max_bytes(), 64);
    assert_eq!(sink.backup_count(), 1);
    assert!(sink.backup_path(1).exists());
    assert!(!sink.backup_path(2).exists());

    let content = fs::read_to_string(&log_file).unwrap();
    assert!(content.lines().all(|l| l.contains('T') && l.contains("Z ")));
}

#[test]
fn test_close_is_idempotent_through_logger() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = Logger::start(LogLevel::OnlyFile, temp_dir.path().join("c.log")).unwrap();

    assert!(logger.close().is_ok());
    assert!(logger.close().is_ok());
    assert!(logger.sync().is_ok());
}

#[test]
fn test_append_roundtrip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let target = temp_dir.path().join("test.log");

    mlog::append(&target, format_args!("{} - {}", "Hello", "World")).unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), "Hello - World");

    mlog::appendln(&target, format_args!("{} - {}", "Hello", "World 2")).unwrap();
    let content = fs::read_to_string(&target).unwrap();
    assert_eq!(content, "Hello - WorldHello - World 2\n");
    assert!(content.ends_with('\n') && !content.ends_with("\n\n"));
}

// ----------------------------------------------------------------------------
// Exit statuses. The scenario runs in a re-executed copy of this test binary.
// ----------------------------------------------------------------------------

const SCENARIO_ENV: &str = "MLOG_EXIT_SCENARIO";
const SCENARIO_DIR_ENV: &str = "MLOG_EXIT_DIR";

fn run_scenario(test_name: &str, dir: &Path) -> Output {
    Command::new(env::current_exe().expect("test binary path"))
        .args([test_name, "--exact", "--nocapture", "--test-threads=1"])
        .env(SCENARIO_ENV, test_name)
        .env(SCENARIO_DIR_ENV, dir)
        .output()
        .expect("Failed to spawn child test process")
}

/// In the child process, returns the directory to work in
fn scenario_dir(test_name: &str) -> Option<std::path::PathBuf> {
    match env::var(SCENARIO_ENV) {
        Ok(name) if name == test_name => env::var(SCENARIO_DIR_ENV).ok().map(Into::into),
        _ => None,
    }
}

#[test]
fn fatal_if_error_exits_255() {
    if let Some(dir) = scenario_dir("fatal_if_error_exits_255") {
        global::start(LogLevel::OnlyFile, dir.join("fatal.log"));
        let ok: Result<()> = Ok(());
        global::fatal_if_error(&ok);
        global::info("still running");
        let failed: std::result::Result<(), String> = Err("someError".to_string());
        global::fatal_if_error(&failed);
        unreachable!("fatal_if_error returned on an error");
    }

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = run_scenario("fatal_if_error_exits_255", temp_dir.path());
    assert_eq!(output.status.code(), Some(255));

    let content = fs::read_to_string(temp_dir.path().join("fatal.log")).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("I: ") && lines[0].ends_with("still running"));
    assert!(lines[1].starts_with("F: ") && lines[1].ends_with("someError"));
}

#[test]
fn fatalf_exits_255() {
    if let Some(dir) = scenario_dir("fatalf_exits_255") {
        global::start(LogLevel::Error, dir.join("fatalf.log"));
        global::fatalf(format_args!("cannot open {}", "db.sqlite"));
    }

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = run_scenario("fatalf_exits_255", temp_dir.path());
    assert_eq!(output.status.code(), Some(255));

    let content = fs::read_to_string(temp_dir.path().join("fatalf.log")).unwrap();
    assert!(content.contains("cannot open db.sqlite"));
}

#[test]
fn invalid_configuration_exits_1() {
    if let Some(dir) = scenario_dir("invalid_configuration_exits_1") {
        global::start_ex(LogLevel::Info, dir.join("bad.log"), 0, 5);
        unreachable!("start_ex accepted max_bytes = 0");
    }

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = run_scenario("invalid_configuration_exits_1", temp_dir.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("mlog: "));
}

#[test]
fn write_failure_exits_1() {
    if let Some(dir) = scenario_dir("write_failure_exits_1") {
        global::start(LogLevel::OnlyFile, dir.join("closed.log"));
        global::logger()
            .expect("logger installed")
            .close()
            .expect("Failed to close log file");
        global::info("lost");
        unreachable!("a failed write through the running logger returned");
    }

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = run_scenario("write_failure_exits_1", temp_dir.path());
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("mlog: "), "stderr: {}", stderr);
    assert!(stderr.contains("is closed"), "stderr: {}", stderr);
}

#[test]
fn emits_racing_stop_are_dropped() {
    if let Some(dir) = scenario_dir("emits_racing_stop_are_dropped") {
        global::start(LogLevel::OnlyFile, dir.join("race.log"));

        let done = Arc::new(AtomicBool::new(false));
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let done = Arc::clone(&done);
                thread::spawn(move || {
                    while !done.load(Ordering::Relaxed) {
                        global::info("tick");
                    }
                })
            })
            .collect();

        thread::sleep(Duration::from_millis(50));
        global::stop().expect("Failed to stop logger");
        thread::sleep(Duration::from_millis(20));
        done.store(true, Ordering::Relaxed);
        for worker in workers {
            worker.join().expect("Logging thread panicked");
        }
        return;
    }

    // The race is timing dependent; repeat it
    for _ in 0..5 {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output = run_scenario("emits_racing_stop_are_dropped", temp_dir.path());
        assert!(
            output.status.success(),
            "status {:?}, stderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stderr)
        );

        let content = fs::read_to_string(temp_dir.path().join("race.log")).unwrap();
        assert!(content.lines().count() > 0);
        assert!(content.lines().all(|l| l.starts_with("I: ") && l.ends_with("tick")));
    }
}
