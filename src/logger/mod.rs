//! Logger module
//!
//! Timestamped operational logging for the backend:
//! - info/access lines to stdout or a configured file
//! - errors to stderr or a configured file
//! - the degraded-mode contact record when no mail relay is configured

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use chrono::Local;

use crate::api::types::ContactSubmission;
use crate::config::Config;

static LOG_WRITER: OnceLock<LogWriter> = OnceLock::new();

enum LogTarget {
    Stdout,
    Stderr,
    File(Mutex<File>),
}

struct LogWriter {
    info: LogTarget,
    error: LogTarget,
}

/// Initialize the global log writer from configuration.
///
/// Should be called once at application startup, before the listener opens.
pub fn init(config: &Config) -> io::Result<()> {
    let info = target_for(config.logging.access_log_file.as_deref(), LogTarget::Stdout)?;
    let error = target_for(config.logging.error_log_file.as_deref(), LogTarget::Stderr)?;
    LOG_WRITER.set(LogWriter { info, error }).map_err(|_| {
        io::Error::new(io::ErrorKind::AlreadyExists, "Log writer already initialized")
    })
}

fn target_for(path: Option<&str>, fallback: LogTarget) -> io::Result<LogTarget> {
    match path {
        Some(p) => Ok(LogTarget::File(Mutex::new(open_log_file(p)?))),
        None => Ok(fallback),
    }
}

/// Open or create a log file for appending
fn open_log_file(path: &str) -> io::Result<File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn stamp(message: &str) -> String {
    format!("[{}] {message}", Local::now().format("%Y-%m-%d %H:%M:%S"))
}

fn write_info(message: &str) {
    let line = stamp(message);
    match LOG_WRITER.get() {
        Some(writer) => write_to_target(&writer.info, &line),
        None => println!("{line}"),
    }
}

fn write_error(message: &str) {
    let line = stamp(message);
    match LOG_WRITER.get() {
        Some(writer) => write_to_target(&writer.error, &line),
        None => eprintln!("{line}"),
    }
}

fn write_to_target(target: &LogTarget, line: &str) {
    match target {
        LogTarget::Stdout => println!("{line}"),
        LogTarget::Stderr => eprintln!("{line}"),
        LogTarget::File(file) => {
            if let Ok(mut f) = file.lock() {
                let _ = writeln!(f, "{line}");
            }
        }
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("======================================");
    write_info("Portfolio backend started");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!(
        "Mail relay: {}",
        if config.contact.smtp_user.is_some() {
            "configured"
        } else {
            "not configured (contact runs in log-only mode)"
        }
    ));
    write_info(&format!("Stats upstream: {}", config.stats.url_template));
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================");
}

pub fn log_api_request(method: &str, path: &str, status: u16) {
    write_info(&format!("[API] {method} {path} - {status}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

/// Record a contact submission in the operational log.
///
/// This is the delivery path when no mail relay is configured; the record is
/// the only copy of the message.
pub fn log_contact_record(submission: &ContactSubmission) {
    write_info("[CONTACT] Mail relay not configured, recording submission:");
    write_info(&format!(
        "[CONTACT]   from: {} <{}>",
        submission.name.trim(),
        submission.email.trim()
    ));
    if !submission.topics.is_empty() {
        write_info(&format!(
            "[CONTACT]   topics: {}",
            submission.topics.join(", ")
        ));
    }
    write_info(&format!(
        "[CONTACT]   message: {}",
        submission.message.trim()
    ));
}
