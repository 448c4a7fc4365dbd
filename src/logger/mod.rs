//! Logger module
//!
//! Provides logging utilities for the HTTP server including:
//! - Startup and shutdown logging
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;
pub use writer::LogLevel;

use crate::config::Config;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    let level = config
        .logging
        .level
        .parse::<LogLevel>()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    writer::init(
        level,
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

// Before `init` succeeds every line goes straight to stdout/stderr.

fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

fn write_debug(message: &str) {
    if let Some(w) = writer::get() {
        w.write_debug(message);
    }
}

fn write_warning(message: &str) {
    match writer::get() {
        Some(w) => w.write_warning(message),
        None => eprintln!("{message}"),
    }
}

fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

/// The two startup lines: where we listen and which environment is active
pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info(&format!("App listening on port {} (http://{addr})", addr.port()));
    write_info(&format!("Environment: {}", config.service.environment));
}

pub fn log_server_details(config: &Config) {
    match config.server.workers {
        Some(workers) => write_debug(&format!("[CONFIG] Worker threads: {workers}")),
        None => write_debug("[CONFIG] Worker threads: default (CPU cores)"),
    }
    write_debug(&format!(
        "[CONFIG] Max body size: {} bytes",
        config.http.max_body_size
    ));
    write_debug(&format!(
        "[CONFIG] Max connections: {:?}",
        config.performance.max_connections
    ));
    if let Some(ref path) = config.logging.access_log_file {
        write_debug(&format!("[CONFIG] Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_debug(&format!("[CONFIG] Error log: {path}"));
    }
}

pub fn log_shutdown(active_connections: usize) {
    write_info(&format!(
        "[SHUTDOWN] Stopped accepting connections, {active_connections} still active"
    ));
}

pub fn log_shutdown_complete() {
    write_info("[SHUTDOWN] Server stopped");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_debug(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_debug(message: &str) {
    write_debug(&format!("[DEBUG] {message}"));
}

pub fn log_info(message: &str) {
    write_info(&format!("[INFO] {message}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_warning(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}
