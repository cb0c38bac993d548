//! Logger setup shared by both binaries
//!
//! `RUST_LOG` still applies on top of the chosen default. The duty bot
//! additionally appends every line to a log file.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Default filter of the long-running duty bot
pub const DUTY_DEFAULT_FILTER: &str = "info";

/// Default filter of the one-shot lookup tool
pub const LOOKUP_DEFAULT_FILTER: &str = "warn";

/// Initialize `env_logger`
///
/// With `debug` set, the workspace crates log at debug level with
/// millisecond timestamps. When `log_file` is given, lines go to both
/// stderr and that file.
pub fn init(debug: bool, default_filter: &str, log_file: Option<&Path>) -> Result<()> {
    let mut builder = if debug {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        builder
            .filter_level(log::LevelFilter::Debug)
            .filter_module("feishu_client_core", log::LevelFilter::Debug)
            .filter_module("feishu_cli", log::LevelFilter::Debug)
            .format_timestamp_millis();
        builder
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
    };

    if let Some(path) = log_file {
        let file = open_log_file(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(Tee::new(io::stderr(), file))));
    }

    builder.try_init().context("Logger already initialized")?;

    if debug {
        eprintln!("Debug logging enabled");
    }
    Ok(())
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

/// Writer duplicating everything into two sinks
pub struct Tee<A, B> {
    primary: A,
    secondary: B,
}

impl<A: Write, B: Write> Tee<A, B> {
    pub fn new(primary: A, secondary: B) -> Self {
        Self { primary, secondary }
    }

    pub fn into_inner(self) -> (A, B) {
        (self.primary, self.secondary)
    }
}

impl<A: Write, B: Write> Write for Tee<A, B> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.primary.write_all(buf)?;
        // A full disk must not silence stderr
        let _ = self.secondary.write_all(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.primary.flush()?;
        let _ = self.secondary.flush();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_tee_writes_both_sinks() {
        let mut tee = Tee::new(Vec::new(), Vec::new());
        tee.write_all(b"rotation advanced\n").unwrap();
        tee.flush().unwrap();

        let (primary, secondary) = tee.into_inner();
        assert_eq!(primary, b"rotation advanced\n");
        assert_eq!(secondary, primary);
    }

    #[test]
    fn test_open_log_file_creates_parents_and_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs/feishu-duty.log");

        open_log_file(&path).unwrap().write_all(b"one\n").unwrap();
        open_log_file(&path).unwrap().write_all(b"two\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }
}
