//! Log setup for the binary.
//!
//! Lines look like `[12:34:56.789] INFO  message` and go to stderr, plus an
//! optional append-only log file.

use anyhow::{Context, Result};
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::paths::ensure_parent_dir;

/// Writes every log line to stderr and to a file.
///
/// The file copy is best-effort: its write errors are dropped, stderr errors are not.
struct TeeWriter {
    file: File,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        let _ = self.file.write_all(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        let _ = self.file.flush();
        Ok(())
    }
}

/// Installs the global logger. `RUST_LOG` overrides the default level.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));

    builder.format(|buf, record| {
        writeln!(
            buf,
            "[{}] {:<5} {}",
            Local::now().format("%H:%M:%S%.3f"),
            record.level(),
            record.args()
        )
    });

    if let Some(path) = log_file {
        ensure_parent_dir(path)
            .with_context(|| format!("Failed to create log directory for {}", path.display()))?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(TeeWriter { file })));
    } else {
        builder.target(env_logger::Target::Stderr);
    }

    builder.try_init().context("Logger already initialized")?;
    Ok(())
}

/// Routes panics through the logger before the default hook prints them.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        let location = panic_info
            .location()
            .map(|loc| format!(" at {}:{}:{}", loc.file(), loc.line(), loc.column()))
            .unwrap_or_default();
        log::error!("[PANIC]{} {}", location, msg);
        default_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_tee_writer_appends_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.log");
        let file = OpenOptions::new().create(true).append(true).open(&path).unwrap();

        let mut tee = TeeWriter { file };
        tee.write_all(b"[00:00:00.000] INFO  hello\n").unwrap();
        tee.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "[00:00:00.000] INFO  hello\n");
    }
}
