//! Browser console logging.
//!
//! Installs a `tracing` fmt subscriber whose lines are forwarded to the
//! developer console. Timestamps are omitted because the wasm target has no
//! system clock and the console stamps lines itself.

use anyhow::{Result, anyhow};
use gloo::console;
use std::io;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::{self, MakeWriter};

pub(crate) fn init_logging(level: &str) -> Result<()> {
    let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .with_writer(ConsoleWriter)
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}

#[derive(Clone, Copy)]
struct ConsoleWriter;

impl<'a> MakeWriter<'a> for ConsoleWriter {
    type Writer = ConsoleLine;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleLine(Vec::new())
    }
}

/// One formatted event; flushed to the console when dropped.
struct ConsoleLine(Vec<u8>);

impl io::Write for ConsoleLine {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleLine {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.0);
        let line = line.trim_end();
        if line.starts_with("ERROR") {
            console::error!(line.to_string());
        } else if line.starts_with(" WARN") || line.starts_with("WARN") {
            console::warn!(line.to_string());
        } else if !line.is_empty() {
            console::log!(line.to_string());
        }
    }
}
