// src/log.rs
use std::{
    error::Error,
    fs::OpenOptions,
    io,
    path::Path,
    sync::Mutex,
};

use tracing_subscriber::{fmt, EnvFilter};

use crate::file::ensure_directory;

/// Install the global subscriber. `RUST_LOG` overrides the default `info`
/// level. Lines carry time since start; with `log_file` they are appended
/// there (no ANSI) instead of going to stderr.
pub fn init(log_file: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt()
        .with_env_filter(filter)
        .with_timer(fmt::time::uptime())
        .with_target(false);

    let installed = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    ensure_directory(parent)?;
                }
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(io::stderr).try_init(),
    };
    installed.map_err(|e| format!("logger already installed: {e}").into())
}
