// src/file.rs

use std::{
    fs::{self, File, OpenOptions},
    io::{self, BufWriter, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};

use serde::Serialize;

/// Append-only NDJSON log. One record per line; existing content is never
/// rewritten. Appends are serialized through an internal lock, so several
/// producers can share one handle; line order is commit order.
pub struct RecordLog {
    path: PathBuf,
    out: Mutex<BufWriter<File>>,
}

impl RecordLog {
    /// Open (creating if needed) for appending. A torn last line left by an
    /// interrupted run is terminated first so it stays an isolated,
    /// skippable line instead of swallowing the next record.
    pub fn open(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                ensure_directory(parent)?;
            }
        }
        let mut file = OpenOptions::new().create(true).read(true).append(true).open(path)?;
        if ends_without_newline(&mut file)? {
            file.write_all(b"\n")?;
        }
        Ok(Self { path: path.to_path_buf(), out: Mutex::new(BufWriter::new(file)) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record. The line is fully serialized before anything is
    /// written.
    pub fn append<T: Serialize>(&self, record: &T) -> io::Result<()> {
        let mut line = serde_json::to_vec(record).map_err(io::Error::other)?;
        line.push(b'\n');
        self.lock()?.write_all(&line)
    }

    pub fn flush(&self) -> io::Result<()> {
        self.lock()?.flush()
    }

    /// Flush and fsync. After this returns every appended record is durable.
    pub fn close(self) -> io::Result<()> {
        let out = self.out.into_inner().map_err(|_| poisoned())?;
        let file = out.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()
    }

    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, BufWriter<File>>> {
        self.out.lock().map_err(|_| poisoned())
    }
}

fn poisoned() -> io::Error {
    io::Error::other("record log lock poisoned")
}

fn ends_without_newline(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::other(format!("Path exists but is not a directory: {}", dir.display())));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
