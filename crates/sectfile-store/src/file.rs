//! Filesystem-backed resource.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::StoreConfig;
use crate::resource::Resource;

/// A store file on disk.
#[derive(Clone, Debug)]
pub struct FileResource {
    path: PathBuf,
}

impl FileResource {
    /// Use the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Use the file named by `config` (`<base_dir>/<name>.<extension>`).
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.path())
    }

    /// Path to the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Resource for FileResource {
    fn locator(&self) -> String {
        self.path.display().to_string()
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn create(&self) -> io::Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(_) => {
                debug!(path = %self.path.display(), "store file created");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn reader(&self) -> io::Result<Box<dyn BufRead + '_>> {
        Ok(Box::new(BufReader::new(File::open(&self.path)?)))
    }

    fn writer(&self) -> io::Result<Box<dyn Write + '_>> {
        Ok(Box::new(BufWriter::new(File::create(&self.path)?)))
    }
}
