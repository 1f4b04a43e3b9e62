//! File system abstraction for testability.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Counter for unique temp file names within a process.
static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// File operations used by the pipeline plugins and the directory driver.
pub trait FileSystem: Send + Sync + std::fmt::Debug {
    /// Reads the contents of a file.
    fn read(&self, path: &Path) -> io::Result<String>;

    /// Writes a file, creating parent directories as needed.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Lists files matching a glob pattern, sorted.
    fn glob(&self, pattern: &str) -> io::Result<Vec<PathBuf>>;
}

/// Real file system implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl RealFs {
    /// Creates a new handle on the real file system.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn read(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        atomic_write(path, content)
    }

    fn glob(&self, pattern: &str) -> io::Result<Vec<PathBuf>> {
        let mut paths: Vec<PathBuf> = glob::glob(pattern)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        paths.sort();
        Ok(paths)
    }
}

/// Writes `content` to a temp file next to `path`, then renames it into place.
fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let temp_path = parent.join(format!(".omni-tmp-{}-{}", std::process::id(), counter));

    {
        let mut file = File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    fs::rename(&temp_path, path)
}

/// In-memory file system for tests.
#[derive(Debug, Default)]
pub struct VirtualFs {
    files: Mutex<BTreeMap<PathBuf, String>>,
}

impl VirtualFs {
    /// Creates a new empty virtual file system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file, replacing any previous content.
    pub fn add_file(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        if let Ok(mut files) = self.files.lock() {
            files.insert(path.into(), content.into());
        }
    }

    /// Returns the content of a file, if present.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.lock().ok()?.get(path.as_ref()).cloned()
    }

    /// Lists all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.lock()
            .map(|files| files.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn lock(&self) -> io::Result<MutexGuard<'_, BTreeMap<PathBuf, String>>> {
        self.files
            .lock()
            .map_err(|_| io::Error::other("virtual file system lock poisoned"))
    }
}

impl FileSystem for VirtualFs {
    fn read(&self, path: &Path) -> io::Result<String> {
        self.lock()?.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("File not found: {}", path.display()),
            )
        })
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        self.lock()?.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn glob(&self, pattern: &str) -> io::Result<Vec<PathBuf>> {
        let glob_pattern = glob::Pattern::new(pattern)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let matches = self
            .lock()?
            .keys()
            .filter(|p| glob_pattern.matches_path(p))
            .cloned()
            .collect();

        Ok(matches)
    }
}
