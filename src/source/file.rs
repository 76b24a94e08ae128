//! File-based data source.
//!
//! Polls a JSON file holding a serialized [`StatusSnapshot`].

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;

use super::{DataSource, StatusSnapshot};

/// A data source that reads status snapshots from a JSON file.
///
/// Useful for replaying a captured page or for feeding the dashboard from
/// another collector that writes snapshots to disk.
///
/// The source tracks the file's modification time and only returns
/// new data when the file has been updated.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_error: Option<String>,
    last_modified: Option<SystemTime>,
    force_reload: bool,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            last_error: None,
            last_modified: None,
            force_reload: false,
        }
    }

    /// Returns the path being monitored.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn get_modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    fn read_file(&mut self) -> Option<StatusSnapshot> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                self.last_error = Some(format!("Read error: {}", e));
                return None;
            }
        };

        match serde_json::from_str::<StatusSnapshot>(&content) {
            Ok(snapshot) if !snapshot.version.is_compatible() => {
                self.last_error = Some(format!(
                    "Unsupported snapshot version {}.{}",
                    snapshot.version.major, snapshot.version.minor
                ));
                None
            }
            Ok(snapshot) => {
                self.last_error = None;
                Some(snapshot)
            }
            Err(e) => {
                self.last_error = Some(format!("Parse error: {}", e));
                None
            }
        }
    }
}

impl DataSource for FileSource {
    fn poll(&mut self) -> Option<StatusSnapshot> {
        let current_modified = self.get_modified_time();

        let file_changed = match (&self.last_modified, &current_modified) {
            (None, _) => true,        // First poll, always read
            (Some(_), None) => false, // File disappeared, keep showing the last snapshot
            (Some(last), Some(current)) => current > last,
        };

        if file_changed || std::mem::take(&mut self.force_reload) {
            if let Some(snapshot) = self.read_file() {
                debug!(path = %self.path.display(), monitors = snapshot.len(), "read snapshot file");
                self.last_modified = current_modified;
                return Some(snapshot);
            }
        }

        None
    }

    fn refresh(&mut self) {
        self.force_reload = true;
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
