//! Platform-specific directory paths and log file rotation.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "treeview";
const APPLICATION: &str = "treeview-demo";

const LATEST_LOG: &str = "latest.log";
/// Prefix of archived logs; only files with it are ever pruned.
const ARCHIVE_PREFIX: &str = "treeview-demo-";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the cache directory, where logs live.
///
/// - Linux: `$XDG_CACHE_HOME/treeview-demo` or `~/.cache/treeview-demo`
/// - macOS: `~/Library/Caches/dev.treeview.treeview-demo`
/// - Windows: `C:\Users\<User>\AppData\Local\treeview\treeview-demo\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Log files in one directory: the current `latest.log` plus timestamped
/// archives of earlier runs.
#[derive(Debug, Clone)]
pub struct LogDir {
    dir: PathBuf,
    keep: usize,
}

impl LogDir {
    /// Logs under `dir`, keeping at most `keep` archives.
    pub fn new(dir: impl Into<PathBuf>, keep: usize) -> Self {
        Self {
            dir: dir.into(),
            keep,
        }
    }

    /// Path the current run logs to.
    pub fn latest(&self) -> PathBuf {
        self.dir.join(LATEST_LOG)
    }

    /// Archive the previous run's log and prune old archives.
    ///
    /// Creates the directory if needed. Returns the archive path, if a
    /// previous log existed.
    pub fn rotate(&self) -> io::Result<Option<PathBuf>> {
        fs::create_dir_all(&self.dir)?;

        let latest = self.latest();
        let archived = if latest.exists() {
            let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
            let archived = self.archive_path(&stamp);
            fs::rename(&latest, &archived)?;
            Some(archived)
        } else {
            None
        };

        self.prune()?;
        Ok(archived)
    }

    /// Archive path for `stamp`, suffixed if a run in the same second
    /// already claimed it.
    fn archive_path(&self, stamp: &str) -> PathBuf {
        let mut path = self.dir.join(format!("{}{}.log", ARCHIVE_PREFIX, stamp));
        let mut n = 1;
        while path.exists() {
            path = self
                .dir
                .join(format!("{}{}-{}.log", ARCHIVE_PREFIX, stamp, n));
            n += 1;
        }
        path
    }

    /// Archived logs, oldest first. Timestamps sort lexically.
    pub fn archives(&self) -> io::Result<Vec<PathBuf>> {
        let mut logs: Vec<PathBuf> = fs::read_dir(&self.dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| is_archive(p))
            .collect();
        logs.sort();
        Ok(logs)
    }

    fn prune(&self) -> io::Result<()> {
        let logs = self.archives()?;
        let excess = logs.len().saturating_sub(self.keep);
        for path in logs.iter().take(excess) {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

fn is_archive(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy())
        .is_some_and(|n| n.starts_with(ARCHIVE_PREFIX) && n.ends_with(".log"))
}
