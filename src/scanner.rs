use crate::errors::BundleError;
use crate::filter::PathFilter;
use crate::patterns::IgnorePatterns;
use crate::utils::{compare_names, normalize_path};
use std::path::{Path, PathBuf};
use tokio::fs as async_fs;
use tokio::task;
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

/// One filesystem object discovered during traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEntry {
    pub path: PathBuf,
    /// Posix-style path relative to the scan root.
    pub relative_path: String,
    pub size: u64,
    pub is_directory: bool,
    /// Matched an ignore pattern; kept only as a placeholder for the tree.
    pub is_filtered: bool,
}

impl ScanEntry {
    pub fn file(path: PathBuf, relative_path: impl Into<String>, size: u64) -> Self {
        ScanEntry {
            path,
            relative_path: relative_path.into(),
            size,
            is_directory: false,
            is_filtered: false,
        }
    }

    pub fn directory(path: PathBuf, relative_path: impl Into<String>) -> Self {
        ScanEntry {
            path,
            relative_path: relative_path.into(),
            size: 0,
            is_directory: true,
            is_filtered: false,
        }
    }

    pub fn filtered_directory(path: PathBuf, relative_path: impl Into<String>) -> Self {
        ScanEntry {
            is_filtered: true,
            ..ScanEntry::directory(path, relative_path)
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Every directory and file seen, plus filtered directories as placeholders.
    pub all_entries: Vec<ScanEntry>,
    /// Files eligible for content loading.
    pub included_entries: Vec<ScanEntry>,
    pub patterns: IgnorePatterns,
}

/// Scans `root`, honouring the built-in, `.gitignore` (when enabled) and
/// `.fullsendignore` patterns.
pub async fn scan(root: &Path, use_git_ignore: bool) -> Result<ScanResult, BundleError> {
    let metadata = async_fs::metadata(root).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => BundleError::RootNotFound(root.to_path_buf()),
        _ => BundleError::IoError(format!("{}: {}", root.display(), e)),
    })?;
    if !metadata.is_dir() {
        return Err(BundleError::NotADirectory(root.to_path_buf()));
    }

    let patterns = IgnorePatterns::resolve(root, use_git_ignore).await;
    let filter = PathFilter::new(root, &patterns);

    let walk_root = root.to_path_buf();
    let mut result = task::spawn_blocking(move || walk_directory(&walk_root, &filter)).await?;
    result.patterns = patterns;

    debug!(
        "Scan of {} found {} entries, {} included files",
        root.display(),
        result.all_entries.len(),
        result.included_entries.len()
    );
    Ok(result)
}

/// Depth-first walk of `root`. Filtered directories are recorded once and never
/// descended into; unreadable directories and entries that fail to stat are
/// skipped without aborting the walk.
pub fn walk_directory(root: &Path, filter: &PathFilter) -> ScanResult {
    let mut all_entries = Vec::new();
    let mut included_entries = Vec::new();

    let mut walker = WalkDir::new(root).min_depth(1).into_iter();
    while let Some(next) = walker.next() {
        let entry = match next {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable path: {}", e);
                continue;
            }
        };

        let relative_path = match entry.path().strip_prefix(root) {
            Ok(relative) => normalize_path(relative),
            Err(_) => continue,
        };
        let file_type = entry.file_type();
        let is_dir = file_type.is_dir();

        if filter.ignores(&relative_path, is_dir) {
            if is_dir {
                trace!("Filtered directory: {}", relative_path);
                all_entries.push(ScanEntry::filtered_directory(
                    entry.path().to_path_buf(),
                    relative_path,
                ));
                walker.skip_current_dir();
            } else {
                trace!("Filtered file: {}", relative_path);
            }
            continue;
        }

        if is_dir {
            all_entries.push(ScanEntry::directory(entry.path().to_path_buf(), relative_path));
            continue;
        }

        if !file_type.is_file() {
            trace!("Skipping non-regular file: {}", relative_path);
            continue;
        }

        match entry.metadata() {
            Ok(metadata) => {
                let scanned =
                    ScanEntry::file(entry.path().to_path_buf(), relative_path, metadata.len());
                all_entries.push(scanned.clone());
                included_entries.push(scanned);
            }
            Err(e) => debug!("Failed to stat {}: {}", relative_path, e),
        }
    }

    sort_entries(&mut all_entries);
    sort_entries(&mut included_entries);

    ScanResult {
        all_entries,
        included_entries,
        patterns: IgnorePatterns::default(),
    }
}

pub fn sort_entries(entries: &mut [ScanEntry]) {
    entries.sort_by(|a, b| compare_names(&a.relative_path, &b.relative_path));
}
