use crate::scanner::ScanEntry;
use futures::stream::{self, StreamExt};
use std::fmt;
use std::io;
use tokio::fs as async_fs;
use tracing::{debug, trace, warn};

pub const DEFAULT_CONCURRENCY: usize = 20;

#[derive(Debug, Clone, Copy)]
pub struct ReadOptions {
    pub max_file_size: u64,
    pub concurrency: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            max_file_size: crate::config::DEFAULT_MAX_FILE_SIZE,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// A scanned file together with its decoded text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub entry: ScanEntry,
    pub content: String,
}

impl LoadedFile {
    pub fn relative_path(&self) -> &str {
        &self.entry.relative_path
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Oversize,
    Binary,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Oversize => write!(f, "exceeds maximum file size"),
            SkipReason::Binary => write!(f, "binary content"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub entry: ScanEntry,
    pub reason: SkipReason,
}

#[derive(Debug)]
pub struct FailedFile {
    pub entry: ScanEntry,
    pub error: io::Error,
}

#[derive(Debug, Default)]
pub struct ReadOutcome {
    pub loaded_files: Vec<LoadedFile>,
    pub skipped_files: Vec<SkippedFile>,
    pub failed_files: Vec<FailedFile>,
}

impl ReadOutcome {
    pub fn total(&self) -> usize {
        self.loaded_files.len() + self.skipped_files.len() + self.failed_files.len()
    }
}

enum ReadResult {
    Loaded(LoadedFile),
    Skipped(SkippedFile),
    Failed(FailedFile),
}

/// Loads every entry with at most `options.concurrency` reads in flight. A slow
/// read only holds its own slot.
///
/// Each entry ends up in exactly one bucket. Buckets keep the input order.
pub async fn read_files(entries: Vec<ScanEntry>, options: ReadOptions) -> ReadOutcome {
    let concurrency = options.concurrency.max(1);
    let max_file_size = options.max_file_size;
    debug!(
        "Reading {} files with concurrency {}",
        entries.len(),
        concurrency
    );

    // Slots free up as soon as a read finishes; order is restored afterwards.
    let mut results: Vec<(usize, ReadResult)> = stream::iter(entries.into_iter().enumerate())
        .map(|(index, entry)| async move { (index, read_entry(entry, max_file_size).await) })
        .buffer_unordered(concurrency)
        .collect()
        .await;
    results.sort_by_key(|(index, _)| *index);

    let mut outcome = ReadOutcome::default();
    for (_, result) in results {
        match result {
            ReadResult::Loaded(file) => outcome.loaded_files.push(file),
            ReadResult::Skipped(file) => outcome.skipped_files.push(file),
            ReadResult::Failed(file) => outcome.failed_files.push(file),
        }
    }

    debug!(
        "Read complete: {} loaded, {} skipped, {} failed",
        outcome.loaded_files.len(),
        outcome.skipped_files.len(),
        outcome.failed_files.len()
    );
    outcome
}

async fn read_entry(entry: ScanEntry, max_file_size: u64) -> ReadResult {
    if entry.size > max_file_size {
        trace!(
            "Skipping {}: {} bytes exceeds {}",
            entry.relative_path,
            entry.size,
            max_file_size
        );
        return ReadResult::Skipped(SkippedFile {
            entry,
            reason: SkipReason::Oversize,
        });
    }

    let bytes = match async_fs::read(&entry.path).await {
        Ok(bytes) => bytes,
        Err(error) => {
            warn!("Failed to read file {}: {}", entry.relative_path, error);
            return ReadResult::Failed(FailedFile { entry, error });
        }
    };

    // The file may have grown since it was scanned.
    if bytes.len() as u64 > max_file_size {
        trace!(
            "Skipping {}: read {} bytes, exceeds {}",
            entry.relative_path,
            bytes.len(),
            max_file_size
        );
        return ReadResult::Skipped(SkippedFile {
            entry,
            reason: SkipReason::Oversize,
        });
    }

    match decode_text(bytes) {
        Some(content) => ReadResult::Loaded(LoadedFile { entry, content }),
        None => {
            trace!("Skipping {}: contains NUL bytes", entry.relative_path);
            ReadResult::Skipped(SkippedFile {
                entry,
                reason: SkipReason::Binary,
            })
        }
    }
}

/// Decodes file bytes as UTF-8, replacing invalid sequences. Returns `None`
/// when the text contains a NUL, which is treated as binary content.
pub fn decode_text(bytes: Vec<u8>) -> Option<String> {
    if bytes.contains(&0) {
        return None;
    }
    let content = match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    };
    Some(content)
}
