use crate::config::{Config, OutputFormat};
use crate::errors::BundleError;
use crate::formatter::{get_formatter, FormatOptions};
use crate::reader::{read_files, ReadOptions, DEFAULT_CONCURRENCY};
use crate::scanner::scan;
use crate::tokens::count_tokens;
use async_trait::async_trait;
use serde::Serialize;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Loaded,
    Skipped,
    Failed,
}

/// Per-file record kept for reporting once the content is in the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub path: String,
    pub size: u64,
    pub status: FileStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureDetail {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleMetadata {
    pub total_tokens: usize,
    pub files_skipped: usize,
    pub files_failed: usize,
    pub duration: Duration,
}

#[derive(Debug, Clone)]
pub struct BundleResult {
    pub files: Vec<FileRecord>,
    pub output: String,
    pub metadata: BundleMetadata,
    pub failures: Vec<FailureDetail>,
    pub ignore_patterns: Vec<String>,
}

impl BundleResult {
    pub fn loaded_files(&self) -> impl Iterator<Item = &FileRecord> {
        self.files.iter().filter(|f| f.status == FileStatus::Loaded)
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded_files().count()
    }

    pub fn loaded_size(&self) -> u64 {
        self.loaded_files().map(|f| f.size).sum()
    }

    /// A run that found nothing to bundle. This is a successful result.
    pub fn is_empty(&self) -> bool {
        self.loaded_count() == 0
    }
}

#[async_trait]
pub trait Bundler {
    async fn bundle(&self, project_root: &Path) -> Result<BundleResult, BundleError>;
}

pub struct BasicBundler {
    config: Config,
    concurrency: usize,
}

impl BasicBundler {
    pub fn new(config: Config) -> Self {
        BasicBundler {
            config,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }
}

#[async_trait]
impl Bundler for BasicBundler {
    async fn bundle(&self, project_root: &Path) -> Result<BundleResult, BundleError> {
        let start_time = Instant::now();
        let config = &self.config;

        debug!("Scanning {}", project_root.display());
        let scan_result = scan(project_root, config.use_git_ignore).await?;

        let outcome = read_files(
            scan_result.included_entries.clone(),
            ReadOptions {
                max_file_size: config.max_file_size,
                concurrency: self.concurrency,
            },
        )
        .await;

        let format_options = FormatOptions {
            show_tree: config.show_file_tree,
            show_filtered: true,
            add_instruction: config.format == OutputFormat::Xml
                && config.add_xml_output_instruction,
        };
        let formatter = get_formatter(config.format);
        let output = formatter
            .format(
                &outcome.loaded_files,
                Some(scan_result.all_entries.as_slice()),
                &format_options,
            )
            .await;

        let total_tokens = count_tokens(&output).await;

        let mut files = Vec::with_capacity(outcome.total());
        files.extend(outcome.loaded_files.iter().map(|f| FileRecord {
            path: f.entry.relative_path.clone(),
            size: f.entry.size,
            status: FileStatus::Loaded,
        }));
        files.extend(outcome.skipped_files.iter().map(|f| FileRecord {
            path: f.entry.relative_path.clone(),
            size: f.entry.size,
            status: FileStatus::Skipped,
        }));
        files.extend(outcome.failed_files.iter().map(|f| FileRecord {
            path: f.entry.relative_path.clone(),
            size: f.entry.size,
            status: FileStatus::Failed,
        }));

        let failures = outcome
            .failed_files
            .iter()
            .map(|f| FailureDetail {
                path: f.entry.relative_path.clone(),
                message: f.error.to_string(),
            })
            .collect();

        let metadata = BundleMetadata {
            total_tokens,
            files_skipped: outcome.skipped_files.len(),
            files_failed: outcome.failed_files.len(),
            duration: start_time.elapsed(),
        };

        info!(
            "Bundled {} files ({} skipped, {} failed, {} tokens) in {:?}",
            outcome.loaded_files.len(),
            metadata.files_skipped,
            metadata.files_failed,
            metadata.total_tokens,
            metadata.duration
        );

        Ok(BundleResult {
            files,
            output,
            metadata,
            failures,
            ignore_patterns: scan_result.patterns.into_vec(),
        })
    }
}

pub async fn bundle(project_root: &Path, config: Config) -> Result<BundleResult, BundleError> {
    let bundler = BasicBundler::new(config);
    bundler.bundle(project_root).await
}
