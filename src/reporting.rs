use crate::bundler::{BundleResult, FileRecord};
use crate::tree::{NodeKind, Trie};
use crate::utils::{format_number, format_size};
use colored::Colorize;
use tracing::debug;

/// Lines shown by the console file tree before it collapses.
pub const CONSOLE_TREE_LIMIT: usize = 25;

/// Renders the summary of a finished run to stderr.
pub fn render_success(result: &BundleResult, destination: &str, is_dry_run: bool) {
    debug!("Rendering summary for {} files", result.files.len());
    let metadata = &result.metadata;

    eprintln!();
    eprintln!("  {}  {}", "┌".dimmed(), "fullsend".bold());
    eprintln!("  {}", "│".dimmed());

    eprintln!(
        "  {}  {} files bundled",
        "◇".dimmed(),
        format_number(result.loaded_count())
    );
    eprintln!(
        "  {}  {}",
        "│".dimmed(),
        format!("{} processed", format_size(result.loaded_size())).dimmed()
    );

    if !is_dry_run && metadata.total_tokens > 0 {
        eprintln!(
            "  {}  {}",
            "│".dimmed(),
            format!("{} tokens generated", format_number(metadata.total_tokens)).dimmed()
        );
    }
    if metadata.files_skipped > 0 {
        eprintln!(
            "  {}  {}",
            "│".dimmed(),
            format!("{} files skipped", format_number(metadata.files_skipped)).dimmed()
        );
    }
    if metadata.files_failed > 0 {
        eprintln!(
            "  {}  {}",
            "│".dimmed(),
            format!("{} files failed", format_number(metadata.files_failed)).yellow()
        );
    }

    eprintln!("  {}", "│".dimmed());

    if is_dry_run {
        eprintln!("  {} {}", "○".yellow(), "Dry Run Complete".bold());
    } else {
        eprintln!("  {} {}", "└→".green(), destination.bold());
    }
    eprintln!(
        "     {}",
        format!("{:.2}s", metadata.duration.as_secs_f64()).dimmed()
    );
    eprintln!();
}

/// Renders the message for a run that found nothing to bundle.
pub fn render_empty() {
    eprintln!();
    eprintln!("  {}  {}", "┌".dimmed(), "fullsend".bold());
    eprintln!("  {}", "│".dimmed());
    eprintln!("  {}  No files found", "○".yellow());
    eprintln!(
        "  {}  All files were filtered or directory is empty",
        "│".dimmed()
    );
    eprintln!("  {}", "│".dimmed());
    eprintln!(
        "  {}  Try adjusting ignore patterns or check the path",
        "└".dimmed()
    );
    eprintln!();
}

pub fn render_error(message: &str) {
    eprintln!("\n  {} {}\n", "✖".red(), message);
}

/// Renders the bundled files as a capped console tree.
pub fn render_tree(files: &[FileRecord]) {
    let tree = console_tree(files, CONSOLE_TREE_LIMIT);

    eprintln!();
    eprintln!("  {}  {}", "┌".dimmed(), "File Tree".cyan());
    eprintln!("  {}", "│".dimmed());
    if tree.trim().is_empty() {
        eprintln!("  {}  {}", "│".dimmed(), "(No files)".dimmed());
    } else {
        for line in tree.trim_end().lines() {
            eprintln!("  {}  {}", "│".dimmed(), line.dimmed());
        }
    }
    eprintln!("  {}", "└".dimmed());
}

pub fn console_tree(files: &[FileRecord], limit: usize) -> String {
    let mut trie = Trie::new();
    for file in files {
        trie.insert(&file.path, NodeKind::File);
    }
    trie.render(Some(limit))
}

pub fn render_patterns(patterns: &[String]) {
    eprintln!();
    eprintln!(
        "  {}  {} ({})",
        "┌".dimmed(),
        "Ignore Patterns".cyan(),
        patterns.len()
    );
    for pattern in patterns {
        eprintln!("  {}  {}", "│".dimmed(), pattern.dimmed());
    }
    eprintln!("  {}", "└".dimmed());
}

/// Prints every read failure with its error. Only shown in verbose mode.
pub fn render_failures(result: &BundleResult) {
    if result.failures.is_empty() {
        return;
    }
    eprintln!();
    eprintln!("  {}  {}", "┌".dimmed(), "Failed Files".yellow());
    for failure in &result.failures {
        eprintln!(
            "  {}  {} {}",
            "│".dimmed(),
            failure.path,
            format!("({})", failure.message).dimmed()
        );
    }
    eprintln!("  {}", "└".dimmed());
}
