use crate::formatter::{
    get_language, render_tree_section, yield_between_chunks, FormatOptions, OutputFormatter,
};
use crate::reader::LoadedFile;
use crate::scanner::ScanEntry;
use async_trait::async_trait;
use tracing::{debug, trace};

/// Renders each file as `path:` followed by a fenced code block.
///
/// Backtick fences inside file content are passed through untouched.
#[derive(Debug, Default, Clone)]
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        MarkdownFormatter
    }
}

#[async_trait]
impl OutputFormatter for MarkdownFormatter {
    async fn format(
        &self,
        files: &[LoadedFile],
        tree_entries: Option<&[ScanEntry]>,
        options: &FormatOptions,
    ) -> String {
        debug!("Formatting {} files as markdown", files.len());
        let mut output = String::new();

        if options.show_tree {
            output.push_str("## File Structure\n\n```text\n");
            output.push_str(&render_tree_section(files, tree_entries, options));
            output.push_str("```\n\n");
        }

        output.push_str("## Files\n\n");

        for (i, file) in files.iter().enumerate() {
            if i > 0 {
                output.push_str("\n\n");
            }
            output.push_str(&format_file_block(file));
            yield_between_chunks(i).await;
        }

        trace!("Markdown output length: {}", output.len());
        output
    }
}

fn format_file_block(file: &LoadedFile) -> String {
    let language = get_language(file.relative_path());
    format!(
        "{}:\n```{}\n{}\n```",
        file.relative_path(),
        language,
        file.content
    )
}
