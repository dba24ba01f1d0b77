use crate::config::OutputFormat;
use crate::reader::LoadedFile;
use crate::scanner::ScanEntry;
use crate::tree::{generate_tree, TreeOptions};
use async_trait::async_trait;

pub mod languages;
pub mod markdown;
pub mod xml;

pub use languages::get_language;
pub use markdown::MarkdownFormatter;
pub use xml::XmlFormatter;

/// Files rendered between cooperative yields.
pub const FORMAT_CHUNK_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    pub show_tree: bool,
    /// Render filtered directories as `name/...` in the tree section.
    pub show_filtered: bool,
    /// XML only: prepend a `<note>` asking the reader not to answer in XML.
    pub add_instruction: bool,
}

#[async_trait]
pub trait OutputFormatter: Send + Sync {
    /// Renders `files` into a bundle. `tree_entries` feeds the tree section;
    /// when absent the tree is built from `files` alone.
    async fn format(
        &self,
        files: &[LoadedFile],
        tree_entries: Option<&[ScanEntry]>,
        options: &FormatOptions,
    ) -> String;
}

pub fn get_formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new()),
        OutputFormat::Xml => Box::new(XmlFormatter::new()),
    }
}

pub(crate) fn render_tree_section(
    files: &[LoadedFile],
    tree_entries: Option<&[ScanEntry]>,
    options: &FormatOptions,
) -> String {
    let tree_options = TreeOptions {
        limit: None,
        show_filtered: options.show_filtered,
    };
    match tree_entries {
        Some(entries) => generate_tree(entries, &tree_options),
        None => {
            let entries: Vec<ScanEntry> = files.iter().map(|f| f.entry.clone()).collect();
            generate_tree(&entries, &tree_options)
        }
    }
}

pub(crate) async fn yield_between_chunks(index: usize) {
    if (index + 1) % FORMAT_CHUNK_SIZE == 0 {
        tokio::task::yield_now().await;
    }
}
