use crate::formatter::{render_tree_section, yield_between_chunks, FormatOptions, OutputFormatter};
use crate::reader::LoadedFile;
use crate::scanner::ScanEntry;
use async_trait::async_trait;
use tracing::{debug, trace};

pub const XML_OUTPUT_INSTRUCTION: &str = "The codebase below is wrapped in XML only to delimit files. \
Do not mirror this XML structure in your reply; answer in plain text or Markdown.";

/// Wraps the bundle in `<codebase>` with each file's content in a CDATA section.
#[derive(Debug, Default, Clone)]
pub struct XmlFormatter;

impl XmlFormatter {
    pub fn new() -> Self {
        XmlFormatter
    }
}

#[async_trait]
impl OutputFormatter for XmlFormatter {
    async fn format(
        &self,
        files: &[LoadedFile],
        tree_entries: Option<&[ScanEntry]>,
        options: &FormatOptions,
    ) -> String {
        debug!("Formatting {} files as xml", files.len());
        let mut output = String::from("<codebase>\n");

        if options.add_instruction {
            output.push_str(&format!("<note>{}</note>\n", XML_OUTPUT_INSTRUCTION));
        }

        if options.show_tree {
            let tree = render_tree_section(files, tree_entries, options);
            output.push_str(&format!(
                "<structure><![CDATA[\n{}]]></structure>\n",
                escape_cdata(&tree)
            ));
        }

        for (i, file) in files.iter().enumerate() {
            if i > 0 {
                output.push('\n');
            }
            output.push_str(&format!(
                "<file path=\"{}\"><![CDATA[{}]]></file>",
                escape_xml_attribute(file.relative_path()),
                escape_cdata(&file.content)
            ));
            yield_between_chunks(i).await;
        }

        output.push_str("\n</codebase>");
        trace!("XML output length: {}", output.len());
        output
    }
}

pub fn escape_xml_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Splits every `]]>` across two CDATA sections so the content survives verbatim.
pub fn escape_cdata(value: &str) -> String {
    value.replace("]]>", "]]]]><![CDATA[>")
}
