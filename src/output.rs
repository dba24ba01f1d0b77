use crate::errors::BundleError;
use arboard::Clipboard;
use std::io::Write;
use std::path::PathBuf;
use tokio::fs as async_fs;
use tracing::{debug, info};

/// Where a finished bundle is delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Clipboard,
    File(PathBuf),
    Stdout,
}

impl Destination {
    pub fn label(&self) -> String {
        match self {
            Destination::Clipboard => "Clipboard".to_string(),
            Destination::File(path) => path.display().to_string(),
            Destination::Stdout => "Stdout".to_string(),
        }
    }
}

/// Hands the finished bundle to its destination in one piece.
pub async fn deliver(output: &str, destination: &Destination) -> Result<(), BundleError> {
    match destination {
        Destination::Clipboard => {
            debug!("Initializing clipboard");
            let mut clipboard = Clipboard::new()
                .map_err(|e| BundleError::ClipboardInitError(e.to_string()))?;
            clipboard
                .set_text(output.to_owned())
                .map_err(|e| BundleError::ClipboardWriteError(e.to_string()))?;
        }
        Destination::File(path) => {
            async_fs::write(path, output)
                .await
                .map_err(|e| BundleError::OutputError(path.clone(), e.to_string()))?;
        }
        Destination::Stdout => write_bundle(std::io::stdout().lock(), output)?,
    }
    info!("Bundle written to {}", destination.label());
    Ok(())
}

/// Writes the bundle unchanged, with no trailing newline.
pub fn write_bundle<W: Write>(mut writer: W, output: &str) -> std::io::Result<()> {
    writer.write_all(output.as_bytes())?;
    writer.flush()
}
