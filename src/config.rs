use crate::errors::BundleError;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::fs as async_fs;
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = ".fullsendrc";
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Xml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Xml => write!(f, "xml"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "xml" => Ok(OutputFormat::Xml),
            _ => Err(format!("Unknown format: {}. Available: markdown, xml", s)),
        }
    }
}

/// Fully resolved settings; every field has a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub use_git_ignore: bool,
    pub format: OutputFormat,
    pub show_file_tree: bool,
    pub max_file_size: u64,
    pub verbose: bool,
    pub add_xml_output_instruction: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            use_git_ignore: true,
            format: OutputFormat::Markdown,
            show_file_tree: false,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            verbose: false,
            add_xml_output_instruction: false,
        }
    }
}

impl Config {
    /// Reduces `layers` left to right over the defaults; later layers win.
    pub fn resolve<I: IntoIterator<Item = PartialConfig>>(layers: I) -> Self {
        let merged = layers
            .into_iter()
            .fold(PartialConfig::default(), PartialConfig::merge);
        let defaults = Config::default();

        Config {
            use_git_ignore: merged.use_git_ignore.unwrap_or(defaults.use_git_ignore),
            format: merged.format.unwrap_or(defaults.format),
            show_file_tree: merged.show_file_tree.unwrap_or(defaults.show_file_tree),
            max_file_size: merged.max_file_size.unwrap_or(defaults.max_file_size),
            verbose: merged.verbose.unwrap_or(defaults.verbose),
            add_xml_output_instruction: merged
                .add_xml_output_instruction
                .unwrap_or(defaults.add_xml_output_instruction),
        }
    }
}

/// One configuration source. Unknown keys are ignored; a wrongly typed key
/// makes the whole source invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_git_ignore: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_file_tree: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_file_size"
    )]
    pub max_file_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_xml_output_instruction: Option<bool>,
}

impl PartialConfig {
    /// Overlays `other` on `self`; fields set in `other` win.
    pub fn merge(self, other: PartialConfig) -> PartialConfig {
        PartialConfig {
            use_git_ignore: other.use_git_ignore.or(self.use_git_ignore),
            format: other.format.or(self.format),
            show_file_tree: other.show_file_tree.or(self.show_file_tree),
            max_file_size: other.max_file_size.or(self.max_file_size),
            verbose: other.verbose.or(self.verbose),
            add_xml_output_instruction: other
                .add_xml_output_instruction
                .or(self.add_xml_output_instruction),
        }
    }

    pub fn from_json(content: &str) -> Result<Self, BundleError> {
        serde_json::from_str(content).map_err(|e| BundleError::ConfigError(e.to_string()))
    }
}

/// Accepts any non-negative JSON number. Fractions round down, which keeps
/// `size > max` unchanged for whole-byte sizes.
fn deserialize_file_size<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<f64>::deserialize(deserializer)? {
        None => Ok(None),
        Some(value) if value.is_finite() && value >= 0.0 => Ok(Some(value.floor() as u64)),
        Some(value) => Err(de::Error::custom(format!(
            "maxFileSize must be a non-negative number, got {}",
            value
        ))),
    }
}

pub fn home_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
}

/// Loads defaults, `~/.fullsendrc`, `<project_root>/.fullsendrc` and `overrides`,
/// in increasing precedence.
pub async fn load_config(project_root: &Path, overrides: PartialConfig) -> Config {
    let home = home_config_path();
    load_config_from(home.as_deref(), project_root, overrides).await
}

pub async fn load_config_from(
    home_config: Option<&Path>,
    project_root: &Path,
    overrides: PartialConfig,
) -> Config {
    let mut layers = Vec::with_capacity(3);
    if let Some(path) = home_config {
        layers.extend(read_config_file(path).await);
    }
    layers.extend(read_config_file(&project_root.join(CONFIG_FILE_NAME)).await);
    layers.push(overrides);

    let config = Config::resolve(layers);
    debug!("Resolved configuration: {:?}", config);
    config
}

/// Reads one config file. Missing files are silent; unreadable or invalid
/// files are reported and treated as absent.
pub async fn read_config_file(path: &Path) -> Option<PartialConfig> {
    let content = match async_fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No config file at {}", path.display());
            return None;
        }
        Err(e) => {
            warn!("Could not read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match PartialConfig::from_json(&content) {
        Ok(partial) => Some(partial),
        Err(e) => {
            warn!("Invalid config file {}, skipping: {}", path.display(), e);
            None
        }
    }
}

/// Writes `config` as pretty JSON to `path`.
pub async fn save_config_to(path: &Path, config: &PartialConfig) -> Result<(), BundleError> {
    let json = serde_json::to_string_pretty(config)
        .map_err(|e| BundleError::ConfigError(e.to_string()))?;
    async_fs::write(path, json)
        .await
        .map_err(|e| BundleError::OutputError(path.to_path_buf(), e.to_string()))?;
    debug!("Saved configuration to {}", path.display());
    Ok(())
}

/// Merges `changes` into the home config file and returns its path.
pub async fn save_config(changes: PartialConfig) -> Result<PathBuf, BundleError> {
    let path = home_config_path()
        .ok_or_else(|| BundleError::ConfigError("Could not determine home directory".into()))?;
    let existing = read_config_file(&path).await.unwrap_or_default();
    save_config_to(&path, &existing.merge(changes)).await?;
    Ok(path)
}

/// Converts a megabyte count from the command line into bytes.
pub fn megabytes_to_bytes(megabytes: u64) -> u64 {
    megabytes.saturating_mul(1024 * 1024)
}
