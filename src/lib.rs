pub mod bundler;
pub mod config;
pub mod errors;
pub mod filter;
pub mod formatter;
pub mod logger;
pub mod output;
pub mod patterns;
pub mod reader;
pub mod reporting;
pub mod scanner;
pub mod tokens;
pub mod tree;
pub mod utils;

pub use bundler::{bundle, BasicBundler, BundleResult, Bundler, FileStatus};
pub use config::{load_config, Config, OutputFormat, PartialConfig};
pub use errors::BundleError;
