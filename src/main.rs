use clap::{Args, Parser, Subcommand};
use fullsend::config::{load_config, megabytes_to_bytes, save_config, OutputFormat, PartialConfig};
use fullsend::errors::BundleError;
use fullsend::logger::initialize_logger;
use fullsend::output::{deliver, Destination};
use fullsend::reporting::{
    render_empty, render_error, render_failures, render_patterns, render_success, render_tree,
};
use fullsend::{bundle, FileStatus};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tokio::signal;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "fullsend",
    author,
    version,
    about = "Bundle your codebase for AI chat interfaces",
    long_about = None,
    args_conflicts_with_subcommands = true
)]
struct CliArgs {
    #[command(subcommand)]
    cmd: Option<SubCommands>,
    #[command(flatten)]
    bundle: BundleArgs,
}

#[derive(Subcommand, Debug, Clone)]
enum SubCommands {
    /// Update or show the configuration stored in ~/.fullsendrc
    Config(ConfigArgs),
}

#[derive(Args, Debug, Clone)]
struct BundleArgs {
    /// Directory to scan
    #[arg(default_value = ".")]
    directory: PathBuf,
    /// Output file path
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
    /// Print the bundle to stdout instead of the clipboard
    #[arg(long, conflicts_with = "output")]
    stdout: bool,
    /// Output format (markdown or xml)
    #[arg(short = 'f', long)]
    format: Option<OutputFormat>,
    /// Verbose output
    #[arg(short = 'v', long)]
    verbose: bool,
    /// Dry run (skip output)
    #[arg(short = 'd', long)]
    dry_run: bool,
    /// Disable .gitignore
    #[arg(long)]
    no_gitignore: bool,
    /// Show file tree in final output
    #[arg(short = 't', long)]
    show_tree: bool,
    /// Max file size to process (in MB)
    #[arg(short = 'm', long, value_name = "MB")]
    max_size: Option<u64>,
}

impl BundleArgs {
    /// Only flags that were given become overrides.
    fn overrides(&self) -> PartialConfig {
        PartialConfig {
            use_git_ignore: self.no_gitignore.then_some(false),
            format: self.format,
            show_file_tree: self.show_tree.then_some(true),
            max_file_size: self.max_size.map(megabytes_to_bytes),
            verbose: self.verbose.then_some(true),
            add_xml_output_instruction: None,
        }
    }

    fn destination(&self) -> Destination {
        match (&self.output, self.stdout) {
            (Some(path), _) => Destination::File(path.clone()),
            (None, true) => Destination::Stdout,
            (None, false) => Destination::Clipboard,
        }
    }
}

#[derive(Args, Debug, Clone)]
struct ConfigArgs {
    /// Print the resolved configuration for the current directory
    #[arg(long)]
    show: bool,
    /// Output format (markdown or xml)
    #[arg(long)]
    format: Option<OutputFormat>,
    /// Include file tree in output
    #[arg(long, value_name = "BOOL")]
    show_tree: Option<bool>,
    /// Use .gitignore patterns
    #[arg(long, value_name = "BOOL")]
    use_gitignore: Option<bool>,
    /// Max file size (in MB)
    #[arg(long, value_name = "MB", value_parser = clap::value_parser!(u64).range(1..))]
    max_size: Option<u64>,
    /// Enable verbose logging
    #[arg(long, value_name = "BOOL")]
    verbose: Option<bool>,
    /// Add an instruction telling the AI not to mirror the XML format
    #[arg(long, value_name = "BOOL")]
    xml_instruction: Option<bool>,
}

impl ConfigArgs {
    fn changes(&self) -> PartialConfig {
        PartialConfig {
            use_git_ignore: self.use_gitignore,
            format: self.format,
            show_file_tree: self.show_tree,
            max_file_size: self.max_size.map(megabytes_to_bytes),
            verbose: self.verbose,
            add_xml_output_instruction: self.xml_instruction,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli_args = CliArgs::parse();

    let result = match cli_args.cmd {
        Some(SubCommands::Config(args)) => {
            initialize_logger(false);
            run_config(args).await
        }
        None => {
            initialize_logger(cli_args.bundle.verbose);
            run_bundle(cli_args.bundle).await
        }
    };

    if let Err(e) = result {
        render_error(&e.to_string());
        std::process::exit(1);
    }
}

fn create_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.dim} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

async fn run_bundle(args: BundleArgs) -> Result<(), BundleError> {
    let spinner = create_spinner();
    spinner.set_message("Loading config...");

    let config = load_config(&args.directory, args.overrides()).await;
    debug!("Bundling {} with {:?}", args.directory.display(), config);

    spinner.set_message("Scanning & Bundling...");
    let outcome = tokio::select! {
        outcome = bundle(&args.directory, config.clone()) => outcome,
        _ = signal::ctrl_c() => {
            spinner.abandon_with_message("Aborted by user.");
            std::process::exit(1);
        }
    };
    spinner.finish_and_clear();
    let result = outcome?;

    if config.verbose {
        render_patterns(&result.ignore_patterns);
        let loaded: Vec<_> = result
            .files
            .iter()
            .filter(|f| f.status == FileStatus::Loaded)
            .cloned()
            .collect();
        render_tree(&loaded);
        render_failures(&result);
    }

    if result.is_empty() {
        render_empty();
        return Ok(());
    }

    if args.dry_run {
        render_success(&result, "Dry Run", true);
        return Ok(());
    }

    let destination = args.destination();
    deliver(&result.output, &destination).await?;
    render_success(&result, &destination.label(), false);
    Ok(())
}

async fn run_config(args: ConfigArgs) -> Result<(), BundleError> {
    if args.show {
        let config = load_config(&PathBuf::from("."), PartialConfig::default()).await;
        let json = serde_json::to_string_pretty(&config)
            .map_err(|e| BundleError::ConfigError(e.to_string()))?;
        println!("{}", json);
        return Ok(());
    }

    let changes = args.changes();
    if changes == PartialConfig::default() {
        return Err(BundleError::ConfigError(
            "Nothing to change. Pass --show or at least one setting, e.g. --format xml".into(),
        ));
    }

    let path = save_config(changes).await?;
    eprintln!("Saved to {}", path.display());
    Ok(())
}
