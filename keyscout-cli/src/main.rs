mod render;
mod reporter;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use keyscout::{search_with_observer, ConfigOverrides, EncodingMode, ResultOrder, SearchConfig};
use std::{num::NonZeroUsize, path::PathBuf};
use tracing::debug;

use crate::render::{print_json, print_search_results, RenderOptions};
use crate::reporter::ProgressReporter;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Search for a keyword in files in a directory",
    long_about = None
)]
struct Cli {
    /// The keyword to search for
    keyword: String,

    /// Make the search case sensitive
    #[arg(short = 'c', long, overrides_with = "no_case_sensitive")]
    case_sensitive: bool,

    /// Ignore case even if the configuration file says otherwise
    #[arg(long, overrides_with = "case_sensitive")]
    no_case_sensitive: bool,

    /// The directory to search in [default: .]
    #[arg(short = 'd', long)]
    directory: Option<PathBuf>,

    /// The file pattern to search for (e.g. "*.rs", "*.*") [default: *]
    #[arg(short = 'p', long)]
    pattern: Option<String>,

    /// Ignore common non-source directories and binary files [default: true]
    #[arg(short = 's', long, action = clap::ArgAction::Set, value_name = "BOOL")]
    smart_search: Option<bool>,

    /// Match ignored directory names against whole path components only
    #[arg(long, overrides_with = "no_strict_dirs")]
    strict_dirs: bool,

    /// Match ignored directory names anywhere in the path
    #[arg(long, overrides_with = "strict_dirs")]
    no_strict_dirs: bool,

    /// Sort results by file and line instead of completion order
    #[arg(long, overrides_with = "no_sort")]
    sort: bool,

    /// Keep results in completion order
    #[arg(long, overrides_with = "sort")]
    no_sort: bool,

    /// How to handle invalid UTF-8 sequences
    #[arg(long, value_enum)]
    encoding: Option<EncodingArg>,

    /// Number of threads to use
    #[arg(short = 'j', long)]
    threads: Option<NonZeroUsize>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Print all results without asking, however many there are
    #[arg(short = 'y', long)]
    yes: bool,

    /// Ask before printing more than this many results
    #[arg(long, default_value = "100")]
    confirm_threshold: usize,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Configuration file to load on top of the default locations
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum EncodingArg {
    Failfast,
    Lossy,
}

impl From<EncodingArg> for EncodingMode {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Failfast => EncodingMode::FailFast,
            EncodingArg::Lossy => EncodingMode::Lossy,
        }
    }
}

/// Resolves a `--flag` / `--no-flag` pair; neither leaves the configured value
fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            keyword: Some(self.keyword.clone()),
            case_sensitive: flag_pair(self.case_sensitive, self.no_case_sensitive),
            root_path: self.directory.clone(),
            file_pattern: self.pattern.clone(),
            smart_search: self.smart_search,
            strict_directory_matching: flag_pair(self.strict_dirs, self.no_strict_dirs),
            result_order: flag_pair(self.sort, self.no_sort).map(|sort| {
                if sort {
                    ResultOrder::Path
                } else {
                    ResultOrder::Completion
                }
            }),
            encoding_mode: self.encoding.map(EncodingMode::from),
            thread_count: self.threads,
            log_level: self.log_level.clone(),
        }
    }
}

/// Logs go to stderr and respect RUST_LOG, falling back to the configured level
fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    run()
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = SearchConfig::load_from(cli.config.as_deref())
        .context("Failed to load configuration")?
        .merge_with_cli(cli.overrides());

    init_tracing(&config.log_level);
    debug!("Effective configuration: {:?}", config);

    let reporter = ProgressReporter::new(cli.json);
    let result = search_with_observer(&config, &reporter);
    reporter.finish();
    let output = result?;

    if cli.json {
        print_json(&output)?;
        return Ok(());
    }

    let options = RenderOptions {
        root: &config.root_path,
        keyword: &config.keyword,
        case_sensitive: config.case_sensitive,
        confirm_threshold: if cli.yes {
            None
        } else {
            Some(cli.confirm_threshold)
        },
    };
    print_search_results(&output, &options)?;
    Ok(())
}
