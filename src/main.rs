use clap::{Parser, Subcommand};
use log::{LevelFilter, error, info};
use simple_pages::{config, generate, markup, output, scan};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "simple-pages")]
#[command(about = "Static site generator for small plain-text documentation sites")]
#[command(long_about = "\
Static site generator for small plain-text documentation sites

Every document in the source directory becomes one HTML page, mirrored into
the output directory. A landing page lists them all. Documents are ordered
by numeric prefix.

Source structure:

  docs/
  ├── config.toml                  # Site config (optional)
  ├── README.md                    # Excluded by default
  ├── 010-introduction.md          # → site/010-introduction.html
  ├── 020-syntax.md                # → site/020-syntax.html
  ├── changelog.md                 # No number prefix = listed last
  ├── .drafts/                     # Hidden = skipped
  └── guides/
      └── 010-install.md           # → site/guides/010-install.html

Supported markup:

  # Heading            (##, ### for levels 2 and 3)
  *em* **strong** ***both***
  `code`  [label](url)
  - item / 1. item     (both render as a bulleted list)
  ```                  fenced blocks, contents left verbatim
  blank lines          separate paragraphs

Run 'simple-pages gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Source directory
    #[arg(long, default_value = "docs", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "site", global = true)]
    output: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert every document and write the site
    Build,
    /// Convert every document in memory without writing anything
    Check,
    /// List the documents a build would convert
    Scan {
        /// Print the manifest as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the HTML fragment for a single file
    Convert {
        /// Document to convert
        file: PathBuf,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .parse_default_env()
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Build => {
            let manifest = load_and_scan(&cli.source)?;
            info!(
                "Building {} documents from {} into {}",
                manifest.documents.len(),
                cli.source.display(),
                cli.output.display()
            );
            let report = generate::generate(&manifest, &cli.source, &cli.output)?;
            output::print_generate_output(&report);
        }
        Command::Check => {
            let manifest = load_and_scan(&cli.source)?;
            let pages = generate::check(&manifest, &cli.source)?;
            output::print_check_output(&pages);
            info!("{} is valid", cli.source.display());
        }
        Command::Scan { json } => {
            let manifest = load_and_scan(&cli.source)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&manifest)?);
            } else {
                output::print_scan_output(&manifest, has_config_file(&cli.source));
            }
        }
        Command::Convert { file } => {
            let text = std::fs::read_to_string(&file)
                .map_err(|e| format!("Failed to read {}: {}", file.display(), e))?;
            println!("{}", markup::convert(&text));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the site config, size the thread pool from it, and scan the source.
fn load_and_scan(source: &Path) -> Result<scan::Manifest, Box<dyn std::error::Error>> {
    let site_config = config::load_config(source)?;
    init_thread_pool(&site_config.processing);
    Ok(scan::scan(source, &site_config)?)
}

fn has_config_file(source: &Path) -> bool {
    source.join("config.toml").is_file()
}

/// Initialize the rayon thread pool based on processing config.
///
/// Capped at the number of available CPU cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
