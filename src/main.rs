use anyhow::{Context, Result};
use bo6extract::{
    batch::{self, BatchConfig},
    extract::{ExtractorConfig, DEFAULT_PRIMARY_HEADING, DEFAULT_SECONDARY_HEADING},
};
use clap::Parser;
use std::{
    env,
    path::{Path, PathBuf},
};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Extract BO6 match tables from saved Activision account pages."
)]
struct Args {
    /// Directory containing source HTML files. Default is current.
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Directory to save output .csv files to. Default is current.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Exact text of the <h1> heading to anchor on. Empty disables it.
    #[arg(long, default_value = DEFAULT_PRIMARY_HEADING, allow_hyphen_values = true)]
    h1: String,

    /// Exact text of the <h2> heading the match table follows. Empty disables it.
    #[arg(long, default_value = DEFAULT_SECONDARY_HEADING, allow_hyphen_values = true)]
    h2: String,

    /// Count a file as failed instead of replacing an existing CSV of the same name.
    #[arg(long)]
    no_overwrite: bool,
}

fn main() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    if let Err(e) = run(Args::parse()) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let cwd = env::current_dir().context("reading current directory")?;
    let source_dir = absolute(args.source, &cwd);
    let output_dir = absolute(args.output, &cwd);

    let config = BatchConfig {
        source_dir,
        output_dir,
        extractor: ExtractorConfig {
            primary_heading: Some(args.h1).filter(|s| !s.is_empty()),
            secondary_heading: Some(args.h2).filter(|s| !s.is_empty()),
            ..ExtractorConfig::default()
        },
        overwrite: !args.no_overwrite,
    };

    batch::prepare_dirs(&config)?;
    println!("\nSource directory: {}", config.source_dir.display());
    println!("Output directory: {}\n", config.output_dir.display());

    let tally = batch::run(&config)?;
    info!(?tally, "all done");
    println!("\n{tally}");
    Ok(())
}

fn absolute(dir: Option<PathBuf>, cwd: &Path) -> PathBuf {
    match dir {
        Some(d) if d.is_absolute() => d,
        Some(d) => cwd.join(d),
        None => cwd.to_path_buf(),
    }
}
