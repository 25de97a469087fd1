use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod build;
mod commands;
mod config;

/// Build a JSON feed of published Markdown documents from their front matter
#[derive(Parser, Debug)]
#[command(version, about)]
struct BuildArgs {
    /// The directory to scan for Markdown documents
    #[arg(long, default_value = "content")]
    content: PathBuf,

    /// The site configuration file providing sphinx.config.html_baseurl
    #[arg(long, default_value = "_config.yml")]
    config: PathBuf,

    /// The path to write the JSON feed to
    #[arg(long, default_value = "_build/html/social/latest.json")]
    out: PathBuf,

    /// Log why documents are skipped or excluded
    #[arg(short, long, default_value = "false")]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<(), anyhow::Error> {
    let args = BuildArgs::parse();
    init_tracing(args.verbose);

    commands::build::run(&args)?;

    Ok(())
}
