//! `license-notices`: write the third-party notices for a build's dependencies.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config ([`config::load_config`]) and apply CLI overrides.
//! 3. Collect file paths from stdin, a list file, or a walk of the
//!    dependency root ([`discovery`]).
//! 4. Resolve and deduplicate packages ([`PackageAggregator::generate`]).
//! 5. Render the report ([`report`]) to stdout or `--output`.
//!
//! A resolution error aborts before anything is written.

mod cli;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::Level;

use cli::{Cli, OutputFormat};
use license_notices::config::{load_config, Config};
use license_notices::discovery::{read_path_list, walk_files};
use license_notices::license::FsLicenseReader;
use license_notices::manifest::FsManifestReader;
use license_notices::resolver::normalize;
use license_notices::{report, PackageAggregator};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let base = std::path::absolute(&cli.base)
        .map(|p| normalize(&p))
        .with_context(|| format!("invalid base directory {}", cli.base.display()))?;

    let mut config = load_config(&base, cli.config.as_deref())?;
    if let Some(root) = &cli.dependency_root {
        config.dependency_root = root.clone();
    }
    if let Some(name) = &cli.manifest_file {
        config.manifest_file = name.clone();
    }

    let paths = collect_paths(&cli, &base, &config)?;
    if !cli.quiet {
        eprintln!("  {} {} files", "→".cyan(), paths.len());
    }

    let aggregator = PackageAggregator::with_readers(
        &base,
        config.aggregator_options(),
        FsManifestReader::new(config.manifest_file.clone()),
        FsLicenseReader,
    );
    let entries = aggregator
        .generate(&paths)
        .with_context(|| format!("failed to resolve dependencies under {}", base.display()))?;

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let count = match cli.format {
        OutputFormat::Text => report::text::render(entries, &mut out)?,
        OutputFormat::Json => report::json::render(entries, &mut out)?,
        OutputFormat::Table => report::terminal::render(entries, &mut out)?,
    };

    if !cli.quiet {
        eprintln!("  {} {} packages", "✓".green(), count);
    }

    Ok(())
}

fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn collect_paths(cli: &Cli, base: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    if cli.stdin {
        return read_path_list(io::stdin().lock(), base);
    }

    if let Some(list) = &cli.files {
        let file = File::open(list).with_context(|| format!("failed to open {}", list.display()))?;
        return read_path_list(BufReader::new(file), base);
    }

    let root = base.join(&config.dependency_root);
    let spinner = if !cli.quiet {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        pb.set_message(format!("scanning {}", root.display()));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let files = walk_files(&root, &config.scan);

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    files
}
