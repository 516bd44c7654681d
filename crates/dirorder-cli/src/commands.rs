use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use dirorder_listing::{DirectoryListing, EntryKind, Enumeration, ListingConfig};
use serde::Serialize;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let base = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::List(args) => cmd_list(args, &base, &cli.format),
        Command::Rank(args) => cmd_rank(args, &base, &cli.format),
    }
}

/// Read listing options from a TOML file, or use defaults.
fn load_config(path: Option<&Path>) -> anyhow::Result<ListingConfig> {
    let Some(path) = path else {
        return Ok(ListingConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = toml::from_str(&text)
        .with_context(|| format!("invalid config {}", path.display()))?;
    tracing::debug!(path = %path.display(), ?config, "loaded config");
    Ok(config)
}

impl OrderArgs {
    /// Command-line switches override the config file.
    fn apply(&self, base: &ListingConfig) -> ListingConfig {
        if self.natural {
            ListingConfig::natural()
        } else if self.lexicographic {
            ListingConfig::lexicographic()
        } else {
            base.clone()
        }
    }
}

/// Fail if nothing could be read. Partial listings are already logged by the
/// library and are not an error.
fn check_outcome(outcome: &Enumeration) -> anyhow::Result<()> {
    match outcome {
        Enumeration::Failed { error } => bail!("{error}"),
        Enumeration::Complete | Enumeration::Partial { .. } => Ok(()),
    }
}

fn cmd_list(args: ListArgs, base: &ListingConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let config = args.order.apply(base);
    let listing = DirectoryListing::open(&args.path, &config);

    let count = args.limit.unwrap_or(usize::MAX);
    match format {
        OutputFormat::Text => {
            check_outcome(listing.outcome())?;
            print!("{}", render_text(&listing, args.start, count));
        }
        OutputFormat::Json => {
            // The report carries the outcome, so it is printed even on failure.
            print!("{}", render_json(&listing, &args.path, &config, args.start, count)?);
            check_outcome(listing.outcome())?;
        }
    }
    Ok(())
}

fn cmd_rank(args: RankArgs, base: &ListingConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let config = args.order.apply(base);
    let listing = DirectoryListing::open(&args.dir, &config);
    check_outcome(listing.outcome())?;

    let target = args.dir.join(&args.name);
    let Some(rank) = listing.rank_of(&target) else {
        bail!("{} is not listed in {}", args.name, args.dir.display());
    };

    match format {
        OutputFormat::Text => println!("{rank}"),
        OutputFormat::Json => {
            let report = RankedEntry {
                rank,
                path: &target,
                kind: listing.get(rank).map(|e| e.kind).unwrap_or(EntryKind::Other),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn render_text(listing: &DirectoryListing, start: usize, count: usize) -> String {
    let mut out = String::new();
    for (offset, entry) in listing.page(start, count).iter().enumerate() {
        let name = entry.file_name().to_string_lossy();
        let name = match entry.kind {
            EntryKind::Directory => format!("{name}/").blue().bold(),
            EntryKind::File => name.normal(),
            EntryKind::Other => name.dimmed(),
        };
        let _ = writeln!(out, "{:>5}  {}", start + offset, name);
    }
    out
}

#[derive(Serialize)]
struct RankedEntry<'a> {
    rank: usize,
    path: &'a Path,
    kind: EntryKind,
}

#[derive(Serialize)]
struct ListingReport<'a> {
    path: &'a Path,
    natural_order: bool,
    complete: bool,
    error: Option<String>,
    total: usize,
    entries: Vec<RankedEntry<'a>>,
}

fn render_json(
    listing: &DirectoryListing,
    path: &Path,
    config: &ListingConfig,
    start: usize,
    count: usize,
) -> anyhow::Result<String> {
    let entries = listing
        .page(start, count)
        .iter()
        .enumerate()
        .map(|(offset, entry)| RankedEntry {
            rank: start + offset,
            path: &entry.path,
            kind: entry.kind,
        })
        .collect();
    let report = ListingReport {
        path,
        natural_order: config.natural_order,
        complete: listing.outcome().is_complete(),
        error: listing.outcome().error().map(ToString::to_string),
        total: listing.len(),
        entries,
    };
    let mut json = serde_json::to_string_pretty(&report)?;
    json.push('\n');
    Ok(json)
}
