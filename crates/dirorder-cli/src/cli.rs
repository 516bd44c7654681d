use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "dirorder",
    about = "Deterministic directory listings with natural ordering",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with listing options
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List a directory in ranked order
    List(ListArgs),
    /// Show the rank of one entry of a directory
    Rank(RankArgs),
}

#[derive(Args, Default)]
pub struct OrderArgs {
    /// Directories first, numbered names in numeric order
    #[arg(long, conflicts_with = "lexicographic")]
    pub natural: bool,
    /// Plain byte-wise name order
    #[arg(long)]
    pub lexicographic: bool,
}

#[derive(Args)]
pub struct ListArgs {
    pub path: PathBuf,
    #[command(flatten)]
    pub order: OrderArgs,
    /// First rank to print
    #[arg(long, default_value = "0")]
    pub start: usize,
    /// Maximum number of entries to print
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

#[derive(Args)]
pub struct RankArgs {
    pub dir: PathBuf,
    pub name: String,
    #[command(flatten)]
    pub order: OrderArgs,
}
