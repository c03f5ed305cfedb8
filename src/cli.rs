use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "bluffscore",
    version,
    about = "Score dashboard with colored progress bars and a ranked leaderboard"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Args, Clone)]
pub struct GlobalArgs {
    /// Board document to load instead of ./bluffscore.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[arg(long, global = true)]
    pub json: bool,
    /// Seed for add-player, randomize and demo
    #[arg(long, global = true)]
    pub seed: Option<u64>,
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render the board
    Show,
    /// Write ./bluffscore.toml with the default board
    Init,
    /// Update one progress bar and render
    Bar(BarArgs),
    /// Update the final score and render
    FinalScore(FinalScoreArgs),
    /// Add a random player and render
    AddPlayer,
    /// Remove the last player and render
    RemovePlayer,
    /// Randomize every progress bar and the final score
    Randomize,
    /// Periodically update random bars
    Demo(DemoArgs),
    /// Interactive session reading commands from stdin
    Console,
}

#[derive(Debug, Args, Clone)]
pub struct BarArgs {
    pub index: usize,
    /// Percentage text; malformed values render with the fallback color
    #[arg(allow_hyphen_values = true)]
    pub percentage: String,
}

#[derive(Debug, Args, Clone)]
pub struct FinalScoreArgs {
    #[arg(allow_hyphen_values = true)]
    pub score: i64,
}

#[derive(Debug, Args, Clone)]
pub struct DemoArgs {
    /// Stop after this many ticks (0 runs until interrupted)
    #[arg(long)]
    pub ticks: Option<u64>,
    #[arg(long)]
    pub interval_ms: Option<u64>,
}
