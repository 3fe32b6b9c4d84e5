use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "shelf",
    about = "Shelfline: library management over a remote document store",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a shelf.toml configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Open an interactive library session
    Shell(ShellArgs),
    /// Show the author records from the content catalog
    Authors(AuthorsArgs),
}

#[derive(Args)]
pub struct ShellArgs {
    /// Preload a small demo library
    #[arg(long)]
    pub seed: bool,
}

#[derive(Args)]
pub struct AuthorsArgs {}
