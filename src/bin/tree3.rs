use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use webicons::{logging, tree};

/// Print the current directory as a tree, three levels deep.
#[derive(Debug, Parser)]
#[command(name = "tree3", version)]
struct Args {}

fn main() {
    logging::init();

    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    Args::parse();

    tree::print_tree(Path::new("."), tree::MAX_DEPTH).context("Failed to print directory tree")
}
