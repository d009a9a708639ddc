//! CLI entry point for the word-set exact cover solver

use clap::Parser;
use wordlinks::io::cli::{Cli, WordSolver};

fn main() -> wordlinks::Result<()> {
    let cli = Cli::parse();
    let mut solver = WordSolver::new(cli);
    solver.process().map(|_| ())
}
