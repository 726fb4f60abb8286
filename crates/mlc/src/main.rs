//! Multi-Layer Cache - Entry Point
//!
//! Lives in the `mlc` facade crate next to the library (cargo issue #6313).

use clap::Parser;
use mlc::cli::{Cli, execute};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    execute(cli).await
}
