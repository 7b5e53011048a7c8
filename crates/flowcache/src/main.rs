//! Flowcache - Entry Point
//!
//! Binary entry point of the operator CLI. Lives in the `flowcache` facade
//! crate next to the library it drives.

use clap::Parser;
use flowcache::cli::{Cli, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run(Cli::parse()).await
}
