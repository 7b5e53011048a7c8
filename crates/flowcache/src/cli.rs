//! Command line interface
//!
//! Operator commands over a configured cache. Every command prints one
//! JSON document on stdout; logs go through `tracing`.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `report --minutes N` | Performance report over the last N minutes |
//! | `realtime` | Report over the real-time window |
//! | `stats [--namespace NS]` | Hit/miss counters and degrade state |
//! | `evict PATTERN` | Delete every key matching a glob |

use anyhow::{Context, bail};
use chrono::Duration as ChronoDuration;
use clap::{Parser, Subcommand};
use flowcache_infrastructure::config::ConfigLoader;
use flowcache_infrastructure::lifecycle::CacheRuntime;
use flowcache_infrastructure::logging::init_logging;
use serde_json::{Value, json};
use std::path::PathBuf;
use tracing::info;

/// Command line interface for Flowcache
#[derive(Parser, Debug)]
#[command(name = "flowcache")]
#[command(about = "Flowcache - cache and telemetry inspection")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Operator commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Performance report over a trailing range
    Report {
        /// Length of the range in minutes
        #[arg(long, default_value_t = 60)]
        minutes: u32,
    },
    /// Performance report over the real-time window
    Realtime,
    /// Cache counters of a namespace
    Stats {
        /// Namespace to inspect (defaults to the configured one)
        #[arg(long)]
        namespace: Option<String>,
    },
    /// Delete every key matching a glob, relative to the namespace
    Evict {
        /// Glob pattern such as `workflows:*`
        pattern: String,
    },
}

/// Run one command against an initialized runtime
pub async fn execute(command: &Command, runtime: &CacheRuntime) -> anyhow::Result<Value> {
    match command {
        Command::Report { minutes } => {
            if *minutes == 0 {
                bail!("--minutes must be at least 1");
            }
            let end = runtime.clock().now();
            let start = end - ChronoDuration::minutes(i64::from(*minutes));
            let report = runtime.reports().generate_report(start, end).await?;
            Ok(serde_json::to_value(report)?)
        }
        Command::Realtime => {
            let report = runtime.reports().get_real_time_stats().await?;
            Ok(serde_json::to_value(report)?)
        }
        Command::Stats { namespace } => {
            let store = match namespace {
                Some(ns) => runtime.store().namespaced(ns.clone()),
                None => runtime.store().clone(),
            };
            Ok(json!({
                "namespace": store.namespace(),
                "stats": store.get_stats().await,
                "health": store.health(),
            }))
        }
        Command::Evict { pattern } => {
            let removed = runtime.store().delete_pattern(pattern).await?;
            info!(pattern = %pattern, removed = removed, "Evicted keys");
            Ok(json!({ "pattern": pattern, "removed": removed }))
        }
    }
}

/// Load configuration, start the runtime, run the command and print its
/// result
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load().context("Failed to load configuration")?;
    init_logging(&config.logging).context("Failed to initialize logging")?;

    let runtime = CacheRuntime::init(config)
        .await
        .context("Failed to start cache runtime")?;
    let outcome = execute(&cli.command, &runtime).await;
    runtime.shutdown().await;

    println!("{}", serde_json::to_string_pretty(&outcome?)?);
    Ok(())
}
