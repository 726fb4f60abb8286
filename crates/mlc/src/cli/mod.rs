//! `mlc` command line
//!
//! | Command | Description |
//! |---------|-------------|
//! | `run` | Long-running instance: listener, sweeper, mutation handler |
//! | `get <key>` | Read a key through both tiers |
//! | `set <key> <json>` | Write a JSON value |
//! | `invalidate <pattern>` | Remove matching keys on every instance |
//! | `emit <event>` | Apply a mutation event through the pattern registry |
//! | `patterns` | List registered patterns |
//! | `health` | Check both tiers |

pub mod fixture;

use crate::cli::fixture::FixtureWarmer;
use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use mlc_domain::constants::DEFAULT_INVALIDATION_REASON;
use mlc_domain::events::MutationEvent;
use mlc_domain::value_objects::{SetOptions, TierSet};
use mlc_infrastructure::config::{AppConfig, ConfigLoader};
use mlc_infrastructure::di::{CacheRuntime, build_cache_manager};
use mlc_infrastructure::logging::init_logging;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Level used by one-shot commands so logs do not drown their output
const ONE_SHOT_LOG_LEVEL: &str = "warn";

/// Command line interface for the multi-layer cache
#[derive(Parser, Debug)]
#[command(name = "mlc")]
#[command(about = "Multi-layer cache - LRU in front of Redis with pattern invalidation")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a cache instance until Ctrl-C
    Run {
        /// JSON fixture of values to warm on startup
        #[arg(long)]
        warm: Option<PathBuf>,

        /// Seconds between metrics log lines, 0 disables them
        #[arg(long, default_value_t = 60)]
        metrics_interval_secs: u64,
    },

    /// Read a key
    Get {
        /// Cache key
        key: String,
    },

    /// Write a JSON value
    Set {
        /// Cache key
        key: String,
        /// Value as JSON text
        value: String,
        /// TTL in seconds, overriding pattern and default TTLs
        #[arg(long)]
        ttl: Option<u64>,
        /// Write to the local tier only
        #[arg(long, conflicts_with = "l2_only")]
        l1_only: bool,
        /// Write to the shared tier only
        #[arg(long)]
        l2_only: bool,
    },

    /// Remove keys matching a pattern on every instance
    Invalidate {
        /// Key or pattern, e.g. `tasks:42:*`
        pattern: String,
        /// Reason recorded in metrics
        #[arg(long, default_value = DEFAULT_INVALIDATION_REASON)]
        reason: String,
    },

    /// Apply a mutation event
    Emit {
        /// Event name, e.g. `task.update`
        event: String,
        /// Scope parameter as `name=value`, repeatable
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },

    /// List registered patterns
    Patterns,

    /// Check both tiers
    Health,
}

/// Parse a `name=value` scope parameter
pub fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected name=value, got '{raw}'")),
    }
}

/// Load configuration for `cli`
pub fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let loader = match &cli.config {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    Ok(loader.load()?)
}

/// Run the parsed command line
pub async fn execute(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_config(&cli)?;
    if !matches!(cli.command, Command::Run { .. }) {
        config.logging.level = ONE_SHOT_LOG_LEVEL.to_string();
    }
    init_logging(config.logging.clone())?;

    match cli.command {
        Command::Run {
            warm,
            metrics_interval_secs,
        } => run(&config, warm, metrics_interval_secs).await,
        Command::Get { key } => {
            let cache = build_cache_manager(&config)?;
            match cache.get_value(&key).await {
                Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
                None => println!("(nil)"),
            }
            Ok(())
        }
        Command::Set {
            key,
            value,
            ttl,
            l1_only,
            l2_only,
        } => {
            let value: serde_json::Value =
                serde_json::from_str(&value).context("Value is not valid JSON")?;
            let tiers = if l1_only {
                TierSet::L1Only
            } else if l2_only {
                TierSet::L2Only
            } else {
                TierSet::Both
            };
            let mut options = SetOptions::default().with_tiers(tiers);
            if let Some(secs) = ttl {
                options = options.with_ttl_secs(secs);
            }

            let cache = build_cache_manager(&config)?;
            cache.set(&key, &value, options).await?;
            println!("OK");
            Ok(())
        }
        Command::Invalidate { pattern, reason } => {
            let cache = build_cache_manager(&config)?;
            let removed = cache.invalidate(&pattern, &reason).await?;
            println!("{removed}");
            Ok(())
        }
        Command::Emit { event, params } => {
            let event = params
                .into_iter()
                .fold(MutationEvent::new(event), |event, (name, value)| {
                    event.with_param(name, value)
                });
            let cache = build_cache_manager(&config)?;
            let removed = cache.invalidate_for_event(&event).await?;
            println!("{removed}");
            Ok(())
        }
        Command::Patterns => {
            let cache = build_cache_manager(&config)?;
            for pattern in cache.registry().all() {
                let events: Vec<&str> =
                    pattern.invalidating_events.iter().map(String::as_str).collect();
                println!(
                    "{}\t{}\tttl={}s\twarm={}\tevents=[{}]",
                    pattern.name,
                    pattern.key_template,
                    pattern.ttl_secs,
                    pattern.warming_enabled,
                    events.join(",")
                );
            }
            Ok(())
        }
        Command::Health => {
            let cache = build_cache_manager(&config)?;
            let health = cache.health().await;
            println!("{}", serde_json::to_string_pretty(&health)?);
            if !health.status.is_healthy() {
                bail!("cache is degraded");
            }
            Ok(())
        }
    }
}

async fn run(
    config: &AppConfig,
    warm: Option<PathBuf>,
    metrics_interval_secs: u64,
) -> anyhow::Result<()> {
    let runtime = CacheRuntime::start(config).await?;
    let cache = runtime.cache().clone();

    if let Some(path) = warm {
        let warmer = FixtureWarmer::from_file(&path)
            .with_context(|| format!("Failed to read warming fixture {}", path.display()))?;
        let report = cache.warm(&warmer).await;
        for failure in &report.failures {
            tracing::warn!(pattern = %failure.pattern, key = ?failure.key, error = %failure.error, "Warming failed");
        }
    }

    info!(instance_id = cache.instance_id(), "Cache instance running, press Ctrl-C to stop");

    let metrics_logger = (metrics_interval_secs > 0).then(|| {
        let cache = cache.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(metrics_interval_secs));
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let snapshot = cache.snapshot();
                info!(
                    hit_rate = snapshot.hit_rate,
                    hits = snapshot.total_hits,
                    misses = snapshot.total_misses,
                    l1_hits = snapshot.hits_by_tier.l1,
                    l2_hits = snapshot.hits_by_tier.l2,
                    invalidations = snapshot.total_invalidations(),
                    "Cache metrics"
                );
            }
        })
    });

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    info!("Shutting down");

    if let Some(handle) = metrics_logger {
        handle.abort();
    }
    runtime.shutdown().await;
    Ok(())
}
