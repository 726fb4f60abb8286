//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Domain-wide defaults are defined in `mlc_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "mlc.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "mlc";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "MLC";

/// Separator between prefix and nested keys (`MLC__CACHE__L1__CAPACITY`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "MLC_LOG";

/// File stem used when the log path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "mlc";

// ============================================================================
// CACHE CONSTANTS
// ============================================================================

/// Default L1 byte budget for the Moka entry store (100MB)
pub const DEFAULT_L1_MAX_BYTES: u64 = 100 * 1024 * 1024;

/// Default interval between L1 expiry sweeps
pub const DEFAULT_SWEEP_INTERVAL_MS: u64 = 30_000;

/// Default bound of the mutation event queue
pub const DEFAULT_MUTATION_QUEUE_CAPACITY: usize = 1024;

/// Default Redis port
pub const DEFAULT_REDIS_PORT: u16 = 6379;

/// Default `SCAN COUNT` hint
pub const DEFAULT_SCAN_COUNT: usize = 250;

/// Default in-process bus capacity
pub const DEFAULT_BUS_CAPACITY: usize = 1024;

/// Default cap on the pub/sub resubscribe backoff in seconds
pub const DEFAULT_BUS_MAX_BACKOFF_SECS: u64 = 300;

/// Separator between a wrap namespace and the argument digest
pub const WRAP_KEY_SEPARATOR: char = ':';

// ============================================================================
// METRIC NAMES
// ============================================================================

/// Hits, labelled by `tier`
pub const METRIC_CACHE_HITS: &str = "cache_hits_total";

/// Reads that missed both tiers
pub const METRIC_CACHE_MISSES: &str = "cache_misses_total";

/// Invalidated keys, labelled by `reason`
pub const METRIC_CACHE_INVALIDATIONS: &str = "cache_invalidations_total";

/// Keys written by warming
pub const METRIC_CACHE_WARMING_EVENTS: &str = "cache_warming_events_total";

/// L2 hits copied into L1
pub const METRIC_CACHE_PROMOTIONS: &str = "cache_promotions_total";

/// Tier writes that failed while the operation succeeded
pub const METRIC_CACHE_PARTIAL_WRITE_FAILURES: &str = "cache_partial_write_failures_total";

/// Undecodable entries removed on read
pub const METRIC_CACHE_CORRUPT_ENTRIES: &str = "cache_corrupt_entries_total";
