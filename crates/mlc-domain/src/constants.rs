//! Domain layer constants
//!
//! Defaults shared by every layer. Infrastructure-only constants live in
//! `mlc_infrastructure::constants`.

// ============================================================================
// KEY GRAMMAR CONSTANTS
// ============================================================================

/// Separator between key segments (`tasks:42:page:1`)
pub const KEY_SEGMENT_DELIMITER: char = ':';

/// Wildcard token inside key templates and invalidation patterns
pub const KEY_WILDCARD: char = '*';

/// Opening brace of a `{placeholder}` token
pub const PLACEHOLDER_OPEN: char = '{';

/// Closing brace of a `{placeholder}` token
pub const PLACEHOLDER_CLOSE: char = '}';

/// Makes the next pattern character literal (`a\*b` matches the key `a*b`)
pub const PATTERN_ESCAPE: char = '\\';

// ============================================================================
// CACHE CONSTANTS
// ============================================================================

/// Default TTL for cache entries (5 minutes)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Default L1 capacity in entries
pub const DEFAULT_L1_CAPACITY: usize = 10_000;

/// Default timeout for a single distributed-tier call
pub const DEFAULT_OPERATION_TIMEOUT_MS: u64 = 500;

// ============================================================================
// INVALIDATION CONSTANTS
// ============================================================================

/// Well-known pub/sub channel carrying invalidation messages
pub const DEFAULT_INVALIDATION_CHANNEL: &str = "cache:invalidate";

/// Reason recorded when a caller invalidates without giving one
pub const DEFAULT_INVALIDATION_REASON: &str = "manual";
