//! Provider-specific constants

/// Default broadcast capacity of the in-process invalidation bus
pub const TOKIO_BUS_DEFAULT_CAPACITY: usize = 1024;

/// Default `COUNT` hint per `SCAN` round trip
pub const REDIS_SCAN_DEFAULT_COUNT: usize = 250;

/// First delay before re-subscribing after the pub/sub connection drops
pub const PUBSUB_INITIAL_BACKOFF_SECS: u64 = 1;

/// Upper bound of the pub/sub reconnect backoff (5 minutes)
pub const PUBSUB_MAX_BACKOFF_SECS: u64 = 300;

/// Buffered messages between the pub/sub task and its subscriber
pub const PUBSUB_FORWARD_BUFFER: usize = 1024;

/// Default Moka L1 weight limit in bytes (100MB)
pub const MOKA_DEFAULT_MAX_BYTES: u64 = 100 * 1024 * 1024;
